//! JSON file helpers for the ~/.itemrarity/ directory and explicit paths.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "itemrarity.json";

/// Get the ~/.itemrarity/ directory path.
pub fn itemrarity_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    Ok(home_dir.join(".itemrarity"))
}

/// Default location of the config file.
pub fn default_config_path() -> io::Result<PathBuf> {
    Ok(itemrarity_dir()?.join(CONFIG_FILE_NAME))
}

/// Read a JSON file. A missing file is `Ok(None)`; a malformed one is an error.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> io::Result<Option<T>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    let value =
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(Some(value))
}

/// Write a value as pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path_format() {
        if let Ok(path) = default_config_path() {
            assert!(path.to_string_lossy().ends_with(".itemrarity/itemrarity.json"));
        }
    }

    #[test]
    fn test_read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let val: Option<Vec<String>> = read_json(&dir.path().join("missing.json")).unwrap();
        assert!(val.is_none());
    }

    #[test]
    fn test_read_malformed_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        let err = read_json::<Vec<String>>(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_write_creates_parent_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");
        let data = vec!["hello".to_string(), "world".to_string()];
        write_json(&path, &data).unwrap();
        let loaded: Option<Vec<String>> = read_json(&path).unwrap();
        assert_eq!(loaded, Some(data));
    }
}
