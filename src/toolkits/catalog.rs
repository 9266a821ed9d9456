use super::types::ToolkitTier;
use serde::{Deserialize, Serialize};

/// Ordered list of toolkit definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolkitCatalog {
    toolkits: Vec<ToolkitTier>,
}

impl ToolkitCatalog {
    pub fn new(toolkits: Vec<ToolkitTier>) -> Self {
        Self { toolkits }
    }

    /// Linear scan; the first toolkit with a matching code wins.
    pub fn find_by_output_code(&self, code: &str) -> Option<&ToolkitTier> {
        self.toolkits.iter().find(|t| t.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolkitTier> {
        self.toolkits.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ToolkitTier> {
        self.toolkits.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.toolkits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toolkits.is_empty()
    }

    /// Codes defined more than once, each reported once in first-seen order.
    pub fn duplicate_codes(&self) -> Vec<&str> {
        let mut dups: Vec<&str> = Vec::new();
        for (i, toolkit) in self.toolkits.iter().enumerate() {
            let seen_before = self.toolkits[..i].iter().any(|t| t.code == toolkit.code);
            if seen_before && !dups.contains(&toolkit.code.as_str()) {
                dups.push(&toolkit.code);
            }
        }
        dups
    }
}
