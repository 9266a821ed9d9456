use crate::config::ConfigSource;
use crate::items::ItemStats;
use crate::rarity::Multipliers;
use crate::selection::DrawReport;
use serde::Serialize;

/// Chat-style administrative commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RarityCommand {
    /// Force a tier onto the held item.
    Set { rarity: String },
    Reload,
    /// Draw `times` tiers from a toolkit pool, or from the registry's
    /// nominal weights when no toolkit is named.
    Test { times: u64, toolkit: Option<String> },
    ItemDebug,
}

impl RarityCommand {
    /// Parse `set <key>`, `reload`, `test <n> [toolkit]` or `itemdebug`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let command = match words.next()? {
            "set" => RarityCommand::Set {
                rarity: words.next()?.to_string(),
            },
            "reload" => RarityCommand::Reload,
            "test" => RarityCommand::Test {
                times: words.next()?.parse().ok()?,
                toolkit: words.next().map(str::to_string),
            },
            "itemdebug" => RarityCommand::ItemDebug,
            _ => return None,
        };
        Some(command)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaritySet {
    pub key: String,
    pub name: String,
    pub previous: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReloadSummary {
    #[serde(skip)]
    pub source: ConfigSource,
    pub rarities: usize,
    pub toolkits: usize,
    pub issues: Vec<String>,
}

/// State and derived numbers for one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDebugReport {
    pub code: String,
    pub rarity_key: Option<String>,
    /// Tier actually used, after registry fallback.
    pub resolved: Option<String>,
    pub multipliers: Multipliers,
    pub base: ItemStats,
    pub effective: ItemStats,
}

impl ItemDebugReport {
    pub fn to_text(&self) -> String {
        let mut out = format!("Item: {}\n", self.code);
        match (&self.rarity_key, &self.resolved) {
            (Some(key), Some(resolved)) if key == resolved => {
                out.push_str(&format!("  rarity: {key}\n"));
            }
            (Some(key), Some(resolved)) => {
                out.push_str(&format!("  rarity: {key} (unknown, using {resolved})\n"));
            }
            _ => out.push_str("  rarity: none\n"),
        }
        out.push_str("  multipliers:\n");
        for (field, value) in self.multipliers.fields() {
            out.push_str(&format!("    {field:<44} x{value:.2}\n"));
        }
        out.push_str(&format!(
            "  durability: {} -> {}\n",
            self.base.durability_points(),
            self.effective.durability_points()
        ));
        out
    }
}

#[derive(Debug, Clone)]
pub enum CommandOutput {
    RaritySet(RaritySet),
    Reloaded(ReloadSummary),
    Distribution(DrawReport),
    ItemDebug(ItemDebugReport),
}

impl CommandOutput {
    pub fn to_text(&self) -> String {
        match self {
            CommandOutput::RaritySet(set) => match &set.previous {
                Some(previous) => format!("Rarity set to {} (was {previous})", set.name),
                None => format!("Rarity set to {}", set.name),
            },
            CommandOutput::Reloaded(summary) => {
                let mut out = format!(
                    "Reloaded configuration ({:?}): {} rarities, {} toolkits",
                    summary.source, summary.rarities, summary.toolkits
                );
                for issue in &summary.issues {
                    out.push_str(&format!("\n  warning: {issue}"));
                }
                out
            }
            CommandOutput::Distribution(report) => report.to_text(),
            CommandOutput::ItemDebug(report) => report.to_text(),
        }
    }
}
