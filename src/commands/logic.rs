use super::error::CommandError;
use super::types::*;
use crate::config::{load_or_default, ConfigHandle, ConfigStore, ModConfig};
use crate::items::{effective_stats, ItemStack};
use crate::selection::{run_draws, DrawReport};
use rand::Rng;

/// Tag `item` with `key` unconditionally, bypassing the toolkit rules.
pub fn set_rarity(
    config: &ModConfig,
    item: Option<&mut ItemStack>,
    key: &str,
) -> Result<RaritySet, CommandError> {
    let Some(tier) = config.rarities.get(key) else {
        return Err(CommandError::UnknownRarity {
            key: key.to_string(),
            available: config.rarities.all_keys(),
        });
    };
    let item = match item {
        Some(item) if !item.is_empty() => item,
        _ => return Err(CommandError::NoHeldItem),
    };
    let previous = item.state.set_rarity(key);
    tracing::info!(item = %item.code, rarity = key, ?previous, "rarity set by command");
    Ok(RaritySet {
        key: key.to_string(),
        name: tier.name.clone(),
        previous,
    })
}

/// Reload from `store` and publish the result through `handle`.
pub fn reload(handle: &ConfigHandle, store: &dyn ConfigStore) -> ReloadSummary {
    let loaded = load_or_default(store);
    let summary = ReloadSummary {
        source: loaded.source,
        rarities: loaded.config.rarities.len(),
        toolkits: loaded.config.toolkits.len(),
        issues: loaded.issues.iter().map(ToString::to_string).collect(),
    };
    handle.replace(loaded.config);
    summary
}

/// Empirical distribution of `times` draws.
pub fn test_distribution(
    config: &ModConfig,
    times: u64,
    toolkit: Option<&str>,
    rng: &mut impl Rng,
) -> Result<DrawReport, CommandError> {
    match toolkit {
        Some(code) => {
            let kit = config
                .toolkits
                .find_by_output_code(code)
                .ok_or_else(|| CommandError::UnknownToolkit(code.to_string()))?;
            Ok(run_draws(&kit.code, &kit.rarity_weights, times, rng))
        }
        None => Ok(run_draws("rarity weights", &config.rarities.default_pool(), times, rng)),
    }
}

/// Tier state, multipliers and derived stats of `item`.
pub fn item_debug(config: &ModConfig, item: Option<&ItemStack>) -> Result<ItemDebugReport, CommandError> {
    let item = item.filter(|i| !i.is_empty()).ok_or(CommandError::NoHeldItem)?;
    let resolved = item.state.resolve(&config.rarities).map(|(key, _)| key.to_string());
    Ok(ItemDebugReport {
        code: item.code.clone(),
        rarity_key: item.state.rarity_key().map(str::to_string),
        resolved,
        multipliers: item.state.multipliers(&config.rarities),
        base: item.base_stats,
        effective: effective_stats(item, &config.rarities),
    })
}

/// Run one command against the live config.
pub fn execute(
    command: &RarityCommand,
    handle: &ConfigHandle,
    store: &dyn ConfigStore,
    held: Option<&mut ItemStack>,
    rng: &mut impl Rng,
) -> Result<CommandOutput, CommandError> {
    let config = handle.snapshot();
    let output = match command {
        RarityCommand::Set { rarity } => CommandOutput::RaritySet(set_rarity(&config, held, rarity)?),
        RarityCommand::Reload => CommandOutput::Reloaded(reload(handle, store)),
        RarityCommand::Test { times, toolkit } => CommandOutput::Distribution(test_distribution(
            &config,
            *times,
            toolkit.as_deref(),
            rng,
        )?),
        RarityCommand::ItemDebug => CommandOutput::ItemDebug(item_debug(&config, held.as_deref())?),
    };
    Ok(output)
}
