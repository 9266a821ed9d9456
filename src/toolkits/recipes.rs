//! Registration of toolkit items and their crafting recipes with the host.

use super::catalog::ToolkitCatalog;
use super::types::{ToolInput, ToolkitTier};

pub const RECIPE_DOMAIN: &str = "itemrarity";

/// Shapeless crafting recipe producing one toolkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolkitRecipe {
    pub name: String,
    pub ingredients: Vec<ToolInput>,
    pub output_code: String,
    pub output_quantity: u32,
}

/// Host crafting/item subsystem, seen from the registration side.
pub trait RecipeRegistrar {
    /// Whether the host already knows an item with this code.
    fn has_item(&self, code: &str) -> bool;
    fn register_item(&mut self, code: &str);
    fn register_recipe(&mut self, recipe: ToolkitRecipe);
}

/// Why a toolkit was left out of registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    EmptyCode,
    NoInputs,
    InvalidInput { index: usize },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistrationSummary {
    pub items_registered: usize,
    pub items_already_known: usize,
    pub recipes_registered: usize,
    pub skipped: Vec<(String, SkipReason)>,
}

/// Build the recipe for a toolkit, or explain why it cannot have one.
pub fn recipe_for(toolkit: &ToolkitTier) -> Result<ToolkitRecipe, SkipReason> {
    if toolkit.code.trim().is_empty() {
        return Err(SkipReason::EmptyCode);
    }
    if toolkit.inputs.is_empty() {
        return Err(SkipReason::NoInputs);
    }
    if let Some(index) = toolkit
        .inputs
        .iter()
        .position(|i| i.item_code.trim().is_empty() || i.quantity == 0)
    {
        return Err(SkipReason::InvalidInput { index });
    }

    Ok(ToolkitRecipe {
        name: format!("{}:recipe-{}", RECIPE_DOMAIN, toolkit.code_path()),
        ingredients: toolkit.inputs.clone(),
        output_code: toolkit.code.clone(),
        output_quantity: 1,
    })
}

/// Register every toolkit item and recipe, skipping malformed entries.
pub fn register_toolkits(
    catalog: &ToolkitCatalog,
    registrar: &mut impl RecipeRegistrar,
) -> RegistrationSummary {
    let mut summary = RegistrationSummary::default();

    if catalog.is_empty() {
        tracing::info!("no toolkits defined, skipping item and recipe registration");
        return summary;
    }

    for toolkit in catalog.iter() {
        if toolkit.code.trim().is_empty() {
            tracing::warn!(name = %toolkit.name, "toolkit with empty code, skipping");
            summary.skipped.push((toolkit.name.clone(), SkipReason::EmptyCode));
            continue;
        }

        if registrar.has_item(&toolkit.code) {
            tracing::debug!(code = %toolkit.code, "toolkit item already registered");
            summary.items_already_known += 1;
        } else {
            registrar.register_item(&toolkit.code);
            tracing::info!(code = %toolkit.code, "registered toolkit item");
            summary.items_registered += 1;
        }

        match recipe_for(toolkit) {
            Ok(recipe) => {
                tracing::info!(recipe = %recipe.name, output = %recipe.output_code, "registered toolkit recipe");
                registrar.register_recipe(recipe);
                summary.recipes_registered += 1;
            }
            Err(reason) => {
                tracing::warn!(code = %toolkit.code, ?reason, "toolkit recipe skipped");
                summary.skipped.push((toolkit.code.clone(), reason));
            }
        }
    }

    summary
}
