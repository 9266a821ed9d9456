//! Gate for whether an item may receive, or re-roll, a rarity tier.
//!
//! The check reads only the item it is given, so the authoritative copy and a
//! predicting copy of the same stack always reach the same verdict.

use super::types::{ItemCategory, ItemStack};

/// Host-side item classification.
pub trait ItemClassifier {
    fn is_enhanceable(&self, item: &ItemStack) -> bool;
}

/// Accepts tools, weapons, armor and shields.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryClassifier;

impl ItemClassifier for CategoryClassifier {
    fn is_enhanceable(&self, item: &ItemStack) -> bool {
        item.category.is_enhanceable()
    }
}

/// Classifier with an explicit allow-list of categories.
#[derive(Debug, Clone)]
pub struct AllowedCategories(pub Vec<ItemCategory>);

impl ItemClassifier for AllowedCategories {
    fn is_enhanceable(&self, item: &ItemStack) -> bool {
        self.0.contains(&item.category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsuitable {
    EmptyStack,
    WrongCategory,
    AlreadyEnhanced,
}

pub fn check_suitability(
    item: &ItemStack,
    require_never_enhanced: bool,
    classifier: &dyn ItemClassifier,
) -> Result<(), Unsuitable> {
    if item.is_empty() {
        return Err(Unsuitable::EmptyStack);
    }
    if !classifier.is_enhanceable(item) {
        return Err(Unsuitable::WrongCategory);
    }
    if require_never_enhanced && item.state.is_enhanced() {
        return Err(Unsuitable::AlreadyEnhanced);
    }
    Ok(())
}

pub fn is_eligible(
    item: &ItemStack,
    require_never_enhanced: bool,
    classifier: &dyn ItemClassifier,
) -> bool {
    check_suitability(item, require_never_enhanced, classifier).is_ok()
}
