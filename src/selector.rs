//! Random, budget-bounded item selection.
//!
//! All functions take the random source as a parameter; pass a seeded
//! `StdRng` to get reproducible outfits.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::models::{CatalogItem, Category, CategoryIndex, SelectedOutfit};

/// Outcome of re-rolling a single slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "item", rename_all = "snake_case")]
pub enum SlotResult {
    /// A new item was drawn for the slot
    Selected(CatalogItem),
    /// Nothing in the category is within the ceiling; the slot keeps its item
    NoEligibleItem,
}

impl SlotResult {
    pub fn item(&self) -> Option<&CatalogItem> {
        match self {
            SlotResult::Selected(item) => Some(item),
            SlotResult::NoEligibleItem => None,
        }
    }
}

/// Items priced at or below `max_price`, in source order
pub fn eligible_items(items: &[CatalogItem], max_price: u64) -> Vec<&CatalogItem> {
    let ceiling = max_price as f64;
    items.iter().filter(|item| item.price <= ceiling).collect()
}

/// Draw one item uniformly from those priced at or below `max_price`.
///
/// Returns `None` when no item qualifies.
pub fn select_one<'a, R>(items: &'a [CatalogItem], max_price: u64, rng: &mut R) -> Option<&'a CatalogItem>
where
    R: Rng + ?Sized,
{
    eligible_items(items, max_price).choose(rng).copied()
}

/// Re-roll one category against a ceiling, independent of any other slot
pub fn select_slot<R>(index: &CategoryIndex, category: Category, max_price: u64, rng: &mut R) -> SlotResult
where
    R: Rng + ?Sized,
{
    match select_one(index.items(category), max_price, rng) {
        Some(item) => SlotResult::Selected(item.clone()),
        None => {
            log::debug!("No {} item priced at or below {}", category, max_price);
            SlotResult::NoEligibleItem
        }
    }
}

/// Compose a full outfit whose rounded total never exceeds `budget`.
///
/// Categories are filled one after another in [`Category::SELECTION_ORDER`],
/// each offered only what the earlier picks left over. A category with no
/// affordable item is left out.
pub fn select_outfit<R>(index: &CategoryIndex, budget: u64, rng: &mut R) -> SelectedOutfit
where
    R: Rng + ?Sized,
{
    let mut outfit = SelectedOutfit::new();
    let mut consumed: u64 = 0;

    for category in Category::SELECTION_ORDER {
        let remaining = budget.saturating_sub(consumed);
        if let Some(item) = select_one(index.items(category), remaining, rng) {
            // The ledger rounds each pick; the item keeps its exact price.
            consumed += item.rounded_price();
            outfit.insert(item.clone());
        }
    }

    log::debug!(
        "Selected {} of {} slots, {} of {} budget used",
        outfit.len(),
        Category::SELECTION_ORDER.len(),
        consumed,
        budget
    );

    outfit
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
