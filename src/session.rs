//! Outfit session: the budget and outfit of one user interaction.
//!
//! The session owns no rendering state; a front end reads [`OutfitSession::outfit`]
//! and feeds user intents back through the re-roll methods.

use rand::Rng;
use std::sync::Arc;

use crate::models::{Category, CategoryIndex, SelectedOutfit, DEFAULT_BUDGET};
use crate::selector::{select_outfit, select_slot, SlotResult};

/// Budget plus the current outfit, backed by a shared read-only catalog
#[derive(Debug, Clone)]
pub struct OutfitSession {
    index: Arc<CategoryIndex>,
    budget: u64,
    /// `None` until the first roll, and again after the budget changes
    outfit: Option<SelectedOutfit>,
}

impl OutfitSession {
    pub fn new(index: Arc<CategoryIndex>, budget: u64) -> Self {
        Self {
            index,
            budget,
            outfit: None,
        }
    }

    /// Session starting at [`DEFAULT_BUDGET`]
    pub fn with_default_budget(index: Arc<CategoryIndex>) -> Self {
        Self::new(index, DEFAULT_BUDGET)
    }

    pub fn budget(&self) -> u64 {
        self.budget
    }

    pub fn outfit(&self) -> Option<&SelectedOutfit> {
        self.outfit.as_ref()
    }

    /// True before the first roll and after the budget changed
    pub fn is_empty(&self) -> bool {
        self.outfit.is_none()
    }

    /// Replace the budget and drop the current outfit.
    ///
    /// Does not roll a new outfit; call [`reroll_all`](Self::reroll_all).
    pub fn set_budget(&mut self, budget: u64) {
        log::debug!("Budget changed from {} to {}", self.budget, budget);
        self.budget = budget;
        self.outfit = None;
    }

    /// Drop the current outfit, keeping the budget
    pub fn clear(&mut self) {
        self.outfit = None;
    }

    /// Draw a new item for one slot.
    ///
    /// The slot is checked against the whole budget, not against what the
    /// other slots leave over, so the outfit total can end up above the
    /// budget. With nothing affordable the slot keeps its current item.
    pub fn reroll_slot<R>(&mut self, category: Category, rng: &mut R) -> SlotResult
    where
        R: Rng + ?Sized,
    {
        let result = select_slot(&self.index, category, self.budget, rng);
        if let SlotResult::Selected(item) = &result {
            self.outfit
                .get_or_insert_with(SelectedOutfit::new)
                .insert(item.clone());
        }
        result
    }

    /// Throw away the outfit and roll a full new one within the budget
    pub fn reroll_all<R>(&mut self, rng: &mut R) -> &SelectedOutfit
    where
        R: Rng + ?Sized,
    {
        self.outfit.insert(select_outfit(&self.index, self.budget, rng))
    }

    /// Sum of the rounded prices of the selected items; 0 when empty
    pub fn total_price(&self) -> u64 {
        self.outfit
            .as_ref()
            .map(SelectedOutfit::total_price)
            .unwrap_or(0)
    }
}
