//! Hint index: the distinct answers present in the active deck.

use std::collections::BTreeSet;

use crate::types::Card;

/// Distinct scientific names of `cards`, sorted by code point.
pub fn distinct_names(cards: &[Card]) -> Vec<String> {
    cards
        .iter()
        .map(|card| card.scientific_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Default, Clone)]
pub struct HintIndex {
    hints: Vec<String>,
    visible: bool,
}

impl HintIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from the deck's card contents. Call after the membership changes.
    pub fn rebuild(&mut self, cards: &[Card]) -> &[String] {
        self.hints = distinct_names(cards);
        &self.hints
    }

    /// Flip visibility and return the new value.
    pub fn toggle_visibility(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Hint at its displayed position.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.hints.get(index).map(String::as_str)
    }
}
