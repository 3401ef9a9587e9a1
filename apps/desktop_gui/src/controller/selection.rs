//! Per-card variant selection, keyed by display position.
//!
//! Selections are deliberately position-keyed and survive list refreshes:
//! a choice applies to "the Nth card", not to a particular product.

use std::collections::HashMap;

use shared::domain::Variant;

#[derive(Default)]
pub struct SelectionMap {
    chosen: HashMap<usize, Variant>,
}

impl SelectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored choice for this position, or the default variant.
    pub fn selected(&self, index: usize) -> Variant {
        self.chosen.get(&index).copied().unwrap_or_default()
    }

    pub fn select(&mut self, index: usize, variant: Variant) {
        self.chosen.insert(index, variant);
    }
}
