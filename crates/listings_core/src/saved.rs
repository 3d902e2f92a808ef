use std::collections::BTreeSet;

use crate::ListingId;

/// Ids of listings the user has saved during this session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SavedListings {
    ids: BTreeSet<ListingId>,
}

impl SavedListings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the saved state of `id` and returns the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
