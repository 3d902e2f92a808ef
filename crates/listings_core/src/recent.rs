use crate::Listing;

pub const RECENTLY_VIEWED_LIMIT: usize = 5;

/// Bounded, most-recent-first history of viewed listings. Ids are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentlyViewed {
    entries: Vec<Listing>,
    limit: usize,
}

impl Default for RecentlyViewed {
    fn default() -> Self {
        Self::with_limit(RECENTLY_VIEWED_LIMIT)
    }
}

impl RecentlyViewed {
    pub fn new() -> Self {
        Self::default()
    }

    /// A limit of zero is treated as one.
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: Vec::with_capacity(limit + 1),
            limit,
        }
    }

    /// Moves `listing` to the front, dropping any older entry with the same id and evicting
    /// the oldest entries beyond the limit.
    pub fn record_view(&mut self, listing: Listing) {
        self.entries.retain(|entry| entry.id != listing.id);
        self.entries.insert(0, listing);
        self.entries.truncate(self.limit);
    }

    pub fn all(&self) -> &[Listing] {
        &self.entries
    }

    pub fn find(&self, id: &str) -> Option<&Listing> {
        self.entries.iter().find(|entry| entry.has_id(id))
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
