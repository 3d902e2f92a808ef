use crate::{Listing, ListingId, SearchQuery};

/// A listing as shown in the grid, with its per-session saved marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCard {
    pub listing: Listing,
    pub saved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentItemView {
    pub id: ListingId,
    pub title: String,
    pub price: String,
    pub image: String,
}

impl RecentItemView {
    pub(crate) fn from_listing(listing: &Listing) -> Self {
        Self {
            id: listing.id.clone(),
            title: listing.title.clone(),
            price: listing.price.clone(),
            image: listing.image.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub cards: Vec<ListingCard>,
    pub page: u32,
    pub loading: bool,
    pub recently_viewed: Vec<RecentItemView>,
    pub saved_count: usize,
    pub active_query: Option<SearchQuery>,
}

impl AppViewModel {
    /// Id of the card at a 1-based grid position.
    pub fn card_id(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|index| self.cards.get(index))
            .map(|card| card.listing.id.as_str())
    }

    /// Id of the recently viewed entry at a 1-based panel position.
    pub fn recent_id(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|index| self.recently_viewed.get(index))
            .map(|item| item.id.as_str())
    }
}
