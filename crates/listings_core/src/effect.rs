use crate::{Listing, ListingCard, ListingId, LoadTicket, SearchQuery};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the source for the page described by `ticket`.
    FetchPage {
        ticket: LoadTicket,
        query: Option<SearchQuery>,
    },
    Render(RenderCommand),
    /// Show a transient notification.
    Notify(String),
    Share(SharePayload),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Replace,
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    Listings {
        mode: RenderMode,
        cards: Vec<ListingCard>,
    },
    RecentlyViewed {
        entries: Vec<Listing>,
    },
    LoadingIndicator {
        visible: bool,
    },
    SavedMarker {
        id: ListingId,
        saved: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub listing_id: ListingId,
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn for_listing(listing: &Listing, site_origin: &str) -> Self {
        Self {
            listing_id: listing.id.clone(),
            title: listing.title.clone(),
            text: format!(
                "Check out this listing: {} - {}",
                listing.title, listing.price
            ),
            url: crate::share_url(site_origin, &listing.id),
        }
    }
}

/// How the platform handled a share request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// A native share sheet took the payload.
    Shared,
    CopiedToClipboard,
    /// Neither share nor clipboard was available; the link is shown instead.
    Unavailable { url: String },
}
