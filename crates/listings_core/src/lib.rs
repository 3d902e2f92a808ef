//! Listings core: pure feed state machine and view-model helpers.
mod effect;
mod feed;
mod listing;
mod msg;
mod recent;
mod saved;
mod scroll;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, RenderCommand, RenderMode, ShareOutcome, SharePayload};
pub use feed::{
    FeedConfig, FeedState, LoadFailure, LoadKind, LoadOutcome, LoadTicket,
    DEFAULT_INITIAL_PAGE_SIZE, DEFAULT_MORE_PAGE_SIZE,
};
pub use listing::{Listing, ListingId};
pub use msg::Msg;
pub use recent::{RecentlyViewed, RECENTLY_VIEWED_LIMIT};
pub use saved::SavedListings;
pub use scroll::{ScrollMetrics, ScrollTrigger, DEFAULT_SCROLL_THRESHOLD};
pub use state::{share_url, AppState, CoreSettings, SearchQuery, DEFAULT_SITE_ORIGIN};
pub use update::update;
pub use view_model::{AppViewModel, ListingCard, RecentItemView};
