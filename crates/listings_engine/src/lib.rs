//! Listings engine: listing sources and asynchronous page loading.
mod engine;
mod fetch;
mod source;
mod synthetic;
mod types;

pub use engine::EngineHandle;
pub use fetch::{fetch_page, ChannelEventSink, EventSink, FetchSettings};
pub use source::ListingSource;
pub use synthetic::{
    Clock, SyntheticSettings, SyntheticSource, CATEGORIES, IMAGE_URLS, LISTING_TEMPLATES,
    LOCATIONS,
};
pub use types::{EngineEvent, PageRequest, SourceError};
