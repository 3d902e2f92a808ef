use std::panic::AssertUnwindSafe;
use std::time::Duration;

use feed_logging::{feed_debug, feed_warn};
use futures_util::FutureExt;
use listings_core::Listing;

use crate::{EngineEvent, ListingSource, PageRequest, SourceError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub request_timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Runs one source call to completion.
///
/// The call is bounded by `settings.request_timeout`, a panicking source is reported as
/// [`SourceError::Panicked`], and a page of the wrong size is rejected as a whole.
pub async fn fetch_page(
    source: &dyn ListingSource,
    request: &PageRequest,
    settings: &FetchSettings,
) -> Result<Vec<Listing>, SourceError> {
    let call = AssertUnwindSafe(source.produce_page(request)).catch_unwind();
    let listings = match tokio::time::timeout(settings.request_timeout, call).await {
        Err(_elapsed) => {
            feed_warn!(
                "{:?} page timed out after {:?}",
                request.kind,
                settings.request_timeout
            );
            return Err(SourceError::Timeout {
                after: settings.request_timeout,
            });
        }
        Ok(Err(_panic)) => {
            feed_warn!("Listing source panicked while producing a {:?} page", request.kind);
            return Err(SourceError::Panicked);
        }
        Ok(Ok(result)) => result?,
    };

    if listings.len() != request.count {
        return Err(SourceError::WrongCount {
            expected: request.count,
            actual: listings.len(),
        });
    }

    feed_debug!("{:?} page of {} listings ready", request.kind, listings.len());
    Ok(listings)
}
