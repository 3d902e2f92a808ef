use std::time::Duration;

use listings_core::{Listing, LoadKind, LoadTicket, SearchQuery};
use thiserror::Error;

/// What the controller asked a source for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub kind: LoadKind,
    pub count: usize,
    pub query: Option<SearchQuery>,
}

impl PageRequest {
    pub fn for_ticket(ticket: LoadTicket, query: Option<SearchQuery>) -> Self {
        Self {
            kind: ticket.kind,
            count: ticket.count,
            query,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageReady {
        ticket: LoadTicket,
        result: Result<Vec<Listing>, SourceError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("listing source unavailable: {0}")]
    Unavailable(String),
    #[error("listing source timed out after {after:?}")]
    Timeout { after: Duration },
    #[error("listing source returned {actual} listings, expected {expected}")]
    WrongCount { expected: usize, actual: usize },
    #[error("listing source panicked")]
    Panicked,
}
