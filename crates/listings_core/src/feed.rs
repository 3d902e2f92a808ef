//! Paged listings feed with a single-flight load guard.
//!
//! A load is split in two halves: `load_initial`/`load_more` decide whether a load may start
//! and hand out a [`LoadTicket`]; `complete_load` applies the result for that ticket. Between
//! the two halves the feed reports `loading() == true` and refuses to start another load.

use feed_logging::{feed_debug, feed_warn};

use crate::{effect::RenderMode, Listing};

pub const DEFAULT_INITIAL_PAGE_SIZE: usize = 12;
pub const DEFAULT_MORE_PAGE_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    pub initial_page_size: usize,
    pub more_page_size: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            initial_page_size: DEFAULT_INITIAL_PAGE_SIZE,
            more_page_size: DEFAULT_MORE_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// First page of a feed; replaces whatever was loaded.
    Initial,
    /// Next page; appended to the loaded items.
    More,
}

impl LoadKind {
    pub fn render_mode(self) -> RenderMode {
        match self {
            LoadKind::Initial => RenderMode::Replace,
            LoadKind::More => RenderMode::Append,
        }
    }
}

/// Identifies one in-flight load.
///
/// `seq` is unique per started load. `generation` is the feed generation at the time the load
/// started; `reset` bumps it so a completion from before the reset can be told apart from one
/// for the current feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub seq: u64,
    pub generation: u64,
    pub kind: LoadKind,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    SourceUnavailable,
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was applied; `listings` holds only the new page.
    Applied {
        mode: RenderMode,
        listings: Vec<Listing>,
    },
    /// The load failed; items and page are unchanged.
    Failed(LoadFailure),
    /// The load finished after a reset and was discarded.
    Stale,
    /// The ticket does not match the in-flight load.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    items: Vec<Listing>,
    page: u32,
    in_flight: Option<LoadTicket>,
    generation: u64,
    next_seq: u64,
    config: FeedConfig,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(FeedConfig::default())
    }
}

impl FeedState {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            in_flight: None,
            generation: 0,
            next_seq: 0,
            config,
        }
    }

    pub fn items(&self) -> &[Listing] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> FeedConfig {
        self.config
    }

    pub fn find(&self, id: &str) -> Option<&Listing> {
        self.items.iter().find(|listing| listing.has_id(id))
    }

    /// Starts a first-page load unless one is already in flight.
    pub fn load_initial(&mut self) -> Option<LoadTicket> {
        self.begin(LoadKind::Initial, self.config.initial_page_size)
    }

    /// Starts a next-page load unless one is already in flight.
    pub fn load_more(&mut self) -> Option<LoadTicket> {
        self.begin(LoadKind::More, self.config.more_page_size)
    }

    /// Clears the items and rewinds to page 1. Leaves an in-flight load running.
    pub fn reset(&mut self) {
        self.items.clear();
        self.page = 1;
        self.generation += 1;
    }

    /// Applies the result of the in-flight load identified by `ticket`.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Listing>, LoadFailure>,
    ) -> LoadOutcome {
        if self.in_flight != Some(ticket) {
            feed_warn!(
                "Ignoring completion for {:?}; in flight: {:?}",
                ticket,
                self.in_flight
            );
            return LoadOutcome::Ignored;
        }
        self.in_flight = None;

        if ticket.generation != self.generation {
            feed_debug!(
                "Discarding {:?} load from generation {} (now {})",
                ticket.kind,
                ticket.generation,
                self.generation
            );
            return LoadOutcome::Stale;
        }

        let listings = match result {
            Ok(listings) => listings,
            Err(failure) => return LoadOutcome::Failed(failure),
        };

        match ticket.kind {
            LoadKind::Initial => {
                self.items = listings.clone();
                self.page = 1;
            }
            LoadKind::More => {
                self.items.extend(listings.iter().cloned());
                self.page += 1;
            }
        }

        LoadOutcome::Applied {
            mode: ticket.kind.render_mode(),
            listings,
        }
    }

    fn begin(&mut self, kind: LoadKind, count: usize) -> Option<LoadTicket> {
        if let Some(current) = self.in_flight {
            feed_debug!("{:?} load rejected; {:?} already in flight", kind, current.kind);
            return None;
        }
        self.next_seq += 1;
        let ticket = LoadTicket {
            seq: self.next_seq,
            generation: self.generation,
            kind,
            count,
        };
        self.in_flight = Some(ticket);
        Some(ticket)
    }
}
