use feed_logging::{feed_debug, feed_info, feed_warn};

use crate::effect::{Effect, RenderCommand, RenderMode, ShareOutcome, SharePayload};
use crate::view_model::{AppViewModel, ListingCard, RecentItemView};
use crate::{
    FeedConfig, FeedState, Listing, LoadFailure, LoadOutcome, LoadTicket, RecentlyViewed,
    SavedListings, RECENTLY_VIEWED_LIMIT,
};

pub const DEFAULT_SITE_ORIGIN: &str = "https://listings.example";

/// Builds the public link for a listing: `<origin>/listing/<id>`.
pub fn share_url(site_origin: &str, id: &str) -> String {
    format!("{}/listing/{}", site_origin.trim_end_matches('/'), id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreSettings {
    pub feed: FeedConfig,
    pub recently_viewed_limit: usize,
    pub site_origin: String,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            recently_viewed_limit: RECENTLY_VIEWED_LIMIT,
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
        }
    }
}

/// Search terms forwarded to the listing source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub query: String,
    pub location: String,
}

impl SearchQuery {
    pub fn new(query: &str, location: &str) -> Self {
        Self {
            query: query.trim().to_string(),
            location: location.trim().to_string(),
        }
    }

    pub fn location_label(&self) -> &str {
        if self.location.is_empty() {
            "All locations"
        } else {
            &self.location
        }
    }
}

/// Session state owned by the controller loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    feed: FeedState,
    recent: RecentlyViewed,
    saved: SavedListings,
    active_query: Option<SearchQuery>,
    reload_pending: bool,
    site_origin: String,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(CoreSettings::default())
    }

    pub fn with_settings(settings: CoreSettings) -> Self {
        Self {
            feed: FeedState::new(settings.feed),
            recent: RecentlyViewed::with_limit(settings.recently_viewed_limit),
            saved: SavedListings::new(),
            active_query: None,
            reload_pending: false,
            site_origin: settings.site_origin,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            cards: self.cards_for(self.feed.items()),
            page: self.feed.page(),
            loading: self.feed.loading(),
            recently_viewed: self
                .recent
                .all()
                .iter()
                .map(RecentItemView::from_listing)
                .collect(),
            saved_count: self.saved.len(),
            active_query: self.active_query.clone(),
        }
    }

    pub fn feed(&self) -> &FeedState {
        &self.feed
    }

    pub fn recently_viewed(&self) -> &RecentlyViewed {
        &self.recent
    }

    pub fn saved(&self) -> &SavedListings {
        &self.saved
    }

    pub fn active_query(&self) -> Option<&SearchQuery> {
        self.active_query.as_ref()
    }

    pub fn reload_pending(&self) -> bool {
        self.reload_pending
    }

    pub fn site_origin(&self) -> &str {
        &self.site_origin
    }

    /// Resolves an id against the feed first, then the recently viewed panel.
    pub fn find_listing(&self, id: &str) -> Option<&Listing> {
        self.feed.find(id).or_else(|| self.recent.find(id))
    }

    /// Returns whether the state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn start_initial_load(&mut self) -> Vec<Effect> {
        match self.feed.load_initial() {
            Some(ticket) => self.fetch_effects(ticket),
            None => Vec::new(),
        }
    }

    pub(crate) fn start_more_load(&mut self) -> Vec<Effect> {
        match self.feed.load_more() {
            Some(ticket) => self.fetch_effects(ticket),
            None => Vec::new(),
        }
    }

    /// Search and refresh: reset, then try an initial load. If a load is still in flight the
    /// reload is remembered and started once that load completes.
    pub(crate) fn restart_feed(&mut self, query: Option<SearchQuery>) -> Vec<Effect> {
        self.active_query = query;
        self.feed.reset();
        self.mark_dirty();

        let mut effects = vec![Effect::Render(RenderCommand::Listings {
            mode: RenderMode::Replace,
            cards: Vec::new(),
        })];
        match self.feed.load_initial() {
            Some(ticket) => {
                self.reload_pending = false;
                effects.extend(self.fetch_effects(ticket));
            }
            None => {
                feed_debug!("Reload deferred until the in-flight load completes");
                self.reload_pending = true;
            }
        }
        effects
    }

    pub(crate) fn apply_page(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Listing>, LoadFailure>,
    ) -> Vec<Effect> {
        let outcome = self.feed.complete_load(ticket, result);
        let mut effects = Vec::new();
        match outcome {
            LoadOutcome::Ignored => return effects,
            LoadOutcome::Applied { mode, listings } => {
                feed_info!(
                    "{:?} page applied: {} new, {} total, page {}",
                    ticket.kind,
                    listings.len(),
                    self.feed.items().len(),
                    self.feed.page()
                );
                effects.push(Effect::Render(RenderCommand::LoadingIndicator {
                    visible: false,
                }));
                effects.push(Effect::Render(RenderCommand::Listings {
                    mode,
                    cards: self.cards_for(&listings),
                }));
            }
            LoadOutcome::Failed(failure) => {
                feed_warn!("{:?} load failed: {:?}", ticket.kind, failure);
                effects.push(Effect::Render(RenderCommand::LoadingIndicator {
                    visible: false,
                }));
                effects.push(Effect::Notify(failure_notice(&failure).to_string()));
            }
            LoadOutcome::Stale => {
                effects.push(Effect::Render(RenderCommand::LoadingIndicator {
                    visible: false,
                }));
            }
        }
        self.mark_dirty();

        if self.reload_pending {
            if let Some(ticket) = self.feed.load_initial() {
                self.reload_pending = false;
                effects.extend(self.fetch_effects(ticket));
            }
        }
        effects
    }

    pub(crate) fn view_listing(&mut self, id: &str) -> Vec<Effect> {
        let Some(listing) = self.find_listing(id).cloned() else {
            feed_warn!("View requested for unknown listing {}", id);
            return Vec::new();
        };
        feed_info!("Viewing: {}", listing.title);
        let notice = format!("Viewing: {}", listing.title);
        self.recent.record_view(listing);
        self.mark_dirty();
        vec![
            Effect::Render(RenderCommand::RecentlyViewed {
                entries: self.recent.all().to_vec(),
            }),
            Effect::Notify(notice),
        ]
    }

    pub(crate) fn toggle_save(&mut self, id: &str) -> Vec<Effect> {
        if self.find_listing(id).is_none() {
            feed_warn!("Save requested for unknown listing {}", id);
            return Vec::new();
        }
        let saved = self.saved.toggle(id);
        self.mark_dirty();
        let notice = if saved {
            "Added to saved"
        } else {
            "Removed from saved"
        };
        vec![
            Effect::Render(RenderCommand::SavedMarker {
                id: id.to_string(),
                saved,
            }),
            Effect::Notify(notice.to_string()),
        ]
    }

    pub(crate) fn share(&self, id: &str) -> Vec<Effect> {
        match self.find_listing(id) {
            Some(listing) => vec![Effect::Share(SharePayload::for_listing(
                listing,
                &self.site_origin,
            ))],
            None => {
                feed_warn!("Share requested for unknown listing {}", id);
                Vec::new()
            }
        }
    }

    pub(crate) fn share_finished(&self, outcome: ShareOutcome) -> Vec<Effect> {
        match outcome {
            ShareOutcome::Shared => Vec::new(),
            ShareOutcome::CopiedToClipboard => {
                vec![Effect::Notify("Link copied to clipboard".to_string())]
            }
            ShareOutcome::Unavailable { url } => vec![Effect::Notify(format!("Share link: {url}"))],
        }
    }

    fn fetch_effects(&mut self, ticket: LoadTicket) -> Vec<Effect> {
        self.mark_dirty();
        vec![
            Effect::Render(RenderCommand::LoadingIndicator { visible: true }),
            Effect::FetchPage {
                ticket,
                query: self.active_query.clone(),
            },
        ]
    }

    fn cards_for(&self, listings: &[Listing]) -> Vec<ListingCard> {
        listings
            .iter()
            .map(|listing| ListingCard {
                listing: listing.clone(),
                saved: self.saved.is_saved(&listing.id),
            })
            .collect()
    }
}

fn failure_notice(failure: &LoadFailure) -> &'static str {
    match failure {
        LoadFailure::SourceUnavailable => "Could not load listings",
        LoadFailure::TimedOut => "Loading listings timed out",
    }
}
