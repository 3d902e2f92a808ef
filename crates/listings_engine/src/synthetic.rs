//! Randomised listing generator standing in for a real backend.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{Days, Local, NaiveDate, Utc};
use feed_logging::feed_debug;
use listings_core::{Listing, LoadKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use url::Url;

use crate::{ListingSource, PageRequest, SourceError};

pub const CATEGORIES: [&str; 6] = [
    "Electronics",
    "Furniture",
    "Cars",
    "Jobs",
    "Housing",
    "Services",
];

pub const LOCATIONS: [&str; 5] = [
    "Manhattan, NY",
    "Brooklyn, NY",
    "San Francisco, CA",
    "Chicago, IL",
    "Los Angeles, CA",
];

pub const IMAGE_URLS: [&str; 4] = [
    "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=400&h=300&fit=crop&crop=center",
    "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?w=400&h=300&fit=crop&crop=center",
    "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?w=400&h=300&fit=crop&crop=center",
    "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?w=400&h=300&fit=crop&crop=center",
];

/// Title and price are drawn together so a price always fits its item.
pub const LISTING_TEMPLATES: [(&str, &str); 12] = [
    ("Vintage Mountain Bike - Great Condition", "$250"),
    ("2BR Apartment in Prime Location", "$1,200"),
    ("MacBook Pro 13\" - Like New", "$2,200/mo"),
    ("Vintage Leather Sofa", "$800"),
    ("iPhone 12 Pro - Unlocked", "$1,500"),
    ("Dining Table Set", "$400"),
    ("2019 Honda Civic", "$18,500"),
    ("Graphic Design Services", "$50/hr"),
    ("Studio Apartment", "$1,800/mo"),
    ("Nike Air Max", "$120"),
    ("Kitchen Appliances", "$300"),
    ("Art Supplies", "$150"),
];

/// Listings are dated up to this many days before today.
const MAX_AGE_DAYS: u64 = 7;

/// Returns "today" for listing dates.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

#[derive(Debug, Clone)]
pub struct SyntheticSettings {
    pub initial_latency: Duration,
    pub more_latency: Duration,
    /// Fixed seed for reproducible pages; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SyntheticSettings {
    fn default() -> Self {
        Self {
            initial_latency: Duration::from_millis(500),
            more_latency: Duration::from_millis(800),
            seed: None,
        }
    }
}

pub struct SyntheticSource {
    settings: SyntheticSettings,
    images: Vec<Url>,
    rng: Mutex<StdRng>,
    sequence: AtomicU64,
    clock: Clock,
}

impl SyntheticSource {
    pub fn new(settings: SyntheticSettings) -> Result<Self, url::ParseError> {
        let images = IMAGE_URLS
            .iter()
            .map(|raw| Url::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            settings,
            images,
            rng: Mutex::new(rng),
            sequence: AtomicU64::new(0),
            clock: Arc::new(|| Local::now().date_naive()),
        })
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Generates `count` listings without simulated latency.
    pub fn generate_page(&self, count: usize) -> Vec<Listing> {
        let today = (self.clock)();
        let stamp = Utc::now().timestamp_millis();
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        (0..count)
            .map(|_| {
                let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
                let (title, price) = LISTING_TEMPLATES[rng.gen_range(0..LISTING_TEMPLATES.len())];
                let days_ago = rng.gen_range(0..MAX_AGE_DAYS);
                let date = today
                    .checked_sub_days(Days::new(days_ago))
                    .unwrap_or(today);
                Listing {
                    id: format!("listing-{stamp}-{sequence}"),
                    title: title.to_string(),
                    price: price.to_string(),
                    location: LOCATIONS[rng.gen_range(0..LOCATIONS.len())].to_string(),
                    category: CATEGORIES[rng.gen_range(0..CATEGORIES.len())].to_string(),
                    image: self.images[rng.gen_range(0..self.images.len())].clone(),
                    date: date.format("%-m/%-d/%Y").to_string(),
                }
            })
            .collect()
    }

    fn latency(&self, kind: LoadKind) -> Duration {
        match kind {
            LoadKind::Initial => self.settings.initial_latency,
            LoadKind::More => self.settings.more_latency,
        }
    }
}

#[async_trait::async_trait]
impl ListingSource for SyntheticSource {
    async fn produce_page(&self, request: &PageRequest) -> Result<Vec<Listing>, SourceError> {
        if let Some(query) = &request.query {
            // Synthetic pages are not filtered.
            feed_debug!(
                "Synthetic source ignoring query {:?} in {:?}",
                query.query,
                query.location_label()
            );
        }
        let latency = self.latency(request.kind);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        Ok(self.generate_page(request.count))
    }
}
