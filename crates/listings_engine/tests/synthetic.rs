use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use listings_core::{LoadKind, SearchQuery};
use listings_engine::{
    ListingSource, PageRequest, SyntheticSettings, SyntheticSource, CATEGORIES, IMAGE_URLS,
    LISTING_TEMPLATES, LOCATIONS,
};
use pretty_assertions::assert_eq;

fn seeded(seed: u64) -> SyntheticSource {
    let settings = SyntheticSettings {
        seed: Some(seed),
        ..SyntheticSettings::default()
    };
    SyntheticSource::new(settings)
        .unwrap()
        .with_clock(Arc::new(|| NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()))
}

#[test]
fn generates_requested_count() {
    let source = seeded(1);
    assert_eq!(source.generate_page(12).len(), 12);
    assert_eq!(source.generate_page(6).len(), 6);
    assert!(source.generate_page(0).is_empty());
}

#[test]
fn ids_are_unique_across_pages() {
    let source = seeded(2);
    let mut seen = HashSet::new();
    for _ in 0..20 {
        for listing in source.generate_page(6) {
            assert!(listing.id.starts_with("listing-"));
            assert!(seen.insert(listing.id), "duplicate id");
        }
    }
    assert_eq!(seen.len(), 120);
}

#[test]
fn fields_come_from_fixed_catalog() {
    let source = seeded(3);
    for listing in source.generate_page(50) {
        let template = LISTING_TEMPLATES
            .iter()
            .find(|(title, _)| *title == listing.title)
            .expect("known title");
        assert_eq!(template.1, listing.price, "price stays paired with title");
        assert!(LOCATIONS.contains(&listing.location.as_str()));
        assert!(CATEGORIES.contains(&listing.category.as_str()));
        assert!(IMAGE_URLS.contains(&listing.image.as_str()));
    }
}

#[test]
fn dates_fall_within_last_week() {
    let source = seeded(4);
    let allowed: HashSet<String> = (4..=10).map(|day| format!("3/{day}/2026")).collect();
    for listing in source.generate_page(60) {
        assert!(allowed.contains(&listing.date), "unexpected date {}", listing.date);
    }
}

#[test]
fn same_seed_gives_same_content() {
    let strip = |source: &SyntheticSource| {
        source
            .generate_page(12)
            .into_iter()
            .map(|l| (l.title, l.location, l.category, l.image, l.date))
            .collect::<Vec<_>>()
    };
    assert_eq!(strip(&seeded(9)), strip(&seeded(9)));
}

#[tokio::test(start_paused = true)]
async fn produce_page_waits_for_simulated_latency() {
    let source = seeded(5);
    let request = PageRequest {
        kind: LoadKind::More,
        count: 6,
        query: Some(SearchQuery::new("bike", "")),
    };

    let started = tokio::time::Instant::now();
    let page = source.produce_page(&request).await.unwrap();

    assert_eq!(page.len(), 6);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(800), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(810), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn initial_pages_use_shorter_latency() {
    let source = seeded(6);
    let request = PageRequest {
        kind: LoadKind::Initial,
        count: 12,
        query: None,
    };

    let started = tokio::time::Instant::now();
    source.produce_page(&request).await.unwrap();

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(500), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(510), "elapsed {elapsed:?}");
}
