use listings_core::{ScrollMetrics, ScrollTrigger};

/// Each rendered card counts as this many scroll units.
pub const CARD_HEIGHT: u32 = 120;
pub const VIEWPORT_HEIGHT: u32 = 720;

/// Virtual scroll position over the rendered cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    scroll_top: u32,
    client_height: u32,
    trigger: ScrollTrigger,
}

impl Viewport {
    pub fn new(trigger: ScrollTrigger) -> Self {
        Self {
            scroll_top: 0,
            client_height: VIEWPORT_HEIGHT,
            trigger,
        }
    }

    pub fn metrics(&self, card_count: usize) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: self.scroll_top,
            client_height: self.client_height,
            scroll_height: content_height(card_count),
        }
    }

    /// Scrolls by `delta` units, clamped to the content, and reports whether the viewport
    /// ended up near the bottom.
    pub fn scroll_by(&mut self, delta: i64, card_count: usize) -> bool {
        let max_top = content_height(card_count).saturating_sub(self.client_height);
        let target = i64::from(self.scroll_top).saturating_add(delta);
        self.scroll_top = target.clamp(0, i64::from(max_top)) as u32;
        self.trigger.is_near_bottom(self.metrics(card_count))
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_top = 0;
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }
}

fn content_height(card_count: usize) -> u32 {
    u32::try_from(card_count)
        .unwrap_or(u32::MAX)
        .saturating_mul(CARD_HEIGHT)
}
