//! Infinite-scroll trigger.

pub const DEFAULT_SCROLL_THRESHOLD: u32 = 200;

/// Scroll geometry in abstract units (pixels in a browser, rows in a terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: u32,
    pub client_height: u32,
    pub scroll_height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTrigger {
    threshold: u32,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD)
    }
}

impl ScrollTrigger {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// True when the bottom of the viewport is within the threshold of the content's end.
    pub fn is_near_bottom(&self, metrics: ScrollMetrics) -> bool {
        let viewport_bottom = metrics.scroll_top.saturating_add(metrics.client_height);
        viewport_bottom >= metrics.scroll_height.saturating_sub(self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(scroll_top: u32, client_height: u32, scroll_height: u32) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top,
            client_height,
            scroll_height,
        }
    }

    #[test]
    fn fires_inside_threshold() {
        let trigger = ScrollTrigger::default();
        assert!(trigger.is_near_bottom(metrics(1200, 600, 2000)));
        assert!(trigger.is_near_bottom(metrics(1400, 600, 2000)));
    }

    #[test]
    fn stays_quiet_above_threshold() {
        let trigger = ScrollTrigger::default();
        assert!(!trigger.is_near_bottom(metrics(1199, 600, 2000)));
        assert!(!trigger.is_near_bottom(metrics(0, 600, 2000)));
    }

    #[test]
    fn short_content_is_always_near_bottom() {
        let trigger = ScrollTrigger::new(200);
        assert!(trigger.is_near_bottom(metrics(0, 600, 150)));
    }
}
