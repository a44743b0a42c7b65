//! Scroll trigger policy for infinite lists.
//!
//! Scroll events are noisy, so the trigger is evaluated only after the
//! signal has been quiet for the debounce window. It fires when the distance
//! from the viewport bottom to the content bottom is within the threshold.

use std::time::Duration;

use crate::config::PagingConfig;

/// Geometry of the scroll container, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_height: f64,
    pub scroll_top: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn distance_to_bottom(&self) -> f64 {
        self.scroll_height - self.scroll_top - self.client_height
    }

    pub fn near_bottom(&self, threshold_px: f64) -> bool {
        self.scroll_height - self.scroll_top <= self.client_height + threshold_px
    }
}

/// Trailing-edge debounce over millisecond timestamps.
#[derive(Clone, Debug)]
pub struct Debounce {
    window_ms: u64,
    pending_since: Option<u64>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window_ms: u64::try_from(window.as_millis()).unwrap_or(u64::MAX),
            pending_since: None,
        }
    }

    /// Record a signal; each one restarts the window.
    pub fn signal(&mut self, now_ms: u64) {
        self.pending_since = Some(now_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// True once the window has elapsed since the last signal. Consumes it.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.pending_since {
            Some(since) if now_ms.saturating_sub(since) >= self.window_ms => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }
}

/// Debounced near-bottom detector.
#[derive(Clone, Debug)]
pub struct ScrollTrigger {
    threshold_px: f64,
    debounce: Debounce,
}

impl ScrollTrigger {
    pub fn new(threshold_px: u32, debounce: Duration) -> Self {
        Self {
            threshold_px: f64::from(threshold_px),
            debounce: Debounce::new(debounce),
        }
    }

    pub fn from_config(paging: &PagingConfig) -> Self {
        Self::new(paging.scroll_threshold_px, paging.debounce())
    }

    /// Note a scroll or resize event.
    pub fn signal(&mut self, now_ms: u64) {
        self.debounce.signal(now_ms);
    }

    /// Evaluate the trigger. `metrics` is read lazily, only once the debounce
    /// window has elapsed.
    pub fn poll(&mut self, now_ms: u64, metrics: impl FnOnce() -> Option<ScrollMetrics>) -> bool {
        if !self.debounce.fire(now_ms) {
            return false;
        }
        metrics().is_some_and(|m| m.near_bottom(self.threshold_px))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(scroll_top: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_height: 2000.0,
            scroll_top,
            client_height: 800.0,
        }
    }

    #[test]
    fn test_near_bottom_threshold() {
        // 2000 - 1000 = 1000 <= 800 + 200
        assert!(metrics(1000.0).near_bottom(200.0));
        assert!(!metrics(999.0).near_bottom(200.0));
        assert_eq!(metrics(1000.0).distance_to_bottom(), 200.0);
    }

    #[test]
    fn test_debounce_waits_for_quiet_period() {
        let mut debounce = Debounce::new(Duration::from_millis(200));
        assert!(!debounce.fire(1_000));

        debounce.signal(1_000);
        debounce.signal(1_150);
        assert!(!debounce.fire(1_300));
        assert!(debounce.fire(1_350));
        // Consumed.
        assert!(!debounce.fire(2_000));
    }

    #[test]
    fn test_trigger_reads_metrics_only_after_window() {
        let mut trigger = ScrollTrigger::from_config(&PagingConfig::default());
        trigger.signal(0);

        let mut reads = 0;
        assert!(!trigger.poll(100, || {
            reads += 1;
            Some(metrics(1100.0))
        }));
        assert_eq!(reads, 0);

        assert!(trigger.poll(200, || Some(metrics(1100.0))));
    }

    #[test]
    fn test_trigger_far_from_bottom() {
        let mut trigger = ScrollTrigger::new(200, Duration::from_millis(200));
        trigger.signal(0);
        assert!(!trigger.poll(500, || Some(metrics(0.0))));

        trigger.signal(600);
        assert!(!trigger.poll(900, || None));
    }

    #[test]
    fn test_taller_viewport_fires_without_scrolling() {
        let mut trigger = ScrollTrigger::new(200, Duration::from_millis(200));
        trigger.signal(0);
        assert!(!trigger.poll(300, || Some(metrics(0.0))));

        // Window enlarged: same scroll position, bottom now within reach.
        trigger.signal(1_000);
        let grown = ScrollMetrics {
            scroll_height: 2000.0,
            scroll_top: 0.0,
            client_height: 1900.0,
        };
        assert!(trigger.poll(1_200, || Some(grown)));
    }
}
