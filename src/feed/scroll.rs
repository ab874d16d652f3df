// Scroll-driven loading trigger.
// Near-bottom detection plus a debounce that caps checks per interval.

use std::time::{Duration, Instant};

/// Default gap between scroll checks.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Scroll geometry in whatever unit the view measures (rows, items).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First visible unit.
    pub offset: usize,
    /// Units visible at once.
    pub visible: usize,
    /// Total rendered units.
    pub content: usize,
}

/// True when the bottom of the viewport is within `threshold` of the content end.
pub fn is_near_bottom(viewport: Viewport, threshold: usize) -> bool {
    viewport.offset + viewport.visible + threshold >= viewport.content
}

/// Collapses bursts of scroll events into one check per interval.
#[derive(Debug, Clone)]
pub struct ScrollDebounce {
    interval: Duration,
    deadline: Option<Instant>,
}

impl ScrollDebounce {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Record a scroll event. Events while a check is pending are ignored.
    pub fn on_scroll(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.interval);
        }
    }

    /// Returns true once the pending check is due, then disarms.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for ScrollDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_bottom() {
        let at = |offset| Viewport {
            offset,
            visible: 1,
            content: 20,
        };
        assert!(!is_near_bottom(at(0), 3));
        assert!(!is_near_bottom(at(15), 3));
        assert!(is_near_bottom(at(16), 3));
        assert!(is_near_bottom(at(19), 3));
    }

    #[test]
    fn test_empty_content_is_near_bottom() {
        let viewport = Viewport {
            offset: 0,
            visible: 10,
            content: 0,
        };
        assert!(is_near_bottom(viewport, 0));
    }

    #[test]
    fn test_debounce_collapses_bursts() {
        let start = Instant::now();
        let mut debounce = ScrollDebounce::new(Duration::from_millis(100));

        assert!(!debounce.poll(start));
        debounce.on_scroll(start);
        debounce.on_scroll(start + Duration::from_millis(50));

        assert!(!debounce.poll(start + Duration::from_millis(99)));
        assert!(debounce.poll(start + Duration::from_millis(100)));
        // Only one check for the whole burst
        assert!(!debounce.poll(start + Duration::from_millis(150)));

        debounce.on_scroll(start + Duration::from_millis(160));
        assert!(debounce.poll(start + Duration::from_millis(260)));
    }
}
