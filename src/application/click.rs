//! Double-click detection.
//!
//! Two clicks on the same node inside the threshold collapse into a single
//! delete intent. Everything about timing lives here; the tree never sees it.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::domain::Key;

/// Detector state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickState {
    Idle,
    /// First click seen on `value` at `at`
    Pending { value: Key, at: Instant },
}

/// Turns a stream of node clicks into delete intents.
#[derive(Debug, Clone)]
pub struct ClickDetector {
    threshold: Duration,
    state: ClickState,
}

impl Default for ClickDetector {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl ClickDetector {
    /// Conventional double-click window.
    pub const DEFAULT_THRESHOLD: Duration = Duration::from_millis(300);

    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            state: ClickState::Idle,
        }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn state(&self) -> ClickState {
        self.state
    }

    /// Register a click on `value` at `at`.
    ///
    /// Returns `Some(value)` when this click completes a double click.
    /// A click on a different node, or one arriving too late, starts a new
    /// pending click instead.
    pub fn click(&mut self, value: Key, at: Instant) -> Option<Key> {
        if let ClickState::Pending { value: first, at: first_at } = self.state {
            let gap = at.saturating_duration_since(first_at);
            if first == value && gap < self.threshold {
                trace!(value, ?gap, "double click");
                self.state = ClickState::Idle;
                return Some(value);
            }
        }
        self.state = ClickState::Pending { value, at };
        None
    }

    /// Drop a pending click whose window has closed. Returns true if one was dropped.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.state {
            ClickState::Pending { at, .. }
                if now.saturating_duration_since(at) >= self.threshold =>
            {
                self.state = ClickState::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.state = ClickState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn given_two_quick_clicks_on_same_node_when_clicking_then_emits_intent() {
        let t0 = Instant::now();
        let mut detector = ClickDetector::default();
        assert_eq!(detector.click(5, t0), None);
        assert_eq!(detector.click(5, t0 + ms(120)), Some(5));
        assert_eq!(detector.state(), ClickState::Idle);
    }

    #[test]
    fn given_slow_second_click_when_clicking_then_restarts_pending() {
        let t0 = Instant::now();
        let mut detector = ClickDetector::default();
        detector.click(5, t0);
        assert_eq!(detector.click(5, t0 + ms(300)), None);
        assert_eq!(
            detector.state(),
            ClickState::Pending {
                value: 5,
                at: t0 + ms(300)
            }
        );
        // the late click itself opens a new window
        assert_eq!(detector.click(5, t0 + ms(450)), Some(5));
    }

    #[test]
    fn given_clicks_on_different_nodes_when_clicking_then_no_intent() {
        let t0 = Instant::now();
        let mut detector = ClickDetector::default();
        detector.click(5, t0);
        assert_eq!(detector.click(7, t0 + ms(50)), None);
        assert_eq!(detector.click(7, t0 + ms(100)), Some(7));
    }

    #[test]
    fn given_triple_click_when_clicking_then_only_one_intent() {
        let t0 = Instant::now();
        let mut detector = ClickDetector::default();
        detector.click(1, t0);
        assert_eq!(detector.click(1, t0 + ms(50)), Some(1));
        assert_eq!(detector.click(1, t0 + ms(100)), None);
    }

    #[test]
    fn given_pending_click_when_window_closes_then_expires_to_idle() {
        let t0 = Instant::now();
        let mut detector = ClickDetector::new(ms(200));
        detector.click(3, t0);
        assert!(!detector.expire(t0 + ms(199)));
        assert!(detector.expire(t0 + ms(200)));
        assert_eq!(detector.state(), ClickState::Idle);
        assert!(!detector.expire(t0 + ms(500)));
    }
}
