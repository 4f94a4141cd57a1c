//! Interactive tree session
//!
//! Glues the engine to the two UI collaborators: text input for inserts and
//! node clicks for deletes.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::application::click::ClickDetector;
use crate::application::render::Renderer;
use crate::application::ApplicationResult;
use crate::domain::{parse_key, AvlTree, Key, TreeSnapshot};
use crate::infrastructure::traits::Clock;

/// What a node click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First click registered, waiting for a second one
    Pending,
    /// Second click arrived in time and the node was deleted
    Deleted(Key),
    /// No such node on display
    Ignored,
}

/// One user's tree plus the click state that goes with it.
pub struct TreeSession {
    tree: AvlTree,
    clicks: ClickDetector,
    clock: Arc<dyn Clock>,
    renderer: Renderer,
}

impl std::fmt::Debug for TreeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeSession")
            .field("tree", &self.tree)
            .field("clicks", &self.clicks)
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}

impl TreeSession {
    /// Create an empty session.
    pub fn new(clock: Arc<dyn Clock>, threshold: Duration, renderer: Renderer) -> Self {
        Self {
            tree: AvlTree::new(),
            clicks: ClickDetector::new(threshold),
            clock,
            renderer,
        }
    }

    pub fn tree(&self) -> &AvlTree {
        &self.tree
    }

    pub fn clicks(&self) -> &ClickDetector {
        &self.clicks
    }

    /// Insert a key. Returns false for a duplicate.
    pub fn insert(&mut self, value: Key) -> bool {
        let before = self.tree.len();
        self.tree.insert(value);
        let changed = self.tree.len() != before;
        if changed {
            info!(value, root = ?self.tree.root_value(), "inserted");
        }
        changed
    }

    /// Delete a key. Returns false if it was absent.
    pub fn delete(&mut self, value: Key) -> bool {
        let before = self.tree.len();
        self.tree.delete(value);
        let changed = self.tree.len() != before;
        if changed {
            info!(value, root = ?self.tree.root_value(), "deleted");
        }
        changed
    }

    /// Parse raw input text and insert it.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_input(&mut self, input: &str) -> ApplicationResult<bool> {
        let value = parse_key(input)?;
        Ok(self.insert(value))
    }

    /// Parse raw input text and delete it.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_input(&mut self, input: &str) -> ApplicationResult<bool> {
        let value = parse_key(input)?;
        Ok(self.delete(value))
    }

    /// Route a click on the node showing `value`.
    #[instrument(level = "debug", skip(self))]
    pub fn click(&mut self, value: Key) -> ClickOutcome {
        if !self.tree.contains(value) {
            debug!("click on absent node");
            self.clicks.reset();
            return ClickOutcome::Ignored;
        }
        match self.clicks.click(value, self.clock.now()) {
            Some(target) => {
                self.delete(target);
                ClickOutcome::Deleted(target)
            }
            None => ClickOutcome::Pending,
        }
    }

    /// Parse raw input text and route it as a click.
    pub fn click_input(&mut self, input: &str) -> ApplicationResult<ClickOutcome> {
        let value = parse_key(input)?;
        Ok(self.click(value))
    }

    /// Expire a stale pending click. Returns true if one was dropped.
    pub fn tick(&mut self) -> bool {
        self.clicks.expire(self.clock.now())
    }

    pub fn snapshot(&self) -> TreeSnapshot {
        self.tree.snapshot()
    }

    pub fn render(&self) -> String {
        self.renderer.render_tree(&self.snapshot()).to_string()
    }

    pub fn render_json(&self) -> ApplicationResult<String> {
        self.renderer.render_json(&self.snapshot())
    }

    /// Start over with an empty tree.
    pub fn reset(&mut self) {
        self.tree.clear();
        self.clicks.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::domain::DomainError;
    use crate::infrastructure::traits::ManualClock;

    fn session() -> (TreeSession, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let session = TreeSession::new(
            clock.clone(),
            ClickDetector::DEFAULT_THRESHOLD,
            Renderer::default(),
        );
        (session, clock)
    }

    #[test]
    fn given_text_input_when_inserting_then_reports_change() {
        let (mut s, _) = session();
        assert!(s.insert_input("10").unwrap());
        assert!(!s.insert_input(" 10 ").unwrap());
        assert_eq!(s.tree().len(), 1);
    }

    #[test]
    fn given_garbage_input_when_inserting_then_invalid_key_and_tree_unchanged() {
        let (mut s, _) = session();
        s.insert(1);
        let err = s.insert_input("ten").unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::InvalidKey { .. })
        ));
        assert_eq!(s.tree().in_order(), vec![1]);
    }

    #[test]
    fn given_pending_click_when_tick_after_window_then_first_click_forgotten() {
        let (mut s, clock) = session();
        s.insert(4);
        assert_eq!(s.click(4), ClickOutcome::Pending);
        clock.advance_ms(400);
        assert!(s.tick());
        clock.advance_ms(10);
        assert_eq!(s.click(4), ClickOutcome::Pending);
        assert!(s.tree().contains(4));
    }

    #[test]
    fn given_reset_when_called_then_tree_and_clicks_cleared() {
        let (mut s, _) = session();
        s.insert(1);
        s.click(1);
        s.reset();
        assert!(s.tree().is_empty());
        assert_eq!(s.click(1), ClickOutcome::Ignored);
    }
}
