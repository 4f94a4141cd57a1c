//! AVL tree teaching tool.
//!
//! The [`domain`] layer holds the engine: an [`AvlTree`] over `i64` keys that
//! rebalances on every insert and delete and hands out read-only
//! [`TreeSnapshot`]s for display. The [`application`] layer adds what a
//! visualizer needs around it (text input parsing, double-click-to-delete,
//! rendering) and [`cli`] exposes all of it from the terminal.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{ClickDetector, ClickOutcome, Renderer, TreeSession};
pub use domain::{parse_key, AvlTree, DomainError, Key, SnapshotNode, TreeSnapshot};
