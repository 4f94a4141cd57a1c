//! Domain layer: the AVL engine and its value types
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod avl;
pub mod error;
pub mod key;
pub mod snapshot;

pub use avl::{height_bound, AvlTree};
pub use error::{DomainError, DomainResult};
pub use key::{parse_key, Key};
pub use snapshot::{SnapshotNode, TreeSnapshot};
