//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on boundary traits.

pub mod click;
pub mod error;
pub mod render;
pub mod services;

pub use click::{ClickDetector, ClickState};
pub use error::{ApplicationError, ApplicationResult};
pub use render::{Renderer, TreeConvert};
pub use services::{ClickOutcome, TreeSession};
