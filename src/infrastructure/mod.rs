//! Infrastructure layer: external inputs and DI container
//!
//! This layer implements the boundary traits and wires up services.

pub mod di;
pub mod traits;

pub use di::service_container::ServiceContainer;
pub use traits::{Clock, ManualClock, SystemClock};
