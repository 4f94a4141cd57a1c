//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on boundary traits (Clock) but are themselves concrete
//! structs, not traits.

mod session;

pub use session::{ClickOutcome, TreeSession};
