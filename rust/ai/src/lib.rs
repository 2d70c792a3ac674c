//! # adaptive-ai: Learning Opponents
//!
//! Automated seat controllers for the `adaptive-engine` table.
//!
//! ## Core Components
//!
//! - [`policy::AdaptivePolicy`] - tiered decision policy that adjusts its
//!   weights after every hand
//! - [`weights::LearnedWeights`] - the six learned preflop factors
//! - [`store`] - where the weights live between sessions
//! - [`features`] / [`strength`] - preflop features and post-flop hand reads
//! - [`create_ai`] - factory by type name
//!
//! ## Quick Start
//!
//! ```rust
//! use adaptive_ai::create_ai;
//! use adaptive_ai::store::MemoryStore;
//!
//! let ai = create_ai("adaptive", "Robot 1", Box::new(MemoryStore::new())).unwrap();
//! assert_eq!(ai.kind(), "adaptive");
//! ```

use adaptive_engine::seat::Seat;

pub mod errors;
pub mod features;
pub mod policy;
pub mod store;
pub mod strength;
pub mod weights;

pub use errors::AiError;
pub use policy::AdaptivePolicy;
pub use store::{FileStore, MemoryStore, ParameterStore};
pub use weights::LearnedWeights;

/// AI types [`create_ai`] understands.
pub const AI_KINDS: &[&str] = &["adaptive"];

/// Builds an automated seat by type name.
///
/// # Errors
///
/// [`AiError::UnknownKind`] for a name not in [`AI_KINDS`].
///
/// ```rust
/// use adaptive_ai::{create_ai, AiError};
/// use adaptive_ai::store::MemoryStore;
///
/// let result = create_ai("oracle", "x", Box::new(MemoryStore::new()));
/// assert!(matches!(result, Err(AiError::UnknownKind(_))));
/// ```
pub fn create_ai(kind: &str, name: &str, store: Box<dyn ParameterStore>) -> Result<Box<dyn Seat>, AiError> {
    match kind {
        "adaptive" => Ok(Box::new(AdaptivePolicy::new(name, store))),
        other => Err(AiError::UnknownKind(other.to_string())),
    }
}
