//! TripSync - destination scoring and group trip coordination
//!
//! This library ranks catalog destinations against one traveler's preferences
//! or a whole group's, and coordinates shared group sessions: create, join,
//! poll and generate a single recommendation at most once per group.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Matcher, ScoringError, SimilarityIndex};
pub use models::{Destination, ScoredDestination, ScoringWeights, UserProfile};
pub use services::{Catalog, GroupCoordinator, GroupError, GroupRegistry, ImageCache};
