// Service exports
pub mod cache;
pub mod catalog;
pub mod coordinator;
pub mod registry;

pub use cache::{CacheError, CacheStats, ImageCache, ImageKey};
pub use catalog::{Catalog, CatalogError};
pub use coordinator::{GroupCoordinator, GroupPoll};
pub use registry::{GenerateOutcome, GroupError, GroupRegistry, GroupResult, GroupSnapshot};
