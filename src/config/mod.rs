//! Configuration for the remote search widget
//!
//! This module provides the immutable `SearchConfig` and its type-safe
//! builder. Optional strategies (labels, extraction, placement, callbacks) are
//! resolved once here so the search cycle never rebuilds them.

// Sub-modules
pub mod builder;
pub mod file;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{SearchConfigBuilder, WithEndpoint, WithInputSelector};
pub use file::SearchOptions;
pub use types::{ResultsCallback, SearchConfig, SelectCallback};
