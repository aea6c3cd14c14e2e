//! Application layer for omni-ai
//!
//! This crate contains the aggregation use case and the port definitions
//! it depends on. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    progress::{NoProgress, ProgressNotifier},
    provider_adapter::ProviderAdapter,
};
pub use use_cases::run_aggregation::{AggregationEngine, RunAggregationError};
