//! Domain layer for omni-ai
//!
//! This crate contains the core value objects of the aggregator.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Provider**: a third-party LLM endpoint described by a [`ProviderConfig`]
//! - **Run**: one question fanned out to every provider, producing one
//!   [`AggregationResult`]
//! - **Outcome**: a provider's answer text or its typed [`ErrorDetail`]

pub mod aggregation;
pub mod config;
pub mod core;
pub mod prompt;
pub mod providers;

// Re-export commonly used types
pub use aggregation::{
    retry::RetryPolicy,
    summary::{DEFAULT_SUMMARY_MAX_CHARS, SummaryPolicy, concat_summary},
    value_objects::{AggregationResult, ErrorDetail, ErrorKind, ProviderOutcome, Responses},
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, question::Question};
pub use prompt::PromptTemplate;
pub use providers::{Credential, DEFAULT_TIMEOUT, ProviderConfig, RequestShape};
