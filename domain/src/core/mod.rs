//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`] - a validated question to fan out to providers
//! - [`error::DomainError`] - domain-level errors
//! - [`string`] - character-safe truncation helpers

pub mod error;
pub mod question;
pub mod string;
