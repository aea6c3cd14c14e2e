//! Prompt domain
//!
//! Fixed prompt text sent to providers.

mod template;

pub use template::PromptTemplate;
