//! Summary policies.
//!
//! The default policy is a deterministic string transform over the
//! responses map. The alternate policy asks one more provider to write the
//! summary; the engine owns that call, this module only builds its prompt.

use super::value_objects::Responses;
use crate::core::string::char_prefix;
use crate::providers::ProviderConfig;

/// Characters of each response kept by [`SummaryPolicy::Concat`].
pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 200;

/// Separator between per-provider summary entries.
pub const SUMMARY_SEPARATOR: &str = "\n\n";

/// How the `summary` field of a result is produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryPolicy {
    /// `"<label>: <prefix>..."` per provider, joined by a blank line
    Concat { max_chars: usize },
    /// One extra call to `provider` over all responses
    ModelGenerated { provider: ProviderConfig },
}

impl Default for SummaryPolicy {
    fn default() -> Self {
        SummaryPolicy::Concat {
            max_chars: DEFAULT_SUMMARY_MAX_CHARS,
        }
    }
}

impl SummaryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryPolicy::Concat { .. } => "concat",
            SummaryPolicy::ModelGenerated { .. } => "model",
        }
    }
}

/// Build the concatenation summary in the responses' iteration order.
///
/// The `...` suffix is appended to every entry, truncated or not.
pub fn concat_summary(responses: &Responses, max_chars: usize) -> String {
    responses
        .iter()
        .map(|(label, text)| format!("{}: {}...", label, char_prefix(text, max_chars)))
        .collect::<Vec<_>>()
        .join(SUMMARY_SEPARATOR)
}
