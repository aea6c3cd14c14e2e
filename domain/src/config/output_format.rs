//! Output format value object

use serde::{Deserialize, Serialize};

/// How a one-shot run is printed on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every provider's answer followed by the summary (default)
    #[default]
    Full,
    /// Only the summary
    Summary,
    /// The HTTP JSON payload
    Json,
}
