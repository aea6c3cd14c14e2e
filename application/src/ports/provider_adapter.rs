//! Provider adapter port
//!
//! Defines how the application layer asks one provider one question.

use async_trait::async_trait;
use omni_domain::{ErrorDetail, ProviderConfig, Question};

/// Translates a `(question, provider config)` pair into one outbound call
/// and the provider's answer back into plain text.
///
/// Implementations (adapters) live in the infrastructure layer. They must
/// not retry; retry policy belongs to the engine.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Ask `config`'s provider `question`, returning the trimmed answer text.
    async fn call(
        &self,
        question: &Question,
        config: &ProviderConfig,
    ) -> Result<String, ErrorDetail>;
}
