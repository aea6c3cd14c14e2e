//! Prompt templates for aggregation runs

use crate::aggregation::value_objects::Responses;

/// Templates for the fixed prompts the aggregator sends
pub struct PromptTemplate;

impl PromptTemplate {
    /// System message for chat-completions style providers
    pub fn concise_system() -> &'static str {
        "Be concise and helpful."
    }

    /// User prompt for the model-generated summary policy
    ///
    /// One `<label>: <text>` block per response, in iteration order.
    pub fn summary_prompt(responses: &Responses) -> String {
        let mut prompt = String::from("Summarize in 1 paragraph:");
        for (label, text) in responses.iter() {
            prompt.push_str(&format!("\n\n{}: {}", label, text));
        }
        prompt
    }
}
