//! Aggregation value objects - immutable result types for one run.
//!
//! - [`ErrorKind`] / [`ErrorDetail`] - why a single provider call failed
//! - [`ProviderOutcome`] - one provider's answer or error
//! - [`Responses`] - ordered label → text map
//! - [`AggregationResult`] - the payload handed back to the HTTP layer

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::time::Duration;

/// Failure category for a provider call (or for the run's input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The question was empty or whitespace-only
    InvalidInput,
    /// The per-call deadline elapsed
    Timeout,
    /// Network-level failure (DNS, connect, reset, ...)
    Transport,
    /// Provider answered with a non-2xx status
    HttpStatus(u16),
    /// 2xx body without the expected fields, or an `error` object
    MalformedResponse,
    /// 2xx body with no candidate content
    EmptyChoice,
}

impl ErrorKind {
    /// Whether a later attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ErrorKind::Timeout | ErrorKind::Transport => true,
            ErrorKind::HttpStatus(code) => *code == 429 || (500..600).contains(code),
            ErrorKind::InvalidInput | ErrorKind::MalformedResponse | ErrorKind::EmptyChoice => {
                false
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidInput => write!(f, "InvalidInput"),
            ErrorKind::Timeout => write!(f, "Timeout"),
            ErrorKind::Transport => write!(f, "Transport"),
            ErrorKind::HttpStatus(code) => write!(f, "HttpStatus({})", code),
            ErrorKind::MalformedResponse => write!(f, "MalformedResponse"),
            ErrorKind::EmptyChoice => write!(f, "EmptyChoice"),
        }
    }
}

/// A typed provider failure.
///
/// Its `Display` form is the placeholder stored in `responses` when the
/// provider fails: `Error [<kind>]: <message>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorDetail {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn http_status(code: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::HttpStatus(code), message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedResponse, message)
    }

    pub fn empty_choice(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyChoice, message)
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error [{}]: {}", self.kind, self.message)
    }
}

impl std::error::Error for ErrorDetail {}

/// Outcome of one provider call within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOutcome {
    pub label: String,
    pub result: Result<String, ErrorDetail>,
    /// Wall time from dispatch to settlement, retries included
    pub elapsed: Duration,
}

impl ProviderOutcome {
    pub fn success(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            result: Ok(text.into()),
            elapsed: Duration::ZERO,
        }
    }

    pub fn failure(label: impl Into<String>, error: ErrorDetail) -> Self {
        Self {
            label: label.into(),
            result: Err(error),
            elapsed: Duration::ZERO,
        }
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&ErrorDetail> {
        self.result.as_ref().err()
    }

    /// The answer text, or the error placeholder on failure.
    pub fn display_text(&self) -> String {
        match &self.result {
            Ok(text) => text.clone(),
            Err(e) => e.to_string(),
        }
    }
}

/// Label → text map that remembers insertion order.
///
/// Inserting an existing label replaces its value in place, so iteration
/// order stays the order in which labels were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Responses {
    entries: Vec<(String, String)>,
}

impl Responses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; returns the previous value for `label`.
    pub fn insert(&mut self, label: impl Into<String>, text: impl Into<String>) -> Option<String> {
        let label = label.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => Some(std::mem::replace(existing, text)),
            None => {
                self.entries.push((label, text));
                None
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, t)| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, t)| (l.as_str(), t.as_str()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }
}

impl FromIterator<(String, String)> for Responses {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut responses = Responses::new();
        for (label, text) in iter {
            responses.insert(label, text);
        }
        responses
    }
}

impl Serialize for Responses {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, text) in &self.entries {
            map.serialize_entry(label, text)?;
        }
        map.end()
    }
}

/// Complete result of one aggregation run
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AggregationResult {
    /// The original question
    pub question: String,
    /// One entry per distinct provider label, in config order
    pub responses: Responses,
    /// Derived summary (policy-dependent)
    pub summary: String,
    /// Per-provider outcomes in config order (not part of the wire payload)
    #[serde(skip)]
    pub outcomes: Vec<ProviderOutcome>,
}

impl AggregationResult {
    /// Build the result from outcomes in config order.
    pub fn new(
        question: impl Into<String>,
        outcomes: Vec<ProviderOutcome>,
        summary: impl Into<String>,
    ) -> Self {
        let responses = outcomes
            .iter()
            .map(|o| (o.label.clone(), o.display_text()))
            .collect();
        Self {
            question: question.into(),
            responses,
            summary: summary.into(),
            outcomes,
        }
    }

    pub fn successful_outcomes(&self) -> impl Iterator<Item = &ProviderOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed_outcomes(&self) -> impl Iterator<Item = &ProviderOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}
