//! Run Aggregation use case
//!
//! Fans one question out to every configured provider concurrently, waits
//! for all of them to settle, and merges the outcomes into one
//! [`AggregationResult`].

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::provider_adapter::ProviderAdapter;
use omni_domain::{
    AggregationResult, ErrorDetail, PromptTemplate, ProviderConfig, ProviderOutcome, Question,
    Responses, RetryPolicy, SummaryPolicy, concat_summary,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that abort a run.
///
/// Provider failures never show up here; they become placeholder strings in
/// the result instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunAggregationError {
    #[error("{0}")]
    InvalidInput(String),
}

/// Use case for fanning a question out to every provider
pub struct AggregationEngine<A: ProviderAdapter + 'static> {
    adapter: Arc<A>,
    providers: Arc<[ProviderConfig]>,
    summary_policy: SummaryPolicy,
    retry_policy: RetryPolicy,
}

impl<A: ProviderAdapter + 'static> Clone for AggregationEngine<A> {
    fn clone(&self) -> Self {
        Self {
            adapter: Arc::clone(&self.adapter),
            providers: Arc::clone(&self.providers),
            summary_policy: self.summary_policy.clone(),
            retry_policy: self.retry_policy,
        }
    }
}

impl<A: ProviderAdapter + 'static> AggregationEngine<A> {
    pub fn new(adapter: Arc<A>, providers: impl Into<Arc<[ProviderConfig]>>) -> Self {
        Self {
            adapter,
            providers: providers.into(),
            summary_policy: SummaryPolicy::default(),
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn with_summary_policy(mut self, policy: SummaryPolicy) -> Self {
        self.summary_policy = policy;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// The configured providers, in dispatch order
    pub fn providers(&self) -> &[ProviderConfig] {
        &self.providers
    }

    pub fn summary_policy(&self) -> &SummaryPolicy {
        &self.summary_policy
    }

    /// Run against the engine's own providers with no progress reporting
    pub async fn run(&self, question: &str) -> Result<AggregationResult, RunAggregationError> {
        let providers = Arc::clone(&self.providers);
        self.run_with_progress(question, &providers, &NoProgress)
            .await
    }

    /// Run against an explicit provider list
    pub async fn run_with(
        &self,
        question: &str,
        configs: &[ProviderConfig],
    ) -> Result<AggregationResult, RunAggregationError> {
        self.run_with_progress(question, configs, &NoProgress).await
    }

    /// Run with progress callbacks
    pub async fn run_with_progress(
        &self,
        question: &str,
        configs: &[ProviderConfig],
        progress: &dyn ProgressNotifier,
    ) -> Result<AggregationResult, RunAggregationError> {
        let question = Question::try_new(question)
            .map_err(|e| RunAggregationError::InvalidInput(e.to_string()))?;

        if configs.is_empty() {
            warn!("Aggregation requested with no providers configured");
        }

        info!("Starting aggregation across {} providers", configs.len());
        let started = Instant::now();
        progress.on_run_start(configs.len());

        let outcomes = self.dispatch(&question, configs, progress).await;
        progress.on_run_complete();

        let mut result = AggregationResult::new(question.content(), outcomes, String::new());
        result.summary = self.summarize(&result.responses, progress).await;

        info!(
            "Aggregation finished in {}ms: {} succeeded, {} failed",
            started.elapsed().as_millis(),
            result.successful_outcomes().count(),
            result.failed_outcomes().count()
        );

        Ok(result)
    }

    /// Spawn one task per provider and collect every outcome into the slot
    /// matching its config position.
    async fn dispatch(
        &self,
        question: &Question,
        configs: &[ProviderConfig],
        progress: &dyn ProgressNotifier,
    ) -> Vec<ProviderOutcome> {
        let mut join_set = JoinSet::new();
        let mut task_slots = HashMap::new();

        for (index, config) in configs.iter().enumerate() {
            let adapter = Arc::clone(&self.adapter);
            let config = config.clone();
            let question = question.clone();
            let retry_policy = self.retry_policy;

            let handle = join_set.spawn(async move {
                let started = Instant::now();
                let result = Self::call_with_retry(&adapter, &question, &config, retry_policy).await;
                debug!(
                    "Provider {} settled after {}ms",
                    config.label,
                    started.elapsed().as_millis()
                );
                let outcome = ProviderOutcome {
                    label: config.label,
                    result,
                    elapsed: started.elapsed(),
                };
                (index, outcome)
            });
            task_slots.insert(handle.id(), index);
        }

        let mut slots: Vec<Option<ProviderOutcome>> = vec![None; configs.len()];

        while let Some(joined) = join_set.join_next().await {
            let (index, outcome) = match joined {
                Ok(settled) => settled,
                Err(e) => {
                    let Some(&index) = task_slots.get(&e.id()) else {
                        warn!("Task join error for unknown provider task: {}", e);
                        continue;
                    };
                    let label = configs[index].label.clone();
                    let error = ErrorDetail::transport(format!("provider task failed: {}", e));
                    (index, ProviderOutcome::failure(label, error))
                }
            };

            match &outcome.result {
                Ok(_) => info!("Provider {} responded successfully", outcome.label),
                Err(e) => warn!("Provider {} failed: {}", outcome.label, e),
            }
            progress.on_provider_complete(&outcome.label, outcome.is_success());
            slots[index] = Some(outcome);
        }

        slots
            .into_iter()
            .zip(configs)
            .map(|(slot, config)| {
                slot.unwrap_or_else(|| {
                    ProviderOutcome::failure(
                        config.label.clone(),
                        ErrorDetail::transport("provider task did not report an outcome"),
                    )
                })
            })
            .collect()
    }

    /// One provider call bounded by the provider's own deadline.
    async fn call_with_deadline(
        adapter: &A,
        question: &Question,
        config: &ProviderConfig,
    ) -> Result<String, ErrorDetail> {
        match tokio::time::timeout(config.timeout, adapter.call(question, config)).await {
            Ok(result) => result,
            Err(_) => Err(ErrorDetail::timeout(format!(
                "no response within {}ms",
                config.timeout.as_millis()
            ))),
        }
    }

    async fn call_with_retry(
        adapter: &A,
        question: &Question,
        config: &ProviderConfig,
        retry_policy: RetryPolicy,
    ) -> Result<String, ErrorDetail> {
        let mut attempt = 0;
        loop {
            match Self::call_with_deadline(adapter, question, config).await {
                Ok(text) => return Ok(text),
                Err(e) if retry_policy.should_retry(attempt, &e) => {
                    let delay = retry_policy.backoff(attempt);
                    debug!(
                        "Retrying {} in {}ms after attempt {} failed: {}",
                        config.label,
                        delay.as_millis(),
                        attempt + 1,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn summarize(&self, responses: &Responses, progress: &dyn ProgressNotifier) -> String {
        if responses.is_empty() {
            return String::new();
        }

        match &self.summary_policy {
            SummaryPolicy::Concat { max_chars } => concat_summary(responses, *max_chars),
            SummaryPolicy::ModelGenerated { provider } => {
                progress.on_summary_start(&provider.label);
                let prompt = match Question::try_new(PromptTemplate::summary_prompt(responses)) {
                    Ok(prompt) => prompt,
                    Err(e) => return e.to_string(),
                };

                match Self::call_with_retry(&self.adapter, &prompt, provider, self.retry_policy)
                    .await
                {
                    Ok(summary) => summary,
                    Err(e) => {
                        warn!("Summary provider {} failed: {}", provider.label, e);
                        e.to_string()
                    }
                }
            }
        }
    }
}
