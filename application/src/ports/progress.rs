//! Progress notification port
//!
//! Defines the interface for reporting progress during an aggregation run.

/// Callback for progress updates during a run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, logs, ...).
pub trait ProgressNotifier: Send + Sync {
    /// Called once before any provider is dispatched
    fn on_run_start(&self, total_providers: usize);

    /// Called when one provider settles, in completion order
    fn on_provider_complete(&self, label: &str, success: bool);

    /// Called when every provider has settled
    fn on_run_complete(&self);

    /// Called when a model-generated summary is requested
    fn on_summary_start(&self, _provider_label: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_run_start(&self, _total_providers: usize) {}
    fn on_provider_complete(&self, _label: &str, _success: bool) {}
    fn on_run_complete(&self) {}
}
