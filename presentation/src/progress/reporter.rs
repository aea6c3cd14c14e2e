//! Progress reporting for aggregation runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use omni_application::ProgressNotifier;
use std::sync::Mutex;

/// Reports progress during a run with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn run_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_run_start(&self, total_providers: usize) {
        let bar = ProgressBar::new(total_providers as u64);
        bar.set_style(Self::run_style());
        bar.set_prefix("Asking providers");
        bar.set_message("Starting...");

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_provider_complete(&self, label: &str, success: bool) {
        self.with_bar(|bar| {
            let status = if success {
                format!("{} {}", "v".green(), label)
            } else {
                format!("{} {}", "x".red(), label)
            };
            bar.set_message(status);
            bar.inc(1);
        });
    }

    fn on_run_complete(&self) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(bar) = guard.take()
        {
            bar.finish_with_message(format!("{}", "done".green()));
        }
    }

    fn on_summary_start(&self, provider_label: &str) {
        eprintln!("{} Summarizing with {}", "->".cyan(), provider_label.bold());
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_run_start(&self, total_providers: usize) {
        eprintln!(
            "{} {} ({} providers)",
            "->".cyan(),
            "Asking providers".bold(),
            total_providers
        );
    }

    fn on_provider_complete(&self, label: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), label);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), label);
        }
    }

    fn on_run_complete(&self) {
        eprintln!();
    }
}
