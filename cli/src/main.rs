//! CLI entrypoint for Omni AI
//!
//! This is the main binary that wires together all layers using
//! dependency injection. Without a question it serves the HTTP API;
//! with one it performs a single run and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use omni_application::{AggregationEngine, NoProgress, ProgressNotifier};
use omni_domain::OutputFormat;
use omni_infrastructure::{ConfigLoader, HttpProviderAdapter, process_env};
use omni_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    info!("Starting Omni AI");

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?
    };

    if let Some(summary) = cli.summary {
        config.aggregation.summary = summary.as_str().to_string();
    }

    let resolved = config.resolve(&process_env)?;
    for issue in &resolved.warnings {
        warn!("{}", issue);
    }

    // === Dependency Injection ===
    let adapter = Arc::new(HttpProviderAdapter::new().context("failed to build HTTP client")?);
    let engine = AggregationEngine::new(adapter, resolved.providers)
        .with_summary_policy(resolved.summary_policy)
        .with_retry_policy(resolved.retry_policy);

    let Some(question) = cli.question else {
        let bind = cli.bind.unwrap_or(resolved.bind);
        omni_presentation::serve(engine, &bind, shutdown_signal())
            .await
            .with_context(|| format!("server failed on {}", bind))?;
        return Ok(());
    };

    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    if !config.output.color {
        ConsoleFormatter::set_color(false);
    }

    let progress: Box<dyn ProgressNotifier> = if cli.quiet || format == OutputFormat::Json {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let result = engine
        .run_with_progress(&question, engine.providers(), progress.as_ref())
        .await?;

    println!("{}", ConsoleFormatter::render(&result, format));

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
