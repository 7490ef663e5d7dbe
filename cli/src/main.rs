//! CLI entrypoint for promptgrid
//!
//! Wires together all layers using dependency injection: registry and
//! file IO from infrastructure, the run-matrix use case from the
//! application layer, and progress/summary output from presentation.

use anyhow::{Context, Result};
use clap::Parser;
use promptgrid_application::{ResultSink, RunMatrixInput, RunMatrixUseCase};
use promptgrid_domain::ModelSpec;
use promptgrid_infrastructure::{
    BackendRegistry, ConfigLoader, CsvResultSink, load_system_prompts, load_user_messages,
};
use promptgrid_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting promptgrid");

    // Load config, then apply CLI path overrides
    let mut config = ConfigLoader::load(cli.config.as_ref()).context("failed to load config")?;
    if let Some(messages) = cli.messages {
        config.inputs.messages = messages;
    }
    if let Some(prompts) = cli.prompts {
        config.inputs.prompts = prompts;
    }
    if let Some(output) = cli.output {
        config.output.results = output;
    }

    // Every configured backend key must resolve before any work starts
    let registry = Arc::new(BackendRegistry::with_builtins());
    registry
        .ensure_known(&config.models)
        .context("backend resolution failed")?;

    let messages =
        load_user_messages(&config.inputs.messages).context("failed to load user messages")?;
    let prompts =
        load_system_prompts(&config.inputs.prompts).context("failed to load system prompts")?;
    if prompts.is_empty() {
        warn!(
            "No prompt files found in {}",
            config.inputs.prompts.display()
        );
    }

    let input = RunMatrixInput::new(config.models.clone(), prompts, messages);

    if !cli.quiet {
        println!("Models: {}", model_names(&config.models));
        println!("Total iterations to process: {}", input.total_units());
    }

    // Execute with or without progress reporting
    let use_case = RunMatrixUseCase::new(registry);
    let records = if cli.quiet {
        use_case.execute(input).await?
    } else if cli.plain {
        use_case.execute_with_progress(input, &SimpleProgress).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    };

    // Single end-of-run flush; a failure here is fatal
    let sink = CsvResultSink::new(&config.output.results);
    sink.write_all(&records)
        .context("failed to write results")?;

    if !cli.quiet {
        println!();
        print!("{}", ConsoleFormatter::format_summary(&records));
        println!("Results written to {}", config.output.results.display());
    }

    Ok(())
}

/// Comma-separated display names, in dispatch order.
fn model_names(specs: &[ModelSpec]) -> String {
    specs
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_names_in_dispatch_order() {
        let specs = vec![
            ModelSpec::new("openai", "gpt-4o"),
            ModelSpec::new("echo", "dry-run"),
        ];
        assert_eq!(model_names(&specs), "gpt-4o, dry-run");
        assert_eq!(model_names(&[]), "");
    }
}
