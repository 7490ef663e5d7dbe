//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for promptgrid
#[derive(Parser, Debug)]
#[command(name = "promptgrid")]
#[command(author, version, about = "Batch-test LLM backends against a prompt/message matrix")]
#[command(long_about = r#"
promptgrid runs every configured model against every (system prompt, user
message) combination and writes one CSV row per result.

For each prompt file and each model, the full message list is dispatched as
one batch with at most the model's configured concurrency in flight.
Batches run strictly one after another; a failed invocation is recorded
inline as "ERROR: ..." and never aborts the run.

Configuration is read from ./promptgrid.toml, or from --config <path>.

Example:
  promptgrid
  promptgrid --config runs/smoke.toml --output /tmp/results.csv -v
"#)]
pub struct Cli {
    /// Path to configuration file (default: ./promptgrid.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the user message CSV from the config
    #[arg(long, value_name = "PATH")]
    pub messages: Option<PathBuf>,

    /// Override the prompt directory from the config
    #[arg(long, value_name = "PATH")]
    pub prompts: Option<PathBuf>,

    /// Override the results CSV path from the config
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Use plain-text progress instead of a progress bar
    #[arg(long)]
    pub plain: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["promptgrid"]);
        assert!(cli.config.is_none());
        assert!(cli.output.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "promptgrid",
            "--config",
            "runs/smoke.toml",
            "--output",
            "/tmp/results.csv",
            "-vv",
            "--quiet",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("runs/smoke.toml")));
        assert_eq!(cli.output, Some(PathBuf::from("/tmp/results.csv")));
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
    }
}
