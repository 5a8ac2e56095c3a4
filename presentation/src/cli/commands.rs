//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for deep-research
#[derive(Parser, Debug)]
#[command(name = "deep-research")]
#[command(author, version, about = "Multi-agent deep research: plan, split, research in parallel, synthesize")]
#[command(long_about = r#"
deep-research answers a research question with a team of LLM agents.

The run has four phases:
1. Plan:       a planner model writes a research plan
2. Split:      a splitter model turns the plan into independent subtasks
3. Research:   one web-enabled agent per subtask, all running concurrently
4. Synthesize: a chief editor merges every finding into a final report

Reports are saved under <reports_dir>/<timestamp>/ and the final report is
also written to the result file (default: research_result.md).

Credentials are read from the environment: HF_TOKEN for generation and
FIRECRAWL_API_KEY for web search and scraping.

Configuration files are merged in this order (later wins):
1. ~/.config/deep-research/config.toml   Global config
2. ./research.toml                        Project-level config
3. --config <path>                        Explicit config file
4. DEEP_RESEARCH_<SECTION>__<KEY>         Environment variables

Example:
  deep-research "What is the history of the Suez Canal?"
  deep-research -v --transcript run.jsonl "Compare solid-state battery chemistries"
"#)]
pub struct Cli {
    /// The research question (prompted for interactively when omitted)
    pub query: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// File the final report is written to
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory for timestamped run reports
    #[arg(long, value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Write a JSONL transcript of every model and tool call
    #[arg(long, value_name = "FILE")]
    pub transcript: Option<PathBuf>,

    /// Also write tracing logs to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the final report to stdout after the run
    #[arg(long)]
    pub print_report: bool,
}

impl Cli {
    /// Default tracing filter for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::try_parse_from([
            "deep-research",
            "-vv",
            "--output",
            "suez.md",
            "--reports-dir",
            "out",
            "--transcript",
            "run.jsonl",
            "--print-report",
            "History of the Suez Canal",
        ])
        .unwrap();

        assert_eq!(cli.query.as_deref(), Some("History of the Suez Canal"));
        assert_eq!(cli.output, Some(PathBuf::from("suez.md")));
        assert_eq!(cli.reports_dir, Some(PathBuf::from("out")));
        assert_eq!(cli.transcript, Some(PathBuf::from("run.jsonl")));
        assert!(cli.print_report);
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn test_query_is_optional() {
        let cli = Cli::try_parse_from(["deep-research", "-q"]).unwrap();
        assert!(cli.query.is_none());
        assert!(cli.quiet);
        assert_eq!(cli.log_level(), "warn");
    }
}
