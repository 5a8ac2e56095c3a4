//! CLI entrypoint for deep-research
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use research_application::{
    ConversationLogger, NoProgress, ProgressNotifier, RunResearchUseCase,
};
use research_domain::Query;
use research_infrastructure::{
    ConfigLoader, FileConfig, FirecrawlToolExecutor, FsReportStore, HuggingFaceGateway,
    JsonlConversationLogger,
};
use research_presentation::{
    Cli, ConsoleFormatter, ProgressReporter, SimpleProgress, prompt_query,
};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const TRANSCRIPT_FILE: &str = "transcript.jsonl";

/// Set up stderr logging plus an optional non-blocking log file.
///
/// `RUST_LOG` overrides the level picked by `-v`. The returned guard must
/// live until exit so buffered file lines are flushed.
fn init_tracing(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("--log-file {} has no file name", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            (
                Some(fmt::layer().with_writer(writer).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Load configuration files and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    if let Some(dir) = &cli.reports_dir {
        config.output.reports_dir = dir.clone();
    }
    if let Some(file) = &cli.output {
        config.output.result_file = file.clone();
    }

    Ok(config)
}

fn read_query(cli: &Cli) -> Result<Query> {
    let text = match &cli.query {
        Some(q) => q.clone(),
        None => match prompt_query().context("Failed to read the research query")? {
            Some(line) => line,
            None => bail!("No research query given"),
        },
    };
    Ok(Query::try_new(text)?)
}

fn transcript_path(cli: &Cli, config: &FileConfig, store: &FsReportStore) -> Option<PathBuf> {
    match &cli.transcript {
        Some(path) => Some(path.clone()),
        None if config.output.transcript => Some(store.run_dir().join(TRANSCRIPT_FILE)),
        None => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let file_config = load_config(&cli)?;
    let issues = file_config.validate();
    if !issues.is_empty() {
        eprintln!("{}", ConsoleFormatter::format_config_issues(&issues));
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Invalid configuration, aborting");
    }
    let research_config = file_config.to_research_config()?;

    let query = read_query(&cli)?;
    info!("Starting deep research");

    // === Dependency Injection ===
    let gateway = Arc::new(
        HuggingFaceGateway::from_config(&file_config.providers.huggingface)
            .context("Failed to set up the generation backend")?,
    );
    let tools = Arc::new(
        FirecrawlToolExecutor::from_config(&file_config.tools.firecrawl)
            .context("Failed to set up the web tools")?,
    );
    let store = FsReportStore::new(&file_config.output.reports_dir);

    let mut use_case = RunResearchUseCase::new(
        gateway,
        tools,
        Arc::new(store.clone()),
        research_config,
    );
    if let Some(path) = transcript_path(&cli, &file_config, &store) {
        let logger = JsonlConversationLogger::create(&path)
            .with_context(|| format!("Failed to create transcript {}", path.display()))?;
        info!("Writing transcript to {}", logger.path().display());
        use_case = use_case.with_conversation_logger(Arc::new(logger) as Arc<dyn ConversationLogger>);
    }

    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new().with_details(cli.verbose > 0))
    } else {
        Box::new(SimpleProgress)
    };

    if !cli.quiet {
        println!("Researching: {}", query);
    }

    let output = match use_case
        .execute_with_progress(query, progress.as_ref())
        .await
    {
        Ok(output) => output,
        Err(e) => {
            let stage = e
                .phase()
                .map(|p| p.display_name().to_string())
                .unwrap_or_else(|| "Saving reports".to_string());
            error!("{} failed: {}", stage, e);
            return Err(anyhow::Error::new(e).context(format!("{} failed", stage)));
        }
    };

    let result_file = &file_config.output.result_file;
    if let Some(parent) = result_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(result_file, output.outcome.report.content())
        .await
        .with_context(|| format!("Failed to write {}", result_file.display()))?;

    if !cli.quiet {
        println!("{}", ConsoleFormatter::format_summary(&output, result_file));
    }
    if cli.print_report {
        println!("{}", output.outcome.report.content());
    }
    println!("Final report written to {}", result_file.display());

    Ok(())
}
