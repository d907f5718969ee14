use std::io;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use colorheart::cli::{App, Cli};
use colorheart::config::Config;
use colorheart::export::{Exporter, TerminalTitle};
use colorheart::llm::create_provider;
use colorheart::report::ReportService;

/// Install the tracing subscriber. With a log file, logs go through a
/// non-blocking writer and the returned guard must live until exit.
fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("invalid log file path: {}", path.display()))?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_args(&cli)?;
    let _log_guard = init_tracing(config.log_file.as_deref())?;

    let llm = create_provider(&config.llm)?;
    let service = ReportService::new(llm, config.timeout);
    let exporter = Exporter::new(config.export_dir.clone());

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        model = %config.llm.model,
        timeout_secs = config.timeout.as_secs(),
        export_dir = %config.export_dir.display(),
        "ColorHeart started"
    );

    let mut app = App::new(
        BufReader::new(tokio::io::stdin()),
        io::stdout(),
        TerminalTitle::new(io::stdout()),
        service,
        exporter,
    )
    .with_prefill(config.name.clone(), config.age_group);
    app.run().await?;

    Ok(())
}
