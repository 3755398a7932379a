use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use token_pipeline::{BuildConfig, BuildReport, Pipeline, CONFIG_FILE};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "design-tokens", author, version, about = "Build platform artifacts from design tokens", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, value_name = "FILE", default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Directory holding the token source file
    #[arg(long, value_name = "DIR")]
    source: Option<PathBuf>,

    /// Build directory
    #[arg(long, value_name = "DIR")]
    build_path: Option<PathBuf>,

    /// Only build this theme (repeatable)
    #[arg(long = "theme", value_name = "ID")]
    themes: Vec<String>,

    /// Build this platform instead of the configured ones (repeatable)
    #[arg(long = "platform", value_name = "ID")]
    platforms: Vec<String>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

fn init_logging(level: LogLevel, format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(level).into())
        .from_env_lossy();

    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => subscriber_builder.json().init(),
        LogFormat::Pretty => subscriber_builder.pretty().init(),
    }
}

impl Cli {
    /// Layer command line overrides on top of the file configuration
    fn apply(&self, config: &mut BuildConfig) {
        if let Some(dir) = &self.source {
            config.apply_source_prefix(dir);
        }
        if let Some(dir) = &self.build_path {
            config.build_path = dir.clone();
        }
        if !self.themes.is_empty() {
            config.only_themes = self.themes.clone();
        }
        if !self.platforms.is_empty() {
            config.platforms = self.platforms.clone();
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<BuildReport> {
    let mut config = BuildConfig::load(&cli.config)
        .await
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    cli.apply(&mut config);

    tracing::info!(
        "Building {} into {} for platforms: {}",
        config.input_file.display(),
        config.build_path.display(),
        config.platforms.join(", ")
    );

    let report = Pipeline::from_config(config)
        .run_from_config()
        .await
        .context("Build failed")?;

    Ok(report)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.log_format);

    match run(&cli).await {
        Ok(report) if report.is_success() => {
            tracing::info!("Wrote {} artifact(s)", report.artifacts.len());
            ExitCode::SUCCESS
        }
        Ok(report) => {
            for failure in &report.failures {
                tracing::error!(
                    theme_id = %failure.theme,
                    target_id = %failure.target,
                    "{}",
                    failure.error
                );
            }
            tracing::error!(
                "{} of {} pair(s) failed",
                report.failures.len(),
                report.failures.len() + report.artifacts.len()
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
