use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use noble_version_tracker::check::{CheckError, Checker};
use noble_version_tracker::config::{self, TrackerConfig};
use noble_version_tracker::remote::GitHubClient;

/// Environment variable holding the log filter directives
const LOG_ENV: &str = "NOBLE_TRACKER_LOG";

#[derive(Parser)]
#[command(name = "noble-version-tracker")]
#[command(
    version,
    about = "Tracks the Noble upgrades table and reports changes between releases"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Documentation root that relative paths resolve against
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// JSON config file (defaults to the data directory's config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Upgrades table document
    #[arg(long, global = true)]
    docs: Option<PathBuf>,

    /// Tracker JSON file
    #[arg(long, global = true)]
    tracker: Option<PathBuf>,

    /// Repository in owner/name form
    #[arg(long, global = true)]
    repo: Option<String>,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Compare the upgrades table against the tracked version (default)
    Check,
    /// Mark the latest documented version as tracked
    Ack,
    /// List the tracked modules
    Modules,
}

/// Filter used when `LOG_ENV` is unset. Diagnostics already reach stderr
/// through the report, so stderr logging is off unless asked for.
fn default_directive(log_file: Option<&Path>) -> &'static str {
    match log_file {
        Some(_) => "info",
        None => "off",
    }
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(log_file)));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path {:?} has no file name", path))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {:?}", dir))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}

fn load_config(cli: &Cli) -> anyhow::Result<TrackerConfig> {
    let default_path = config::config_path();
    let mut config = match &cli.config {
        Some(path) => TrackerConfig::from_file(path)?,
        None if default_path.exists() => TrackerConfig::from_file(&default_path)?,
        None => TrackerConfig::default(),
    };

    if let Some(docs) = &cli.docs {
        config.docs_path = docs.clone();
    }
    if let Some(tracker) = &cli.tracker {
        config.tracker_path = tracker.clone();
    }
    if let Some(repo) = &cli.repo {
        config.repository = repo.clone();
    }

    Ok(config.rooted_at(&cli.root))
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_file.as_deref())?;

    let config = load_config(&cli)?;
    tracing::debug!("Using config {:?}", config);

    let host = GitHubClient::from_config(&config)?;
    let checker = Checker::new(&config, &host);

    let mut out = std::io::stdout();
    let mut err = std::io::stderr();

    let result = match cli.command.unwrap_or(Command::Check) {
        Command::Check => tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?
            .block_on(checker.check(&mut out, &mut err))
            .map(|outcome| tracing::info!("Check finished: {:?}", outcome)),
        Command::Ack => checker
            .acknowledge(&mut out, &mut err)
            .map(|version| tracing::info!("Acknowledged {}", version)),
        Command::Modules => checker.list_modules(&mut out),
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(CheckError::Output(e)) => Err(e).context("failed to write report"),
        Err(e) => {
            tracing::error!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_logging_is_off_by_default() {
        assert_eq!(default_directive(None), "off");
        assert_eq!(default_directive(Some(Path::new("tracker.log"))), "info");
    }

    #[test]
    fn cli_overrides_apply_under_root() {
        let cli = Cli::parse_from([
            "noble-version-tracker",
            "--root",
            "/docs",
            "--config",
            "/nonexistent/config.json",
        ]);
        assert!(load_config(&cli).is_err());

        let dir = tempfile::TempDir::new().unwrap();
        let config_file = dir.path().join("config.json");
        std::fs::write(&config_file, r#"{"repository": "noble-assets/noble"}"#).unwrap();
        let cli = Cli::parse_from([
            "noble-version-tracker",
            "--root",
            "/docs",
            "--config",
            config_file.to_str().unwrap(),
            "--tracker",
            "state.json",
            "--repo",
            "fork/noble",
            "ack",
        ]);
        assert!(matches!(cli.command, Some(Command::Ack)));
        let config = load_config(&cli).unwrap();
        assert_eq!(config.tracker_path, Path::new("/docs/state.json"));
        assert_eq!(config.repository, "fork/noble");
    }
}
