//! clipsentry daemon.
//!
//! Wires the durable configuration, the pause marker, the module
//! registry, and the processing pipeline into the monitor runtime,
//! then runs the detector loop until Ctrl+C or a terminal detection
//! failure.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cs_app::{ProcessingPipeline, ProcessingReportLog, TogglePause};
use cs_core::module::ModuleRegistry;
use cs_core::ports::ChangeCounterPort;
use cs_infra::{FileSettingsRepository, PauseMarker};
use cs_platform::{MonitorError, MonitorRuntime, NativeChangeCounter, SystemClipboard};

mod builtin;

#[derive(Parser)]
#[command(name = "clipsentry", version, about = "Clipboard monitoring engine")]
struct Cli {
    /// Configuration directory. Defaults to the platform config dir.
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the monitoring engine (the default).
    Run,

    /// Toggle the pause marker and print the new state.
    ///
    /// A running daemon picks the change up on its next tick; no
    /// restart is involved.
    Pause,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let dir = config_dir(&cli)?;
    let marker = Arc::new(PauseMarker::new(dir.join("pause.marker")));

    if let Some(Command::Pause) = cli.command {
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let paused = TogglePause::new(marker).execute()?;
        println!(
            "processing is now {}",
            if paused { "paused" } else { "active" }
        );
        return Ok(ExitCode::SUCCESS);
    }

    let repo = Arc::new(FileSettingsRepository::new(dir.join("settings.toml")));
    repo.ensure_exists().await?;
    let settings = repo.load().await;

    let clipboard = Arc::new(SystemClipboard::new()?);

    let mut registry = ModuleRegistry::discover(&builtin::BuiltinModules);
    registry.apply_settings(&settings.modules);
    let registry = Arc::new(Mutex::new(registry));

    let reports = Arc::new(ProcessingReportLog::new(settings.history.max_items));
    let pipeline = Arc::new(ProcessingPipeline::new(
        clipboard.clone(),
        registry.clone(),
        reports,
        settings.cache.capacity,
        settings.cooldown_window(),
    ));

    let counter: Option<Arc<dyn ChangeCounterPort>> =
        NativeChangeCounter::try_new().map(|c| Arc::new(c) as Arc<dyn ChangeCounterPort>);

    let runtime = Arc::new(MonitorRuntime::new(
        clipboard,
        counter,
        marker,
        repo,
        registry,
        pipeline,
    ));

    info!("clipsentry started (config: {})", dir.display());

    let mut monitor = {
        let runtime = runtime.clone();
        tokio::spawn(async move { runtime.run().await })
    };

    let joined = tokio::select! {
        joined = &mut monitor => joined,
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for shutdown signal")?;
            info!("shutdown requested; stopping after the current tick");
            runtime.request_stop();
            monitor.await
        }
    };

    match joined.context("monitor task panicked")? {
        Ok(()) => {
            info!("clipsentry stopped");
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ MonitorError::StrategiesExhausted) => {
            error!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn config_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.config_dir {
        Some(dir) => Ok(dir.clone()),
        None => dirs::config_dir()
            .map(|base| base.join("clipsentry"))
            .context("no configuration directory available on this platform"),
    }
}
