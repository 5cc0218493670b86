use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use parla_config::Config;
use tokio::signal;
use tokio::task::JoinSet;

mod controller;
mod events;
mod logging;
mod services;
mod state;
mod timers;
mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::services::Services;
use self::state::AppState;

#[derive(Parser, Debug)]
#[command(version, about = "Terminal translator with English dictionary lookups", long_about = None)]
struct Args {
    /// Source language code, `auto` to detect it
    #[arg(short, long)]
    source: Option<String>,

    /// Target language code
    #[arg(short, long)]
    target: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    logging::init_tracing(&args.log_level, args.log_json);

    let mut config = Config::new();
    if let Some(source) = args.source {
        config.session.default_source = source;
    }
    if let Some(target) = args.target {
        config.session.default_target = target;
    }
    tracing::debug!("Loaded config: {:?}", config);

    let services = Services::from_config(&config)?;
    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(services);

    let finished_on_its_own = tokio::select! {
        result = signal::ctrl_c() => {
            match result {
                Ok(()) => tracing::info!("Shutdown requested"),
                Err(e) => tracing::error!("Failed to listen for Ctrl+C: {e}"),
            }
            false
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task exited with error: {e}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
            true
        }
    };

    // The other loop stops by itself once it sees the session end
    if finished_on_its_own && !drain(&mut tasks).await {
        tracing::debug!("Remaining tasks still running, cancelling");
    }

    controller.shutdown();
    if !drain(&mut tasks).await {
        tracing::warn!("Tasks did not stop in time, aborting");
        tasks.abort_all();
    }

    Ok(())
}

/// Wait up to two seconds for every task to finish; false on timeout
async fn drain(tasks: &mut JoinSet<anyhow::Result<()>>) -> bool {
    let wait = async {
        while let Some(result) = tasks.join_next().await {
            if let Ok(Err(e)) = result {
                tracing::warn!("Task exited with error during shutdown: {e}");
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(2), wait).await.is_ok()
}
