use std::future::Future;
use std::sync::Arc;

use clap::Parser;
use polyglot_config::LogFormat;
use polyglot_io::FileStore;
use tokio::signal;

pub mod cli;
pub mod context;
pub mod controller;
pub mod events;
pub mod io;
pub mod profile;
pub mod state;


use self::cli::Cli;
use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = profile::load_config(&cli.profile)?;
    cli.apply(&mut config);

    init_tracing(config.log_format);
    tracing::info!(
        "profile {}, {:?} mode via {}",
        cli.profile,
        config.translator.mode,
        config.translator.endpoint()
    );

    let store = FileStore::open(&config.storage.path)?;
    tracing::info!("store at {}", store.path().display());

    let state = Arc::new(AppState::new(config, Box::new(store)));

    if let Some(command) = cli.command {
        return cli::run_command(&state, command).await;
    }

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    run(state, shutdown).await?;

    // The blocking stdin reader would otherwise keep the runtime alive
    std::process::exit(0);
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

pub async fn run(state: Arc<AppState>, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
    let ui_config = state.config.read().await.ui.clone();

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(ui_config);

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown requested");
                break;
            }
            joined = tasks.join_next() => match joined {
                None => break,
                Some(Ok(Ok(()))) => {
                    tracing::debug!("task finished");
                    controller.shutdown();
                }
                Some(Ok(Err(e))) => {
                    tracing::error!("task exited: {e}");
                    break;
                }
                Some(Err(e)) => {
                    tracing::error!("task panicked: {e}");
                    break;
                }
            }
        }
    }

    controller.shutdown();
    tasks.abort_all();
    Ok(())
}
