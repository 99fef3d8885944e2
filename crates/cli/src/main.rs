use crate::{
    commands::{Commands, ServeArgs},
    env::EnvManager,
    error::CliError,
    settings::GatewaySettings,
    shutdown::ShutdownCoordinator,
};
use clap::Parser;
use connectors::sql::duckdb::adapter::DuckDbAdapter;
use engine_core::{codec::CursorCodec, controller::PaginationController};
use server::{handlers::GatewayState, router::gateway_router};
use std::{path::Path, sync::Arc};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod conn;
mod env;
mod error;
mod settings;
mod shutdown;

#[derive(Parser)]
#[command(
    name = "duckgate",
    version,
    about = "Trino-compatible SQL gateway over DuckDB"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve(args).await?,
        Commands::Check { engine, env_file } => {
            let env = load_env(env_file.as_deref())?;
            conn::check_database(settings::engine_config(engine, &env)?).await?;
        }
    }

    Ok(())
}

fn load_env(env_file: Option<&Path>) -> Result<EnvManager, CliError> {
    let mut env = EnvManager::from_process();
    if let Some(path) = env_file {
        env.load_from_file(path)?;
    }
    Ok(env)
}

async fn serve(args: ServeArgs) -> Result<(), CliError> {
    let env = load_env(args.env_file.as_deref())?;
    let settings = GatewaySettings::resolve(args, &env)?;

    let adapter = DuckDbAdapter::open(settings.engine)?;
    let codec = CursorCodec::new(&settings.external_uri)?;
    info!(
        external_uri = %codec.fetch_url(),
        initial_limit = settings.initial_limit,
        "Gateway configured"
    );

    let controller =
        PaginationController::new(Arc::new(adapter.clone()), codec, settings.initial_limit)?;
    let metrics = controller.metrics().clone();
    let router = gateway_router(GatewayState::new(controller));

    let shutdown = ShutdownCoordinator::new(CancellationToken::new());
    shutdown.register_handlers();

    let listener = server::bind(&settings.bind).await?;
    server::serve(listener, router, shutdown.cancel_token()).await?;

    let snapshot = metrics.snapshot();
    info!(
        statements = snapshot.statements_submitted,
        pages = snapshot.pages_served,
        rows = snapshot.rows_served,
        statement_errors = snapshot.statement_errors,
        engine_failures = snapshot.engine_failures,
        graceful = shutdown.is_shutdown_requested(),
        "Gateway shut down"
    );

    // Connection tasks may still hold the engine handle; DuckDB then closes
    // when the last one drops.
    if let Err(e) = adapter.close() {
        warn!(error = %e, "Database not closed explicitly");
    }
    Ok(())
}
