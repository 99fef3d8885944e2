use crate::error::CliError;
use connectors::sql::{
    base::adapter::SqlAdapter,
    duckdb::{adapter::DuckDbAdapter, config::EngineConfig},
};
use tracing::{error, info};

/// Open the database exactly as `serve` would, run `SELECT 1` and close it.
pub async fn check_database(config: EngineConfig) -> Result<(), CliError> {
    let path = config.path.display().to_string();
    info!("Checking DuckDB database at '{path}'");

    let adapter = DuckDbAdapter::open(config).inspect_err(|e| {
        error!("Opening '{path}' failed: {e}");
    })?;

    if let Err(e) = adapter.ping().await {
        error!("Ping of '{path}' failed: {e}");
        return Err(e.into());
    }

    adapter.close()?;
    info!("DuckDB database at '{path}' is reachable");
    Ok(())
}
