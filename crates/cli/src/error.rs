use connectors::error::{ConnectorError, DbError};
use model::pagination::{cursor::CursorError, window::WindowError};
use server::error::ServerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid external URI: {0}")]
    ExternalUri(#[from] CursorError),

    #[error("Invalid initial limit: {0}")]
    InitialLimit(#[from] WindowError),

    #[error("Failed to open the database: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Database check failed: {0}")]
    Db(#[from] DbError),

    #[error(transparent)]
    Server(#[from] ServerError),
}
