use model::wire::error::ProtocolError;
use thiserror::Error;

/// Failures raised by the engine or the execution context around it.
///
/// None of these are the client's fault; they surface as server errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any DuckDB driver error not attributed to the statement.
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] ::duckdb::Error),

    /// The blocking task running the statement panicked or was cancelled.
    #[error("Execution task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The engine returned something the adapter cannot interpret.
    #[error("Unexpected engine response: {0}")]
    Unexpected(String),
}

/// Errors happening while opening, configuring or closing the engine.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to open database '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: ::duckdb::Error,
    },

    #[error("Failed to apply engine option: {0}")]
    Option(#[source] ::duckdb::Error),

    #[error("Failed to close database: {0}")]
    Close(#[source] ::duckdb::Error),

    #[error("Database is still in use by {0} other handle(s)")]
    InUse(usize),
}

/// Outcome of a failed page execution.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The engine rejected the statement itself (parse, binding, types).
    /// Retrying it unchanged will fail again.
    #[error("Statement rejected: {0}")]
    Statement(ProtocolError),

    /// Anything else: the system failed, not the query.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl ExecutionError {
    pub fn is_statement_error(&self) -> bool {
        matches!(self, ExecutionError::Statement(_))
    }
}
