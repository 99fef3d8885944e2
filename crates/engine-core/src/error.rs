use connectors::error::DbError;
use model::{pagination::cursor::CursorError, wire::error::ProtocolError};
use thiserror::Error;

pub const MALFORMED_CURSOR: &str = "MALFORMED_CURSOR";
pub const MISSING_STATEMENT: &str = "MISSING_STATEMENT";

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Malformed cursor: {0}")]
    MalformedCursor(#[from] CursorError),

    #[error("No SQL statement was submitted")]
    MissingStatement,

    /// The engine failed for reasons unrelated to the statement.
    #[error(transparent)]
    Engine(#[from] DbError),
}

impl GatewayError {
    /// Client mistakes, answered with a 400 and an `error` body.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, GatewayError::Engine(_))
    }

    /// Wire error for client mistakes; `None` for engine failures, which
    /// are never described to the client.
    pub fn to_protocol_error(&self) -> Option<ProtocolError> {
        match self {
            GatewayError::MalformedCursor(_) => {
                Some(ProtocolError::bad_request(MALFORMED_CURSOR, self.to_string()))
            }
            GatewayError::MissingStatement => {
                Some(ProtocolError::bad_request(MISSING_STATEMENT, self.to_string()))
            }
            GatewayError::Engine(_) => None,
        }
    }
}
