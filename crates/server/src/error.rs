use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use engine_core::error::GatewayError;
use model::wire::{
    error::ProtocolError,
    results::QueryResults,
    stats::{STATE_FAILED, StatementStats},
};
use std::io;
use thiserror::Error;
use tracing::error;

pub const INVALID_REQUEST: &str = "INVALID_REQUEST";

/// Handler failures, rendered to the client by [`IntoResponse`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Request body is not valid UTF-8")]
    InvalidBody,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let protocol = match &self {
            ApiError::Gateway(err) => err.to_protocol_error(),
            ApiError::InvalidBody => Some(ProtocolError::bad_request(
                INVALID_REQUEST,
                self.to_string(),
            )),
        };

        match protocol {
            Some(protocol) => {
                let status =
                    StatusCode::from_u16(protocol.http_status).unwrap_or(StatusCode::BAD_REQUEST);
                let body = QueryResults::failed(
                    protocol.to_query_error(),
                    StatementStats::with_state(STATE_FAILED),
                );
                (status, Json(body)).into_response()
            }
            None => {
                error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                )
                    .into_response()
            }
        }
    }
}

/// Failures of the listener itself.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read local address: {0}")]
    LocalAddr(#[source] io::Error),

    #[error("HTTP server failed: {0}")]
    Serve(#[source] io::Error),
}

impl ServerError {
    pub fn bind(addr: impl ToString, source: io::Error) -> Self {
        ServerError::Bind {
            addr: addr.to_string(),
            source,
        }
    }
}
