use crate::error::ApiError;
use axum::{
    Json,
    body::Bytes,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use engine_core::{
    codec::CursorCodec,
    controller::{GatewayResponse, PaginationController},
    error::GatewayError,
};
use model::pagination::cursor::{PARAM_QUERY, Statement};
use std::sync::Arc;
use url::form_urlencoded;

/// Shared by every request. The controller holds the engine handle.
#[derive(Clone)]
pub struct GatewayState {
    pub controller: Arc<PaginationController>,
}

impl GatewayState {
    pub fn new(controller: PaginationController) -> Self {
        GatewayState {
            controller: Arc::new(controller),
        }
    }
}

/// `POST /v1/statement`: run the first page of a new statement.
///
/// Trino clients send the SQL as the request body; the `query` URL
/// parameter is accepted when the body is empty.
pub async fn submit_statement(
    State(state): State<GatewayState>,
    RawQuery(raw_query): RawQuery,
    body: Bytes,
) -> Result<Response, ApiError> {
    let statement = statement_from_request(raw_query.as_deref(), &body)?;
    let response = state.controller.submit(statement).await?;
    Ok(respond(response))
}

/// `GET /fetch` (and `GET /v1/statement`): run the page a continuation URI
/// points at.
pub async fn fetch_page(
    State(state): State<GatewayState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Response, ApiError> {
    let cursor = CursorCodec::decode_query(raw_query.as_deref().unwrap_or_default())
        .map_err(GatewayError::from)?;
    let response = state.controller.fetch(cursor).await?;
    Ok(respond(response))
}

fn statement_from_request(raw_query: Option<&str>, body: &[u8]) -> Result<Statement, ApiError> {
    let body = std::str::from_utf8(body).map_err(|_| ApiError::InvalidBody)?;
    if !body.trim().is_empty() {
        return Ok(Statement::new(body));
    }

    raw_query
        .and_then(|q| {
            form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == PARAM_QUERY)
                .map(|(_, value)| Statement::new(value))
        })
        .ok_or(ApiError::Gateway(GatewayError::MissingStatement))
}

fn respond(response: GatewayResponse) -> Response {
    let status = StatusCode::from_u16(response.http_status).unwrap_or(StatusCode::OK);
    (status, Json(response.body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_wins_over_query_parameter() {
        let statement =
            statement_from_request(Some("query=SELECT+2"), b"SELECT 1").unwrap();
        assert_eq!(statement.as_str(), "SELECT 1");
    }

    #[test]
    fn test_query_parameter_fallback() {
        let statement =
            statement_from_request(Some("user=x&query=SELECT+%27a%27"), b"  \n").unwrap();
        assert_eq!(statement.as_str(), "SELECT 'a'");
    }

    #[test]
    fn test_no_statement() {
        assert!(matches!(
            statement_from_request(None, b""),
            Err(ApiError::Gateway(GatewayError::MissingStatement))
        ));
        assert!(matches!(
            statement_from_request(None, &[0xff, 0xfe]),
            Err(ApiError::InvalidBody)
        ));
    }
}
