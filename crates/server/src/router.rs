use crate::{
    handlers::{GatewayState, fetch_page, submit_statement},
    middleware::{cors, log_requests},
};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};

pub const STATEMENT_PATH: &str = "/v1/statement";
pub const FETCH_PATH: &str = "/fetch";

pub fn gateway_router(state: GatewayState) -> Router {
    Router::new()
        .route(STATEMENT_PATH, post(submit_statement).get(fetch_page))
        .route(FETCH_PATH, get(fetch_page))
        .layer(from_fn(cors))
        .layer(from_fn(log_requests))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use connectors::{
        error::{DbError, ExecutionError},
        sql::base::adapter::{DatabaseKind, SqlAdapter},
    };
    use engine_core::{codec::CursorCodec, controller::PaginationController};
    use model::{
        core::value::Value,
        pagination::{cursor::Statement, page::RowSet, window::PageWindow},
        wire::{column::Column, error::ProtocolError, results::QueryResults},
    };
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tower::ServiceExt;

    /// `SELECT n` returns the numbers `0..25`, `boom` fails the engine and
    /// anything else is a syntax error.
    #[derive(Default)]
    struct FakeEngine {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SqlAdapter for FakeEngine {
        async fn fetch_page(
            &self,
            statement: &Statement,
            window: PageWindow,
        ) -> Result<RowSet, ExecutionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match statement.as_str() {
                "SELECT n" => {
                    let end = (window.offset() + window.limit()).min(25);
                    let rows = (window.offset().min(end)..end)
                        .map(|n| vec![Value::Int(n as i64)])
                        .collect();
                    Ok(RowSet::new(vec![Column::new("n", "INTEGER")], rows))
                }
                "boom" => Err(DbError::Unexpected("secret internals".into()).into()),
                other => Err(ExecutionError::Statement(ProtocolError::bad_request(
                    "SYNTAX_ERROR",
                    format!("Parser Error: near \"{other}\""),
                ))),
            }
        }

        async fn ping(&self) -> Result<(), DbError> {
            Ok(())
        }

        fn kind(&self) -> DatabaseKind {
            DatabaseKind::Other("fake".into())
        }
    }

    fn app() -> (Router, Arc<FakeEngine>) {
        let engine = Arc::new(FakeEngine::default());
        let controller = PaginationController::new(
            engine.clone(),
            CursorCodec::new("http://gateway:8080").unwrap(),
            10,
        )
        .unwrap();
        (gateway_router(GatewayState::new(controller)), engine)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    fn post_sql(sql: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(STATEMENT_PATH)
            .body(Body::from(sql.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_submit_then_follow_next_uri() {
        let (app, _) = app();

        let (status, body) = send(&app, post_sql("SELECT n")).await;
        assert_eq!(status, StatusCode::OK);
        let first: QueryResults = serde_json::from_slice(&body).unwrap();
        assert_eq!(first.row_count(), 10);
        let next = first.next_uri.expect("nextUri");
        assert_eq!(
            next,
            "http://gateway:8080/fetch?query=SELECT+n&limit=20&offset=10"
        );

        let path = next.strip_prefix("http://gateway:8080").unwrap();
        let (status, body) = send(&app, get(path)).await;
        assert_eq!(status, StatusCode::OK);
        let second: QueryResults = serde_json::from_slice(&body).unwrap();
        assert_eq!(second.row_count(), 15);
        assert!(second.next_uri.is_none());
    }

    #[tokio::test]
    async fn test_statement_alias_accepts_continuations() {
        let (app, _) = app();
        let (status, body) =
            send(&app, get("/v1/statement?query=SELECT+n&limit=20&offset=10")).await;
        assert_eq!(status, StatusCode::OK);
        let page: QueryResults = serde_json::from_slice(&body).unwrap();
        assert_eq!(page.row_count(), 15);
    }

    #[tokio::test]
    async fn test_submit_from_query_parameter() {
        let (app, _) = app();
        let request = Request::builder()
            .method("POST")
            .uri("/v1/statement?query=SELECT+n")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        let page: QueryResults = serde_json::from_slice(&body).unwrap();
        assert_eq!(page.row_count(), 10);
    }

    #[tokio::test]
    async fn test_statement_error_is_400_with_error_body() {
        let (app, _) = app();
        let (status, body) = send(&app, post_sql("SELEC 1")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["errorCode"], 400);
        assert!(json.get("columns").is_none());
        assert!(json.get("data").is_none());
        assert!(json.get("nextUri").is_none());
        assert_eq!(json["id"], "");
        assert_eq!(json["stats"]["state"], "FAILED");
    }

    #[tokio::test]
    async fn test_malformed_cursor_is_400_without_engine_call() {
        let (app, engine) = app();
        let (status, body) = send(&app, get("/fetch?query=SELECT+n&offset=10")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let message = json["error"]["message"].as_str().unwrap();
        assert!(message.contains("limit"), "{message}");
        assert_eq!(json["error"]["errorName"], "MALFORMED_CURSOR");
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_statement_is_400() {
        let (app, engine) = app();
        let (status, body) = send(&app, post_sql("")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["errorName"], "MISSING_STATEMENT");
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_engine_failure_is_opaque_500() {
        let (app, _) = app();
        let (status, body) = send(&app, post_sql("boom")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let text = String::from_utf8(body).unwrap();
        assert!(!text.contains("secret"), "{text}");
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let (app, _) = app();
        let request = Request::builder()
            .method("OPTIONS")
            .uri(STATEMENT_PATH)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
