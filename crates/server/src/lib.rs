//! HTTP surface of the gateway: a Trino-style statement endpoint and the
//! continuation endpoint its `nextUri` values point at.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/v1/statement` | Submit SQL (body, or `query` parameter), first page |
//! | `GET` | `/fetch` | Continuation: `query`, `limit`, `offset` |
//! | `GET` | `/v1/statement` | Same as `/fetch` |

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;

use crate::error::ServerError;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn bind(addr: &str) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::bind(addr, e))
}

/// Serve `router` until `shutdown` is cancelled, then drain in-flight
/// requests and return.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
) -> Result<(), ServerError> {
    let addr = listener.local_addr().map_err(ServerError::LocalAddr)?;
    info!(%addr, "Gateway listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(ServerError::Serve)?;

    info!(%addr, "Gateway stopped");
    Ok(())
}
