#![allow(dead_code)]

use axum::Router;
use connectors::sql::duckdb::{adapter::DuckDbAdapter, config::EngineConfig};
use engine_core::{codec::CursorCodec, controller::PaginationController};
use server::{handlers::GatewayState, router::gateway_router};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub mod utils;

/// Base URI used in `nextUri` for router-level (in-process) tests.
pub const TEST_EXTERNAL_URI: &str = "http://gateway.test";

/// A throwaway DuckDB database file, seeded read-write and then served
/// read-only.
pub struct Fixture {
    _dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    pub fn new(ddl: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("fixture.duckdb");

        let conn = duckdb::Connection::open(&path).expect("open fixture database");
        conn.execute_batch(ddl).expect("seed fixture database");
        conn.close().map_err(|(_, e)| e).expect("close fixture database");

        Fixture { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn adapter(&self) -> DuckDbAdapter {
        DuckDbAdapter::open(EngineConfig::new(&self.path)).expect("open gateway adapter")
    }

    pub fn controller(&self, external_uri: &str, initial_limit: u64) -> PaginationController {
        PaginationController::new(
            Arc::new(self.adapter()),
            CursorCodec::new(external_uri).expect("external uri"),
            initial_limit,
        )
        .expect("initial limit")
    }

    /// In-process router; requests go through `tower::ServiceExt::oneshot`.
    pub fn router(&self, initial_limit: u64) -> Router {
        gateway_router(GatewayState::new(
            self.controller(TEST_EXTERNAL_URI, initial_limit),
        ))
    }
}

/// A gateway listening on an ephemeral local port.
pub struct RunningGateway {
    pub addr: SocketAddr,
    pub shutdown: CancellationToken,
    pub handle: JoinHandle<Result<(), server::error::ServerError>>,
}

impl RunningGateway {
    pub async fn start(fixture: &Fixture, initial_limit: u64) -> Self {
        let listener = server::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let router = gateway_router(GatewayState::new(
            fixture.controller(&format!("http://{addr}"), initial_limit),
        ));
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(server::serve(listener, router, shutdown.clone()));

        RunningGateway {
            addr,
            shutdown,
            handle,
        }
    }

    pub fn statement_url(&self) -> String {
        format!("http://{}/v1/statement", self.addr)
    }

    pub async fn stop(self) {
        self.shutdown.cancel();
        self.handle
            .await
            .expect("server task")
            .expect("server stopped cleanly");
    }
}
