use crate::{codec::CursorCodec, error::GatewayError, metrics::GatewayMetrics};
use connectors::{error::ExecutionError, sql::base::adapter::SqlAdapter};
use model::{
    pagination::{
        cursor::{Cursor, Statement},
        page::ResultPage,
        window::{PageWindow, WindowError},
    },
    wire::{
        results::QueryResults,
        stats::{STATE_FAILED, STATE_FINISHED, STATE_RUNNING, StatementStats},
    },
};
use std::{sync::Arc, time::Instant};
use tracing::{debug, error, info};

/// Rows on the first page of a statement unless configured otherwise.
pub const DEFAULT_LIMIT: u64 = 10;

/// Each continuation asks for this many times the rows of the previous page.
pub const LIMIT_GROWTH_FACTOR: u64 = 2;

pub const HTTP_OK: u16 = 200;
pub const HTTP_BAD_REQUEST: u16 = 400;

/// Body and status of a handled request.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub http_status: u16,
    pub body: QueryResults,
}

/// Drives the page-by-page protocol for one statement at a time.
///
/// Holds no per-statement state: every call is fully described by its
/// cursor, so any instance can serve any request of any chain.
#[derive(Clone)]
pub struct PaginationController {
    engine: Arc<dyn SqlAdapter>,
    codec: CursorCodec,
    first_window: PageWindow,
    metrics: GatewayMetrics,
}

impl PaginationController {
    pub fn new(
        engine: Arc<dyn SqlAdapter>,
        codec: CursorCodec,
        initial_limit: u64,
    ) -> Result<Self, WindowError> {
        Ok(PaginationController {
            engine,
            codec,
            first_window: PageWindow::first(initial_limit)?,
            metrics: GatewayMetrics::new(),
        })
    }

    pub fn codec(&self) -> &CursorCodec {
        &self.codec
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.metrics
    }

    pub fn initial_limit(&self) -> u64 {
        self.first_window.limit()
    }

    /// Run the first page of a newly submitted statement.
    pub async fn submit(&self, statement: Statement) -> Result<GatewayResponse, GatewayError> {
        if statement.is_blank() {
            return Err(GatewayError::MissingStatement);
        }

        self.metrics.increment_statements();
        info!(sql = %statement, limit = self.first_window.limit(), "Statement submitted");
        self.run(Cursor::new(statement, self.first_window)).await
    }

    /// Run the page a continuation URI points at.
    pub async fn fetch_uri(&self, uri: &str) -> Result<GatewayResponse, GatewayError> {
        let cursor = self.codec.decode(uri)?;
        self.fetch(cursor).await
    }

    /// Run the page described by an already decoded cursor. Its window is
    /// used as is.
    pub async fn fetch(&self, cursor: Cursor) -> Result<GatewayResponse, GatewayError> {
        debug!(
            offset = cursor.window.offset(),
            limit = cursor.window.limit(),
            "Continuation fetch"
        );
        self.run(cursor).await
    }

    async fn run(&self, cursor: Cursor) -> Result<GatewayResponse, GatewayError> {
        let started = Instant::now();
        let result = self.engine.fetch_page(&cursor.statement, cursor.window).await;
        let elapsed = started.elapsed().as_millis() as u64;

        match result {
            Ok(rows) => {
                let page = ResultPage::from_rows(&cursor, rows, LIMIT_GROWTH_FACTOR);
                let row_count = page.rows.len() as u64;
                self.metrics.record_page(row_count);

                let stats = StatementStats {
                    processed_rows: row_count,
                    elapsed_time_millis: elapsed,
                    wall_time_millis: elapsed,
                    ..StatementStats::with_state(if page.has_more() {
                        STATE_RUNNING
                    } else {
                        STATE_FINISHED
                    })
                };
                let next_uri = page.next.as_ref().map(|next| self.codec.encode(next));

                debug!(
                    offset = cursor.window.offset(),
                    rows = row_count,
                    has_more = next_uri.is_some(),
                    elapsed_ms = elapsed,
                    "Page served"
                );
                Ok(GatewayResponse {
                    http_status: HTTP_OK,
                    body: QueryResults::page(page.columns, page.rows, next_uri, stats),
                })
            }
            Err(ExecutionError::Statement(err)) => {
                self.metrics.increment_statement_errors();
                info!(error = %err, "Statement rejected by engine");

                let stats = StatementStats {
                    elapsed_time_millis: elapsed,
                    wall_time_millis: elapsed,
                    ..StatementStats::with_state(STATE_FAILED)
                };
                Ok(GatewayResponse {
                    http_status: err.http_status,
                    body: QueryResults::failed(err.to_query_error(), stats),
                })
            }
            Err(ExecutionError::Db(err)) => {
                self.metrics.increment_engine_failures();
                error!(error = %err, "Engine failure");
                Err(GatewayError::Engine(err))
            }
        }
    }
}
