use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Default)]
struct InnerMetrics {
    statements_submitted: AtomicU64,
    pages_served: AtomicU64,
    rows_served: AtomicU64,
    statement_errors: AtomicU64,
    engine_failures: AtomicU64,
}

/// Process-local request counters. Cloning shares the same counters.
#[derive(Debug, Clone)]
pub struct GatewayMetrics {
    inner: Arc<InnerMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub statements_submitted: u64,
    pub pages_served: u64,
    pub rows_served: u64,
    pub statement_errors: u64,
    pub engine_failures: u64,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        GatewayMetrics {
            inner: Arc::new(InnerMetrics::default()),
        }
    }

    pub fn increment_statements(&self) {
        self.inner
            .statements_submitted
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_page(&self, rows: u64) {
        self.inner.pages_served.fetch_add(1, Ordering::Relaxed);
        self.inner.rows_served.fetch_add(rows, Ordering::Relaxed);
    }

    pub fn increment_statement_errors(&self) {
        self.inner.statement_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_engine_failures(&self) {
        self.inner.engine_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            statements_submitted: self.inner.statements_submitted.load(Ordering::Relaxed),
            pages_served: self.inner.pages_served.load(Ordering::Relaxed),
            rows_served: self.inner.rows_served.load(Ordering::Relaxed),
            statement_errors: self.inner.statement_errors.load(Ordering::Relaxed),
            engine_failures: self.inner.engine_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for GatewayMetrics {
    fn default() -> Self {
        Self::new()
    }
}
