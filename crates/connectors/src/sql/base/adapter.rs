use crate::error::{DbError, ExecutionError};
use async_trait::async_trait;
use model::pagination::{cursor::Statement, page::RowSet, window::PageWindow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseKind {
    DuckDb,
    Other(String),
}

/// Runs one statement for exactly one page window.
///
/// Implementations acquire an isolated execution context per call and
/// release it on every exit path, so a single adapter can serve any number
/// of concurrent requests.
#[async_trait]
pub trait SqlAdapter: Send + Sync {
    /// Return the columns of `statement` and at most `window.limit()` rows
    /// starting at `window.offset()`.
    ///
    /// Statement-level rejections come back as [`ExecutionError::Statement`];
    /// every other failure as [`ExecutionError::Db`].
    async fn fetch_page(
        &self,
        statement: &Statement,
        window: PageWindow,
    ) -> Result<RowSet, ExecutionError>;

    /// Cheap round trip through the engine.
    async fn ping(&self) -> Result<(), DbError>;

    fn kind(&self) -> DatabaseKind;
}
