use crate::{
    error::{ConnectorError, DbError, ExecutionError},
    sql::{
        base::{
            adapter::{DatabaseKind, SqlAdapter},
            compat,
            query::{describe, windowed_select},
        },
        duckdb::{
            classify::classify_duckdb_error,
            config::{EngineConfig, ValidatedEngineConfig},
            value::to_value,
        },
    },
};
use ::duckdb::Connection;
use async_trait::async_trait;
use model::{
    pagination::{cursor::Statement, page::RowSet, window::PageWindow},
    wire::column::Column,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

/// Executes statements against one embedded DuckDB database.
///
/// The root connection is only touched to derive a fresh session per call;
/// sessions share the database but not transaction or temp state, and run on
/// the blocking pool.
#[derive(Clone)]
pub struct DuckDbAdapter {
    root: Arc<Mutex<Connection>>,
    config: ValidatedEngineConfig,
}

impl DuckDbAdapter {
    pub fn open(config: EngineConfig) -> Result<Self, ConnectorError> {
        let config = config.validate()?;
        let conn = Connection::open_with_flags(config.path(), config.to_duckdb()?).map_err(
            |source| ConnectorError::Open {
                path: config.path().display().to_string(),
                source,
            },
        )?;

        info!(path = %config.path().display(), "DuckDB database opened");
        Ok(DuckDbAdapter {
            root: Arc::new(Mutex::new(conn)),
            config,
        })
    }

    pub fn config(&self) -> &ValidatedEngineConfig {
        &self.config
    }

    /// Close the database. Fails with [`ConnectorError::InUse`] while clones
    /// of this adapter are still alive.
    pub fn close(self) -> Result<(), ConnectorError> {
        let root = Arc::try_unwrap(self.root)
            .map_err(|root| ConnectorError::InUse(Arc::strong_count(&root) - 1))?;

        root.into_inner()
            .close()
            .map_err(|(_, err)| ConnectorError::Close(err))?;
        info!(path = %self.config.path().display(), "DuckDB database closed");
        Ok(())
    }

    fn session(root: &Mutex<Connection>) -> Result<Connection, DbError> {
        let conn = root.lock();
        Ok(conn.try_clone()?)
    }
}

#[async_trait]
impl SqlAdapter for DuckDbAdapter {
    async fn fetch_page(
        &self,
        statement: &Statement,
        window: PageWindow,
    ) -> Result<RowSet, ExecutionError> {
        let sql = match compat::rewrite(statement.as_str()) {
            Some(rewritten) => {
                debug!(original = %statement, rewritten = %rewritten, "Rewrote SHOW statement");
                rewritten
            }
            None => statement.as_str().to_string(),
        };
        let sql = windowed_select(&sql, window);
        let root = Arc::clone(&self.root);

        let rows = tokio::task::spawn_blocking(move || -> Result<RowSet, ExecutionError> {
            let session = Self::session(&root)?;
            run_window(&session, &sql)
        })
        .await
        .map_err(DbError::from)??;

        debug!(
            offset = window.offset(),
            limit = window.limit(),
            rows = rows.len(),
            "Fetched page"
        );
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), DbError> {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || -> Result<(), DbError> {
            let session = Self::session(&root)?;
            let one: i32 = session.query_row("SELECT 1", [], |row| row.get(0))?;
            if one != 1 {
                return Err(DbError::Unexpected(format!("SELECT 1 returned {one}")));
            }
            Ok(())
        })
        .await?
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::DuckDb
    }
}

/// Describe and run one windowed statement on an exclusive session.
fn run_window(session: &Connection, sql: &str) -> Result<RowSet, ExecutionError> {
    let columns = describe_columns(session, sql)?;

    let mut stmt = session.prepare(sql).map_err(classify_duckdb_error)?;
    let mut rows = stmt.query([]).map_err(classify_duckdb_error)?;

    let mut data = Vec::new();
    while let Some(row) = rows.next().map_err(classify_duckdb_error)? {
        let mut values = Vec::with_capacity(columns.len());
        for i in 0..columns.len() {
            let value = row.get_ref(i).map_err(classify_duckdb_error)?;
            values.push(to_value(value));
        }
        data.push(values);
    }

    Ok(RowSet::new(columns, data))
}

fn describe_columns(session: &Connection, sql: &str) -> Result<Vec<Column>, ExecutionError> {
    let mut stmt = session
        .prepare(&describe(sql))
        .map_err(classify_duckdb_error)?;

    let columns = stmt
        .query_map([], |row| {
            Ok(Column::new(
                row.get::<_, String>("column_name")?,
                row.get::<_, String>("column_type")?,
            ))
        })
        .map_err(classify_duckdb_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(classify_duckdb_error)?;

    Ok(columns)
}
