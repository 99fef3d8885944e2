use crate::pagination::window::{PageWindow, WindowError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const PARAM_QUERY: &str = "query";
pub const PARAM_LIMIT: &str = "limit";
pub const PARAM_OFFSET: &str = "offset";

/// Why a continuation could not be turned back into a [`Cursor`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("missing '{0}' parameter")]
    MissingParameter(&'static str),

    #[error("'{param}' must be a non-negative integer, got '{value}'")]
    InvalidNumber { param: &'static str, value: String },

    #[error("'limit' must be at least 1")]
    ZeroLimit,

    #[error("invalid continuation URI: {0}")]
    InvalidUri(String),
}

impl From<WindowError> for CursorError {
    fn from(err: WindowError) -> Self {
        match err {
            WindowError::ZeroLimit => CursorError::ZeroLimit,
        }
    }
}

/// SQL text as submitted by the client.
///
/// Never rewritten: the exact same bytes are carried in every continuation
/// URI of a pagination chain.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Statement(String);

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Statement(sql.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Statement {
    fn from(s: &str) -> Self {
        Statement::new(s)
    }
}

impl From<String> for Statement {
    fn from(s: String) -> Self {
        Statement(s)
    }
}

/// Pagination state of a statement.
///
/// This is the whole of the "session": it is never stored by the server and
/// only exists inside the continuation URI handed to the client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub statement: Statement,
    pub window: PageWindow,
}

impl Cursor {
    pub fn new(statement: Statement, window: PageWindow) -> Self {
        Cursor { statement, window }
    }

    /// Rebuild a cursor from raw continuation parameters.
    ///
    /// All three must be present; numbers are parsed strictly (no sign, no
    /// whitespace) and `limit` must be positive.
    pub fn from_params(
        query: Option<&str>,
        limit: Option<&str>,
        offset: Option<&str>,
    ) -> Result<Self, CursorError> {
        let query = query.ok_or(CursorError::MissingParameter(PARAM_QUERY))?;
        let limit = parse_count(PARAM_LIMIT, limit)?;
        let offset = parse_count(PARAM_OFFSET, offset)?;

        Ok(Cursor {
            statement: Statement::new(query),
            window: PageWindow::new(offset, limit)?,
        })
    }

    /// Cursor for the page after a full page of this one.
    pub fn next(&self, growth_factor: u64) -> Self {
        Cursor {
            statement: self.statement.clone(),
            window: self.window.advance(growth_factor),
        }
    }
}

fn parse_count(param: &'static str, raw: Option<&str>) -> Result<u64, CursorError> {
    let raw = raw.ok_or(CursorError::MissingParameter(param))?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CursorError::InvalidNumber {
            param,
            value: raw.to_string(),
        });
    }
    raw.parse().map_err(|_| CursorError::InvalidNumber {
        param,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_params() {
        let cursor = Cursor::from_params(Some("SELECT 1"), Some("20"), Some("10")).unwrap();
        assert_eq!(cursor.statement.as_str(), "SELECT 1");
        assert_eq!(cursor.window, PageWindow::new(10, 20).unwrap());
    }

    #[test]
    fn test_from_params_rejections() {
        let q = Some("SELECT 1");
        assert_eq!(
            Cursor::from_params(None, Some("1"), Some("0")),
            Err(CursorError::MissingParameter("query"))
        );
        assert_eq!(
            Cursor::from_params(q, None, Some("0")),
            Err(CursorError::MissingParameter("limit"))
        );
        assert_eq!(
            Cursor::from_params(q, Some("1"), None),
            Err(CursorError::MissingParameter("offset"))
        );
        assert_eq!(
            Cursor::from_params(q, Some("0"), Some("0")),
            Err(CursorError::ZeroLimit)
        );
        for bad in ["", "ten", "-1", "+1", " 1", "1.5", "99999999999999999999"] {
            assert!(
                matches!(
                    Cursor::from_params(q, Some(bad), Some("0")),
                    Err(CursorError::InvalidNumber { param: "limit", .. })
                ),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_empty_query_is_not_validated() {
        let cursor = Cursor::from_params(Some(""), Some("5"), Some("0")).unwrap();
        assert!(cursor.statement.is_blank());
    }

    #[test]
    fn test_next_keeps_statement_verbatim() {
        let sql = "SELECT *  FROM t -- trailing\n";
        let cursor = Cursor::new(Statement::new(sql), PageWindow::first(10).unwrap());
        let next = cursor.next(2);
        assert_eq!(next.statement.as_str(), sql);
        assert_eq!(next.window, PageWindow::new(10, 20).unwrap());
    }

    #[test]
    fn test_blank_statement() {
        assert!(Statement::new("  \n\t").is_blank());
        assert!(!Statement::new("SELECT 1").is_blank());
    }
}
