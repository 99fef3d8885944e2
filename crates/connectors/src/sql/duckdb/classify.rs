use crate::error::{DbError, ExecutionError};
use model::wire::error::ProtocolError;

/// DuckDB error categories, taken from the `<Category> Error:` prefix of the
/// engine's diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parser,
    Binder,
    Catalog,
    InvalidInput,
    Conversion,
    Permission,
    Other,
}

impl ErrorCategory {
    pub fn from_message(message: &str) -> Self {
        let label = message
            .trim_start()
            .split_once(" Error:")
            .map(|(label, _)| label)
            .unwrap_or_default();

        match label {
            "Parser" => ErrorCategory::Parser,
            "Binder" => ErrorCategory::Binder,
            "Catalog" => ErrorCategory::Catalog,
            "Invalid Input" => ErrorCategory::InvalidInput,
            "Conversion" => ErrorCategory::Conversion,
            "Permission" => ErrorCategory::Permission,
            _ => ErrorCategory::Other,
        }
    }

    /// Whether the statement text is to blame, i.e. resubmitting it
    /// unchanged fails the same way.
    pub fn is_statement_error(&self) -> bool {
        !matches!(self, ErrorCategory::Other)
    }

    /// Error name reported to Trino clients.
    pub fn error_name(&self) -> &'static str {
        match self {
            ErrorCategory::Parser => "SYNTAX_ERROR",
            ErrorCategory::Binder => "GENERIC_USER_ERROR",
            ErrorCategory::Catalog => "TABLE_NOT_FOUND",
            ErrorCategory::InvalidInput => "GENERIC_USER_ERROR",
            ErrorCategory::Conversion => "TYPE_MISMATCH",
            ErrorCategory::Permission => "PERMISSION_DENIED",
            ErrorCategory::Other => "GENERIC_INTERNAL_ERROR",
        }
    }
}

/// Split a DuckDB failure into a statement rejection (message passed
/// through verbatim) or an unclassified engine failure.
pub fn classify_duckdb_error(err: ::duckdb::Error) -> ExecutionError {
    let message = err.to_string();
    let category = ErrorCategory::from_message(&message);

    if category.is_statement_error() {
        ExecutionError::Statement(ProtocolError::bad_request(category.error_name(), message))
    } else {
        ExecutionError::Db(DbError::DuckDb(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_categories() {
        let cases = [
            (
                "Parser Error: syntax error at or near \"SELEC\"",
                ErrorCategory::Parser,
            ),
            (
                "Binder Error: Referenced column \"x\" not found",
                ErrorCategory::Binder,
            ),
            (
                "Catalog Error: Table with name t does not exist!",
                ErrorCategory::Catalog,
            ),
            (
                "Invalid Input Error: Cannot execute statement of type INSERT",
                ErrorCategory::InvalidInput,
            ),
            (
                "Conversion Error: Could not convert string 'a' to INT32",
                ErrorCategory::Conversion,
            ),
            (
                "Permission Error: File system LocalFileSystem has been disabled",
                ErrorCategory::Permission,
            ),
        ];

        for (message, expected) in cases {
            let category = ErrorCategory::from_message(message);
            assert_eq!(category, expected, "{message}");
            assert!(category.is_statement_error());
        }
    }

    #[test]
    fn test_system_failures_are_unclassified() {
        for message in [
            "Out of Memory Error: could not allocate block",
            "IO Error: Could not read from file",
            "Out of Range Error: Overflow in addition of INT64 (9223372036854775807 + 1)!",
            "INTERNAL Error: Attempted to access index 3",
            "something without a category",
            "",
        ] {
            let category = ErrorCategory::from_message(message);
            assert_eq!(category, ErrorCategory::Other, "{message}");
            assert!(!category.is_statement_error());
        }
    }

    #[test]
    fn test_category_must_be_the_prefix() {
        // The category is only read from the start of the message.
        let message = "IO Error: while reading 'Parser Error: x.csv'";
        assert_eq!(ErrorCategory::from_message(message), ErrorCategory::Other);
    }
}
