use model::pagination::window::PageWindow;

/// Strip what cannot appear inside a sub-select: surrounding whitespace and
/// trailing statement terminators.
pub fn normalize(sql: &str) -> &str {
    sql.trim()
        .trim_end_matches(|c: char| c == ';' || c.is_whitespace())
}

/// Wrap `sql` so the engine itself skips `offset` rows and stops after
/// `limit`, instead of the adapter fetching and discarding.
///
/// The statement sits on its own lines so a trailing `--` comment cannot
/// swallow the window clause.
pub fn windowed_select(sql: &str, window: PageWindow) -> String {
    format!(
        "SELECT * FROM (\n{}\n) LIMIT {} OFFSET {}",
        normalize(sql),
        clamp(window.limit()),
        clamp(window.offset())
    )
}

/// Column names and display types of a query, without running it.
pub fn describe(sql: &str) -> String {
    format!("DESCRIBE {sql}")
}

// LIMIT and OFFSET are BIGINT in SQL.
fn clamp(n: u64) -> u64 {
    n.min(i64::MAX as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_terminators() {
        assert_eq!(normalize("  SELECT 1 ;; \n"), "SELECT 1");
        assert_eq!(normalize("SELECT ';'"), "SELECT ';'");
    }

    #[test]
    fn test_terminator_before_trailing_comment_is_kept() {
        // Only a trailing terminator is stripped; one followed by a comment
        // reaches the engine inside the sub-select and fails to parse there.
        assert_eq!(normalize("SELECT 'x' ;  -- c"), "SELECT 'x' ;  -- c");
    }

    #[test]
    fn test_windowed_select() {
        let window = PageWindow::new(10, 20).unwrap();
        assert_eq!(
            windowed_select("SELECT * FROM t; ", window),
            "SELECT * FROM (\nSELECT * FROM t\n) LIMIT 20 OFFSET 10"
        );
    }

    #[test]
    fn test_windowed_select_keeps_trailing_comment_inside() {
        let window = PageWindow::first(5).unwrap();
        let sql = windowed_select("SELECT 1 -- one", window);
        assert!(sql.ends_with("-- one\n) LIMIT 5 OFFSET 0"));
    }

    #[test]
    fn test_window_bounds_are_clamped_to_bigint() {
        let window = PageWindow::new(u64::MAX, u64::MAX).unwrap();
        let sql = windowed_select("SELECT 1", window);
        let max = i64::MAX.to_string();
        assert!(sql.ends_with(&format!("LIMIT {max} OFFSET {max}")));
    }
}
