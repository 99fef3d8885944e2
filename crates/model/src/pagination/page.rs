use crate::{
    core::value::Row,
    pagination::cursor::Cursor,
    wire::column::Column,
};

/// Rows produced by one engine call for one page window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowSet {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl RowSet {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        RowSet { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A page of results together with the cursor of the page after it, if the
/// engine may have more rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub next: Option<Cursor>,
}

impl ResultPage {
    /// Build the page for `cursor` from the rows the engine returned.
    ///
    /// A full page implies more rows may exist, a short page implies the
    /// result is exhausted. When the row count is an exact multiple of the
    /// limit this yields one extra, empty, final page.
    pub fn from_rows(cursor: &Cursor, rows: RowSet, growth_factor: u64) -> Self {
        let next = cursor
            .window
            .is_filled_by(rows.len())
            .then(|| cursor.next(growth_factor));

        ResultPage {
            columns: rows.columns,
            rows: rows.rows,
            next,
        }
    }

    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::value::Value, pagination::window::PageWindow};

    fn rows(n: usize) -> RowSet {
        RowSet::new(
            vec![Column::new("n", "INTEGER")],
            (0..n).map(|i| vec![Value::Int(i as i64)]).collect(),
        )
    }

    #[test]
    fn test_full_page_has_next() {
        let cursor = Cursor::new("SELECT 1".into(), PageWindow::first(4).unwrap());
        let page = ResultPage::from_rows(&cursor, rows(4), 2);
        let next = page.next.expect("next cursor");
        assert_eq!(next.window, PageWindow::new(4, 8).unwrap());
    }

    #[test]
    fn test_short_page_is_final() {
        let cursor = Cursor::new("SELECT 1".into(), PageWindow::new(4, 8).unwrap());
        let page = ResultPage::from_rows(&cursor, rows(3), 2);
        assert!(!page.has_more());
        assert_eq!(page.rows.len(), 3);
    }

    #[test]
    fn test_empty_page_is_final() {
        let cursor = Cursor::new("SELECT 1".into(), PageWindow::new(12, 8).unwrap());
        let page = ResultPage::from_rows(&cursor, rows(0), 2);
        assert!(!page.has_more());
        assert_eq!(page.columns.len(), 1);
    }
}
