use crate::{
    core::value::Row,
    wire::{
        column::Column,
        error::{QueryError, Warning},
        stats::StatementStats,
    },
};
use serde::{Deserialize, Serialize};

/// Response body of both `POST /v1/statement` and the continuation fetch.
///
/// Field presence is the signal clients key off: optional fields are omitted
/// instead of serialized as `null`. `id`, `infoUri` and `stats` are required
/// by the protocol and always present, even when empty.
///
/// Use [`QueryResults::page`] and [`QueryResults::failed`] to build one; they
/// keep `error` and `columns`/`data` mutually exclusive.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryResults {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub info_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_cancel_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Column>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Row>>,
    #[serde(default)]
    pub stats: StatementStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<QueryError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<Warning>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_count: Option<u64>,
}

impl QueryResults {
    /// A page of a tabular result, with the continuation URI when more rows
    /// may exist.
    pub fn page(
        columns: Vec<Column>,
        data: Vec<Row>,
        next_uri: Option<String>,
        stats: StatementStats,
    ) -> Self {
        QueryResults {
            columns: Some(columns),
            data: Some(data),
            next_uri,
            stats,
            ..Self::empty()
        }
    }

    /// A failed statement: `error` set, no columns, no data, no continuation.
    pub fn failed(error: QueryError, stats: StatementStats) -> Self {
        QueryResults {
            error: Some(error),
            stats,
            ..Self::empty()
        }
    }

    fn empty() -> Self {
        QueryResults {
            id: String::new(),
            info_uri: String::new(),
            partial_cancel_uri: None,
            next_uri: None,
            columns: None,
            data: None,
            stats: StatementStats::default(),
            error: None,
            warnings: None,
            update_type: None,
            update_count: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.next_uri.is_none()
    }

    pub fn row_count(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }
}
