//! Rewrites of Trino metadata statements into DuckDB catalog queries.
//!
//! Trino clients and BI tools discover objects with `SHOW CATALOGS`,
//! `SHOW SCHEMAS FROM c` and `SHOW TABLES FROM c.s`. DuckDB has no such
//! syntax, so these are answered from `information_schema` instead.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SHOW_CATALOGS: Regex =
        Regex::new(r"(?i)^\s*show\s+catalogs\s*;?\s*$").expect("valid regex");
    static ref SHOW_SCHEMAS: Regex =
        Regex::new(r"(?i)^\s*show\s+schemas\s+from\s+(?P<catalog>[0-9A-Za-z_-]+)\s*;?\s*$")
            .expect("valid regex");
    static ref SHOW_TABLES: Regex = Regex::new(
        r"(?i)^\s*show\s+tables\s+from\s+(?P<catalog>[0-9A-Za-z_-]+)\.(?P<schema>[0-9A-Za-z_-]+)\s*;?\s*$"
    )
    .expect("valid regex");
}

/// SQL to execute in place of `sql`, or `None` when it needs no rewrite.
///
/// Identifiers are restricted to `[0-9A-Za-z_-]` by the patterns, so they
/// can be inlined as string literals.
pub fn rewrite(sql: &str) -> Option<String> {
    if SHOW_CATALOGS.is_match(sql) {
        return Some(
            "SELECT DISTINCT catalog_name AS \"Catalog\" FROM information_schema.schemata \
             ORDER BY 1"
                .to_string(),
        );
    }

    if let Some(caps) = SHOW_SCHEMAS.captures(sql) {
        let catalog = &caps["catalog"];
        return Some(format!(
            "SELECT DISTINCT schema_name AS \"Schema\" FROM information_schema.schemata \
             WHERE catalog_name = '{catalog}' ORDER BY 1"
        ));
    }

    if let Some(caps) = SHOW_TABLES.captures(sql) {
        let catalog = &caps["catalog"];
        let schema = &caps["schema"];
        return Some(format!(
            "SELECT table_name AS \"Table\" FROM information_schema.tables \
             WHERE table_catalog = '{catalog}' AND table_schema = '{schema}' ORDER BY 1"
        ));
    }

    None
}
