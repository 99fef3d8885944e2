pub mod base;
pub mod duckdb;
