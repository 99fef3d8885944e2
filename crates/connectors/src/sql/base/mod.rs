pub mod adapter;
pub mod compat;
pub mod query;
