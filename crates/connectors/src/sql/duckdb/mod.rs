pub mod adapter;
pub mod classify;
pub mod config;
pub mod value;
