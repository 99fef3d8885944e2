pub mod codec;
pub mod controller;
pub mod error;
pub mod metrics;
