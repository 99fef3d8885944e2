//! Record shapes of the Trino client protocol.
//!
//! Field names follow the Java client (`io.trino.client`) so that any
//! conformant client can parse a response without knowing whether it came
//! from a submission or a continuation fetch.

pub mod column;
pub mod error;
pub mod results;
pub mod stats;
