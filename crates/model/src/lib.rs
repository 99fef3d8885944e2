pub mod core;
pub mod pagination;
pub mod wire;
