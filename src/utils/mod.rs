//! Utils module - Logging setup and small string helpers

pub mod logging;
pub mod string;
