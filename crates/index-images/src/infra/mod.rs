//! Infrastructure adapters for IO, configuration, and logging.

pub mod config;
pub mod fs;
pub mod logging;
