//! Utility modules for ccwrap

pub mod logging;

pub use logging::{init_from_env, init_logging, LoggingConfig};
