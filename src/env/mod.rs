//! Execution environment handling
//!
//! The wrapper is usually found first on `PATH` under the very names it hands
//! off to, so the search path used for the hand-off must not contain any of
//! the wrapper's own directories.

pub mod sanitize;

pub use sanitize::{sanitize_path, SelfDirs};
