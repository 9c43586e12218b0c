//! ccwrap - compiler-invocation interposer
//!
//! The `ccwrap` binary is installed (usually as symlinks) under the names of
//! C, C++ and Fortran toolchain drivers and the linker. When a build system
//! runs one of those names, ccwrap works out which toolchain role is being
//! requested, prepends the configured flag groups, strips its own directories
//! from `PATH` and replaces itself with the real toolchain.
//!
//! # Pipeline
//!
//! 1. [`toolchain::classify`] maps the invocation name onto a language, an
//!    optional fixed [`Mode`] and the underlying command.
//! 2. [`toolchain::resolve`] scans the arguments to settle the mode.
//! 3. [`env::sanitize_path`] removes the wrapper's directories from `PATH`.
//! 4. [`inject::InjectionPipeline`] prepends rpath, Fortran, preprocessor,
//!    language and linker flag groups.
//! 5. [`dispatch::dispatch`] hands off to the toolchain, optionally through a
//!    compiler cache.
//!
//! Steps 1 to 4 are pure and produce an [`ExecPlan`], which the management
//! command `ccwrap explain` prints instead of executing.
//!
//! # Example
//!
//! ```no_run
//! use ccwrap::{Invocation, Planner, WrapperConfig};
//! use ccwrap::env::SelfDirs;
//! use std::ffi::{OsStr, OsString};
//!
//! let config = WrapperConfig::from_env().expect("invalid configuration");
//! let invocation = Invocation::new("c++", vec![OsString::from("-c"), OsString::from("a.cpp")]);
//! let plan = Planner::new(&config)
//!     .plan(&invocation, OsStr::new("/usr/bin:/bin"), &SelfDirs::new([]))
//!     .expect("unknown invocation name");
//! println!("{}", plan.after_line());
//! ```

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod env;
pub mod error;
pub mod inject;
pub mod plan;
pub mod toolchain;
pub mod util;

pub use config::{ConfigError, WrapperConfig};
pub use error::WrapperError;
pub use inject::{InjectionPipeline, Platform, RpathDecision};
pub use plan::{ExecPlan, Invocation, Planner};
pub use toolchain::{Classification, Language, Mode};
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_ccwrap() {
        assert_eq!(NAME, "ccwrap");
        assert_eq!(NAME, cli::MANAGEMENT_NAME);
    }
}
