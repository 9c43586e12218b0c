//! Configuration management for ccwrap
//!
//! Everything the wrapper needs besides its own argument list comes from the
//! environment. The environment is read exactly once per invocation into an
//! immutable [`WrapperConfig`] that is passed explicitly to classification,
//! injection and dispatch.
//!
//! # Environment Variables
//!
//! ## Compiler overrides
//! - `CCWRAP_CC`: compiler used for `cc`, `c89`, `c99`
//! - `CCWRAP_CXX`: compiler used for `c++`
//! - `CCWRAP_FC`: compiler used for `ftn`, `f90`, `fc`, `f95`, `f77`
//!
//! ## Flag groups
//! - `CCWRAP_LDFLAGS`, `CCWRAP_CFLAGS`, `CCWRAP_CXXFLAGS`, `CCWRAP_FFLAGS`,
//!   `CCWRAP_CPPFLAGS`: split on whitespace, or with shell quoting rules when
//!   `CCWRAP_SHELL_ESCAPED_FLAGS` is true
//!
//! ## Installation and switches
//! - `CCWRAP_PREFIX`: install prefix; `<prefix>/lib` is the rpath target and
//!   `<prefix>/bin/ccache` the default cache accelerator
//! - `CCWRAP_CCACHE`: explicit cache accelerator path
//! - `CCWRAP_NO_RPATH`, `CCWRAP_NO_CCACHE`, `CCWRAP_DEBUG`: boolean switches
//! - `CCWRAP_ENV_PATH`: extra wrapper directories to strip from `PATH`
//! - `CCWRAP_PLATFORM`: override the host platform (`darwin`, `linux`, `other`)
//!
//! # Example
//!
//! ```no_run
//! use ccwrap::WrapperConfig;
//!
//! let config = WrapperConfig::from_env().expect("invalid wrapper configuration");
//! config.validate().expect("invalid wrapper configuration");
//! println!("{}", config);
//! ```

use crate::inject::rpath::Platform;
use serde::Serialize;
use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_CC: &str = "CCWRAP_CC";
pub const ENV_CXX: &str = "CCWRAP_CXX";
pub const ENV_FC: &str = "CCWRAP_FC";
pub const ENV_LDFLAGS: &str = "CCWRAP_LDFLAGS";
pub const ENV_CFLAGS: &str = "CCWRAP_CFLAGS";
pub const ENV_CXXFLAGS: &str = "CCWRAP_CXXFLAGS";
pub const ENV_FFLAGS: &str = "CCWRAP_FFLAGS";
pub const ENV_CPPFLAGS: &str = "CCWRAP_CPPFLAGS";
pub const ENV_SHELL_ESCAPED_FLAGS: &str = "CCWRAP_SHELL_ESCAPED_FLAGS";
pub const ENV_PREFIX: &str = "CCWRAP_PREFIX";
pub const ENV_CCACHE: &str = "CCWRAP_CCACHE";
pub const ENV_NO_RPATH: &str = "CCWRAP_NO_RPATH";
pub const ENV_NO_CCACHE: &str = "CCWRAP_NO_CCACHE";
pub const ENV_DEBUG: &str = "CCWRAP_DEBUG";
pub const ENV_ENV_PATH: &str = "CCWRAP_ENV_PATH";
pub const ENV_PLATFORM: &str = "CCWRAP_PLATFORM";

/// Every variable [`WrapperConfig::from_env`] reads.
pub const CONFIG_VARS: &[&str] = &[
    ENV_CC,
    ENV_CXX,
    ENV_FC,
    ENV_LDFLAGS,
    ENV_CFLAGS,
    ENV_CXXFLAGS,
    ENV_FFLAGS,
    ENV_CPPFLAGS,
    ENV_SHELL_ESCAPED_FLAGS,
    ENV_PREFIX,
    ENV_CCACHE,
    ENV_NO_RPATH,
    ENV_NO_CCACHE,
    ENV_DEBUG,
    ENV_ENV_PATH,
    ENV_PLATFORM,
];

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A switch holds something other than a recognized boolean
    #[error("Invalid boolean for {var}: '{value}'. Valid options: 1, 0, true, false, yes, no, on, off")]
    InvalidBool { var: String, value: String },

    /// A variable that must be text is not valid UTF-8
    #[error("{0} is not valid UTF-8")]
    NotUnicode(String),

    /// Unknown platform override
    #[error("Invalid platform: {0}. Valid options: darwin, linux, other")]
    InvalidPlatform(String),

    /// Shell-escaped flag group could not be split
    #[error("Failed to parse {var}: unbalanced quotes or dangling escape")]
    UnbalancedQuotes { var: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Immutable per-invocation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrapperConfig {
    pub cc: Option<String>,
    pub cxx: Option<String>,
    pub fc: Option<String>,
    pub ldflags: Vec<String>,
    pub cflags: Vec<String>,
    pub cxxflags: Vec<String>,
    pub fflags: Vec<String>,
    pub cppflags: Vec<String>,
    pub shell_escaped_flags: bool,
    pub prefix: Option<PathBuf>,
    pub ccache: Option<PathBuf>,
    pub rpath_enabled: bool,
    pub ccache_enabled: bool,
    pub debug: bool,
    pub env_path: Vec<PathBuf>,
    pub platform: Platform,
}

impl Default for WrapperConfig {
    /// Configuration of an empty environment: nothing to inject, rpath and
    /// accelerator switches on, host platform.
    fn default() -> Self {
        Self {
            cc: None,
            cxx: None,
            fc: None,
            ldflags: Vec::new(),
            cflags: Vec::new(),
            cxxflags: Vec::new(),
            fflags: Vec::new(),
            cppflags: Vec::new(),
            shell_escaped_flags: false,
            prefix: None,
            ccache: None,
            rpath_enabled: true,
            ccache_enabled: true,
            debug: false,
            env_path: Vec::new(),
            platform: Platform::host(),
        }
    }
}

impl WrapperConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var_os(key))
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let text = |key: &str| -> Result<Option<String>, ConfigError> {
            match lookup(key) {
                None => Ok(None),
                Some(value) => value
                    .into_string()
                    .map(Some)
                    .map_err(|_| ConfigError::NotUnicode(key.to_string())),
            }
        };
        let non_empty = |key: &str| -> Result<Option<String>, ConfigError> {
            Ok(text(key)?.filter(|v| !v.trim().is_empty()))
        };
        let switch = |key: &str, default: bool| -> Result<bool, ConfigError> {
            match text(key)? {
                None => Ok(default),
                Some(value) => parse_bool(key, &value),
            }
        };

        let shell_escaped_flags = switch(ENV_SHELL_ESCAPED_FLAGS, false)?;
        let flags = |key: &str| -> Result<Vec<String>, ConfigError> {
            match text(key)? {
                None => Ok(Vec::new()),
                Some(value) => split_flags(key, &value, shell_escaped_flags),
            }
        };

        let platform = match non_empty(ENV_PLATFORM)? {
            None => Platform::host(),
            Some(value) => Platform::from_name(&value.trim().to_lowercase())
                .ok_or(ConfigError::InvalidPlatform(value))?,
        };

        let env_path = lookup(ENV_ENV_PATH)
            .map(|value| {
                env::split_paths(&value)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            cc: non_empty(ENV_CC)?,
            cxx: non_empty(ENV_CXX)?,
            fc: non_empty(ENV_FC)?,
            ldflags: flags(ENV_LDFLAGS)?,
            cflags: flags(ENV_CFLAGS)?,
            cxxflags: flags(ENV_CXXFLAGS)?,
            fflags: flags(ENV_FFLAGS)?,
            cppflags: flags(ENV_CPPFLAGS)?,
            shell_escaped_flags,
            prefix: lookup(ENV_PREFIX)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            ccache: lookup(ENV_CCACHE)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            rpath_enabled: !switch(ENV_NO_RPATH, false)?,
            ccache_enabled: !switch(ENV_NO_CCACHE, false)?,
            debug: switch(ENV_DEBUG, false)?,
            env_path,
            platform,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(prefix) = &self.prefix {
            if !prefix.is_absolute() {
                return Err(ConfigError::ValidationFailed(format!(
                    "Install prefix must be an absolute path: {}",
                    prefix.display()
                )));
            }
        }

        for (var, value) in [(ENV_CC, &self.cc), (ENV_CXX, &self.cxx), (ENV_FC, &self.fc)] {
            if let Some(compiler) = value {
                if compiler.trim() != compiler {
                    return Err(ConfigError::ValidationFailed(format!(
                        "{} has leading or trailing whitespace: '{}'",
                        var, compiler
                    )));
                }
            }
        }

        Ok(())
    }

    /// Directory embedded as rpath, when a prefix is configured.
    pub fn rpath_dir(&self) -> Option<PathBuf> {
        self.prefix.as_ref().map(|prefix| prefix.join("lib"))
    }

    /// Cache accelerator candidate: the explicit path, else `<prefix>/bin/ccache`.
    pub fn ccache_candidate(&self) -> Option<PathBuf> {
        self.ccache
            .clone()
            .or_else(|| self.prefix.as_ref().map(|p| p.join("bin").join("ccache")))
    }
}

impl fmt::Display for WrapperConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn opt(value: &Option<String>) -> &str {
            value.as_deref().unwrap_or("(unset)")
        }

        writeln!(f, "Wrapper Configuration:")?;
        writeln!(f, "  C Compiler: {}", opt(&self.cc))?;
        writeln!(f, "  C++ Compiler: {}", opt(&self.cxx))?;
        writeln!(f, "  Fortran Compiler: {}", opt(&self.fc))?;
        writeln!(f, "  LDFLAGS: {}", self.ldflags.join(" "))?;
        writeln!(f, "  CFLAGS: {}", self.cflags.join(" "))?;
        writeln!(f, "  CXXFLAGS: {}", self.cxxflags.join(" "))?;
        writeln!(f, "  FFLAGS: {}", self.fflags.join(" "))?;
        writeln!(f, "  CPPFLAGS: {}", self.cppflags.join(" "))?;
        match &self.prefix {
            Some(prefix) => writeln!(f, "  Prefix: {}", prefix.display())?,
            None => writeln!(f, "  Prefix: (unset)")?,
        }
        writeln!(f, "  Rpath Enabled: {}", self.rpath_enabled)?;
        writeln!(f, "  Ccache Enabled: {}", self.ccache_enabled)?;
        writeln!(f, "  Debug: {}", self.debug)?;
        writeln!(f, "  Platform: {}", self.platform)?;
        Ok(())
    }
}

/// Parses a boolean switch value.
pub fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Splits a flag group into tokens, preserving their order.
pub fn split_flags(var: &str, value: &str, shell_escaped: bool) -> Result<Vec<String>, ConfigError> {
    if shell_escaped {
        shlex::split(value).ok_or_else(|| ConfigError::UnbalancedQuotes {
            var: var.to_string(),
        })
    } else {
        Ok(value
            .split_ascii_whitespace()
            .map(ToString::to_string)
            .collect())
    }
}
