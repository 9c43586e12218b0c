//! Structured logging setup for ccwrap
//!
//! The wrapper runs inside other build tools and shares their stderr, so the
//! default level is `warn` and all output goes to stderr. The before/after
//! command trace (`CCWRAP_DEBUG`) is emitted at `info` under the
//! `ccwrap::trace` target and raises the crate's level to `debug`.
//!
//! # Environment Variables
//!
//! - `CCWRAP_LOG_LEVEL` - Log level (trace, debug, info, warn, error)
//! - `CCWRAP_LOG_JSON` - Use JSON output (true/false)
//! - `RUST_LOG` - Standard filtering, takes precedence when set
//!
//! # Example
//!
//! ```no_run
//! use ccwrap::util::logging;
//!
//! logging::init_from_env(false);
//! tracing::warn!("something odd about this invocation");
//! ```

use crate::config::parse_bool;
use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

pub const ENV_LOG_LEVEL: &str = "CCWRAP_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "CCWRAP_LOG_JSON";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level for the `ccwrap` target
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target in logs
    pub include_target: bool,

    /// Keep the `ccwrap::trace` lines even when `RUST_LOG` is set
    pub debug_trace: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            use_json: false,
            include_target: true,
            debug_trace: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Reads `CCWRAP_LOG_LEVEL` and `CCWRAP_LOG_JSON`; `debug_trace` raises the
    /// level to at least `debug`.
    pub fn from_env(debug_trace: bool) -> Self {
        let level = env::var(ENV_LOG_LEVEL)
            .map(|s| parse_level(&s))
            .unwrap_or(Level::WARN);

        let use_json = env::var(ENV_LOG_JSON)
            .ok()
            .map(|v| {
                parse_bool(ENV_LOG_JSON, &v).unwrap_or_else(|e| {
                    eprintln!("ccwrap: {}, using plain output", e);
                    false
                })
            })
            .unwrap_or(false);

        Self {
            level: if debug_trace { level.max(Level::DEBUG) } else { level },
            use_json,
            debug_trace,
            ..Default::default()
        }
    }
}

/// Parses a log level, falling back to `WARN` for anything unrecognized.
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "ccwrap: invalid log level '{}', defaulting to WARN. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::WARN
        }
    }
}

fn build_filter(level: Level, debug_trace: bool) -> EnvFilter {
    let mut filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let filter = EnvFilter::new("warn");
        match format!("ccwrap={}", level).parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        }
    };
    // RUST_LOG must not swallow the trace requested through CCWRAP_DEBUG
    if debug_trace {
        if let Ok(directive) = "ccwrap::trace=info".parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level, config.debug_trace);

        if config.use_json {
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .try_init();
        } else {
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .without_time()
                        .with_writer(std::io::stderr),
                )
                .try_init();
        }
    });
}

pub fn init_from_env(debug_trace: bool) {
    init_logging(LoggingConfig::from_env(debug_trace));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("Info"), Level::INFO);
        assert_eq!(parse_level("error"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(parse_level("loud"), Level::WARN);
        assert_eq!(parse_level(""), Level::WARN);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::WARN);
        assert!(!config.use_json);
        assert!(config.include_target);
        assert!(!config.debug_trace);
    }

    #[test]
    #[serial]
    fn test_debug_trace_raises_level() {
        env::remove_var(ENV_LOG_LEVEL);
        assert_eq!(LoggingConfig::from_env(true).level, Level::DEBUG);
        assert_eq!(LoggingConfig::from_env(false).level, Level::WARN);

        env::set_var(ENV_LOG_LEVEL, "trace");
        assert_eq!(LoggingConfig::from_env(true).level, Level::TRACE);
        env::remove_var(ENV_LOG_LEVEL);
    }

    #[test]
    #[serial]
    fn test_json_flag() {
        for value in ["true", "1", "yes", "ON", "TRUE"] {
            env::set_var(ENV_LOG_JSON, value);
            assert!(LoggingConfig::from_env(false).use_json, "{}", value);
        }
        for value in ["false", "0", "off", "", "sometimes"] {
            env::set_var(ENV_LOG_JSON, value);
            assert!(!LoggingConfig::from_env(false).use_json, "{}", value);
        }
        env::remove_var(ENV_LOG_JSON);
        assert!(!LoggingConfig::from_env(false).use_json);
    }

    #[test]
    #[serial]
    fn test_trace_directive_survives_rust_log() {
        env::set_var("RUST_LOG", "error");
        let filter = build_filter(Level::DEBUG, true).to_string().to_lowercase();
        assert!(filter.contains("ccwrap::trace=info"), "{}", filter);

        let filter = build_filter(Level::DEBUG, false).to_string().to_lowercase();
        assert!(!filter.contains("ccwrap::trace"), "{}", filter);
        env::remove_var("RUST_LOG");
    }

    #[test]
    #[serial]
    fn test_debug_trace_recorded() {
        env::remove_var(ENV_LOG_LEVEL);
        assert!(LoggingConfig::from_env(true).debug_trace);
        assert!(!LoggingConfig::from_env(false).debug_trace);
    }
}
