use crate::config::ConfigError;
use std::io;
use thiserror::Error;

/// Failures that stop the wrapper before or during dispatch.
///
/// Errors of the underlying toolchain are never represented here: once the
/// process image is replaced they belong to the toolchain.
#[derive(Debug, Error)]
pub enum WrapperError {
    #[error("unrecognized toolchain command: '{0}'")]
    UnknownCommand(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("'{command}' not found in sanitized PATH: {source}")]
    CommandNotFound {
        command: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to execute '{command}': {source}")]
    Exec {
        command: String,
        #[source]
        source: io::Error,
    },
}

impl WrapperError {
    /// Exit status reported for this error, following shell conventions for
    /// commands that cannot be started.
    pub fn exit_code(&self) -> i32 {
        match self {
            WrapperError::UnknownCommand(_) | WrapperError::Config(_) => 1,
            WrapperError::CommandNotFound { .. } => 127,
            WrapperError::Exec { source, .. } if source.kind() == io::ErrorKind::NotFound => 127,
            WrapperError::Exec { .. } => 126,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(WrapperError::UnknownCommand("icc".to_string()).exit_code(), 1);
        assert_eq!(
            WrapperError::Config(ConfigError::NotUnicode("CCWRAP_CC".to_string())).exit_code(),
            1
        );
        assert_eq!(
            WrapperError::Exec {
                command: "gcc".to_string(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            }
            .exit_code(),
            126
        );
        assert_eq!(
            WrapperError::Exec {
                command: "gcc".to_string(),
                source: io::Error::from(io::ErrorKind::NotFound),
            }
            .exit_code(),
            127
        );
    }

    #[test]
    fn test_messages() {
        let err = WrapperError::UnknownCommand("icc".to_string());
        assert_eq!(err.to_string(), "unrecognized toolchain command: 'icc'");

        let err: WrapperError = ConfigError::InvalidPlatform("plan9".to_string()).into();
        assert!(err.to_string().contains("plan9"));
    }
}
