//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use miette::Diagnostic;
use thiserror::Error;
use valhook_core::CoreError;
use valhook_kube::KubeError;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Values could not be loaded or merged
    #[error("Values error: {message}")]
    #[diagnostic(code(valhook::cli::values))]
    Values {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Cluster lookup failed
    #[error("Cluster error: {message}")]
    #[diagnostic(code(valhook::cli::cluster))]
    Cluster {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(valhook::cli::io))]
    Io { message: String },

    /// Hook failed for any other reason
    #[error("{message}")]
    #[diagnostic(code(valhook::cli::error))]
    Other { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Values { .. } => exit_codes::VALUES_ERROR,
            CliError::Cluster { .. } => exit_codes::CLUSTER_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }

    /// Create a values error
    pub fn values(message: impl Into<String>) -> Self {
        Self::Values {
            message: message.into(),
            help: None,
        }
    }

    /// Create a cluster error with help text
    pub fn cluster_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Cluster {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Io(e) => e.into(),
            CoreError::YamlParse(_) => CliError::Values {
                message: err.to_string(),
                help: Some("Values files must contain a YAML mapping".to_string()),
            },
            CoreError::ValuesMerge { .. } => CliError::Values {
                message: err.to_string(),
                help: Some("Use --set key.path=value".to_string()),
            },
            _ => CliError::Other {
                message: err.to_string(),
            },
        }
    }
}

impl From<KubeError> for CliError {
    fn from(err: KubeError) -> Self {
        match err {
            KubeError::Core(e) => e.into(),
            KubeError::Api(_) => CliError::cluster_with_help(
                err.to_string(),
                "Check the current kube context and that it may read the object",
            ),
            _ => CliError::Other {
                message: err.to_string(),
            },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_error_maps_to_values_exit_code() {
        let err: CliError = valhook_core::parse_set_values(&["oops".to_string()])
            .unwrap_err()
            .into();

        assert_eq!(err.exit_code(), exit_codes::VALUES_ERROR);
        insta::assert_snapshot!(err.to_string(), @"Values error: Values merge error: Invalid --set format: 'oops'. Expected key=value");
    }

    #[test]
    fn test_entropy_error_is_generic() {
        let err: CliError =
            KubeError::Core(CoreError::EntropyUnavailable("getrandom failed".to_string())).into();

        assert_eq!(err.exit_code(), exit_codes::ERROR);
        assert_eq!(err.to_string(), "Entropy source unavailable: getrandom failed");
    }

    #[test]
    fn test_missing_file_maps_to_io() {
        let err: CliError = valhook_core::Values::from_file("/nonexistent/values.yaml")
            .unwrap_err()
            .into();

        assert_eq!(err.exit_code(), exit_codes::IO_ERROR);
    }
}
