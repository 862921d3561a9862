//! Error types for valhook-kube

use thiserror::Error;

/// Result type for valhook-kube operations
pub type Result<T> = std::result::Result<T, KubeError>;

/// Errors that can occur while looking up cluster objects or running hooks
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KubeError {
    /// Kubernetes API error
    #[error("Kubernetes API error: {0}")]
    Api(#[from] kube::Error),

    /// The object does not exist
    #[error("{resource} not found")]
    ResourceNotFound { resource: String },

    /// The kind is not served by this cluster
    #[error("kind '{kind}' ({api_version}) is not registered in the cluster")]
    UnknownKind { kind: String, api_version: String },

    /// A field exists but cannot be read as the expected type
    #[error("field '{path}' of {resource} has the wrong type: expected {expected}")]
    FieldType {
        resource: String,
        path: String,
        expected: &'static str,
    },

    /// Credential generation or value tree failure
    #[error(transparent)]
    Core(#[from] valhook_core::CoreError),
}

impl KubeError {
    /// Whether this error means "the object is not there"
    ///
    /// Covers a missing object, a kind the cluster does not serve, and a raw
    /// API 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            KubeError::ResourceNotFound { .. } | KubeError::UnknownKind { .. } => true,
            KubeError::Api(kube::Error::Api(resp)) => resp.code == 404,
            _ => false,
        }
    }
}
