//! Release record handed to post-install hooks

use serde::{Deserialize, Serialize};

use crate::values::Values;

/// A release as seen after its resources were created
///
/// `values` is the configuration that gets persisted with the release, so
/// mutations made here show up in later diffs and upgrades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// Release name
    pub name: String,

    /// Kubernetes namespace
    pub namespace: String,

    /// Values bound to this release
    #[serde(default)]
    pub values: Values,
}

impl Release {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, values: Values) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            values,
        }
    }
}
