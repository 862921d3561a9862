//! Lookups of individual cluster objects
//!
//! Hooks only ever need "get one object by kind and name". The
//! [`ResourceLookup`] trait captures that, with two implementations:
//! - **Cluster**: resolves the kind through API discovery and reads the object
//!   from the API server
//! - **Mock**: serves objects from memory, for tests and offline runs

mod cluster;
mod mock;

pub use cluster::ClusterLookup;
pub use mock::MockLookup;

use async_trait::async_trait;
use kube::api::DynamicObject;
use kube::core::GroupVersionKind;

use crate::error::Result;

/// Identifies a single cluster object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef {
    pub kind: String,
    /// API group, empty for the core group
    pub api_group: String,
    pub api_version: String,
    /// `None` for cluster-scoped objects
    pub namespace: Option<String>,
    pub name: String,
}

impl ResourceRef {
    /// Reference a cluster-scoped object
    pub fn cluster_scoped(
        api_group: impl Into<String>,
        api_version: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            api_group: api_group.into(),
            api_version: api_version.into(),
            namespace: None,
            name: name.into(),
        }
    }

    /// Reference a namespaced object
    pub fn namespaced(
        api_group: impl Into<String>,
        api_version: impl Into<String>,
        kind: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            namespace: Some(namespace.into()),
            ..Self::cluster_scoped(api_group, api_version, kind, name)
        }
    }

    pub fn gvk(&self) -> GroupVersionKind {
        GroupVersionKind::gvk(&self.api_group, &self.api_version, &self.kind)
    }

    /// `group/version`, or just `version` for the core group
    pub fn api_version_string(&self) -> String {
        if self.api_group.is_empty() {
            self.api_version.clone()
        } else {
            format!("{}/{}", self.api_group, self.api_version)
        }
    }
}

impl std::fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{} in namespace '{}'", self.kind, self.name, ns),
            None => write!(f, "{}/{}", self.kind, self.name),
        }
    }
}

/// Fetches single cluster objects by reference
///
/// Implementations must report a missing object or an unknown kind with an
/// error for which [`KubeError::is_not_found`](crate::KubeError::is_not_found)
/// is true, and every other failure with an error for which it is false.
#[async_trait]
pub trait ResourceLookup: Send + Sync {
    async fn fetch(&self, target: &ResourceRef) -> Result<DynamicObject>;
}
