//! Lookups against a live API server

use async_trait::async_trait;
use kube::api::{Api, DynamicObject};
use kube::discovery::{self, Scope};
use kube::error::DiscoveryError;

use super::{ResourceLookup, ResourceRef};
use crate::error::{KubeError, Result};

/// Reads objects of any kind through API discovery and the dynamic API
#[derive(Clone)]
pub struct ClusterLookup {
    client: kube::Client,
}

impl ClusterLookup {
    /// Connect using the default kubeconfig or in-cluster configuration
    pub async fn try_default() -> Result<Self> {
        let client = kube::Client::try_default().await?;
        Ok(Self { client })
    }

    /// Create with an existing Kubernetes client
    pub fn with_client(client: kube::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceLookup for ClusterLookup {
    async fn fetch(&self, target: &ResourceRef) -> Result<DynamicObject> {
        let unknown_kind = || KubeError::UnknownKind {
            kind: target.kind.clone(),
            api_version: target.api_version_string(),
        };

        let (ar, caps) = match discovery::pinned_kind(&self.client, &target.gvk()).await {
            Ok(found) => found,
            Err(kube::Error::Discovery(
                DiscoveryError::MissingKind(_)
                | DiscoveryError::MissingApiGroup(_)
                | DiscoveryError::MissingResource(_),
            )) => return Err(unknown_kind()),
            // Group/version not served at all
            Err(kube::Error::Api(resp)) if resp.code == 404 => return Err(unknown_kind()),
            Err(e) => return Err(KubeError::Api(e)),
        };

        let api: Api<DynamicObject> = match (&target.namespace, caps.scope) {
            (Some(ns), Scope::Namespaced) => Api::namespaced_with(self.client.clone(), ns, &ar),
            _ => Api::all_with(self.client.clone(), &ar),
        };

        api.get_opt(&target.name)
            .await?
            .ok_or_else(|| KubeError::ResourceNotFound {
                resource: target.to_string(),
            })
    }
}
