//! Mock lookup for testing
//!
//! Serves objects from memory, useful for unit tests and offline runs
//! without requiring a Kubernetes cluster.

use async_trait::async_trait;
use kube::api::{ApiResource, DynamicObject};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use super::{ResourceLookup, ResourceRef};
use crate::error::{KubeError, Result};

/// In-memory object lookup
#[derive(Clone, Default)]
pub struct MockLookup {
    objects: Arc<RwLock<HashMap<ResourceRef, DynamicObject>>>,
    /// `(group, version, kind)` triples the fake cluster does not serve
    unknown_kinds: Arc<RwLock<HashSet<(String, String, String)>>>,
    /// When set, every fetch fails with an API error carrying this code
    failure: Arc<RwLock<Option<u16>>>,
    fetches: Arc<RwLock<Vec<ResourceRef>>>,
}

impl MockLookup {
    /// Create a new empty mock lookup
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object under the given reference, returning `self`
    pub fn with_object(self, target: ResourceRef, data: serde_json::Value) -> Self {
        self.insert(target, data);
        self
    }

    /// Store an object under the given reference
    pub fn insert(&self, target: ResourceRef, data: serde_json::Value) {
        let ar = ApiResource::from_gvk(&target.gvk());
        let mut object = DynamicObject::new(&target.name, &ar).data(data);
        if let Some(ns) = &target.namespace {
            object = object.within(ns);
        }

        self.objects
            .write()
            .unwrap()
            .insert(target, object);
    }

    /// Pretend the cluster does not serve this kind
    pub fn with_unknown_kind(self, api_group: &str, api_version: &str, kind: &str) -> Self {
        self.unknown_kinds.write().unwrap().insert((
            api_group.to_string(),
            api_version.to_string(),
            kind.to_string(),
        ));
        self
    }

    /// Make every fetch fail with an API error
    pub fn with_api_failure(self, code: u16) -> Self {
        *self.failure.write().unwrap() = Some(code);
        self
    }

    /// References fetched so far, in order
    pub fn fetched(&self) -> Vec<ResourceRef> {
        self.fetches.read().unwrap().clone()
    }
}

#[async_trait]
impl ResourceLookup for MockLookup {
    async fn fetch(&self, target: &ResourceRef) -> Result<DynamicObject> {
        self.fetches.write().unwrap().push(target.clone());

        if let Some(code) = *self.failure.read().unwrap() {
            return Err(KubeError::Api(kube::Error::Api(kube::core::ErrorResponse {
                status: "Failure".to_string(),
                message: format!("injected failure fetching {}", target),
                reason: "InternalError".to_string(),
                code,
            })));
        }

        let kind_key = (
            target.api_group.clone(),
            target.api_version.clone(),
            target.kind.clone(),
        );
        if self.unknown_kinds.read().unwrap().contains(&kind_key) {
            return Err(KubeError::UnknownKind {
                kind: target.kind.clone(),
                api_version: target.api_version_string(),
            });
        }

        self.objects
            .read()
            .unwrap()
            .get(target)
            .cloned()
            .ok_or_else(|| KubeError::ResourceNotFound {
                resource: target.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn secret_ref(name: &str) -> ResourceRef {
        ResourceRef::namespaced("", "v1", "Secret", "apps", name)
    }

    #[tokio::test]
    async fn test_fetch_stored_object() {
        let lookup = MockLookup::new().with_object(
            secret_ref("rel-postgresql"),
            json!({"data": {"password": "cGFzcw=="}}),
        );

        let object = lookup.fetch(&secret_ref("rel-postgresql")).await.unwrap();

        assert_eq!(object.metadata.name.as_deref(), Some("rel-postgresql"));
        assert_eq!(object.metadata.namespace.as_deref(), Some("apps"));
        assert_eq!(object.data["data"]["password"], "cGFzcw==");
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found() {
        let lookup = MockLookup::new();

        let err = lookup.fetch(&secret_ref("rel-postgresql")).await.unwrap_err();

        assert!(err.is_not_found());
        insta::assert_snapshot!(err.to_string(), @"Secret/rel-postgresql in namespace 'apps' not found");
    }

    #[tokio::test]
    async fn test_namespace_is_part_of_identity() {
        let lookup = MockLookup::new().with_object(secret_ref("rel-postgresql"), json!({}));

        let other = ResourceRef::namespaced("", "v1", "Secret", "other", "rel-postgresql");
        assert!(lookup.fetch(&other).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_unknown_kind_is_not_found() {
        let lookup = MockLookup::new().with_unknown_kind("config.openshift.io", "v1", "Ingress");
        let ingress = ResourceRef::cluster_scoped("config.openshift.io", "v1", "Ingress", "cluster");

        let err = lookup.fetch(&ingress).await.unwrap_err();

        assert!(matches!(err, KubeError::UnknownKind { .. }));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_api_failure_is_not_not_found() {
        let lookup = MockLookup::new().with_api_failure(500);

        let err = lookup.fetch(&secret_ref("rel-postgresql")).await.unwrap_err();

        assert!(!err.is_not_found());
        assert_eq!(lookup.fetched(), vec![secret_ref("rel-postgresql")]);
    }

    #[tokio::test]
    async fn test_api_404_is_not_found() {
        let lookup = MockLookup::new().with_api_failure(404);

        let err = lookup.fetch(&secret_ref("rel-postgresql")).await.unwrap_err();

        assert!(err.is_not_found());
    }
}
