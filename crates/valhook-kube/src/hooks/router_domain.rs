//! Pre-install hook: cluster routing domain discovery

use tracing::debug;
use valhook_core::{CoreError, Values, nested_string};

use super::{CLUSTER_ROUTER_BASE_KEY, GLOBAL, HookOutcome, SkipReason};
use crate::error::{KubeError, Result};
use crate::lookup::{ResourceLookup, ResourceRef};

/// Field of the ingress config holding the apps domain
const DOMAIN_FIELD: &[&str] = &["spec", "domain"];

/// Sets `global.clusterRouterBase` to the cluster's ingress domain
///
/// The domain comes from the cluster-wide `Ingress.config.openshift.io/v1`
/// object named `cluster`. Clusters without that object (or without the kind
/// at all) are left alone. When the domain is found it always replaces
/// whatever `global.clusterRouterBase` held before.
pub struct RouterDomainHook<L> {
    lookup: L,
}

impl<L: ResourceLookup> RouterDomainHook<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// The object the domain is read from
    pub fn ingress_config() -> ResourceRef {
        ResourceRef::cluster_scoped("config.openshift.io", "v1", "Ingress", "cluster")
    }

    pub async fn run(&self, values: &mut Values) -> Result<HookOutcome> {
        let target = Self::ingress_config();

        let ingress = match self.lookup.fetch(&target).await {
            Ok(object) => object,
            Err(e) if e.is_not_found() => {
                debug!(
                    resource = %target,
                    "Cluster ingress config not found, leaving global.clusterRouterBase unset"
                );
                return Ok(HookOutcome::Skipped(SkipReason::ObjectNotFound));
            }
            Err(e) => return Err(e),
        };

        let domain = nested_string(&ingress.data, DOMAIN_FIELD).map_err(|e| match e {
            CoreError::FieldType { path, expected } => KubeError::FieldType {
                resource: target.to_string(),
                path,
                expected,
            },
            other => KubeError::Core(other),
        })?;

        let Some(domain) = domain else {
            debug!(
                resource = %target,
                "Ingress config has no spec.domain, leaving global.clusterRouterBase unset"
            );
            return Ok(HookOutcome::Skipped(SkipReason::FieldAbsent));
        };

        values.set_leaf(GLOBAL, CLUSTER_ROUTER_BASE_KEY, domain);
        debug!(domain, "Setting global.clusterRouterBase");

        Ok(HookOutcome::Applied)
    }
}
