//! Post-install command - reconcile release values with the deployed secret

use std::path::{Path, PathBuf};
use valhook_core::Release;
use valhook_kube::{ClusterLookup, CredentialReconcileHook, HookOutcome, ResourceLookup};

use super::{load_values, report, write_values};
use crate::error::Result;

/// Run the post-install command
pub async fn run(
    name: &str,
    namespace: &str,
    values_files: &[PathBuf],
    set_values: &[String],
    output: Option<&Path>,
) -> Result<()> {
    let values = load_values(values_files, set_values)?;
    let mut release = Release::new(name, namespace, values);

    let lookup = ClusterLookup::try_default().await?;
    let outcome = apply(&mut release, lookup).await?;
    report("credential-reconcile", outcome);

    write_values(&release.values, output)
}

/// Run the post-install hook against a release
pub async fn apply<L: ResourceLookup>(release: &mut Release, lookup: L) -> Result<HookOutcome> {
    tracing::debug!(
        release = %release.name,
        namespace = %release.namespace,
        "running post-install hooks"
    );
    Ok(CredentialReconcileHook::new(lookup).run(release).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use valhook_core::Values;
    use valhook_kube::{MockLookup, ResourceRef, SkipReason};

    #[tokio::test]
    async fn test_apply_copies_secret_data() {
        let lookup = MockLookup::new().with_object(
            ResourceRef::namespaced("", "v1", "Secret", "apps", "rel-pg"),
            json!({"data": {"password": "cGFzczEyMw==", "postgres-password": "cG9zdDEyMw=="}}),
        );
        let mut release = Release::new(
            "rel",
            "apps",
            Values::from(json!({"upstream": {"postgresql": {"nameOverride": "pg"}}})),
        );

        let outcome = apply(&mut release, lookup).await.unwrap();

        assert_eq!(outcome, HookOutcome::Applied);
        assert_eq!(
            release.values.inner(),
            &json!({"upstream": {"postgresql": {
                "nameOverride": "pg",
                "auth": {"password": "cGFzczEyMw==", "postgresPassword": "cG9zdDEyMw=="}
            }}})
        );
    }

    #[tokio::test]
    async fn test_apply_without_secret() {
        let mut release = Release::new("rel", "apps", Values::new());

        let outcome = apply(&mut release, MockLookup::new()).await.unwrap();

        assert_eq!(outcome, HookOutcome::Skipped(SkipReason::ObjectNotFound));
        assert!(release.values.is_empty());
    }
}
