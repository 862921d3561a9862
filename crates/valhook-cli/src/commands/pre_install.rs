//! Pre-install command - inject routing domain and bootstrap credentials

use std::path::{Path, PathBuf};
use valhook_core::{RandomSecretGenerator, SecretGenerator, Values};
use valhook_kube::{
    ClusterLookup, CredentialBootstrapHook, HookOutcome, ResourceLookup, RouterDomainHook,
};

use super::{load_values, report, write_values};
use crate::error::Result;

/// Run the pre-install command
pub async fn run(
    values_files: &[PathBuf],
    set_values: &[String],
    output: Option<&Path>,
    skip_router_domain: bool,
    skip_credentials: bool,
) -> Result<()> {
    let mut values = load_values(values_files, set_values)?;

    // Only the routing domain needs the cluster
    let lookup = if skip_router_domain {
        None
    } else {
        Some(ClusterLookup::try_default().await?)
    };
    let generator = (!skip_credentials).then(RandomSecretGenerator::new);

    for (hook, outcome) in apply(&mut values, lookup, generator).await? {
        report(hook, outcome);
    }

    write_values(&values, output)
}

/// Run the enabled pre-install hooks in order
///
/// A hook is disabled by passing `None` for what it needs.
pub async fn apply<L, G>(
    values: &mut Values,
    lookup: Option<L>,
    generator: Option<G>,
) -> Result<Vec<(&'static str, HookOutcome)>>
where
    L: ResourceLookup,
    G: SecretGenerator,
{
    let mut outcomes = Vec::new();

    if let Some(lookup) = lookup {
        let outcome = RouterDomainHook::new(lookup).run(values).await?;
        outcomes.push(("router-domain", outcome));
    }

    if let Some(generator) = generator {
        let outcome = CredentialBootstrapHook::new(generator).run(values)?;
        outcomes.push(("credential-bootstrap", outcome));
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use valhook_core::FixedSecretGenerator;
    use valhook_kube::{MockLookup, SkipReason};

    fn lookup_with_domain(domain: &str) -> MockLookup {
        MockLookup::new().with_object(
            RouterDomainHook::<MockLookup>::ingress_config(),
            json!({"spec": {"domain": domain}}),
        )
    }

    #[tokio::test]
    async fn test_apply_runs_both_hooks() {
        let mut values = Values::new();

        let outcomes = apply(
            &mut values,
            Some(lookup_with_domain("apps.example.com")),
            Some(FixedSecretGenerator::new("test")),
        )
        .await
        .unwrap();

        assert_eq!(
            outcomes,
            vec![
                ("router-domain", HookOutcome::Applied),
                ("credential-bootstrap", HookOutcome::Applied),
            ]
        );
        assert_eq!(
            values.inner(),
            &json!({
                "global": {"clusterRouterBase": "apps.example.com"},
                "upstream": {"postgresql": {"auth": {"password": "test", "postgresPassword": "test"}}},
                "backstage": {"postgresql": {"auth": {"password": "test", "postgresPassword": "test"}}}
            })
        );
    }

    #[tokio::test]
    async fn test_apply_without_ingress_only_bootstraps() {
        let mut values = Values::new();

        let outcomes = apply(
            &mut values,
            Some(MockLookup::new()),
            Some(FixedSecretGenerator::new("test")),
        )
        .await
        .unwrap();

        assert_eq!(outcomes[0], ("router-domain", HookOutcome::Skipped(SkipReason::ObjectNotFound)));
        assert!(values.get("global").is_none());
        assert_eq!(values.get("backstage.postgresql.auth.password").unwrap(), "test");
    }

    #[tokio::test]
    async fn test_apply_with_hooks_disabled() {
        let mut values = Values::from(json!({"foo": "baz"}));

        let outcomes = apply(&mut values, None::<MockLookup>, None::<FixedSecretGenerator>)
            .await
            .unwrap();

        assert!(outcomes.is_empty());
        assert_eq!(values.inner(), &json!({"foo": "baz"}));
    }

    #[tokio::test]
    async fn test_apply_stops_on_lookup_failure() {
        let mut values = Values::new();

        let result = apply(
            &mut values,
            Some(MockLookup::new().with_api_failure(500)),
            Some(FixedSecretGenerator::new("test")),
        )
        .await;

        assert!(matches!(result, Err(crate::error::CliError::Cluster { .. })));
        assert!(values.is_empty());
    }
}
