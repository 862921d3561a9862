//! Post-install hook: sync release values with the deployed database secret

use tracing::debug;
use valhook_core::{CoreError, Release, nested_string};

use super::{
    CredentialPair, HookOutcome, SkipReason, UPSTREAM_AUTH, UPSTREAM_POSTGRESQL,
    credentials_complete, leaf,
};
use crate::error::{KubeError, Result};
use crate::lookup::{ResourceLookup, ResourceRef};

/// Secret data key holding the application user's password
pub const SECRET_PASSWORD_KEY: &str = "password";

/// Secret data key holding the superuser password
pub const SECRET_POSTGRES_PASSWORD_KEY: &str = "postgres-password";

/// Name of the secret the database subchart creates for a release
///
/// Follows the subchart's own naming: a non-empty `fullnameOverride` is used
/// as is, a non-empty `nameOverride` is prefixed with the release name, and
/// otherwise the name is `<release>-postgresql`.
pub fn postgresql_secret_name(release: &Release) -> String {
    let setting = |key| {
        release
            .values
            .get_string(&leaf(UPSTREAM_POSTGRESQL, key))
            .ok()
            .flatten()
            .filter(|s| !s.is_empty())
    };

    if let Some(fullname) = setting("fullnameOverride") {
        fullname.to_string()
    } else if let Some(name) = setting("nameOverride") {
        format!("{}-{}", release.name, name)
    } else {
        format!("{}-postgresql", release.name)
    }
}

/// Copies the deployed database credentials into the release values
///
/// The subchart may have generated its own secret instead of using the
/// requested credentials. Reading that secret back keeps the stored release
/// in line with what is deployed. Only `upstream.postgresql.auth` is written;
/// the data values are copied exactly as the API returns them (base64).
pub struct CredentialReconcileHook<L> {
    lookup: L,
}

impl<L: ResourceLookup> CredentialReconcileHook<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// The secret this hook reads for a release
    pub fn secret_ref(release: &Release) -> ResourceRef {
        ResourceRef::namespaced(
            "",
            "v1",
            "Secret",
            &release.namespace,
            postgresql_secret_name(release),
        )
    }

    pub async fn run(&self, release: &mut Release) -> Result<HookOutcome> {
        let target = Self::secret_ref(release);

        if credentials_complete(&release.values) {
            debug!("Database credentials already set, skipping secret lookup");
            return Ok(HookOutcome::Skipped(SkipReason::CredentialsPresent));
        }

        let secret = match self.lookup.fetch(&target).await {
            Ok(object) => object,
            Err(e) if e.is_not_found() => {
                debug!(
                    resource = %target,
                    "Database secret not found, leaving credentials unset"
                );
                return Ok(HookOutcome::Skipped(SkipReason::ObjectNotFound));
            }
            Err(e) => return Err(e),
        };

        let read = |key| {
            nested_string(&secret.data, &["data", key]).map_err(|e| match e {
                CoreError::FieldType { path, expected } => KubeError::FieldType {
                    resource: target.to_string(),
                    path,
                    expected,
                },
                other => KubeError::Core(other),
            })
        };

        let (Some(password), Some(postgres_password)) =
            (read(SECRET_PASSWORD_KEY)?, read(SECRET_POSTGRES_PASSWORD_KEY)?)
        else {
            debug!(
                resource = %target,
                "Database secret lacks password data, leaving credentials unset"
            );
            return Ok(HookOutcome::Skipped(SkipReason::FieldAbsent));
        };

        CredentialPair {
            password: password.to_string(),
            postgres_password: postgres_password.to_string(),
        }
        .write_to(&mut release.values, UPSTREAM_AUTH);

        debug!(
            resource = %target,
            "Copied database credentials from secret"
        );

        Ok(HookOutcome::Applied)
    }
}
