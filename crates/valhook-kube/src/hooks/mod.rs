//! Value hooks run around a chart install
//!
//! - **Pre-install**: [`RouterDomainHook`] and [`CredentialBootstrapHook`]
//!   mutate the values before the chart is rendered
//! - **Post-install**: [`CredentialReconcileHook`] copies the credentials the
//!   database subchart actually deployed back into the release values
//!
//! Each hook takes exactly what it needs and can run on its own. Ordering and
//! error aggregation across hooks belong to the caller.

mod bootstrap;
mod reconcile;
mod router_domain;

pub use bootstrap::CredentialBootstrapHook;
pub use reconcile::{CredentialReconcileHook, postgresql_secret_name};
pub use router_domain::RouterDomainHook;

use valhook_core::Values;

/// `upstream.postgresql`: values of the packaged database subchart
pub const UPSTREAM_POSTGRESQL: &[&str] = &["upstream", "postgresql"];

/// `upstream.postgresql.auth`
pub const UPSTREAM_AUTH: &[&str] = &["upstream", "postgresql", "auth"];

/// `backstage.postgresql.auth`: the application's view of the same credentials
pub const BACKSTAGE_AUTH: &[&str] = &["backstage", "postgresql", "auth"];

pub const PASSWORD_KEY: &str = "password";
pub const POSTGRES_PASSWORD_KEY: &str = "postgresPassword";

/// `global`
pub const GLOBAL: &[&str] = &["global"];
pub const CLUSTER_ROUTER_BASE_KEY: &str = "clusterRouterBase";

/// What a hook did to the values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// Values were written
    Applied,
    /// Nothing was written
    Skipped(SkipReason),
}

/// Why a hook left the values alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The cluster object the hook reads does not exist, or its kind is unknown
    ObjectNotFound,
    /// The object exists but lacks the field the hook copies
    FieldAbsent,
    /// Both credentials are already set in `upstream.postgresql.auth`
    CredentialsPresent,
}

/// A database password pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPair {
    pub password: String,
    pub postgres_password: String,
}

impl CredentialPair {
    /// Write both leaves into the map at `path`, leaving its other keys alone
    pub fn write_to(&self, values: &mut Values, path: &[&str]) {
        let auth = values.ensure_path(path);
        auth.insert(PASSWORD_KEY.to_string(), self.password.clone().into());
        auth.insert(
            POSTGRES_PASSWORD_KEY.to_string(),
            self.postgres_password.clone().into(),
        );
    }
}

/// Whether `upstream.postgresql.auth` holds both credentials
///
/// Only both-present counts. With one of them missing the pair is considered
/// unset and gets replaced as a whole.
pub fn credentials_complete(values: &Values) -> bool {
    values.has_string(&leaf(UPSTREAM_AUTH, PASSWORD_KEY))
        && values.has_string(&leaf(UPSTREAM_AUTH, POSTGRES_PASSWORD_KEY))
}

/// Full path of `key` under `path`
pub(crate) fn leaf<'a>(path: &[&'a str], key: &'a str) -> Vec<&'a str> {
    let mut full = path.to_vec();
    full.push(key);
    full
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credentials_complete() {
        let complete = Values::from(json!({
            "upstream": {"postgresql": {"auth": {"password": "", "postgresPassword": ""}}}
        }));
        assert!(credentials_complete(&complete));

        let partial = Values::from(json!({
            "upstream": {"postgresql": {"auth": {"password": "a"}}}
        }));
        assert!(!credentials_complete(&partial));

        let mirrored_only = Values::from(json!({
            "backstage": {"postgresql": {"auth": {"password": "a", "postgresPassword": "b"}}}
        }));
        assert!(!credentials_complete(&mirrored_only));

        assert!(!credentials_complete(&Values::new()));
    }

    #[test]
    fn test_write_pair_keeps_other_auth_keys() {
        let mut values = Values::from(json!({
            "upstream": {"postgresql": {"auth": {"username": "backstage"}}}
        }));

        CredentialPair {
            password: "p".to_string(),
            postgres_password: "pp".to_string(),
        }
        .write_to(&mut values, UPSTREAM_AUTH);

        assert_eq!(
            values.inner(),
            &json!({"upstream": {"postgresql": {"auth": {
                "username": "backstage",
                "password": "p",
                "postgresPassword": "pp"
            }}}})
        );
    }
}
