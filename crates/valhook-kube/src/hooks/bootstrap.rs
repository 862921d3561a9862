//! Pre-install hook: database credential bootstrap

use tracing::debug;
use valhook_core::{SecretGenerator, Values};

use super::{
    BACKSTAGE_AUTH, CredentialPair, HookOutcome, SkipReason, UPSTREAM_AUTH, credentials_complete,
};
use crate::error::Result;

/// Generates the database credentials when the values don't carry them
///
/// The database subchart (`upstream.postgresql.auth`) and the application
/// (`backstage.postgresql.auth`) must authenticate with the same pair, so one
/// pair is generated and written to both places.
pub struct CredentialBootstrapHook<G> {
    generator: G,
}

impl<G: SecretGenerator> CredentialBootstrapHook<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn run(&self, values: &mut Values) -> Result<HookOutcome> {
        if credentials_complete(values) {
            debug!("Database credentials already set, keeping them");
            return Ok(HookOutcome::Skipped(SkipReason::CredentialsPresent));
        }

        // Both secrets exist before any value is written
        let pair = CredentialPair {
            password: self.generator.generate()?,
            postgres_password: self.generator.generate()?,
        };

        pair.write_to(values, UPSTREAM_AUTH);
        pair.write_to(values, BACKSTAGE_AUTH);

        debug!("Generated database credentials");

        Ok(HookOutcome::Applied)
    }
}
