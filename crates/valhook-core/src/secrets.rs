//! Bootstrap credential generation
//!
//! Credentials are random alphanumeric tokens of a fixed length. Generation
//! goes through the [`SecretGenerator`] trait so hooks can be driven with a
//! deterministic generator in tests and with [`RandomSecretGenerator`] in
//! production.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{CoreError, Result};

/// Length of every generated credential
pub const SECRET_LENGTH: usize = 16;

/// Alphabet every generated credential is drawn from
pub const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of bootstrap credentials
pub trait SecretGenerator: Send + Sync {
    /// Produce a new credential
    fn generate(&self) -> Result<String>;
}

/// Generator backed by a CSPRNG freshly seeded from the OS on every call
///
/// Produces [`SECRET_LENGTH`] characters drawn from [`ALPHANUMERIC`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSecretGenerator;

impl RandomSecretGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl SecretGenerator for RandomSecretGenerator {
    fn generate(&self) -> Result<String> {
        let mut rng =
            StdRng::try_from_os_rng().map_err(|e| CoreError::EntropyUnavailable(e.to_string()))?;

        Ok((0..SECRET_LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..ALPHANUMERIC.len());
                ALPHANUMERIC[idx] as char
            })
            .collect())
    }
}

/// Generator that always returns the same value
///
/// Useful for tests and for reproducible dry runs.
#[derive(Debug, Clone)]
pub struct FixedSecretGenerator {
    value: String,
}

impl FixedSecretGenerator {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl SecretGenerator for FixedSecretGenerator {
    fn generate(&self) -> Result<String> {
        Ok(self.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet() {
        assert_eq!(ALPHANUMERIC.len(), 62);
        assert!(ALPHANUMERIC.iter().all(u8::is_ascii_alphanumeric));
    }

    #[test]
    fn test_random_generator_shape() {
        let secret = RandomSecretGenerator::new().generate().unwrap();

        assert_eq!(secret.len(), SECRET_LENGTH);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_random_generator_calls_are_independent() {
        let generator = RandomSecretGenerator::new();

        let secret1 = generator.generate().unwrap();
        let secret2 = generator.generate().unwrap();

        assert_ne!(secret1, secret2);
    }

    #[test]
    fn test_fixed_generator() {
        let generator = FixedSecretGenerator::new("test");
        assert_eq!(generator.generate().unwrap(), "test");
        assert_eq!(generator.generate().unwrap(), "test");
    }
}
