//! Valhook Core - Core types for release value hooks
//!
//! This crate provides the foundational types used by the hooks:
//! - `Values`: the release value tree, with path reads and shape-normalizing writes
//! - `Release`: the post-install release record
//! - `SecretGenerator`: bootstrap credential generation

pub mod error;
pub mod release;
pub mod secrets;
pub mod values;

pub use error::{CoreError, Result};
pub use release::Release;
pub use secrets::{
    ALPHANUMERIC, FixedSecretGenerator, RandomSecretGenerator, SECRET_LENGTH, SecretGenerator,
};
pub use values::{Values, nested, nested_string, parse_set_values, replace_scalar_with_map};
