//! Valhook Kube - Cluster lookups and release value hooks
//!
//! This crate provides:
//! - **Lookups**: fetch single cluster objects of any kind, with "not found"
//!   kept apart from real failures
//! - **Pre-install hooks**: routing domain discovery and credential bootstrap
//! - **Post-install hooks**: reconcile release values with the deployed
//!   database secret

pub mod error;
pub mod hooks;
pub mod lookup;

pub use error::{KubeError, Result};
pub use hooks::{
    CredentialBootstrapHook, CredentialPair, CredentialReconcileHook, HookOutcome,
    RouterDomainHook, SkipReason, postgresql_secret_name,
};
pub use lookup::{ClusterLookup, MockLookup, ResourceLookup, ResourceRef};
