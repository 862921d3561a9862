//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Values error - values file or --set override could not be parsed
pub const VALUES_ERROR: i32 = 2;

/// Cluster error - a lookup against the Kubernetes API failed
pub const CLUSTER_ERROR: i32 = 3;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;
