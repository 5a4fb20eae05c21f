//! # ddexkit Bench
//!
//! Benchmarking utilities for ddexkit performance testing.

pub mod samples;

use ddexkit_registry::{Registry, Result};

/// Builds a registry holding every compiled-in package.
///
/// # Errors
/// Returns the registry build error, if any.
pub fn bench_registry() -> Result<Registry> {
    Registry::builder()
        .packages(ddexkit_schema::packages())
        .build()
}
