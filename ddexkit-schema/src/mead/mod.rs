//! Media Enrichment and Description packages.

pub mod v11;
