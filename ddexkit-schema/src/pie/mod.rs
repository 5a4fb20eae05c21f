//! Party Identification and Enrichment packages.

pub mod v10;
