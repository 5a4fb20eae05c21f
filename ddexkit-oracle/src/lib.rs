//! # ddexkit Oracle
//!
//! Round-trip oracle for DDEX documents.
//!
//! This crate provides:
//! - Lock-step comparison of two element trees with normalized values
//! - Round-trip verification of a decode and encode pipeline
//! - Field coverage reports over element and attribute paths

pub mod comparison;
pub mod coverage;
pub mod oracle;

pub use comparison::{DomComparison, compare, compare_trees, normalize_value};
pub use coverage::{FieldCoverage, collect_paths, field_coverage};
pub use oracle::RoundTripOracle;
