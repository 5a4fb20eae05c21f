//! Round-trip verification driven by a decode and encode pipeline.

use crate::comparison::{DomComparison, compare_trees};
use ddexkit_core::XmlElement;
use std::fmt::Display;

/// Verifies that a pipeline reproduces its input without loss.
///
/// The pipeline takes document bytes and returns the re-encoded bytes, typically
/// detect, decode and encode in sequence.
///
/// ```ignore
/// let oracle = RoundTripOracle::new(|xml: &[u8]| ddexkit::round_trip(&registry, xml));
/// let comparison = oracle.verify(document);
/// assert!(comparison.success);
/// ```
pub struct RoundTripOracle<F> {
    pipeline: F,
}

impl<F, E> RoundTripOracle<F>
where
    F: Fn(&[u8]) -> Result<Vec<u8>, E>,
    E: Display,
{
    /// Wraps a pipeline.
    pub fn new(pipeline: F) -> Self {
        Self { pipeline }
    }

    /// Runs the pipeline on `original` and compares the output with it.
    ///
    /// The output is fed through the pipeline once more; a failure there
    /// clears [`DomComparison::round_tripped_parseable`].
    pub fn verify(&self, original: &[u8]) -> DomComparison {
        let mut comparison = DomComparison::default();

        let original_tree = match XmlElement::parse(original) {
            Ok(tree) => tree,
            Err(e) => {
                comparison.round_tripped_parseable = true;
                comparison.record_failure(format!("original document: {e}"));
                return comparison;
            }
        };

        let output = match (self.pipeline)(original) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("Round-trip pipeline failed: {}", e);
                comparison.round_tripped_parseable = true;
                comparison.record_failure(e.to_string());
                return comparison;
            }
        };

        let output_tree = match XmlElement::parse(&output) {
            Ok(tree) => tree,
            Err(e) => {
                comparison.record_failure(format!("round-tripped document: {e}"));
                return comparison;
            }
        };

        comparison = compare_trees(&original_tree, &output_tree);

        if let Err(e) = (self.pipeline)(&output) {
            tracing::warn!("Failed to parse round-tripped document back: {}", e);
            comparison.round_tripped_parseable = false;
        }
        comparison.finish();
        comparison
    }
}

impl<F> std::fmt::Debug for RoundTripOracle<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundTripOracle").finish_non_exhaustive()
    }
}
