//! Path-level field coverage.

use crate::comparison::attribute_key;
use ddexkit_core::XmlElement;
use std::collections::BTreeSet;

const UNCOVERED_LIMIT: usize = 20;

/// How many element and attribute paths of a document survived a round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCoverage {
    /// Distinct paths in the original.
    pub total: usize,
    /// Distinct original paths also present in the output.
    pub preserved: usize,
    /// `preserved / total` as a percentage, 100 for an empty original.
    pub percentage: f64,
    /// The first uncovered paths, in sorted order.
    pub uncovered: Vec<String>,
    /// Number of uncovered paths, including those not listed.
    pub uncovered_count: usize,
}

impl FieldCoverage {
    /// Returns true if every path was preserved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.preserved == self.total
    }

    /// Emits the coverage percentage and the first uncovered paths.
    pub fn log_summary(&self) {
        tracing::info!(
            "Field coverage: {}/{} paths ({:.1}%)",
            self.preserved,
            self.total,
            self.percentage
        );
        for path in &self.uncovered {
            tracing::warn!("Uncovered path: {}", path);
        }
        if self.uncovered_count > self.uncovered.len() {
            tracing::warn!(
                "... and {} more",
                self.uncovered_count - self.uncovered.len()
            );
        }
    }
}

/// Collects every element path and non-namespace attribute path of a tree.
///
/// Element paths are `/Root/Child`, attribute paths `/Root/Child@Name`.
/// Repeated siblings share a path.
#[must_use]
pub fn collect_paths(root: &XmlElement) -> Vec<String> {
    let mut paths = Vec::new();
    collect_into(root, "", &mut paths);
    paths
}

fn collect_into(element: &XmlElement, parent: &str, paths: &mut Vec<String>) {
    let path = format!("{parent}/{}", element.name);
    paths.push(path.clone());
    paths.extend(
        element
            .attributes
            .iter()
            .filter_map(attribute_key)
            .map(|key| format!("{path}@{key}")),
    );
    for child in &element.children {
        collect_into(child, &path, paths);
    }
}

/// Compares the distinct paths of two trees.
#[must_use]
pub fn field_coverage(original: &XmlElement, round_tripped: &XmlElement) -> FieldCoverage {
    let original_paths: BTreeSet<String> = collect_paths(original).into_iter().collect();
    let produced: BTreeSet<String> = collect_paths(round_tripped).into_iter().collect();

    let uncovered: Vec<&String> = original_paths.difference(&produced).collect();
    let total = original_paths.len();
    let preserved = total - uncovered.len();
    let percentage = if total == 0 {
        100.0
    } else {
        preserved as f64 / total as f64 * 100.0
    };

    FieldCoverage {
        total,
        preserved,
        percentage,
        uncovered_count: uncovered.len(),
        uncovered: uncovered
            .into_iter()
            .take(UNCOVERED_LIMIT)
            .cloned()
            .collect(),
    }
}
