//! Structural comparison of two element trees.

use ddexkit_core::{XSI_NAMESPACE, XmlAttribute, XmlElement};
use std::collections::HashMap;

/// Maximum number of items listed per category by [`DomComparison::log_summary`].
const LOG_LIMIT: usize = 10;

/// Result of comparing an original document with its round-tripped form.
///
/// Mismatches are data, never errors. Paths look like
/// `/NewReleaseMessage/ReleaseList/Release[2]/ReleaseId` with attributes
/// appended as `@Name`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomComparison {
    /// Elements in the whole original tree.
    pub original_elements: usize,
    /// Elements in the whole round-tripped tree.
    pub round_tripped_elements: usize,
    /// Attributes in the whole original tree, declarations included.
    pub original_attributes: usize,
    /// Attributes in the whole round-tripped tree, declarations included.
    pub round_tripped_attributes: usize,
    /// Elements present in the original but not in the output.
    pub missing_elements: Vec<String>,
    /// Attributes present in the original but not in the output.
    pub missing_attributes: Vec<String>,
    /// Attribute values and leaf texts that differ after normalization.
    pub value_mismatches: Vec<String>,
    /// Elements only present in the output. Reported, never a failure.
    pub extra_elements: Vec<String>,
    /// Whether the output could be parsed and decoded again.
    pub round_tripped_parseable: bool,
    /// Overall verdict.
    pub success: bool,
    /// Failure of the pipeline or of parsing, if any.
    pub pipeline_error: Option<String>,
}

impl DomComparison {
    fn failed(error: String, round_tripped_parseable: bool) -> Self {
        Self {
            round_tripped_parseable,
            success: false,
            pipeline_error: Some(error),
            ..Self::default()
        }
    }

    /// Marks the comparison as failed because of a pipeline or parse error.
    pub fn record_failure(&mut self, error: impl Into<String>) {
        self.pipeline_error = Some(error.into());
        self.success = false;
    }

    /// Recomputes [`success`](Self::success) from the collected tallies.
    pub fn finish(&mut self) {
        self.success = self.missing_elements.is_empty()
            && self.missing_attributes.is_empty()
            && self.value_mismatches.is_empty()
            && self.round_tripped_parseable
            && self.pipeline_error.is_none();
    }

    /// Returns true if both trees hold the same number of elements.
    #[must_use]
    pub fn elements_balanced(&self) -> bool {
        self.original_elements == self.round_tripped_elements
    }

    /// Returns true if the output carries at least as many attributes.
    #[must_use]
    pub fn attributes_preserved(&self) -> bool {
        self.round_tripped_attributes >= self.original_attributes
    }

    /// Emits the tallies and the first items of each category.
    pub fn log_summary(&self) {
        tracing::info!(
            "Elements: original={}, round-tripped={}",
            self.original_elements,
            self.round_tripped_elements
        );
        tracing::info!(
            "Attributes: original={}, round-tripped={}",
            self.original_attributes,
            self.round_tripped_attributes
        );

        if let Some(error) = &self.pipeline_error {
            tracing::warn!("Round-trip failed: {}", error);
        }
        if !self.round_tripped_parseable {
            tracing::warn!("Round-tripped document cannot be parsed back");
        }

        log_items("Missing element", &self.missing_elements);
        log_items("Missing attribute", &self.missing_attributes);
        log_items("Value mismatch", &self.value_mismatches);

        if !self.extra_elements.is_empty() {
            tracing::info!(
                "{} extra elements in round-tripped output",
                self.extra_elements.len()
            );
        }
    }
}

fn log_items(label: &str, items: &[String]) {
    for item in items.iter().take(LOG_LIMIT) {
        tracing::warn!("{}: {}", label, item);
    }
    if items.len() > LOG_LIMIT {
        tracing::warn!("{}: ... and {} more", label, items.len() - LOG_LIMIT);
    }
}

/// Parses and compares two documents.
///
/// A document that fails to parse yields an unsuccessful comparison with
/// [`DomComparison::pipeline_error`] set.
#[must_use]
pub fn compare(original: &[u8], round_tripped: &[u8]) -> DomComparison {
    let original = match XmlElement::parse(original) {
        Ok(root) => root,
        Err(e) => return DomComparison::failed(format!("original document: {e}"), true),
    };
    let round_tripped = match XmlElement::parse(round_tripped) {
        Ok(root) => root,
        Err(e) => return DomComparison::failed(format!("round-tripped document: {e}"), false),
    };
    compare_trees(&original, &round_tripped)
}

/// Compares two parsed trees.
#[must_use]
pub fn compare_trees(original: &XmlElement, round_tripped: &XmlElement) -> DomComparison {
    let mut comparison = DomComparison {
        original_elements: original.count_elements(),
        round_tripped_elements: round_tripped.count_elements(),
        original_attributes: count_attributes(original),
        round_tripped_attributes: count_attributes(round_tripped),
        round_tripped_parseable: true,
        ..DomComparison::default()
    };

    let path = format!("/{}", original.name);
    if original.name == round_tripped.name {
        walk(Some(original), Some(round_tripped), &path, &mut comparison);
    } else {
        comparison.missing_elements.push(path);
        comparison
            .extra_elements
            .push(format!("/{}", round_tripped.name));
    }
    comparison.finish();
    comparison
}

/// Trims, unifies line endings and collapses whitespace runs.
#[must_use]
pub fn normalize_value(value: &str) -> String {
    value
        .replace("\r\n", "\n")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Key an attribute is compared under, or `None` for namespace declarations.
///
/// Schema-instance attributes are keyed by the `xsi` prefix whatever prefix
/// the document used.
pub(crate) fn attribute_key(attr: &XmlAttribute) -> Option<String> {
    let key = if attr.namespace.as_deref() == Some(XSI_NAMESPACE) {
        format!("xsi:{}", attr.name)
    } else {
        attr.qualified_name()
    };
    (!key.starts_with("xmlns")).then_some(key)
}

fn count_attributes(element: &XmlElement) -> usize {
    element.attributes.len()
        + element
            .children
            .iter()
            .map(count_attributes)
            .sum::<usize>()
}

/// Groups children by local name, keeping first-appearance order.
fn group_children(element: &XmlElement) -> Vec<(&str, Vec<&XmlElement>)> {
    let mut groups: Vec<(&str, Vec<&XmlElement>)> = Vec::new();
    for child in &element.children {
        match groups.iter_mut().find(|(name, _)| *name == child.name) {
            Some((_, members)) => members.push(child),
            None => groups.push((child.name.as_str(), vec![child])),
        }
    }
    groups
}

fn group_members<'a, 'g>(
    groups: &'g [(&str, Vec<&'a XmlElement>)],
    name: &str,
) -> &'g [&'a XmlElement] {
    groups
        .iter()
        .find(|(group, _)| *group == name)
        .map(|(_, members)| members.as_slice())
        .unwrap_or_default()
}

fn walk(
    original: Option<&XmlElement>,
    round_tripped: Option<&XmlElement>,
    path: &str,
    comparison: &mut DomComparison,
) {
    let (original, round_tripped) = match (original, round_tripped) {
        (Some(original), Some(round_tripped)) => (original, round_tripped),
        (Some(_), None) => {
            comparison.missing_elements.push(path.to_string());
            return;
        }
        (None, Some(_)) => {
            comparison.extra_elements.push(path.to_string());
            return;
        }
        (None, None) => return,
    };

    compare_attributes(original, round_tripped, path, comparison);

    if original.children.is_empty() && round_tripped.children.is_empty() {
        let expected = normalize_value(&original.text);
        let actual = normalize_value(&round_tripped.text);
        if !expected.is_empty() && expected != actual {
            comparison
                .value_mismatches
                .push(format!("{path}: '{expected}' != '{actual}'"));
        }
    }

    let original_groups = group_children(original);
    let round_tripped_groups = group_children(round_tripped);

    let mut names: Vec<&str> = original_groups.iter().map(|(name, _)| *name).collect();
    for (name, _) in &round_tripped_groups {
        if !names.contains(name) {
            names.push(*name);
        }
    }

    for name in names {
        let left = group_members(&original_groups, name);
        let right = group_members(&round_tripped_groups, name);
        for index in 0..left.len().max(right.len()) {
            let child_path = if index == 0 {
                format!("{path}/{name}")
            } else {
                format!("{path}/{name}[{}]", index + 1)
            };
            walk(
                left.get(index).copied(),
                right.get(index).copied(),
                &child_path,
                comparison,
            );
        }
    }
}

fn compare_attributes(
    original: &XmlElement,
    round_tripped: &XmlElement,
    path: &str,
    comparison: &mut DomComparison,
) {
    let produced: HashMap<String, &str> = round_tripped
        .attributes
        .iter()
        .filter_map(|attr| attribute_key(attr).map(|key| (key, attr.value.as_str())))
        .collect();

    for attr in &original.attributes {
        let Some(key) = attribute_key(attr) else {
            continue;
        };
        match produced.get(&key) {
            None => comparison.missing_attributes.push(format!("{path}@{key}")),
            Some(value) if normalize_value(&attr.value) != normalize_value(value) => {
                comparison.value_mismatches.push(format!(
                    "{path}@{key}: '{}' != '{}'",
                    attr.value, value
                ));
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGINAL: &str = r#"<ern:NewReleaseMessage xmlns:ern="http://ddex.net/xml/ern/432"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xsi:schemaLocation="http://ddex.net/xml/ern/432 release.xsd">
  <MessageHeader>
    <MessageId>MSG-1</MessageId>
  </MessageHeader>
  <ReleaseList>
    <Release IsMainRelease="true"><ReleaseReference>R0</ReleaseReference></Release>
    <Release><ReleaseReference>R1</ReleaseReference></Release>
  </ReleaseList>
</ern:NewReleaseMessage>"#;

    #[test]
    fn test_normalize_value() {
        assert_eq!(normalize_value("  a \r\n  b\t c  "), "a b c");
        assert_eq!(normalize_value("\n \n"), "");
    }

    #[test]
    fn test_identical_documents() {
        let comparison = compare(ORIGINAL.as_bytes(), ORIGINAL.as_bytes());
        assert!(comparison.success);
        assert!(comparison.elements_balanced());
        assert!(comparison.attributes_preserved());
        assert_eq!(comparison.original_elements, 8);
        assert_eq!(comparison.original_attributes, 4);
        assert!(comparison.pipeline_error.is_none());
    }

    #[test]
    fn test_formatting_is_not_a_mismatch() {
        let reformatted = r#"<NewReleaseMessage xmlns="http://ddex.net/xml/ern/432" xmlns:x="http://www.w3.org/2001/XMLSchema-instance" x:schemaLocation="http://ddex.net/xml/ern/432   release.xsd"><MessageHeader><MessageId> MSG-1 </MessageId></MessageHeader><ReleaseList><Release IsMainRelease="true"><ReleaseReference>R0</ReleaseReference></Release><Release><ReleaseReference>R1</ReleaseReference></Release></ReleaseList></NewReleaseMessage>"#;
        let comparison = compare(ORIGINAL.as_bytes(), reformatted.as_bytes());
        assert!(comparison.success, "{comparison:?}");
        assert!(comparison.extra_elements.is_empty());
    }

    #[test]
    fn test_missing_and_mismatched() {
        let lossy = r#"<NewReleaseMessage xmlns="http://ddex.net/xml/ern/432">
  <MessageHeader><MessageId>MSG-2</MessageId></MessageHeader>
  <ReleaseList>
    <Release><ReleaseReference>R0</ReleaseReference></Release>
  </ReleaseList>
</NewReleaseMessage>"#;
        let comparison = compare(ORIGINAL.as_bytes(), lossy.as_bytes());

        assert!(!comparison.success);
        assert_eq!(
            comparison.missing_attributes,
            [
                "/NewReleaseMessage@xsi:schemaLocation",
                "/NewReleaseMessage/ReleaseList/Release@IsMainRelease",
            ]
        );
        assert_eq!(
            comparison.value_mismatches,
            ["/NewReleaseMessage/MessageHeader/MessageId: 'MSG-1' != 'MSG-2'"]
        );
        assert_eq!(
            comparison.missing_elements,
            ["/NewReleaseMessage/ReleaseList/Release[2]"]
        );
        assert!(!comparison.elements_balanced());
    }

    #[test]
    fn test_extra_elements_do_not_fail() {
        let original = "<Root><A>1</A></Root>";
        let enriched = "<Root><A>1</A><B>default</B><A>2</A></Root>";
        let comparison = compare(original.as_bytes(), enriched.as_bytes());

        assert!(comparison.success);
        assert_eq!(comparison.extra_elements, ["/Root/A[2]", "/Root/B"]);
    }

    #[test]
    fn test_renamed_root_is_missing() {
        let comparison = compare(b"<A><X>1</X></A>", b"<B><X>1</X></B>");

        assert!(!comparison.success);
        assert_eq!(comparison.missing_elements, ["/A"]);
        assert_eq!(comparison.extra_elements, ["/B"]);
        assert!(comparison.value_mismatches.is_empty());
    }

    #[test]
    fn test_root_prefix_change_is_not_a_rename() {
        let comparison = compare(
            b"<ern:A xmlns:ern=\"urn:a\"><X>1</X></ern:A>",
            b"<A xmlns=\"urn:a\"><X>1</X></A>",
        );
        assert!(comparison.success, "{comparison:?}");
    }

    #[test]
    fn test_empty_original_text_is_not_compared() {
        let comparison = compare(b"<Root><A/></Root>", b"<Root><A>filled</A></Root>");
        assert!(comparison.success);
        assert!(comparison.value_mismatches.is_empty());
    }

    #[test]
    fn test_unparseable_documents() {
        let comparison = compare(b"<Root>", b"<Root/>");
        assert!(!comparison.success);
        assert!(comparison.round_tripped_parseable);
        assert!(comparison.pipeline_error.unwrap().starts_with("original document"));

        let comparison = compare(b"<Root/>", b"<Root><A></Root>");
        assert!(!comparison.success);
        assert!(!comparison.round_tripped_parseable);
    }
}
