//! Side-channel attribute map carried by root messages.

/// Namespace declarations and schema-instance attributes of a root element
/// that no typed field owns.
///
/// Keys take the forms `"xmlns"`, `"xmlns:prefix"`, `"xsi:localName"` or a
/// bare local name. Entries keep their insertion order, which for decoded
/// messages is the order they appeared on the source element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceAttrs {
    entries: Vec<(String, String)>,
}

impl NamespaceAttrs {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces an entry, returning the previous value.
    ///
    /// A replaced entry keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes an entry, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns a copy without the entries whose keys are in `shadowed`.
    #[must_use]
    pub fn without(&self, shadowed: &[&str]) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(k, _)| !shadowed.contains(&k.as_str()))
                .cloned()
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NamespaceAttrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (key, value) in iter {
            attrs.insert(key, value);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let mut attrs = NamespaceAttrs::new();
        attrs.insert("xmlns:ern", "http://ddex.net/xml/ern/432");
        attrs.insert("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance");
        attrs.insert("xsi:schemaLocation", "a b");

        let keys: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["xmlns:ern", "xmlns:xsi", "xsi:schemaLocation"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut attrs: NamespaceAttrs = [("xmlns", "urn:a"), ("xmlns:b", "urn:b")]
            .into_iter()
            .collect();
        assert_eq!(attrs.insert("xmlns", "urn:c"), Some("urn:a".to_string()));
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.iter().next(), Some(("xmlns", "urn:c")));
    }

    #[test]
    fn test_remove_and_without() {
        let mut attrs: NamespaceAttrs = [("xmlns", "urn:a"), ("xsi:schemaLocation", "x")]
            .into_iter()
            .collect();
        let filtered = attrs.without(&["xsi:schemaLocation"]);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.contains_key("xmlns"));

        assert_eq!(attrs.remove("xmlns"), Some("urn:a".to_string()));
        assert_eq!(attrs.remove("xmlns"), None);
        assert!(!attrs.is_empty());
    }
}
