//! Namespace resolution for schema families.
//!
//! The namespace of a family/version pair follows a fixed naming convention:
//! the family base URI followed by the version digits. Whether the schema
//! also imports the AVS side namespace is read from the schema file itself
//! when a schema directory is configured.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// AVS (allowed value sets) side namespace imported by some schemas.
pub const AVS_NAMESPACE: &str = "http://ddex.net/xml/avs/avs";

/// A known schema family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    /// Electronic Release Notification.
    Ern,
    /// Media Enrichment and Description.
    Mead,
    /// Party Identification and Enrichment.
    Pie,
}

impl Family {
    /// All known families.
    pub const ALL: [Family; 3] = [Family::Ern, Family::Mead, Family::Pie];

    /// Parses a family from its short name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ern" => Some(Self::Ern),
            "mead" => Some(Self::Mead),
            "pie" => Some(Self::Pie),
            _ => None,
        }
    }

    /// Returns the short name, which doubles as the namespace prefix.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ern => "ern",
            Self::Mead => "mead",
            Self::Pie => "pie",
        }
    }

    /// Returns the base URI that the version digits are appended to.
    #[must_use]
    pub const fn base_uri(&self) -> &'static str {
        match self {
            Self::Ern => "http://ddex.net/xml/ern/",
            Self::Mead => "http://ddex.net/xml/mead/",
            Self::Pie => "http://ddex.net/xml/pie/",
        }
    }

    /// Returns the main schema file name of the family.
    #[must_use]
    pub const fn schema_file(&self) -> &'static str {
        match self {
            Self::Ern => "release-notification.xsd",
            Self::Mead => "media-enrichment-and-description.xsd",
            Self::Pie => "party-identification-and-enrichment.xsd",
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strips a leading `v` and any separators from a version string.
///
/// `"4.3.2"`, `"v432"` and `"432"` all normalize to `"432"`.
#[must_use]
pub fn normalize_version(version: &str) -> String {
    let trimmed = version.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    trimmed
        .chars()
        .filter(|c| !matches!(c, '.' | '_' | '-'))
        .collect()
}

/// Namespace configuration of one family/version pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceInfo {
    /// Canonical namespace URI.
    pub namespace_uri: String,
    /// Short prefix conventionally bound to the namespace.
    pub namespace_prefix: String,
    /// Schema file the namespace is defined in.
    pub schema_file_ref: String,
    /// Whether the schema imports the AVS side namespace.
    pub imports_side_namespace: bool,
}

/// Derives [`NamespaceInfo`] values and memoizes them per pair.
///
/// Cloning is cheap and clones share the memo.
#[derive(Debug, Clone, Default)]
pub struct NamespaceResolver {
    xsd_root: Option<PathBuf>,
    cache: Arc<Mutex<HashMap<(Family, String), NamespaceInfo>>>,
}

impl NamespaceResolver {
    /// Creates a resolver without a schema directory.
    ///
    /// Side-namespace detection always yields `false`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver that inspects schema files under `xsd_root`.
    ///
    /// The file for ERN 4.3.2 is expected at
    /// `{xsd_root}/ernv432/release-notification.xsd`.
    #[must_use]
    pub fn with_xsd_root(xsd_root: impl Into<PathBuf>) -> Self {
        Self {
            xsd_root: Some(xsd_root.into()),
            cache: Arc::default(),
        }
    }

    /// Returns the configured schema directory.
    #[must_use]
    pub fn xsd_root(&self) -> Option<&Path> {
        self.xsd_root.as_deref()
    }

    /// Resolves a family name and version.
    ///
    /// Returns `None` if the family is not recognized.
    #[must_use]
    pub fn resolve_str(&self, family: &str, version: &str) -> Option<NamespaceInfo> {
        Family::parse(family).map(|family| self.resolve(family, version))
    }

    /// Resolves a known family and version.
    #[must_use]
    pub fn resolve(&self, family: Family, version: &str) -> NamespaceInfo {
        let version = normalize_version(version);
        let key = (family, version);

        if let Some(info) = self.cache.lock().get(&key) {
            return info.clone();
        }

        let (family, version) = key;
        let info = NamespaceInfo {
            namespace_uri: format!("{}{}", family.base_uri(), version),
            namespace_prefix: family.as_str().to_string(),
            schema_file_ref: family.schema_file().to_string(),
            imports_side_namespace: self.imports_side_namespace(family, &version),
        };

        self.cache.lock().insert((family, version), info.clone());
        info
    }

    /// Checks the schema file for an AVS import.
    ///
    /// A missing directory, missing file or unreadable file yields `false`.
    fn imports_side_namespace(&self, family: Family, version: &str) -> bool {
        let Some(root) = &self.xsd_root else {
            return false;
        };
        let path = root
            .join(format!("{}v{}", family.as_str(), version))
            .join(family.schema_file());

        match std::fs::read_to_string(&path) {
            Ok(content) => {
                content.contains(&format!("xmlns:avs=\"{AVS_NAMESPACE}\""))
                    || content.contains(&format!("namespace=\"{AVS_NAMESPACE}\""))
            }
            Err(e) => {
                tracing::trace!("No schema file at {}: {}", path.display(), e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_parse() {
        assert_eq!(Family::parse("ern"), Some(Family::Ern));
        assert_eq!(Family::parse("MEAD"), Some(Family::Mead));
        assert_eq!(Family::parse("pie"), Some(Family::Pie));
        assert_eq!(Family::parse("dsr"), None);
    }

    #[test]
    fn test_normalize_version() {
        assert_eq!(normalize_version("4.3.2"), "432");
        assert_eq!(normalize_version("v432"), "432");
        assert_eq!(normalize_version("383"), "383");
        assert_eq!(normalize_version(" 1.1 "), "11");
    }

    #[test]
    fn test_resolve_namespace() {
        let resolver = NamespaceResolver::new();
        let info = resolver.resolve(Family::Ern, "4.3.2");

        assert_eq!(info.namespace_uri, "http://ddex.net/xml/ern/432");
        assert_eq!(info.namespace_prefix, "ern");
        assert_eq!(info.schema_file_ref, "release-notification.xsd");
        assert!(!info.imports_side_namespace);
    }

    #[test]
    fn test_resolve_unknown_family() {
        let resolver = NamespaceResolver::new();
        assert!(resolver.resolve_str("ddex", "10").is_none());
        assert_eq!(
            resolver.resolve_str("pie", "10").unwrap().namespace_uri,
            "http://ddex.net/xml/pie/10"
        );
    }

    #[test]
    fn test_resolve_is_stable() {
        let resolver = NamespaceResolver::new();
        let first = resolver.resolve(Family::Mead, "11");
        let second = resolver.clone().resolve(Family::Mead, "v11");
        assert_eq!(first, second);
    }

    #[test]
    fn test_side_namespace_from_import() {
        let dir = tempfile::tempdir().unwrap();
        let schema_dir = dir.path().join("ernv432");
        std::fs::create_dir_all(&schema_dir).unwrap();
        std::fs::write(
            schema_dir.join("release-notification.xsd"),
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
  <xs:import namespace="http://ddex.net/xml/avs/avs" schemaLocation="avs.xsd"/>
</xs:schema>"#,
        )
        .unwrap();

        let resolver = NamespaceResolver::with_xsd_root(dir.path());
        assert!(resolver.resolve(Family::Ern, "432").imports_side_namespace);
        // no file for this version
        assert!(!resolver.resolve(Family::Ern, "383").imports_side_namespace);
    }

    #[test]
    fn test_side_namespace_from_declaration() {
        let dir = tempfile::tempdir().unwrap();
        let schema_dir = dir.path().join("meadv11");
        std::fs::create_dir_all(&schema_dir).unwrap();
        std::fs::write(
            schema_dir.join("media-enrichment-and-description.xsd"),
            r#"<xs:schema xmlns:avs="http://ddex.net/xml/avs/avs"/>"#,
        )
        .unwrap();

        let resolver = NamespaceResolver::with_xsd_root(dir.path());
        assert!(resolver.resolve(Family::Mead, "11").imports_side_namespace);
    }

    #[test]
    fn test_side_namespace_without_marker() {
        let dir = tempfile::tempdir().unwrap();
        let schema_dir = dir.path().join("piev10");
        std::fs::create_dir_all(&schema_dir).unwrap();
        std::fs::write(
            schema_dir.join("party-identification-and-enrichment.xsd"),
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"/>"#,
        )
        .unwrap();

        let resolver = NamespaceResolver::with_xsd_root(dir.path());
        assert!(!resolver.resolve(Family::Pie, "10").imports_side_namespace);
    }
}
