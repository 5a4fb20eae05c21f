//! The type registry and its builder.

use crate::error::{RegistryError, Result};
use crate::sniffer::NamespaceFallback;
use ddexkit_core::{
    EnumDescriptor, Family, Message, NamespaceInfo, NamespaceResolver, SchemaPackage, TypeHandle,
    normalize_version,
};
use std::collections::BTreeMap;

/// Names of the types that may be the outermost element of a document.
pub const ROOT_MESSAGES: &[&str] = &[
    "NewReleaseMessage",
    "PurgeReleaseMessage",
    "CatalogListMessage",
    "MeadMessage",
    "PieMessage",
    "PieRequestMessage",
];

/// What the registry knows about one root message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Local name of the root element.
    pub root_element: &'static str,
    /// Namespace URI resolved for the family and version.
    pub namespace: String,
    /// Handle used to construct and decode the type.
    pub handle: TypeHandle,
}

/// Builds the registry key `family/version/rootElement`.
#[must_use]
pub fn registry_key(family: &str, version: &str, root_element: &str) -> String {
    format!("{family}/{version}/{root_element}")
}

/// Canonical family name, or the input lowercased if the family is unknown.
fn canonical_family(family: &str) -> String {
    match Family::parse(family) {
        Some(family) => family.as_str().to_string(),
        None => family.to_ascii_lowercase(),
    }
}

/// Immutable mapping from `family/version/rootElement` to type descriptors.
///
/// Built once with [`RegistryBuilder`] and shared by reference afterwards.
/// Keys are kept in lexicographic order.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: BTreeMap<String, TypeDescriptor>,
    enums: Vec<EnumDescriptor>,
    resolver: NamespaceResolver,
    fallback: NamespaceFallback,
}

impl Registry {
    /// Returns a builder with no packages.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Returns the handle of the first root message registered for a pair.
    ///
    /// When several root messages share the pair, the lexicographically
    /// smallest root element name wins.
    ///
    /// # Errors
    /// Returns `RegistryError::NotRegistered` if no entry has the pair.
    pub fn lookup(&self, family: &str, version: &str) -> Result<TypeHandle> {
        self.entries_for(family, version)
            .next()
            .map(|(_, descriptor)| descriptor.handle)
            .ok_or_else(|| RegistryError::not_registered(family, version))
    }

    /// Returns the handle registered under the exact triple.
    ///
    /// # Errors
    /// Returns `RegistryError::UnknownMessage` if the triple is absent.
    pub fn lookup_by_root_element(
        &self,
        family: &str,
        version: &str,
        root_element: &str,
    ) -> Result<TypeHandle> {
        self.descriptor(family, version, root_element)
            .map(|descriptor| descriptor.handle)
            .ok_or_else(|| RegistryError::UnknownMessage {
                family: family.to_string(),
                version: version.to_string(),
                root_element: root_element.to_string(),
            })
    }

    /// Returns the descriptor registered under the exact triple.
    #[must_use]
    pub fn descriptor(
        &self,
        family: &str,
        version: &str,
        root_element: &str,
    ) -> Option<&TypeDescriptor> {
        let key = registry_key(
            &canonical_family(family),
            &normalize_version(version),
            root_element,
        );
        self.entries.get(&key)
    }

    /// Returns true if any root message is registered for the pair.
    #[must_use]
    pub fn is_registered(&self, family: &str, version: &str) -> bool {
        self.entries_for(family, version).next().is_some()
    }

    /// Returns every registry key, in lexicographic order.
    #[must_use]
    pub fn list_registered(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Iterates over every key and descriptor, in lexicographic key order.
    pub fn registered_types(&self) -> impl Iterator<Item = (&str, &TypeDescriptor)> {
        self.entries.iter().map(|(key, descriptor)| (key.as_str(), descriptor))
    }

    /// Constructs the zero value of the message [`lookup`](Self::lookup) selects.
    ///
    /// # Errors
    /// Returns `RegistryError::NotRegistered` if no entry has the pair.
    pub fn new_message(&self, family: &str, version: &str) -> Result<Box<dyn Message>> {
        self.lookup(family, version).map(|handle| handle.instantiate())
    }

    /// Constructs the zero value of the message registered under a triple.
    ///
    /// # Errors
    /// Returns `RegistryError::UnknownMessage` if the triple is absent.
    pub fn new_message_by_root(
        &self,
        family: &str,
        version: &str,
        root_element: &str,
    ) -> Result<Box<dyn Message>> {
        self.lookup_by_root_element(family, version, root_element)
            .map(|handle| handle.instantiate())
    }

    /// Resolves the namespace configuration of a pair.
    ///
    /// # Errors
    /// Returns `RegistryError::UnknownFamily` for a family outside the known set.
    pub fn namespace_info(&self, family: &str, version: &str) -> Result<NamespaceInfo> {
        self.resolver
            .resolve_str(family, version)
            .ok_or_else(|| RegistryError::UnknownFamily {
                family: family.to_string(),
            })
    }

    /// Enumerations exported by the registered packages.
    #[must_use]
    pub fn enumerations(&self) -> &[EnumDescriptor] {
        &self.enums
    }

    /// Namespace fallback used by detection.
    #[must_use]
    pub const fn fallback(&self) -> NamespaceFallback {
        self.fallback
    }

    /// Number of registered root messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries whose key starts with `family/version/`.
    fn entries_for(
        &self,
        family: &str,
        version: &str,
    ) -> impl Iterator<Item = (&String, &TypeDescriptor)> {
        let prefix = format!(
            "{}/{}/",
            canonical_family(family),
            normalize_version(version)
        );
        self.entries
            .range(prefix.clone()..)
            .take_while(move |(key, _)| key.starts_with(&prefix))
    }
}

/// Builder for configuring and creating a [`Registry`].
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    resolver: NamespaceResolver,
    packages: Vec<SchemaPackage>,
    root_messages: Vec<String>,
    fallback: NamespaceFallback,
}

impl RegistryBuilder {
    /// Creates a builder with the default resolver and root-message list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resolver: NamespaceResolver::new(),
            packages: Vec::new(),
            root_messages: ROOT_MESSAGES.iter().map(|name| name.to_string()).collect(),
            fallback: NamespaceFallback::default(),
        }
    }

    /// Sets the namespace resolver.
    #[must_use]
    pub fn resolver(mut self, resolver: NamespaceResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Adds a schema package.
    #[must_use]
    pub fn package(mut self, package: SchemaPackage) -> Self {
        self.packages.push(package);
        self
    }

    /// Adds several schema packages.
    #[must_use]
    pub fn packages(mut self, packages: impl IntoIterator<Item = SchemaPackage>) -> Self {
        self.packages.extend(packages);
        self
    }

    /// Replaces the list of type names accepted as root messages.
    #[must_use]
    pub fn root_messages<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.root_messages = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the namespace fallback used by detection.
    #[must_use]
    pub fn fallback(mut self, fallback: NamespaceFallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Builds the registry.
    ///
    /// # Errors
    /// Returns `RegistryError::NamespaceMismatch` if a type declares a
    /// namespace other than the one resolved for its package.
    pub fn build(self) -> Result<Registry> {
        let mut entries = BTreeMap::new();
        let mut enums = Vec::new();

        for package in &self.packages {
            let version = normalize_version(package.version);
            let info = self.resolver.resolve(package.family, &version);

            for ty in &package.types {
                if !self.root_messages.iter().any(|name| name == ty.name) {
                    tracing::trace!(
                        "Skipping {} in {}/{}: not a root message",
                        ty.name,
                        package.family,
                        version
                    );
                    continue;
                }

                let key = registry_key(package.family.as_str(), &version, ty.handle.root_element());
                if ty.handle.namespace() != info.namespace_uri {
                    return Err(RegistryError::NamespaceMismatch {
                        key,
                        expected: info.namespace_uri.clone(),
                        declared: ty.handle.namespace().to_string(),
                    });
                }

                tracing::debug!("Registered {} as {}", key, ty.handle.type_name());
                let descriptor = TypeDescriptor {
                    root_element: ty.handle.root_element(),
                    namespace: info.namespace_uri.clone(),
                    handle: ty.handle,
                };
                if entries.insert(key.clone(), descriptor).is_some() {
                    tracing::warn!("Duplicate registration for {}, keeping the last", key);
                }
            }

            enums.extend(package.enums.iter().copied());
        }

        tracing::info!(
            "Type registry built with {} root messages from {} packages",
            entries.len(),
            self.packages.len()
        );

        Ok(Registry {
            entries,
            enums,
            resolver: self.resolver,
            fallback: self.fallback,
        })
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddexkit_schema::{ern, mead, packages, pie};

    fn registry() -> Registry {
        Registry::builder().packages(packages()).build().unwrap()
    }

    #[test]
    fn test_build_registers_all_roots() {
        let registry = registry();
        assert_eq!(registry.len(), 10);
        assert_eq!(
            registry.list_registered(),
            [
                "ern/383/CatalogListMessage",
                "ern/383/NewReleaseMessage",
                "ern/383/PurgeReleaseMessage",
                "ern/43/NewReleaseMessage",
                "ern/43/PurgeReleaseMessage",
                "ern/432/NewReleaseMessage",
                "ern/432/PurgeReleaseMessage",
                "mead/11/MeadMessage",
                "pie/10/PieMessage",
                "pie/10/PieRequestMessage",
            ]
        );
    }

    #[test]
    fn test_lookup_is_deterministic() {
        let registry = registry();
        let handle = registry.lookup("ern", "383").unwrap();
        assert_eq!(handle.root_element(), "CatalogListMessage");

        let handle = registry.lookup("pie", "1.0").unwrap();
        assert_eq!(handle, TypeHandle::of::<pie::v10::PieMessage>());
    }

    #[test]
    fn test_lookup_unregistered_version() {
        let registry = registry();
        let err = registry.lookup("ern", "999").unwrap_err();
        assert!(matches!(
            err,
            RegistryError::NotRegistered { ref family, ref version } if family == "ern" && version == "999"
        ));
        assert!(!registry.is_registered("ern", "999"));
        assert!(registry.new_message("ern", "999").is_err());
    }

    #[test]
    fn test_lookup_by_root_element() {
        let registry = registry();
        let handle = registry
            .lookup_by_root_element("ern", "4.3.2", "PurgeReleaseMessage")
            .unwrap();
        assert_eq!(handle, TypeHandle::of::<ern::v432::PurgeReleaseMessage>());

        let err = registry
            .lookup_by_root_element("ern", "432", "CatalogListMessage")
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownMessage { .. }));
    }

    #[test]
    fn test_prefix_does_not_match_longer_version() {
        // "ern/43/" must not select "ern/432/..."
        let registry = Registry::builder()
            .package(ern::v432::package())
            .build()
            .unwrap();
        assert!(!registry.is_registered("ern", "43"));
        assert!(registry.is_registered("ERN", "432"));
    }

    #[test]
    fn test_new_message_by_root() {
        let registry = registry();
        let message = registry
            .new_message_by_root("mead", "11", "MeadMessage")
            .unwrap();
        let mead = message.downcast_ref::<mead::v11::MeadMessage>().unwrap();
        assert_eq!(*mead, mead::v11::MeadMessage::default());
        assert!(message.side_channel().is_none());
    }

    #[test]
    fn test_root_message_allow_list() {
        let registry = Registry::builder()
            .packages(packages())
            .root_messages(["MeadMessage"])
            .build()
            .unwrap();
        assert_eq!(registry.list_registered(), ["mead/11/MeadMessage"]);
        // enumerations are collected whatever the allow-list
        assert!(registry.enumerations().iter().any(|e| e.name == "MoodType"));
    }

    #[derive(Debug, Clone, Default, PartialEq, ddexkit_derive::XmlMessage)]
    #[xml(root = "PurgeReleaseMessage", namespace = ern::v432::NAMESPACE)]
    struct PurgeReleaseDraft {
        #[xml(namespace_attrs)]
        namespace_attrs: Option<ddexkit_core::NamespaceAttrs>,
    }

    fn draft_package() -> SchemaPackage {
        SchemaPackage::new(ddexkit_core::Family::Ern, "432", ern::v432::NAMESPACE)
            .with_type::<PurgeReleaseDraft>()
    }

    #[test]
    fn test_allow_list_matches_type_names() {
        assert_eq!(draft_package().types[0].name, "PurgeReleaseDraft");

        let registry = Registry::builder().package(draft_package()).build().unwrap();
        assert!(registry.is_empty());

        let registry = Registry::builder()
            .package(draft_package())
            .root_messages(["PurgeReleaseDraft"])
            .build()
            .unwrap();
        assert_eq!(registry.list_registered(), ["ern/432/PurgeReleaseMessage"]);
    }

    #[test]
    fn test_namespace_mismatch() {
        let mut package = ern::v43::package();
        package.version = "432";
        let err = Registry::builder().package(package).build().unwrap_err();
        assert!(matches!(err, RegistryError::NamespaceMismatch { .. }));
    }

    #[test]
    fn test_namespace_info() {
        let registry = registry();
        let info = registry.namespace_info("mead", "11").unwrap();
        assert_eq!(info.namespace_uri, mead::v11::NAMESPACE);
        assert!(matches!(
            registry.namespace_info("dsr", "30"),
            Err(RegistryError::UnknownFamily { .. })
        ));
    }

    #[test]
    fn test_registered_types_snapshot() {
        let registry = registry();
        let (key, descriptor) = registry.registered_types().last().unwrap();
        assert_eq!(key, "pie/10/PieRequestMessage");
        assert_eq!(descriptor.root_element, "PieRequestMessage");
        assert_eq!(descriptor.namespace, pie::v10::NAMESPACE);
    }
}
