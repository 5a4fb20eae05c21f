//! Document detection and dispatch.

use crate::error::{RegistryError, Result};
use crate::registry::{Registry, registry_key};
use ddexkit_core::{Message, WriteOptions, XmlElement};
use std::fmt;

/// How the namespace is chosen when the root element has none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamespaceFallback {
    /// Take the first `xmlns` or `xmlns:*` declaration on the root.
    FirstDeclaration,
    /// Try the default `xmlns` declaration first, then prefixed ones in order.
    #[default]
    PreferDefault,
}

/// The schema identity of a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DetectedMessage {
    /// Family name, e.g. `ern`.
    pub family: String,
    /// Normalized version, e.g. `432`.
    pub version: String,
    /// Local name of the root element.
    pub root_element: String,
}

impl DetectedMessage {
    /// Returns the registry key `family/version/rootElement`.
    #[must_use]
    pub fn key(&self) -> String {
        registry_key(&self.family, &self.version, &self.root_element)
    }
}

impl fmt::Display for DetectedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.family, self.version, self.root_element)
    }
}

impl Registry {
    /// Identifies a document from its first start tag.
    ///
    /// Only the root start tag is read.
    ///
    /// # Errors
    /// Returns `RegistryError::MalformedXml` if no start tag can be read and
    /// `RegistryError::UnrecognizedDocument` if no entry matches.
    pub fn detect(&self, xml: &[u8]) -> Result<DetectedMessage> {
        let root = XmlElement::peek_root(xml).map_err(RegistryError::MalformedXml)?;
        let candidates = self.namespace_candidates(&root);

        for namespace in &candidates {
            let matched = self.registered_types().find(|(_, descriptor)| {
                descriptor.root_element == root.name && descriptor.namespace == *namespace
            });
            if let Some((key, _)) = matched {
                let detected = split_key(key);
                tracing::debug!("Detected {}", detected);
                return Ok(detected);
            }
        }

        Err(RegistryError::UnrecognizedDocument {
            root_element: root.name,
            namespace: candidates.into_iter().next().unwrap_or_default(),
        })
    }

    /// Detects a document and decodes it into the matching type.
    ///
    /// # Errors
    /// Returns any detection error, `RegistryError::MalformedXml` if the body
    /// is not well-formed, or `RegistryError::Decode`.
    pub fn parse_any(&self, xml: &[u8]) -> Result<(Box<dyn Message>, DetectedMessage)> {
        let detected = self.detect(xml)?;
        let handle = self.lookup_by_root_element(
            &detected.family,
            &detected.version,
            &detected.root_element,
        )?;
        let message = handle
            .decode(xml)
            .map_err(|e| RegistryError::decode(detected.key(), e))?;
        Ok((message, detected))
    }

    /// Decodes a document into the type [`lookup`](Self::lookup) selects.
    ///
    /// Detection is skipped, so for a family with several root messages the
    /// document must be the one `lookup` returns.
    ///
    /// # Errors
    /// Returns `RegistryError::NotRegistered`, `RegistryError::MalformedXml` or
    /// `RegistryError::Decode`.
    pub fn parse_known(&self, xml: &[u8], family: &str, version: &str) -> Result<Box<dyn Message>> {
        let handle = self.lookup(family, version)?;
        handle.decode(xml).map_err(|e| {
            RegistryError::decode(format!("{family}/{version}/{}", handle.root_element()), e)
        })
    }

    /// Encodes a message as a complete document.
    ///
    /// # Errors
    /// Returns `RegistryError::Encode` if writing fails.
    pub fn encode(&self, message: &dyn Message, options: &WriteOptions) -> Result<Vec<u8>> {
        ddexkit_core::encode_document(message, options).map_err(|source| RegistryError::Encode {
            message: message.root_element_name().to_string(),
            source,
        })
    }

    fn namespace_candidates(&self, root: &XmlElement) -> Vec<String> {
        if let Some(namespace) = root.namespace.as_deref().filter(|ns| !ns.is_empty()) {
            return vec![namespace.to_string()];
        }

        let declarations: Vec<_> = root.namespace_declarations().collect();
        let candidates: Vec<String> = match self.fallback() {
            NamespaceFallback::FirstDeclaration => declarations
                .first()
                .map(|attr| attr.value.clone())
                .into_iter()
                .collect(),
            NamespaceFallback::PreferDefault => declarations
                .iter()
                .filter(|attr| attr.prefix.is_none() && !attr.value.is_empty())
                .chain(declarations.iter().filter(|attr| attr.prefix.is_some()))
                .map(|attr| attr.value.clone())
                .collect(),
        };

        if !candidates.is_empty() {
            tracing::warn!(
                "Root element '{}' has no namespace, falling back to xmlns declarations",
                root.name
            );
        }
        candidates
    }
}

fn split_key(key: &str) -> DetectedMessage {
    let mut parts = key.splitn(3, '/');
    let mut next = || parts.next().unwrap_or_default().to_string();
    DetectedMessage {
        family: next(),
        version: next(),
        root_element: next(),
    }
}
