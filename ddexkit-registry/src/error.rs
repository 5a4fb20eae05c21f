//! Error types for registry and dispatch operations.

use ddexkit_core::CodecError;
use thiserror::Error;

/// Error type for registry lookups, detection and dispatch.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The document is not well-formed XML.
    #[error("malformed XML: {0}")]
    MalformedXml(#[source] CodecError),

    /// The root element and namespace match no registered message.
    #[error("unrecognized document: root element '{root_element}' in namespace '{namespace}'")]
    UnrecognizedDocument {
        /// Local name of the root element.
        root_element: String,
        /// Namespace the root element was matched with.
        namespace: String,
    },

    /// No message is registered for the family and version.
    #[error("no message registered for {family}/{version}")]
    NotRegistered {
        /// Requested family.
        family: String,
        /// Requested version.
        version: String,
    },

    /// The family and version are known but the root message is not.
    #[error("unknown message {family}/{version}/{root_element}")]
    UnknownMessage {
        /// Requested family.
        family: String,
        /// Requested version.
        version: String,
        /// Requested root element.
        root_element: String,
    },

    /// The family is outside the known set.
    #[error("unknown schema family '{family}'")]
    UnknownFamily {
        /// Family as given.
        family: String,
    },

    /// A type declares a namespace other than the resolved one.
    #[error("namespace mismatch for {key}: expected '{expected}', type declares '{declared}'")]
    NamespaceMismatch {
        /// Registry key of the offending type.
        key: String,
        /// Namespace derived by the resolver.
        expected: String,
        /// Namespace declared by the type.
        declared: String,
    },

    /// Decoding into the selected type failed.
    #[error("failed to decode {message}: {source}")]
    Decode {
        /// Registry key of the target type.
        message: String,
        /// Underlying codec error.
        source: CodecError,
    },

    /// Encoding a message failed.
    #[error("failed to encode {message}: {source}")]
    Encode {
        /// Root element of the message.
        message: String,
        /// Underlying codec error.
        source: CodecError,
    },
}

impl RegistryError {
    /// Wraps a decode failure, keeping malformed input distinct.
    pub fn decode(message: impl Into<String>, source: CodecError) -> Self {
        if source.is_malformed() {
            Self::MalformedXml(source)
        } else {
            Self::Decode {
                message: message.into(),
                source,
            }
        }
    }

    /// Creates a not-registered error.
    pub fn not_registered(family: impl Into<String>, version: impl Into<String>) -> Self {
        Self::NotRegistered {
            family: family.into(),
            version: version.into(),
        }
    }
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
