//! Error types for ddexkit core operations.

use thiserror::Error;

/// Error type for XML reading, writing and typed-field binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The byte stream is not well-formed XML.
    #[error("malformed XML at byte {position}: {message}")]
    MalformedXml {
        /// Diagnostic from the underlying reader.
        message: String,
        /// Byte position reported by the reader.
        position: u64,
    },

    /// The document ended before any element was seen.
    #[error("document contains no root element")]
    NoRootElement,

    /// The document root is not the element the target type binds.
    #[error("unexpected root element '{found}', expected '{expected}'")]
    UnexpectedRoot {
        /// Root element the type binds.
        expected: String,
        /// Root element found in the document.
        found: String,
    },

    /// A required child element is absent.
    #[error("missing required element '{element}' in '{parent}'")]
    MissingElement {
        /// Parent element local name.
        parent: String,
        /// Missing child element name.
        element: String,
    },

    /// A required attribute is absent.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element local name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// A value could not be converted to its typed representation.
    #[error("invalid value '{value}' for '{context}': expected {expected}")]
    InvalidValue {
        /// Element or attribute the value belongs to.
        context: String,
        /// Offending text.
        value: String,
        /// Description of the expected form.
        expected: String,
    },

    /// Writing the element tree failed.
    #[error("XML write error: {message}")]
    Write {
        /// Error message.
        message: String,
    },
}

impl CodecError {
    /// Creates a malformed XML error from a reader diagnostic.
    pub fn malformed(message: impl std::fmt::Display, position: u64) -> Self {
        Self::MalformedXml {
            message: message.to_string(),
            position,
        }
    }

    /// Creates a missing element error.
    pub fn missing_element(parent: impl Into<String>, element: impl Into<String>) -> Self {
        Self::MissingElement {
            parent: parent.into(),
            element: element.into(),
        }
    }

    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(
        context: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            context: context.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Creates a write error.
    pub fn write(message: impl std::fmt::Display) -> Self {
        Self::Write {
            message: message.to_string(),
        }
    }

    /// Returns true if this error means the input was not well-formed XML.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedXml { .. } | Self::NoRootElement)
    }
}

/// Result type alias for ddexkit core operations.
pub type Result<T> = std::result::Result<T, CodecError>;
