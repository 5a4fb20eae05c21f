//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use ddexkit::prelude::*;
//! ```

// Core types
pub use ddexkit_core::{
    CodecError, Family, Message, NamespaceAttrs, NamespaceResolver, RootMessage, TypeHandle,
    WriteOptions, XmlElement, XmlEnum,
};

// Derive macros
pub use ddexkit_derive::{XmlEnum, XmlMessage};

// Registry types
pub use ddexkit_registry::{
    DetectedMessage, NamespaceFallback, Registry, RegistryBuilder, RegistryError,
};

// Oracle types
pub use ddexkit_oracle::{DomComparison, FieldCoverage, RoundTripOracle};
