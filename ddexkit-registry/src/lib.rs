//! # ddexkit Registry
//!
//! Type registry and message sniffer for DDEX documents.
//!
//! This crate provides:
//! - A registry keyed by `family/version/rootElement`, built once from schema packages
//! - Lookup and zero-value construction by family, version and root element
//! - Detection of a document's schema identity from its root start tag
//! - Dispatch of a document to the matching typed decoder

pub mod error;
pub mod registry;
pub mod sniffer;

pub use error::{RegistryError, Result};
pub use registry::{ROOT_MESSAGES, Registry, RegistryBuilder, TypeDescriptor, registry_key};
pub use sniffer::{DetectedMessage, NamespaceFallback};
