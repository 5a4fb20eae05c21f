//! # ddexkit Core
//!
//! Core types and traits for namespace-faithful DDEX message handling.
//!
//! This crate provides:
//! - An owned XML element tree read and written with `quick-xml`
//! - The namespace resolver for schema families and versions
//! - The side-channel map that keeps root namespace declarations
//! - The codec contract implemented by generated message types
//! - Type-erased messages and the type handles a registry stores

pub mod attrs;
pub mod codec;
pub mod enums;
pub mod error;
pub mod message;
pub mod namespace;
pub mod tree;

pub use attrs::NamespaceAttrs;
pub use codec::{RootMessage, XmlElementValue, XmlText, encode_document};
pub use enums::XmlEnum;
pub use error::{CodecError, Result};
pub use message::{EnumDescriptor, Message, PackageType, SchemaPackage, TypeHandle};
pub use namespace::{AVS_NAMESPACE, Family, NamespaceInfo, NamespaceResolver, normalize_version};
pub use tree::{WriteOptions, XSI_NAMESPACE, XmlAttribute, XmlElement};
