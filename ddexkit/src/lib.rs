//! # ddexkit
//!
//! Schema detection and lossless XML round trips for DDEX messages.
//!
//! ddexkit identifies which DDEX schema a document belongs to from its root
//! element, decodes it into the matching typed message and encodes it back
//! without losing any element, attribute or namespace declaration.
//!
//! ## Features
//!
//! - **Sniffing** - Family, version and root message from the first start tag
//! - **Typed messages** - ERN 3.8.3, 4.3 and 4.3.2, MEAD 1.1 and PIE 1.0
//! - **Namespace fidelity** - Prefixes, `xmlns` declarations and `xsi:schemaLocation` survive a round trip
//! - **Round-trip oracle** - Structural comparison and field coverage of original and output
//!
//! ## Quick Start
//!
//! ```ignore
//! use ddexkit::prelude::*;
//!
//! let registry = ddexkit::build_registry()?;
//! let (message, detected) = registry.parse_any(&xml)?;
//! println!("{detected}");
//!
//! let output = registry.encode(message.as_ref(), &WriteOptions::default())?;
//! assert!(ddexkit::verify(&registry, &xml).success);
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Element tree, namespaces, codec traits, type handles
//! - [`schema`] - Compiled-in schema packages
//! - [`registry`] - Type registry, detection and dispatch
//! - [`oracle`] - Round-trip comparison and coverage

pub mod prelude;

/// Element tree, namespace resolution and codec contract.
pub mod core {
    pub use ddexkit_core::*;
}

/// Derive macros for message and enumeration types.
pub mod derive {
    pub use ddexkit_derive::*;
}

/// Compiled-in schema packages.
pub mod schema {
    pub use ddexkit_schema::*;
}

/// Type registry, detection and dispatch.
pub mod registry {
    pub use ddexkit_registry::*;
}

/// Round-trip oracle.
pub mod oracle {
    pub use ddexkit_oracle::*;
}

pub use ddexkit_core::{Message, WriteOptions, encode_document};
pub use ddexkit_oracle::{DomComparison, RoundTripOracle};
pub use ddexkit_registry::{DetectedMessage, Registry, RegistryBuilder, RegistryError};

/// Builds a registry holding every compiled-in schema package.
///
/// # Errors
/// Returns `RegistryError::NamespaceMismatch` if a compiled-in type disagrees
/// with the resolver.
pub fn build_registry() -> ddexkit_registry::Result<Registry> {
    Registry::builder()
        .packages(ddexkit_schema::packages())
        .build()
}

/// Detects, decodes and re-encodes a document.
///
/// The output carries an XML declaration and two-space indentation.
///
/// # Errors
/// Returns any detection, decode or encode error.
pub fn round_trip(registry: &Registry, xml: &[u8]) -> ddexkit_registry::Result<Vec<u8>> {
    let (message, detected) = registry.parse_any(xml)?;
    tracing::debug!("Re-encoding {}", detected);
    registry.encode(message.as_ref(), &WriteOptions::default().declaration(true))
}

/// Runs [`round_trip`] on a document through the oracle.
#[must_use]
pub fn verify(registry: &Registry, xml: &[u8]) -> DomComparison {
    RoundTripOracle::new(|input: &[u8]| round_trip(registry, input)).verify(xml)
}
