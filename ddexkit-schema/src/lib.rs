//! # ddexkit Schema
//!
//! Typed message definitions for the compiled-in DDEX schema versions.
//!
//! Each version module exposes its namespace constants, the message structs
//! bound with `#[derive(XmlMessage)]`, its enumerations and a `package()`
//! function describing the root message types for the registry.
//!
//! | Module | Namespace | Root messages |
//! |---|---|---|
//! | [`ern::v383`] | `http://ddex.net/xml/ern/383` | `CatalogListMessage`, `NewReleaseMessage`, `PurgeReleaseMessage` |
//! | [`ern::v43`] | `http://ddex.net/xml/ern/43` | `NewReleaseMessage`, `PurgeReleaseMessage` |
//! | [`ern::v432`] | `http://ddex.net/xml/ern/432` | `NewReleaseMessage`, `PurgeReleaseMessage` |
//! | [`mead::v11`] | `http://ddex.net/xml/mead/11` | `MeadMessage` |
//! | [`pie::v10`] | `http://ddex.net/xml/pie/10` | `PieMessage`, `PieRequestMessage` |

mod common;

pub mod ern;
pub mod mead;
pub mod pie;

use ddexkit_core::SchemaPackage;

/// Returns every compiled-in schema package.
#[must_use]
pub fn packages() -> Vec<SchemaPackage> {
    vec![
        ern::v383::package(),
        ern::v43::package(),
        ern::v432::package(),
        mead::v11::package(),
        pie::v10::package(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddexkit_core::{Family, NamespaceResolver};

    #[test]
    fn test_packages_match_resolver() {
        // every package namespace follows the naming convention
        let resolver = NamespaceResolver::new();
        for package in packages() {
            let info = resolver.resolve(package.family, package.version);
            assert_eq!(info.namespace_uri, package.namespace);
            for ty in &package.types {
                assert_eq!(ty.handle.namespace(), package.namespace);
                assert_eq!(ty.handle.root_element(), ty.name);
            }
        }
    }

    #[test]
    fn test_package_families() {
        let families: Vec<Family> = packages().iter().map(|p| p.family).collect();
        assert_eq!(
            families,
            [Family::Ern, Family::Ern, Family::Ern, Family::Mead, Family::Pie]
        );
    }
}
