//! ERN 4.3.

use ddexkit_core::{AVS_NAMESPACE, Family, NamespaceAttrs, SchemaPackage, XSI_NAMESPACE};
use ddexkit_derive::XmlMessage;

pub const NAMESPACE: &str = "http://ddex.net/xml/ern/43";
pub const NAMESPACE_PREFIX: &str = "ern";
/// XML Schema instance namespace, used for `xsi:schemaLocation`.
pub const NAMESPACE_XSI: &str = XSI_NAMESPACE;
pub const NAMESPACE_AVS: &str = AVS_NAMESPACE;
pub const VERSION: &str = "43";

crate::common::header_types!();
super::ern_release_types!();

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
#[xml(root = "NewReleaseMessage", namespace = NAMESPACE)]
pub struct NewReleaseMessage {
    #[xml(namespace_attrs)]
    pub namespace_attrs: Option<NamespaceAttrs>,
    #[xml(attr = "ReleaseProfileVersionId")]
    pub release_profile_version_id: Option<String>,
    #[xml(attr = "ReleaseProfileVariantVersionId")]
    pub release_profile_variant_version_id: Option<String>,
    #[xml(attr = "LanguageAndScriptCode")]
    pub language_and_script_code: Option<String>,
    #[xml(attr = "AvsVersionId")]
    pub avs_version_id: Option<String>,
    pub message_header: MessageHeader,
    pub party_list: Option<PartyList>,
    pub resource_list: ResourceList,
    pub release_list: ReleaseList,
    pub deal_list: Option<DealList>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
#[xml(root = "PurgeReleaseMessage", namespace = NAMESPACE)]
pub struct PurgeReleaseMessage {
    #[xml(namespace_attrs)]
    pub namespace_attrs: Option<NamespaceAttrs>,
    #[xml(attr = "LanguageAndScriptCode")]
    pub language_and_script_code: Option<String>,
    #[xml(attr = "AvsVersionId")]
    pub avs_version_id: Option<String>,
    pub message_header: MessageHeader,
    pub purged_release: Vec<PurgedRelease>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
pub struct PartyList {
    pub party: Vec<Party>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
pub struct Party {
    pub party_reference: String,
    pub party_name: Vec<PartyName>,
    pub party_id: Vec<PartyId>,
}

/// The compiled-in ERN 4.3 package.
#[must_use]
pub fn package() -> SchemaPackage {
    SchemaPackage::new(Family::Ern, VERSION, NAMESPACE)
        .with_type::<NewReleaseMessage>()
        .with_type::<PurgeReleaseMessage>()
        .with_enum::<MessageControlType>()
        .with_enum::<ReleaseType>()
}
