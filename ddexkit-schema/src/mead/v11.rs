//! MEAD 1.1.

use ddexkit_core::{AVS_NAMESPACE, Family, NamespaceAttrs, SchemaPackage, XSI_NAMESPACE};
use ddexkit_derive::{XmlEnum, XmlMessage};

pub const NAMESPACE: &str = "http://ddex.net/xml/mead/11";
pub const NAMESPACE_PREFIX: &str = "mead";
/// XML Schema instance namespace, used for `xsi:schemaLocation`.
pub const NAMESPACE_XSI: &str = XSI_NAMESPACE;
pub const NAMESPACE_AVS: &str = AVS_NAMESPACE;
pub const VERSION: &str = "11";

crate::common::header_types!();

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
#[xml(root = "MeadMessage", namespace = NAMESPACE)]
pub struct MeadMessage {
    #[xml(namespace_attrs)]
    pub namespace_attrs: Option<NamespaceAttrs>,
    #[xml(attr = "LanguageAndScriptCode")]
    pub language_and_script_code: Option<String>,
    #[xml(attr = "AvsVersionId")]
    pub avs_version_id: Option<String>,
    pub message_header: MessageHeader,
    pub release_information_list: Option<ReleaseInformationList>,
    pub resource_information_list: Option<ResourceInformationList>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
pub struct ReleaseInformationList {
    pub release_information: Vec<ReleaseInformation>,
}

/// Enrichment data for one release.
#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
pub struct ReleaseInformation {
    pub release_summary: Option<Summary>,
    pub release_id: ReleaseId,
    pub mood: Vec<Mood>,
    pub focus_track: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
pub struct ResourceInformationList {
    pub resource_information: Vec<ResourceInformation>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
pub struct ResourceInformation {
    pub resource_summary: Option<Summary>,
    pub resource_id: Vec<ResourceId>,
    pub tempo: Vec<String>,
    pub mood: Vec<Mood>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
pub struct Summary {
    pub display_title: Option<String>,
    pub display_artist_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
pub struct ReleaseId {
    #[xml(element = "ICPN")]
    pub icpn: Option<String>,
    pub proprietary_id: Vec<ProprietaryId>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
pub struct ResourceId {
    #[xml(element = "ISRC")]
    pub isrc: Option<String>,
    pub proprietary_id: Vec<ProprietaryId>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
pub struct Mood {
    #[xml(attr = "Namespace")]
    pub namespace: Option<String>,
    pub value: MoodType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, XmlEnum)]
#[repr(i32)]
pub enum MoodType {
    #[default]
    Unspecified = 0,
    Aggressive = 1,
    Calm = 2,
    Dark = 3,
    Energetic = 4,
    Happy = 5,
    Melancholic = 6,
    Romantic = 7,
    UserDefined = 8,
}

/// The compiled-in MEAD 1.1 package.
#[must_use]
pub fn package() -> SchemaPackage {
    SchemaPackage::new(Family::Mead, VERSION, NAMESPACE)
        .with_type::<MeadMessage>()
        .with_enum::<MessageControlType>()
        .with_enum::<MoodType>()
}
