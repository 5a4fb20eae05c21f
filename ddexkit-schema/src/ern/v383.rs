//! ERN 3.8.3.
//!
//! The 3.x line predates the party list and the AVS import.

use ddexkit_core::{Family, NamespaceAttrs, SchemaPackage, XSI_NAMESPACE};
use ddexkit_derive::XmlMessage;

pub const NAMESPACE: &str = "http://ddex.net/xml/ern/383";
pub const NAMESPACE_PREFIX: &str = "ern";
/// XML Schema instance namespace, used for `xsi:schemaLocation`.
pub const NAMESPACE_XSI: &str = XSI_NAMESPACE;
pub const VERSION: &str = "383";

crate::common::header_types!();
super::ern_release_types!();

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
#[xml(root = "NewReleaseMessage", namespace = NAMESPACE)]
pub struct NewReleaseMessage {
    #[xml(namespace_attrs)]
    pub namespace_attrs: Option<NamespaceAttrs>,
    #[xml(attr = "MessageSchemaVersionId")]
    pub message_schema_version_id: Option<String>,
    #[xml(attr = "BusinessProfileVersionId")]
    pub business_profile_version_id: Option<String>,
    #[xml(attr = "ReleaseProfileVersionId")]
    pub release_profile_version_id: Option<String>,
    #[xml(attr = "LanguageAndScriptCode")]
    pub language_and_script_code: Option<String>,
    pub message_header: MessageHeader,
    pub update_indicator: Option<String>,
    pub is_backfill: Option<bool>,
    pub resource_list: ResourceList,
    pub release_list: ReleaseList,
    pub deal_list: Option<DealList>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
#[xml(root = "PurgeReleaseMessage", namespace = NAMESPACE)]
pub struct PurgeReleaseMessage {
    #[xml(namespace_attrs)]
    pub namespace_attrs: Option<NamespaceAttrs>,
    #[xml(attr = "MessageSchemaVersionId")]
    pub message_schema_version_id: Option<String>,
    #[xml(attr = "LanguageAndScriptCode")]
    pub language_and_script_code: Option<String>,
    pub message_header: MessageHeader,
    pub purged_release: Vec<PurgedRelease>,
}

/// Catalog listing sent ahead of bulk deliveries.
#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
#[xml(root = "CatalogListMessage", namespace = NAMESPACE)]
pub struct CatalogListMessage {
    #[xml(namespace_attrs)]
    pub namespace_attrs: Option<NamespaceAttrs>,
    #[xml(attr = "MessageSchemaVersionId")]
    pub message_schema_version_id: Option<String>,
    #[xml(attr = "LanguageAndScriptCode")]
    pub language_and_script_code: Option<String>,
    pub message_header: MessageHeader,
    pub catalog_item: Vec<CatalogItem>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
pub struct CatalogItem {
    pub territory_code: Vec<String>,
    pub release_id: ReleaseId,
    pub title: Vec<String>,
    pub catalog_release_reference: Option<String>,
}

/// The compiled-in ERN 3.8.3 package.
#[must_use]
pub fn package() -> SchemaPackage {
    SchemaPackage::new(Family::Ern, VERSION, NAMESPACE)
        .with_type::<CatalogListMessage>()
        .with_type::<NewReleaseMessage>()
        .with_type::<PurgeReleaseMessage>()
        .with_enum::<MessageControlType>()
        .with_enum::<ReleaseType>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddexkit_core::{RootMessage, WriteOptions};

    #[test]
    fn test_catalog_list_round_trip() {
        let xml = br#"<ernm:CatalogListMessage xmlns:ernm="http://ddex.net/xml/ern/383" MessageSchemaVersionId="ern/383">
  <MessageHeader>
    <MessageId>CAT-1</MessageId>
    <MessageSender><PartyId>PADPIDA0000000001X</PartyId></MessageSender>
    <MessageCreatedDateTime>2024-03-01T00:00:00Z</MessageCreatedDateTime>
  </MessageHeader>
  <CatalogItem>
    <TerritoryCode>Worldwide</TerritoryCode>
    <ReleaseId><ICPN>0123456789012</ICPN></ReleaseId>
    <Title>Back Catalog</Title>
  </CatalogItem>
</ernm:CatalogListMessage>"#;

        let message = CatalogListMessage::from_xml(xml).unwrap();
        assert_eq!(message.message_schema_version_id.as_deref(), Some("ern/383"));
        assert_eq!(message.catalog_item[0].territory_code, ["Worldwide"]);

        let encoded = message.to_xml(&WriteOptions::compact()).unwrap();
        let text = String::from_utf8(encoded.clone()).unwrap();
        assert!(text.starts_with("<ernm:CatalogListMessage xmlns:ernm="));
        assert_eq!(CatalogListMessage::from_xml(&encoded).unwrap(), message);
    }

    #[test]
    fn test_backfill_flag() {
        let xml = br#"<NewReleaseMessage xmlns="http://ddex.net/xml/ern/383">
  <MessageHeader>
    <MessageId>M</MessageId>
    <MessageSender/>
    <MessageCreatedDateTime>2024-03-01T00:00:00Z</MessageCreatedDateTime>
  </MessageHeader>
  <IsBackfill>true</IsBackfill>
  <ResourceList/>
  <ReleaseList/>
</NewReleaseMessage>"#;

        let message = NewReleaseMessage::from_xml(xml).unwrap();
        assert_eq!(message.is_backfill, Some(true));
        assert!(message.resource_list.sound_recording.is_empty());
    }
}
