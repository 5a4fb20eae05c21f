//! PIE 1.0.

use ddexkit_core::{AVS_NAMESPACE, Family, NamespaceAttrs, SchemaPackage, XSI_NAMESPACE};
use ddexkit_derive::XmlMessage;

pub const NAMESPACE: &str = "http://ddex.net/xml/pie/10";
pub const NAMESPACE_PREFIX: &str = "pie";
/// XML Schema instance namespace, used for `xsi:schemaLocation`.
pub const NAMESPACE_XSI: &str = XSI_NAMESPACE;
pub const NAMESPACE_AVS: &str = AVS_NAMESPACE;
pub const VERSION: &str = "10";

crate::common::header_types!();

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
#[xml(root = "PieMessage", namespace = NAMESPACE)]
pub struct PieMessage {
    #[xml(namespace_attrs)]
    pub namespace_attrs: Option<NamespaceAttrs>,
    #[xml(attr = "LanguageAndScriptCode")]
    pub language_and_script_code: Option<String>,
    #[xml(attr = "AvsVersionId")]
    pub avs_version_id: Option<String>,
    pub message_header: MessageHeader,
    pub party_list: Option<PartyList>,
}

/// Request for party details, answered by a [`PieMessage`].
#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
#[xml(root = "PieRequestMessage", namespace = NAMESPACE)]
pub struct PieRequestMessage {
    #[xml(namespace_attrs)]
    pub namespace_attrs: Option<NamespaceAttrs>,
    #[xml(attr = "LanguageAndScriptCode")]
    pub language_and_script_code: Option<String>,
    #[xml(attr = "AvsVersionId")]
    pub avs_version_id: Option<String>,
    pub message_header: MessageHeader,
    pub request: Vec<Request>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
pub struct PartyList {
    pub party: Vec<Party>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
pub struct Party {
    pub party_reference: Option<String>,
    pub party_id: Vec<PartyId>,
    pub party_name: Vec<PartyName>,
    pub award: Vec<Award>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
pub struct Award {
    pub award_name: String,
    pub date: Option<String>,
    pub is_nominated: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
pub struct Request {
    pub party_id: Vec<PartyId>,
    pub requested_detail: Vec<String>,
}

/// The compiled-in PIE 1.0 package.
#[must_use]
pub fn package() -> SchemaPackage {
    SchemaPackage::new(Family::Pie, VERSION, NAMESPACE)
        .with_type::<PieMessage>()
        .with_type::<PieRequestMessage>()
        .with_enum::<MessageControlType>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddexkit_core::{RootMessage, WriteOptions};

    #[test]
    fn test_pie_request_round_trip() {
        let xml = br#"<pie:PieRequestMessage xmlns:pie="http://ddex.net/xml/pie/10" AvsVersionId="3">
  <MessageHeader>
    <MessageId>REQ-1</MessageId>
    <MessageSender><PartyId>PADPIDA0000000001X</PartyId></MessageSender>
    <MessageCreatedDateTime>2024-03-01T00:00:00Z</MessageCreatedDateTime>
    <MessageControlType>LiveMessage</MessageControlType>
  </MessageHeader>
  <Request>
    <PartyId IsISNI="true">0000000121707484</PartyId>
    <RequestedDetail>Award</RequestedDetail>
  </Request>
</pie:PieRequestMessage>"#;

        let message = PieRequestMessage::from_xml(xml).unwrap();
        assert_eq!(message.request[0].party_id[0].is_isni, Some(true));
        assert_eq!(message.avs_version_id.as_deref(), Some("3"));

        let encoded = message.to_xml(&WriteOptions::default()).unwrap();
        assert_eq!(PieRequestMessage::from_xml(&encoded).unwrap(), message);
    }
}
