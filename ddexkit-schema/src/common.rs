//! Header types shared by every schema package.
//!
//! Each version module expands `header_types!` so that its header types are
//! distinct from those of other versions, as generated code would be.

/// Defines `MessageHeader` and its party types in the calling module.
macro_rules! header_types {
    () => {
        /// Header carried by every message.
        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct MessageHeader {
            pub message_thread_id: Option<String>,
            pub message_id: String,
            pub message_sender: MessagingParty,
            pub sent_on_behalf_of: Option<MessagingParty>,
            pub message_recipient: Vec<MessagingParty>,
            pub message_created_date_time: String,
            pub message_control_type: Option<MessageControlType>,
        }

        /// Sender or recipient of a message.
        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct MessagingParty {
            pub party_id: Vec<PartyId>,
            pub party_name: Option<PartyName>,
            pub trading_name: Option<String>,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct PartyId {
            #[xml(attr = "Namespace")]
            pub namespace: Option<String>,
            #[xml(attr = "IsDPID")]
            pub is_dpid: Option<bool>,
            #[xml(attr = "IsISNI")]
            pub is_isni: Option<bool>,
            #[xml(text)]
            pub value: String,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct PartyName {
            #[xml(attr = "LanguageAndScriptCode")]
            pub language_and_script_code: Option<String>,
            pub full_name: String,
            pub full_name_indexed: Option<String>,
        }

        /// Identifier in a namespace owned by the issuing party.
        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct ProprietaryId {
            #[xml(attr = "Namespace")]
            pub namespace: String,
            #[xml(text)]
            pub value: String,
        }

        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ::ddexkit_derive::XmlEnum,
        )]
        #[repr(i32)]
        pub enum MessageControlType {
            #[default]
            Unspecified = 0,
            LiveMessage = 1,
            TestMessage = 2,
        }
    };
}

pub(crate) use header_types;
