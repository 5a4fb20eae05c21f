//! Electronic Release Notification packages.

pub mod v383;
pub mod v43;
pub mod v432;

/// Defines the resource, release and deal types of an ERN version.
macro_rules! ern_release_types {
    () => {
        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct ResourceList {
            pub sound_recording: Vec<SoundRecording>,
            pub image: Vec<Image>,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct SoundRecording {
            pub resource_reference: String,
            #[xml(element = "Type")]
            pub kind: Option<String>,
            pub sound_recording_id: Vec<SoundRecordingId>,
            pub display_title_text: Vec<DisplayTitleText>,
            pub display_artist_name: Vec<DisplayArtistName>,
            pub duration: Option<String>,
            pub parental_warning_type: Vec<String>,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct SoundRecordingId {
            #[xml(attr = "IsReplaced")]
            pub is_replaced: Option<bool>,
            #[xml(element = "ISRC")]
            pub isrc: Option<String>,
            pub proprietary_id: Vec<ProprietaryId>,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct Image {
            pub resource_reference: String,
            #[xml(element = "Type")]
            pub kind: Option<String>,
            pub resource_id: Vec<ProprietaryId>,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct DisplayTitleText {
            #[xml(attr = "LanguageAndScriptCode")]
            pub language_and_script_code: Option<String>,
            #[xml(attr = "IsDefault")]
            pub is_default: Option<bool>,
            #[xml(text)]
            pub value: String,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct DisplayArtistName {
            #[xml(attr = "LanguageAndScriptCode")]
            pub language_and_script_code: Option<String>,
            #[xml(text)]
            pub value: String,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct ReleaseList {
            pub release: Vec<Release>,
            pub track_release: Vec<Release>,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct Release {
            #[xml(attr = "IsMainRelease")]
            pub is_main_release: Option<bool>,
            pub release_reference: String,
            pub release_type: Vec<ReleaseType>,
            pub release_id: ReleaseId,
            pub display_title_text: Vec<DisplayTitleText>,
            pub display_artist_name: Vec<DisplayArtistName>,
            pub release_resource_reference: Vec<String>,
            pub genre: Vec<Genre>,
            pub original_release_date: Option<String>,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct ReleaseId {
            #[xml(element = "GRid")]
            pub grid: Option<String>,
            #[xml(element = "ICPN")]
            pub icpn: Option<String>,
            #[xml(element = "CatalogNumber")]
            pub catalog_number: Option<CatalogNumber>,
            pub proprietary_id: Vec<ProprietaryId>,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct CatalogNumber {
            #[xml(attr = "Namespace")]
            pub namespace: String,
            #[xml(text)]
            pub value: String,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct Genre {
            pub genre_text: String,
            pub sub_genre: Option<String>,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct DealList {
            pub release_deal: Vec<ReleaseDeal>,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct ReleaseDeal {
            pub deal_release_reference: Vec<String>,
            pub deal: Vec<Deal>,
            pub effective_date: Option<String>,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct Deal {
            pub deal_terms: DealTerms,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct DealTerms {
            pub commercial_model_type: Vec<String>,
            pub use_type: Vec<String>,
            pub territory_code: Vec<String>,
            pub excluded_territory_code: Vec<String>,
            pub validity_period: Vec<Period>,
        }

        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct Period {
            pub start_date: Option<String>,
            pub end_date: Option<String>,
            pub start_date_time: Option<String>,
            pub end_date_time: Option<String>,
        }

        /// A release withdrawn by a purge message.
        #[derive(Debug, Clone, Default, PartialEq, ::ddexkit_derive::XmlMessage)]
        pub struct PurgedRelease {
            pub release_id: ReleaseId,
            pub title: Option<String>,
            pub contributor: Vec<String>,
        }

        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ::ddexkit_derive::XmlEnum,
        )]
        #[repr(i32)]
        pub enum ReleaseType {
            #[default]
            Unspecified = 0,
            Album = 1,
            Single = 2,
            #[xml(rename = "EP")]
            Ep = 3,
            TrackRelease = 4,
            VideoSingle = 5,
            Bundle = 6,
            UserDefined = 7,
        }
    };
}

pub(crate) use ern_release_types;
