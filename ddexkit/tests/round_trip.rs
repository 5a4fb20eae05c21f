//! End-to-end detection and round-trip tests over the sample corpus.

use ddexkit::oracle::{collect_paths, compare, field_coverage};
use ddexkit::prelude::*;
use ddexkit::schema::{ern, mead, pie};

const ERN432: &[u8] = include_bytes!("data/ern432_new_release.xml");
const ERN43: &[u8] = include_bytes!("data/ern43_purge_release.xml");
const ERN383: &[u8] = include_bytes!("data/ern383_catalog_list.xml");
const MEAD11: &[u8] = include_bytes!("data/mead11.xml");
const PIE10: &[u8] = include_bytes!("data/pie10_request.xml");

const SCHEMA_LOCATION: &str = "http://ddex.net/xml/ern/432 release.xsd";

fn corpus() -> [(&'static str, &'static [u8]); 5] {
    [
        ("ern/432/NewReleaseMessage", ERN432),
        ("ern/43/PurgeReleaseMessage", ERN43),
        ("ern/383/CatalogListMessage", ERN383),
        ("mead/11/MeadMessage", MEAD11),
        ("pie/10/PieRequestMessage", PIE10),
    ]
}

fn registry() -> Registry {
    ddexkit::build_registry().expect("compiled-in packages register")
}

#[test]
fn test_detect_corpus() {
    let registry = registry();
    for (key, xml) in corpus() {
        let detected = registry.detect(xml).unwrap();
        assert_eq!(detected.key(), key);
    }
}

#[test]
fn test_schema_location_scenario() {
    let registry = registry();

    let detected = registry.detect(ERN432).unwrap();
    assert_eq!(
        (
            detected.family.as_str(),
            detected.version.as_str(),
            detected.root_element.as_str()
        ),
        ("ern", "432", "NewReleaseMessage")
    );

    let output = ddexkit::round_trip(&registry, ERN432).unwrap();
    let root = XmlElement::parse(&output).unwrap();
    assert_eq!(root.attr_value("xsi:schemaLocation"), Some(SCHEMA_LOCATION));
    assert_eq!(root.qualified_name(), "ern:NewReleaseMessage");
    assert_eq!(root.namespace.as_deref(), Some(ern::v432::NAMESPACE));
}

#[test]
fn test_corpus_round_trips_losslessly() {
    let registry = registry();
    for (key, xml) in corpus() {
        let comparison = ddexkit::verify(&registry, xml);
        comparison.log_summary();
        assert!(comparison.success, "{key}: {comparison:?}");
        assert!(comparison.round_tripped_parseable, "{key}");
        assert!(comparison.elements_balanced(), "{key}");
        assert!(comparison.attributes_preserved(), "{key}");
        assert!(comparison.extra_elements.is_empty(), "{key}");
    }
}

#[test]
fn test_corpus_field_coverage() {
    let registry = registry();
    for (key, xml) in corpus() {
        let output = ddexkit::round_trip(&registry, xml).unwrap();
        let original = XmlElement::parse(xml).unwrap();
        let round_tripped = XmlElement::parse(&output).unwrap();

        let coverage = field_coverage(&original, &round_tripped);
        assert!(coverage.is_complete(), "{key}: {:?}", coverage.uncovered);
        assert_eq!(coverage.percentage, 100.0);
        assert!(coverage.total <= collect_paths(&original).len());
    }
}

#[test]
fn test_side_channel_survives_mutation() {
    let registry = registry();
    let (message, _) = registry.parse_any(ERN432).unwrap();
    let mut release = message
        .downcast::<ern::v432::NewReleaseMessage>()
        .expect("ERN 4.3.2 NewReleaseMessage");

    release.message_header.message_id = "MSG-432-0002".to_string();
    release.release_list.release[0].release_type = vec![ern::v432::ReleaseType::Album];

    let output = release.to_xml(&WriteOptions::default()).unwrap();
    let root = XmlElement::parse(&output).unwrap();
    assert_eq!(root.attr_value("xsi:schemaLocation"), Some(SCHEMA_LOCATION));
    assert_eq!(root.attr_value("xmlns:ern"), Some(ern::v432::NAMESPACE));

    let comparison = compare(ERN432, &output);
    assert!(!comparison.success);
    assert_eq!(
        comparison.value_mismatches,
        [
            "/NewReleaseMessage/MessageHeader/MessageId: 'MSG-432-0001' != 'MSG-432-0002'",
            "/NewReleaseMessage/ReleaseList/Release/ReleaseType: 'EP' != 'Album'",
        ]
    );
    assert!(comparison.missing_attributes.is_empty());
}

#[test]
fn test_dropping_side_channel_is_detected() {
    let registry = registry();
    let oracle = RoundTripOracle::new(|xml: &[u8]| -> Result<Vec<u8>, RegistryError> {
        let message = registry.parse_known(xml, "ern", "4.3.2")?;
        let mut release = message
            .downcast::<ern::v432::NewReleaseMessage>()
            .expect("lookup selects NewReleaseMessage");
        release.namespace_attrs = None;
        registry.encode(&*release, &WriteOptions::default())
    });

    let comparison = oracle.verify(ERN432);
    assert!(!comparison.success);
    assert_eq!(
        comparison.missing_attributes,
        ["/NewReleaseMessage@xsi:schemaLocation"]
    );
    // the forced default namespace keeps the output decodable
    assert!(comparison.round_tripped_parseable);
}

#[test]
fn test_fresh_message_is_detectable() {
    let registry = registry();
    let message = registry.new_message("pie", "10").unwrap();
    assert!(message.is::<pie::v10::PieMessage>());
    assert!(message.side_channel().is_none());

    let output = registry
        .encode(message.as_ref(), &WriteOptions::compact())
        .unwrap();
    assert_eq!(registry.detect(&output).unwrap().key(), "pie/10/PieMessage");
}

#[test]
fn test_typed_access_after_dispatch() {
    let registry = registry();

    let (message, _) = registry.parse_any(MEAD11).unwrap();
    let mead = message.downcast_ref::<mead::v11::MeadMessage>().unwrap();
    let info = &mead.release_information_list.as_ref().unwrap().release_information[0];
    assert_eq!(
        info.mood.iter().map(|m| m.value).collect::<Vec<_>>(),
        [mead::v11::MoodType::Melancholic, mead::v11::MoodType::UserDefined]
    );

    let (message, _) = registry.parse_any(ERN383).unwrap();
    let catalog = message
        .downcast_ref::<ern::v383::CatalogListMessage>()
        .unwrap();
    assert_eq!(catalog.catalog_item.len(), 2);
    assert_eq!(
        catalog.catalog_item[1].release_id.grid.as_deref(),
        Some("A1UCASE0000000401X")
    );
}

#[test]
fn test_unrecognized_document_is_rejected() {
    let registry = registry();
    let xml = br#"<NewReleaseMessage xmlns="http://ddex.net/xml/ern/41"><MessageHeader/></NewReleaseMessage>"#;

    assert!(matches!(
        registry.detect(xml),
        Err(RegistryError::UnrecognizedDocument { .. })
    ));
    let comparison = ddexkit::verify(&registry, xml);
    assert!(!comparison.success);
    assert!(comparison.pipeline_error.is_some());
}

#[test]
fn test_corpus_in_parallel() {
    let registry = registry();

    std::thread::scope(|scope| {
        let handles: Vec<_> = corpus()
            .into_iter()
            .flat_map(|entry| std::iter::repeat_n(entry, 4))
            .map(|(key, xml)| {
                let registry = &registry;
                scope.spawn(move || (key, ddexkit::verify(registry, xml)))
            })
            .collect();

        for handle in handles {
            let (key, comparison) = handle.join().unwrap();
            assert!(comparison.success, "{key}: {comparison:?}");
        }
    });
}
