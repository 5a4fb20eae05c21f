//! Synthetic sample documents.
//!
//! Each generator produces a well-formed document that decodes with the
//! compiled-in schema packages. Sizes scale with the item count.

const HEADER: &str = "  <MessageHeader>
    <MessageThreadId>BENCH-THREAD</MessageThreadId>
    <MessageId>BENCH-0001</MessageId>
    <MessageSender>
      <PartyId Namespace=\"DPID\" IsDPID=\"true\">PADPIDA0000000001X</PartyId>
      <PartyName><FullName>Bench Label</FullName></PartyName>
    </MessageSender>
    <MessageRecipient>
      <PartyId>PADPIDA0000000002X</PartyId>
    </MessageRecipient>
    <MessageCreatedDateTime>2024-01-15T10:00:00Z</MessageCreatedDateTime>
    <MessageControlType>TestMessage</MessageControlType>
  </MessageHeader>
";

/// ERN 4.3.2 `NewReleaseMessage` with `tracks` sound recordings and one album.
#[must_use]
pub fn ern432_new_release(tracks: usize) -> Vec<u8> {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ern:NewReleaseMessage xmlns:ern="http://ddex.net/xml/ern/432"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xsi:schemaLocation="http://ddex.net/xml/ern/432 http://ddex.net/xml/ern/432/release-notification.xsd"
    ReleaseProfileVersionId="Audio" LanguageAndScriptCode="en" AvsVersionId="4">
"#,
    );
    xml.push_str(HEADER);

    xml.push_str("  <ResourceList>\n");
    for track in 1..=tracks {
        xml.push_str(&format!(
            "    <SoundRecording>
      <ResourceReference>A{track}</ResourceReference>
      <Type>MusicalWorkSoundRecording</Type>
      <SoundRecordingId><ISRC>USABC24{track:05}</ISRC></SoundRecordingId>
      <DisplayTitleText LanguageAndScriptCode=\"en\">Track {track}</DisplayTitleText>
      <DisplayArtistName>The Bench Band</DisplayArtistName>
      <Duration>PT3M{:02}S</Duration>
    </SoundRecording>
",
            track % 60
        ));
    }
    xml.push_str("  </ResourceList>\n");

    xml.push_str(
        "  <ReleaseList>
    <Release IsMainRelease=\"true\">
      <ReleaseReference>R0</ReleaseReference>
      <ReleaseType>Album</ReleaseType>
      <ReleaseId><ICPN>0123456789012</ICPN></ReleaseId>
      <DisplayTitleText>Bench Album</DisplayTitleText>
      <DisplayArtistName>The Bench Band</DisplayArtistName>
",
    );
    for track in 1..=tracks {
        xml.push_str(&format!(
            "      <ReleaseResourceReference>A{track}</ReleaseResourceReference>\n"
        ));
    }
    xml.push_str(
        "      <Genre><GenreText>Rock</GenreText><SubGenre>Indie</SubGenre></Genre>
    </Release>
  </ReleaseList>
  <DealList>
    <ReleaseDeal>
      <DealReleaseReference>R0</DealReleaseReference>
      <Deal>
        <DealTerms>
          <CommercialModelType>SubscriptionModel</CommercialModelType>
          <UseType>Stream</UseType>
          <TerritoryCode>Worldwide</TerritoryCode>
          <ValidityPeriod><StartDate>2024-02-01</StartDate></ValidityPeriod>
        </DealTerms>
      </Deal>
    </ReleaseDeal>
  </DealList>
</ern:NewReleaseMessage>
",
    );
    xml.into_bytes()
}

/// MEAD 1.1 message with `releases` release information blocks.
#[must_use]
pub fn mead_message(releases: usize) -> Vec<u8> {
    let mut xml = String::from(
        r#"<MeadMessage xmlns="http://ddex.net/xml/mead/11" xmlns:avs="http://ddex.net/xml/avs/avs" AvsVersionId="4">
"#,
    );
    xml.push_str(HEADER);
    xml.push_str("  <ReleaseInformationList>\n");
    for release in 1..=releases {
        xml.push_str(&format!(
            "    <ReleaseInformation>
      <ReleaseSummary><DisplayTitle>Release {release}</DisplayTitle></ReleaseSummary>
      <ReleaseId><ICPN>{release:013}</ICPN></ReleaseId>
      <Mood><Value>Energetic</Value></Mood>
      <Mood Namespace=\"DPID:PADPIDA0000000001X\"><Value>UserDefined</Value></Mood>
    </ReleaseInformation>
"
        ));
    }
    xml.push_str("  </ReleaseInformationList>\n</MeadMessage>\n");
    xml.into_bytes()
}

/// PIE 1.0 message with `parties` parties.
#[must_use]
pub fn pie_message(parties: usize) -> Vec<u8> {
    let mut xml = String::from(
        r#"<pie:PieMessage xmlns:pie="http://ddex.net/xml/pie/10" LanguageAndScriptCode="en">
"#,
    );
    xml.push_str(HEADER);
    xml.push_str("  <PartyList>\n");
    for party in 1..=parties {
        xml.push_str(&format!(
            "    <Party>
      <PartyReference>P{party}</PartyReference>
      <PartyId IsISNI=\"true\">{party:016}</PartyId>
      <PartyName><FullName>Artist {party}</FullName></PartyName>
      <Award><AwardName>Best Newcomer</AwardName><Date>2023</Date><IsNominated>true</IsNominated></Award>
    </Party>
"
        ));
    }
    xml.push_str("  </PartyList>\n</pie:PieMessage>\n");
    xml.into_bytes()
}

/// One named document per compiled-in family at benchmark size.
#[must_use]
pub fn corpus() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("ern432_new_release", ern432_new_release(12)),
        ("mead11", mead_message(12)),
        ("pie10", pie_message(12)),
    ]
}
