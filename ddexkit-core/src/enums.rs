//! String conversion for generated enumerations.

use crate::error::{CodecError, Result};
use crate::message::EnumDescriptor;

/// An enumeration with a wire string per variant.
///
/// Implementations come from `#[derive(XmlEnum)]`. The sentinel variant, if
/// any, maps to the empty string and is never produced by
/// [`parse_xml_str`](XmlEnum::parse_xml_str).
pub trait XmlEnum: Sized + Copy + 'static {
    /// Rust type name.
    const NAME: &'static str;
    /// Every non-sentinel variant, in declaration order.
    const ALL: &'static [Self];
    /// The sentinel variant, written as empty text.
    const SENTINEL: Option<Self>;

    /// Returns the wire string, or `""` for the sentinel.
    fn as_xml_str(&self) -> &'static str;

    /// Parses a wire string, ignoring ASCII case.
    fn parse_xml_str(s: &str) -> Option<Self>;

    /// Returns the descriptor registered with schema packages.
    fn descriptor() -> EnumDescriptor;
}

/// Parses an enumeration value for a typed field.
///
/// # Errors
/// Returns `CodecError::InvalidValue` naming the enumeration if `text` is not
/// one of its wire strings. Blank text reads as the sentinel when there is one.
pub fn parse_enum<E: XmlEnum>(text: &str, context: &str) -> Result<E> {
    let text = text.trim();
    let parsed = match E::SENTINEL {
        Some(sentinel) if text.is_empty() => Some(sentinel),
        _ => E::parse_xml_str(text),
    };
    parsed.ok_or_else(|| CodecError::invalid_value(context, text, E::NAME))
}

/// Formats an enumeration value for a typed field.
#[must_use]
pub fn format_enum<E: XmlEnum>(value: &E) -> String {
    value.as_xml_str().to_string()
}
