//! # ddexkit Derive
//!
//! Procedural macros that generate the codec of schema message types.
//!
//! - `XmlMessage` binds a struct to an element: fields map to attributes,
//!   child elements or character data. With a `root` argument the struct also
//!   becomes a root message that keeps its namespace declarations.
//! - `XmlEnum` gives a `#[repr(i32)]` enumeration its wire strings.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod enumeration;
mod message;

/// Derives `XmlElementValue`, and `RootMessage` for root types.
///
/// # Struct Attributes
///
/// - `#[xml(root = "NewReleaseMessage", namespace = NAMESPACE)]` - Marks a
///   root message. `namespace` is any constant expression of type `&str`.
///
/// # Field Attributes
///
/// - `#[xml(attr = "LanguageAndScriptCode")]` - Binds an attribute. The key may
///   be prefixed, as in `xsi:schemaLocation`.
/// - `#[xml(element = "ISRC")]` - Binds a child element. Fields without an
///   attribute bind the child named after the field in PascalCase.
/// - `#[xml(text)]` - Binds the character data of the element.
/// - `#[xml(namespace_attrs)]` - The `Option<NamespaceAttrs>` side channel of a
///   root message.
/// - `#[xml(skip)]` - Not bound. Decoded as `Default::default()`.
///
/// `Option<T>` fields are optional and `Vec<T>` fields repeat.
///
/// # Example
/// ```ignore
/// #[derive(Debug, Clone, Default, PartialEq, XmlMessage)]
/// #[xml(root = "PieMessage", namespace = NAMESPACE)]
/// pub struct PieMessage {
///     #[xml(namespace_attrs)]
///     pub namespace_attrs: Option<NamespaceAttrs>,
///     #[xml(attr = "LanguageAndScriptCode")]
///     pub language_and_script_code: Option<String>,
///     pub message_header: MessageHeader,
///     pub party: Vec<Party>,
/// }
/// ```
#[proc_macro_derive(XmlMessage, attributes(xml))]
pub fn derive_xml_message(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    message::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derives `XmlEnum` and `XmlText` for a unit-only `#[repr(i32)]` enum.
///
/// The wire string of a variant is its name with the enum name stripped from
/// the front, or the value of `#[xml(rename = "...")]`. A variant named
/// `Unspecified`, or marked `#[xml(sentinel)]`, is the zero value and has no
/// wire string.
///
/// Also generates `From<Enum> for i32` and `TryFrom<i32> for Enum`.
#[proc_macro_derive(XmlEnum, attributes(xml))]
pub fn derive_xml_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    enumeration::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
