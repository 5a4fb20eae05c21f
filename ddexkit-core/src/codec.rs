//! Typed binding between element trees and generated message types.
//!
//! Leaf values implement [`XmlText`]; every element-shaped value implements
//! [`XmlElementValue`]. Root message types additionally implement
//! [`RootMessage`], which carries the root element name, the canonical
//! namespace and the side-channel map of namespace attributes.
//!
//! The free functions in this module are the building blocks the
//! `XmlMessage` derive expands to.

use crate::attrs::NamespaceAttrs;
use crate::error::{CodecError, Result};
use crate::message::Message;
use crate::tree::{WriteOptions, XSI_NAMESPACE, XmlAttribute, XmlElement};

/// A value carried as character data or as an attribute value.
pub trait XmlText: Sized {
    /// Parses the value. `context` names the element or attribute for errors.
    ///
    /// # Errors
    /// Returns `CodecError::InvalidValue` if the text has the wrong form.
    fn from_text(text: &str, context: &str) -> Result<Self>;

    /// Formats the value.
    fn to_text(&self) -> String;
}

impl XmlText for String {
    fn from_text(text: &str, _context: &str) -> Result<Self> {
        Ok(text.to_string())
    }

    fn to_text(&self) -> String {
        self.clone()
    }
}

impl XmlText for bool {
    fn from_text(text: &str, context: &str) -> Result<Self> {
        match text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(CodecError::invalid_value(context, other, "xs:boolean")),
        }
    }

    fn to_text(&self) -> String {
        self.to_string()
    }
}

macro_rules! impl_xml_text_numeric {
    ($($ty:ty),* $(,)?) => {
        $(
            impl XmlText for $ty {
                fn from_text(text: &str, context: &str) -> Result<Self> {
                    text.trim()
                        .parse()
                        .map_err(|_| CodecError::invalid_value(context, text, stringify!($ty)))
                }

                fn to_text(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_xml_text_numeric!(i32, i64, u16, u32, u64, f64);

/// A value that maps to one element.
pub trait XmlElementValue: Sized {
    /// Reads the value from `element`. The element name is not checked.
    ///
    /// # Errors
    /// Returns a `CodecError` if a required part is missing or malformed.
    fn from_element(element: &XmlElement) -> Result<Self>;

    /// Writes the value as an element called `name`.
    fn to_element(&self, name: &str) -> XmlElement;
}

impl<T: XmlText> XmlElementValue for T {
    fn from_element(element: &XmlElement) -> Result<Self> {
        T::from_text(&element.text, &element.name)
    }

    fn to_element(&self, name: &str) -> XmlElement {
        XmlElement::with_text(name, self.to_text())
    }
}

/// A generated root message type.
///
/// Implementations come from `#[derive(XmlMessage)]` with a `root` argument.
pub trait RootMessage: XmlElementValue {
    /// Local name of the root element.
    const ROOT_ELEMENT: &'static str;
    /// Canonical namespace of the schema the type was generated from.
    const NAMESPACE: &'static str;
    /// Attribute keys owned by typed fields of the root struct.
    const TYPED_ATTRIBUTES: &'static [&'static str];

    /// Side-channel map captured on decode, `None` for a fresh value.
    fn namespace_attrs(&self) -> Option<&NamespaceAttrs>;

    /// Mutable access to the side-channel map.
    fn namespace_attrs_mut(&mut self) -> &mut Option<NamespaceAttrs>;

    /// Decodes a root element, checking its local name.
    ///
    /// # Errors
    /// Returns `CodecError::UnexpectedRoot` if the element is not
    /// [`Self::ROOT_ELEMENT`], or any error of [`XmlElementValue::from_element`].
    fn decode_root(element: &XmlElement) -> Result<Self> {
        if element.name != Self::ROOT_ELEMENT {
            return Err(CodecError::UnexpectedRoot {
                expected: Self::ROOT_ELEMENT.to_string(),
                found: element.name.clone(),
            });
        }
        Self::from_element(element)
    }

    /// Parses and decodes a complete document.
    ///
    /// # Errors
    /// Returns `CodecError::MalformedXml` for bad input or any decode error.
    fn from_xml(xml: &[u8]) -> Result<Self> {
        let root = XmlElement::parse(xml)?;
        Self::decode_root(&root)
    }

    /// Builds the root element, namespace attributes included.
    fn encode_root(&self) -> XmlElement {
        self.to_element(Self::ROOT_ELEMENT)
    }

    /// Encodes the message as a complete document.
    ///
    /// # Errors
    /// Returns `CodecError::Write` if writing fails.
    fn to_xml(&self, options: &WriteOptions) -> Result<Vec<u8>> {
        self.encode_root().to_xml(options)
    }
}

/// Encodes any message as a document.
///
/// The XML declaration is written when `options.declaration` is set.
///
/// # Errors
/// Returns `CodecError::Write` if writing fails.
pub fn encode_document(message: &dyn Message, options: &WriteOptions) -> Result<Vec<u8>> {
    message.to_xml(options)
}

/// Collects the namespace declarations and `xsi:schemaLocation` of a root.
///
/// Declarations are keyed `xmlns:prefix` or `xmlns`. Any attribute in the
/// schema-instance namespace with local name `schemaLocation` is keyed
/// `xsi:schemaLocation`, whatever prefix it was written with. Other
/// attributes are left for typed decoding. The result is never absent, so an
/// element without any of these attributes yields an empty map.
#[must_use]
pub fn capture_side_channel(element: &XmlElement) -> NamespaceAttrs {
    let mut attrs = NamespaceAttrs::new();
    for attr in &element.attributes {
        if attr.is_namespace_declaration() || attr.name == "xmlns" {
            let key = if attr.prefix.as_deref() == Some("xmlns") {
                format!("xmlns:{}", attr.name)
            } else {
                "xmlns".to_string()
            };
            attrs.insert(key, attr.value.clone());
        } else if attr.namespace.as_deref() == Some(XSI_NAMESPACE) && attr.name == "schemaLocation"
        {
            attrs.insert("xsi:schemaLocation", attr.value.clone());
        }
    }
    attrs
}

/// Finalizes a root element built from typed fields.
///
/// `element` holds the typed attributes and children. The root is bound to
/// `namespace`: if an `xmlns:p` entry among the attributes binds it, the root
/// is written as `p:Root`; otherwise a default declaration is forced and a
/// default declaration from the side channel is shadowed. Side-channel entries
/// whose keys are not owned by a typed field are then placed before the typed
/// attributes, in map order. If an `xsi:` attribute ends up on the root with no
/// `xmlns:xsi` in scope, the declaration is added.
pub fn finish_root_element(
    element: &mut XmlElement,
    namespace: &str,
    typed_attributes: &[&str],
    side_channel: Option<&NamespaceAttrs>,
) {
    let owned = |key: &str| {
        typed_attributes.contains(&key) || element.attributes.iter().any(|a| a.matches(key))
    };

    let mut attributes: Vec<XmlAttribute> = side_channel
        .into_iter()
        .flat_map(NamespaceAttrs::iter)
        .filter(|(key, _)| !owned(*key))
        .map(|(key, value)| XmlAttribute::new(key, value))
        .collect();
    attributes.append(&mut element.attributes);

    let bound_prefix = attributes
        .iter()
        .find(|a| a.prefix.as_deref() == Some("xmlns") && a.value == namespace)
        .map(|a| a.name.clone());

    match bound_prefix {
        Some(prefix) => element.prefix = Some(prefix),
        None => {
            element.prefix = None;
            match attributes
                .iter_mut()
                .find(|a| a.prefix.is_none() && a.name == "xmlns")
            {
                Some(default) => default.value = namespace.to_string(),
                None => attributes.insert(0, XmlAttribute::new("xmlns", namespace)),
            }
        }
    }

    let uses_xsi = attributes.iter().any(|a| a.prefix.as_deref() == Some("xsi"));
    let declares_xsi = attributes
        .iter()
        .any(|a| a.prefix.as_deref() == Some("xmlns") && a.name == "xsi");
    if uses_xsi && !declares_xsi {
        let at = attributes
            .iter()
            .position(|a| !a.is_namespace_declaration())
            .unwrap_or(attributes.len());
        attributes.insert(at, XmlAttribute::new("xmlns:xsi", XSI_NAMESPACE));
    }

    element.namespace = Some(namespace.to_string());
    element.attributes = attributes;
}

/// Reads a required attribute.
///
/// # Errors
/// Returns `CodecError::MissingAttribute` if absent, or a conversion error.
pub fn read_attr<T: XmlText>(element: &XmlElement, key: &str) -> Result<T> {
    match element.attr_value(key) {
        Some(value) => T::from_text(value, key),
        None => Err(CodecError::missing_attr(&element.name, key)),
    }
}

/// Reads an optional attribute.
///
/// # Errors
/// Returns a conversion error if the attribute is present but malformed.
pub fn read_optional_attr<T: XmlText>(element: &XmlElement, key: &str) -> Result<Option<T>> {
    element
        .attr_value(key)
        .map(|value| T::from_text(value, key))
        .transpose()
}

/// Reads the character data of an element.
///
/// # Errors
/// Returns a conversion error if the text is malformed.
pub fn read_text<T: XmlText>(element: &XmlElement) -> Result<T> {
    T::from_text(&element.text, &element.name)
}

/// Reads the first child called `name`.
///
/// # Errors
/// Returns `CodecError::MissingElement` if absent, or a decode error.
pub fn read_child<T: XmlElementValue>(element: &XmlElement, name: &str) -> Result<T> {
    match element.child(name) {
        Some(child) => T::from_element(child),
        None => Err(CodecError::missing_element(&element.name, name)),
    }
}

/// Reads the first child called `name`, if present.
///
/// # Errors
/// Returns a decode error if the child is present but malformed.
pub fn read_optional_child<T: XmlElementValue>(
    element: &XmlElement,
    name: &str,
) -> Result<Option<T>> {
    element.child(name).map(T::from_element).transpose()
}

/// Reads every child called `name`, in document order.
///
/// # Errors
/// Returns the first decode error.
pub fn read_children<T: XmlElementValue>(element: &XmlElement, name: &str) -> Result<Vec<T>> {
    element.children_named(name).map(T::from_element).collect()
}

/// Writes an attribute.
pub fn write_attr<T: XmlText>(element: &mut XmlElement, key: &str, value: &T) {
    element.push_attribute(key, value.to_text());
}

/// Writes an attribute if the value is present.
pub fn write_optional_attr<T: XmlText>(element: &mut XmlElement, key: &str, value: Option<&T>) {
    if let Some(value) = value {
        write_attr(element, key, value);
    }
}

/// Writes a child element.
pub fn write_child<T: XmlElementValue>(element: &mut XmlElement, name: &str, value: &T) {
    element.push_child(value.to_element(name));
}

/// Writes a child element if the value is present.
pub fn write_optional_child<T: XmlElementValue>(
    element: &mut XmlElement,
    name: &str,
    value: Option<&T>,
) {
    if let Some(value) = value {
        write_child(element, name, value);
    }
}

/// Writes one child element per value.
pub fn write_children<T: XmlElementValue>(element: &mut XmlElement, name: &str, values: &[T]) {
    for value in values {
        write_child(element, name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::XMLNS_NAMESPACE;

    const ERN: &str = "http://ddex.net/xml/ern/432";

    fn root_with(attrs: &[(&str, &str)]) -> XmlElement {
        let mut xml = String::from("<ern:NewReleaseMessage");
        for (k, v) in attrs {
            xml.push_str(&format!(" {k}=\"{v}\""));
        }
        xml.push_str("/>");
        XmlElement::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_numeric_text() {
        assert_eq!(i32::from_text(" 42 ", "Count").unwrap(), 42);
        let err = u32::from_text("-1", "Count").unwrap_err();
        assert!(matches!(err, CodecError::InvalidValue { .. }));
        assert!(bool::from_text("1", "Flag").unwrap());
        assert!(bool::from_text("yes", "Flag").is_err());
    }

    #[test]
    fn test_capture_side_channel() {
        let root = root_with(&[
            ("xmlns:ern", ERN),
            ("xmlns:xsi", XSI_NAMESPACE),
            ("xsi:schemaLocation", "http://ddex.net/xml/ern/432 x.xsd"),
            ("LanguageAndScriptCode", "en"),
        ]);
        let attrs = capture_side_channel(&root);

        let keys: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["xmlns:ern", "xmlns:xsi", "xsi:schemaLocation"]);
        assert_eq!(attrs.get("xmlns:ern"), Some(ERN));
    }

    #[test]
    fn test_capture_normalizes_xsi_prefix() {
        let xml = format!(
            r#"<Root xmlns:i="{XSI_NAMESPACE}" i:schemaLocation="a b" i:type="T"/>"#
        );
        let root = XmlElement::parse(xml.as_bytes()).unwrap();
        let attrs = capture_side_channel(&root);
        assert_eq!(attrs.get("xsi:schemaLocation"), Some("a b"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn test_capture_without_declarations_is_empty() {
        let root = XmlElement::parse(b"<Root Version=\"1\"/>").unwrap();
        assert!(capture_side_channel(&root).is_empty());
    }

    #[test]
    fn test_finish_uses_bound_prefix() {
        let attrs: NamespaceAttrs = [
            ("xmlns:ern", ERN),
            ("xmlns:xsi", XSI_NAMESPACE),
            ("xsi:schemaLocation", "loc"),
        ]
        .into_iter()
        .collect();

        let mut element = XmlElement::new("NewReleaseMessage");
        element.push_attribute("LanguageAndScriptCode", "en");
        finish_root_element(&mut element, ERN, &["LanguageAndScriptCode"], Some(&attrs));

        assert_eq!(element.qualified_name(), "ern:NewReleaseMessage");
        let keys: Vec<_> = element
            .attributes
            .iter()
            .map(XmlAttribute::qualified_name)
            .collect();
        assert_eq!(
            keys,
            [
                "xmlns:ern",
                "xmlns:xsi",
                "xsi:schemaLocation",
                "LanguageAndScriptCode"
            ]
        );
    }

    #[test]
    fn test_finish_forces_default_namespace() {
        let mut element = XmlElement::new("PieMessage");
        finish_root_element(&mut element, "http://ddex.net/xml/pie/10", &[], None);

        assert_eq!(element.prefix, None);
        assert_eq!(element.attributes.len(), 1);
        assert_eq!(element.attr_value("xmlns"), Some("http://ddex.net/xml/pie/10"));
    }

    #[test]
    fn test_finish_shadows_foreign_default_namespace() {
        let attrs: NamespaceAttrs = [("xmlns", "urn:other")].into_iter().collect();
        let mut element = XmlElement::new("MeadMessage");
        finish_root_element(&mut element, "http://ddex.net/xml/mead/11", &[], Some(&attrs));

        let defaults: Vec<_> = element
            .attributes
            .iter()
            .filter(|a| a.matches("xmlns"))
            .collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].value, "http://ddex.net/xml/mead/11");
    }

    #[test]
    fn test_finish_typed_attribute_wins() {
        let attrs: NamespaceAttrs = [("xmlns:ern", ERN), ("xsi:schemaLocation", "side")]
            .into_iter()
            .collect();
        let mut element = XmlElement::new("NewReleaseMessage");
        element.push_attribute("xsi:schemaLocation", "typed");
        finish_root_element(
            &mut element,
            ERN,
            &["xsi:schemaLocation"],
            Some(&attrs),
        );

        let locations: Vec<_> = element
            .attributes
            .iter()
            .filter(|a| a.matches("xsi:schemaLocation"))
            .map(|a| a.value.as_str())
            .collect();
        assert_eq!(locations, ["typed"]);
        // the xsi prefix gets declared
        assert_eq!(element.attr_value("xmlns:xsi"), Some(XSI_NAMESPACE));
    }

    #[test]
    fn test_finished_root_reparses_into_namespace() {
        let attrs: NamespaceAttrs = [("xmlns:ern", ERN)].into_iter().collect();
        let mut element = XmlElement::new("NewReleaseMessage");
        finish_root_element(&mut element, ERN, &[], Some(&attrs));

        let bytes = element.to_xml(&WriteOptions::compact()).unwrap();
        let reparsed = XmlElement::parse(&bytes).unwrap();
        assert_eq!(reparsed.namespace.as_deref(), Some(ERN));
        assert_eq!(
            reparsed.attributes[0].namespace.as_deref(),
            Some(XMLNS_NAMESPACE)
        );
    }

    #[test]
    fn test_read_helpers() {
        let xml = br#"<Party Id="7"><Name>A</Name><Name>B</Name></Party>"#;
        let element = XmlElement::parse(xml).unwrap();

        let id: u32 = read_attr(&element, "Id").unwrap();
        assert_eq!(id, 7);
        let missing: Option<String> = read_optional_attr(&element, "Role").unwrap();
        assert!(missing.is_none());
        let names: Vec<String> = read_children(&element, "Name").unwrap();
        assert_eq!(names, ["A", "B"]);

        let err = read_child::<String>(&element, "Role").unwrap_err();
        assert_eq!(err, CodecError::missing_element("Party", "Role"));
    }
}
