//! Owned XML element tree.
//!
//! Documents are read with `quick_xml` into an ordered tree of [`XmlElement`]
//! values. Prefixes are resolved against the in-scope namespace declarations
//! while reading, so every element and attribute carries both the prefix it
//! was written with and the namespace URI it is bound to.

use crate::error::{CodecError, Result};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Namespace bound to `xmlns` and every `xmlns:*` attribute.
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";
/// Namespace bound to the reserved `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
/// XML Schema instance namespace.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Splits a qualified name into its prefix and local part.
#[must_use]
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, qname),
    }
}

/// An attribute on an [`XmlElement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Prefix as written in the document.
    pub prefix: Option<String>,
    /// Local name.
    pub name: String,
    /// Namespace URI the prefix resolved to, if any.
    pub namespace: Option<String>,
    /// Unescaped value.
    pub value: String,
}

impl XmlAttribute {
    /// Creates an attribute from a qualified name such as `xsi:schemaLocation`.
    ///
    /// The namespace is left unresolved; it is only known for attributes read
    /// from a document.
    #[must_use]
    pub fn new(qualified_name: &str, value: impl Into<String>) -> Self {
        let (prefix, name) = split_qname(qualified_name);
        Self {
            prefix: prefix.map(str::to_string),
            name: name.to_string(),
            namespace: None,
            value: value.into(),
        }
    }

    /// Returns the name as written, `prefix:local` or `local`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Returns true if this attribute is itself a namespace declaration.
    #[must_use]
    pub fn is_namespace_declaration(&self) -> bool {
        self.namespace.as_deref() == Some(XMLNS_NAMESPACE)
            || self.prefix.as_deref() == Some("xmlns")
            || (self.prefix.is_none() && self.name == "xmlns")
    }

    /// Returns true if `key` names this attribute.
    ///
    /// A prefixed key matches on prefix and local name; an unprefixed key only
    /// matches unprefixed attributes.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        let (prefix, local) = split_qname(key);
        self.name == local && self.prefix.as_deref() == prefix
    }
}

/// An element with its attributes, character data and ordered children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Prefix as written in the document.
    pub prefix: Option<String>,
    /// Local name.
    pub name: String,
    /// Namespace URI the element is bound to, if any.
    pub namespace: Option<String>,
    /// Attributes in document order, namespace declarations included.
    pub attributes: Vec<XmlAttribute>,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
    /// Concatenated character data directly inside this element.
    pub text: String,
}

impl XmlElement {
    /// Creates an empty unprefixed element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates a leaf element holding `text`.
    #[must_use]
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns the name as written, `prefix:local` or `local`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Finds an attribute by key, see [`XmlAttribute::matches`].
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&XmlAttribute> {
        self.attributes.iter().find(|attr| attr.matches(key))
    }

    /// Returns the value of an attribute by key.
    #[must_use]
    pub fn attr_value(&self, key: &str) -> Option<&str> {
        self.attribute(key).map(|attr| attr.value.as_str())
    }

    /// Returns the first child with the given local name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Iterates over children with the given local name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Iterates over the namespace declarations on this element.
    pub fn namespace_declarations(&self) -> impl Iterator<Item = &XmlAttribute> {
        self.attributes
            .iter()
            .filter(|attr| attr.is_namespace_declaration())
    }

    /// Appends an attribute given its qualified name.
    pub fn push_attribute(&mut self, key: &str, value: impl Into<String>) {
        self.attributes.push(XmlAttribute::new(key, value));
    }

    /// Appends a child element.
    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Returns true if the element has no child elements.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Counts this element and all of its descendants.
    #[must_use]
    pub fn count_elements(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(XmlElement::count_elements)
            .sum::<usize>()
    }

    /// Parses a complete document and returns its root element.
    ///
    /// # Errors
    /// Returns `CodecError::MalformedXml` if the document is not well-formed and
    /// `CodecError::NoRootElement` if it holds no element at all.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut scopes = NamespaceScopes::default();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| CodecError::malformed(e, reader.buffer_position() as u64))?;
            let position = reader.buffer_position() as u64;

            match event {
                Event::Start(ref e) => {
                    if root.is_some() {
                        return Err(CodecError::malformed(
                            "element after the root element",
                            position,
                        ));
                    }
                    stack.push(open_element(e, &mut scopes, position)?);
                }
                Event::Empty(ref e) => {
                    if root.is_some() {
                        return Err(CodecError::malformed(
                            "element after the root element",
                            position,
                        ));
                    }
                    let element = open_element(e, &mut scopes, position)?;
                    scopes.pop();
                    attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    scopes.pop();
                    let mut element = stack
                        .pop()
                        .ok_or_else(|| CodecError::malformed("unmatched end tag", position))?;
                    if !element.children.is_empty() && element.text.trim().is_empty() {
                        element.text.clear();
                    }
                    attach(&mut stack, &mut root, element);
                }
                Event::Text(ref t) => {
                    if let Some(current) = stack.last_mut() {
                        let raw = utf8(t.as_ref(), position)?;
                        let text =
                            unescape(raw).map_err(|e| CodecError::malformed(e, position))?;
                        current.text.push_str(&text);
                    }
                }
                Event::CData(ref t) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(utf8(t.as_ref(), position)?);
                    }
                }
                Event::GeneralRef(ref r) => {
                    if let Some(current) = stack.last_mut() {
                        let name = utf8(r.as_ref(), position)?;
                        let reference = format!("&{name};");
                        let resolved = unescape(&reference)
                            .map_err(|e| CodecError::malformed(e, position))?;
                        current.text.push_str(&resolved);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(CodecError::malformed(
                "unexpected end of document",
                reader.buffer_position() as u64,
            ));
        }

        root.ok_or(CodecError::NoRootElement)
    }

    /// Reads only up to the first start tag and returns it without children.
    ///
    /// The rest of the document is never read, so trailing malformed content
    /// is not detected here.
    ///
    /// # Errors
    /// Returns `CodecError::MalformedXml` if the stream fails before a start tag
    /// and `CodecError::NoRootElement` if it ends first.
    pub fn peek_root(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut scopes = NamespaceScopes::default();
        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| CodecError::malformed(e, reader.buffer_position() as u64))?;
            let position = reader.buffer_position() as u64;

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    return open_element(e, &mut scopes, position);
                }
                Event::Eof => return Err(CodecError::NoRootElement),
                _ => {}
            }
            buf.clear();
        }
    }

    /// Serializes this element and its subtree.
    ///
    /// # Errors
    /// Returns `CodecError::Write` if the writer fails.
    pub fn to_xml(&self, options: &WriteOptions) -> Result<Vec<u8>> {
        let mut writer = match options.indent {
            Some(width) => Writer::new_with_indent(Vec::new(), b' ', width),
            None => Writer::new(Vec::new()),
        };

        if options.declaration {
            writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
                .map_err(CodecError::write)?;
        }

        write_element(&mut writer, self)?;
        Ok(writer.into_inner())
    }
}

/// Options controlling how an element tree is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Indentation width in spaces, or `None` for compact output.
    pub indent: Option<usize>,
    /// Whether to emit an XML declaration before the root element.
    pub declaration: bool,
}

impl WriteOptions {
    /// Compact output without declaration.
    #[must_use]
    pub const fn compact() -> Self {
        Self {
            indent: None,
            declaration: false,
        }
    }

    /// Sets the indentation width.
    #[must_use]
    pub const fn indent(mut self, width: usize) -> Self {
        self.indent = Some(width);
        self
    }

    /// Enables or disables the XML declaration.
    #[must_use]
    pub const fn declaration(mut self, enabled: bool) -> Self {
        self.declaration = enabled;
        self
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: Some(2),
            declaration: false,
        }
    }
}

/// Stack of namespace declarations in scope while reading.
#[derive(Debug, Default)]
struct NamespaceScopes {
    frames: Vec<Vec<(Option<String>, String)>>,
}

impl NamespaceScopes {
    fn push(&mut self, frame: Vec<(Option<String>, String)>) {
        self.frames.push(frame);
    }

    fn pop(&mut self) {
        self.frames.pop();
    }

    /// Resolves a prefix, or the default namespace for `None`.
    fn resolve(&self, prefix: Option<&str>) -> Option<String> {
        match prefix {
            Some("xml") => return Some(XML_NAMESPACE.to_string()),
            Some("xmlns") => return Some(XMLNS_NAMESPACE.to_string()),
            _ => {}
        }
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|(declared, _)| declared.as_deref() == prefix)
            .and_then(|(_, uri)| (!uri.is_empty()).then(|| uri.clone()))
    }
}

fn utf8(bytes: &[u8], position: u64) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| CodecError::malformed(e, position))
}

/// Builds an element from a start tag and pushes its declarations in scope.
fn open_element(
    start: &BytesStart<'_>,
    scopes: &mut NamespaceScopes,
    position: u64,
) -> Result<XmlElement> {
    let qname = utf8(start.name().as_ref(), position)?.to_string();
    let mut raw_attributes = Vec::new();
    let mut declarations = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| CodecError::malformed(e, position))?;
        let key = utf8(attr.key.as_ref(), position)?.to_string();
        let raw = utf8(attr.value.as_ref(), position)?;
        let value = unescape(raw)
            .map_err(|e| CodecError::malformed(e, position))?
            .into_owned();

        if key == "xmlns" {
            declarations.push((None, value.clone()));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            declarations.push((Some(prefix.to_string()), value.clone()));
        }
        raw_attributes.push((key, value));
    }

    scopes.push(declarations);

    let (prefix, name) = split_qname(&qname);
    let mut element = XmlElement {
        prefix: prefix.map(str::to_string),
        name: name.to_string(),
        namespace: scopes.resolve(prefix),
        ..XmlElement::default()
    };

    for (key, value) in raw_attributes {
        let (prefix, name) = split_qname(&key);
        let namespace = if key == "xmlns" {
            Some(XMLNS_NAMESPACE.to_string())
        } else {
            prefix.and_then(|p| scopes.resolve(Some(p)))
        };
        element.attributes.push(XmlAttribute {
            prefix: prefix.map(str::to_string),
            name: name.to_string(),
            namespace,
            value,
        });
    }

    Ok(element)
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<()> {
    let name = element.qualified_name();
    let mut start = BytesStart::new(name.as_str());
    for attr in &element.attributes {
        let key = attr.qualified_name();
        start.push_attribute((key.as_str(), attr.value.as_str()));
    }

    if element.children.is_empty() && element.text.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(CodecError::write)?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(start))
        .map_err(CodecError::write)?;
    if !element.text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&element.text)))
            .map_err(CodecError::write)?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(name.as_str())))
        .map_err(CodecError::write)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ern:NewReleaseMessage xmlns:ern="http://ddex.net/xml/ern/432"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xsi:schemaLocation="http://ddex.net/xml/ern/432 release-notification.xsd"
    LanguageAndScriptCode="en">
  <MessageHeader>
    <MessageId>MSG-1</MessageId>
    <MessageSender><PartyName><FullName>Label &amp; Co</FullName></PartyName></MessageSender>
  </MessageHeader>
  <ReleaseList/>
</ern:NewReleaseMessage>"#;

    #[test]
    fn test_parse_resolves_namespaces() {
        let root = XmlElement::parse(DOC.as_bytes()).expect("Failed to parse");

        assert_eq!(root.name, "NewReleaseMessage");
        assert_eq!(root.prefix.as_deref(), Some("ern"));
        assert_eq!(root.namespace.as_deref(), Some("http://ddex.net/xml/ern/432"));

        let location = root.attribute("xsi:schemaLocation").unwrap();
        assert_eq!(location.namespace.as_deref(), Some(XSI_NAMESPACE));
        assert_eq!(root.attr_value("LanguageAndScriptCode"), Some("en"));
        assert_eq!(root.namespace_declarations().count(), 2);

        // children are unqualified
        let header = root.child("MessageHeader").unwrap();
        assert_eq!(header.namespace, None);
        assert!(header.text.is_empty());
    }

    #[test]
    fn test_parse_resolves_entities() {
        let root = XmlElement::parse(DOC.as_bytes()).unwrap();
        let full_name = root
            .child("MessageHeader")
            .and_then(|h| h.child("MessageSender"))
            .and_then(|s| s.child("PartyName"))
            .and_then(|p| p.child("FullName"))
            .unwrap();
        assert_eq!(full_name.text, "Label & Co");
    }

    #[test]
    fn test_parse_counts_elements() {
        let root = XmlElement::parse(DOC.as_bytes()).unwrap();
        assert_eq!(root.count_elements(), 7);
    }

    #[test]
    fn test_parse_default_namespace_applies_to_children() {
        let xml = br#"<Root xmlns="urn:a"><Child/></Root>"#;
        let root = XmlElement::parse(xml).unwrap();
        assert_eq!(root.namespace.as_deref(), Some("urn:a"));
        assert_eq!(root.children[0].namespace.as_deref(), Some("urn:a"));
        assert!(root.attributes[0].is_namespace_declaration());
    }

    #[test]
    fn test_parse_malformed() {
        let err = XmlElement::parse(b"<Root><Child></Root>").unwrap_err();
        assert!(err.is_malformed());

        let err = XmlElement::parse(b"<Root>").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_parse_empty_document() {
        let err = XmlElement::parse(b"<?xml version=\"1.0\"?>\n").unwrap_err();
        assert_eq!(err, CodecError::NoRootElement);
    }

    #[test]
    fn test_peek_root_stops_at_first_start_tag() {
        // trailing garbage is never read
        let xml = b"<?xml version=\"1.0\"?><PieMessage xmlns=\"http://ddex.net/xml/pie/10\"><<<";
        let root = XmlElement::peek_root(xml).unwrap();
        assert_eq!(root.name, "PieMessage");
        assert_eq!(root.namespace.as_deref(), Some("http://ddex.net/xml/pie/10"));
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_write_round_trip() {
        let root = XmlElement::parse(DOC.as_bytes()).unwrap();
        let bytes = root.to_xml(&WriteOptions::default()).unwrap();
        let reparsed = XmlElement::parse(&bytes).unwrap();
        assert_eq!(root, reparsed);
    }

    #[test]
    fn test_write_escapes_text_and_attributes() {
        let mut element = XmlElement::with_text("FullName", "A < B & C");
        element.push_attribute("Note", "\"quoted\"");
        let bytes = element.to_xml(&WriteOptions::compact()).unwrap();
        let reparsed = XmlElement::parse(&bytes).unwrap();
        assert_eq!(reparsed.text, "A < B & C");
        assert_eq!(reparsed.attr_value("Note"), Some("\"quoted\""));
    }

    #[test]
    fn test_write_declaration() {
        let element = XmlElement::new("Empty");
        let bytes = element
            .to_xml(&WriteOptions::compact().declaration(true))
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(text.ends_with("<Empty/>"));
    }

    #[test]
    fn test_attribute_matches() {
        let attr = XmlAttribute::new("xsi:schemaLocation", "x");
        assert!(attr.matches("xsi:schemaLocation"));
        assert!(!attr.matches("schemaLocation"));

        let plain = XmlAttribute::new("Namespace", "DPID");
        assert!(plain.matches("Namespace"));
        assert!(!plain.is_namespace_declaration());
    }
}
