//! Type-erased messages and the handles the registry stores.

use crate::attrs::NamespaceAttrs;
use crate::codec::RootMessage;
use crate::error::Result;
use crate::namespace::Family;
use crate::tree::{WriteOptions, XmlElement};
use std::any::Any;
use std::fmt;

/// A decoded root message of any registered type.
///
/// Every [`RootMessage`] that is `Clone + Debug + Send + Sync` implements this
/// trait. The concrete type is recovered with `downcast_ref` on
/// `dyn Message`.
pub trait Message: Any + Send + Sync + fmt::Debug {
    /// Local name of the root element.
    fn root_element_name(&self) -> &'static str;

    /// Canonical namespace of the message type.
    fn namespace_uri(&self) -> &'static str;

    /// Side-channel namespace attributes, if the message was decoded.
    fn side_channel(&self) -> Option<&NamespaceAttrs>;

    /// Replaces the contents of `self` with the decoded root element.
    ///
    /// # Errors
    /// Returns a `CodecError` if the element does not match the type.
    fn decode_from_element(&mut self, element: &XmlElement) -> Result<()>;

    /// Builds the root element.
    fn encode_root_element(&self) -> XmlElement;

    /// Clones the message behind a fresh box.
    fn clone_message(&self) -> Box<dyn Message>;

    /// Borrows the message as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Converts the boxed message into `Box<dyn Any>`.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T> Message for T
where
    T: RootMessage + Clone + fmt::Debug + Send + Sync + 'static,
{
    fn root_element_name(&self) -> &'static str {
        T::ROOT_ELEMENT
    }

    fn namespace_uri(&self) -> &'static str {
        T::NAMESPACE
    }

    fn side_channel(&self) -> Option<&NamespaceAttrs> {
        self.namespace_attrs()
    }

    fn decode_from_element(&mut self, element: &XmlElement) -> Result<()> {
        *self = T::decode_root(element)?;
        Ok(())
    }

    fn encode_root_element(&self) -> XmlElement {
        self.encode_root()
    }

    fn clone_message(&self) -> Box<dyn Message> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn Message {
    /// Returns the concrete message if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: Message>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Returns true if the message is a `T`.
    #[must_use]
    pub fn is<T: Message>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Unboxes the concrete message if it is a `T`.
    #[must_use]
    pub fn downcast<T: Message>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }

    /// Encodes the message as a complete document.
    ///
    /// # Errors
    /// Returns `CodecError::Write` if writing fails.
    pub fn to_xml(&self, options: &WriteOptions) -> Result<Vec<u8>> {
        self.encode_root_element().to_xml(options)
    }
}

impl Clone for Box<dyn Message> {
    fn clone(&self) -> Self {
        self.clone_message()
    }
}

fn construct<T: Message + Default>() -> Box<dyn Message> {
    Box::new(T::default())
}

fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Handle to a concrete root message type.
///
/// Holds the static facts of the type together with a factory that yields
/// its zero value.
#[derive(Clone, Copy)]
pub struct TypeHandle {
    type_name: &'static str,
    root_element: &'static str,
    namespace: &'static str,
    construct: fn() -> Box<dyn Message>,
}

impl TypeHandle {
    /// Creates the handle of `T`.
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: RootMessage + Message + Default,
    {
        Self {
            type_name: std::any::type_name::<T>(),
            root_element: T::ROOT_ELEMENT,
            namespace: T::NAMESPACE,
            construct: construct::<T>,
        }
    }

    /// Fully qualified Rust type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type name without its module path, e.g. `NewReleaseMessage`.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        short_type_name(self.type_name)
    }

    /// Root element the type binds.
    #[must_use]
    pub const fn root_element(&self) -> &'static str {
        self.root_element
    }

    /// Canonical namespace of the type.
    #[must_use]
    pub const fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// Returns a fresh zero value of the type.
    #[must_use]
    pub fn instantiate(&self) -> Box<dyn Message> {
        (self.construct)()
    }

    /// Decodes a root element into a new value of the type.
    ///
    /// # Errors
    /// Returns a `CodecError` if the element does not match the type.
    pub fn decode_element(&self, element: &XmlElement) -> Result<Box<dyn Message>> {
        let mut message = self.instantiate();
        message.decode_from_element(element)?;
        Ok(message)
    }

    /// Parses and decodes a document into a new value of the type.
    ///
    /// # Errors
    /// Returns `CodecError::MalformedXml` for bad input or any decode error.
    pub fn decode(&self, xml: &[u8]) -> Result<Box<dyn Message>> {
        let root = XmlElement::parse(xml)?;
        self.decode_element(&root)
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeHandle")
            .field("type_name", &self.type_name)
            .field("root_element", &self.root_element)
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
    }
}

impl Eq for TypeHandle {}

/// Enumeration facts produced by `#[derive(XmlEnum)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumDescriptor {
    /// Rust type name of the enumeration.
    pub name: &'static str,
    /// Wire strings of every variant except the sentinel, in declaration order.
    pub values: &'static [&'static str],
}

/// A type exported by a schema package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageType {
    /// Rust type name without its module path, matched against the
    /// root-message allow-list. It may differ from the root element name.
    pub name: &'static str,
    /// Handle of the type.
    pub handle: TypeHandle,
}

/// The exported types of one generated schema version.
#[derive(Debug, Clone)]
pub struct SchemaPackage {
    /// Schema family.
    pub family: Family,
    /// Normalized version, e.g. `"432"`.
    pub version: &'static str,
    /// Canonical namespace the package was generated for.
    pub namespace: &'static str,
    /// Exported message types.
    pub types: Vec<PackageType>,
    /// Exported enumerations.
    pub enums: Vec<EnumDescriptor>,
}

impl SchemaPackage {
    /// Creates an empty package.
    #[must_use]
    pub const fn new(family: Family, version: &'static str, namespace: &'static str) -> Self {
        Self {
            family,
            version,
            namespace,
            types: Vec::new(),
            enums: Vec::new(),
        }
    }

    /// Adds a candidate root type under its Rust type name.
    #[must_use]
    pub fn with_type<T>(mut self) -> Self
    where
        T: RootMessage + Message + Default,
    {
        let handle = TypeHandle::of::<T>();
        self.types.push(PackageType {
            name: handle.short_name(),
            handle,
        });
        self
    }

    /// Adds an enumeration.
    #[must_use]
    pub fn with_enum<E: crate::XmlEnum>(mut self) -> Self {
        self.enums.push(E::descriptor());
        self
    }
}
