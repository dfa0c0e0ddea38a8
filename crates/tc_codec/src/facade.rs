use alloc::string::{String, ToString};
use alloc::vec::Vec;

use std::io::{Read, Write};
use std::path::Path;

use tc_tree::{Element, Node, NodeRef};

use crate::codable::{Codable, DecodeCx, EncodeCx};
use crate::error::{Error, Result};
use crate::names;
use crate::registry::{TypeRegistry, TypeRegistryArc};

/// Version stamped on every saved document root; [`Serializer::load`]
/// rejects anything else before touching the body.
pub const FORMAT_VERSION: u32 = 1;

// -----------------------------------------------------------------------------
// Serializer

/// The engine facade: serialize, deserialize, save, load, register.
///
/// A serializer owns a shared [`TypeRegistryArc`]; registration typically
/// happens once at startup and every operation afterwards reads the
/// registry under its lock for the duration of the call. Execution is
/// synchronous and recursive — nesting depth follows the object graph, and
/// cyclic graphs are unsupported by design (they exhaust the call stack).
///
/// # Examples
///
/// ```
/// use tc_codec::Serializer;
///
/// #[derive(tc_codec::derive::Codable, Default, PartialEq, Debug)]
/// struct Question {
///     prompt: String,
///     points: u32,
/// }
///
/// let ser = Serializer::new();
/// ser.register::<Question>("question").unwrap();
///
/// let question = Question { prompt: "2+2?".into(), points: 5 };
/// let node = ser.serialize(&question).unwrap();
/// assert_eq!(node.name(), "question");
///
/// let back: Question = ser.deserialize(&node).unwrap();
/// assert_eq!(back, question);
/// ```
#[derive(Clone, Default)]
pub struct Serializer {
    registry: TypeRegistryArc,
}

impl Serializer {
    /// Creates a serializer over a fresh registry holding the built-in
    /// scalar registrations.
    pub fn new() -> Self {
        Self {
            registry: TypeRegistryArc::new(TypeRegistry::new()),
        }
    }

    /// Creates a serializer over an existing shared registry.
    pub fn with_registry(registry: TypeRegistryArc) -> Self {
        Self { registry }
    }

    /// Returns the shared registry.
    #[inline]
    pub fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    /// Registers type `T` under a canonical document name.
    pub fn register<T: Codable>(&self, name: impl Into<String>) -> Result<()> {
        self.registry.write().register::<T>(name)
    }

    /// Registers type `T` with a custom codec pair.
    pub fn register_with<T, E, D>(&self, name: impl Into<String>, encode: E, decode: D) -> Result<()>
    where
        T: Codable,
        E: Fn(&T, &str, &EncodeCx<'_>) -> Result<Node> + Send + Sync + 'static,
        D: Fn(NodeRef<'_>, &DecodeCx<'_>) -> Result<T> + Send + Sync + 'static,
    {
        self.registry.write().register_with::<T, E, D>(name, encode, decode)
    }

    /// Encodes a value under its canonical name (registered name if any,
    /// short type name otherwise).
    pub fn serialize<T: Codable>(&self, value: &T) -> Result<Node> {
        let registry = self.registry.read();
        let cx = EncodeCx::new(&registry);
        let name = T::node_name(&cx);
        cx.encode(value, &name)
    }

    /// Encodes a value under an explicit node name.
    pub fn serialize_as<T: Codable>(&self, value: &T, name: &str) -> Result<Node> {
        let registry = self.registry.read();
        EncodeCx::new(&registry).encode(value, name)
    }

    /// Reconstructs a value from a node.
    pub fn deserialize<T: Codable>(&self, node: &Node) -> Result<T> {
        let registry = self.registry.read();
        DecodeCx::new(&registry).decode(node.as_ref())
    }

    /// Serializes a value and writes it out as a versioned XML document.
    pub fn save<T: Codable, W: Write>(&self, value: &T, writer: &mut W) -> Result<()> {
        let text = self.save_string(value)?;
        writer
            .write_all(text.as_bytes())
            .map_err(|err| Error::failure("<document>", err))
    }

    /// [`save`](Self::save) into a string.
    pub fn save_string<T: Codable>(&self, value: &T) -> Result<String> {
        let node = self.serialize(value)?;
        let mut root = root_element(node);
        root.set_attribute(names::VERSION, FORMAT_VERSION.to_string());
        log::debug!("saving `{}` document", root.name());

        let mut out = Vec::new();
        match root.write_xml(&mut out) {
            Ok(()) => {}
            // Writing into a Vec cannot fail.
            Err(err) => return Err(Error::failure(root.name(), err)),
        }
        match String::from_utf8(out) {
            Ok(text) => Ok(text),
            Err(err) => Err(Error::failure(root.name(), err)),
        }
    }

    /// Reads, version-checks and decodes a document.
    ///
    /// The whole document is materialized before decoding; a version
    /// mismatch is rejected before the body is looked at.
    pub fn load<T: Codable, R: Read>(&self, reader: &mut R) -> Result<T> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|err| Error::failure("<document>", err))?;
        self.load_str(&text)
    }

    /// [`load`](Self::load) from a string.
    pub fn load_str<T: Codable>(&self, text: &str) -> Result<T> {
        let root = Element::from_xml(text).map_err(|err| Error::failure("<document>", err))?;
        match root.attribute(names::VERSION).map(str::parse::<u32>) {
            Some(Ok(version)) if version == FORMAT_VERSION => {}
            Some(Ok(version)) => {
                return Err(Error::VersionMismatch {
                    found: Some(version),
                    supported: FORMAT_VERSION,
                });
            }
            Some(Err(_)) | None => {
                return Err(Error::VersionMismatch {
                    found: None,
                    supported: FORMAT_VERSION,
                });
            }
        }
        log::debug!("loading `{}` document", root.name());
        self.deserialize(&Node::Element(root))
    }

    /// Saves a value to a file.
    pub fn save_file<T: Codable>(&self, value: &T, path: impl AsRef<Path>) -> Result<()> {
        let mut file = std::fs::File::create(path).map_err(|err| Error::failure("<document>", err))?;
        self.save(value, &mut file)
    }

    /// Loads a value from a file.
    pub fn load_file<T: Codable>(&self, path: impl AsRef<Path>) -> Result<T> {
        let mut file = std::fs::File::open(path).map_err(|err| Error::failure("<document>", err))?;
        self.load(&mut file)
    }
}

/// Puts a serialized root into element position; a scalar root is hoisted
/// onto an element carrying the reserved value attribute.
fn root_element(node: Node) -> Element {
    match node {
        Node::Element(elem) => elem,
        Node::Attribute(attr) => {
            Element::new(attr.name()).with_attribute(names::VALUE, attr.value())
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
