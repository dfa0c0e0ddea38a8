use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

// -----------------------------------------------------------------------------
// Attribute

/// A named string value attached to an [`Element`].
///
/// Attribute names are unique within one element; inserting a second
/// attribute with the same name replaces the first.
#[derive(Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    /// Creates an attribute from a name and a textual value.
    #[inline]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the attribute name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attribute value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:?}", self.name, self.value)
    }
}

// -----------------------------------------------------------------------------
// Element

/// A named tree node carrying uniquely-named attributes and ordered children.
///
/// This is the unit the codec layer produces and consumes. Elements are
/// assembled once during encode and never mutated after construction during
/// decode.
///
/// # Examples
///
/// ```
/// use tc_tree::Element;
///
/// let elem = Element::new("question")
///     .with_attribute("prompt", "2+2?")
///     .with_child(Element::new("answer"));
///
/// assert_eq!(elem.attribute("prompt"), Some("2+2?"));
/// assert_eq!(elem.children().len(), 1);
/// ```
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an empty element with the given name.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the element name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets an attribute, replacing any existing attribute with the same name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    /// Returns the value of the attribute with the given name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Returns all attributes in insertion order.
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Appends a child element.
    #[inline]
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Returns the first child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Returns all children in document order.
    #[inline]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Attaches a produced [`Node`]: attributes join the attribute set,
    /// elements join the child list.
    pub fn push(&mut self, node: Node) {
        match node {
            Node::Attribute(attr) => match self.attributes.iter_mut().find(|a| a.name == attr.name)
            {
                Some(existing) => existing.value = attr.value,
                None => self.attributes.push(attr),
            },
            Node::Element(elem) => self.children.push(elem),
        }
    }

    /// Looks a name up among attributes first, then among children.
    ///
    /// This is the member-lookup order of the codec layer: a scalar member
    /// lands as an attribute, everything else as a child element, and the
    /// two name spaces never collide for well-formed documents.
    pub fn get(&self, name: &str) -> Option<NodeRef<'_>> {
        if let Some(attr) = self.attributes.iter().find(|a| a.name == name) {
            return Some(NodeRef::Attribute(attr));
        }
        self.child(name).map(NodeRef::Element)
    }

    /// Builder form of [`set_attribute`](Self::set_attribute).
    #[inline]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder form of [`push_child`](Self::push_child).
    #[inline]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .field("children", &self.children)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Node

/// One unit of codec output: a whole element, or an attribute destined for
/// the parent element.
///
/// Which variant a codec returns encodes its placement decision: scalar
/// codecs return attributes, every other codec returns elements.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Node {
    /// An element child.
    Element(Element),
    /// An attribute on the enclosing element.
    Attribute(Attribute),
}

impl Node {
    /// Returns the node name.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Node::Element(e) => e.name(),
            Node::Attribute(a) => a.name(),
        }
    }

    /// Borrows the node.
    #[inline]
    pub fn as_ref(&self) -> NodeRef<'_> {
        match self {
            Node::Element(e) => NodeRef::Element(e),
            Node::Attribute(a) => NodeRef::Attribute(a),
        }
    }

    /// Returns the contained element, if this is one.
    #[inline]
    pub fn into_element(self) -> Option<Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Attribute(_) => None,
        }
    }
}

impl From<Element> for Node {
    #[inline]
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

impl From<Attribute> for Node {
    #[inline]
    fn from(value: Attribute) -> Self {
        Node::Attribute(value)
    }
}

// -----------------------------------------------------------------------------
// NodeRef

/// A borrowed [`Node`], as handed to decoders.
#[derive(Clone, Copy, Debug)]
pub enum NodeRef<'a> {
    /// A borrowed element.
    Element(&'a Element),
    /// A borrowed attribute.
    Attribute(&'a Attribute),
}

impl<'a> NodeRef<'a> {
    /// Returns the node name.
    #[inline]
    pub fn name(&self) -> &'a str {
        match self {
            NodeRef::Element(e) => e.name(),
            NodeRef::Attribute(a) => a.name(),
        }
    }

    /// Returns the element, if this borrows one.
    #[inline]
    pub fn as_element(&self) -> Option<&'a Element> {
        match self {
            NodeRef::Element(e) => Some(e),
            NodeRef::Attribute(_) => None,
        }
    }

    /// Returns the attribute, if this borrows one.
    #[inline]
    pub fn as_attribute(&self) -> Option<&'a Attribute> {
        match self {
            NodeRef::Element(_) => None,
            NodeRef::Attribute(a) => Some(a),
        }
    }
}

impl<'a> From<&'a Node> for NodeRef<'a> {
    #[inline]
    fn from(value: &'a Node) -> Self {
        value.as_ref()
    }
}

// -----------------------------------------------------------------------------
// Tests
