//! `Codable` impls for the built-in type shapes.

mod array;
mod boxed;
mod dynamic;
mod map;
mod option;
mod scalar;
mod sequence;

use tc_tree::{Element, Node, NodeRef};

use crate::error::{Error, Result};
use crate::names;

/// Puts a produced node into child-element position: elements pass through,
/// attributes (scalars) are hoisted into an element carrying the reserved
/// value attribute.
pub(crate) fn child_element(node: Node) -> Element {
    match node {
        Node::Element(elem) => elem,
        Node::Attribute(attr) => {
            Element::new(attr.name()).with_attribute(names::VALUE, attr.value())
        }
    }
}

/// Demands element position for codecs that cannot decode an attribute.
pub(crate) fn require_element<'a>(node: NodeRef<'a>) -> Result<&'a Element> {
    match node.as_element() {
        Some(elem) => Ok(elem),
        None => Err(Error::malformed(node.name(), "expected an element")),
    }
}
