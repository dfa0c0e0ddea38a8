//! Nullable slots. `None` encodes as an empty element carrying the
//! reserved `type="null"` tag; `Some` encodes transparently.

use alloc::string::String;

use tc_tree::{Element, Node, NodeRef};

use crate::codable::{Codable, DecodeCx, EncodeCx};
use crate::error::Result;
use crate::names;

impl<T: Codable> Codable for Option<T> {
    fn encode(&self, name: &str, cx: &EncodeCx<'_>) -> Result<Node> {
        match self {
            Some(value) => cx.encode(value, name),
            None => Ok(Node::Element(
                Element::new(name).with_attribute(names::TYPE, names::NULL),
            )),
        }
    }

    fn decode(node: NodeRef<'_>, cx: &DecodeCx<'_>) -> Result<Self> {
        if let NodeRef::Element(elem) = node
            && elem.attribute(names::TYPE) == Some(names::NULL)
        {
            return Ok(None);
        }
        cx.decode(node).map(Some)
    }

    fn node_name(cx: &EncodeCx<'_>) -> String {
        T::node_name(cx)
    }
}
