//! `Box<T>` is transparent: the box never shows up in the document.

use alloc::boxed::Box;
use alloc::string::String;

use tc_tree::{Node, NodeRef};

use crate::codable::{Codable, DecodeCx, EncodeCx};
use crate::error::Result;

impl<T: Codable> Codable for Box<T> {
    fn encode(&self, name: &str, cx: &EncodeCx<'_>) -> Result<Node> {
        cx.encode(&**self, name)
    }

    fn decode(node: NodeRef<'_>, cx: &DecodeCx<'_>) -> Result<Self> {
        cx.decode(node).map(Box::new)
    }

    fn node_name(cx: &EncodeCx<'_>) -> String {
        T::node_name(cx)
    }
}
