//! Homogeneous collections: one child per item, no type tags.
//!
//! Items are named after their element type (registered name when present).
//! Decoding constructs a fresh collection and appends in document order;
//! item names are not consulted, position alone carries meaning.

use alloc::collections::VecDeque;
use alloc::format;
use alloc::vec::Vec;

use tc_tree::{Element, Node, NodeRef};

use crate::codable::{Codable, DecodeCx, EncodeCx};
use crate::error::{Error, Result};
use crate::impls::{child_element, require_element};

pub(crate) fn encode_sequence<'a, T, I>(items: I, name: &str, cx: &EncodeCx<'_>) -> Result<Node>
where
    T: Codable,
    I: Iterator<Item = &'a T>,
{
    let item_name = T::node_name(cx);
    let mut elem = Element::new(name);
    for item in items {
        elem.push_child(child_element(cx.encode(item, &item_name)?));
    }
    Ok(Node::Element(elem))
}

pub(crate) fn decode_sequence<T: Codable>(node: NodeRef<'_>, cx: &DecodeCx<'_>) -> Result<Vec<T>> {
    let elem = require_element(node)?;
    let mut out = Vec::with_capacity(elem.children().len());
    for child in elem.children() {
        out.push(cx.decode(NodeRef::Element(child))?);
    }
    Ok(out)
}

impl<T: Codable> Codable for Vec<T> {
    fn encode(&self, name: &str, cx: &EncodeCx<'_>) -> Result<Node> {
        encode_sequence(self.iter(), name, cx)
    }

    fn decode(node: NodeRef<'_>, cx: &DecodeCx<'_>) -> Result<Self> {
        decode_sequence(node, cx)
    }
}

impl<T: Codable> Codable for VecDeque<T> {
    fn encode(&self, name: &str, cx: &EncodeCx<'_>) -> Result<Node> {
        encode_sequence(self.iter(), name, cx)
    }

    fn decode(node: NodeRef<'_>, cx: &DecodeCx<'_>) -> Result<Self> {
        decode_sequence(node, cx).map(VecDeque::from)
    }
}

impl<T: Codable, const N: usize> Codable for [T; N] {
    fn encode(&self, name: &str, cx: &EncodeCx<'_>) -> Result<Node> {
        encode_sequence(self.iter(), name, cx)
    }

    fn decode(node: NodeRef<'_>, cx: &DecodeCx<'_>) -> Result<Self> {
        let items = decode_sequence::<T>(node, cx)?;
        let found = items.len();
        items
            .try_into()
            .map_err(|_| Error::malformed(node.name(), format!("expected {N} items, found {found}")))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::VecDeque;
    use alloc::vec;
    use alloc::vec::Vec;

    use tc_tree::Node;

    use crate::codable::{Codable, DecodeCx, EncodeCx};
    use crate::registry::TypeRegistry;

    #[test]
    fn items_are_unindexed_children_in_order() {
        let registry = TypeRegistry::new();
        let node = vec![10i32, 20, 30]
            .encode("scores", &EncodeCx::new(&registry))
            .unwrap();

        let Node::Element(elem) = &node else {
            panic!("sequences encode as elements");
        };
        assert_eq!(elem.children().len(), 3);
        for child in elem.children() {
            assert_eq!(child.name(), "i32");
            assert!(child.attribute(crate::names::INDEX).is_none());
        }

        let back: Vec<i32> = Vec::decode(node.as_ref(), &DecodeCx::new(&registry)).unwrap();
        assert_eq!(back, [10, 20, 30]);
    }

    #[test]
    fn deque_and_fixed_arrays_round_trip() {
        let registry = TypeRegistry::new();
        let cx = EncodeCx::new(&registry);

        let deque: VecDeque<bool> = VecDeque::from(vec![true, false]);
        let node = deque.encode("flags", &cx).unwrap();
        let back: VecDeque<bool> = VecDeque::decode(node.as_ref(), &DecodeCx::new(&registry))
            .unwrap();
        assert_eq!(back, deque);

        let arr = [1u8, 2, 3];
        let node = arr.encode("bytes", &cx).unwrap();
        let back: [u8; 3] = <[u8; 3]>::decode(node.as_ref(), &DecodeCx::new(&registry)).unwrap();
        assert_eq!(back, arr);
    }

    #[test]
    fn fixed_array_length_mismatch_is_an_error() {
        let registry = TypeRegistry::new();
        let node = vec![1u8, 2]
            .encode("bytes", &EncodeCx::new(&registry))
            .unwrap();
        assert!(<[u8; 3]>::decode(node.as_ref(), &DecodeCx::new(&registry)).is_err());
    }

    #[test]
    fn nested_sequences_round_trip() {
        let registry = TypeRegistry::new();
        let grid = vec![vec![1i32, 2], vec![3], vec![]];
        let node = grid.encode("grid", &EncodeCx::new(&registry)).unwrap();
        let back: Vec<Vec<i32>> = Vec::decode(node.as_ref(), &DecodeCx::new(&registry)).unwrap();
        assert_eq!(back, grid);
    }
}
