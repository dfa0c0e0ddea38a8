//! Multi-rank arrays.
//!
//! Rank 1 encodes like a plain sequence: order alone carries position.
//! Higher ranks attach the reserved index attribute to every child, holding
//! the item's full coordinate as a comma-joined list. Decoding drives a
//! cursor coordinate through the array's carrying increment, honoring
//! explicit indices and growing rank and lengths on demand.

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use tc_tree::{Element, Node, NodeRef};

use crate::codable::{Codable, DecodeCx, EncodeCx};
use crate::error::{Error, Result};
use crate::impls::{child_element, require_element};
use crate::multirank::MultiRankArray;
use crate::names;

fn join_coords(coords: &[usize]) -> String {
    let mut out = String::new();
    for (i, c) in coords.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&c.to_string());
    }
    out
}

fn parse_coords(text: &str, node_name: &str) -> Result<Vec<usize>> {
    text.split(',')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .map_err(|err| Error::failure(node_name, err))
        })
        .collect()
}

impl<T: Codable + Default> Codable for MultiRankArray<T> {
    fn encode(&self, name: &str, cx: &EncodeCx<'_>) -> Result<Node> {
        let item_name = T::node_name(cx);
        let mut elem = Element::new(name);
        if self.rank() <= 1 {
            for item in self.iter() {
                elem.push_child(child_element(cx.encode(item, &item_name)?));
            }
        } else {
            for (coords, item) in self.indexed_iter() {
                let mut child = child_element(cx.encode(item, &item_name)?);
                child.set_attribute(names::INDEX, join_coords(&coords));
                elem.push_child(child);
            }
        }
        Ok(Node::Element(elem))
    }

    fn decode(node: NodeRef<'_>, cx: &DecodeCx<'_>) -> Result<Self> {
        let elem = require_element(node)?;
        let mut arr = MultiRankArray::new();
        // One before the first position until a child moves it.
        let mut cursor: Option<Vec<usize>> = None;
        for child in elem.children() {
            let coords = match child.attribute(names::INDEX) {
                Some(text) => parse_coords(text, child.name())?,
                None => match cursor {
                    None => vec![0],
                    Some(mut c) => {
                        arr.increment(&mut c);
                        c
                    }
                },
            };
            let value = cx.decode::<T>(NodeRef::Element(child))?;
            arr.set(&coords, value);

            // Track the cursor at the array's current rank.
            let mut padded = vec![0; arr.rank() - coords.len()];
            padded.extend_from_slice(&coords);
            cursor = Some(padded);
        }
        Ok(arr)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use tc_tree::{Element, Node, NodeRef};

    use crate::codable::{Codable, DecodeCx, EncodeCx};
    use crate::multirank::MultiRankArray;
    use crate::names;
    use crate::registry::TypeRegistry;

    #[test]
    fn rank_two_children_carry_row_major_indices() {
        let registry = TypeRegistry::new();
        let arr = MultiRankArray::from_flat([2, 3], (0..6).collect::<Vec<i32>>());

        let node = arr.encode("grid", &EncodeCx::new(&registry)).unwrap();
        let Node::Element(elem) = &node else {
            panic!("arrays encode as elements");
        };
        assert_eq!(elem.children().len(), 6);
        let indices: Vec<_> = elem
            .children()
            .iter()
            .map(|c| c.attribute(names::INDEX).unwrap())
            .collect();
        assert_eq!(indices, ["0,0", "0,1", "0,2", "1,0", "1,1", "1,2"]);

        let back: MultiRankArray<i32> =
            MultiRankArray::decode(node.as_ref(), &DecodeCx::new(&registry)).unwrap();
        assert_eq!(back.lengths(), &[2, 3]);
        assert_eq!(back, arr);
    }

    #[test]
    fn rank_one_children_are_unindexed() {
        let registry = TypeRegistry::new();
        let arr: MultiRankArray<i32> = (1..4).collect();

        let node = arr.encode("row", &EncodeCx::new(&registry)).unwrap();
        let Node::Element(elem) = &node else { panic!() };
        assert!(
            elem.children()
                .iter()
                .all(|c| c.attribute(names::INDEX).is_none())
        );

        let back: MultiRankArray<i32> =
            MultiRankArray::decode(node.as_ref(), &DecodeCx::new(&registry)).unwrap();
        assert_eq!(back, arr);
    }

    #[test]
    fn rank_three_round_trips() {
        let registry = TypeRegistry::new();
        let arr = MultiRankArray::from_flat([2, 2, 2], (0..8).collect::<Vec<i32>>());
        let node = arr.encode("cube", &EncodeCx::new(&registry)).unwrap();
        let back: MultiRankArray<i32> =
            MultiRankArray::decode(node.as_ref(), &DecodeCx::new(&registry)).unwrap();
        assert_eq!(back, arr);
    }

    #[test]
    fn unindexed_children_advance_the_cursor_with_carry() {
        let registry = TypeRegistry::new();
        // Explicit index puts the cursor at [0,1] in a 2-wide row; the two
        // following children must land at [1,0] and [1,1] by carry.
        let mut doc = Element::new("grid");
        doc.push_child(
            Element::new("i32")
                .with_attribute(names::VALUE, "1")
                .with_attribute(names::INDEX, "0,1"),
        );
        doc.push_child(Element::new("i32").with_attribute(names::VALUE, "2"));
        doc.push_child(Element::new("i32").with_attribute(names::VALUE, "3"));

        let arr: MultiRankArray<i32> =
            MultiRankArray::decode(NodeRef::Element(&doc), &DecodeCx::new(&registry)).unwrap();
        assert_eq!(arr.lengths(), &[2, 2]);
        assert_eq!(arr.get(&[0, 1]), Some(&1));
        assert_eq!(arr.get(&[1, 0]), Some(&2));
        assert_eq!(arr.get(&[1, 1]), Some(&3));
    }

    #[test]
    fn sparse_indices_fill_gaps_with_defaults() {
        let registry = TypeRegistry::new();
        let mut doc = Element::new("row");
        doc.push_child(
            Element::new("i32")
                .with_attribute(names::VALUE, "9")
                .with_attribute(names::INDEX, "3"),
        );

        let arr: MultiRankArray<i32> =
            MultiRankArray::decode(NodeRef::Element(&doc), &DecodeCx::new(&registry)).unwrap();
        assert_eq!(arr.lengths(), &[4]);
        assert_eq!(arr.as_slice(), &[0, 0, 0, 9]);
    }

    #[test]
    fn bad_index_text_is_a_failure() {
        let registry = TypeRegistry::new();
        let doc = Element::new("row").with_child(
            Element::new("i32")
                .with_attribute(names::VALUE, "1")
                .with_attribute(names::INDEX, "a,b"),
        );
        assert!(
            MultiRankArray::<i32>::decode(NodeRef::Element(&doc), &DecodeCx::new(&registry))
                .is_err()
        );
    }
}
