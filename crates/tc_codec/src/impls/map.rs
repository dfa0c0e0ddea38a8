//! Dictionaries: one wrapper child per pair, with key and value sub-nodes.
//!
//! Decoding inserts in document order, so a duplicate key keeps the last
//! value seen — the documented policy for malformed documents.

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::hash::{BuildHasher, Hash};

use tc_tree::{Element, Node, NodeRef};

use crate::codable::{Codable, DecodeCx, EncodeCx};
use crate::error::{Error, Result};
use crate::impls::require_element;
use crate::names;

fn encode_entries<'a, K, V, I>(pairs: I, name: &str, cx: &EncodeCx<'_>) -> Result<Node>
where
    K: Codable,
    V: Codable,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    let mut elem = Element::new(name);
    for (key, value) in pairs {
        let mut entry = Element::new(names::ITEM);
        entry.push(cx.encode(key, names::KEY)?);
        entry.push(cx.encode(value, names::VALUE)?);
        elem.push_child(entry);
    }
    Ok(Node::Element(elem))
}

fn decode_entry<K: Codable, V: Codable>(entry: &Element, cx: &DecodeCx<'_>) -> Result<(K, V)> {
    let key = match entry.get(names::KEY) {
        Some(node) => cx.decode(node)?,
        None => {
            return Err(Error::MissingNode {
                name: String::from(names::KEY),
            });
        }
    };
    let value = match entry.get(names::VALUE) {
        Some(node) => cx.decode(node)?,
        None => {
            return Err(Error::MissingNode {
                name: String::from(names::VALUE),
            });
        }
    };
    Ok((key, value))
}

impl<K, V> Codable for BTreeMap<K, V>
where
    K: Codable + Ord,
    V: Codable,
{
    fn encode(&self, name: &str, cx: &EncodeCx<'_>) -> Result<Node> {
        encode_entries(self.iter(), name, cx)
    }

    fn decode(node: NodeRef<'_>, cx: &DecodeCx<'_>) -> Result<Self> {
        let elem = require_element(node)?;
        let mut out = BTreeMap::new();
        for child in elem.children() {
            let (key, value) = decode_entry(child, cx)?;
            out.insert(key, value);
        }
        Ok(out)
    }
}

impl<K, V, S> Codable for hashbrown::HashMap<K, V, S>
where
    K: Codable + Eq + Hash,
    V: Codable,
    S: BuildHasher + Default + 'static,
{
    fn encode(&self, name: &str, cx: &EncodeCx<'_>) -> Result<Node> {
        encode_entries(self.iter(), name, cx)
    }

    fn decode(node: NodeRef<'_>, cx: &DecodeCx<'_>) -> Result<Self> {
        let elem = require_element(node)?;
        let mut out = Self::with_capacity_and_hasher(elem.children().len(), S::default());
        for child in elem.children() {
            let (key, value) = decode_entry(child, cx)?;
            out.insert(key, value);
        }
        Ok(out)
    }
}

#[cfg(feature = "std")]
impl<K, V, S> Codable for std::collections::HashMap<K, V, S>
where
    K: Codable + Eq + Hash,
    V: Codable,
    S: BuildHasher + Default + 'static,
{
    fn encode(&self, name: &str, cx: &EncodeCx<'_>) -> Result<Node> {
        encode_entries(self.iter(), name, cx)
    }

    fn decode(node: NodeRef<'_>, cx: &DecodeCx<'_>) -> Result<Self> {
        let elem = require_element(node)?;
        let mut out = Self::with_capacity_and_hasher(elem.children().len(), S::default());
        for child in elem.children() {
            let (key, value) = decode_entry(child, cx)?;
            out.insert(key, value);
        }
        Ok(out)
    }
}

// -----------------------------------------------------------------------------
// Tests
