//! The polymorphic codec: values typed only at runtime.
//!
//! A [`DynValue`] encodes through its runtime type and tags the result with
//! that type's registered name; decoding resolves the tag back through the
//! registry. Heterogeneous collections are simply `Vec<DynValue>` — every
//! item self-tags. This module is the engine's one deliberate
//! dynamic-dispatch boundary.

use alloc::borrow::Cow;
use alloc::string::String;

use tc_tree::{Node, NodeRef};

use crate::codable::{AnyCodable, Codable, DecodeCx, DynValue, EncodeCx};
use crate::error::{Error, Result};
use crate::impls::{child_element, require_element};
use crate::names;

impl Codable for DynValue {
    fn encode(&self, name: &str, cx: &EncodeCx<'_>) -> Result<Node> {
        let value: &dyn AnyCodable = &**self;
        let tag = match cx.registry().name_of(value.ty_id()) {
            Some(tag) => tag,
            None => {
                return Err(Error::UnsupportedType {
                    type_path: Cow::Borrowed(value.type_path()),
                });
            }
        };
        let node = value.encode_any(name, cx)?;
        let mut elem = child_element(node);
        elem.set_attribute(names::TYPE, tag);
        Ok(Node::Element(elem))
    }

    fn decode(node: NodeRef<'_>, cx: &DecodeCx<'_>) -> Result<Self> {
        let elem = require_element(node)?;
        let tag = match elem.attribute(names::TYPE) {
            Some(tag) => tag,
            None => {
                return Err(Error::MissingNode {
                    name: String::from(names::TYPE),
                });
            }
        };
        if tag == names::NULL {
            // Only a nullable (`Option`) slot has a default to decode
            // "null" into; a bare slot treats it as an absent value.
            return Err(Error::MissingNode {
                name: String::from(elem.name()),
            });
        }
        cx.registry().decode_dynamic(tag, elem, cx)
    }

    fn node_name(_cx: &EncodeCx<'_>) -> String {
        String::from(names::ITEM)
    }
}

// -----------------------------------------------------------------------------
// Tests
