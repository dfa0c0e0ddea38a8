//! Scalars encode as a single attribute in canonical text form.

use alloc::string::{String, ToString};
use core::str::FromStr;

use tc_tree::{Attribute, Node, NodeRef};

use crate::codable::{Codable, DecodeCx, EncodeCx};
use crate::error::{Error, Result};
use crate::names;

/// The text of a scalar node: the attribute's own value, or the reserved
/// value attribute when the scalar was hoisted into element position.
pub(crate) fn scalar_text(node: NodeRef<'_>) -> Option<&str> {
    match node {
        NodeRef::Attribute(attr) => Some(attr.value()),
        NodeRef::Element(elem) => elem.attribute(names::VALUE),
    }
}

fn decode_scalar<T>(node: NodeRef<'_>) -> Result<T>
where
    T: FromStr + Default,
    T::Err: core::error::Error + Send + Sync + 'static,
{
    match scalar_text(node) {
        // An absent value attribute yields the default, never an error.
        None => Ok(T::default()),
        Some(text) => text.parse().map_err(|err| Error::failure(node.name(), err)),
    }
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Codable for $ty {
            fn encode(&self, name: &str, _cx: &EncodeCx<'_>) -> Result<Node> {
                Ok(Node::Attribute(Attribute::new(name, self.to_string())))
            }

            fn decode(node: NodeRef<'_>, _cx: &DecodeCx<'_>) -> Result<Self> {
                decode_scalar(node)
            }
        }
    )*};
}

impl_scalar!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, String,
);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use tc_tree::{Element, NodeRef};

    use crate::codable::{Codable, DecodeCx, EncodeCx};
    use crate::error::Error;
    use crate::names;
    use crate::registry::TypeRegistry;

    fn round_trip<T: Codable + PartialEq + core::fmt::Debug>(value: T) {
        let registry = TypeRegistry::new();
        let node = value.encode("field", &EncodeCx::new(&registry)).unwrap();
        assert!(node.as_ref().as_attribute().is_some());
        let back = T::decode(node.as_ref(), &DecodeCx::new(&registry)).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn scalars_round_trip_as_attributes() {
        round_trip(true);
        round_trip('x');
        round_trip(-42i32);
        round_trip(42u64);
        round_trip(2.5f64);
        round_trip(String::from("hello <world> & \"friends\""));
    }

    #[test]
    fn absent_value_yields_the_default() {
        let registry = TypeRegistry::new();
        let elem = Element::new("count");
        let value = i32::decode(NodeRef::Element(&elem), &DecodeCx::new(&registry)).unwrap();
        assert_eq!(value, 0);
    }

    #[test]
    fn hoisted_scalars_read_the_value_attribute() {
        let registry = TypeRegistry::new();
        let elem = Element::new("count").with_attribute(names::VALUE, "7");
        let value = i32::decode(NodeRef::Element(&elem), &DecodeCx::new(&registry)).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn unparsable_text_is_a_failure_naming_the_node() {
        let registry = TypeRegistry::new();
        let elem = Element::new("count").with_attribute(names::VALUE, "twelve");
        let err = i32::decode(NodeRef::Element(&elem), &DecodeCx::new(&registry)).unwrap_err();
        assert!(matches!(err, Error::Failure { node, .. } if node == "count"));
    }
}
