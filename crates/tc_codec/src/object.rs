//! The member-wise encode/decode path for user-defined objects.
//!
//! [`#[derive(Codable)]`](crate::derive::Codable) compiles a type's fields
//! into a [`Member`] table and routes the type's `Codable` impl through the
//! two functions here. Custom hook functions that need to walk the same
//! table can reach individual descriptors through [`member_named`].

use alloc::borrow::Cow;

use tc_tree::{Element, Node, NodeRef};

use crate::codable::{DecodeCx, EncodeCx};
use crate::error::{Error, Result};
use crate::member::Member;

/// Encodes an object member by member, in declaration order.
///
/// Members whose `encode` elides (default value under an elision policy)
/// contribute nothing; scalar members land as attributes and all other
/// members as child elements, decided by the node kind each member codec
/// returns.
pub fn encode_object<T>(
    members: &[Member<T>],
    value: &T,
    name: &str,
    cx: &EncodeCx<'_>,
) -> Result<Node> {
    let mut elem = Element::new(name);
    for member in members {
        if let Some(node) = (member.encode)(value, cx)? {
            elem.push(node);
        }
    }
    Ok(Node::Element(elem))
}

/// Decodes an object from its element, member by member.
///
/// The target is constructed through `Default` (the parameterless
/// constructor of this engine); each member then looks its node up by
/// encoded name — attributes first, then children. An absent node leaves
/// the member at its default, never an error.
pub fn decode_object<T: Default>(
    members: &[Member<T>],
    node: NodeRef<'_>,
    cx: &DecodeCx<'_>,
) -> Result<T> {
    let elem = match node.as_element() {
        Some(elem) => elem,
        None => return Err(Error::malformed(node.name(), "expected an element")),
    };
    let mut value = T::default();
    for member in members {
        (member.assign)(&mut value, elem.get(member.encoded), cx)?;
    }
    Ok(value)
}

/// Looks a member descriptor up by its declared name.
///
/// Fails with [`Error::MemberNotFound`] when the table holds no such
/// member.
pub fn member_named<'a, T: 'static>(
    members: &'a [Member<T>],
    name: &str,
) -> Result<&'a Member<T>> {
    members.iter().find(|m| m.name == name).ok_or_else(|| {
        Error::MemberNotFound {
            type_path: Cow::Borrowed(core::any::type_name::<T>()),
            member: Cow::Owned(name.into()),
        }
    })
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use tc_tree::{Element, Node, NodeRef};

    use super::member_named;
    use crate::codable::{Codable, DecodeCx, EncodeCx};
    use crate::derive::Codable;
    use crate::error::Error;
    use crate::member::Member;
    use crate::registry::TypeRegistry;

    struct Probe;

    const MEMBERS: &[Member<Probe>] = &[Member {
        name: "alpha",
        encoded: "alpha",
        keep_default: true,
        encode: |_, _| Ok(None),
        assign: |_, _, _| Ok(()),
    }];

    #[test]
    fn member_lookup_by_declared_name() {
        assert_eq!(member_named(MEMBERS, "alpha").unwrap().name, "alpha");
        assert!(matches!(
            member_named(MEMBERS, "beta"),
            Err(Error::MemberNotFound { .. })
        ));
    }

    // ---- derived member tables ----

    #[derive(Codable, Default, PartialEq, Debug)]
    struct Question {
        #[codable(rename = "prompt")]
        text: String,
        points: u32,
        #[codable(elide_default)]
        hint: String,
        #[codable(skip)]
        cached_score: u32,
    }

    fn sample() -> Question {
        Question {
            text: String::from("2+2?"),
            points: 5,
            hint: String::new(),
            cached_score: 99,
        }
    }

    #[test]
    fn members_encode_in_declaration_order() {
        let registry = TypeRegistry::new();
        let node = sample()
            .encode("question", &EncodeCx::new(&registry))
            .unwrap();

        let Node::Element(elem) = &node else {
            panic!("objects encode as elements");
        };
        assert_eq!(elem.name(), "question");
        // Scalars land as attributes, renamed, skip and elision honored.
        assert_eq!(elem.attribute("prompt"), Some("2+2?"));
        assert_eq!(elem.attribute("points"), Some("5"));
        assert_eq!(elem.attribute("hint"), None);
        assert_eq!(elem.attribute("cached_score"), None);
    }

    #[test]
    fn absent_members_decode_to_their_defaults() {
        let registry = TypeRegistry::new();
        let doc = Element::new("question").with_attribute("prompt", "2+2?");

        let back = Question::decode(NodeRef::Element(&doc), &DecodeCx::new(&registry)).unwrap();
        assert_eq!(back.text, "2+2?");
        assert_eq!(back.points, 0);
        assert_eq!(back.hint, "");
        assert_eq!(back.cached_score, 0);
    }

    #[test]
    fn elided_member_round_trips_through_its_default() {
        let registry = TypeRegistry::new();
        let value = sample();
        let node = value.encode("question", &EncodeCx::new(&registry)).unwrap();
        let mut back =
            Question::decode(node.as_ref(), &DecodeCx::new(&registry)).unwrap();
        back.cached_score = value.cached_score; // skipped member is not carried
        assert_eq!(back, value);
    }

    #[test]
    fn non_default_elidable_member_is_emitted() {
        let registry = TypeRegistry::new();
        let mut value = sample();
        value.hint = String::from("think fours");

        let node = value.encode("question", &EncodeCx::new(&registry)).unwrap();
        let Node::Element(elem) = &node else { panic!() };
        assert_eq!(elem.attribute("hint"), Some("think fours"));
    }

    // ---- accessor storage targets ----

    #[derive(Codable, Default, PartialEq, Debug)]
    struct Tally {
        #[codable(get = "total", set = "set_total")]
        total: u32,
        #[codable(get = "checksum")]
        checksum: u32,
    }

    impl Tally {
        fn total(&self) -> u32 {
            self.total
        }

        fn set_total(&mut self, total: u32) {
            self.total = total;
            self.checksum = total ^ 0xA5;
        }

        fn checksum(&self) -> u32 {
            self.checksum
        }
    }

    #[test]
    fn setters_see_decoded_values() {
        let registry = TypeRegistry::new();
        let doc = Element::new("tally").with_attribute("total", "3");

        let back = Tally::decode(NodeRef::Element(&doc), &DecodeCx::new(&registry)).unwrap();
        assert_eq!(back.total, 3);
        assert_eq!(back.checksum, 3 ^ 0xA5);
    }

    #[test]
    fn getter_without_setter_is_read_only_on_decode() {
        let registry = TypeRegistry::new();
        // Absent in the document: fine, the default stands.
        let doc = Element::new("tally").with_attribute("total", "3");
        assert!(Tally::decode(NodeRef::Element(&doc), &DecodeCx::new(&registry)).is_ok());

        // Present in the document: there is nowhere to put it.
        let doc = doc.with_attribute("checksum", "7");
        let err = Tally::decode(NodeRef::Element(&doc), &DecodeCx::new(&registry)).unwrap_err();
        assert!(matches!(
            err,
            Error::ReadOnlyMember { member, .. } if member == "checksum"
        ));
    }

    // ---- hook functions ----

    #[derive(Default, PartialEq, Debug)]
    #[derive(Codable)]
    #[codable(encode_with = "wire::encode", decode_with = "wire::decode")]
    struct Legacy {
        compact: String,
    }

    mod wire {
        use alloc::string::String;

        use tc_tree::{Element, Node, NodeRef};

        use super::Legacy;
        use crate::codable::{DecodeCx, EncodeCx};
        use crate::error::Result;

        pub fn encode(value: &Legacy, name: &str, cx: &EncodeCx<'_>) -> Result<Node> {
            // Hooks recurse through the active serializer.
            let inner = cx.encode(&value.compact, "raw")?;
            let mut elem = Element::new(name);
            elem.push(inner);
            Ok(Node::Element(elem))
        }

        pub fn decode(node: NodeRef<'_>, cx: &DecodeCx<'_>) -> Result<Legacy> {
            let compact: String = match node.as_element().and_then(|e| e.get("raw")) {
                Some(raw) => cx.decode(raw)?,
                None => String::new(),
            };
            Ok(Legacy { compact })
        }
    }

    #[test]
    fn hooks_fully_own_the_encoding() {
        let registry = TypeRegistry::new();
        let value = Legacy {
            compact: String::from("x|y|z"),
        };

        let node = value.encode("legacy", &EncodeCx::new(&registry)).unwrap();
        let Node::Element(elem) = &node else { panic!() };
        // The member-wise path would have written `compact`.
        assert!(elem.attribute("compact").is_none());
        assert_eq!(elem.attribute("raw"), Some("x|y|z"));

        let back = Legacy::decode(node.as_ref(), &DecodeCx::new(&registry)).unwrap();
        assert_eq!(back, value);
    }

    // ---- nesting ----

    #[derive(Codable, Default, PartialEq, Debug)]
    struct Round {
        title: String,
        questions: alloc::vec::Vec<Question>,
    }

    #[test]
    fn nested_objects_round_trip() {
        let registry = TypeRegistry::new();
        let round = Round {
            title: String::from("warmup"),
            questions: alloc::vec![sample(), Question::default()],
        };

        let node = round.encode("round", &EncodeCx::new(&registry)).unwrap();
        let back = Round::decode(node.as_ref(), &DecodeCx::new(&registry)).unwrap();
        assert_eq!(back.title, round.title);
        assert_eq!(back.questions.len(), 2);
        assert_eq!(back.questions[0].text, "2+2?");
    }
}
