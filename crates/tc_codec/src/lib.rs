#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Derive output names the crate as `tc_codec`; an `extern self` alias keeps
// that path valid inside this crate's own tests and doc examples.
extern crate self as tc_codec;

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod codable;
mod error;
mod impls;
mod member;
mod multirank;
mod registry;
mod util;

pub mod names;
pub mod object;

#[cfg(feature = "std")]
mod facade;

// -----------------------------------------------------------------------------
// Top-level exports

pub use codable::{AnyCodable, Codable, DecodeCx, DynValue, EncodeCx};
pub use error::{Error, Result};
pub use member::Member;
pub use multirank::MultiRankArray;
pub use registry::{CustomCodec, Registration, TypeRegistry};

#[cfg(feature = "std")]
pub use facade::{FORMAT_VERSION, Serializer};
#[cfg(feature = "std")]
pub use registry::TypeRegistryArc;

// Document tree types, re-exported for derive output and downstream use.
pub use tc_tree::{Attribute, Element, Node, NodeRef};

pub use tc_codec_derive as derive;
