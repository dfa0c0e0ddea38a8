#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod node;

#[cfg(feature = "std")]
mod xml;

// -----------------------------------------------------------------------------
// Top-level exports

pub use node::{Attribute, Element, Node, NodeRef};

#[cfg(feature = "std")]
pub use xml::XmlError;
