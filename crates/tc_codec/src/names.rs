//! Names the canonical encoding reserves for itself.
//!
//! Every name the engine writes on its own behalf lives under the `tc:`
//! prefix, so user-chosen member and type names can never collide with it.
//! Registering a name inside the reserved namespace is a configuration
//! error ([`Error::ReservedName`](crate::Error::ReservedName)).

/// Prefix of the reserved namespace.
pub const RESERVED_PREFIX: &str = "tc:";

/// Wrapper element for items that have no name of their own:
/// heterogeneous-collection entries and dictionary pairs.
pub const ITEM: &str = "tc:item";

/// Key sub-node of a dictionary pair.
pub const KEY: &str = "tc:key";

/// Value sub-node of a dictionary pair, and the attribute carrying the
/// text of a scalar hoisted into element position.
pub const VALUE: &str = "tc:value";

/// Attribute holding the comma-joined coordinate of an array item
/// (rank > 1 arrays only).
pub const INDEX: &str = "tc:index";

/// Attribute holding the document name of a value's runtime type.
pub const TYPE: &str = "tc:type";

/// Reserved [`TYPE`] value meaning "no value".
pub const NULL: &str = "null";

/// Attribute stamping the format version on a document root.
pub const VERSION: &str = "tc:version";

/// Returns `true` if a user-chosen name collides with the reserved set.
pub fn is_reserved(name: &str) -> bool {
    name == NULL || name.starts_with(RESERVED_PREFIX)
}
