use core::fmt;

use tc_tree::{Node, NodeRef};

use crate::codable::{DecodeCx, EncodeCx};
use crate::error::Result;

// -----------------------------------------------------------------------------
// Member

/// Per-member encoding metadata for a user-defined object type.
///
/// One table of members is built per declaring type — by
/// [`#[derive(Codable)]`](crate::derive::Codable) — and reused across all
/// instances. The storage-target choice (direct field access or a
/// getter/setter pair) is compiled into the two function pointers when the
/// table is built, never re-derived per access.
///
/// `encode` returns `None` when the member is elided (its
/// [`keep_default`](Self::keep_default) policy is off and the value equals
/// the member default). `assign` receives `None` when the document carries
/// no node for the member, in which case the target keeps its default.
pub struct Member<T> {
    /// Declared field name.
    pub name: &'static str,
    /// Name used in the document; differs from `name` under `rename`.
    pub encoded: &'static str,
    /// When `false`, a value equal to the member default is not emitted.
    pub keep_default: bool,
    /// Reads the member off a value and encodes it, or elides it.
    pub encode: fn(&T, &EncodeCx<'_>) -> Result<Option<Node>>,
    /// Decodes a located node (or applies the default) into the target.
    pub assign: fn(&mut T, Option<NodeRef<'_>>, &DecodeCx<'_>) -> Result<()>,
}

impl<T> Clone for Member<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Member<T> {}

impl<T> fmt::Debug for Member<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("encoded", &self.encoded)
            .field("keep_default", &self.keep_default)
            .finish()
    }
}
