//! Hash containers and naming helpers shared across the engine.

use alloc::string::String;
use core::any::TypeId;
use core::hash::{BuildHasher, BuildHasherDefault, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// Hash state

// Registry lookups need no DoS resistance; a fixed seed keeps `no_std`
// builds seedless and hash results reproducible.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x7C3A_94D1_0B66_58EF);

/// Fixed-seed hash state over `foldhash`.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// String-keyed map used by the registry's name index.
pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

// -----------------------------------------------------------------------------
// TypeIdMap

/// `TypeId` values are already high-quality hashes; passing them through a
/// hasher again buys nothing.
#[derive(Default, Clone)]
pub(crate) struct NoOpHasher(u64);

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.rotate_left(8) ^ u64::from(b);
        }
    }

    #[inline]
    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }

    #[inline]
    fn write_u128(&mut self, n: u128) {
        self.0 = n as u64;
    }
}

/// A map with [`TypeId`] as the fixed key type.
pub(crate) type TypeIdMap<V> = hashbrown::HashMap<TypeId, V, BuildHasherDefault<NoOpHasher>>;

// -----------------------------------------------------------------------------
// Short type names

/// Strips module paths from a full type path, keeping generic structure:
/// `alloc::vec::Vec<core::option::Option<i32>>` becomes `Vec<Option<i32>>`.
pub(crate) fn short_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    // Index in `out` where the identifier currently being copied begins.
    let mut ident_start = 0;
    let mut chars = full.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            ':' => {
                if chars.peek() == Some(&':') {
                    chars.next();
                }
                out.truncate(ident_start);
            }
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' => {
                out.push(ch);
                ident_start = out.len();
            }
            other => out.push(other),
        }
    }
    out
}
