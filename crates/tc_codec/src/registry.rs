use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};

use tc_tree::{Element, Node, NodeRef};

use crate::codable::{Codable, DecodeCx, DynValue, EncodeCx};
use crate::error::{Error, Result};
use crate::names;
use crate::util::{HashMap, TypeIdMap};

// -----------------------------------------------------------------------------
// TypeRegistry

type DecodeDynFn = fn(&Element, &DecodeCx<'_>) -> Result<DynValue>;

/// A registration entry: the bridge from a document name back to a
/// concrete type.
pub struct Registration {
    name: String,
    type_path: &'static str,
    decode_dyn: DecodeDynFn,
    custom: Option<Box<dyn Any + Send + Sync>>,
}

impl Registration {
    /// Canonical document name of the registered type.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path of the registered type.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Returns `true` if a custom codec overrides this type's strategy.
    #[inline]
    pub fn has_custom_codec(&self) -> bool {
        self.custom.is_some()
    }
}

/// A user-supplied codec pair overriding a type's default strategy.
pub struct CustomCodec<T> {
    pub(crate) encode: Box<dyn Fn(&T, &str, &EncodeCx<'_>) -> Result<Node> + Send + Sync>,
    pub(crate) decode: Box<dyn Fn(NodeRef<'_>, &DecodeCx<'_>) -> Result<T> + Send + Sync>,
}

/// The bidirectional map between types and canonical document names.
///
/// Registration is what makes a type reachable from a document: polymorphic
/// slots tag values with the registered name, and decoding resolves the tag
/// back to the concrete type through this registry. A registration may also
/// carry a custom codec pair, which then fully owns the type's encoding.
///
/// Lookup by name and lookup by type stay consistent through the public
/// `register*` API. Registering the same type twice is a supported
/// re-point operation — the last registration wins for name→type lookup —
/// not an error.
///
/// The registry itself is a plain value; share it across threads through
/// [`TypeRegistryArc`].
///
/// # Examples
///
/// ```
/// use tc_codec::TypeRegistry;
///
/// #[derive(tc_codec::derive::Codable, Default)]
/// struct Question {
///     prompt: String,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Question>("question").unwrap();
///
/// assert_eq!(registry.get_by_name("question").unwrap().name(), "question");
/// ```
pub struct TypeRegistry {
    entries: TypeIdMap<Registration>,
    name_to_id: HashMap<String, TypeId>,
}

impl TypeRegistry {
    /// Creates an empty registry, without even the built-in scalars.
    pub fn empty() -> Self {
        Self {
            entries: TypeIdMap::default(),
            name_to_id: HashMap::default(),
        }
    }

    /// Creates a registry with the built-in scalar types registered under
    /// their plain names (`bool`, `i32`, …, `String`).
    pub fn new() -> Self {
        let mut registry = Self::empty();
        macro_rules! builtin {
            ($($ty:ty),* $(,)?) => {$(
                registry.insert::<$ty>(stringify!($ty).to_owned(), None);
            )*};
        }
        builtin!(
            bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
            String,
        );
        registry
    }

    /// Registers type `T` under a canonical document name.
    ///
    /// Names inside the reserved `tc:` namespace (and the literal `null`)
    /// are rejected with [`Error::ReservedName`].
    pub fn register<T: Codable>(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if names::is_reserved(&name) {
            return Err(Error::ReservedName { name });
        }
        log::trace!("registering `{}` as `{name}`", core::any::type_name::<T>());
        self.insert::<T>(name, None);
        Ok(())
    }

    /// Registers type `T` with a custom codec pair that fully owns its
    /// encoding and decoding.
    pub fn register_with<T, E, D>(&mut self, name: impl Into<String>, encode: E, decode: D) -> Result<()>
    where
        T: Codable,
        E: Fn(&T, &str, &EncodeCx<'_>) -> Result<Node> + Send + Sync + 'static,
        D: Fn(NodeRef<'_>, &DecodeCx<'_>) -> Result<T> + Send + Sync + 'static,
    {
        let name = name.into();
        if names::is_reserved(&name) {
            return Err(Error::ReservedName { name });
        }
        log::trace!(
            "registering `{}` as `{name}` with a custom codec",
            core::any::type_name::<T>()
        );
        let custom: Box<dyn Any + Send + Sync> = Box::new(CustomCodec::<T> {
            encode: Box::new(encode),
            decode: Box::new(decode),
        });
        self.insert::<T>(name, Some(custom));
        Ok(())
    }

    fn insert<T: Codable>(&mut self, name: String, custom: Option<Box<dyn Any + Send + Sync>>) {
        let id = TypeId::of::<T>();
        // Re-registration re-points the name; drop the stale reverse entry
        // unless another type has taken it over in the meantime.
        if let Some(prev) = self.entries.get(&id)
            && self.name_to_id.get(&prev.name) == Some(&id)
        {
            self.name_to_id.remove(&prev.name);
        }
        self.name_to_id.insert(name.clone(), id);
        self.entries.insert(
            id,
            Registration {
                name,
                type_path: core::any::type_name::<T>(),
                decode_dyn: decode_dyn::<T>,
                custom,
            },
        );
    }

    /// Returns the canonical name of a registered type.
    pub fn name_of(&self, type_id: TypeId) -> Option<&str> {
        self.entries.get(&type_id).map(|entry| entry.name.as_str())
    }

    /// Returns the registration a document name resolves to.
    pub fn get_by_name(&self, name: &str) -> Option<&Registration> {
        self.name_to_id.get(name).and_then(|id| self.entries.get(id))
    }

    /// Returns the registration of a type.
    pub fn get(&self, type_id: TypeId) -> Option<&Registration> {
        self.entries.get(&type_id)
    }

    /// Whether type `T` has been registered.
    #[inline]
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// An iterator over all registrations, in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Registration> {
        self.entries.values()
    }

    /// The custom codec registered for `T`, if any.
    pub(crate) fn custom_codec<T: 'static>(&self) -> Option<&CustomCodec<T>> {
        self.entries
            .get(&TypeId::of::<T>())?
            .custom
            .as_ref()?
            .downcast_ref::<CustomCodec<T>>()
    }

    /// Resolves a type tag and decodes `elem` through the resolved type.
    pub(crate) fn decode_dynamic(
        &self,
        tag: &str,
        elem: &Element,
        cx: &DecodeCx<'_>,
    ) -> Result<DynValue> {
        match self.get_by_name(tag) {
            Some(entry) => (entry.decode_dyn)(elem, cx),
            None => Err(Error::UnregisteredType {
                name: tag.to_owned(),
            }),
        }
    }
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|e| (e.name(), e.type_path())))
            .finish()
    }
}

fn decode_dyn<T: Codable>(elem: &Element, cx: &DecodeCx<'_>) -> Result<DynValue> {
    let value: T = cx.decode(NodeRef::Element(elem))?;
    Ok(Box::new(value))
}

// -----------------------------------------------------------------------------
// TypeRegistryArc

#[cfg(feature = "std")]
mod arc {
    use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

    use super::TypeRegistry;

    /// A [`TypeRegistry`] shared behind one mutual-exclusion lock.
    ///
    /// Registration and lookup are O(1) map operations, so a single lock
    /// held for the duration of each operation is all the coordination the
    /// engine needs.
    #[derive(Clone, Default)]
    pub struct TypeRegistryArc {
        internal: Arc<RwLock<TypeRegistry>>,
    }

    impl TypeRegistryArc {
        /// Wraps a registry.
        pub fn new(registry: TypeRegistry) -> Self {
            Self {
                internal: Arc::new(RwLock::new(registry)),
            }
        }

        /// Takes a read lock on the underlying [`TypeRegistry`].
        pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
            self.internal.read().unwrap_or_else(PoisonError::into_inner)
        }

        /// Takes a write lock on the underlying [`TypeRegistry`].
        pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
            self.internal
                .write()
                .unwrap_or_else(PoisonError::into_inner)
        }
    }

    impl core::fmt::Debug for TypeRegistryArc {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            self.read().fmt(f)
        }
    }
}

#[cfg(feature = "std")]
pub use arc::TypeRegistryArc;

// -----------------------------------------------------------------------------
// Tests
