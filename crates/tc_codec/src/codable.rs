use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use core::fmt;

use tc_tree::{Node, NodeRef};

use crate::error::Result;
use crate::registry::TypeRegistry;
use crate::util::short_name;

// -----------------------------------------------------------------------------
// Codable

/// A type that encodes to, and decodes from, a document [`Node`].
///
/// The impl a type carries *is* its codec: scalars produce attributes,
/// sequences and dictionaries produce wrapped child elements, and
/// [`#[derive(Codable)]`](crate::derive::Codable) walks a member table for
/// user objects. Codecs never call each other directly — nested values go
/// through [`EncodeCx::encode`] and [`DecodeCx::decode`], which give a
/// registered custom codec the chance to take over first.
///
/// # Examples
///
/// ```
/// use tc_codec::{Codable, DecodeCx, EncodeCx, TypeRegistry};
///
/// let registry = TypeRegistry::new();
///
/// let node = 42u32.encode("count", &EncodeCx::new(&registry)).unwrap();
/// assert_eq!(node.name(), "count");
///
/// let back = u32::decode(node.as_ref(), &DecodeCx::new(&registry)).unwrap();
/// assert_eq!(back, 42);
/// ```
pub trait Codable: Sized + 'static {
    /// Encodes `self` as a node named `name`.
    fn encode(&self, name: &str, cx: &EncodeCx<'_>) -> Result<Node>;

    /// Decodes a value from a node.
    fn decode(node: NodeRef<'_>, cx: &DecodeCx<'_>) -> Result<Self>;

    /// The node name this type carries when it stands alone (document
    /// roots, collection items): its registered canonical name when
    /// present, otherwise the short type name.
    fn node_name(cx: &EncodeCx<'_>) -> String {
        match cx.registry().name_of(TypeId::of::<Self>()) {
            Some(name) => name.into(),
            None => short_name(core::any::type_name::<Self>()),
        }
    }
}

// -----------------------------------------------------------------------------
// Contexts

/// The encoding half of an active serializer: a borrow of the registry,
/// passed down through every nested codec call.
pub struct EncodeCx<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> EncodeCx<'a> {
    /// Creates a context over a registry.
    #[inline]
    pub const fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Returns the registry in effect for this operation.
    #[inline]
    pub const fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// Encodes a nested value as a node named `name`.
    ///
    /// A custom codec registered for `T` wins over the type's own impl;
    /// this is the single resolution point of the engine.
    pub fn encode<T: Codable>(&self, value: &T, name: &str) -> Result<Node> {
        if let Some(codec) = self.registry.custom_codec::<T>() {
            return (codec.encode)(value, name, self);
        }
        value.encode(name, self)
    }
}

/// The decoding half of an active serializer.
pub struct DecodeCx<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> DecodeCx<'a> {
    /// Creates a context over a registry.
    #[inline]
    pub const fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Returns the registry in effect for this operation.
    #[inline]
    pub const fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    /// Decodes a nested value from a node, custom codecs first.
    pub fn decode<T: Codable>(&self, node: NodeRef<'_>) -> Result<T> {
        if let Some(codec) = self.registry.custom_codec::<T>() {
            return (codec.decode)(node, self);
        }
        T::decode(node, self)
    }
}

// -----------------------------------------------------------------------------
// AnyCodable

/// The dynamic-dispatch boundary of the engine.
///
/// Most encoding is monomorphized; only polymorphic slots and
/// heterogeneous collections need to carry a value whose concrete type is
/// known at runtime alone. Such values live behind a [`DynValue`] and
/// encode through their runtime type, tagged with that type's registered
/// name so decoding can find its way back.
///
/// Implemented for every [`Codable`] type; never implement it by hand.
pub trait AnyCodable: Any {
    /// Full path of the concrete type, for diagnostics.
    fn type_path(&self) -> &'static str;

    /// [`TypeId`] of the concrete type.
    fn ty_id(&self) -> TypeId;

    /// Upcast for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Encodes through the concrete type's codec.
    fn encode_any(&self, name: &str, cx: &EncodeCx<'_>) -> Result<Node>;
}

impl<T: Codable> AnyCodable for T {
    #[inline]
    fn type_path(&self) -> &'static str {
        core::any::type_name::<T>()
    }

    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn encode_any(&self, name: &str, cx: &EncodeCx<'_>) -> Result<Node> {
        cx.encode(self, name)
    }
}

impl dyn AnyCodable {
    /// Returns `true` if the boxed value is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrows the boxed value as a `T`, if it is one.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for dyn AnyCodable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynValue({})", self.type_path())
    }
}

/// A value of some concrete [`Codable`] type, held behind the dynamic
/// boundary. This is the member type of polymorphic slots; a nullable slot
/// is `Option<DynValue>`.
///
/// # Examples
///
/// ```
/// use tc_codec::DynValue;
///
/// let value: DynValue = Box::new(42i32);
/// assert!(value.is::<i32>());
/// assert_eq!(value.downcast_ref::<i32>(), Some(&42));
/// ```
pub type DynValue = Box<dyn AnyCodable>;
