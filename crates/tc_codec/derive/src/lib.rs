//! See [`Codable`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static CODABLE_ATTRIBUTE_NAME: &str = "codable";

// -----------------------------------------------------------------------------
// Modules

mod attrs;
mod expand;

// -----------------------------------------------------------------------------
// Macros

/// # Codable Derivation
///
/// `#[derive(Codable)]` implements `tc_codec::Codable` for a struct with
/// named fields by compiling its fields into a member table: one descriptor
/// per field carrying the encoded name, the default-elision policy and the
/// storage target. Decoding constructs the value through `Default`, so the
/// type must implement it.
///
/// ```rust, ignore
/// #[derive(Codable, Default)]
/// struct Question {
///     prompt: String,
///     points: u32,
/// }
/// ```
///
/// ## Member attributes
///
/// - `#[codable(rename = "name")]` — encoded name used in the document
///   instead of the field name. Names inside the reserved `tc:` namespace
///   are rejected at expansion.
/// - `#[codable(skip)]` — the field takes no part in encoding or decoding;
///   it keeps its `Default` value after a decode.
/// - `#[codable(elide_default)]` — a value equal to the field type's
///   default is not emitted at all; decoding an object missing the node
///   yields the default again. Requires `PartialEq` on the field type.
/// - `#[codable(get = "method", set = "method")]` — redirect the storage
///   target through an accessor pair instead of the raw field. The getter
///   returns the field type by value; the setter takes it by value. A
///   getter without a setter encodes normally but fails decoding with
///   `ReadOnlyMember` when the document carries a value for the member.
///
/// ## Hook functions
///
/// A pair of type-level hooks takes over the entire encoding:
///
/// ```rust, ignore
/// #[derive(Codable, Default)]
/// #[codable(encode_with = "wire::encode", decode_with = "wire::decode")]
/// struct Legacy { /* ... */ }
/// ```
///
/// with the signatures
///
/// ```rust, ignore
/// fn encode(value: &Legacy, name: &str, cx: &EncodeCx<'_>) -> Result<Node>;
/// fn decode(node: NodeRef<'_>, cx: &DecodeCx<'_>) -> Result<Legacy>;
/// ```
///
/// The context argument is the active serializer: hooks recurse through the
/// same engine via `cx.encode` / `cx.decode`. Supplying only one of the two
/// hooks is a configuration error reported at expansion.
#[proc_macro_derive(Codable, attributes(codable))]
pub fn derive_codable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
