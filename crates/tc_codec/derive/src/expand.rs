//! Code generation for `#[derive(Codable)]`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, FieldsNamed, Path};

use crate::attrs::{ContainerAttrs, FieldAttrs};

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "`Codable` cannot be derived for generic types; implement the trait manually",
        ));
    }

    let container = ContainerAttrs::parse(&input.attrs)?;
    match (&container.encode_with, &container.decode_with) {
        (Some(encode), Some(decode)) => return Ok(expand_hooks(input, encode, decode)),
        (None, None) => {}
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "`encode_with` and `decode_with` must be supplied together",
            ));
        }
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "`Codable` can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "`Codable` can only be derived for structs with named fields",
            ));
        }
    };

    expand_members(input, fields)
}

// The hook pair fully owns encoding and decoding; no member table is built.
fn expand_hooks(input: &DeriveInput, encode: &Path, decode: &Path) -> TokenStream {
    let name = &input.ident;
    quote! {
        impl tc_codec::Codable for #name {
            fn encode(&self, name: &str, cx: &tc_codec::EncodeCx<'_>) -> tc_codec::Result<tc_codec::Node> {
                #encode(self, name, cx)
            }

            fn decode(node: tc_codec::NodeRef<'_>, cx: &tc_codec::DecodeCx<'_>) -> tc_codec::Result<Self> {
                #decode(node, cx)
            }
        }
    }
}

fn expand_members(input: &DeriveInput, fields: &FieldsNamed) -> syn::Result<TokenStream> {
    let name = &input.ident;

    let mut fns = Vec::new();
    let mut entries = Vec::new();

    for field in &fields.named {
        let attrs = FieldAttrs::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let ident = field
            .ident
            .as_ref()
            .unwrap_or_else(|| unreachable!("named fields carry identifiers"));
        let ty = &field.ty;
        let field_name = ident.to_string();
        let encoded = attrs.rename.clone().unwrap_or_else(|| field_name.clone());
        let keep_default = !attrs.elide_default;

        let encode_ident = format_ident!("__encode_{}", ident);
        let assign_ident = format_ident!("__assign_{}", ident);

        let read = match &attrs.get {
            Some(get) => quote! {
                let __owned = value.#get();
                let field = &__owned;
            },
            None => quote! {
                let field = &value.#ident;
            },
        };
        let elide = if attrs.elide_default {
            quote! {
                if *field == <#ty as ::core::default::Default>::default() {
                    return ::core::result::Result::Ok(::core::option::Option::None);
                }
            }
        } else {
            TokenStream::new()
        };

        let write = match (&attrs.get, &attrs.set) {
            (_, Some(set)) => quote! {
                target.#set(cx.decode(node)?);
            },
            (Some(_), None) => quote! {
                let _ = (&target, &cx, &node);
                return ::core::result::Result::Err(tc_codec::Error::ReadOnlyMember {
                    type_path: ::core::convert::From::from(::core::any::type_name::<#name>()),
                    member: ::core::convert::From::from(#field_name),
                });
            },
            (None, None) => quote! {
                target.#ident = cx.decode(node)?;
            },
        };

        fns.push(quote! {
            fn #encode_ident(
                value: &#name,
                cx: &tc_codec::EncodeCx<'_>,
            ) -> tc_codec::Result<::core::option::Option<tc_codec::Node>> {
                #read
                #elide
                ::core::result::Result::Ok(::core::option::Option::Some(cx.encode(field, #encoded)?))
            }

            fn #assign_ident(
                target: &mut #name,
                node: ::core::option::Option<tc_codec::NodeRef<'_>>,
                cx: &tc_codec::DecodeCx<'_>,
            ) -> tc_codec::Result<()> {
                if let ::core::option::Option::Some(node) = node {
                    #write
                }
                ::core::result::Result::Ok(())
            }
        });

        entries.push(quote! {
            tc_codec::Member {
                name: #field_name,
                encoded: #encoded,
                keep_default: #keep_default,
                encode: #encode_ident,
                assign: #assign_ident,
            }
        });
    }

    Ok(quote! {
        const _: () = {
            #(#fns)*

            const MEMBERS: &[tc_codec::Member<#name>] = &[#(#entries),*];

            impl tc_codec::Codable for #name {
                fn encode(&self, name: &str, cx: &tc_codec::EncodeCx<'_>) -> tc_codec::Result<tc_codec::Node> {
                    tc_codec::object::encode_object(MEMBERS, self, name, cx)
                }

                fn decode(node: tc_codec::NodeRef<'_>, cx: &tc_codec::DecodeCx<'_>) -> tc_codec::Result<Self> {
                    tc_codec::object::decode_object(MEMBERS, node, cx)
                }
            }
        };
    })
}
