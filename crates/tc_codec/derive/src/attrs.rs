//! Parsing of `#[codable(...)]` attributes.

use syn::{Attribute, Ident, LitStr, Path};

use crate::CODABLE_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Container attributes

#[derive(Default)]
pub(crate) struct ContainerAttrs {
    pub encode_with: Option<Path>,
    pub decode_with: Option<Path>,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(CODABLE_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("encode_with") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.encode_with = Some(lit.parse()?);
                    Ok(())
                } else if meta.path.is_ident("decode_with") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.decode_with = Some(lit.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown container attribute"))
                }
            })?;
        }
        Ok(out)
    }
}

// -----------------------------------------------------------------------------
// Field attributes

#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub rename: Option<String>,
    pub skip: bool,
    pub elide_default: bool,
    pub get: Option<Ident>,
    pub set: Option<Ident>,
}

impl FieldAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(CODABLE_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    let name = lit.value();
                    if name == "null" || name.starts_with("tc:") {
                        return Err(meta.error("name lies in the reserved `tc:` namespace"));
                    }
                    out.rename = Some(name);
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                    Ok(())
                } else if meta.path.is_ident("elide_default") {
                    out.elide_default = true;
                    Ok(())
                } else if meta.path.is_ident("get") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.get = Some(Ident::new(&lit.value(), lit.span()));
                    Ok(())
                } else if meta.path.is_ident("set") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.set = Some(Ident::new(&lit.value(), lit.span()));
                    Ok(())
                } else {
                    Err(meta.error("unknown field attribute"))
                }
            })?;
        }
        Ok(out)
    }
}
