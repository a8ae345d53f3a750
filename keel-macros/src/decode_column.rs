use keel_core::{SchemaTag, TypeDecoded, decode_type};
use syn::{Expr, ExprLit, Field, Ident, Lit, Meta, MetaNameValue, Type};

pub(crate) struct AttributeMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    /// Raw `#[db = "..."]` text, empty when the attribute is not tagged.
    pub(crate) tag: String,
    pub(crate) decoded: TypeDecoded,
}

impl AttributeMetadata {
    pub(crate) fn schema_tag(&self) -> SchemaTag {
        SchemaTag::parse(&self.tag)
    }
}

pub(crate) fn decode_column(field: &Field) -> syn::Result<AttributeMetadata> {
    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new_spanned(
            field,
            "Entity attributes must be named",
        ));
    };
    let mut tag = None;
    for attr in field.attrs.iter().filter(|v| v.path().is_ident("db")) {
        if tag.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "Only one #[db = \"...\"] is allowed per attribute",
            ));
        }
        let Meta::NameValue(MetaNameValue {
            value:
                Expr::Lit(ExprLit {
                    lit: Lit::Str(value),
                    ..
                }),
            ..
        }) = &attr.meta
        else {
            return Err(syn::Error::new_spanned(
                attr,
                "Expected #[db = \"column=name ...\"]",
            ));
        };
        tag = Some(value.value());
    }
    Ok(AttributeMetadata {
        ident,
        ty: field.ty.clone(),
        tag: tag.unwrap_or_default(),
        decoded: decode_type(&field.ty),
    })
}
