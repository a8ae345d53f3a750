mod decode_column;

use decode_column::{AttributeMetadata, decode_column};
use keel_core::Kind;
use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Fields, ItemStruct, LitStr, ext::IdentExt, parse_macro_input};

/// Implement `keel::Entity` for a struct with named fields.
///
/// Each field may carry `#[db = "column=... table=... primarykey=yes omit=yes"]`.
/// The struct must implement `Default`.
#[proc_macro_derive(Entity, attributes(db))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemStruct);
    match entity(&item) {
        Ok(v) => v.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn entity(item: &ItemStruct) -> syn::Result<proc_macro2::TokenStream> {
    let Fields::Named(fields) = &item.fields else {
        return Err(syn::Error::new_spanned(
            item,
            "Entity can only be derived for structs with named fields",
        ));
    };
    let attributes = fields
        .named
        .iter()
        .map(decode_column)
        .collect::<syn::Result<Vec<_>>>()?;
    check_primary_key(&attributes)?;
    let name = &item.ident;
    let name_str = LitStr::new(&name.to_string(), name.span());
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let descriptors = attributes.iter().map(|v| {
        let ident = LitStr::new(&v.ident.unraw().to_string(), Span::call_site());
        let kind = v.decoded.kind;
        let nullable = v.decoded.nullable;
        let tag = &v.tag;
        quote!(::keel::Attribute::new(#ident, #kind, #nullable, #tag))
    });
    let values = attributes.iter().map(|v| {
        let ident = &v.ident;
        if v.decoded.kind == Kind::Unsupported {
            quote!(::keel::Value::Null)
        } else {
            quote!(::keel::AsValue::as_value(::std::clone::Clone::clone(&self.#ident)))
        }
    });
    let assignments = attributes.iter().enumerate().map(|(i, v)| {
        let ident = &v.ident;
        let ty = &v.ty;
        if v.decoded.kind == Kind::Unsupported {
            let message = format!("Attribute `{}` cannot hold a database value", ident);
            quote!(#i => return Err(::keel::Error::msg(#message)),)
        } else {
            quote!(#i => self.#ident = <#ty as ::keel::AsValue>::try_from_value(value)?,)
        }
    });
    Ok(quote! {
        impl #impl_generics ::keel::Entity for #name #ty_generics #where_clause {
            fn shape() -> &'static ::keel::Shape {
                static SHAPE: ::std::sync::LazyLock<::keel::Shape> =
                    ::std::sync::LazyLock::new(|| {
                        ::keel::Shape::new(#name_str, vec![#(#descriptors),*])
                    });
                &SHAPE
            }

            fn values(&self) -> ::std::vec::Vec<::keel::Value> {
                vec![#(#values),*]
            }

            #[allow(unreachable_code)]
            fn assign(&mut self, index: usize, value: ::keel::Value) -> ::keel::Result<()> {
                match index {
                    #(#assignments)*
                    _ => {
                        return Err(::keel::Error::msg(format!(
                            "{} has no attribute at index {}",
                            #name_str, index
                        )));
                    }
                }
                Ok(())
            }
        }
    })
}

fn check_primary_key(attributes: &[AttributeMetadata]) -> syn::Result<()> {
    let mut primary_keys = attributes.iter().filter(|v| v.schema_tag().is_primary_key());
    let first = primary_keys.next();
    if let (Some(first), Some(second)) = (first, primary_keys.next()) {
        return Err(syn::Error::new(
            second.ident.span(),
            format!(
                "Attribute `{}` is marked primarykey=yes but `{}` already is, an entity has at most one primary key",
                second.ident, first.ident
            ),
        ));
    }
    Ok(())
}
