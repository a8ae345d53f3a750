use crate::{Kind, matches_path};
use syn::{GenericArgument, PathArguments, Type, TypePath, TypeSlice};

/// Result of mapping an attribute's Rust type onto a [`Kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDecoded {
    pub kind: Kind,
    pub nullable: bool,
}

impl Default for TypeDecoded {
    fn default() -> Self {
        Self {
            kind: Kind::Unsupported,
            nullable: false,
        }
    }
}

/// Decode the semantic type of an attribute from its declared Rust type.
///
/// `Option<T>` marks the attribute nullable and decodes `T`. Nested options and
/// any type not listed here decode to [`Kind::Unsupported`], the caller decides
/// what to do with those (the derive macro keeps them, the mapper skips them).
pub fn decode_type(ty: &Type) -> TypeDecoded {
    decode_inner(ty, true)
}

fn decode_inner(ty: &Type, allow_option: bool) -> TypeDecoded {
    let mut nullable = false;
    let kind = 'kind: {
        let Type::Path(TypePath { path, qself: None }) = ty else {
            break 'kind Kind::Unsupported;
        };
        if let Some(ident) = path.get_ident() {
            if ident == "bool" {
                break 'kind Kind::Bool;
            } else if ident == "i8" {
                break 'kind Kind::Int8;
            } else if ident == "i16" {
                break 'kind Kind::Int16;
            } else if ident == "i32" {
                break 'kind Kind::Int32;
            } else if ident == "i64" || ident == "isize" {
                break 'kind Kind::Int64;
            } else if ident == "u8" {
                break 'kind Kind::UInt8;
            } else if ident == "u16" {
                break 'kind Kind::UInt16;
            } else if ident == "u32" {
                break 'kind Kind::UInt32;
            } else if ident == "u64" || ident == "usize" {
                break 'kind Kind::UInt64;
            } else if ident == "f32" {
                break 'kind Kind::Float32;
            } else if ident == "f64" {
                break 'kind Kind::Float64;
            }
        }
        if matches_path(path, &["std", "string", "String"]) {
            break 'kind Kind::String;
        } else if matches_path(path, &["time", "PrimitiveDateTime"]) {
            break 'kind Kind::Timestamp;
        } else if matches_path(path, &["keel", "Value"]) {
            break 'kind Kind::Dynamic;
        }
        let Some(argument) = first_type_argument(path) else {
            break 'kind Kind::Unsupported;
        };
        if matches_path(path, &["std", "option", "Option"]) {
            if !allow_option {
                break 'kind Kind::Unsupported;
            }
            let nested = decode_inner(argument, false);
            nullable = nested.kind != Kind::Unsupported;
            break 'kind nested.kind;
        } else if matches_path(path, &["std", "vec", "Vec"]) && is_u8(argument) {
            break 'kind Kind::Bytes;
        } else if matches_path(path, &["std", "boxed", "Box"])
            && matches!(argument, Type::Slice(TypeSlice { elem, .. }) if is_u8(elem))
        {
            break 'kind Kind::Bytes;
        }
        Kind::Unsupported
    };
    TypeDecoded { kind, nullable }
}

fn first_type_argument(path: &syn::Path) -> Option<&Type> {
    let PathArguments::AngleBracketed(arguments) = &path.segments.last()?.arguments else {
        return None;
    };
    match arguments.args.first()? {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    }
}

fn is_u8(ty: &Type) -> bool {
    matches!(ty, Type::Path(TypePath { path, .. }) if path.is_ident("u8"))
}
