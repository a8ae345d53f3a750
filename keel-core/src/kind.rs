use crate::Value;
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use std::fmt::{self, Display};

/// Semantic type of an entity attribute, the key of every type dispatch in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Bytes,
    Timestamp,
    /// An attribute declared as `keel::Value`, holds whatever the driver returns.
    Dynamic,
    /// Any other attribute type. Skipped with a warning when reading, rejected when writing.
    Unsupported,
}

impl Kind {
    /// Typed absence of this kind.
    pub fn empty_value(&self) -> Value {
        match self {
            Kind::Bool => Value::Boolean(None),
            Kind::Int8 => Value::Int8(None),
            Kind::Int16 => Value::Int16(None),
            Kind::Int32 => Value::Int32(None),
            Kind::Int64 => Value::Int64(None),
            Kind::UInt8 => Value::UInt8(None),
            Kind::UInt16 => Value::UInt16(None),
            Kind::UInt32 => Value::UInt32(None),
            Kind::UInt64 => Value::UInt64(None),
            Kind::Float32 => Value::Float32(None),
            Kind::Float64 => Value::Float64(None),
            Kind::String => Value::Varchar(None),
            Kind::Bytes => Value::Blob(None),
            Kind::Timestamp => Value::Timestamp(None),
            Kind::Dynamic | Kind::Unsupported => Value::Null,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int8 => "i8",
            Kind::Int16 => "i16",
            Kind::Int32 => "i32",
            Kind::Int64 => "i64",
            Kind::UInt8 => "u8",
            Kind::UInt16 => "u16",
            Kind::UInt32 => "u32",
            Kind::UInt64 => "u64",
            Kind::Float32 => "f32",
            Kind::Float64 => "f64",
            Kind::String => "String",
            Kind::Bytes => "bytes",
            Kind::Timestamp => "PrimitiveDateTime",
            Kind::Dynamic => "Value",
            Kind::Unsupported => "unsupported",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ToTokens for Kind {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ts = match self {
            Kind::Bool => quote!(::keel::Kind::Bool),
            Kind::Int8 => quote!(::keel::Kind::Int8),
            Kind::Int16 => quote!(::keel::Kind::Int16),
            Kind::Int32 => quote!(::keel::Kind::Int32),
            Kind::Int64 => quote!(::keel::Kind::Int64),
            Kind::UInt8 => quote!(::keel::Kind::UInt8),
            Kind::UInt16 => quote!(::keel::Kind::UInt16),
            Kind::UInt32 => quote!(::keel::Kind::UInt32),
            Kind::UInt64 => quote!(::keel::Kind::UInt64),
            Kind::Float32 => quote!(::keel::Kind::Float32),
            Kind::Float64 => quote!(::keel::Kind::Float64),
            Kind::String => quote!(::keel::Kind::String),
            Kind::Bytes => quote!(::keel::Kind::Bytes),
            Kind::Timestamp => quote!(::keel::Kind::Timestamp),
            Kind::Dynamic => quote!(::keel::Kind::Dynamic),
            Kind::Unsupported => quote!(::keel::Kind::Unsupported),
        };
        tokens.extend(ts);
    }
}
