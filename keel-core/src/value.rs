use crate::{Kind, TIMESTAMP_FORMAT};
use std::fmt::{self, Display};
use time::PrimitiveDateTime;

/// A single scalar as produced by a driver or extracted from an entity attribute.
///
/// Every typed variant wraps an `Option` so that a typed absence (an `Option<T>`
/// attribute set to `None`) keeps its type, while `Value::Null` stands for the
/// untyped NULL a driver returns when it has no type information.
#[derive(Default, Debug, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Timestamp(Option<PrimitiveDateTime>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int8(l), Self::Int8(r)) => l == r,
            (Self::Int16(l), Self::Int16(r)) => l == r,
            (Self::Int32(l), Self::Int32(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::UInt8(l), Self::UInt8(r)) => l == r,
            (Self::UInt16(l), Self::UInt16(r)) => l == r,
            (Self::UInt32(l), Self::UInt32(r)) => l == r,
            (Self::UInt64(l), Self::UInt64(r)) => l == r,
            (Self::Float32(l), Self::Float32(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::Blob(l), Self::Blob(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl Value {
    pub fn same_type(&self, other: &Self) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }

    /// True for the untyped `Null` and for any typed variant holding `None`.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => v.is_none(),
            Value::Int8(v) => v.is_none(),
            Value::Int16(v) => v.is_none(),
            Value::Int32(v) => v.is_none(),
            Value::Int64(v) => v.is_none(),
            Value::UInt8(v) => v.is_none(),
            Value::UInt16(v) => v.is_none(),
            Value::UInt32(v) => v.is_none(),
            Value::UInt64(v) => v.is_none(),
            Value::Float32(v) => v.is_none(),
            Value::Float64(v) => v.is_none(),
            Value::Varchar(v) => v.is_none(),
            Value::Blob(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
        }
    }

    /// Whether the value equals the natural zero of its type.
    ///
    /// Typed absences count as zero. The untyped `Null` does not, it carries no
    /// type to compare against and callers must treat it separately.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(v) => !v.unwrap_or_default(),
            Value::Int8(v) => v.unwrap_or_default() == 0,
            Value::Int16(v) => v.unwrap_or_default() == 0,
            Value::Int32(v) => v.unwrap_or_default() == 0,
            Value::Int64(v) => v.unwrap_or_default() == 0,
            Value::UInt8(v) => v.unwrap_or_default() == 0,
            Value::UInt16(v) => v.unwrap_or_default() == 0,
            Value::UInt32(v) => v.unwrap_or_default() == 0,
            Value::UInt64(v) => v.unwrap_or_default() == 0,
            Value::Float32(v) => v.unwrap_or_default() == 0.0,
            Value::Float64(v) => v.unwrap_or_default() == 0.0,
            Value::Varchar(v) => v.as_deref().is_none_or(str::is_empty),
            Value::Blob(v) => v.as_deref().is_none_or(<[u8]>::is_empty),
            Value::Timestamp(v) => v.is_none_or(|v| v == ZERO_TIMESTAMP),
        }
    }

    /// The semantic type this value belongs to, `Kind::Dynamic` for the untyped `Null`.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Dynamic,
            Value::Boolean(..) => Kind::Bool,
            Value::Int8(..) => Kind::Int8,
            Value::Int16(..) => Kind::Int16,
            Value::Int32(..) => Kind::Int32,
            Value::Int64(..) => Kind::Int64,
            Value::UInt8(..) => Kind::UInt8,
            Value::UInt16(..) => Kind::UInt16,
            Value::UInt32(..) => Kind::UInt32,
            Value::UInt64(..) => Kind::UInt64,
            Value::Float32(..) => Kind::Float32,
            Value::Float64(..) => Kind::Float64,
            Value::Varchar(..) => Kind::String,
            Value::Blob(..) => Kind::Bytes,
            Value::Timestamp(..) => Kind::Timestamp,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "NULL",
            Value::Boolean(..) => "bool",
            Value::Int8(..) => "i8",
            Value::Int16(..) => "i16",
            Value::Int32(..) => "i32",
            Value::Int64(..) => "i64",
            Value::UInt8(..) => "u8",
            Value::UInt16(..) => "u16",
            Value::UInt32(..) => "u32",
            Value::UInt64(..) => "u64",
            Value::Float32(..) => "f32",
            Value::Float64(..) => "f64",
            Value::Varchar(..) => "text",
            Value::Blob(..) => "bytes",
            Value::Timestamp(..) => "timestamp",
        }
    }
}

/// The zero timestamp: `0001-01-01 00:00:00`.
pub const ZERO_TIMESTAMP: PrimitiveDateTime = time::macros::datetime!(0001-01-01 0:00);

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            v if v.is_null() => f.write_str("NULL"),
            Value::Boolean(Some(v)) => write!(f, "{v}"),
            Value::Int8(Some(v)) => write!(f, "{v}"),
            Value::Int16(Some(v)) => write!(f, "{v}"),
            Value::Int32(Some(v)) => write!(f, "{v}"),
            Value::Int64(Some(v)) => write!(f, "{v}"),
            Value::UInt8(Some(v)) => write!(f, "{v}"),
            Value::UInt16(Some(v)) => write!(f, "{v}"),
            Value::UInt32(Some(v)) => write!(f, "{v}"),
            Value::UInt64(Some(v)) => write!(f, "{v}"),
            Value::Float32(Some(v)) => write!(f, "{v}"),
            Value::Float64(Some(v)) => write!(f, "{v}"),
            Value::Varchar(Some(v)) => f.write_str(v),
            Value::Blob(Some(v)) => f.write_str(&String::from_utf8_lossy(v)),
            Value::Timestamp(Some(v)) => match v.format(TIMESTAMP_FORMAT) {
                Ok(v) => f.write_str(&v),
                Err(..) => Err(fmt::Error),
            },
            _ => unreachable!(),
        }
    }
}
