use crate::{Value, ZERO_TIMESTAMP};
use atoi::{FromRadix10Checked, FromRadix10SignedChecked};
use std::borrow::Cow;
use time::{
    OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

/// Layout used both to parse textual timestamps and to render timestamp literals.
pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// One column of one row: an immutable, type-erased value with coercion accessors.
///
/// Accessors never fail. NULL yields the zero value of the target (or `None`
/// for the `_opt` variants), and a value that cannot be converted is reported
/// through `log` and yields the zero value as well, so that one malformed
/// column never aborts a whole result set.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Field {
    value: Value,
}

enum Numeric {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl Field {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    fn report(&self, expected: &'static str) {
        log::warn!(
            observed = self.value.type_name(),
            expected = expected;
            "Cannot convert a {} value to {}, using the zero value instead",
            self.value.type_name(),
            expected,
        );
    }

    fn text(&self) -> Option<Cow<'_, [u8]>> {
        match &self.value {
            Value::Varchar(Some(v)) => Some(Cow::Borrowed(v.as_bytes())),
            Value::Blob(Some(v)) => Some(Cow::Borrowed(v.as_ref())),
            _ => None,
        }
    }

    /// Numeric projection of the value, `None` for NULL or when it cannot be converted (reported).
    ///
    /// Text goes through `parse`, which decides the accepted width.
    fn numeric(
        &self,
        parse: fn(&[u8]) -> Option<Numeric>,
        expected: &'static str,
    ) -> Option<Numeric> {
        let result = match &self.value {
            v if v.is_null() => return None,
            Value::Boolean(Some(v)) => Numeric::Unsigned(*v as u64),
            Value::Int8(Some(v)) => Numeric::Signed(*v as i64),
            Value::Int16(Some(v)) => Numeric::Signed(*v as i64),
            Value::Int32(Some(v)) => Numeric::Signed(*v as i64),
            Value::Int64(Some(v)) => Numeric::Signed(*v),
            Value::UInt8(Some(v)) => Numeric::Unsigned(*v as u64),
            Value::UInt16(Some(v)) => Numeric::Unsigned(*v as u64),
            Value::UInt32(Some(v)) => Numeric::Unsigned(*v as u64),
            Value::UInt64(Some(v)) => Numeric::Unsigned(*v),
            Value::Float32(Some(v)) => Numeric::Float(*v as f64),
            Value::Float64(Some(v)) => Numeric::Float(*v),
            Value::Varchar(..) | Value::Blob(..) => {
                let text = self.text().unwrap_or_default();
                let parsed = parse(&text);
                if parsed.is_none() {
                    log::warn!(
                        text = String::from_utf8_lossy(&text).as_ref(),
                        expected = expected;
                        "Cannot parse `{}` as {}, using 0 instead",
                        String::from_utf8_lossy(&text),
                        expected,
                    );
                }
                return parsed;
            }
            _ => {
                self.report(expected);
                return None;
            }
        };
        Some(result)
    }

    pub fn as_string(&self) -> String {
        match &self.value {
            v if v.is_null() => String::new(),
            Value::Varchar(Some(v)) => v.clone(),
            Value::Blob(Some(v)) => String::from_utf8_lossy(v).into_owned(),
            Value::Int8(Some(v)) => itoa::Buffer::new().format(*v).into(),
            Value::Int16(Some(v)) => itoa::Buffer::new().format(*v).into(),
            Value::Int32(Some(v)) => itoa::Buffer::new().format(*v).into(),
            Value::Int64(Some(v)) => itoa::Buffer::new().format(*v).into(),
            Value::UInt8(Some(v)) => itoa::Buffer::new().format(*v).into(),
            Value::UInt16(Some(v)) => itoa::Buffer::new().format(*v).into(),
            Value::UInt32(Some(v)) => itoa::Buffer::new().format(*v).into(),
            Value::UInt64(Some(v)) => itoa::Buffer::new().format(*v).into(),
            v => v.to_string(),
        }
    }

    /// Integer projection narrowed to 32 bits, wrapping like an `as` cast.
    pub fn as_int(&self) -> i32 {
        match self.numeric(parse_signed, "i32") {
            Some(Numeric::Signed(v)) => v as i32,
            Some(Numeric::Unsigned(v)) => v as i32,
            Some(Numeric::Float(v)) => v as i32,
            None => 0,
        }
    }

    pub fn as_int64(&self) -> i64 {
        match self.numeric(parse_signed, "i64") {
            Some(Numeric::Signed(v)) => v,
            Some(Numeric::Unsigned(v)) => v as i64,
            Some(Numeric::Float(v)) => v as i64,
            None => 0,
        }
    }

    pub fn as_uint64(&self) -> u64 {
        match self.numeric(parse_integer, "u64") {
            Some(Numeric::Signed(v)) => v as u64,
            Some(Numeric::Unsigned(v)) => v,
            Some(Numeric::Float(v)) => v as u64,
            None => 0,
        }
    }

    pub fn as_float(&self) -> f64 {
        match self.numeric(parse_float, "f64") {
            Some(Numeric::Signed(v)) => v as f64,
            Some(Numeric::Unsigned(v)) => v as f64,
            Some(Numeric::Float(v)) => v,
            None => 0.0,
        }
    }

    /// Text and bytes are true when non empty, numbers when non zero.
    pub fn as_bool(&self) -> bool {
        match &self.value {
            v if v.is_null() => false,
            Value::Boolean(Some(v)) => *v,
            Value::Varchar(Some(v)) => !v.is_empty(),
            Value::Blob(Some(v)) => !v.is_empty(),
            Value::Timestamp(..) => {
                self.report("bool");
                false
            }
            _ => match self.numeric(parse_float, "bool") {
                Some(Numeric::Signed(v)) => v != 0,
                Some(Numeric::Unsigned(v)) => v != 0,
                Some(Numeric::Float(v)) => v != 0.0,
                None => false,
            },
        }
    }

    pub fn as_bytes(&self) -> Vec<u8> {
        match &self.value {
            v if v.is_null() => Vec::new(),
            Value::Blob(Some(v)) => v.to_vec(),
            Value::Varchar(Some(v)) => v.as_bytes().to_vec(),
            _ => {
                self.report("bytes");
                Vec::new()
            }
        }
    }

    /// Timestamp projection.
    ///
    /// On NULL the `default` literal is parsed when given, otherwise the current
    /// UTC time is returned. Text that does not follow [`TIMESTAMP_FORMAT`] yields
    /// [`ZERO_TIMESTAMP`].
    pub fn as_date(&self, default: Option<&str>) -> PrimitiveDateTime {
        match &self.value {
            v if v.is_null() => match default.filter(|v| !v.is_empty()) {
                Some(default) => parse_timestamp(default.as_bytes()),
                None => {
                    let now = OffsetDateTime::now_utc();
                    PrimitiveDateTime::new(now.date(), now.time())
                }
            },
            Value::Timestamp(Some(v)) => *v,
            Value::Varchar(..) | Value::Blob(..) => {
                parse_timestamp(&self.text().unwrap_or_default())
            }
            _ => {
                self.report("timestamp");
                ZERO_TIMESTAMP
            }
        }
    }

    /// Seconds since the Unix epoch of [`Field::as_date`], reading the timestamp as UTC. NULL gives 0.
    pub fn as_date_epoch(&self) -> i64 {
        if self.is_null() {
            return 0;
        }
        self.as_date(None).assume_utc().unix_timestamp()
    }

    pub fn as_string_opt(&self) -> Option<String> {
        (!self.is_null()).then(|| self.as_string())
    }

    pub fn as_int_opt(&self) -> Option<i32> {
        (!self.is_null()).then(|| self.as_int())
    }

    pub fn as_int64_opt(&self) -> Option<i64> {
        (!self.is_null()).then(|| self.as_int64())
    }

    pub fn as_uint64_opt(&self) -> Option<u64> {
        (!self.is_null()).then(|| self.as_uint64())
    }

    pub fn as_float_opt(&self) -> Option<f64> {
        (!self.is_null()).then(|| self.as_float())
    }

    pub fn as_bool_opt(&self) -> Option<bool> {
        (!self.is_null()).then(|| self.as_bool())
    }

    pub fn as_bytes_opt(&self) -> Option<Vec<u8>> {
        (!self.is_null()).then(|| self.as_bytes())
    }

    pub fn as_date_opt(&self, default: Option<&str>) -> Option<PrimitiveDateTime> {
        (!self.is_null()).then(|| self.as_date(default))
    }
}

impl From<Value> for Field {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// Base 10 literal that fits an `i64`, out of range text is a parse failure.
fn parse_signed(text: &[u8]) -> Option<Numeric> {
    if !text.iter().any(u8::is_ascii_digit) {
        return None;
    }
    match i64::from_radix_10_signed_checked(text) {
        (Some(v), used) if used == text.len() => Some(Numeric::Signed(v)),
        _ => None,
    }
}

/// Like [`parse_signed`], also accepting the unsigned range up to `u64::MAX`.
fn parse_integer(text: &[u8]) -> Option<Numeric> {
    parse_signed(text).or_else(|| match u64::from_radix_10_checked(text) {
        (Some(v), used) if used == text.len() && used > 0 => Some(Numeric::Unsigned(v)),
        _ => None,
    })
}

fn parse_float(text: &[u8]) -> Option<Numeric> {
    fast_float::parse::<f64, _>(text).ok().map(Numeric::Float)
}

fn parse_timestamp(text: &[u8]) -> PrimitiveDateTime {
    let text = String::from_utf8_lossy(text);
    match PrimitiveDateTime::parse(&text, TIMESTAMP_FORMAT) {
        Ok(v) => v,
        Err(e) => {
            log::warn!(
                text = text.as_ref(),
                expected = "timestamp";
                "Cannot parse `{}` as a timestamp ({}), using the zero timestamp instead",
                text,
                e,
            );
            ZERO_TIMESTAMP
        }
    }
}
