use crate::{Kind, Result, Shape, TIMESTAMP_FORMAT, Value, separated_by};
use std::fmt::Write;
use time::PrimitiveDateTime;

/// Configuration problems detected while synthesizing a statement.
///
/// Returned wrapped in [`crate::Error`], use `downcast_ref::<StatementError>()` to inspect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatementError {
    #[error("no column name specified for field {0}")]
    MissingColumn(String),
    #[error("no table found in structure")]
    MissingTable,
    #[error("no non-primary key and non-omitted fields found in structure")]
    NoColumns,
    #[error("no primary key set, unable to set a where clause")]
    MissingPrimaryKey,
    #[error("multiple primary keys found in structure: {0} and {1}")]
    MultiplePrimaryKeys(String, String),
    #[error("field {0} has a type that cannot be written to a column")]
    UnsupportedType(String),
    #[error("invalid primary key value")]
    InvalidPrimaryKey,
}

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}

struct Assignments<'a> {
    table: &'a str,
    columns: Vec<(&'a str, &'a Value)>,
    primary_key: Option<(&'a str, &'a Value)>,
}

/// Walk the attributes in declaration order and split them into the target
/// table, the assigned columns and the primary key.
fn assignments<'a>(
    shape: &'a Shape,
    values: &'a [Value],
    update: bool,
) -> std::result::Result<Assignments<'a>, StatementError> {
    debug_assert_eq!(shape.attributes.len(), values.len());
    let mut table = None;
    let mut columns = Vec::with_capacity(values.len());
    let mut primary_key = None;
    let mut primary_key_name = "";
    // Raised only once the table is known
    let mut invalid = None;
    for (attribute, value) in shape.attributes.iter().zip(values) {
        let column = attribute.tag.column();
        if column.is_empty() {
            return Err(StatementError::MissingColumn(attribute.name.into()));
        }
        if table.is_none() {
            table = attribute.tag.table();
        }
        if attribute.tag.is_primary_key() {
            if primary_key.is_some() {
                invalid.get_or_insert(StatementError::MultiplePrimaryKeys(
                    primary_key_name.into(),
                    attribute.name.into(),
                ));
                continue;
            }
            if update && attribute.kind == Kind::Unsupported {
                invalid.get_or_insert(StatementError::UnsupportedType(attribute.name.into()));
            }
            primary_key = Some((column, value));
            primary_key_name = attribute.name;
        } else if !attribute.tag.is_omit() {
            if attribute.kind == Kind::Unsupported {
                invalid.get_or_insert(StatementError::UnsupportedType(attribute.name.into()));
                continue;
            }
            columns.push((column, value));
        }
    }
    let Some(table) = table else {
        return Err(StatementError::MissingTable);
    };
    if let Some(error) = invalid {
        return Err(error);
    }
    if columns.is_empty() {
        return Err(StatementError::NoColumns);
    }
    Ok(Assignments {
        table,
        columns,
        primary_key,
    })
}

/// Renders INSERT and UPDATE statements with every value inlined as a literal.
///
/// Text never reaches the statement between quotes: strings and byte sequences
/// are written as hexadecimal literals, so no escaping is involved. On error
/// nothing is appended to `out`.
pub trait StatementWriter {
    fn write_value(&self, out: &mut String, value: &Value) {
        match value {
            v if v.is_null() => self.write_value_none(out),
            Value::Boolean(Some(v)) => self.write_value_bool(out, *v),
            Value::Int8(Some(v)) => write_integer!(out, *v),
            Value::Int16(Some(v)) => write_integer!(out, *v),
            Value::Int32(Some(v)) => write_integer!(out, *v),
            Value::Int64(Some(v)) => write_integer!(out, *v),
            Value::UInt8(Some(v)) => write_integer!(out, *v),
            Value::UInt16(Some(v)) => write_integer!(out, *v),
            Value::UInt32(Some(v)) => write_integer!(out, *v),
            Value::UInt64(Some(v)) => write_integer!(out, *v),
            Value::Float32(Some(v)) => {
                let _ = write!(out, "{v}");
            }
            Value::Float64(Some(v)) => self.write_value_float(out, *v),
            Value::Varchar(Some(v)) => self.write_value_blob(out, v.as_bytes()),
            Value::Blob(Some(v)) => self.write_value_blob(out, v),
            Value::Timestamp(Some(v)) => self.write_value_timestamp(out, v),
            _ => self.write_value_none(out),
        }
    }

    fn write_value_none(&self, out: &mut String) {
        out.push_str("NULL");
    }

    fn write_value_bool(&self, out: &mut String, value: bool) {
        out.push_str(["false", "true"][value as usize]);
    }

    fn write_value_float(&self, out: &mut String, value: f64) {
        let _ = write!(out, "{value}");
    }

    fn write_value_blob(&self, out: &mut String, value: &[u8]) {
        out.push_str("X'");
        out.push_str(&hex::encode_upper(value));
        out.push('\'');
    }

    fn write_value_timestamp(&self, out: &mut String, value: &PrimitiveDateTime) {
        match value.format(TIMESTAMP_FORMAT) {
            Ok(v) => {
                out.push('\'');
                out.push_str(&v);
                out.push('\'');
            }
            Err(e) => {
                log::error!("Cannot render the timestamp {:?}, writing NULL: {}", value, e);
                self.write_value_none(out);
            }
        }
    }

    /// `INSERT INTO table(c1,c2) VALUES (v1,v2);`, the primary key is left to the database.
    fn write_insert(&self, out: &mut String, shape: &Shape, values: &[Value]) -> Result<()> {
        let assignments = assignments(shape, values, false)?;
        out.push_str("INSERT INTO ");
        out.push_str(assignments.table);
        out.push('(');
        separated_by(
            out,
            assignments.columns.iter(),
            |out, (column, _)| out.push_str(column),
            ",",
        );
        out.push_str(") VALUES (");
        separated_by(
            out,
            assignments.columns.iter(),
            |out, (_, value)| self.write_value(out, value),
            ",",
        );
        out.push_str(");");
        Ok(())
    }

    /// `UPDATE table SET c1=v1,c2=v2 WHERE pk=v;`
    fn write_update(&self, out: &mut String, shape: &Shape, values: &[Value]) -> Result<()> {
        let assignments = assignments(shape, values, true)?;
        let Some((key, key_value)) = assignments.primary_key else {
            return Err(StatementError::MissingPrimaryKey.into());
        };
        out.push_str("UPDATE ");
        out.push_str(assignments.table);
        out.push_str(" SET ");
        separated_by(
            out,
            assignments.columns.iter(),
            |out, (column, value)| {
                out.push_str(column);
                out.push('=');
                self.write_value(out, value);
            },
            ",",
        );
        out.push_str(" WHERE ");
        out.push_str(key);
        out.push('=');
        self.write_value(out, key_value);
        out.push(';');
        Ok(())
    }
}

#[derive(Default, Debug, Clone, Copy)]
pub struct GenericStatementWriter;

impl GenericStatementWriter {
    pub fn new() -> Self {
        Self
    }
}

impl StatementWriter for GenericStatementWriter {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Attribute;

    fn users() -> Shape {
        Shape::new(
            "User",
            vec![
                Attribute::new("id", Kind::Int64, false, "column=id primarykey=yes table=Users"),
                Attribute::new("name", Kind::String, false, "column=name"),
                Attribute::new("status", Kind::Int32, false, "column=status"),
            ],
        )
    }

    #[test]
    fn values() {
        let writer = GenericStatementWriter::new();
        let mut out = String::new();
        for (value, expected) in [
            (Value::Null, "NULL"),
            (Value::Int32(None), "NULL"),
            (Value::Boolean(Some(true)), "true"),
            (Value::Int8(Some(-8)), "-8"),
            (Value::UInt64(Some(u64::MAX)), "18446744073709551615"),
            (Value::Float64(Some(1.0)), "1"),
            (Value::Float32(Some(0.5)), "0.5"),
            (Value::Varchar(Some("it's".into())), "X'69742773'"),
            (Value::Varchar(Some("".into())), "X''"),
            (Value::Blob(Some([0xde, 0xad].into())), "X'DEAD'"),
        ] {
            out.clear();
            writer.write_value(&mut out, &value);
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn primary_key_rules() {
        let shape = users();
        let values = [
            Value::Int64(Some(1)),
            Value::Varchar(Some("Test".into())),
            Value::Int32(Some(31)),
        ];
        let mut out = String::new();
        GenericStatementWriter
            .write_insert(&mut out, &shape, &values)
            .unwrap();
        assert_eq!(out, "INSERT INTO Users(name,status) VALUES (X'54657374',31);");
        out.clear();
        GenericStatementWriter
            .write_update(&mut out, &shape, &values)
            .unwrap();
        assert_eq!(
            out,
            "UPDATE Users SET name=X'54657374',status=31 WHERE id=1;"
        );
    }

    #[test]
    fn two_primary_keys() {
        let shape = Shape::new(
            "Pair",
            vec![
                Attribute::new("a", Kind::Int64, false, "column=a primarykey=yes table=T"),
                Attribute::new("b", Kind::Int64, false, "column=b primarykey=yes"),
                Attribute::new("c", Kind::Int64, false, "column=c"),
            ],
        );
        let values = [
            Value::Int64(Some(1)),
            Value::Int64(Some(2)),
            Value::Int64(Some(3)),
        ];
        let mut out = String::new();
        let error = GenericStatementWriter
            .write_update(&mut out, &shape, &values)
            .unwrap_err();
        assert_eq!(
            error.downcast_ref::<StatementError>(),
            Some(&StatementError::MultiplePrimaryKeys("a".into(), "b".into()))
        );
        assert!(out.is_empty());
    }

    #[test]
    fn missing_table_reported_first() {
        let shape = Shape::new(
            "Loose",
            vec![
                Attribute::new("id", Kind::Int64, false, "column=id primarykey=yes"),
                Attribute::new("x", Kind::Unsupported, false, "column=x"),
                Attribute::new("y", Kind::Int64, false, "column=y primarykey=yes"),
            ],
        );
        let values = [Value::Int64(Some(1)), Value::Null, Value::Int64(Some(2))];
        let mut out = String::new();
        for update in [false, true] {
            let result = if update {
                GenericStatementWriter.write_update(&mut out, &shape, &values)
            } else {
                GenericStatementWriter.write_insert(&mut out, &shape, &values)
            };
            assert_eq!(
                result.unwrap_err().downcast_ref::<StatementError>(),
                Some(&StatementError::MissingTable)
            );
        }

        // With a table, the first recorded problem surfaces
        let shape = Shape::new(
            "Tabled",
            vec![
                Attribute::new("id", Kind::Int64, false, "column=id primarykey=yes table=T"),
                Attribute::new("x", Kind::Unsupported, false, "column=x"),
                Attribute::new("y", Kind::Int64, false, "column=y primarykey=yes"),
            ],
        );
        let error = GenericStatementWriter
            .write_insert(&mut out, &shape, &values)
            .unwrap_err();
        assert_eq!(
            error.downcast_ref::<StatementError>(),
            Some(&StatementError::UnsupportedType("x".into()))
        );
        assert!(out.is_empty());
    }

    #[test]
    fn timestamp_literal() {
        let mut out = String::new();
        GenericStatementWriter.write_value(
            &mut out,
            &Value::Timestamp(Some(time::macros::datetime!(0001-01-01 0:00))),
        );
        assert_eq!(out, "'0001-01-01 00:00:00'");
    }
}
