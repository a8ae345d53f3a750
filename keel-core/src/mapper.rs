use crate::{Attribute, Entity, Field, Kind, Record, Value};

/// Convert a field to the value an attribute of the given shape expects.
///
/// This is the only place where the read path dispatches on [`Kind`]. Returns
/// `None` when the attribute cannot be populated, the caller leaves it untouched.
pub fn coerce(attribute: &Attribute, field: &Field) -> Option<Value> {
    if attribute.nullable && field.is_null() {
        return Some(attribute.kind.empty_value());
    }
    let value = match attribute.kind {
        Kind::Bool => Value::Boolean(Some(field.as_bool())),
        Kind::Int8 => Value::Int8(Some(field.as_int64() as i8)),
        Kind::Int16 => Value::Int16(Some(field.as_int64() as i16)),
        Kind::Int32 => Value::Int32(Some(field.as_int())),
        Kind::Int64 => Value::Int64(Some(field.as_int64())),
        Kind::UInt8 => Value::UInt8(Some(field.as_uint64() as u8)),
        Kind::UInt16 => Value::UInt16(Some(field.as_uint64() as u16)),
        Kind::UInt32 => Value::UInt32(Some(field.as_uint64() as u32)),
        Kind::UInt64 => Value::UInt64(Some(field.as_uint64())),
        Kind::Float32 => Value::Float32(Some(field.as_float() as f32)),
        Kind::Float64 => Value::Float64(Some(field.as_float())),
        Kind::String => Value::Varchar(Some(field.as_string())),
        Kind::Bytes => Value::Blob(Some(field.as_bytes().into())),
        Kind::Timestamp => Value::Timestamp(Some(field.as_date(None))),
        Kind::Dynamic => field.value().clone(),
        Kind::Unsupported => {
            log::warn!(
                column = attribute.tag.column(),
                attribute = attribute.name,
                observed = field.value().type_name();
                "Attribute `{}` has a type that cannot be read from a database column, it is left unchanged",
                attribute.name,
            );
            return None;
        }
    };
    Some(value)
}

/// Build one entity from one record.
///
/// Columns without a matching attribute are skipped. Attributes without a
/// matching column keep their default value.
pub fn map_record<E: Entity>(record: &Record) -> E {
    let shape = E::shape();
    let mut entity = E::default();
    for (column, field) in record.iter() {
        let Some(index) = shape.by_column(column) else {
            continue;
        };
        let attribute = &shape.attributes[index];
        let Some(value) = coerce(attribute, field) else {
            continue;
        };
        if let Err(e) = entity.assign(index, value) {
            log::warn!(
                column = column,
                attribute = attribute.name,
                expected = attribute.kind.name();
                "Could not assign column `{}` to `{}::{}`: {:#}",
                column,
                shape.name,
                attribute.name,
                e,
            );
        }
    }
    entity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullable_attributes_keep_absence() {
        let attribute = Attribute::new("name", Kind::String, true, "column=name");
        assert_eq!(
            coerce(&attribute, &Field::new(Value::Null)),
            Some(Value::Varchar(None))
        );
        let attribute = Attribute::new("name", Kind::String, false, "column=name");
        assert_eq!(
            coerce(&attribute, &Field::new(Value::Null)),
            Some(Value::Varchar(Some(String::new())))
        );
    }

    #[test]
    fn narrowing_wraps() {
        let attribute = Attribute::new("v", Kind::Int8, false, "column=v");
        assert_eq!(
            coerce(&attribute, &Field::new(Value::Int64(Some(300)))),
            Some(Value::Int8(Some(44)))
        );
        let attribute = Attribute::new("v", Kind::UInt16, false, "column=v");
        assert_eq!(
            coerce(&attribute, &Field::new(Value::Int64(Some(-1)))),
            Some(Value::UInt16(Some(u16::MAX)))
        );
    }

    #[test]
    fn unsupported_is_skipped() {
        let attribute = Attribute::new("v", Kind::Unsupported, false, "column=v");
        assert_eq!(coerce(&attribute, &Field::new(Value::Int64(Some(1)))), None);
    }
}
