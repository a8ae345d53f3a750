use crate::{
    Executor, GenericStatementWriter, Query, Record, Result, RowsAffected, Shape,
    StatementWriter, Value, map_record,
    stream::{StreamExt, TryStreamExt},
};
use std::{future::Future, pin::pin};

/// A structure mapped to a table through `#[db = "..."]` attribute tags.
///
/// Usually implemented with `#[derive(Entity)]`, which generates [`Entity::shape`],
/// [`Entity::values`] and [`Entity::assign`]. Everything else is provided.
pub trait Entity: Default + Send {
    /// Descriptor of the attributes, built once and cached.
    fn shape() -> &'static Shape;

    /// Attribute values in declaration order, aligned with `shape().attributes`.
    fn values(&self) -> Vec<Value>;

    /// Store a value, already coerced to the attribute's kind, into the attribute at `index`.
    fn assign(&mut self, index: usize, value: Value) -> Result<()>;

    /// Value of the `primarykey` attribute, `Value::Null` when the shape has none.
    fn primary_key_value(&self) -> Value {
        Self::shape()
            .primary_key()
            .and_then(|i| self.values().into_iter().nth(i))
            .unwrap_or_default()
    }

    fn from_record(record: &Record) -> Self {
        map_record(record)
    }

    /// Flatten into a record keyed by column name, attributes without a column are left out.
    fn to_record(&self) -> Record {
        Self::shape()
            .attributes
            .iter()
            .zip(self.values())
            .filter(|(attribute, _)| !attribute.tag.column().is_empty())
            .map(|(attribute, value)| (attribute.tag.column(), value))
            .collect()
    }

    /// Run the query and map every row, in order.
    fn query_many<Exec: Executor>(
        executor: &mut Exec,
        query: impl Into<Query>,
    ) -> impl Future<Output = Result<Vec<Self>>> + Send {
        executor
            .fetch(query.into())
            .map(|v| v.map(|v| Self::from_record(&v)))
            .try_collect()
    }

    /// Run the query and map the first row, the default instance when there are no rows.
    fn query_one<Exec: Executor>(
        executor: &mut Exec,
        query: impl Into<Query>,
    ) -> impl Future<Output = Result<Self>> + Send {
        let stream = executor.fetch(query.into());
        async move {
            let mut stream = pin!(stream);
            Ok(stream
                .try_next()
                .await?
                .map(|v| Self::from_record(&v))
                .unwrap_or_default())
        }
    }

    fn insert_sql(&self) -> Result<String> {
        let mut out = String::with_capacity(128);
        GenericStatementWriter.write_insert(&mut out, Self::shape(), &self.values())?;
        Ok(out)
    }

    fn update_sql(&self) -> Result<String> {
        let mut out = String::with_capacity(128);
        GenericStatementWriter.write_update(&mut out, Self::shape(), &self.values())?;
        Ok(out)
    }

    /// Insert when the primary key is zero, update otherwise.
    fn save<Exec: Executor>(
        &self,
        executor: &mut Exec,
    ) -> impl Future<Output = Result<RowsAffected>> + Send {
        crate::save(executor, self, self.primary_key_value())
    }
}
