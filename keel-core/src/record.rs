use crate::{Field, Value};
use std::sync::Arc;

/// Shared reference-counted column name list.
pub type RecordLabels = Arc<[String]>;

/// One query result row: column labels and the fields aligned with them by index.
///
/// Labels keep the driver's column order. Lookup by name is exact and, when a
/// label is repeated, resolves to the last column carrying it.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Record {
    labels: RecordLabels,
    fields: Box<[Field]>,
}

impl Record {
    pub fn new(labels: RecordLabels, fields: Box<[Field]>) -> Self {
        debug_assert_eq!(labels.len(), fields.len());
        Self { labels, fields }
    }

    pub fn names(&self) -> &[String] {
        &self.labels
    }

    pub fn labels(&self) -> &RecordLabels {
        &self.labels
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.labels
            .iter()
            .rposition(|v| v == name)
            .map(|i| &self.fields[i])
    }

    /// Columns in driver order, repeated labels included.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Field)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.fields.iter())
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let (labels, fields): (Vec<String>, Vec<Field>) = iter
            .into_iter()
            .map(|(k, v)| (k.into(), Field::new(v.into())))
            .unzip();
        Self {
            labels: labels.into(),
            fields: fields.into(),
        }
    }
}
