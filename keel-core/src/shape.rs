use crate::{Kind, SchemaTag};

/// Descriptor of one entity attribute, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Rust identifier of the attribute.
    pub name: &'static str,
    pub kind: Kind,
    /// Declared as `Option<T>`.
    pub nullable: bool,
    pub tag: SchemaTag,
}

impl Attribute {
    pub fn new(name: &'static str, kind: Kind, nullable: bool, tag: &str) -> Self {
        Self {
            name,
            kind,
            nullable,
            tag: SchemaTag::parse(tag),
        }
    }
}

/// Per-shape descriptor, built once for every entity type and shared by the read and write paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub name: &'static str,
    pub attributes: Box<[Attribute]>,
}

impl Shape {
    pub fn new(name: &'static str, attributes: impl Into<Box<[Attribute]>>) -> Self {
        Self {
            name,
            attributes: attributes.into(),
        }
    }

    /// Index of the attribute bound to `column`, exact match, empty column names never match.
    pub fn by_column(&self, column: &str) -> Option<usize> {
        if column.is_empty() {
            return None;
        }
        self.attributes.iter().position(|v| v.tag.column() == column)
    }

    /// First non empty `table` declared by any attribute.
    pub fn table(&self) -> Option<&str> {
        self.attributes.iter().find_map(|v| v.tag.table())
    }

    pub fn primary_key(&self) -> Option<usize> {
        self.attributes.iter().position(|v| v.tag.is_primary_key())
    }

    pub fn primary_key_count(&self) -> usize {
        self.attributes
            .iter()
            .filter(|v| v.tag.is_primary_key())
            .count()
    }
}
