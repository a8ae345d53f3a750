use std::fmt::{self, Display};

/// Options recognized in an attribute tag.
pub const TAG_KEYS: [&str; 4] = ["column", "table", "primarykey", "omit"];

/// Parsed form of the `#[db = "..."]` attribute metadata.
///
/// The tag grammar is a whitespace separated list of `key=value` tokens. Only
/// the keys in [`TAG_KEYS`] are kept, a repeated key keeps its last value,
/// tokens without `=` are dropped. Values cannot contain whitespace.
///
/// # Examples
/// ```rust
/// use keel_core::SchemaTag;
/// let tag = SchemaTag::parse("column=id primarykey=yes table=Users");
/// assert_eq!(tag.column(), "id");
/// assert_eq!(tag.table(), Some("Users"));
/// assert!(tag.is_primary_key());
/// assert!(!tag.is_omit());
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct SchemaTag {
    column: Option<String>,
    table: Option<String>,
    primary_key: Option<String>,
    omit: Option<String>,
}

impl SchemaTag {
    pub fn parse(tag: &str) -> Self {
        let mut result = Self::default();
        for token in tag.split_whitespace() {
            let Some((key, value)) = token.split_once('=') else {
                continue;
            };
            let slot = match key {
                "column" => &mut result.column,
                "table" => &mut result.table,
                "primarykey" => &mut result.primary_key,
                "omit" => &mut result.omit,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }
        result
    }

    /// Raw value of a recognized key.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "column" => self.column.as_deref(),
            "table" => self.table.as_deref(),
            "primarykey" => self.primary_key.as_deref(),
            "omit" => self.omit.as_deref(),
            _ => None,
        }
    }

    /// Column name, empty when not declared.
    pub fn column(&self) -> &str {
        self.column.as_deref().unwrap_or_default()
    }

    /// Table name, `None` when absent or empty.
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref().filter(|v| !v.is_empty())
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key.as_deref() == Some("yes")
    }

    pub fn is_omit(&self) -> bool {
        self.omit.as_deref() == Some("yes")
    }
}

impl Display for SchemaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        for key in TAG_KEYS {
            if let Some(value) = self.get(key) {
                write!(f, "{separator}{key}={value}")?;
                separator = " ";
            }
        }
        Ok(())
    }
}
