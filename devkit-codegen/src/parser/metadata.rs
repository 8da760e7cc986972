//! Intermediate schema structures produced by the extractors

use serde::{Deserialize, Serialize};

/// A table parsed from a `CREATE TABLE` statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name, unquoted
    pub name: String,

    /// Columns in declaration order
    pub columns: Vec<ColumnDescriptor>,
}

/// Metadata for a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name (never empty)
    pub name: String,

    /// Data type token as written, e.g. "BIGINT", "VARCHAR(255)", "DECIMAL(10,2)"
    pub raw_type: String,

    /// Column is (part of) the primary key
    pub is_primary_key: bool,

    /// Column carries a single-column unique constraint
    pub is_unique: bool,

    /// Whether this column is auto-increment
    pub is_auto_increment: bool,

    /// Whether this column is unsigned (for numeric types)
    pub is_unsigned: bool,

    /// False for `NOT NULL` and primary key columns
    pub nullable: bool,

    /// Default value; string literals are stored without their quotes
    pub default_value: Option<String>,

    /// `default_value` was written as a quoted string literal
    #[serde(default)]
    pub default_is_literal: bool,
}

impl ColumnDescriptor {
    /// Create a plain nullable column with no constraints
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            is_primary_key: false,
            is_unique: false,
            is_auto_increment: false,
            is_unsigned: false,
            nullable: true,
            default_value: None,
            default_is_literal: false,
        }
    }

    /// Set a quoted string literal default
    pub fn with_literal_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self.default_is_literal = true;
        self
    }

    /// SQL type as it should be written back, e.g. "BIGINT UNSIGNED"
    pub fn sql_type(&self) -> String {
        if self.is_unsigned {
            format!("{} UNSIGNED", self.raw_type)
        } else {
            self.raw_type.clone()
        }
    }

    /// Default as SQL text: literals re-quoted, expressions as written
    pub fn default_sql(&self) -> Option<String> {
        self.default_value.as_ref().map(|value| {
            if self.default_is_literal {
                format!("'{}'", value.replace('\'', "''"))
            } else {
                value.clone()
            }
        })
    }

    /// Whether a generated field for this column should be optional
    pub fn is_optional(&self) -> bool {
        self.nullable && !self.is_primary_key && self.default_value.is_none()
    }
}

impl TableSchema {
    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// A message parsed from a `.proto` definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSchema {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

/// Metadata for a message field
///
/// `is_map` implies both map types are set and `repeated` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,

    /// Scalar or message type token; `map<K,V>` for map fields
    pub raw_type: String,

    pub repeated: bool,
    pub is_map: bool,
    pub map_key_type: Option<String>,
    pub map_value_type: Option<String>,
}

impl FieldDescriptor {
    /// Singular or repeated field of the given type
    pub fn scalar(name: impl Into<String>, raw_type: impl Into<String>, repeated: bool) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            repeated,
            is_map: false,
            map_key_type: None,
            map_value_type: None,
        }
    }

    /// `map<key, value>` field
    pub fn map(name: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        Self {
            name: name.into(),
            raw_type: format!("map<{},{}>", key, value),
            repeated: false,
            is_map: true,
            map_key_type: Some(key),
            map_value_type: Some(value),
        }
    }

    /// Singular field that is neither repeated nor a map
    pub fn is_singular(&self) -> bool {
        !self.repeated && !self.is_map
    }

    /// Key and value types, present only for map fields
    pub fn map_types(&self) -> Option<(&str, &str)> {
        match (&self.map_key_type, &self.map_value_type) {
            (Some(k), Some(v)) if self.is_map => Some((k.as_str(), v.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_field_invariant() {
        let field = FieldDescriptor::map("labels", "string", "int32");
        assert!(field.is_map);
        assert!(!field.repeated);
        assert_eq!(field.map_types(), Some(("string", "int32")));
        assert_eq!(field.raw_type, "map<string,int32>");
    }

    #[test]
    fn test_sql_type_unsigned() {
        let mut col = ColumnDescriptor::new("count", "INT");
        assert_eq!(col.sql_type(), "INT");
        col.is_unsigned = true;
        assert_eq!(col.sql_type(), "INT UNSIGNED");
    }

    #[test]
    fn test_is_optional() {
        let mut col = ColumnDescriptor::new("bio", "TEXT");
        assert!(col.is_optional());
        col.default_value = Some("".to_string());
        assert!(!col.is_optional());
    }

    #[test]
    fn test_default_sql() {
        let mut col = ColumnDescriptor::new("status", "VARCHAR(8)");
        assert_eq!(col.default_sql(), None);

        col.default_value = Some("CURRENT_TIMESTAMP".to_string());
        assert_eq!(col.default_sql().as_deref(), Some("CURRENT_TIMESTAMP"));

        let col = col.with_literal_default("ACTIVE");
        assert_eq!(col.default_sql().as_deref(), Some("'ACTIVE'"));
        let col = col.with_literal_default("it's");
        assert_eq!(col.default_sql().as_deref(), Some("'it''s'"));
        let col = col.with_literal_default("");
        assert_eq!(col.default_sql().as_deref(), Some("''"));
    }
}
