//! Inverse type tables and the SQL / Proto renderers used by reverse conversions

use std::collections::BTreeSet;

use crate::config::{ConversionOptions, Language};
use crate::parser::{ColumnDescriptor, FieldDescriptor, MessageSchema, TableSchema};

const GO_TO_SQL: &[(&str, &str, bool)] = &[
    ("int", "INT", false),
    ("int8", "TINYINT", false),
    ("int16", "SMALLINT", false),
    ("int32", "INT", false),
    ("int64", "BIGINT", false),
    ("uint", "INT", true),
    ("uint8", "TINYINT", true),
    ("uint16", "SMALLINT", true),
    ("uint32", "INT", true),
    ("uint64", "BIGINT", true),
    ("float32", "FLOAT", false),
    ("float64", "DOUBLE", false),
    ("string", "VARCHAR(255)", false),
    ("bool", "BOOLEAN", false),
    ("time.Time", "DATETIME", false),
    ("[]byte", "BLOB", false),
    ("json.RawMessage", "JSON", false),
];

const GO_TO_PROTO: &[(&str, &str)] = &[
    ("int", "int32"),
    ("int8", "int32"),
    ("int16", "int32"),
    ("int32", "int32"),
    ("int64", "int64"),
    ("uint", "uint32"),
    ("uint8", "uint32"),
    ("uint16", "uint32"),
    ("uint32", "uint32"),
    ("uint64", "uint64"),
    ("float32", "float"),
    ("float64", "double"),
    ("string", "string"),
    ("bool", "bool"),
    ("time.Time", "google.protobuf.Timestamp"),
    ("[]byte", "bytes"),
    ("json.RawMessage", "string"),
];

/// SQL type and unsigned flag for a Go type
///
/// Pointers are stripped; other slices become `TEXT`, maps `JSON`, and
/// anything unknown `VARCHAR(255)`.
pub fn go_to_sql_type(go_type: &str) -> (&'static str, bool) {
    let go_type = go_type.trim_start_matches('*');
    if let Some((_, sql, unsigned)) = GO_TO_SQL.iter().find(|(go, _, _)| *go == go_type) {
        return (sql, *unsigned);
    }
    if go_type.starts_with("[]") {
        ("TEXT", false)
    } else if go_type.starts_with("map[") {
        ("JSON", false)
    } else {
        ("VARCHAR(255)", false)
    }
}

/// Proto type for a non-repeated, non-map Go type
///
/// Names of other structs in the same input are kept as message references.
fn go_to_proto_base(go_type: &str, known: &BTreeSet<&str>) -> String {
    let go_type = go_type.trim_start_matches('*');
    if let Some((_, proto)) = GO_TO_PROTO.iter().find(|(go, _)| *go == go_type) {
        return proto.to_string();
    }
    if known.contains(go_type) {
        go_type.to_string()
    } else {
        "string".to_string()
    }
}

/// Proto field descriptor for a Go field
pub fn go_to_proto_field(name: String, go_type: &str, known: &BTreeSet<&str>) -> FieldDescriptor {
    let go_type = go_type.trim_start_matches('*');

    if let Some(rest) = go_type.strip_prefix("map[") {
        if let Some((key, value)) = split_map_type(rest) {
            return FieldDescriptor::map(
                name,
                go_to_proto_base(key, known),
                go_to_proto_base(value, known),
            );
        }
    }
    if go_type != "[]byte" {
        if let Some(elem) = go_type.strip_prefix("[]") {
            return FieldDescriptor::scalar(name, go_to_proto_base(elem, known), true);
        }
    }
    FieldDescriptor::scalar(name, go_to_proto_base(go_type, known), false)
}

/// Split "K]V" (the part after `map[`) at the bracket that closes the key
fn split_map_type(rest: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, ch) in rest.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' if depth == 0 => return Some((&rest[..i], &rest[i + 1..])),
            ']' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Render `CREATE TABLE` statements separated by blank lines
pub fn render_create_tables(tables: &[TableSchema]) -> String {
    let statements: Vec<String> = tables.iter().map(render_create_table).collect();
    statements.join("\n")
}

/// Render one `CREATE TABLE` statement
pub fn render_create_table(table: &TableSchema) -> String {
    let primary_keys: Vec<&str> = table
        .columns
        .iter()
        .filter(|c| c.is_primary_key)
        .map(|c| c.name.as_str())
        .collect();
    let inline_pk = primary_keys.len() == 1;

    let mut lines: Vec<String> = table
        .columns
        .iter()
        .map(|col| format!("  {}", render_column(col, inline_pk)))
        .collect();
    if primary_keys.len() > 1 {
        lines.push(format!("  PRIMARY KEY ({})", primary_keys.join(", ")));
    }

    format!("CREATE TABLE {} (\n{}\n);\n", table.name, lines.join(",\n"))
}

fn render_column(col: &ColumnDescriptor, inline_pk: bool) -> String {
    let mut parts = vec![col.name.clone(), col.sql_type()];
    if !col.nullable && !col.is_primary_key {
        parts.push("NOT NULL".to_string());
    }
    if col.is_primary_key && inline_pk {
        parts.push("PRIMARY KEY".to_string());
    }
    if col.is_auto_increment {
        parts.push("AUTO_INCREMENT".to_string());
    }
    if col.is_unique {
        parts.push("UNIQUE".to_string());
    }
    if let Some(default) = col.default_sql() {
        parts.push(format!("DEFAULT {}", default));
    }
    parts.join(" ")
}

/// Render a proto3 file with the given messages
pub fn render_proto(messages: &[MessageSchema], options: &ConversionOptions) -> String {
    let mut proto = format!("syntax = \"proto3\";\n\npackage {};\n\n", options.package_name);

    let uses_timestamp = messages.iter().flat_map(|m| &m.fields).any(|f| {
        f.raw_type == "google.protobuf.Timestamp"
            || f.map_value_type.as_deref() == Some("google.protobuf.Timestamp")
    });
    if uses_timestamp {
        proto.push_str("import \"google/protobuf/timestamp.proto\";\n\n");
    }

    let bodies: Vec<String> = messages.iter().map(render_message).collect();
    proto.push_str(&bodies.join("\n"));
    proto
}

fn render_message(message: &MessageSchema) -> String {
    let mut out = format!("message {} {{\n", message.name);
    for (i, field) in message.fields.iter().enumerate() {
        let ty = match field.map_types() {
            Some((key, value)) => format!("map<{}, {}>", key, value),
            None if field.repeated => format!("repeated {}", field.raw_type),
            None => field.raw_type.clone(),
        };
        out.push_str(&format!("  {} {} = {};\n", ty, field.name, i + 1));
    }
    out.push_str("}\n");
    out
}

fn placeholder_table() -> TableSchema {
    let mut id = ColumnDescriptor::new("id", "INT");
    id.is_primary_key = true;
    id.nullable = false;
    TableSchema {
        name: "example".to_string(),
        columns: vec![id],
    }
}

/// Fixed output for languages without a reverse SQL conversion
pub fn placeholder_sql(language: Language) -> String {
    format!(
        "-- SQL generated from {0}\n-- {0} to SQL conversion is not supported yet; placeholder schema below\n{1}",
        language.display_name(),
        render_create_table(&placeholder_table())
    )
}

/// Fixed output for languages without a reverse Proto conversion
pub fn placeholder_proto(language: Language, options: &ConversionOptions) -> String {
    let message = MessageSchema {
        name: "Example".to_string(),
        fields: vec![FieldDescriptor::scalar("id", "int32", false)],
    };
    format!(
        "syntax = \"proto3\";\n\npackage {};\n\n// {} to Proto conversion is not supported yet; placeholder schema below\n{}",
        options.package_name,
        language.display_name(),
        render_message(&message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_to_sql_type() {
        assert_eq!(go_to_sql_type("int64"), ("BIGINT", false));
        assert_eq!(go_to_sql_type("*uint8"), ("TINYINT", true));
        assert_eq!(go_to_sql_type("[]byte"), ("BLOB", false));
        assert_eq!(go_to_sql_type("[]string"), ("TEXT", false));
        assert_eq!(go_to_sql_type("map[string]int"), ("JSON", false));
        assert_eq!(go_to_sql_type("Custom"), ("VARCHAR(255)", false));
    }

    #[test]
    fn test_go_to_proto_field() {
        let known = BTreeSet::from(["Item"]);
        let field = go_to_proto_field("items".into(), "[]*Item", &known);
        assert!(field.repeated);
        assert_eq!(field.raw_type, "Item");

        let field = go_to_proto_field("at".into(), "*time.Time", &known);
        assert_eq!(field.raw_type, "google.protobuf.Timestamp");

        let field = go_to_proto_field("m".into(), "map[string][]int", &known);
        assert_eq!(field.map_types(), Some(("string", "string")));
    }

    #[test]
    fn test_render_composite_primary_key() {
        let mut a = ColumnDescriptor::new("order_id", "BIGINT");
        a.is_primary_key = true;
        a.nullable = false;
        let mut b = ColumnDescriptor::new("product_id", "BIGINT");
        b.is_primary_key = true;
        b.nullable = false;
        let table = TableSchema {
            name: "order_items".into(),
            columns: vec![a, b],
        };
        let sql = render_create_table(&table);
        assert_eq!(
            sql,
            "CREATE TABLE order_items (\n  order_id BIGINT,\n  product_id BIGINT,\n  PRIMARY KEY (order_id, product_id)\n);\n"
        );
    }

    #[test]
    fn test_render_defaults() {
        let mut at = ColumnDescriptor::new("created_at", "DATETIME");
        at.default_value = Some("CURRENT_TIMESTAMP".into());
        let table = TableSchema {
            name: "flags".into(),
            columns: vec![
                ColumnDescriptor::new("status", "VARCHAR(8)").with_literal_default("ACTIVE"),
                ColumnDescriptor::new("code", "VARCHAR(8)").with_literal_default("007"),
                ColumnDescriptor::new("note", "VARCHAR(8)").with_literal_default("it's"),
                at,
            ],
        };
        let sql = render_create_table(&table);
        assert!(sql.contains("  status VARCHAR(8) DEFAULT 'ACTIVE',\n"));
        assert!(sql.contains("  code VARCHAR(8) DEFAULT '007',\n"));
        assert!(sql.contains("  note VARCHAR(8) DEFAULT 'it''s',\n"));
        assert!(sql.contains("  created_at DATETIME DEFAULT CURRENT_TIMESTAMP\n"));
    }

    #[test]
    fn test_placeholders() {
        let sql = placeholder_sql(Language::Java);
        assert!(sql.contains("Java to SQL conversion is not supported"));
        assert!(sql.contains("CREATE TABLE example (\n  id INT PRIMARY KEY\n);"));

        let proto = placeholder_proto(Language::Python, &ConversionOptions::default());
        assert!(proto.starts_with("syntax = \"proto3\";\n\npackage main;\n"));
        assert!(proto.contains("message Example {\n  int32 id = 1;\n}"));
    }
}
