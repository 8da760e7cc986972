//! Python dataclass generator

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::emitter::Emitter;
use super::naming::{to_field_name, to_type_name};
use super::type_map::PYTHON;
use crate::config::{ConversionOptions, Language};
use crate::parser::{ColumnDescriptor, FieldDescriptor, MessageSchema, TableSchema};

lazy_static! {
    static ref TYPING_NAME: Regex = Regex::new(r"\b(Any|Dict|List|Optional)\b").unwrap();
}

pub struct PythonEmitter;

/// One dataclass attribute
struct PyField {
    name: String,
    source_name: String,
    ty: String,
    comment: String,
    /// Expression after `=`, if the attribute has a default
    default: Option<String>,
}

impl Emitter for PythonEmitter {
    fn language(&self) -> Language {
        Language::Python
    }

    fn emit_table(&self, table: &TableSchema, options: &ConversionOptions) -> String {
        let class_name = to_type_name(&table.name);
        debug!("Generating Python dataclass {} for table {}", class_name, table.name);

        let fields: Vec<PyField> = table
            .columns
            .iter()
            .map(|col| column_field(col, options))
            .collect();

        let mut class = decorator(&fields);
        class.push_str(&format!(
            "class {0}:\n    \"\"\"{0} model class\n\n    Represents data from table {1}\n    \"\"\"\n",
            class_name, table.name
        ));
        push_fields(&mut class, &fields);
        push_str_method(&mut class, &class_name, &fields);

        // to_dict / from_dict use the column names as keys
        class.push_str("\n    def to_dict(self) -> Dict[str, Any]:\n");
        class.push_str("        \"\"\"Convert instance to dictionary\"\"\"\n");
        class.push_str("        return {\n");
        for field in &fields {
            class.push_str(&format!(
                "            \"{}\": self.{},\n",
                py_string(&field.source_name),
                field.name
            ));
        }
        class.push_str("        }\n");

        class.push_str("\n    @staticmethod\n");
        class.push_str(&format!(
            "    def from_dict(data: Dict[str, Any]) -> \"{}\":\n",
            class_name
        ));
        class.push_str("        \"\"\"Create instance from dictionary\"\"\"\n");
        class.push_str(&format!("        return {}(\n", class_name));
        for field in &fields {
            class.push_str(&format!(
                "            {}=data.get(\"{}\"),\n",
                field.name,
                py_string(&field.source_name)
            ));
        }
        class.push_str("        )\n");

        let mut code = format!(
            "# -*- coding: utf-8 -*-\n# {} model generated from database table {}\n\n",
            class_name, table.name
        );
        code.push_str(&imports(&class, &fields));
        code.push_str("\n\n");
        code.push_str(&class);
        code
    }

    fn emit_messages(&self, messages: &[MessageSchema], options: &ConversionOptions) -> String {
        let classes: Vec<(String, Vec<PyField>)> = messages
            .iter()
            .map(|msg| {
                let fields = msg.fields.iter().map(|f| message_field(f, options)).collect();
                (msg.name.clone(), fields)
            })
            .collect();

        let rendered: Vec<String> = classes
            .iter()
            .map(|(name, fields)| {
                let mut class = decorator(fields);
                class.push_str(&format!(
                    "class {0}:\n    \"\"\"{0} message class\n\n    Generated from Protocol Buffers definition\n    \"\"\"\n",
                    name
                ));
                push_fields(&mut class, fields);
                push_str_method(&mut class, name, fields);
                class
            })
            .collect();
        let body = rendered.join("\n\n");

        let mut code =
            String::from("# -*- coding: utf-8 -*-\n# Python classes generated from Protocol Buffers\n\n");
        // Messages may reference each other before they are defined
        code.push_str("from __future__ import annotations\n\n");
        code.push_str(&imports(&body, classes.iter().flat_map(|(_, f)| f)));
        code.push_str("\n\n");
        code.push_str(&body);
        code
    }
}

fn column_field(col: &ColumnDescriptor, options: &ConversionOptions) -> PyField {
    let mut comment = col.name.clone();
    if col.is_primary_key {
        comment.push_str(" (Primary Key)");
    }
    if col.is_auto_increment {
        comment.push_str(" (Auto Increment)");
    }

    let base = PYTHON.sql_type(col);
    let optional = col.is_optional() || options.use_pointers;
    let ty = if optional {
        format!("Optional[{}]", base)
    } else {
        base.to_string()
    };

    let mut metadata = Vec::new();
    if options.generate_json_tags {
        metadata.push(("json", py_str_literal(&col.name)));
    }
    if options.generate_db_tags {
        metadata.push(("db", py_str_literal(&col.name)));
    }
    if options.generate_orm_tags {
        metadata.push(("column", py_str_literal(&col.name)));
        if col.is_primary_key {
            metadata.push(("primary_key", "True".to_string()));
        }
        if col.is_unique {
            metadata.push(("unique", "True".to_string()));
        }
        if col.is_auto_increment {
            metadata.push(("autoincrement", "True".to_string()));
        }
        metadata.push(("sql_type", py_str_literal(&col.sql_type())));
        if let Some(default) = &col.default_value {
            metadata.push(("server_default", py_str_literal(default)));
        }
    }

    let default = match (optional, metadata.is_empty()) {
        (true, true) => Some("None".to_string()),
        (true, false) => Some(format!("field(default=None, metadata={})", py_dict(&metadata))),
        (false, true) => None,
        (false, false) => Some(format!("field(metadata={})", py_dict(&metadata))),
    };

    PyField {
        name: to_field_name(&col.name, Language::Python),
        source_name: col.name.clone(),
        ty,
        comment,
        default,
    }
}

fn message_field(field: &FieldDescriptor, options: &ConversionOptions) -> PyField {
    let (ty, factory) = match field.map_types() {
        Some((key, value)) => (
            format!("Dict[{}, {}]", PYTHON.proto_type(key), PYTHON.proto_type(value)),
            Some("dict"),
        ),
        None if field.repeated => (
            format!("List[{}]", PYTHON.proto_type(&field.raw_type)),
            Some("list"),
        ),
        None => (format!("Optional[{}]", PYTHON.proto_type(&field.raw_type)), None),
    };

    let mut metadata = Vec::new();
    if options.generate_json_tags {
        metadata.push(("json", py_str_literal(&field.name)));
    }
    if options.generate_db_tags {
        metadata.push(("db", py_str_literal(&field.name)));
    }
    if options.generate_orm_tags {
        metadata.push(("column", py_str_literal(&field.name)));
    }

    let default = match (factory, metadata.is_empty()) {
        (None, true) => "None".to_string(),
        (None, false) => format!("field(default=None, metadata={})", py_dict(&metadata)),
        (Some(factory), true) => format!("field(default_factory={})", factory),
        (Some(factory), false) => format!(
            "field(default_factory={}, metadata={})",
            factory,
            py_dict(&metadata)
        ),
    };

    PyField {
        name: to_field_name(&field.name, Language::Python),
        source_name: field.name.clone(),
        ty,
        comment: field.name.clone(),
        default: Some(default),
    }
}

/// `@dataclass`, keyword-only when a required field follows a defaulted one
fn decorator(fields: &[PyField]) -> String {
    let first_default = fields.iter().position(|f| f.default.is_some());
    let needs_kw_only = match first_default {
        Some(idx) => fields[idx..].iter().any(|f| f.default.is_none()),
        None => false,
    };
    if needs_kw_only {
        "@dataclass(kw_only=True)\n".to_string()
    } else {
        "@dataclass\n".to_string()
    }
}

fn push_fields(class: &mut String, fields: &[PyField]) {
    if !fields.is_empty() {
        class.push('\n');
    }
    for field in fields {
        class.push_str(&format!("    # {}\n", field.comment));
        match &field.default {
            Some(default) => class.push_str(&format!(
                "    {}: {} = {}\n",
                field.name, field.ty, default
            )),
            None => class.push_str(&format!("    {}: {}\n", field.name, field.ty)),
        }
    }
}

fn push_str_method(class: &mut String, class_name: &str, fields: &[PyField]) {
    let parts: Vec<String> = fields
        .iter()
        .map(|f| format!("{0}={{self.{0}}}", f.name))
        .collect();
    class.push_str("\n    def __str__(self) -> str:\n");
    class.push_str(&format!(
        "        return f\"{}({})\"\n",
        class_name,
        parts.join(", ")
    ));
}

/// Import lines for everything the rendered classes reference
fn imports<'a>(body: &str, fields: impl IntoIterator<Item = &'a PyField>) -> String {
    let mut dataclasses = vec!["dataclass"];
    if body.contains("field(") {
        dataclasses.push("field");
    }

    let mut datetime = BTreeSet::new();
    let mut decimal = false;
    for field in fields {
        for word in field.ty.split(|c: char| !c.is_alphanumeric() && c != '_') {
            match word {
                "date" | "datetime" | "time" => {
                    datetime.insert(word);
                }
                "Decimal" => decimal = true,
                _ => {}
            }
        }
    }

    let typing: BTreeSet<&str> = TYPING_NAME
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    let mut lines = vec![format!("from dataclasses import {}", dataclasses.join(", "))];
    if !datetime.is_empty() {
        let names: Vec<&str> = datetime.into_iter().collect();
        lines.push(format!("from datetime import {}", names.join(", ")));
    }
    if decimal {
        lines.push("from decimal import Decimal".to_string());
    }
    if !typing.is_empty() {
        let names: Vec<&str> = typing.into_iter().collect();
        lines.push(format!("from typing import {}", names.join(", ")));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn py_dict(entries: &[(&str, String)]) -> String {
    let items: Vec<String> = entries
        .iter()
        .map(|(key, value)| format!("\"{}\": {}", key, value))
        .collect();
    format!("{{{}}}", items.join(", "))
}

fn py_str_literal(value: &str) -> String {
    format!("\"{}\"", py_string(value))
}

fn py_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
