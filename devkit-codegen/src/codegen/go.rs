//! Go struct generator, and the Go -> SQL / Proto reverse conversions

use std::collections::BTreeSet;

use tracing::debug;

use super::emitter::Emitter;
use super::naming::{to_field_name, to_type_name};
use super::reverse;
use super::type_map::GO;
use crate::config::{ConversionOptions, Language};
use crate::error::{CodegenError, Result};
use crate::parser::{self, ColumnDescriptor, FieldDescriptor, MessageSchema, TableSchema};

pub struct GoEmitter;

impl Emitter for GoEmitter {
    fn language(&self) -> Language {
        Language::Go
    }

    fn emit_table(&self, table: &TableSchema, options: &ConversionOptions) -> String {
        let struct_name = to_type_name(&table.name);
        debug!("Generating Go struct {} for table {}", struct_name, table.name);

        let pointer = if options.use_pointers { "*" } else { "" };
        let mut body = String::new();
        for col in &table.columns {
            let field_type = format!("{}{}", pointer, GO.sql_type(col));
            body.push_str(&format!(
                "\t{} {}{}\n",
                to_field_name(&col.name, Language::Go),
                field_type,
                column_tags(col, options)
            ));
        }

        let mut code = header(&options.package_name, &body);
        code.push_str(&format!(
            "// {} is generated from table {}.\n",
            struct_name, table.name
        ));
        code.push_str(&format!("type {} struct {{\n{}}}\n", struct_name, body));
        code
    }

    fn emit_messages(&self, messages: &[MessageSchema], options: &ConversionOptions) -> String {
        let structs: Vec<String> = messages
            .iter()
            .map(|msg| {
                let mut body = String::new();
                for field in &msg.fields {
                    body.push_str(&format!(
                        "\t{} {}{}\n",
                        to_field_name(&field.name, Language::Go),
                        field_type(field, options.use_pointers),
                        field_tags(field, options)
                    ));
                }
                format!("type {} struct {{\n{}}}\n", msg.name, body)
            })
            .collect();

        let mut code = header(&options.package_name, &structs.concat());
        code.push_str(&structs.join("\n"));
        code
    }

    fn code_to_sql(&self, code: &str, _options: &ConversionOptions) -> Result<String> {
        let tables: Vec<TableSchema> = parse_structs(code)?.iter().map(struct_to_table).collect();
        Ok(reverse::render_create_tables(&tables))
    }

    fn code_to_proto(&self, code: &str, options: &ConversionOptions) -> Result<String> {
        let structs = parse_structs(code)?;
        let known: BTreeSet<&str> = structs.iter().map(|s| s.name.as_str()).collect();
        let messages: Vec<MessageSchema> = structs
            .iter()
            .map(|s| struct_to_message(s, &known))
            .collect();
        Ok(reverse::render_proto(&messages, options))
    }
}

/// `package` line plus the import block the body needs
fn header(package_name: &str, body: &str) -> String {
    let mut imports = Vec::new();
    if body.contains("json.RawMessage") {
        imports.push("encoding/json");
    }
    if body.contains("time.Time") {
        imports.push("time");
    }

    let mut code = format!("package {}\n\n", package_name);
    match imports.as_slice() {
        [] => {}
        [single] => code.push_str(&format!("import \"{}\"\n\n", single)),
        many => {
            code.push_str("import (\n");
            for import in many {
                code.push_str(&format!("\t\"{}\"\n", import));
            }
            code.push_str(")\n\n");
        }
    }
    code
}

fn field_type(field: &FieldDescriptor, use_pointers: bool) -> String {
    if let Some((key, value)) = field.map_types() {
        return format!("map[{}]{}", GO.proto_type(key), GO.proto_type(value));
    }
    let base = GO.proto_type(&field.raw_type);
    if field.repeated {
        format!("[]{}", base)
    } else if use_pointers && field.is_singular() {
        format!("*{}", base)
    } else {
        base.to_string()
    }
}

/// Struct tag for a SQL column, or an empty string when no tags are enabled
fn column_tags(col: &ColumnDescriptor, options: &ConversionOptions) -> String {
    let mut tags = Vec::new();
    if options.generate_json_tags {
        tags.push(format!("json:\"{}\"", col.name.to_lowercase()));
    }
    if options.generate_db_tags {
        tags.push(format!("db:\"{}\"", col.name.to_lowercase()));
    }
    if options.generate_orm_tags {
        let mut gorm = vec![format!("column:{}", col.name)];
        if col.is_primary_key {
            gorm.push("primaryKey".to_string());
        }
        if col.is_unique {
            gorm.push("uniqueIndex".to_string());
        }
        if col.is_auto_increment {
            gorm.push("autoIncrement".to_string());
        }
        if !col.nullable && !col.is_primary_key {
            gorm.push("not null".to_string());
        }
        if !col.raw_type.is_empty() {
            gorm.push(format!("type:{}", col.sql_type()));
        }
        if let Some(default) = col.default_sql().filter(|d| !d.is_empty()) {
            gorm.push(format!("default:{}", default));
        }
        tags.push(format!("gorm:\"{}\"", gorm.join(";")));
    }
    wrap_tags(tags)
}

fn field_tags(field: &FieldDescriptor, options: &ConversionOptions) -> String {
    let name = field.name.to_lowercase();
    let mut tags = Vec::new();
    if options.generate_json_tags {
        tags.push(format!("json:\"{}\"", name));
    }
    if options.generate_db_tags {
        tags.push(format!("db:\"{}\"", name));
    }
    if options.generate_orm_tags {
        tags.push(format!("gorm:\"column:{}\"", name));
    }
    wrap_tags(tags)
}

fn wrap_tags(tags: Vec<String>) -> String {
    if tags.is_empty() {
        String::new()
    } else {
        format!(" `{}`", tags.join(" "))
    }
}

fn parse_structs(code: &str) -> Result<Vec<parser::GoStruct>> {
    let structs = parser::parse_go_structs(code);
    if structs.is_empty() {
        return Err(CodegenError::SchemaNotFound(
            "no Go struct definitions found".into(),
        ));
    }
    Ok(structs)
}

fn struct_to_table(go_struct: &parser::GoStruct) -> TableSchema {
    let columns = go_struct
        .fields
        .iter()
        .map(|field| {
            let name = field
                .tagged_column()
                .map(str::to_string)
                .unwrap_or_else(|| super::naming::to_snake(&field.name));

            let (raw_type, is_unsigned) = match field.gorm_setting("type").filter(|t| !t.is_empty()) {
                Some(tagged) => (tagged.to_string(), false),
                None => {
                    let (sql_type, unsigned) = reverse::go_to_sql_type(&field.go_type);
                    (sql_type.to_string(), unsigned)
                }
            };

            let (default_value, default_is_literal) = tagged_default(field);
            let is_primary_key = field.has_gorm_flag("primaryKey");
            ColumnDescriptor {
                name,
                raw_type,
                is_primary_key,
                is_unique: field.has_gorm_flag("uniqueIndex") || field.has_gorm_flag("unique"),
                is_auto_increment: field.has_gorm_flag("autoIncrement"),
                is_unsigned,
                nullable: !is_primary_key && !field.has_gorm_flag("not null"),
                default_value,
                default_is_literal,
            }
        })
        .collect();

    TableSchema {
        name: super::naming::to_snake(&go_struct.name),
        columns,
    }
}

/// gorm `default:` value; `'...'` is a string literal, anything else an expression
fn tagged_default(field: &parser::GoField) -> (Option<String>, bool) {
    match field.gorm_setting("default").filter(|d| !d.is_empty()) {
        Some(tagged) => match tagged
            .strip_prefix('\'')
            .and_then(|rest| rest.strip_suffix('\''))
        {
            Some(literal) => (Some(literal.replace("''", "'")), true),
            None => (Some(tagged.to_string()), false),
        },
        None => (None, false),
    }
}

fn struct_to_message(go_struct: &parser::GoStruct, known: &BTreeSet<&str>) -> MessageSchema {
    let fields = go_struct
        .fields
        .iter()
        .map(|field| {
            let name = field
                .tagged_column()
                .map(str::to_string)
                .unwrap_or_else(|| super::naming::to_snake(&field.name));
            reverse::go_to_proto_field(name, &field.go_type, known)
        })
        .collect();

    MessageSchema {
        name: go_struct.name.clone(),
        fields,
    }
}
