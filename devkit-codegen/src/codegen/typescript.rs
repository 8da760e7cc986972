//! TypeScript interface generator

use tracing::debug;

use super::emitter::Emitter;
use super::naming::{to_field_name, to_type_name};
use super::type_map::TYPESCRIPT;
use crate::config::{ConversionOptions, Language};
use crate::parser::{ColumnDescriptor, FieldDescriptor, MessageSchema, TableSchema};

pub struct TypeScriptEmitter;

struct TsProperty {
    name: String,
    ty: String,
    optional: bool,
    doc: String,
    /// Initial value used by the `create{Name}()` factory
    zero_value: String,
}

impl Emitter for TypeScriptEmitter {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn emit_table(&self, table: &TableSchema, options: &ConversionOptions) -> String {
        let interface_name = to_type_name(&table.name);
        debug!(
            "Generating TypeScript interface {} for table {}",
            interface_name, table.name
        );

        let properties: Vec<TsProperty> = table
            .columns
            .iter()
            .map(|col| column_property(col, options))
            .collect();

        let mut code = format!(
            "/**\n * {} interface generated from database table {}\n */\n",
            interface_name, table.name
        );
        code.push_str(&render_interface(&interface_name, &properties, true));
        code.push('\n');
        code.push_str(&render_factory(&interface_name, &properties));
        code
    }

    fn emit_messages(&self, messages: &[MessageSchema], options: &ConversionOptions) -> String {
        let mut sections = vec![
            "/**\n * TypeScript interfaces generated from Protocol Buffers\n */\n".to_string(),
        ];
        for msg in messages {
            let properties: Vec<TsProperty> = msg
                .fields
                .iter()
                .map(|field| field_property(field, options))
                .collect();

            let mut section = format!("/**\n * {} message interface\n */\n", msg.name);
            section.push_str(&render_interface(&msg.name, &properties, false));
            section.push('\n');
            section.push_str(&render_factory(&msg.name, &properties));
            sections.push(section);
        }
        sections.join("\n")
    }
}

fn column_property(col: &ColumnDescriptor, options: &ConversionOptions) -> TsProperty {
    let mut doc = col.name.clone();
    if col.is_primary_key {
        doc.push_str(" (Primary Key)");
    }
    if col.is_auto_increment {
        doc.push_str(" (Auto Increment)");
    }
    if col.is_unique {
        doc.push_str(" (Unique)");
    }
    if let Some(default) = &col.default_value {
        doc.push_str(&format!("\n   * @default {}", default));
    }

    let base = TYPESCRIPT.sql_type(col);
    TsProperty {
        name: to_field_name(&col.name, Language::TypeScript),
        ty: nullable(base, options.use_pointers),
        optional: col.is_optional(),
        doc,
        zero_value: zero_value(base).to_string(),
    }
}

fn field_property(field: &FieldDescriptor, options: &ConversionOptions) -> TsProperty {
    let (ty, zero) = match field.map_types() {
        Some((key, value)) => (
            format!(
                "Record<{}, {}>",
                TYPESCRIPT.proto_type(key),
                TYPESCRIPT.proto_type(value)
            ),
            "{}".to_string(),
        ),
        None if field.repeated => (
            format!("{}[]", TYPESCRIPT.proto_type(&field.raw_type)),
            "[]".to_string(),
        ),
        None => {
            let base = TYPESCRIPT.proto_type(&field.raw_type);
            let zero = if TYPESCRIPT.is_proto_scalar(&field.raw_type) {
                zero_value(base)
            } else {
                // Nested message references start out unset
                "undefined"
            };
            (nullable(base, options.use_pointers), zero.to_string())
        }
    };

    TsProperty {
        name: to_field_name(&field.name, Language::TypeScript),
        ty,
        optional: true,
        doc: field.name.clone(),
        zero_value: zero,
    }
}

fn nullable(base: &str, use_pointers: bool) -> String {
    if use_pointers {
        format!("{} | null", base)
    } else {
        base.to_string()
    }
}

/// Zero value for a mapped base type; anything unknown starts as `null`
fn zero_value(ts_type: &str) -> &'static str {
    match ts_type {
        "number" => "0",
        "string" => "\"\"",
        "boolean" => "false",
        "Date" => "new Date()",
        "Uint8Array" => "new Uint8Array()",
        "Record<string, any>" => "{}",
        _ => "null",
    }
}

fn render_interface(name: &str, properties: &[TsProperty], block_docs: bool) -> String {
    let members: Vec<String> = properties
        .iter()
        .map(|prop| {
            let doc = if block_docs {
                format!("  /**\n   * {}\n   */\n", prop.doc)
            } else {
                format!("  /** {} */\n", prop.doc)
            };
            format!(
                "{}  {}{}: {};\n",
                doc,
                prop.name,
                if prop.optional { "?" } else { "" },
                prop.ty
            )
        })
        .collect();

    format!("export interface {} {{\n{}}}\n", name, members.join("\n"))
}

fn render_factory(name: &str, properties: &[TsProperty]) -> String {
    let mut code = format!(
        "/**\n * Create a new {0} instance with default values\n */\nexport function create{0}(): {0} {{\n",
        name
    );
    if properties.is_empty() {
        code.push_str("  return {};\n}\n");
        return code;
    }

    let values: Vec<String> = properties
        .iter()
        .map(|prop| format!("    {}: {}", prop.name, prop.zero_value))
        .collect();
    code.push_str(&format!("  return {{\n{}\n  }};\n}}\n", values.join(",\n")));
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn test_emit_table() {
        let table = parser::parse_create_table(
            "CREATE TABLE user_profiles (\n\
               id BIGINT PRIMARY KEY AUTO_INCREMENT,\n\
               display_name VARCHAR(100) NOT NULL,\n\
               bio TEXT,\n\
               active TINYINT(1) DEFAULT 1,\n\
               avatar BLOB,\n\
               settings JSON\n\
             )",
        )
        .unwrap();
        let code = TypeScriptEmitter.emit_table(&table, &ConversionOptions::new(Language::TypeScript));

        assert!(code.starts_with(
            "/**\n * UserProfiles interface generated from database table user_profiles\n */\n\
             export interface UserProfiles {\n"
        ));
        assert!(code.contains("  /**\n   * id (Primary Key) (Auto Increment)\n   */\n  id: number;\n"));
        assert!(code.contains("  displayName: string;\n"));
        assert!(code.contains("  bio?: string;\n"));
        assert!(code.contains("   * active\n   * @default 1\n   */\n  active: boolean;\n"));
        assert!(code.contains("  avatar?: Uint8Array;\n"));
        assert!(code.contains("  settings?: Record<string, any>;\n"));
        assert!(code.contains("export function createUserProfiles(): UserProfiles {\n"));
        assert!(code.contains(
            "    id: 0,\n    displayName: \"\",\n    bio: \"\",\n    active: false,\n    \
             avatar: new Uint8Array(),\n    settings: {}\n  };\n}\n"
        ));
    }

    #[test]
    fn test_emit_table_with_pointers() {
        let table = parser::parse_create_table("CREATE TABLE t (id INT, seen_at DATETIME)").unwrap();
        let options = ConversionOptions::new(Language::TypeScript).pointers(true);
        let code = TypeScriptEmitter.emit_table(&table, &options);
        assert!(code.contains("  id?: number | null;\n"));
        assert!(code.contains("  seenAt?: Date | null;\n"));
        assert!(code.contains("    seenAt: new Date()\n"));
    }

    #[test]
    fn test_emit_messages() {
        let messages = parser::parse_messages(
            "message Point { int32 x = 1; int32 y = 2; }\n\
             message Shape { repeated Point points = 1; map<string,string> labels = 2; Point origin = 3; }",
        );
        let code = TypeScriptEmitter.emit_messages(&messages, &ConversionOptions::new(Language::TypeScript));

        assert!(code.starts_with("/**\n * TypeScript interfaces generated from Protocol Buffers\n */\n"));
        assert!(code.contains("export interface Point {\n  /** x */\n  x?: number;\n\n  /** y */\n  y?: number;\n}\n"));
        assert!(code.contains("  points?: Point[];\n"));
        assert!(code.contains("  labels?: Record<string, string>;\n"));
        assert!(code.contains("  origin?: Point;\n"));
        assert!(code.contains("    points: [],\n    labels: {},\n    origin: undefined\n"));
    }

    #[test]
    fn test_empty_message_factory() {
        let messages = parser::parse_messages("message Empty {}");
        let code = TypeScriptEmitter.emit_messages(&messages, &ConversionOptions::default());
        assert!(code.contains("export interface Empty {\n}\n"));
        assert!(code.contains("export function createEmpty(): Empty {\n  return {};\n}\n"));
    }
}
