//! Java POJO generator

use std::collections::BTreeSet;

use tracing::debug;

use super::emitter::Emitter;
use super::naming::{to_field_name, to_type_name};
use super::type_map::JAVA;
use crate::config::{ConversionOptions, Language};
use crate::parser::{ColumnDescriptor, FieldDescriptor, MessageSchema, TableSchema};

pub struct JavaEmitter;

/// One private field of a generated class
struct JavaField {
    name: String,
    ty: String,
    doc: String,
    annotations: Vec<String>,
    initializer: Option<&'static str>,
}

impl Emitter for JavaEmitter {
    fn language(&self) -> Language {
        Language::Java
    }

    fn emit_table(&self, table: &TableSchema, options: &ConversionOptions) -> String {
        let class_name = to_type_name(&table.name);
        debug!("Generating Java class {} for table {}", class_name, table.name);

        let fields: Vec<JavaField> = table
            .columns
            .iter()
            .map(|col| column_field(col, options))
            .collect();

        let mut class_annotations = Vec::new();
        if options.generate_orm_tags {
            class_annotations.push("@Entity".to_string());
            class_annotations.push(format!("@Table(name = \"{}\")", java_string(&table.name)));
        }

        let mut code = header(&options.package_name, &fields, options);
        code.push_str(&render_class(
            &class_name,
            &format!("{} entity generated from database table {}", class_name, table.name),
            &class_annotations,
            &fields,
        ));
        code
    }

    fn emit_messages(&self, messages: &[MessageSchema], options: &ConversionOptions) -> String {
        let classes: Vec<(String, Vec<JavaField>)> = messages
            .iter()
            .map(|msg| {
                let fields = msg.fields.iter().map(|f| message_field(f, options)).collect();
                (msg.name.clone(), fields)
            })
            .collect();

        let mut code = header(
            &options.package_name,
            classes.iter().flat_map(|(_, f)| f),
            options,
        );
        let rendered: Vec<String> = classes
            .iter()
            .map(|(name, fields)| {
                render_class(
                    name,
                    &format!("{} message class generated from Protocol Buffers", name),
                    &[],
                    fields,
                )
            })
            .collect();
        code.push_str(&rendered.join("\n"));
        code
    }
}

fn column_field(col: &ColumnDescriptor, options: &ConversionOptions) -> JavaField {
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

    let mut annotations = Vec::new();
    if options.generate_orm_tags {
        if col.is_primary_key {
            annotations.push("@Id".to_string());
        }
        if col.is_auto_increment {
            annotations.push("@GeneratedValue(strategy = GenerationType.IDENTITY)".to_string());
        }
    }
    if options.generate_db_tags || options.generate_orm_tags {
        let mut attrs = vec![format!("name = \"{}\"", java_string(&col.name))];
        if options.generate_orm_tags {
            if !col.nullable {
                attrs.push("nullable = false".to_string());
            }
            if col.is_unique {
                attrs.push("unique = true".to_string());
            }
            let mut definition = col.sql_type();
            if let Some(default) = col.default_sql() {
                definition.push_str(&format!(" DEFAULT {}", default));
            }
            attrs.push(format!("columnDefinition = \"{}\"", java_string(&definition)));
        }
        annotations.push(format!("@Column({})", attrs.join(", ")));
    }
    if options.generate_json_tags {
        annotations.push(format!("@JsonProperty(\"{}\")", java_string(&col.name)));
    }

    JavaField {
        name: to_field_name(&col.name, Language::Java),
        ty: JAVA.sql_type(col).to_string(),
        doc,
        annotations,
        initializer: None,
    }
}

fn message_field(field: &FieldDescriptor, options: &ConversionOptions) -> JavaField {
    let (ty, initializer) = match field.map_types() {
        Some((key, value)) => (
            format!("Map<{}, {}>", JAVA.proto_type(key), JAVA.proto_type(value)),
            Some("new HashMap<>()"),
        ),
        None if field.repeated => (
            format!("List<{}>", JAVA.proto_type(&field.raw_type)),
            Some("new ArrayList<>()"),
        ),
        None => (JAVA.proto_type(&field.raw_type).to_string(), None),
    };

    let mut annotations = Vec::new();
    if options.generate_db_tags || options.generate_orm_tags {
        annotations.push(format!("@Column(name = \"{}\")", java_string(&field.name)));
    }
    if options.generate_json_tags {
        annotations.push(format!("@JsonProperty(\"{}\")", java_string(&field.name)));
    }

    JavaField {
        name: to_field_name(&field.name, Language::Java),
        ty,
        doc: field.name.clone(),
        annotations,
        initializer,
    }
}

/// `package` line plus the imports used by the fields and annotations
fn header<'a>(
    package_name: &str,
    fields: impl IntoIterator<Item = &'a JavaField>,
    options: &ConversionOptions,
) -> String {
    let mut imports = BTreeSet::from(["java.util.*"]);
    for field in fields {
        for token in type_tokens(&field.ty) {
            match token {
                "BigDecimal" => {
                    imports.insert("java.math.BigDecimal");
                }
                "Timestamp" => {
                    imports.insert("java.sql.Timestamp");
                }
                "LocalDate" | "LocalTime" | "LocalDateTime" => {
                    imports.insert("java.time.*");
                }
                _ => {}
            }
        }
        if field.annotations.iter().any(|a| a.starts_with("@JsonProperty")) {
            imports.insert("com.fasterxml.jackson.annotation.JsonProperty");
        }
    }
    if options.generate_db_tags || options.generate_orm_tags {
        imports.insert("jakarta.persistence.*");
    }

    let mut code = format!("package {};\n\n", package_name);
    for import in imports {
        code.push_str(&format!("import {};\n", import));
    }
    code.push('\n');
    code
}

/// Identifiers in a type such as `Map<String, List<Timestamp>>`
fn type_tokens(ty: &str) -> impl Iterator<Item = &str> {
    ty.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|token| !token.is_empty())
}

fn render_class(
    class_name: &str,
    doc: &str,
    class_annotations: &[String],
    fields: &[JavaField],
) -> String {
    let mut code = format!("/**\n * {}\n */\n", doc);
    for annotation in class_annotations {
        code.push_str(&format!("{}\n", annotation));
    }
    code.push_str(&format!("public class {} {{\n\n", class_name));

    for field in fields {
        code.push_str(&format!("    /**\n     * {}\n     */\n", field.doc));
        for annotation in &field.annotations {
            code.push_str(&format!("    {}\n", annotation));
        }
        match field.initializer {
            Some(init) => code.push_str(&format!(
                "    private {} {} = {};\n\n",
                field.ty, field.name, init
            )),
            None => code.push_str(&format!("    private {} {};\n\n", field.ty, field.name)),
        }
    }

    // Constructors
    code.push_str(&format!("    public {}() {{\n    }}\n\n", class_name));
    if !fields.is_empty() {
        let params: Vec<String> = fields
            .iter()
            .map(|f| format!("{} {}", f.ty, f.name))
            .collect();
        code.push_str(&format!(
            "    public {}({}) {{\n",
            class_name,
            params.join(", ")
        ));
        for field in fields {
            code.push_str(&format!("        this.{0} = {0};\n", field.name));
        }
        code.push_str("    }\n\n");
    }

    // Getters and setters
    for field in fields {
        let accessor = capitalize(&field.name);
        code.push_str(&format!(
            "    public {} get{}() {{\n        return {};\n    }}\n\n",
            field.ty, accessor, field.name
        ));
        code.push_str(&format!(
            "    public void set{}({} {}) {{\n        this.{2} = {2};\n    }}\n\n",
            accessor, field.ty, field.name
        ));
    }

    code.push_str("    @Override\n    public String toString() {\n");
    code.push_str(&format!("        return \"{}{{\" +\n", class_name));
    for (i, field) in fields.iter().enumerate() {
        let separator = if i == 0 { "" } else { ", " };
        let value = if field.ty == "byte[]" {
            format!("Arrays.toString({})", field.name)
        } else {
            field.name.clone()
        };
        code.push_str(&format!(
            "                \"{}{}=\" + {} +\n",
            separator, field.name, value
        ));
    }
    code.push_str("                \"}\";\n    }\n}\n");
    code
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn java_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn orders_table() -> TableSchema {
        parser::parse_create_table(
            "CREATE TABLE orders (\n\
               id BIGINT NOT NULL AUTO_INCREMENT,\n\
               total DECIMAL(10,2) NOT NULL,\n\
               status VARCHAR(20) DEFAULT 'new',\n\
               placed_at TIMESTAMP,\n\
               PRIMARY KEY (id)\n\
             )",
        )
        .unwrap()
    }

    #[test]
    fn test_emit_table_defaults() {
        let code = JavaEmitter.emit_table(&orders_table(), &ConversionOptions::new(Language::Java));

        assert!(code.starts_with("package main;\n\n"));
        assert!(code.contains("import java.math.BigDecimal;\n"));
        assert!(code.contains("import java.sql.Timestamp;\n"));
        assert!(code.contains("import java.util.*;\n"));
        assert!(code.contains("import jakarta.persistence.*;\n"));
        assert!(code.contains("@Entity\n@Table(name = \"orders\")\npublic class Orders {\n"));
        assert!(code.contains(
            "    @Id\n    @GeneratedValue(strategy = GenerationType.IDENTITY)\n    \
             @Column(name = \"id\", nullable = false, columnDefinition = \"BIGINT\")\n    \
             @JsonProperty(\"id\")\n    private Long id;\n"
        ));
        assert!(code.contains("columnDefinition = \"VARCHAR(20) DEFAULT 'new'\""));
        assert!(code.contains("    private BigDecimal total;\n"));
        assert!(code.contains("    private Timestamp placedAt;\n"));
    }

    #[test]
    fn test_emit_table_helpers() {
        let options = ConversionOptions::new(Language::Java)
            .json_tags(false)
            .orm_tags(false);
        let code = JavaEmitter.emit_table(&orders_table(), &options);

        assert!(!code.contains("@JsonProperty"));
        assert!(!code.contains("@Column"));
        assert!(!code.contains("jakarta"));
        assert!(code.contains("    public Orders() {\n    }\n"));
        assert!(code.contains(
            "    public Orders(Long id, BigDecimal total, String status, Timestamp placedAt) {\n"
        ));
        assert!(code.contains("    public Timestamp getPlacedAt() {\n        return placedAt;\n    }\n"));
        assert!(code.contains(
            "    public void setStatus(String status) {\n        this.status = status;\n    }\n"
        ));
        assert!(code.contains("        return \"Orders{\" +\n                \"id=\" + id +\n"));
        assert!(code.contains("                \", placedAt=\" + placedAt +\n"));
    }

    #[test]
    fn test_emit_messages() {
        let messages = parser::parse_messages(
            "message Order {\n  repeated string items = 1;\n  map<string, int64> counts = 2;\n  \
             bytes payload = 3;\n  google.protobuf.Timestamp created = 4;\n}\n\
             message Empty {}",
        );
        let code = JavaEmitter.emit_messages(&messages, &ConversionOptions::new(Language::Java));

        assert!(code.contains("import java.time.*;\n"));
        assert!(code.contains("public class Order {\n"));
        assert!(code.contains("    private List<String> items = new ArrayList<>();\n"));
        assert!(code.contains("    private Map<String, Long> counts = new HashMap<>();\n"));
        assert!(code.contains("    private LocalDateTime created;\n"));
        assert!(code.contains("\", payload=\" + Arrays.toString(payload) +"));
        assert!(code.contains("public class Empty {\n"));
        assert!(!code.contains("@Entity"));
    }

    #[test]
    fn test_imports_match_whole_type_names() {
        let messages = parser::parse_messages(
            "message Audit { EventTimestamp at = 1; LocalDateRange window = 2; \
             map<string, google.protobuf.Timestamp> seen = 3; }",
        );
        let code = JavaEmitter.emit_messages(&messages, &ConversionOptions::new(Language::Java));
        assert!(!code.contains("import java.sql.Timestamp;"));
        assert!(code.contains("import java.time.*;\n"));
        assert!(code.contains("    private EventTimestamp at;\n"));
        assert!(code.contains("    private Map<String, LocalDateTime> seen = new HashMap<>();\n"));

        let messages = parser::parse_messages("message Window { LocalDateRange range = 1; }");
        let code = JavaEmitter.emit_messages(&messages, &ConversionOptions::new(Language::Java));
        assert!(!code.contains("java.time"));
    }

    #[test]
    fn test_quoted_defaults_in_column_definition() {
        let table = parser::parse_create_table(
            "CREATE TABLE flags (id INT, status ENUM('ACTIVE','OFF') NOT NULL DEFAULT 'ACTIVE', \
             code VARCHAR(8) DEFAULT '007')",
        )
        .unwrap();
        let code = JavaEmitter.emit_table(&table, &ConversionOptions::new(Language::Java));
        assert!(code.contains("columnDefinition = \"ENUM('ACTIVE','OFF') DEFAULT 'ACTIVE'\""));
        assert!(code.contains("columnDefinition = \"VARCHAR(8) DEFAULT '007'\""));
    }

    #[test]
    fn test_keyword_field_names() {
        let table = parser::parse_create_table("CREATE TABLE t (id INT, class VARCHAR(10))").unwrap();
        let code = JavaEmitter.emit_table(&table, &ConversionOptions::new(Language::Java));
        assert!(code.contains("    private String class_;\n"));
        assert!(code.contains("    public String getClass_() {\n"));
        assert!(code.contains("@JsonProperty(\"class\")"));
    }
}
