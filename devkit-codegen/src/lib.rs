//! devkit-codegen: convert between SQL tables, Protocol Buffer messages and
//! Go / Java / Python / TypeScript type definitions
//!
//! The crate provides both a CLI tool and a library. Conversions are pure
//! functions over a source string and a [`ConversionOptions`] record:
//!
//! - SQL `CREATE TABLE` -> Go struct, Java POJO, Python dataclass or TypeScript interface
//! - Proto3 `message` blocks -> the same four targets
//! - Go structs -> SQL `CREATE TABLE` / proto3 messages
//!
//! Java, Python and TypeScript sources cannot be converted back yet; those
//! directions return a fixed placeholder schema.
//!
//! # Library Usage
//!
//! ```rust
//! use devkit_codegen::{sql_to_go, ConversionOptions};
//!
//! let sql = "CREATE TABLE users (id BIGINT PRIMARY KEY AUTO_INCREMENT, name VARCHAR(255))";
//! let code = sql_to_go(sql, &ConversionOptions::default()).unwrap();
//! assert!(code.contains("type Users struct {"));
//! ```
//!
//! Dispatch on a runtime language with the generic entry points:
//!
//! ```rust
//! use devkit_codegen::{proto_to_code, ConversionOptions, Language};
//!
//! let options = ConversionOptions::new(Language::TypeScript);
//! let code = proto_to_code("message Point { int32 x = 1; }", &options).unwrap();
//! assert!(code.contains("x?: number;"));
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! devkit-codegen --language java --input schema.sql sql-to-code
//! devkit-codegen --language go --input models.go code-to-proto
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod parser;

use tracing::{info, warn};

pub use codegen::{emitter_for, Emitter};
pub use config::{CodegenConfig, ConversionOptions, Language};
pub use error::{CodegenError, Result};
pub use parser::{ColumnDescriptor, FieldDescriptor, MessageSchema, TableSchema};

/// Convert a `CREATE TABLE` statement into a type definition in the target language
pub fn sql_to_code(sql: &str, options: &ConversionOptions) -> Result<String> {
    let table = parser::parse_create_table(sql)?;
    info!(
        "Converting table {} ({} columns) to {}",
        table.name,
        table.columns.len(),
        options.target_language
    );
    Ok(emitter_for(options.target_language).emit_table(&table, options))
}

/// Convert proto3 message definitions into type definitions in the target language
pub fn proto_to_code(proto: &str, options: &ConversionOptions) -> Result<String> {
    let messages = parser::parse_messages(proto);
    if messages.is_empty() {
        return Err(CodegenError::SchemaNotFound(
            "no message definitions found".into(),
        ));
    }
    info!(
        "Converting {} proto messages to {}",
        messages.len(),
        options.target_language
    );
    Ok(emitter_for(options.target_language).emit_messages(&messages, options))
}

/// Convert type definitions in the target language into `CREATE TABLE` statements
pub fn code_to_sql(code: &str, options: &ConversionOptions) -> Result<String> {
    info!("Converting {} code to SQL", options.target_language);
    warn_placeholder(options.target_language, "SQL");
    emitter_for(options.target_language).code_to_sql(code, options)
}

/// Convert type definitions in the target language into proto3 messages
pub fn code_to_proto(code: &str, options: &ConversionOptions) -> Result<String> {
    info!("Converting {} code to Proto", options.target_language);
    warn_placeholder(options.target_language, "Proto");
    emitter_for(options.target_language).code_to_proto(code, options)
}

fn warn_placeholder(language: Language, target: &str) {
    if !language.supports_reverse() {
        warn!(
            "{} to {} conversion is not supported, returning a placeholder schema",
            language.display_name(),
            target
        );
    }
}

/// Extracted schema as pretty JSON
///
/// Input containing `message` blocks is read as Proto and yields an array of
/// messages; anything else must be a `CREATE TABLE` statement.
pub fn inspect(input: &str) -> Result<String> {
    let messages = parser::parse_messages(input);
    let json = if messages.is_empty() {
        serde_json::to_string_pretty(&parser::parse_create_table(input)?)?
    } else {
        serde_json::to_string_pretty(&messages)?
    };
    Ok(format!("{}\n", json))
}

/// Per-language entry points that ignore `options.target_language`
macro_rules! language_conversions {
    ($($lang:expr => $from_sql:ident, $from_proto:ident, $to_sql:ident, $to_proto:ident;)*) => {
        $(
            #[doc = concat!("`sql_to_code` targeting ", stringify!($lang))]
            pub fn $from_sql(sql: &str, options: &ConversionOptions) -> Result<String> {
                sql_to_code(sql, &options.clone().language($lang))
            }

            #[doc = concat!("`proto_to_code` targeting ", stringify!($lang))]
            pub fn $from_proto(proto: &str, options: &ConversionOptions) -> Result<String> {
                proto_to_code(proto, &options.clone().language($lang))
            }

            #[doc = concat!("`code_to_sql` reading ", stringify!($lang))]
            pub fn $to_sql(code: &str, options: &ConversionOptions) -> Result<String> {
                code_to_sql(code, &options.clone().language($lang))
            }

            #[doc = concat!("`code_to_proto` reading ", stringify!($lang))]
            pub fn $to_proto(code: &str, options: &ConversionOptions) -> Result<String> {
                code_to_proto(code, &options.clone().language($lang))
            }
        )*
    };
}

language_conversions! {
    Language::Go => sql_to_go, proto_to_go, go_to_sql, go_to_proto;
    Language::Java => sql_to_java, proto_to_java, java_to_sql, java_to_proto;
    Language::Python => sql_to_python, proto_to_python, python_to_sql, python_to_proto;
    Language::TypeScript => sql_to_typescript, proto_to_typescript, typescript_to_sql, typescript_to_proto;
}
