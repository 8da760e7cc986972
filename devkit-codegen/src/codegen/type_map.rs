//! SQL and Protocol Buffer to target language type tables
//!
//! Each table maps a canonical source token to a base target type. Pointer,
//! slice, list and map wrapping is the emitter's job, never the table's.

use tracing::debug;

use crate::config::Language;
use crate::parser::ColumnDescriptor;

/// Static type mappings for one target language
#[derive(Debug)]
pub struct TypeTable {
    /// Uppercase SQL base type (no length/precision) to target type
    pub sql: &'static [(&'static str, &'static str)],

    /// Overrides for `UNSIGNED` integer columns
    pub sql_unsigned: &'static [(&'static str, &'static str)],

    /// Target boolean type, used for `TINYINT(1)` / `BIT(1)` flag columns
    pub boolean: &'static str,

    /// Lowercase proto scalar (or well-known type) to target type
    pub proto: &'static [(&'static str, &'static str)],

    /// Used for SQL types missing from the table
    pub fallback: &'static str,
}

impl TypeTable {
    pub fn for_language(language: Language) -> &'static TypeTable {
        match language {
            Language::Go => &GO,
            Language::Java => &JAVA,
            Language::Python => &PYTHON,
            Language::TypeScript => &TYPESCRIPT,
        }
    }

    /// Base target type for a column
    pub fn sql_type(&self, column: &ColumnDescriptor) -> &'static str {
        self.sql_type_of(&column.raw_type, column.is_unsigned)
    }

    /// Base target type for a raw SQL type token such as "VARCHAR(255)"
    pub fn sql_type_of(&self, raw_type: &str, unsigned: bool) -> &'static str {
        // Flag columns must win over the generic TINYINT/BIT rows
        if is_boolean_flag(raw_type) {
            return self.boolean;
        }

        let base = sql_base_type(raw_type);
        if unsigned {
            if let Some(ty) = lookup(self.sql_unsigned, &base) {
                return ty;
            }
        }
        lookup(self.sql, &base).unwrap_or_else(|| {
            debug!(
                "No mapping for SQL type {}, falling back to {}",
                raw_type, self.fallback
            );
            self.fallback
        })
    }

    /// Target type for a proto type; message references pass through unchanged
    pub fn proto_type<'a>(&self, raw_type: &'a str) -> &'a str {
        lookup(self.proto, raw_type).unwrap_or(raw_type)
    }

    /// Whether the proto type is a scalar or well-known type known to the table
    pub fn is_proto_scalar(&self, raw_type: &str) -> bool {
        lookup(self.proto, raw_type).is_some()
    }
}

/// Uppercase base type with any `(...)` suffix removed: "varchar(255)" -> "VARCHAR"
pub fn sql_base_type(raw_type: &str) -> String {
    raw_type
        .split('(')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_uppercase()
}

/// `TINYINT(1)` and `BIT(1)` are conventionally boolean columns
pub fn is_boolean_flag(raw_type: &str) -> bool {
    let compact: String = raw_type
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    compact == "TINYINT(1)" || compact == "BIT(1)"
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub static GO: TypeTable = TypeTable {
    sql: &[
        ("INT", "int"),
        ("INTEGER", "int"),
        ("TINYINT", "int8"),
        ("SMALLINT", "int16"),
        ("MEDIUMINT", "int32"),
        ("BIGINT", "int64"),
        ("YEAR", "int16"),
        ("BIT", "uint64"),
        ("FLOAT", "float32"),
        ("DOUBLE", "float64"),
        ("REAL", "float64"),
        ("DECIMAL", "float64"),
        ("NUMERIC", "float64"),
        ("CHAR", "string"),
        ("VARCHAR", "string"),
        ("TINYTEXT", "string"),
        ("TEXT", "string"),
        ("MEDIUMTEXT", "string"),
        ("LONGTEXT", "string"),
        ("ENUM", "string"),
        ("SET", "string"),
        ("TIME", "string"),
        ("DATE", "time.Time"),
        ("DATETIME", "time.Time"),
        ("TIMESTAMP", "time.Time"),
        ("BOOLEAN", "bool"),
        ("BOOL", "bool"),
        ("BINARY", "[]byte"),
        ("VARBINARY", "[]byte"),
        ("TINYBLOB", "[]byte"),
        ("BLOB", "[]byte"),
        ("MEDIUMBLOB", "[]byte"),
        ("LONGBLOB", "[]byte"),
        ("JSON", "json.RawMessage"),
    ],
    sql_unsigned: &[
        ("INT", "uint"),
        ("INTEGER", "uint"),
        ("TINYINT", "uint8"),
        ("SMALLINT", "uint16"),
        ("MEDIUMINT", "uint32"),
        ("BIGINT", "uint64"),
    ],
    boolean: "bool",
    proto: &[
        ("double", "float64"),
        ("float", "float32"),
        ("int32", "int32"),
        ("int64", "int64"),
        ("uint32", "uint32"),
        ("uint64", "uint64"),
        ("sint32", "int32"),
        ("sint64", "int64"),
        ("fixed32", "uint32"),
        ("fixed64", "uint64"),
        ("sfixed32", "int32"),
        ("sfixed64", "int64"),
        ("bool", "bool"),
        ("string", "string"),
        ("bytes", "[]byte"),
        ("google.protobuf.Timestamp", "time.Time"),
    ],
    fallback: "interface{}",
};

pub static JAVA: TypeTable = TypeTable {
    sql: &[
        ("INT", "Integer"),
        ("INTEGER", "Integer"),
        ("TINYINT", "Byte"),
        ("SMALLINT", "Short"),
        ("MEDIUMINT", "Integer"),
        ("BIGINT", "Long"),
        ("YEAR", "Short"),
        ("FLOAT", "Float"),
        ("DOUBLE", "Double"),
        ("REAL", "Double"),
        ("DECIMAL", "BigDecimal"),
        ("NUMERIC", "BigDecimal"),
        ("CHAR", "String"),
        ("VARCHAR", "String"),
        ("TINYTEXT", "String"),
        ("TEXT", "String"),
        ("MEDIUMTEXT", "String"),
        ("LONGTEXT", "String"),
        ("ENUM", "String"),
        ("SET", "String"),
        ("DATE", "LocalDate"),
        ("TIME", "LocalTime"),
        ("DATETIME", "LocalDateTime"),
        ("TIMESTAMP", "Timestamp"),
        ("BOOLEAN", "Boolean"),
        ("BOOL", "Boolean"),
        ("BINARY", "byte[]"),
        ("VARBINARY", "byte[]"),
        ("TINYBLOB", "byte[]"),
        ("BLOB", "byte[]"),
        ("MEDIUMBLOB", "byte[]"),
        ("LONGBLOB", "byte[]"),
        ("JSON", "String"),
    ],
    sql_unsigned: &[],
    boolean: "Boolean",
    proto: &[
        ("double", "Double"),
        ("float", "Float"),
        ("int32", "Integer"),
        ("int64", "Long"),
        ("uint32", "Integer"),
        ("uint64", "Long"),
        ("sint32", "Integer"),
        ("sint64", "Long"),
        ("fixed32", "Integer"),
        ("fixed64", "Long"),
        ("sfixed32", "Integer"),
        ("sfixed64", "Long"),
        ("bool", "Boolean"),
        ("string", "String"),
        ("bytes", "byte[]"),
        ("google.protobuf.Timestamp", "LocalDateTime"),
    ],
    fallback: "Object",
};

pub static PYTHON: TypeTable = TypeTable {
    sql: &[
        ("INT", "int"),
        ("INTEGER", "int"),
        ("TINYINT", "int"),
        ("SMALLINT", "int"),
        ("MEDIUMINT", "int"),
        ("BIGINT", "int"),
        ("YEAR", "int"),
        ("BIT", "int"),
        ("FLOAT", "float"),
        ("DOUBLE", "float"),
        ("REAL", "float"),
        ("DECIMAL", "Decimal"),
        ("NUMERIC", "Decimal"),
        ("CHAR", "str"),
        ("VARCHAR", "str"),
        ("TINYTEXT", "str"),
        ("TEXT", "str"),
        ("MEDIUMTEXT", "str"),
        ("LONGTEXT", "str"),
        ("ENUM", "str"),
        ("SET", "str"),
        ("DATE", "date"),
        ("TIME", "time"),
        ("DATETIME", "datetime"),
        ("TIMESTAMP", "datetime"),
        ("BOOLEAN", "bool"),
        ("BOOL", "bool"),
        ("BINARY", "bytes"),
        ("VARBINARY", "bytes"),
        ("TINYBLOB", "bytes"),
        ("BLOB", "bytes"),
        ("MEDIUMBLOB", "bytes"),
        ("LONGBLOB", "bytes"),
        ("JSON", "Dict[str, Any]"),
    ],
    sql_unsigned: &[],
    boolean: "bool",
    proto: &[
        ("double", "float"),
        ("float", "float"),
        ("int32", "int"),
        ("int64", "int"),
        ("uint32", "int"),
        ("uint64", "int"),
        ("sint32", "int"),
        ("sint64", "int"),
        ("fixed32", "int"),
        ("fixed64", "int"),
        ("sfixed32", "int"),
        ("sfixed64", "int"),
        ("bool", "bool"),
        ("string", "str"),
        ("bytes", "bytes"),
        ("google.protobuf.Timestamp", "datetime"),
    ],
    fallback: "Any",
};

pub static TYPESCRIPT: TypeTable = TypeTable {
    sql: &[
        ("INT", "number"),
        ("INTEGER", "number"),
        ("TINYINT", "number"),
        ("SMALLINT", "number"),
        ("MEDIUMINT", "number"),
        ("BIGINT", "number"),
        ("YEAR", "number"),
        ("BIT", "number"),
        ("FLOAT", "number"),
        ("DOUBLE", "number"),
        ("REAL", "number"),
        ("DECIMAL", "number"),
        ("NUMERIC", "number"),
        ("CHAR", "string"),
        ("VARCHAR", "string"),
        ("TINYTEXT", "string"),
        ("TEXT", "string"),
        ("MEDIUMTEXT", "string"),
        ("LONGTEXT", "string"),
        ("ENUM", "string"),
        ("SET", "string"),
        ("TIME", "string"),
        ("DATE", "Date"),
        ("DATETIME", "Date"),
        ("TIMESTAMP", "Date"),
        ("BOOLEAN", "boolean"),
        ("BOOL", "boolean"),
        ("BINARY", "Uint8Array"),
        ("VARBINARY", "Uint8Array"),
        ("TINYBLOB", "Uint8Array"),
        ("BLOB", "Uint8Array"),
        ("MEDIUMBLOB", "Uint8Array"),
        ("LONGBLOB", "Uint8Array"),
        ("JSON", "Record<string, any>"),
    ],
    sql_unsigned: &[],
    boolean: "boolean",
    proto: &[
        ("double", "number"),
        ("float", "number"),
        ("int32", "number"),
        ("int64", "number"),
        ("uint32", "number"),
        ("uint64", "number"),
        ("sint32", "number"),
        ("sint64", "number"),
        ("fixed32", "number"),
        ("fixed64", "number"),
        ("sfixed32", "number"),
        ("sfixed64", "number"),
        ("bool", "boolean"),
        ("string", "string"),
        ("bytes", "Uint8Array"),
        ("google.protobuf.Timestamp", "Date"),
    ],
    fallback: "any",
};
