//! Naming utilities for code generation

use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

use crate::config::Language;

/// Convert an identifier to camelCase, or PascalCase when `capitalize_first`
///
/// Words are split on `_`, `-`, whitespace and existing case boundaries, so
/// input that is already camelCase comes back unchanged.
pub fn to_camel(identifier: &str, capitalize_first: bool) -> String {
    if capitalize_first {
        identifier.to_upper_camel_case()
    } else {
        identifier.to_lower_camel_case()
    }
}

/// Convert an identifier to snake_case
///
/// Lossy: `to_snake(&to_camel(x, true))` is not always `x`.
pub fn to_snake(identifier: &str) -> String {
    identifier.to_snake_case()
}

/// Type name for a table or message, e.g. "user_settings" -> "UserSettings"
pub fn to_type_name(name: &str) -> String {
    to_camel(name, true)
}

/// Field name for a column/field following the language's convention
pub fn to_field_name(name: &str, language: Language) -> String {
    match language {
        Language::Go => to_camel(name, true),
        Language::Java | Language::TypeScript => escape_keyword(&to_camel(name, false), language),
        Language::Python => escape_keyword(&to_snake(name), language),
    }
}

/// Check if a name is a reserved word in the given language
///
/// For Python this also covers the module-level names generated files
/// import, since a class attribute of the same name shadows them.
pub fn is_keyword(name: &str, language: Language) -> bool {
    match language {
        // Exported Go fields are capitalized and can never collide
        Language::Go => false,
        Language::Java => JAVA_KEYWORDS.contains(&name),
        Language::Python => PYTHON_KEYWORDS.contains(&name) || PYTHON_IMPORTED.contains(&name),
        // Interface property names may be reserved words
        Language::TypeScript => false,
    }
}

/// Append `_` to a field name that is a reserved word
pub fn escape_keyword(name: &str, language: Language) -> String {
    if is_keyword(name, language) {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
    "long", "native", "new", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "try", "void", "volatile", "while", "true", "false", "null", "var", "record",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Names bound by the imports of generated dataclass modules
const PYTHON_IMPORTED: &[&str] = &["dataclass", "field", "date", "datetime", "time"];
