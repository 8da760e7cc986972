//! Emitter trait and language dispatch

use super::go::GoEmitter;
use super::java::JavaEmitter;
use super::python::PythonEmitter;
use super::reverse;
use super::typescript::TypeScriptEmitter;
use crate::config::{ConversionOptions, Language};
use crate::error::Result;
use crate::parser::{MessageSchema, TableSchema};

/// Renders schemas as source code in one target language
///
/// Implementations are stateless: the same schema and options always
/// produce byte-identical output.
pub trait Emitter: Sync {
    /// Language this emitter generates
    fn language(&self) -> Language;

    /// Render one type definition for a table
    fn emit_table(&self, table: &TableSchema, options: &ConversionOptions) -> String;

    /// Render one type definition per message, in order
    fn emit_messages(&self, messages: &[MessageSchema], options: &ConversionOptions) -> String;

    /// Parse type definitions in this language and render `CREATE TABLE` statements
    ///
    /// Only Go overrides this; other languages return a fixed placeholder.
    fn code_to_sql(&self, _code: &str, _options: &ConversionOptions) -> Result<String> {
        Ok(reverse::placeholder_sql(self.language()))
    }

    /// Parse type definitions in this language and render proto messages
    ///
    /// Only Go overrides this; other languages return a fixed placeholder.
    fn code_to_proto(&self, _code: &str, options: &ConversionOptions) -> Result<String> {
        Ok(reverse::placeholder_proto(self.language(), options))
    }
}

/// Get the emitter for a language
pub fn emitter_for(language: Language) -> &'static dyn Emitter {
    match language {
        Language::Go => &GoEmitter,
        Language::Java => &JavaEmitter,
        Language::Python => &PythonEmitter,
        Language::TypeScript => &TypeScriptEmitter,
    }
}
