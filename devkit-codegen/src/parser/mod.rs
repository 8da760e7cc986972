//! Schema extractors: SQL DDL, Protocol Buffers and Go structs

mod go_parser;
mod metadata;
mod proto_parser;
mod sql_parser;

pub use go_parser::*;
pub use metadata::*;
pub use proto_parser::*;
pub use sql_parser::*;
