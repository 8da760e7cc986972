//! Default configuration values - single source of truth

use super::settings::Language;

/// Default package / module name written into generated code
pub const PACKAGE_NAME: &str = "main";

/// Whether to generate JSON tags/annotations by default
pub const GENERATE_JSON_TAGS: bool = true;

/// Whether to generate `db` tags by default
pub const GENERATE_DB_TAGS: bool = false;

/// Whether to generate ORM tags/annotations by default
pub const GENERATE_ORM_TAGS: bool = true;

/// Whether scalar fields are pointer/optional wrapped by default
pub const USE_POINTERS: bool = false;

/// Default target language
pub const TARGET_LANGUAGE: Language = Language::Go;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "DEVKIT_CODEGEN";

/// Config file looked up in the working directory when none is given
pub const CONFIG_FILE_NAME: &str = "devkit-codegen";
