//! Configuration settings for devkit-codegen

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use config::{Config, Environment, File};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::defaults;
use crate::error::{CodegenError, Result};

lazy_static! {
    static ref PACKAGE_NAME: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap();
}

/// Target language for generated code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Go structs with json/db/gorm tags
    #[serde(alias = "golang")]
    Go,
    /// Java POJO classes
    Java,
    /// Python dataclasses
    #[serde(alias = "py")]
    Python,
    /// TypeScript interfaces
    #[serde(alias = "ts")]
    #[cfg_attr(feature = "cli", value(name = "typescript", alias = "ts"))]
    TypeScript,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Go,
        Language::Java,
        Language::Python,
        Language::TypeScript,
    ];

    /// Human readable name, used in messages and generated comments
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Go => "Go",
            Language::Java => "Java",
            Language::Python => "Python",
            Language::TypeScript => "TypeScript",
        }
    }

    /// Whether the reverse conversions (code -> SQL/Proto) are implemented
    pub fn supports_reverse(&self) -> bool {
        matches!(self, Language::Go)
    }
}

impl Default for Language {
    fn default() -> Self {
        defaults::TARGET_LANGUAGE
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::Go => "go",
            Language::Java => "java",
            Language::Python => "python",
            Language::TypeScript => "typescript",
        })
    }
}

impl FromStr for Language {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "go" | "golang" => Ok(Language::Go),
            "java" => Ok(Language::Java),
            "python" | "py" => Ok(Language::Python),
            "typescript" | "ts" => Ok(Language::TypeScript),
            other => Err(CodegenError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Options for a single conversion call
///
/// Plain immutable record: every conversion takes it by reference and never
/// mutates it. Use the chaining methods to derive variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Package / module name written into generated code
    #[serde(default = "default_package_name")]
    pub package_name: String,

    /// Emit JSON tags (Go) / `@JsonProperty` (Java) / `json` metadata (Python)
    #[serde(default = "default_generate_json_tags")]
    pub generate_json_tags: bool,

    /// Emit `db` tags
    #[serde(default = "default_generate_db_tags")]
    pub generate_db_tags: bool,

    /// Emit ORM annotations (gorm, JPA, column metadata)
    #[serde(default = "default_generate_orm_tags")]
    pub generate_orm_tags: bool,

    /// Wrap scalar fields in a pointer / optional type
    #[serde(default = "default_use_pointers")]
    pub use_pointers: bool,

    /// Language to generate
    #[serde(default)]
    pub target_language: Language,
}

// Default value functions for serde
fn default_package_name() -> String {
    defaults::PACKAGE_NAME.to_string()
}
fn default_generate_json_tags() -> bool {
    defaults::GENERATE_JSON_TAGS
}
fn default_generate_db_tags() -> bool {
    defaults::GENERATE_DB_TAGS
}
fn default_generate_orm_tags() -> bool {
    defaults::GENERATE_ORM_TAGS
}
fn default_use_pointers() -> bool {
    defaults::USE_POINTERS
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            package_name: default_package_name(),
            generate_json_tags: default_generate_json_tags(),
            generate_db_tags: default_generate_db_tags(),
            generate_orm_tags: default_generate_orm_tags(),
            use_pointers: default_use_pointers(),
            target_language: Language::default(),
        }
    }
}

impl ConversionOptions {
    /// Default options targeting the given language
    pub fn new(language: Language) -> Self {
        Self {
            target_language: language,
            ..Default::default()
        }
    }

    /// Set the package / module name
    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = name.into();
        self
    }

    pub fn json_tags(mut self, enabled: bool) -> Self {
        self.generate_json_tags = enabled;
        self
    }

    pub fn db_tags(mut self, enabled: bool) -> Self {
        self.generate_db_tags = enabled;
        self
    }

    pub fn orm_tags(mut self, enabled: bool) -> Self {
        self.generate_orm_tags = enabled;
        self
    }

    pub fn pointers(mut self, enabled: bool) -> Self {
        self.use_pointers = enabled;
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.target_language = language;
        self
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.package_name.is_empty() {
            return Err(CodegenError::ValidationError(
                "package_name is required".into(),
            ));
        }
        if !PACKAGE_NAME.is_match(&self.package_name) {
            return Err(CodegenError::ValidationError(format!(
                "invalid package_name: {}",
                self.package_name
            )));
        }
        Ok(())
    }
}

/// CLI configuration: conversion options plus process settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodegenConfig {
    #[serde(default)]
    pub options: ConversionOptions,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

impl CodegenConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CodegenConfig = toml::from_str(&content).map_err(|e| {
            CodegenError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    ///
    /// Environment overrides use the `DEVKIT_CODEGEN_` prefix and `__` for
    /// nesting, e.g. `DEVKIT_CODEGEN_OPTIONS__PACKAGE_NAME=models`.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder = builder.add_source(File::with_name(defaults::CONFIG_FILE_NAME).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: CodegenConfig = builder.build()?.try_deserialize()?;
        config.options.validate()?;

        Ok(config)
    }
}
