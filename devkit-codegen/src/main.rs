//! CLI entry point for devkit-codegen

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use devkit_codegen::config::{CodegenConfig, ConversionOptions, Language};

#[derive(Parser)]
#[command(name = "devkit-codegen")]
#[command(about = "Convert between SQL tables, Protocol Buffers and Go/Java/Python/TypeScript types")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Target (or source, for code-to-*) language (overrides config)
    #[arg(short, long, global = true, value_enum)]
    language: Option<Language>,

    /// Package / module name written into generated code (overrides config)
    #[arg(short, long, global = true)]
    package: Option<String>,

    /// Emit JSON tags / annotations
    #[arg(long, global = true)]
    json_tags: Option<bool>,

    /// Emit db tags / column annotations
    #[arg(long, global = true)]
    db_tags: Option<bool>,

    /// Emit ORM tags / annotations
    #[arg(long, global = true)]
    orm_tags: Option<bool>,

    /// Wrap scalar fields in pointer / optional types
    #[arg(long, global = true)]
    pointers: Option<bool>,

    /// Input file (reads stdin when omitted)
    #[arg(short, long, global = true)]
    input: Option<PathBuf>,

    /// Output file (writes stdout when omitted)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Convert a CREATE TABLE statement into a type definition
    SqlToCode,
    /// Convert proto3 messages into type definitions
    ProtoToCode,
    /// Convert type definitions into CREATE TABLE statements
    CodeToSql,
    /// Convert type definitions into proto3 messages
    CodeToProto,
    /// Print the extracted schema as JSON (SQL, or Proto when the input has messages)
    Inspect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let config = CodegenConfig::load(cli.config.as_deref())?;

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    let options = apply_overrides(config.options, &cli);
    options.validate()?;
    debug!("Effective options: {:?}", options);

    let input = read_input(cli.input.as_ref())?;
    if input.trim().is_empty() {
        bail!(empty_input_message(cli.command, options.target_language));
    }

    let output = match cli.command {
        Commands::SqlToCode => devkit_codegen::sql_to_code(&input, &options)?,
        Commands::ProtoToCode => devkit_codegen::proto_to_code(&input, &options)?,
        Commands::CodeToSql => devkit_codegen::code_to_sql(&input, &options)?,
        Commands::CodeToProto => devkit_codegen::code_to_proto(&input, &options)?,
        Commands::Inspect => devkit_codegen::inspect(&input)?,
    };

    write_output(cli.output.as_ref(), &output)?;
    info!("Conversion completed successfully");
    Ok(())
}

/// Apply CLI flags on top of the loaded options
fn apply_overrides(mut options: ConversionOptions, cli: &Cli) -> ConversionOptions {
    if let Some(language) = cli.language {
        options = options.language(language);
    }
    if let Some(package) = &cli.package {
        options = options.package_name(package.clone());
    }
    if let Some(enabled) = cli.json_tags {
        options = options.json_tags(enabled);
    }
    if let Some(enabled) = cli.db_tags {
        options = options.db_tags(enabled);
    }
    if let Some(enabled) = cli.orm_tags {
        options = options.orm_tags(enabled);
    }
    if let Some(enabled) = cli.pointers {
        options = options.pointers(enabled);
    }
    options
}

fn empty_input_message(command: Commands, language: Language) -> String {
    match command {
        Commands::SqlToCode => "Please enter SQL CREATE TABLE statement".to_string(),
        Commands::ProtoToCode => "Please enter Protocol Buffer definition".to_string(),
        Commands::CodeToSql | Commands::CodeToProto => {
            let construct = match language {
                Language::Go => "struct",
                Language::Java | Language::Python => "class",
                Language::TypeScript => "interface",
            };
            format!("Please enter {} {} definition", language.display_name(), construct)
        }
        Commands::Inspect => "Please enter SQL or Protocol Buffer definition".to_string(),
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&PathBuf>, output: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
