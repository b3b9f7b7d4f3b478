//! CLI entry point for dbml-codegen

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dbml_codegen::config::CodegenConfig;
use dbml_codegen::parser::{self, Database};

#[derive(Parser)]
#[command(name = "dbml-codegen")]
#[command(about = "Generate Go entities and Elm modules from a LINQ-to-SQL DBML schema")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the DBML file (overrides config)
    #[arg(long)]
    dbml: Option<PathBuf>,

    /// Package name for generated Go entities (default: data)
    #[arg(long)]
    pkgname: Option<String>,

    /// Generate Elm data and endpoint files
    #[arg(long)]
    elm: bool,

    /// Elm API endpoint prefix, i.e. /prefix/membername
    #[arg(long)]
    prefix: Option<String>,

    /// Root output directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory with template overrides
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Do not run gofmt / goimports on the generated package
    #[arg(long)]
    no_format: bool,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Go entities (and Elm modules with --elm)
    Generate,
    /// Print every CLR type in the schema with its DbType instead of generating
    Types,
    /// Inspect schema (show parsed tables for debugging)
    Inspect,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = CodegenConfig::load(cli.config.as_deref())?;

    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(dbml) = cli.dbml {
        config.schema_file = dbml;
    }
    if let Some(pkgname) = cli.pkgname {
        config.package_name = pkgname;
    }
    if cli.elm {
        config.generate_elm = true;
    }
    if let Some(prefix) = cli.prefix {
        config.endpoint_prefix = prefix;
    }
    if let Some(output) = cli.output {
        config.output_dir = output;
    }
    if let Some(templates) = cli.templates {
        config.template_dir = Some(templates);
    }
    if cli.no_format {
        config.format_output = false;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    // Missing required settings print usage and end the run cleanly
    if let Err(e) = config.validate() {
        if !e.is_config_error() {
            return Err(e.into());
        }
        error!("{}", e);
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    }

    match cli.command {
        Some(Commands::Types) => {
            if let Some(db) = load_schema(&config) {
                print_types(&db);
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Inspect) => {
            if let Some(db) = load_schema(&config) {
                inspect_schema(&db);
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Generate) | None => generate(&config),
    }
}

fn generate(config: &CodegenConfig) -> Result<ExitCode> {
    info!("Generating code from schema: {:?}", config.schema_file);

    match dbml_codegen::generate(config) {
        Ok(report) => {
            if config.dry_run {
                println!("Dry run mode - would generate:");
                for file in &report.files {
                    println!("  {}", file.display());
                }
            }
            info!(
                "Code generation completed successfully ({} unhandled types)",
                report.warnings.len()
            );
            Ok(ExitCode::SUCCESS)
        }
        // A schema that cannot be read or parsed ends the run before any output
        Err(e) if e.is_schema_error() => {
            error!("{}", e);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Err(e.into()),
    }
}

fn load_schema(config: &CodegenConfig) -> Option<Database> {
    match dbml_codegen::load_schema(&config.schema_file) {
        Ok(db) => Some(db),
        Err(e) => {
            error!("{}", e);
            None
        }
    }
}

fn print_types(db: &Database) {
    for (clr_type, db_type) in parser::schema_types(db) {
        println!("{} {}", clr_type, db_type);
    }
}

fn inspect_schema(db: &Database) {
    println!("Parsed {} tables:\n", db.tables.len());
    for table in &db.tables {
        println!("Table: {} (member {})", table.name, table.member);
        println!("  Type: {}", table.row_type.name);
        println!("  Columns:");
        for col in table.columns() {
            let nullable = if col.can_be_null { "NULL" } else { "NOT NULL" };
            let pk = if col.is_primary_key { " PRIMARY KEY" } else { "" };
            let generated = if col.is_db_generated { " GENERATED" } else { "" };
            println!(
                "    - {} {} [{}] {}{}{}",
                col.name, col.clr_type, col.db_type, nullable, pk, generated
            );
        }
        if !table.row_type.associations.is_empty() {
            println!("  Associations:");
            for assoc in &table.row_type.associations {
                println!(
                    "    - {} {}: {} -> {}.{}",
                    assoc.name, assoc.member, assoc.this_key, assoc.type_name, assoc.other_key
                );
            }
        }
        println!();
    }
}
