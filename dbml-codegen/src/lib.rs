//! dbml-codegen: Generate Go entities and Elm modules from a LINQ-to-SQL DBML schema
//!
//! The generator reads a `.dbml` document (tables, columns, associations), resolves
//! every column's CLR type to a Go and an Elm type, and renders:
//!
//! - one Go data-access entity per table (`<package>/<member>.go`)
//! - JSON-aware null wrapper types and a row scanner interface (`types.go`, `scanner.go`)
//! - optionally, one Elm data module and one Elm endpoint module per table
//!
//! # Usage
//!
//! ```rust,ignore
//! fn main() {
//!     let report = dbml_codegen::CodegenBuilder::new("northwind.dbml")
//!         .package_name("models")
//!         .elm()
//!         .endpoint_prefix("api")
//!         .generate()
//!         .expect("Failed to generate code");
//!
//!     for warning in &report.warnings {
//!         eprintln!("{}", warning);
//!     }
//! }
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! dbml-codegen --dbml northwind.dbml --pkgname models --elm --prefix api
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod parser;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub use codegen::{GenerationReport, TypeWarning};
pub use config::CodegenConfig;
pub use error::{CodegenError, Result};

/// Main entry point for code generation
pub fn generate(config: &CodegenConfig) -> Result<GenerationReport> {
    config.validate()?;

    let db = load_schema(&config.schema_file)?;
    info!("Found {} tables", db.tables.len());

    let tables = filter_tables(db.tables, &config.include_tables, &config.exclude_tables);
    debug!(
        "After filtering: {} tables (include={}, exclude={})",
        tables.len(),
        config.include_tables,
        config.exclude_tables
    );

    let report = codegen::CodeGenerator::new(config)?.generate(&tables)?;

    if config.format_output && !config.dry_run {
        format_output(config);
    }

    info!("Code generation complete");
    Ok(report)
}

/// Read and parse a DBML file
pub fn load_schema(path: &Path) -> Result<parser::Database> {
    info!("Parsing schema: {:?}", path);
    let xml = std::fs::read_to_string(path).map_err(|source| CodegenError::SchemaRead {
        path: path.to_path_buf(),
        source,
    })?;
    parser::parse_schema(&xml)
}

/// Best-effort gofmt / goimports over the generated package
fn format_output(config: &CodegenConfig) {
    let dir = config.package_dir();
    for tool in codegen::FORMATTERS {
        match codegen::format_dir(tool, &dir) {
            Ok(()) => debug!("{} -w {:?}", tool, dir),
            Err(e) => warn!("{}", e),
        }
    }
}

/// Filter tables based on include/exclude patterns
fn filter_tables(
    tables: Vec<parser::Table>,
    include: &str,
    exclude: &str,
) -> Vec<parser::Table> {
    let include_all = include.trim() == "*" || include.trim().is_empty();
    let include_set: HashSet<&str> = if include_all {
        HashSet::new()
    } else {
        include.split(',').map(str::trim).collect()
    };
    let exclude_set: HashSet<&str> = exclude
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    tables
        .into_iter()
        .filter(|t| {
            let name = t.name.as_str();
            let included = include_all || include_set.contains(name);
            let excluded = exclude_set.contains(name);
            included && !excluded
        })
        .collect()
}

/// Builder pattern for programmatic configuration (build.rs, tests)
pub struct CodegenBuilder {
    config: CodegenConfig,
}

impl CodegenBuilder {
    /// Create a new builder with the given schema file
    pub fn new(schema_file: impl AsRef<Path>) -> Self {
        Self {
            config: CodegenConfig::default_with_schema(schema_file.as_ref().to_path_buf()),
        }
    }

    /// Set the root output directory
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the Go package name (and entity directory)
    pub fn package_name(mut self, name: &str) -> Self {
        self.config.package_name = name.to_string();
        self
    }

    /// Also generate Elm data and endpoint modules
    pub fn elm(mut self) -> Self {
        self.config.generate_elm = true;
        self
    }

    /// Set the Elm API endpoint prefix
    pub fn endpoint_prefix(mut self, prefix: &str) -> Self {
        self.config.endpoint_prefix = prefix.to_string();
        self
    }

    /// Look for template overrides in this directory
    pub fn template_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.template_dir = Some(PathBuf::from(dir.as_ref()));
        self
    }

    /// Set tables to include
    pub fn include_tables(mut self, tables: &[&str]) -> Self {
        self.config.include_tables = tables.join(",");
        self
    }

    /// Set tables to exclude
    pub fn exclude_tables(mut self, tables: &[&str]) -> Self {
        self.config.exclude_tables = tables.join(",");
        self
    }

    /// Skip the gofmt / goimports pass
    pub fn skip_format(mut self) -> Self {
        self.config.format_output = false;
        self
    }

    /// Enable dry run mode (render without writing files)
    pub fn dry_run(mut self) -> Self {
        self.config.dry_run = true;
        self
    }

    /// The configuration built so far
    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Generate the code
    pub fn generate(self) -> Result<GenerationReport> {
        generate(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{RowType, Table};

    fn table(name: &str) -> Table {
        Table {
            name: name.to_string(),
            member: name.to_string(),
            row_type: RowType {
                name: name.to_string(),
                columns: vec![],
                associations: vec![],
            },
        }
    }

    fn names(tables: &[Table]) -> Vec<&str> {
        tables.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_filter_all() {
        let tables = vec![table("Orders"), table("Customers")];
        let kept = filter_tables(tables, "*", "");
        assert_eq!(names(&kept), ["Orders", "Customers"]);
    }

    #[test]
    fn test_filter_include_and_exclude() {
        let tables = vec![table("Orders"), table("Customers"), table("Audit")];
        let kept = filter_tables(tables.clone(), "Orders, Audit", "");
        assert_eq!(names(&kept), ["Orders", "Audit"]);

        let kept = filter_tables(tables, "*", "Audit");
        assert_eq!(names(&kept), ["Orders", "Customers"]);
    }

    #[test]
    fn test_builder() {
        let builder = CodegenBuilder::new("shop.dbml")
            .package_name("models")
            .elm()
            .endpoint_prefix("api")
            .skip_format()
            .dry_run();
        let config = builder.config();
        assert_eq!(config.schema_file, PathBuf::from("shop.dbml"));
        assert_eq!(config.package_name, "models");
        assert!(config.generate_elm);
        assert_eq!(config.endpoint_prefix, "api");
        assert!(!config.format_output);
        assert!(config.dry_run);
    }

    #[test]
    fn test_missing_schema_file() {
        let err = CodegenBuilder::new("/nonexistent/shop.dbml")
            .skip_format()
            .generate()
            .unwrap_err();
        assert!(err.is_schema_error());
    }
}
