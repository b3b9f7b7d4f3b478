//! Configuration settings for dbml-codegen

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults;
use crate::error::{CodegenError, Result};

/// Main configuration struct for code generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Path to the DBML schema file
    #[serde(default)]
    pub schema_file: PathBuf,

    /// Go package name; also the directory the entities are written to
    #[serde(default = "default_package_name")]
    pub package_name: String,

    /// Root directory for all generated output
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Whether to generate Elm data and endpoint modules
    #[serde(default = "default_generate_elm")]
    pub generate_elm: bool,

    /// Elm API endpoint prefix, i.e. /prefix/membername
    #[serde(default = "default_endpoint_prefix")]
    pub endpoint_prefix: String,

    /// Directory holding template overrides, looked up by file name
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Tables to include (comma-separated, or "*" for all)
    #[serde(default = "default_include_tables")]
    pub include_tables: String,

    /// Tables to exclude (comma-separated)
    #[serde(default = "default_exclude_tables")]
    pub exclude_tables: String,

    /// Run gofmt and goimports over the generated package
    #[serde(default = "default_format_output")]
    pub format_output: bool,

    /// Dry run mode - render everything without writing files
    #[serde(default = "default_dry_run")]
    pub dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_package_name() -> String {
    defaults::PACKAGE_NAME.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::OUTPUT_DIR)
}
fn default_generate_elm() -> bool {
    defaults::GENERATE_ELM
}
fn default_endpoint_prefix() -> String {
    defaults::ENDPOINT_PREFIX.to_string()
}
fn default_include_tables() -> String {
    defaults::INCLUDE_TABLES.to_string()
}
fn default_exclude_tables() -> String {
    defaults::EXCLUDE_TABLES.to_string()
}
fn default_format_output() -> bool {
    defaults::FORMAT_OUTPUT
}
fn default_dry_run() -> bool {
    defaults::DRY_RUN
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            schema_file: PathBuf::new(),
            package_name: default_package_name(),
            output_dir: default_output_dir(),
            generate_elm: default_generate_elm(),
            endpoint_prefix: default_endpoint_prefix(),
            template_dir: None,
            include_tables: default_include_tables(),
            exclude_tables: default_exclude_tables(),
            format_output: default_format_output(),
            dry_run: default_dry_run(),
            log_level: None,
        }
    }
}

impl CodegenConfig {
    /// Create a default config with the given schema file
    pub fn default_with_schema(schema_file: PathBuf) -> Self {
        Self {
            schema_file,
            ..Default::default()
        }
    }

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
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        } else {
            builder = builder.add_source(File::with_name("dbml-codegen").required(false));
        }

        // DBML_CODEGEN__PACKAGE_NAME, DBML_CODEGEN__GENERATE_ELM, ...
        builder = builder.add_source(Environment::with_prefix(defaults::ENV_PREFIX).separator("__"));

        let config: CodegenConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.schema_file.as_os_str().is_empty() {
            return Err(CodegenError::ValidationError(
                "schema_file is required".into(),
            ));
        }

        if self.package_name.trim().is_empty() {
            return Err(CodegenError::ValidationError(
                "package_name is required".into(),
            ));
        }

        if let Some(dir) = &self.template_dir {
            if !dir.is_dir() {
                return Err(CodegenError::ValidationError(format!(
                    "Template directory not found: {}",
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Directory the Go entities and scaffold files are written to
    pub fn package_dir(&self) -> PathBuf {
        self.output_dir.join(&self.package_name)
    }

    /// Directory the Elm data modules are written to
    pub fn elm_data_dir(&self) -> PathBuf {
        self.output_dir.join("elm").join("Data")
    }

    /// Directory the Elm endpoint modules are written to
    pub fn elm_api_dir(&self) -> PathBuf {
        self.output_dir.join("elm").join("Api")
    }
}
