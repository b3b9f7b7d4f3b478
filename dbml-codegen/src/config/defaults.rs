//! Default configuration values - single source of truth

/// Default package name for generated Go entities
pub const PACKAGE_NAME: &str = "data";

/// Default root directory for all generated output
pub const OUTPUT_DIR: &str = ".";

/// Whether to generate Elm data and endpoint modules by default
pub const GENERATE_ELM: bool = false;

/// Default Elm API endpoint prefix, i.e. /prefix/membername
pub const ENDPOINT_PREFIX: &str = "";

/// Default include tables pattern (all tables)
pub const INCLUDE_TABLES: &str = "*";

/// Default exclude tables pattern (none)
pub const EXCLUDE_TABLES: &str = "";

/// Whether to run gofmt/goimports over the generated package by default
pub const FORMAT_OUTPUT: bool = true;

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;

/// Prefix for environment variable overrides (DBML_CODEGEN__PACKAGE_NAME, ...)
pub const ENV_PREFIX: &str = "DBML_CODEGEN";
