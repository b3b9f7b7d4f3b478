//! Code generation module

mod code_generator;
mod elm_generator;
mod entity_generator;
mod field;
mod naming;
mod output;
mod primary_key;
mod scaffold;
mod templates;
mod type_resolver;

pub use code_generator::*;
pub use elm_generator::*;
pub use entity_generator::*;
pub use field::NameType;
pub use naming::*;
pub use output::OutputWriter;
pub use primary_key::*;
pub use scaffold::*;
pub use templates::*;
pub use type_resolver::*;

use std::path::Path;
use std::process::Command;

use crate::error::{CodegenError, Result};

/// Go tools run over the generated package, in order
pub const FORMATTERS: [&str; 2] = ["gofmt", "goimports"];

/// Run one formatter in place over a directory
pub fn format_dir(tool: &str, dir: &Path) -> Result<()> {
    let status = Command::new(tool)
        .arg("-w")
        .arg(dir)
        .status()
        .map_err(|e| CodegenError::ToolingError {
            tool: tool.to_string(),
            message: e.to_string(),
        })?;

    if !status.success() {
        return Err(CodegenError::ToolingError {
            tool: tool.to_string(),
            message: format!("exited with {}", status),
        });
    }
    Ok(())
}
