//! Main code generator orchestrator

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::CodegenConfig;
use crate::error::Result;
use crate::parser::Table;

use super::elm_generator::{generate_elm_data, generate_elm_endpoint};
use super::entity_generator::generate_entity;
use super::output::OutputWriter;
use super::primary_key::TableContext;
use super::scaffold::generate_scaffold;
use super::templates::TemplateRenderer;
use super::type_resolver::TypeWarning;

/// Outcome of a generation run
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Tables generated, by physical name
    pub tables: Vec<String>,
    /// Files written, or that would be written in dry-run mode
    pub files: Vec<PathBuf>,
    /// Columns whose CLR type had no mapping
    pub warnings: Vec<TypeWarning>,
}

/// Drives the per-table generators and the scaffold for one run
pub struct CodeGenerator<'a> {
    config: &'a CodegenConfig,
    renderer: TemplateRenderer,
    output: OutputWriter,
    tables: Vec<String>,
    warnings: Vec<TypeWarning>,
}

impl<'a> CodeGenerator<'a> {
    /// Create a new code generator with the given configuration
    pub fn new(config: &'a CodegenConfig) -> Result<Self> {
        Ok(Self {
            config,
            renderer: TemplateRenderer::new(config.template_dir.as_deref())?,
            output: OutputWriter::new(config.dry_run),
            tables: Vec::new(),
            warnings: Vec::new(),
        })
    }

    /// Create every output directory the run will write to
    pub fn prepare_dirs(&self) -> Result<()> {
        self.output.ensure_dir(&self.config.package_dir())?;
        if self.config.generate_elm {
            self.output.ensure_dir(&self.config.elm_data_dir())?;
            self.output.ensure_dir(&self.config.elm_api_dir())?;
        }
        Ok(())
    }

    /// Generate all files (entities, Elm modules, scaffold)
    pub fn generate(mut self, tables: &[Table]) -> Result<GenerationReport> {
        self.prepare_dirs()?;
        for table in tables {
            self.generate_table(table)?;
        }
        self.generate_scaffold()?;
        Ok(self.finish())
    }

    /// Generate the entity and, if enabled, the Elm modules for one table
    pub fn generate_table(&mut self, table: &Table) -> Result<()> {
        let ctx = TableContext::new(table);
        debug!(
            "Table {} -> key {}{}",
            table.name,
            ctx.primary_key.name(),
            if ctx.primary_key.is_synthesized() {
                " (synthesized)"
            } else {
                ""
            }
        );

        generate_entity(
            &ctx,
            self.config,
            &self.renderer,
            &mut self.output,
            &mut self.warnings,
        )?;

        if self.config.generate_elm {
            generate_elm_endpoint(&ctx, self.config, &self.renderer, &mut self.output)?;
            generate_elm_data(
                &ctx,
                self.config,
                &self.renderer,
                &mut self.output,
                &mut self.warnings,
            )?;
        }

        self.tables.push(table.name.clone());
        Ok(())
    }

    /// Generate the schema-independent support files
    pub fn generate_scaffold(&mut self) -> Result<()> {
        generate_scaffold(self.config, &self.renderer, &mut self.output)
    }

    /// Finish the run and report what was produced
    pub fn finish(self) -> GenerationReport {
        info!(
            "Generated {} tables, {} files, {} type warnings",
            self.tables.len(),
            self.output.written().len(),
            self.warnings.len()
        );
        GenerationReport {
            tables: self.tables,
            files: self.output.into_written(),
            warnings: self.warnings,
        }
    }
}
