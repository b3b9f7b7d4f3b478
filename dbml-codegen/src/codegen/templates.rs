//! Template registry for code generation
//!
//! Every template ships embedded in the binary. A template directory may override
//! any of them by dropping a file with the same name next to the others.

use std::path::{Path, PathBuf};

use handlebars::{no_escape, Handlebars};
use serde::Serialize;
use tracing::debug;

use crate::error::{CodegenError, Result};

/// A named template and its built-in text
#[derive(Debug, Clone, Copy)]
pub struct TemplateSource {
    pub file_name: &'static str,
    pub embedded: &'static str,
}

/// Go entity, one per table
pub const GO_ENTITY: TemplateSource = TemplateSource {
    file_name: "go_entity.hbs",
    embedded: include_str!("../../templates/go_entity.hbs"),
};

/// JSON null wrapper types, once per run
pub const GO_TYPES: TemplateSource = TemplateSource {
    file_name: "go_types.hbs",
    embedded: include_str!("../../templates/go_types.hbs"),
};

/// Row scanner interface, once per run
pub const GO_SCANNER: TemplateSource = TemplateSource {
    file_name: "go_scanner.hbs",
    embedded: include_str!("../../templates/go_scanner.hbs"),
};

/// Elm record, decoder and encoder, one per table
pub const ELM_DATA: TemplateSource = TemplateSource {
    file_name: "elm_data.hbs",
    embedded: include_str!("../../templates/elm_data.hbs"),
};

/// Elm endpoint module, one per table
pub const ELM_ENDPOINT: TemplateSource = TemplateSource {
    file_name: "elm_endpoint.hbs",
    embedded: include_str!("../../templates/elm_endpoint.hbs"),
};

/// Static `Api.Endpoint` module, copied verbatim
pub const ELM_API_ENDPOINT: TemplateSource = TemplateSource {
    file_name: "elm_api_endpoint.elm",
    embedded: include_str!("../../templates/elm_api_endpoint.elm"),
};

const RENDERED: [TemplateSource; 5] = [GO_ENTITY, GO_TYPES, GO_SCANNER, ELM_DATA, ELM_ENDPOINT];

/// `{{add @index 1}}`: integer sum, used for 1-based SQL placeholders
fn add_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let mut sum = 0u64;
    for i in 0..2 {
        let value = h
            .param(i)
            .and_then(|p| p.value().as_u64())
            .ok_or_else(|| {
                handlebars::RenderError::new("add helper requires two integer parameters")
            })?;
        sum += value;
    }
    out.write(&sum.to_string())?;
    Ok(())
}

/// `{{lower name}}`: lower-cased string
fn lower_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let input = h
        .param(0)
        .and_then(|p| p.value().as_str())
        .ok_or_else(|| {
            handlebars::RenderError::new("lower helper requires a string parameter")
        })?;
    out.write(&input.to_lowercase())?;
    Ok(())
}

/// Handlebars registry holding every generator template
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
    template_dir: Option<PathBuf>,
}

impl TemplateRenderer {
    /// Register all templates, preferring files found in `template_dir`
    pub fn new(template_dir: Option<&Path>) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(no_escape);
        handlebars.register_helper("add", Box::new(add_helper));
        handlebars.register_helper("lower", Box::new(lower_helper));

        let renderer = Self {
            handlebars,
            template_dir: template_dir.map(Path::to_path_buf),
        };
        renderer.register_all()
    }

    fn register_all(mut self) -> Result<Self> {
        for source in RENDERED {
            let text = self.source_text(source)?;
            self.handlebars
                .register_template_string(source.file_name, text)
                .map_err(|e| CodegenError::TemplateError {
                    name: source.file_name.to_string(),
                    message: e.to_string(),
                })?;
        }
        Ok(self)
    }

    /// Template text: the override file if present, the embedded copy otherwise
    pub fn source_text(&self, source: TemplateSource) -> Result<String> {
        if let Some(dir) = &self.template_dir {
            let path = dir.join(source.file_name);
            if path.is_file() {
                debug!("Using template override {:?}", path);
                return std::fs::read_to_string(&path).map_err(|e| CodegenError::TemplateError {
                    name: source.file_name.to_string(),
                    message: format!("cannot read {}: {}", path.display(), e),
                });
            }
        }
        Ok(source.embedded.to_string())
    }

    /// Render one template; `subject` names the table (or scaffold) for error reports
    pub fn render<T: Serialize>(
        &self,
        source: TemplateSource,
        subject: &str,
        data: &T,
    ) -> Result<String> {
        self.handlebars
            .render(source.file_name, data)
            .map_err(|e| CodegenError::RenderError {
                template: source.file_name.to_string(),
                table: subject.to_string(),
                message: e.to_string(),
            })
    }
}
