//! Elm generator - renders a data module and an endpoint module per table

use serde::Serialize;
use tracing::debug;

use crate::config::CodegenConfig;
use crate::error::Result;

use super::field::{record_warning, NameType};
use super::naming::{camel_case, exposed_member, sanitize, to_endpoint_name};
use super::output::OutputWriter;
use super::primary_key::TableContext;
use super::templates::{TemplateRenderer, ELM_DATA, ELM_ENDPOINT};
use super::type_resolver::{ElmType, TypeResolver, TypeWarning};

/// Template context for `elm_data.hbs`
#[derive(Debug, Clone, Serialize)]
pub struct DataModel {
    pub module_name: String,
    pub api_module_name: String,
    pub pk_name: String,
    pub pk_type: String,
    pub pk_encode_type: String,
    /// Every column in decode order, Elm type as written
    pub record_fields: Vec<NameType>,
    /// Record fields for a new row (no key), Elm type as written
    pub fields: Vec<NameType>,
    /// Every column, lower-cased codec type
    pub decode_fields: Vec<NameType>,
    /// Columns sent when creating a row (no key), lower-cased codec type
    pub encode_fields: Vec<NameType>,
}

impl DataModel {
    pub fn build(ctx: &TableContext<'_>, warnings: &mut Vec<TypeWarning>) -> Self {
        let table = ctx.table;
        let pk = &ctx.primary_key;

        let (pk_elm, warning) = TypeResolver::elm_type(&table.name, pk.column());
        record_warning(warnings, warning);

        let mut record_fields = Vec::with_capacity(table.columns().len());
        let mut fields = Vec::new();
        let mut decode_fields = Vec::with_capacity(table.columns().len());
        let mut encode_fields = Vec::new();

        for col in table.columns() {
            let (elm, warning) = TypeResolver::elm_type(&table.name, col);
            record_warning(warnings, warning);

            record_fields.push(NameType::elm_field(col, type_string(elm)));
            decode_fields.push(NameType::elm_field(col, codec_string(elm)));

            if !pk.matches(col) {
                fields.push(NameType::elm_field(col, type_string(elm)));
                encode_fields.push(NameType::elm_field(col, codec_string(elm)));
            }
        }

        Self {
            module_name: exposed_member(&table.row_type.name),
            api_module_name: exposed_member(&table.member),
            pk_name: camel_case(&sanitize(pk.name())),
            pk_type: type_string(pk_elm),
            pk_encode_type: codec_string(pk_elm),
            record_fields,
            fields,
            decode_fields,
            encode_fields,
        }
    }
}

/// Template context for `elm_endpoint.hbs`
#[derive(Debug, Clone, Serialize)]
pub struct EndpointModel {
    pub module_name: String,
    pub prefix: String,
    pub endpoint: String,
    /// Elm type of the `item` key argument
    pub key_type: String,
    /// Elm expression turning `key` into a path segment
    pub key_segment: String,
    pub imports_time: bool,
}

impl EndpointModel {
    pub fn build(ctx: &TableContext<'_>, prefix: &str) -> Self {
        // An unknown key type is reported by the data module; the endpoint falls back to text
        let (pk_elm, _) = TypeResolver::elm_type(&ctx.table.name, ctx.primary_key.column());
        let key_type = match pk_elm {
            Some(ElmType::Bits) | None => "String".to_string(),
            Some(ty) => ty.to_type_string(),
        };

        Self {
            module_name: exposed_member(&ctx.table.member),
            prefix: prefix.to_string(),
            endpoint: to_endpoint_name(&ctx.table.member),
            key_type,
            key_segment: pk_elm
                .map(|ty| ty.to_path_segment("key"))
                .unwrap_or_else(|| "key".to_string()),
            imports_time: pk_elm == Some(ElmType::Posix),
        }
    }
}

fn type_string(ty: Option<ElmType>) -> String {
    ty.map(|t| t.to_type_string()).unwrap_or_default()
}

fn codec_string(ty: Option<ElmType>) -> String {
    ty.map(|t| t.to_codec_string()).unwrap_or_default()
}

/// Render and write `elm/Data/<Type>.elm` for one table
pub fn generate_elm_data(
    ctx: &TableContext<'_>,
    config: &CodegenConfig,
    renderer: &TemplateRenderer,
    output: &mut OutputWriter,
    warnings: &mut Vec<TypeWarning>,
) -> Result<()> {
    let model = DataModel::build(ctx, warnings);
    let file_name = format!("{}.elm", model.module_name);
    debug!("Generating Elm data module -> {}", file_name);

    let code = renderer.render(ELM_DATA, &ctx.table.name, &model)?;
    output.write(config.elm_data_dir().join(file_name), &code)
}

/// Render and write `elm/Api/<Member>.elm` for one table
pub fn generate_elm_endpoint(
    ctx: &TableContext<'_>,
    config: &CodegenConfig,
    renderer: &TemplateRenderer,
    output: &mut OutputWriter,
) -> Result<()> {
    let model = EndpointModel::build(ctx, &config.endpoint_prefix);
    let file_name = format!("{}.elm", model.module_name);
    debug!("Generating Elm endpoint module -> {}", file_name);

    let code = renderer.render(ELM_ENDPOINT, &ctx.table.name, &model)?;
    output.write(config.elm_api_dir().join(file_name), &code)
}
