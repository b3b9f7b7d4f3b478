//! Schema-independent support files, emitted once per run

use serde::Serialize;
use tracing::debug;

use crate::config::CodegenConfig;
use crate::error::Result;

use super::output::OutputWriter;
use super::templates::{TemplateRenderer, ELM_API_ENDPOINT, GO_SCANNER, GO_TYPES};
use super::type_resolver::NullWrapper;

/// One JSON null wrapper in types.go
#[derive(Debug, Clone, Serialize)]
pub struct WrapperModel {
    pub type_name: String,
    pub sql_type: String,
    pub value_field: String,
    pub value_type: String,
}

impl From<NullWrapper> for WrapperModel {
    fn from(wrapper: NullWrapper) -> Self {
        Self {
            type_name: wrapper.type_name(),
            sql_type: wrapper.sql_type().to_string(),
            value_field: wrapper.value_field().to_string(),
            value_type: wrapper.value_type().to_string(),
        }
    }
}

/// Template context for `go_types.hbs` and `go_scanner.hbs`
#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldModel {
    pub package_name: String,
    pub wrappers: Vec<WrapperModel>,
}

impl ScaffoldModel {
    pub fn new(package_name: &str) -> Self {
        Self {
            package_name: package_name.to_string(),
            wrappers: NullWrapper::ALL.into_iter().map(WrapperModel::from).collect(),
        }
    }
}

/// Write types.go and scanner.go, plus elm/Api/Endpoint.elm when Elm output is on
pub fn generate_scaffold(
    config: &CodegenConfig,
    renderer: &TemplateRenderer,
    output: &mut OutputWriter,
) -> Result<()> {
    let model = ScaffoldModel::new(&config.package_name);
    let package_dir = config.package_dir();

    debug!("Generating scaffold in {:?}", package_dir);
    let types = renderer.render(GO_TYPES, "types.go", &model)?;
    output.write(package_dir.join("types.go"), &types)?;

    let scanner = renderer.render(GO_SCANNER, "scanner.go", &model)?;
    output.write(package_dir.join("scanner.go"), &scanner)?;

    if config.generate_elm {
        let endpoint = renderer.source_text(ELM_API_ENDPOINT)?;
        output.write(config.elm_api_dir().join("Endpoint.elm"), &endpoint)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold_model_covers_every_wrapper() {
        let model = ScaffoldModel::new("data");
        let names: Vec<&str> = model.wrappers.iter().map(|w| w.type_name.as_str()).collect();
        assert_eq!(
            names,
            [
                "JSONNullBool",
                "JSONNullFloat64",
                "JSONNullInt32",
                "JSONNullInt64",
                "JSONNullString",
                "JSONNullTime"
            ]
        );
    }

    #[test]
    fn test_generate_scaffold() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CodegenConfig::default();
        config.output_dir = dir.path().to_path_buf();
        config.package_name = "models".to_string();
        std::fs::create_dir_all(config.package_dir()).unwrap();

        let renderer = TemplateRenderer::new(None).unwrap();
        let mut output = OutputWriter::new(false);
        generate_scaffold(&config, &renderer, &mut output).unwrap();
        assert_eq!(output.written().len(), 2);

        let types = std::fs::read_to_string(config.package_dir().join("types.go")).unwrap();
        assert!(types.contains("package models"));
        for wrapper in NullWrapper::ALL {
            assert!(types.contains(&format!("type {} struct", wrapper.type_name())));
            assert!(types.contains(&format!("sql.{}", wrapper.sql_type())));
        }
        assert!(types.contains("var x *time.Time"));
        assert!(types.contains("return json.Marshal(nil)"));

        let scanner = std::fs::read_to_string(config.package_dir().join("scanner.go")).unwrap();
        assert!(scanner.contains("Scan(dest ...interface{}) error"));
    }

    #[test]
    fn test_scaffold_with_elm() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CodegenConfig::default();
        config.output_dir = dir.path().to_path_buf();
        config.generate_elm = true;
        std::fs::create_dir_all(config.package_dir()).unwrap();
        std::fs::create_dir_all(config.elm_api_dir()).unwrap();

        let renderer = TemplateRenderer::new(None).unwrap();
        let mut output = OutputWriter::new(false);
        generate_scaffold(&config, &renderer, &mut output).unwrap();

        let endpoint = std::fs::read_to_string(config.elm_api_dir().join("Endpoint.elm")).unwrap();
        assert_eq!(endpoint, ELM_API_ENDPOINT.embedded);
    }
}
