//! Entity generator - renders one Go data-access entity per table

use serde::Serialize;
use tracing::debug;

use crate::config::CodegenConfig;
use crate::error::Result;

use super::field::{record_warning, NameType};
use super::naming::{exposed_member, to_entity_file_name};
use super::output::OutputWriter;
use super::primary_key::TableContext;
use super::templates::{TemplateRenderer, GO_ENTITY};
use super::type_resolver::{TypeResolver, TypeWarning};

/// Template context for `go_entity.hbs`
#[derive(Debug, Clone, Serialize)]
pub struct EntityModel {
    pub package_name: String,
    pub entity_name: String,
    pub member_name: String,
    pub table_name: String,
    /// Raw key column name, as used in SQL
    pub pk_name: String,
    pub pk_type: String,
    pub fields: Vec<NameType>,
    /// Every field except the primary key
    pub insert_fields: Vec<NameType>,
}

impl EntityModel {
    pub fn build(
        ctx: &TableContext<'_>,
        package_name: &str,
        warnings: &mut Vec<TypeWarning>,
    ) -> Self {
        let table = ctx.table;
        let pk = &ctx.primary_key;

        let (pk_type, warning) = TypeResolver::go_type_string(&table.name, pk.column());
        record_warning(warnings, warning);

        let mut fields = Vec::with_capacity(table.columns().len());
        let mut insert_fields = Vec::new();

        for col in table.columns() {
            let (type_name, warning) = TypeResolver::go_type_string(&table.name, col);
            record_warning(warnings, warning);

            let field = NameType::go_field(col, type_name);
            if !pk.matches(col) {
                insert_fields.push(field.clone());
            }
            fields.push(field);
        }

        Self {
            package_name: package_name.to_string(),
            entity_name: exposed_member(&table.row_type.name),
            member_name: exposed_member(&table.member),
            table_name: table.name.clone(),
            pk_name: pk.name().to_string(),
            pk_type,
            fields,
            insert_fields,
        }
    }
}

/// Render and write the entity file for one table
pub fn generate_entity(
    ctx: &TableContext<'_>,
    config: &CodegenConfig,
    renderer: &TemplateRenderer,
    output: &mut OutputWriter,
    warnings: &mut Vec<TypeWarning>,
) -> Result<()> {
    let model = EntityModel::build(ctx, &config.package_name, warnings);
    let file_name = format!("{}.go", to_entity_file_name(&ctx.table.member));
    debug!("Generating entity {} -> {}", model.entity_name, file_name);

    let code = renderer.render(GO_ENTITY, &ctx.table.name, &model)?;
    output.write(config.package_dir().join(file_name), &code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Column, RowType, Table};

    fn column(name: &str, clr_type: &str, pk: bool, nullable: bool) -> Column {
        Column {
            name: name.to_string(),
            clr_type: clr_type.to_string(),
            db_type: String::new(),
            is_primary_key: pk,
            is_db_generated: pk,
            can_be_null: nullable,
        }
    }

    fn orders() -> Table {
        Table {
            name: "Orders".to_string(),
            member: "Order".to_string(),
            row_type: RowType {
                name: "Order".to_string(),
                columns: vec![
                    column("OrderID", "System.Int64", true, false),
                    column("CustomerName", "System.String", false, true),
                    column("Total", "System.Decimal", false, false),
                ],
                associations: vec![],
            },
        }
    }

    #[test]
    fn test_entity_model() {
        let table = orders();
        let ctx = TableContext::new(&table);
        let mut warnings = Vec::new();
        let model = EntityModel::build(&ctx, "data", &mut warnings);

        assert!(warnings.is_empty());
        assert_eq!(model.package_name, "data");
        assert_eq!(model.entity_name, "Order");
        assert_eq!(model.member_name, "Order");
        assert_eq!(model.table_name, "Orders");
        assert_eq!(model.pk_name, "OrderID");
        assert_eq!(model.pk_type, "int64");

        let names: Vec<&str> = model.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["OrderID", "CustomerName", "Total"]);
        assert_eq!(model.fields[0].json_name, "orderId");
        assert_eq!(model.fields[1].type_name, "JSONNullString");
        assert_eq!(model.fields[2].type_name, "float64");

        let insert: Vec<&str> = model.insert_fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(insert, ["CustomerName", "Total"]);
    }

    #[test]
    fn test_entity_without_primary_key() {
        let mut table = orders();
        table.row_type.columns[0].is_primary_key = false;
        let ctx = TableContext::new(&table);
        let model = EntityModel::build(&ctx, "data", &mut Vec::new());

        // Key accessors point at a synthesized ID that no field carries
        assert_eq!(model.pk_name, "ID");
        assert_eq!(model.pk_type, "int64");
        assert!(!model.fields.iter().any(|f| f.column == "ID"));
        assert_eq!(model.insert_fields.len(), model.fields.len());
    }

    #[test]
    fn test_unknown_type_degrades_one_field() {
        let mut table = orders();
        table.row_type.columns[2].clr_type = "System.Object".to_string();
        let ctx = TableContext::new(&table);
        let mut warnings = Vec::new();
        let model = EntityModel::build(&ctx, "data", &mut warnings);

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].column, "Total");
        assert_eq!(model.fields[2].type_name, "");
        assert_eq!(model.fields[1].type_name, "JSONNullString");
    }

    #[test]
    fn test_identifier_transforms() {
        let mut table = orders();
        table.member = "order_lines".to_string();
        table.row_type.name = "9Line".to_string();
        table.row_type.columns[1].name = "customer_name".to_string();
        let ctx = TableContext::new(&table);
        let model = EntityModel::build(&ctx, "data", &mut Vec::new());

        assert_eq!(model.entity_name, "DigitStart_9Line");
        assert_eq!(model.member_name, "Orderlines");
        assert_eq!(model.fields[1].name, "Customername");
        assert_eq!(model.fields[1].json_name, "customer_name");
        assert_eq!(model.fields[1].column, "customer_name");
    }

    #[test]
    fn test_generate_entity_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CodegenConfig::default();
        config.output_dir = dir.path().to_path_buf();
        std::fs::create_dir_all(config.package_dir()).unwrap();

        let table = orders();
        let ctx = TableContext::new(&table);
        let renderer = TemplateRenderer::new(None).unwrap();
        let mut output = OutputWriter::new(false);
        generate_entity(&ctx, &config, &renderer, &mut output, &mut Vec::new()).unwrap();

        let code = std::fs::read_to_string(dir.path().join("data").join("order.go")).unwrap();
        assert!(code.contains("package data"));
        assert!(code.contains("type Order struct"));
        assert!(code.contains("CustomerName JSONNullString `json:\"customerName\"`"));
        assert!(code.contains("INSERT INTO Orders (CustomerName, Total)"));
    }

    #[test]
    fn test_key_only_table_has_no_insert_or_update() {
        let mut table = orders();
        table.row_type.columns.truncate(1);
        let ctx = TableContext::new(&table);
        let model = EntityModel::build(&ctx, "data", &mut Vec::new());
        assert!(model.insert_fields.is_empty());

        let renderer = TemplateRenderer::new(None).unwrap();
        let code = renderer.render(GO_ENTITY, "Orders", &model).unwrap();
        assert!(!code.contains("INSERT INTO"));
        assert!(!code.contains("UPDATE Orders"));
        assert!(!code.contains(") Insert("));
        assert!(code.contains("func GetOrder(db *sql.DB, key int64)"));
        assert!(code.contains("DELETE FROM Orders WHERE OrderID = @p1"));
    }
}
