//! DBML schema parser using roxmltree

use std::collections::BTreeMap;

use roxmltree::{Document, Node};

use super::metadata::*;
use crate::error::{CodegenError, Result};

/// Parse a DBML document into schema metadata
pub fn parse_schema(xml: &str) -> Result<Database> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    if root.tag_name().name() != "Database" {
        return Err(CodegenError::SchemaError(format!(
            "expected <Database> root element, found <{}>",
            root.tag_name().name()
        )));
    }

    let tables = elements(root, "Table")
        .map(|node| extract_table(&doc, node))
        .collect::<Result<Vec<_>>>()?;

    Ok(Database { tables })
}

/// Distinct CLR type tags in the schema, each with the first DbType seen for it
pub fn schema_types(db: &Database) -> BTreeMap<String, String> {
    let mut types = BTreeMap::new();
    for table in &db.tables {
        for col in table.columns() {
            types
                .entry(col.clr_type.clone())
                .or_insert_with(|| col.db_type.clone());
        }
    }
    types
}

fn extract_table(doc: &Document, node: Node) -> Result<Table> {
    let name = required_attr(doc, node, "Name")?;
    let member = required_attr(doc, node, "Member")?;

    let mut types = elements(node, "Type");
    let type_node = types.next().ok_or_else(|| {
        CodegenError::SchemaError(format!(
            "<Table Name=\"{}\"> at {} has no <Type> element",
            name,
            position(doc, node)
        ))
    })?;
    if let Some(extra) = types.next() {
        return Err(CodegenError::SchemaError(format!(
            "<Table Name=\"{}\"> has more than one <Type> element (second at {})",
            name,
            position(doc, extra)
        )));
    }

    Ok(Table {
        name,
        member,
        row_type: extract_type(doc, type_node)?,
    })
}

fn extract_type(doc: &Document, node: Node) -> Result<RowType> {
    let name = required_attr(doc, node, "Name")?;

    let columns = elements(node, "Column")
        .map(|col| extract_column(doc, col))
        .collect::<Result<Vec<_>>>()?;

    let associations = elements(node, "Association")
        .map(extract_association)
        .collect();

    Ok(RowType {
        name,
        columns,
        associations,
    })
}

fn extract_column(doc: &Document, node: Node) -> Result<Column> {
    Ok(Column {
        name: required_attr(doc, node, "Name")?,
        clr_type: required_attr(doc, node, "Type")?,
        db_type: optional_attr(node, "DbType"),
        is_primary_key: flag_attr(node, "IsPrimaryKey"),
        is_db_generated: flag_attr(node, "IsDbGenerated"),
        can_be_null: flag_attr(node, "CanBeNull"),
    })
}

fn extract_association(node: Node) -> Association {
    Association {
        name: optional_attr(node, "Name"),
        member: optional_attr(node, "Member"),
        this_key: optional_attr(node, "ThisKey"),
        other_key: optional_attr(node, "OtherKey"),
        type_name: optional_attr(node, "Type"),
    }
}

/// Child elements with the given local name (namespace is ignored)
fn elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

/// An identifying attribute: absent or empty is a schema error
fn required_attr(doc: &Document, node: Node, attr: &str) -> Result<String> {
    match node.attribute(attr) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(CodegenError::SchemaError(format!(
            "<{}> at {} is missing required attribute {}",
            node.tag_name().name(),
            position(doc, node),
            attr
        ))),
    }
}

fn optional_attr(node: Node, attr: &str) -> String {
    node.attribute(attr).unwrap_or_default().to_string()
}

/// Boolean flags are the literal string "true"; anything else is false
fn flag_attr(node: Node, attr: &str) -> bool {
    node.attribute(attr) == Some("true")
}

fn position(doc: &Document, node: Node) -> String {
    let pos = doc.text_pos_at(node.range().start);
    format!("{}:{}", pos.row, pos.col)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDERS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Database Name="Shop" xmlns="http://schemas.microsoft.com/linqtosql/dbml/2007">
  <Table Name="dbo.Orders" Member="Orders">
    <Type Name="Order">
      <Column Name="OrderID" Type="System.Int64" DbType="BigInt NOT NULL IDENTITY" IsPrimaryKey="true" IsDbGenerated="true" CanBeNull="false" />
      <Column Name="CustomerName" Type="System.String" DbType="NVarChar(100)" CanBeNull="true" />
      <Column Name="Total" Type="System.Decimal" DbType="Money NOT NULL" CanBeNull="false" />
      <Association Name="Customer_Order" Member="Customer" ThisKey="CustomerName" OtherKey="Name" Type="Customer" IsForeignKey="true" />
    </Type>
  </Table>
</Database>"#;

    #[test]
    fn test_parse_simple_table() {
        let db = parse_schema(ORDERS).unwrap();
        assert_eq!(db.tables.len(), 1);

        let table = &db.tables[0];
        assert_eq!(table.name, "dbo.Orders");
        assert_eq!(table.member, "Orders");
        assert_eq!(table.row_type.name, "Order");
        assert_eq!(table.columns().len(), 3);

        let id = &table.columns()[0];
        assert_eq!(id.name, "OrderID");
        assert!(id.is_primary_key);
        assert!(id.is_db_generated);
        assert!(!id.can_be_null);
        assert_eq!(id.db_type, "BigInt NOT NULL IDENTITY");

        let name = &table.columns()[1];
        assert_eq!(name.name, "CustomerName");
        assert!(name.can_be_null);
        assert!(!name.is_primary_key);
    }

    #[test]
    fn test_parse_association() {
        let db = parse_schema(ORDERS).unwrap();
        let assocs = &db.tables[0].row_type.associations;
        assert_eq!(assocs.len(), 1);
        assert_eq!(assocs[0].member, "Customer");
        assert_eq!(assocs[0].this_key, "CustomerName");
        assert_eq!(assocs[0].other_key, "Name");
        assert_eq!(assocs[0].type_name, "Customer");
    }

    #[test]
    fn test_optional_attributes_default() {
        let xml = r#"<Database>
  <Table Name="Notes" Member="Note">
    <Type Name="Note">
      <Column Name="Body" Type="System.String" />
      <Association Member="Owner" />
    </Type>
  </Table>
</Database>"#;
        let db = parse_schema(xml).unwrap();
        let col = &db.tables[0].columns()[0];
        assert_eq!(col.db_type, "");
        assert!(!col.is_primary_key);
        assert!(!col.is_db_generated);
        assert!(!col.can_be_null);

        let assoc = &db.tables[0].row_type.associations[0];
        assert_eq!(assoc.name, "");
        assert_eq!(assoc.member, "Owner");
    }

    #[test]
    fn test_flags_require_literal_true() {
        let xml = r#"<Database>
  <Table Name="T" Member="T">
    <Type Name="T">
      <Column Name="A" Type="System.Int32" IsPrimaryKey="True" CanBeNull="yes" />
    </Type>
  </Table>
</Database>"#;
        let db = parse_schema(xml).unwrap();
        let col = &db.tables[0].columns()[0];
        assert!(!col.is_primary_key);
        assert!(!col.can_be_null);
    }

    #[test]
    fn test_empty_database() {
        let db = parse_schema("<Database Name=\"Empty\" />").unwrap();
        assert!(db.tables.is_empty());
    }

    #[test]
    fn test_missing_table_member() {
        let xml = r#"<Database><Table Name="T"><Type Name="T" /></Table></Database>"#;
        let err = parse_schema(xml).unwrap_err();
        assert!(err.is_schema_error());
        assert!(err.to_string().contains("Member"));
    }

    #[test]
    fn test_missing_column_type() {
        let xml = r#"<Database><Table Name="T" Member="T"><Type Name="T"><Column Name="A" /></Type></Table></Database>"#;
        let err = parse_schema(xml).unwrap_err();
        assert!(err.to_string().contains("Type"));
    }

    #[test]
    fn test_empty_identifier_rejected() {
        let xml = r#"<Database><Table Name="T" Member="T"><Type Name=""></Type></Table></Database>"#;
        assert!(parse_schema(xml).is_err());
    }

    #[test]
    fn test_table_without_type() {
        let xml = r#"<Database><Table Name="T" Member="T" /></Database>"#;
        let err = parse_schema(xml).unwrap_err();
        assert!(err.to_string().contains("no <Type>"));
    }

    #[test]
    fn test_wrong_root() {
        let err = parse_schema("<Schema />").unwrap_err();
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_malformed_xml() {
        let err = parse_schema("<Database><Table></Database>").unwrap_err();
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_schema_types() {
        let xml = r#"<Database>
  <Table Name="A" Member="A">
    <Type Name="A">
      <Column Name="Id" Type="System.Int32" DbType="Int NOT NULL" />
      <Column Name="Name" Type="System.String" DbType="NVarChar(50)" />
    </Type>
  </Table>
  <Table Name="B" Member="B">
    <Type Name="B">
      <Column Name="Id" Type="System.Int32" DbType="Int" />
    </Type>
  </Table>
</Database>"#;
        let db = parse_schema(xml).unwrap();
        let types = schema_types(&db);
        assert_eq!(types.len(), 2);
        assert_eq!(types["System.Int32"], "Int NOT NULL");
        assert_eq!(types["System.String"], "NVarChar(50)");
    }
}
