//! Metadata structures for a parsed DBML schema

use serde::{Deserialize, Serialize};

/// Root of a DBML document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    /// Tables in document order
    pub tables: Vec<Table>,
}

/// A `<Table>` element: physical name plus the exposed member name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Physical table name (e.g. `dbo.Orders`)
    pub name: String,

    /// Member name exposed on the data context (e.g. `Orders`)
    pub member: String,

    /// Row type of the table
    #[serde(rename = "type")]
    pub row_type: RowType,
}

/// A `<Type>` element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowType {
    /// Type name (e.g. `Order`)
    pub name: String,

    /// Columns in document order
    pub columns: Vec<Column>,

    /// Associations; kept in the model but not consumed by any generator
    pub associations: Vec<Association>,
}

/// A `<Column>` element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,

    /// CLR type tag (e.g. `System.Int64`)
    pub clr_type: String,

    /// Database type as written (e.g. `BigInt NOT NULL IDENTITY`)
    pub db_type: String,

    /// `IsPrimaryKey="true"`
    pub is_primary_key: bool,

    /// `IsDbGenerated="true"`
    pub is_db_generated: bool,

    /// `CanBeNull="true"`
    pub can_be_null: bool,
}

/// An `<Association>` element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Association {
    pub name: String,
    pub member: String,
    pub this_key: String,
    pub other_key: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Table {
    /// Columns in document order
    pub fn columns(&self) -> &[Column] {
        &self.row_type.columns
    }
}
