//! Primary key resolution, done once per table and shared by every generator

use std::borrow::Cow;

use crate::parser::{Column, Table};

/// Name of the key column synthesized for tables without a primary key
pub const DEFAULT_PK_NAME: &str = "ID";

/// CLR type of the synthesized key column
pub const DEFAULT_PK_TYPE: &str = "System.Int64";

/// The key column of a table, either declared in the schema or synthesized
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryKey<'a> {
    column: Cow<'a, Column>,
    synthesized: bool,
}

impl<'a> PrimaryKey<'a> {
    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn name(&self) -> &str {
        &self.column.name
    }

    /// True when the table declares no key and `ID` was made up.
    /// The synthesized column is not part of the table's column list.
    pub fn is_synthesized(&self) -> bool {
        self.synthesized
    }

    /// Check whether a table column is the key column
    pub fn matches(&self, column: &Column) -> bool {
        column.name == self.column.name
    }
}

/// First column flagged `IsPrimaryKey`, or a non-null `System.Int64` column named `ID`
pub fn resolve_primary_key(columns: &[Column]) -> PrimaryKey<'_> {
    match columns.iter().find(|c| c.is_primary_key) {
        Some(col) => PrimaryKey {
            column: Cow::Borrowed(col),
            synthesized: false,
        },
        None => PrimaryKey {
            column: Cow::Owned(Column {
                name: DEFAULT_PK_NAME.to_string(),
                clr_type: DEFAULT_PK_TYPE.to_string(),
                db_type: String::new(),
                is_primary_key: true,
                is_db_generated: false,
                can_be_null: false,
            }),
            synthesized: true,
        },
    }
}

/// A table paired with its resolved primary key
#[derive(Debug, Clone)]
pub struct TableContext<'a> {
    pub table: &'a Table,
    pub primary_key: PrimaryKey<'a>,
}

impl<'a> TableContext<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            primary_key: resolve_primary_key(table.columns()),
        }
    }
}
