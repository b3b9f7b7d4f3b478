//! Field records shared by every per-table template

use serde::Serialize;
use tracing::warn;

use super::naming::{camel_case, exposed_member, sanitize};
use super::type_resolver::TypeWarning;
use crate::parser::Column;

/// One column as seen by a template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameType {
    /// Identifier in the target language
    pub name: String,

    /// Resolved target type; empty when the CLR tag is unknown
    #[serde(rename = "type")]
    pub type_name: String,

    /// Wire (JSON) name
    pub json_name: String,

    /// Raw schema column name, for SQL text
    pub column: String,

    pub nullable: bool,
}

impl NameType {
    /// Go struct field: exported name, camel-case JSON tag
    pub fn go_field(column: &Column, type_name: String) -> Self {
        let ident = sanitize(&column.name);
        Self {
            name: exposed_member(&ident),
            type_name,
            json_name: camel_case(&ident),
            column: column.name.clone(),
            nullable: column.can_be_null,
        }
    }

    /// Elm record field: camel-case name used both in Elm and on the wire
    pub fn elm_field(column: &Column, type_name: String) -> Self {
        let name = camel_case(&sanitize(&column.name));
        Self {
            json_name: name.clone(),
            name,
            type_name,
            column: column.name.clone(),
            nullable: column.can_be_null,
        }
    }
}

/// Log and keep a type warning; the same column is reported once per run
pub(crate) fn record_warning(warnings: &mut Vec<TypeWarning>, warning: Option<TypeWarning>) {
    if let Some(warning) = warning {
        if !warnings.contains(&warning) {
            warn!("{}", warning);
            warnings.push(warning);
        }
    }
}
