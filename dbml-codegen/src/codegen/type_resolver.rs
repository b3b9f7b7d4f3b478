//! CLR type tag to Go / Elm type mapping

use std::fmt;

use crate::parser::Column;

/// CLR type tags understood by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Byte,
    Int16,
    Int32,
    Int64,
    Guid,
    String,
    DateTime,
    Single,
    Decimal,
    Double,
    Binary,
    Boolean,
}

impl SchemaType {
    pub const ALL: [SchemaType; 12] = [
        SchemaType::Byte,
        SchemaType::Int16,
        SchemaType::Int32,
        SchemaType::Int64,
        SchemaType::Guid,
        SchemaType::String,
        SchemaType::DateTime,
        SchemaType::Single,
        SchemaType::Decimal,
        SchemaType::Double,
        SchemaType::Binary,
        SchemaType::Boolean,
    ];

    /// Parse a type tag: `System.Int64`, `System.Data.Linq.Binary`, or the short
    /// alias (`int64`, `binary`), case-insensitively
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lower = tag.trim().to_ascii_lowercase();
        let short = lower
            .strip_prefix("system.data.linq.")
            .or_else(|| lower.strip_prefix("system."))
            .unwrap_or(lower.as_str());

        Self::ALL.into_iter().find(|t| t.alias() == short)
    }

    /// Canonical CLR tag
    pub fn tag(&self) -> &'static str {
        match self {
            SchemaType::Byte => "System.Byte",
            SchemaType::Int16 => "System.Int16",
            SchemaType::Int32 => "System.Int32",
            SchemaType::Int64 => "System.Int64",
            SchemaType::Guid => "System.Guid",
            SchemaType::String => "System.String",
            SchemaType::DateTime => "System.DateTime",
            SchemaType::Single => "System.Single",
            SchemaType::Decimal => "System.Decimal",
            SchemaType::Double => "System.Double",
            SchemaType::Binary => "System.Data.Linq.Binary",
            SchemaType::Boolean => "System.Boolean",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            SchemaType::Byte => "byte",
            SchemaType::Int16 => "int16",
            SchemaType::Int32 => "int32",
            SchemaType::Int64 => "int64",
            SchemaType::Guid => "guid",
            SchemaType::String => "string",
            SchemaType::DateTime => "datetime",
            SchemaType::Single => "single",
            SchemaType::Decimal => "decimal",
            SchemaType::Double => "double",
            SchemaType::Binary => "binary",
            SchemaType::Boolean => "boolean",
        }
    }
}

/// JSON-aware wrappers around `database/sql` null types, emitted into types.go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullWrapper {
    Bool,
    Float64,
    Int32,
    Int64,
    String,
    Time,
}

impl NullWrapper {
    pub const ALL: [NullWrapper; 6] = [
        NullWrapper::Bool,
        NullWrapper::Float64,
        NullWrapper::Int32,
        NullWrapper::Int64,
        NullWrapper::String,
        NullWrapper::Time,
    ];

    /// Generated Go type name, e.g. `JSONNullInt64`
    pub fn type_name(&self) -> String {
        format!("JSON{}", self.sql_type())
    }

    /// Embedded `database/sql` type, e.g. `NullInt64`
    pub fn sql_type(&self) -> &'static str {
        match self {
            NullWrapper::Bool => "NullBool",
            NullWrapper::Float64 => "NullFloat64",
            NullWrapper::Int32 => "NullInt32",
            NullWrapper::Int64 => "NullInt64",
            NullWrapper::String => "NullString",
            NullWrapper::Time => "NullTime",
        }
    }

    /// Value field of the `database/sql` type, e.g. `Int64`
    pub fn value_field(&self) -> &'static str {
        &self.sql_type()[4..]
    }

    /// Go type of the value field
    pub fn value_type(&self) -> &'static str {
        match self {
            NullWrapper::Bool => "bool",
            NullWrapper::Float64 => "float64",
            NullWrapper::Int32 => "int32",
            NullWrapper::Int64 => "int64",
            NullWrapper::String => "string",
            NullWrapper::Time => "time.Time",
        }
    }
}

/// Represents a Go type for code generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoType {
    Byte,
    Int,
    Int64,
    String,
    Time,
    Float64,
    Bytes,
    Bool,
    /// Nullable column wrapped in a JSON null type
    Null(NullWrapper),
}

impl GoType {
    /// Get the type string for code generation
    pub fn to_type_string(&self) -> String {
        match self {
            GoType::Byte => "byte".to_string(),
            GoType::Int => "int".to_string(),
            GoType::Int64 => "int64".to_string(),
            GoType::String => "string".to_string(),
            GoType::Time => "time.Time".to_string(),
            GoType::Float64 => "float64".to_string(),
            GoType::Bytes => "[]byte".to_string(),
            GoType::Bool => "bool".to_string(),
            GoType::Null(wrapper) => wrapper.type_name(),
        }
    }

    /// Check if this is a null wrapper type
    pub fn is_wrapped(&self) -> bool {
        matches!(self, GoType::Null(_))
    }
}

/// Represents an Elm type for code generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElmType {
    Int,
    String,
    Posix,
    Float,
    Bits,
    Bool,
}

impl ElmType {
    /// Type as written in a type annotation
    pub fn to_type_string(&self) -> String {
        match self {
            ElmType::Int => "Int".to_string(),
            ElmType::String => "String".to_string(),
            ElmType::Posix => "Time.Posix".to_string(),
            ElmType::Float => "Float".to_string(),
            ElmType::Bits => "Bits".to_string(),
            ElmType::Bool => "Bool".to_string(),
        }
    }

    /// Lower-cased form used to pick a decoder / encoder
    pub fn to_codec_string(&self) -> String {
        self.to_type_string().to_lowercase()
    }

    /// Elm expression that renders the value bound to `var` as a URL path segment
    pub fn to_path_segment(&self, var: &str) -> String {
        match self {
            ElmType::Int => format!("String.fromInt {}", var),
            ElmType::Float => format!("String.fromFloat {}", var),
            ElmType::Posix => format!("String.fromInt (Time.posixToMillis {})", var),
            ElmType::Bool => format!("(if {} then \"true\" else \"false\")", var),
            ElmType::String | ElmType::Bits => var.to_string(),
        }
    }
}

/// A type tag that has no mapping; generation continues with an empty type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeWarning {
    pub table: String,
    pub column: String,
    pub tag: String,
}

impl fmt::Display for TypeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unhandled type: {} ({}.{})",
            self.tag, self.table, self.column
        )
    }
}

/// Resolve CLR type tags to Go and Elm types
pub struct TypeResolver;

impl TypeResolver {
    /// Go type for a tag; nullable columns get a JSON null wrapper
    pub fn resolve_go(tag: &str, nullable: bool) -> Option<GoType> {
        let schema_type = SchemaType::from_tag(tag)?;

        if nullable {
            let wrapper = match schema_type {
                SchemaType::Byte | SchemaType::Int16 | SchemaType::Int32 => NullWrapper::Int32,
                SchemaType::Int64 => NullWrapper::Int64,
                SchemaType::Guid | SchemaType::String => NullWrapper::String,
                SchemaType::DateTime => NullWrapper::Time,
                SchemaType::Single | SchemaType::Decimal | SchemaType::Double => {
                    NullWrapper::Float64
                }
                SchemaType::Boolean => NullWrapper::Bool,
                // nil already means NULL for a byte slice
                SchemaType::Binary => return Some(GoType::Bytes),
            };
            return Some(GoType::Null(wrapper));
        }

        Some(match schema_type {
            SchemaType::Byte => GoType::Byte,
            SchemaType::Int16 | SchemaType::Int32 => GoType::Int,
            SchemaType::Int64 => GoType::Int64,
            SchemaType::Guid | SchemaType::String => GoType::String,
            SchemaType::DateTime => GoType::Time,
            SchemaType::Single | SchemaType::Decimal | SchemaType::Double => GoType::Float64,
            SchemaType::Binary => GoType::Bytes,
            SchemaType::Boolean => GoType::Bool,
        })
    }

    /// Elm type for a tag; nullability is carried separately on the field
    pub fn resolve_elm(tag: &str) -> Option<ElmType> {
        Some(match SchemaType::from_tag(tag)? {
            SchemaType::Byte | SchemaType::Int16 | SchemaType::Int32 | SchemaType::Int64 => {
                ElmType::Int
            }
            SchemaType::Guid | SchemaType::String => ElmType::String,
            SchemaType::DateTime => ElmType::Posix,
            SchemaType::Single | SchemaType::Decimal | SchemaType::Double => ElmType::Float,
            SchemaType::Binary => ElmType::Bits,
            SchemaType::Boolean => ElmType::Bool,
        })
    }

    /// Go type string for a column, or an empty string plus a warning
    pub fn go_type_string(table: &str, column: &Column) -> (String, Option<TypeWarning>) {
        match Self::resolve_go(&column.clr_type, column.can_be_null) {
            Some(ty) => (ty.to_type_string(), None),
            None => (String::new(), Some(Self::warning(table, column))),
        }
    }

    /// Elm type for a column, or `None` plus a warning
    pub fn elm_type(table: &str, column: &Column) -> (Option<ElmType>, Option<TypeWarning>) {
        match Self::resolve_elm(&column.clr_type) {
            Some(ty) => (Some(ty), None),
            None => (None, Some(Self::warning(table, column))),
        }
    }

    fn warning(table: &str, column: &Column) -> TypeWarning {
        TypeWarning {
            table: table.to_string(),
            column: column.name.clone(),
            tag: column.clr_type.clone(),
        }
    }
}
