//! Scalar compatibility table.
//!
//! Maps each declared scalar kind to the set of native value classes it
//! accepts. The table is deliberately asymmetric: a String field accepts
//! numeric values (ID-ish fields often travel as numbers), but an Int
//! field does not accept strings. Do not "fix" this.

use std::fmt;

use thiserror::Error;

use crate::value::Value;

// ------------------------------ ScalarKind -------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarKind {
    Int,
    Id,
    String,
    Float,
    Boolean,
    DateTime,
    Date,
    Json,
    /// A scalar the table knows nothing about. Hitting one during a check
    /// is a configuration fault, not a match failure.
    Custom(std::string::String),
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Int => write!(f, "Int"),
            ScalarKind::Id => write!(f, "ID"),
            ScalarKind::String => write!(f, "String"),
            ScalarKind::Float => write!(f, "Float"),
            ScalarKind::Boolean => write!(f, "Boolean"),
            ScalarKind::DateTime => write!(f, "ISO8601DateTime"),
            ScalarKind::Date => write!(f, "ISO8601Date"),
            ScalarKind::Json => write!(f, "JSON"),
            ScalarKind::Custom(name) => write!(f, "{name}"),
        }
    }
}

// ------------------------------ ValueClass -------------------------------- //

/// Native value classes a scalar kind can accept. `Numeric` covers both
/// integer and float values, mirroring a numeric-tower superclass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueClass {
    Integer,
    Float,
    Numeric,
    String,
    Bool,
    DateTime,
    Date,
    List,
    Map,
    Nil,
}

impl ValueClass {
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ValueClass::Integer => matches!(value, Value::Int(_)),
            ValueClass::Float => matches!(value, Value::Float(_)),
            ValueClass::Numeric => matches!(value, Value::Int(_) | Value::Float(_)),
            ValueClass::String => matches!(value, Value::Str(_)),
            ValueClass::Bool => matches!(value, Value::Bool(_)),
            ValueClass::DateTime => matches!(value, Value::DateTime(_)),
            ValueClass::Date => matches!(value, Value::Date(_)),
            ValueClass::List => matches!(value, Value::List(_)),
            ValueClass::Map => matches!(value, Value::Map(_)),
            ValueClass::Nil => matches!(value, Value::Nil),
        }
    }
}

impl fmt::Display for ValueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueClass::Integer => "Integer",
            ValueClass::Float => "Float",
            ValueClass::Numeric => "Numeric",
            ValueClass::String => "String",
            ValueClass::Bool => "Bool",
            ValueClass::DateTime => "DateTime",
            ValueClass::Date => "Date",
            ValueClass::List => "List",
            ValueClass::Map => "Map",
            ValueClass::Nil => "Nil",
        };
        write!(f, "{name}")
    }
}

// -------------------------------- Table ----------------------------------- //

/// Fault that aborts a check call. Distinct from mismatches: it means the
/// schema uses something this table does not cover.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckError {
    #[error("Unknown scalar type {name}")]
    UnknownScalar { name: String },
}

/// The acceptable native classes for a scalar kind.
pub fn compatible_classes(kind: &ScalarKind) -> Result<&'static [ValueClass], CheckError> {
    use ValueClass::*;
    match kind {
        ScalarKind::Int => Ok(&[Integer]),
        ScalarKind::Id => Ok(&[Integer, String]),
        ScalarKind::String => Ok(&[String, Numeric]),
        ScalarKind::Float => Ok(&[Float, Integer, Numeric]),
        ScalarKind::Boolean => Ok(&[Bool]),
        ScalarKind::DateTime => Ok(&[DateTime]),
        ScalarKind::Date => Ok(&[Date, DateTime]),
        ScalarKind::Json => Ok(&[Map, List, String, Integer, Float, Bool, Nil]),
        ScalarKind::Custom(name) => Err(CheckError::UnknownScalar { name: name.clone() }),
    }
}

/// Expected-type wording for wrong-type mismatches: singular when one
/// class is acceptable, "one of [...]" otherwise.
pub fn describe_expected(classes: &[ValueClass]) -> String {
    if classes.len() > 1 {
        let list = classes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("one of `[{list}]`")
    } else {
        let only = classes.first().map(ToString::to_string).unwrap_or_default();
        format!("`{only}`")
    }
}

// ------------------------------- Tests ------------------------------------ //
