//! Runtime value model.
//!
//! Everything the checker looks at is a `Value`: either a plain datum
//! (scalar, list, map) or a `Record` — an opaque object that answers
//! property reads. Records are held behind `Rc` so one instance can show
//! up at several places in a value graph, including cyclically; cycle
//! detection keys on the `Rc` pointer, never on structural equality.

use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;

use crate::schema::GraphqlModel;

// ------------------------------- Record ---------------------------------- //

/// Outcome of reading one property off a record.
///
/// Missing accessor and raising accessor are distinct outcomes and are
/// reported as distinct mismatches; neither propagates as a panic.
#[derive(Debug, Clone)]
pub enum Access {
    /// The record has no such property.
    Missing,
    /// The accessor exists but raised; the payload is its error text.
    Raised(String),
    /// The accessor produced a value.
    Value(Value),
}

/// A runtime object the checker can pull field values off.
pub trait Record {
    /// Read the value behind `property`.
    fn read(&self, property: &str) -> Access;

    /// Runtime type name, used as the "actual" side of diagnostics.
    fn type_name(&self) -> &str;

    /// Inspect-style description for messages.
    fn describe(&self) -> String {
        format!("#<{}>", self.type_name())
    }

    /// The GraphQL model this record is an instance of, when its class is
    /// schema-describable. Absence is a valid state, not an error.
    fn model(&self) -> Option<Rc<dyn GraphqlModel>> {
        None
    }
}

// -------------------------------- Value ----------------------------------- //

#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    List(Vec<Value>),
    /// Dictionary-like. Iterable, but never list-shaped.
    Map(IndexMap<String, Value>),
    Record(Rc<dyn Record>),
}

impl Value {
    pub fn record(record: impl Record + 'static) -> Self {
        Value::Record(Rc::new(record))
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Only real lists count; maps and records are never list-shaped even
    /// though both are iterable in some host representations.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Host-level class name for the "actual type" side of messages.
    pub fn kind_name(&self) -> &str {
        match self {
            Value::Nil => "Nil",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Str(_) => "String",
            Value::DateTime(_) => "DateTime",
            Value::Date(_) => "Date",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Record(r) => r.type_name(),
        }
    }

    /// Identity for cycle suppression. Only records carry one; plain data
    /// cannot close a cycle.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Record(r) => Some(Rc::as_ptr(r) as *const () as usize),
            _ => None,
        }
    }
}

/// Adapt any value to the record protocol: non-records answer `Missing`
/// for every property, the same way a bare datum has no accessors.
pub fn read_property(parent: &Value, property: &str) -> Access {
    match parent {
        Value::Record(r) => r.read(property),
        _ => Access::Missing,
    }
}

// Numeric cross-kind equality on purpose: enum value sets may declare `1`
// while the record hands back `1.0`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                *a as f64 == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::DateTime(t) => write!(f, "{t}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Record(r) => write!(f, "{}", r.describe()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
