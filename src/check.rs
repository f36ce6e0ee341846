//! Recursive value-conformance checker.
//!
//! One pass over (declared type, runtime value): read the field off the
//! record, classify the value, compare against the type's shape, and
//! recurse into lists and nested objects. Failures are data (`Mismatch`),
//! accumulated in traversal order; the only `Err` is a configuration
//! fault (a scalar kind the compatibility table does not know).

use serde::Serialize;

use crate::scalar::{self, ScalarKind};
use crate::schema::{EnumType, ObjectType, TypeRef};
use crate::value::{read_property, Access, Value};

pub use crate::scalar::CheckError;

// ------------------------------ Mismatches -------------------------------- //

/// One structural conformance failure, with enough context to render a
/// human-readable message. Append-only; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mismatch {
    pub field_name: String,
    #[serde(flatten)]
    pub kind: MismatchKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MismatchKind {
    NotNullable,
    NilInStrictMode,
    WrongType {
        expected_type: String,
        actual_type: String,
    },
    MissingField {
        property: String,
        record: String,
    },
    RaisesError {
        property: String,
        error: String,
    },
    WrongEnumValue {
        expected_values: String,
        actual_value: String,
    },
    ModelMismatch {
        value: String,
        expected_type: String,
        actual_type: String,
    },
    NotAGraphqlType {
        given: String,
    },
}

impl Mismatch {
    pub fn new(field_name: impl Into<String>, kind: MismatchKind) -> Self {
        Mismatch {
            field_name: field_name.into(),
            kind,
        }
    }
}

// -------------------------------- Config ---------------------------------- //

/// `deep`: recurse into nested object fields. `strict`: treat `nil` in a
/// nullable field as a mismatch. Independent toggles.
#[derive(Debug, Clone, Copy)]
pub struct CheckConfig {
    pub deep: bool,
    pub strict: bool,
}

// ------------------------------- Visited ---------------------------------- //

/// Record identities seen along one recursion path. Copy-on-branch: each
/// descent extends its own copy, so siblings never observe entries beyond
/// their common ancestors. Already-visited nodes are skipped silently —
/// a cycle is truncation, not a mismatch.
#[derive(Debug, Clone, Default)]
pub struct Visited(Vec<usize>);

impl Visited {
    pub fn new() -> Self {
        Visited(Vec::new())
    }

    fn contains(&self, id: usize) -> bool {
        self.0.contains(&id)
    }

    fn with(&self, id: usize) -> Self {
        let mut next = self.clone();
        next.0.push(id);
        next
    }
}

// ------------------------------- Checking --------------------------------- //

/// Check the value behind `property` on `parent` against `ty`.
///
/// Accessor problems are reported, not raised: a record without the
/// accessor yields `MissingField`, a raising accessor yields
/// `RaisesError`, and neither stops the sibling fields from being
/// checked.
pub fn check_property(
    ty: &TypeRef,
    parent: &Value,
    property: &str,
    field_name: &str,
    cfg: CheckConfig,
    visited: &Visited,
    out: &mut Vec<Mismatch>,
) -> Result<(), CheckError> {
    match read_property(parent, property) {
        Access::Missing => {
            out.push(Mismatch::new(
                field_name,
                MismatchKind::MissingField {
                    property: property.to_string(),
                    record: parent.to_string(),
                },
            ));
            Ok(())
        }
        Access::Raised(error) => {
            out.push(Mismatch::new(
                field_name,
                MismatchKind::RaisesError {
                    property: property.to_string(),
                    error,
                },
            ));
            Ok(())
        }
        Access::Value(value) => {
            check_value(ty, &value, parent, property, field_name, cfg, visited, out)
        }
    }
}

/// Check a value already in hand. List elements re-enter here (there is
/// no accessor to read), which is why a `nil` element under a non-null
/// element type reports `NotNullable` at `field[i]`.
#[allow(clippy::too_many_arguments)]
fn check_value(
    ty: &TypeRef,
    value: &Value,
    parent: &Value,
    property: &str,
    field_name: &str,
    cfg: CheckConfig,
    visited: &Visited,
    out: &mut Vec<Mismatch>,
) -> Result<(), CheckError> {
    if value.is_nil() {
        if ty.is_non_null() {
            out.push(Mismatch::new(field_name, MismatchKind::NotNullable));
        } else if cfg.strict {
            out.push(Mismatch::new(field_name, MismatchKind::NilInStrictMode));
        }
        return Ok(());
    }

    if let Value::List(items) = value {
        // Peel the list wrapping once for every element; the element's own
        // non-null wrapper survives. The parent's model constraint applies
        // to each element of the field.
        let elem_ty = ty.unwrap_list();
        for (i, item) in items.iter().enumerate() {
            let elem_field = format!("{field_name}[{i}]");
            check_value(elem_ty, item, parent, property, &elem_field, cfg, visited, out)?;
        }
        return Ok(());
    }

    match ty.unwrap() {
        TypeRef::Scalar(kind) => check_scalar(kind, value, field_name, out),
        TypeRef::Enum(enum_ty) => {
            check_enum(enum_ty, value, field_name, out);
            Ok(())
        }
        TypeRef::Object(object) => {
            check_object(object, value, parent, property, field_name, cfg, visited, out)
        }
        // unwrap() only ever yields a bare type.
        _ => Ok(()),
    }
}

fn check_scalar(
    kind: &ScalarKind,
    value: &Value,
    field_name: &str,
    out: &mut Vec<Mismatch>,
) -> Result<(), CheckError> {
    let classes = scalar::compatible_classes(kind)?;
    if !classes.iter().any(|class| class.accepts(value)) {
        out.push(Mismatch::new(
            field_name,
            MismatchKind::WrongType {
                expected_type: scalar::describe_expected(classes),
                actual_type: value.kind_name().to_string(),
            },
        ));
    }
    Ok(())
}

fn check_enum(enum_ty: &EnumType, value: &Value, field_name: &str, out: &mut Vec<Mismatch>) {
    let expected = enum_ty.values();
    if expected.iter().any(|candidate| candidate == value) {
        return;
    }
    let listed = expected
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    out.push(Mismatch::new(
        field_name,
        MismatchKind::WrongEnumValue {
            expected_values: format!("[{listed}]"),
            actual_value: value.to_string(),
        },
    ));
}

#[allow(clippy::too_many_arguments)]
fn check_object(
    object: &ObjectType,
    value: &Value,
    parent: &Value,
    property: &str,
    field_name: &str,
    cfg: CheckConfig,
    visited: &Visited,
    out: &mut Vec<Mismatch>,
) -> Result<(), CheckError> {
    // The model-binding check applies even in shallow mode.
    check_model_binding(value, parent, property, field_name, out);

    if !cfg.deep {
        return Ok(());
    }

    let visited = match value.identity() {
        Some(id) if visited.contains(id) => return Ok(()), // cycle: truncate, no signal
        Some(id) => visited.with(id),
        // Plain data cannot close a cycle; keep the path as-is.
        None => visited.clone(),
    };

    for field in object.fields() {
        let nested_field = format!("{field_name}.{}", field.name);
        check_property(
            &field.ty,
            value,
            &field.property,
            &nested_field,
            cfg,
            &visited,
            out,
        )?;
    }
    Ok(())
}

/// Optional capability check: when the parent's model declares which model
/// class this property's value must be an instance of, verify it. A parent
/// without a model, or a property without a constraint, disables the check.
fn check_model_binding(
    value: &Value,
    parent: &Value,
    property: &str,
    field_name: &str,
    out: &mut Vec<Mismatch>,
) {
    let Value::Record(parent_record) = parent else {
        return;
    };
    let Some(parent_model) = parent_record.model() else {
        return;
    };
    let Some(expected) = parent_model.expected_model_for(property) else {
        return;
    };

    let actual_model = match value {
        Value::Record(record) => record.model(),
        _ => None,
    };
    if actual_model.as_ref().is_some_and(|m| m.name() == expected) {
        return;
    }

    out.push(Mismatch::new(
        field_name,
        MismatchKind::ModelMismatch {
            value: value.to_string(),
            expected_type: expected.to_string(),
            actual_type: value.kind_name().to_string(),
        },
    ));
}

// ------------------------------- Tests ------------------------------------ //
