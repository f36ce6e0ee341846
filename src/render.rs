//! Mismatch-to-message rendering.
//!
//! One fixed template per mismatch kind. The wording (and its warts) is
//! load-bearing: downstream assertions match on these strings.

use crate::check::{Mismatch, MismatchKind};

/// Render one mismatch as a human-readable line.
pub fn render(mismatch: &Mismatch) -> String {
    let field_name = &mismatch.field_name;
    match &mismatch.kind {
        MismatchKind::NotNullable => {
            format!("expected non-nullable field \"{field_name}\" not to be `nil`")
        }
        MismatchKind::RaisesError { property, error } => {
            format!("Method `{property}` for \"{field_name}\" field raised an error: {error}")
        }
        MismatchKind::NilInStrictMode => format!(
            "Using `strictly` matcher which does not allow `nil` values, \
             but field \"{field_name}\" is `nil`.\
             Use `loosely` matcher to allow `nil` values\""
        ),
        MismatchKind::WrongType {
            expected_type,
            actual_type,
        } => format!(
            "Expected field \"{field_name}\" to be {expected_type}, but was `{actual_type}`"
        ),
        MismatchKind::MissingField { property, record } => format!(
            "Method `{property}` for \"{field_name}\" field does not exist on record {record}"
        ),
        MismatchKind::WrongEnumValue {
            expected_values,
            actual_value,
        } => format!(
            "Expected value of the \"{field_name}\" enum field to be one of {expected_values}, \
             but was `{actual_value}`"
        ),
        MismatchKind::NotAGraphqlType { given } => {
            format!("Expected a GraphQL type, but got {given}")
        }
        MismatchKind::ModelMismatch {
            value,
            expected_type,
            actual_type,
        } => format!(
            "According to graphql configuration, {value} should be an instance of \
             {expected_type}, but it is {actual_type}"
        ),
    }
}

/// Indent every line of `text` by `width` spaces.
pub fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ------------------------------- Tests ------------------------------------ //
