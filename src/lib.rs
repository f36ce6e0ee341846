//! Structural conformance matchers for GraphQL types.
//!
//! Given a declared type (nullable/list/enum/object wrapping plus field
//! types) and an arbitrary runtime record, walk the record field by
//! field, compare value shapes against the declaration, recurse into
//! nested objects and lists with cycle suppression, and accumulate
//! structured, path-qualified mismatches.
//!
//! Matcher surface (assertion-framework style):
//! - `satisfy_graphql_type(ty)` — type known up front, record at match time
//! - `be_valid_graphql_type_for(record)` — record known, type at match time
//! - `be_valid_graphql_decorator()` — type derived from the record's model
//! - `be_successful_graphql_request()` — controller response vs declared
//!   action return type
//!
//! Everything is synchronous and per-call: each `matches` re-derives its
//! mismatch list fresh, and nothing is shared between matcher instances.

pub mod check;
pub mod matcher;
pub mod render;
pub mod response;
pub mod scalar;
pub mod schema;
pub mod value;

pub use check::{CheckConfig, CheckError, Mismatch, MismatchKind};
pub use matcher::{DecoratorMatcher, Matcher, TypeMatcher, ValidTypeMatcher};
pub use response::{
    ActionDescriptor, ControllerResponse, ErrorInfo, SuccessfulResponseMatcher,
};
pub use scalar::{ScalarKind, ValueClass};
pub use schema::{EnumType, FieldDef, GraphqlModel, ObjectType, TypeRef, TypeSource};
pub use value::{Access, Record, Value};

/// `expect(record).to satisfy_graphql_type(ty)`
pub fn satisfy_graphql_type(source: impl Into<TypeSource>) -> TypeMatcher {
    TypeMatcher::new(source)
}

/// `expect(ty).to be_valid_graphql_type_for(record)`
pub fn be_valid_graphql_type_for(record: Value) -> ValidTypeMatcher {
    ValidTypeMatcher::new(record)
}

/// Shallow + loose variant spelled out at the call site.
pub fn be_loosely_valid_graphql_type_for(record: Value) -> ValidTypeMatcher {
    ValidTypeMatcher::new(record).loosely()
}

/// `expect(decorator).to be_valid_graphql_decorator()`
pub fn be_valid_graphql_decorator() -> DecoratorMatcher {
    DecoratorMatcher::new()
}

/// `expect(response).to be_successful_graphql_request()`
pub fn be_successful_graphql_request() -> SuccessfulResponseMatcher {
    SuccessfulResponseMatcher::new()
}
