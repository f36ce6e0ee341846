//! Type matchers.
//!
//! `TypeMatcher` is the entry point: resolve a type (or a model carrying
//! one), walk every declared field of the bare root type through the
//! checker, and keep the structured mismatch list around for rendering.
//! `ValidTypeMatcher` and `DecoratorMatcher` are thin argument-order /
//! type-derivation variants on top of it.
//!
//! Usage:
//!   expect: satisfy_graphql_type(user_type).matches(&user)
//!   expect: be_valid_graphql_type_for(user).matches(&user_type.into())

use crate::check::{check_property, CheckConfig, Mismatch, MismatchKind, Visited};
use crate::render::{indent, render};
use crate::schema::{TypeRef, TypeSource};
use crate::value::Value;

/// The contract exposed to an assertion framework. `matches` re-derives
/// its result fresh on every call; `failure_message` reflects the most
/// recent call.
pub trait Matcher<Actual: ?Sized> {
    fn matches(&mut self, actual: &Actual) -> bool;
    fn failure_message(&self) -> String;
    fn description(&self) -> String;
}

/// How many rendered messages a failure message shows. Cosmetic only;
/// the full mismatch list stays queryable.
pub(crate) const MESSAGE_LIMIT: usize = 5;

pub(crate) fn first_messages(messages: &[String]) -> String {
    messages
        .iter()
        .take(MESSAGE_LIMIT)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

// ------------------------------ TypeMatcher ------------------------------- //

pub struct TypeMatcher {
    source: TypeSource,
    deep: bool,
    strict: bool,
    mismatches: Vec<Mismatch>,
    record: Option<Value>,
}

impl TypeMatcher {
    /// Deep and strict by default; use the toggles to relax either.
    pub fn new(source: impl Into<TypeSource>) -> Self {
        Self::with_mode(source, true, true)
    }

    pub fn with_mode(source: impl Into<TypeSource>, deep: bool, strict: bool) -> Self {
        TypeMatcher {
            source: source.into(),
            deep,
            strict,
            mismatches: Vec::new(),
            record: None,
        }
    }

    pub fn shallow(&mut self) {
        self.deep = false;
    }

    pub fn deeply(&mut self) {
        self.deep = true;
    }

    pub fn strictly(&mut self) {
        self.strict = true;
    }

    pub fn loosely(&mut self) {
        self.strict = false;
    }

    /// The full mismatch list from the last `matches` call, in traversal
    /// order.
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    /// All mismatches rendered as human-readable lines.
    pub fn error_messages(&self) -> Vec<String> {
        self.mismatches.iter().map(render).collect()
    }

    fn check(&mut self, record: &Value) {
        self.record = Some(record.clone());
        self.mismatches.clear();

        let ty = match self.source.resolve() {
            Ok(ty) => ty,
            Err(given) => {
                // Not type-capable at all: one mismatch, no traversal.
                self.mismatches
                    .push(Mismatch::new("", MismatchKind::NotAGraphqlType { given }));
                return;
            }
        };

        let cfg = CheckConfig {
            deep: self.deep,
            strict: self.strict,
        };
        if let TypeRef::Object(object) = ty.unwrap() {
            for field in object.fields() {
                check_property(
                    &field.ty,
                    record,
                    &field.property,
                    &field.name,
                    cfg,
                    &Visited::new(),
                    &mut self.mismatches,
                )
                // A scalar kind missing from the compatibility table is a
                // configuration fault, not a match failure.
                .unwrap_or_else(|err| panic!("{err}"));
            }
        }
    }
}

impl Matcher<Value> for TypeMatcher {
    /// # Panics
    ///
    /// Panics when the schema uses a scalar kind the compatibility table
    /// does not cover (`CheckError::UnknownScalar`).
    fn matches(&mut self, record: &Value) -> bool {
        self.check(record);
        self.mismatches.is_empty()
    }

    fn failure_message(&self) -> String {
        let record = self
            .record
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let header = format!(
            "Expected {record} to match {}, but it didn't:\n",
            self.source.describe()
        );
        header + &indent(&first_messages(&self.error_messages()), 2)
    }

    fn description(&self) -> String {
        format!("matches GraphQL type {}", self.source.describe())
    }
}

// ---------------------------- ValidTypeMatcher ---------------------------- //

/// Reversed-argument variant: holds the record, takes the type at match
/// time. Shallow and loose unless explicitly escalated.
pub struct ValidTypeMatcher {
    record: Value,
    deep: bool,
    strict: bool,
    inner: Option<TypeMatcher>,
    source_description: String,
}

impl ValidTypeMatcher {
    pub fn new(record: Value) -> Self {
        ValidTypeMatcher {
            record,
            deep: false,
            strict: false,
            inner: None,
            source_description: String::new(),
        }
    }

    pub fn shallow(mut self) -> Self {
        self.deep = false;
        self
    }

    pub fn deeply(mut self) -> Self {
        self.deep = true;
        self
    }

    pub fn strictly(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn loosely(mut self) -> Self {
        self.strict = false;
        self
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.inner
            .as_ref()
            .map(TypeMatcher::error_messages)
            .unwrap_or_default()
    }
}

impl Matcher<TypeSource> for ValidTypeMatcher {
    fn matches(&mut self, source: &TypeSource) -> bool {
        self.source_description = source.describe();
        let mut matcher = TypeMatcher::with_mode(source.clone(), self.deep, self.strict);
        matcher.matches(&self.record);
        let ok = matcher.mismatches().is_empty();
        self.inner = Some(matcher);
        ok
    }

    fn failure_message(&self) -> String {
        let header = format!(
            "Expected {}, to be valid GraphqlType for {}, but it's not:\n",
            self.source_description, self.record
        );
        header + &indent(&first_messages(&self.error_messages()), 2)
    }

    fn description(&self) -> String {
        format!("valid GraphQL type for {}", self.record)
    }
}

// ---------------------------- DecoratorMatcher ---------------------------- //

/// Derives the type purely from the instance's own class: the record must
/// be model-bound, otherwise the match fails as `NotAGraphqlType`.
pub struct DecoratorMatcher {
    deep: bool,
    strict: bool,
    inner: Option<ValidTypeMatcher>,
}

impl DecoratorMatcher {
    pub fn new() -> Self {
        DecoratorMatcher {
            deep: false,
            strict: false,
            inner: None,
        }
    }

    pub fn deeply(mut self) -> Self {
        self.deep = true;
        self
    }

    pub fn strictly(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.inner
            .as_ref()
            .map(ValidTypeMatcher::error_messages)
            .unwrap_or_default()
    }

    fn type_source_of(instance: &Value) -> TypeSource {
        match instance {
            Value::Record(record) => match record.model() {
                Some(model) => TypeSource::Model(model),
                None => TypeSource::Other(record.describe()),
            },
            other => TypeSource::Other(other.to_string()),
        }
    }
}

impl Default for DecoratorMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher<Value> for DecoratorMatcher {
    fn matches(&mut self, instance: &Value) -> bool {
        let source = Self::type_source_of(instance);
        let mut matcher = ValidTypeMatcher::new(instance.clone());
        if self.deep {
            matcher = matcher.deeply();
        }
        if self.strict {
            matcher = matcher.strictly();
        }
        let ok = matcher.matches(&source);
        self.inner = Some(matcher);
        ok
    }

    fn failure_message(&self) -> String {
        self.inner
            .as_ref()
            .map(|m| m.failure_message())
            .unwrap_or_default()
    }

    fn description(&self) -> String {
        "valid GraphQL decorator".to_string()
    }
}
