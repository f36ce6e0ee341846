//! Matcher-level scenarios: records against declared types, in every
//! deep/strict combination, plus the failure-message wording the library
//! promises.

mod common;

use std::rc::Rc;

use common::{TestModel, TestRecord};
use gql_matchers::{
    be_loosely_valid_graphql_type_for, be_valid_graphql_decorator, be_valid_graphql_type_for,
    satisfy_graphql_type, EnumType, FieldDef, Matcher, MismatchKind, ObjectType, TypeRef,
    TypeSource, Value,
};

fn user_type() -> TypeRef {
    TypeRef::Object(ObjectType::new(
        "DummyUser",
        vec![
            FieldDef::new("id", TypeRef::id().non_null()),
            FieldDef::new("name", TypeRef::string().non_null()),
        ],
    ))
}

fn user_record() -> TestRecord {
    TestRecord::new("User")
        .with("id", Value::str("123"))
        .with("name", Value::str("John"))
        .with("location", Value::Nil)
}

fn location_type() -> TypeRef {
    TypeRef::Object(ObjectType::new(
        "DummyLocation",
        vec![
            FieldDef::new("country", TypeRef::string().non_null()),
            FieldDef::new("city", TypeRef::string().non_null()),
        ],
    ))
}

fn location_record(city: Value) -> Value {
    TestRecord::new("Location")
        .with("country", Value::str("USA"))
        .with("city", city)
        .into_value()
}

fn errors_for(record: Value, ty: TypeRef) -> Vec<String> {
    let mut matcher = be_loosely_valid_graphql_type_for(record);
    matcher.matches(&ty.into());
    matcher.error_messages()
}

// ----------------------------- basic matching ----------------------------- //

#[test]
fn matching_record_has_no_errors() {
    assert_eq!(errors_for(user_record().into_value(), user_type()), Vec::<String>::new());
}

#[test]
fn model_source_resolves_to_its_type() {
    let model = TestModel::new("UserModel", user_type());
    let mut matcher = be_loosely_valid_graphql_type_for(user_record().into_value());
    assert!(matcher.matches(&TypeSource::Model(model)));
}

#[test]
fn nil_in_non_nullable_field() {
    let record = user_record().with("name", Value::Nil).into_value();
    assert_eq!(
        errors_for(record, user_type()),
        vec!["expected non-nullable field \"name\" not to be `nil`"]
    );
}

#[test]
fn missing_accessor_on_record() {
    let record = TestRecord::new("Slim").with("id", Value::Int(1337)).into_value();
    let errors = errors_for(record, user_type());
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0].starts_with("Method `name` for \"name\" field does not exist on record"),
        "unexpected message: {}",
        errors[0]
    );
}

#[test]
fn incompatible_scalar_class() {
    let record = user_record().with("name", Value::Bool(true)).into_value();
    assert_eq!(
        errors_for(record, user_type()),
        vec!["Expected field \"name\" to be one of `[String, Numeric]`, but was `Bool`"]
    );
}

#[test]
fn raising_accessor_is_reported_not_propagated() {
    let record = user_record().raising("name", "boom").into_value();
    assert_eq!(
        errors_for(record, user_type()),
        vec!["Method `name` for \"name\" field raised an error: boom"]
    );
}

#[test]
fn numeric_value_satisfies_string_field() {
    let record = user_record().with("name", Value::Int(42)).into_value();
    assert!(errors_for(record, user_type()).is_empty());
}

#[test]
fn aliased_field_reads_through_its_property() {
    let ty = TypeRef::Object(ObjectType::new(
        "Aliased",
        vec![FieldDef::new("fullName", TypeRef::string().non_null()).via("legal_name")],
    ));
    let record = TestRecord::new("User")
        .with("legal_name", Value::str("John Smith"))
        .into_value();
    assert!(errors_for(record, ty).is_empty());

    let ty = TypeRef::Object(ObjectType::new(
        "Aliased",
        vec![FieldDef::new("fullName", TypeRef::string().non_null()).via("legal_name")],
    ));
    let record = TestRecord::new("User").into_value();
    let errors = errors_for(record, ty);
    assert!(errors[0].starts_with("Method `legal_name` for \"fullName\" field does not exist"));
}

// ------------------------------ enum fields ------------------------------- //

fn role_type() -> TypeRef {
    let role = EnumType::of_strings("DummyUserRoleEnum", ["admin", "regular"]);
    TypeRef::Object(ObjectType::new(
        "DummyUser",
        vec![
            FieldDef::new("id", TypeRef::id().non_null()),
            FieldDef::new("role", TypeRef::Enum(role)),
        ],
    ))
}

#[test]
fn enum_value_in_declared_set() {
    let record = TestRecord::new("User")
        .with("id", Value::str("1"))
        .with("role", Value::str("admin"))
        .into_value();
    assert!(errors_for(record, role_type()).is_empty());
}

#[test]
fn enum_value_outside_declared_set() {
    let record = TestRecord::new("User")
        .with("id", Value::str("1"))
        .with("role", Value::str("invalid"))
        .into_value();
    assert_eq!(
        errors_for(record, role_type()),
        vec![
            "Expected value of the \"role\" enum field to be one of [admin, regular], \
             but was `invalid`"
        ]
    );
}

// ------------------------------ nested types ------------------------------ //

fn user_with_location_type() -> TypeRef {
    TypeRef::Object(ObjectType::new(
        "DummyUser",
        vec![
            FieldDef::new("id", TypeRef::id().non_null()),
            FieldDef::new("name", TypeRef::string().non_null()),
            FieldDef::new("location", location_type()),
        ],
    ))
}

#[test]
fn deep_mode_checks_nested_fields() {
    let good = user_record()
        .with("location", location_record(Value::str("New York")))
        .into_value();
    let mut matcher = be_valid_graphql_type_for(good).deeply();
    assert!(matcher.matches(&user_with_location_type().into()));

    let bad = user_record()
        .with("location", location_record(Value::Bool(true)))
        .into_value();
    let mut matcher = be_valid_graphql_type_for(bad).deeply();
    matcher.matches(&user_with_location_type().into());
    assert_eq!(
        matcher.error_messages(),
        vec!["Expected field \"location.city\" to be one of `[String, Numeric]`, but was `Bool`"]
    );
}

#[test]
fn shallow_mode_suppresses_nested_failures() {
    let bad = user_record()
        .with("location", location_record(Value::Bool(true)))
        .into_value();
    let mut matcher = be_valid_graphql_type_for(bad).shallow();
    assert!(matcher.matches(&user_with_location_type().into()));
}

#[test]
fn list_elements_carry_indexed_paths() {
    let ty = TypeRef::Object(ObjectType::new(
        "DummyUser",
        vec![
            FieldDef::new("id", TypeRef::id().non_null()),
            FieldDef::new("locations", location_type().to_list_type()),
        ],
    ));
    let record = TestRecord::new("User")
        .with("id", Value::str("1"))
        .with(
            "locations",
            Value::List(vec![
                location_record(Value::str("New York")),
                location_record(Value::Bool(false)),
            ]),
        )
        .into_value();
    let mut matcher = be_valid_graphql_type_for(record).deeply();
    matcher.matches(&ty.into());
    assert_eq!(
        matcher.error_messages(),
        vec![
            "Expected field \"locations[1].city\" to be one of `[String, Numeric]`, \
             but was `Bool`"
        ]
    );
}

#[test]
fn self_referential_type_terminates_cleanly() {
    use std::rc::Weak;

    use gql_matchers::{Access, Record};

    struct SelfRef {
        me: Weak<SelfRef>,
    }
    impl Record for SelfRef {
        fn read(&self, property: &str) -> Access {
            match property {
                "id" => Access::Value(Value::str("1")),
                "itself" => match self.me.upgrade() {
                    Some(rc) => Access::Value(Value::Record(rc)),
                    None => Access::Missing,
                },
                _ => Access::Missing,
            }
        }
        fn type_name(&self) -> &str {
            "SelfRef"
        }
    }

    let ty = TypeRef::Object(ObjectType::recursive("DummyUser", |me| {
        vec![
            FieldDef::new("id", TypeRef::id().non_null()),
            FieldDef::new("itself", TypeRef::Object(me.clone()).non_null()),
        ]
    }));
    let record = Value::Record(Rc::new_cyclic(|me| SelfRef { me: me.clone() }));
    let mut matcher = be_valid_graphql_type_for(record).deeply();
    assert!(matcher.matches(&ty.into()), "{:?}", matcher.error_messages());
}

// ----------------------------- model binding ------------------------------ //

#[test]
fn model_constraint_rejects_foreign_instances() {
    let location_model = TestModel::new("LocationModel", location_type());
    let user_model = TestModel::constrained(
        "UserModel",
        user_with_location_type(),
        &[("location", "LocationModel")],
    );

    let good = user_record()
        .with(
            "location",
            TestRecord::new("Location")
                .with("country", Value::str("USA"))
                .with("city", Value::str("New York"))
                .modeled(location_model)
                .into_value(),
        )
        .modeled(user_model.clone())
        .into_value();
    let mut matcher = be_valid_graphql_type_for(good).deeply();
    assert!(matcher.matches(&user_with_location_type().into()));

    let bad = user_record()
        .with("location", location_record(Value::str("New York")))
        .modeled(user_model)
        .into_value();
    let mut matcher = be_valid_graphql_type_for(bad).deeply();
    matcher.matches(&user_with_location_type().into());
    assert_eq!(
        matcher.error_messages(),
        vec![
            "According to graphql configuration, #<Location> should be an instance of \
             LocationModel, but it is Location"
        ]
    );
}

#[test]
fn model_constraint_applies_in_shallow_mode() {
    let user_model = TestModel::constrained(
        "UserModel",
        user_with_location_type(),
        &[("location", "LocationModel")],
    );
    let record = user_record()
        .with("location", location_record(Value::str("New York")))
        .modeled(user_model)
        .into_value();
    let mut matcher = be_valid_graphql_type_for(record).shallow();
    assert!(!matcher.matches(&user_with_location_type().into()));
}

// ----------------------------- strict / loose ----------------------------- //

#[test]
fn strict_mode_rejects_nil_in_nullable_fields() {
    let ty = TypeRef::Object(ObjectType::new(
        "DummyUser",
        vec![FieldDef::new("name", TypeRef::string())],
    ));
    let record = TestRecord::new("User").with("name", Value::Nil).into_value();

    let mut strict = be_valid_graphql_type_for(record).strictly();
    strict.matches(&ty.clone().into());
    assert_eq!(strict.error_messages().len(), 1);
    assert!(strict.error_messages()[0].starts_with("Using `strictly` matcher"));

    let record = TestRecord::new("User").with("name", Value::Nil).into_value();
    let mut loose = be_loosely_valid_graphql_type_for(record);
    assert!(loose.matches(&ty.into()));
}

// --------------------------- TypeMatcher surface -------------------------- //

#[test]
fn type_matcher_defaults_are_deep_and_strict() {
    let bad = user_record()
        .with("location", location_record(Value::Bool(true)))
        .into_value();
    let mut matcher = satisfy_graphql_type(user_with_location_type());
    assert!(!matcher.matches(&bad));

    // Toggles relax it back to a passing shallow + loose run.
    matcher.shallow();
    matcher.loosely();
    assert!(matcher.matches(&bad));
}

#[test]
fn repeated_matches_report_identically() {
    let record = user_record().with("name", Value::Bool(true)).into_value();
    let mut matcher = satisfy_graphql_type(user_type());
    matcher.loosely();
    assert!(!matcher.matches(&record));
    let first = matcher.error_messages();
    assert!(!matcher.matches(&record));
    assert_eq!(matcher.error_messages(), first);
}

#[test]
fn non_type_argument_fails_without_traversal() {
    let mut matcher = satisfy_graphql_type(TypeSource::Other("42".to_string()));
    let record = user_record().into_value();
    assert!(!matcher.matches(&record));
    assert_eq!(matcher.mismatches().len(), 1);
    assert!(matches!(
        matcher.mismatches()[0].kind,
        MismatchKind::NotAGraphqlType { .. }
    ));
    assert_eq!(
        matcher.error_messages(),
        vec!["Expected a GraphQL type, but got 42"]
    );
}

#[test]
fn failure_message_shows_at_most_five_lines() {
    let fields: Vec<FieldDef> = (0..8)
        .map(|i| FieldDef::new(format!("f{i}"), TypeRef::string().non_null()))
        .collect();
    let ty = TypeRef::Object(ObjectType::new("Wide", fields));
    let record = TestRecord::new("Empty").into_value();
    let mut matcher = satisfy_graphql_type(ty);
    assert!(!matcher.matches(&record));
    assert_eq!(matcher.error_messages().len(), 8);

    let message = matcher.failure_message();
    assert!(message.starts_with("Expected #<Empty> to match Wide, but it didn't:\n"));
    let body_lines = message.lines().skip(1).count();
    assert_eq!(body_lines, 5);
    assert!(message.lines().nth(1).unwrap().starts_with("  "));
}

#[test]
fn matcher_descriptions() {
    let matcher = satisfy_graphql_type(user_type());
    assert_eq!(matcher.description(), "matches GraphQL type DummyUser");

    let matcher = be_valid_graphql_type_for(user_record().into_value());
    assert_eq!(matcher.description(), "valid GraphQL type for #<User>");
}

// ------------------------------- decorator -------------------------------- //

#[test]
fn decorator_matcher_derives_type_from_the_instance() {
    let model = TestModel::new("UserModel", user_type());
    let decorated = user_record().modeled(model).into_value();
    let mut matcher = be_valid_graphql_decorator();
    assert!(matcher.matches(&decorated));
}

#[test]
fn decorator_matcher_rejects_unmodeled_records() {
    let plain = user_record().into_value();
    let mut matcher = be_valid_graphql_decorator();
    assert!(!matcher.matches(&plain));
    assert_eq!(
        matcher.error_messages(),
        vec!["Expected a GraphQL type, but got #<User>"]
    );
}

#[test]
fn decorator_matcher_sees_nested_failures_when_deep() {
    let model = TestModel::new("UserModel", user_with_location_type());
    let decorated = user_record()
        .with("location", location_record(Value::Bool(true)))
        .modeled(model)
        .into_value();
    let mut matcher = be_valid_graphql_decorator().deeply();
    assert!(!matcher.matches(&decorated));
}
