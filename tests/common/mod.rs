//! Shared fixtures: a map-backed record with optional raising accessors
//! and model binding, plus a programmable model class.
#![allow(dead_code)] // each test binary uses its own subset

use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;

use gql_matchers::{Access, GraphqlModel, Record, TypeRef, Value};

// ------------------------------ TestModel --------------------------------- //

pub struct TestModel {
    name: String,
    ty: TypeRef,
    constraints: HashMap<String, String>,
}

impl TestModel {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Rc<Self> {
        Rc::new(TestModel {
            name: name.into(),
            ty,
            constraints: HashMap::new(),
        })
    }

    /// Declare that `property` must hold an instance of model `expected`.
    pub fn constrained(
        name: impl Into<String>,
        ty: TypeRef,
        constraints: &[(&str, &str)],
    ) -> Rc<Self> {
        Rc::new(TestModel {
            name: name.into(),
            ty,
            constraints: constraints
                .iter()
                .map(|(p, m)| (p.to_string(), m.to_string()))
                .collect(),
        })
    }
}

impl GraphqlModel for TestModel {
    fn graphql_type(&self) -> TypeRef {
        self.ty.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn expected_model_for(&self, property: &str) -> Option<&str> {
        self.constraints.get(property).map(String::as_str)
    }
}

// ------------------------------ TestRecord -------------------------------- //

pub struct TestRecord {
    type_name: String,
    fields: IndexMap<String, Value>,
    raising: IndexMap<String, String>,
    model: Option<Rc<dyn GraphqlModel>>,
}

impl TestRecord {
    pub fn new(type_name: impl Into<String>) -> Self {
        TestRecord {
            type_name: type_name.into(),
            fields: IndexMap::new(),
            raising: IndexMap::new(),
            model: None,
        }
    }

    pub fn with(mut self, property: &str, value: Value) -> Self {
        self.fields.insert(property.to_string(), value);
        self
    }

    /// An accessor that exists but raises when invoked.
    pub fn raising(mut self, property: &str, error: &str) -> Self {
        self.raising.insert(property.to_string(), error.to_string());
        self
    }

    pub fn modeled(mut self, model: Rc<dyn GraphqlModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn into_value(self) -> Value {
        Value::record(self)
    }
}

impl Record for TestRecord {
    fn read(&self, property: &str) -> Access {
        if let Some(error) = self.raising.get(property) {
            return Access::Raised(error.clone());
        }
        match self.fields.get(property) {
            Some(value) => Access::Value(value.clone()),
            None => Access::Missing,
        }
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn model(&self) -> Option<Rc<dyn GraphqlModel>> {
        self.model.clone()
    }
}
