//! Schema type view.
//!
//! `TypeRef` is a read-only description of a declared GraphQL type:
//! non-null and list wrappers around a bare scalar, enum, or object type.
//! Wrappers peel one layer at a time (`of_type`) or all at once (`unwrap`).
//!
//! Object fields bind late through a `OnceCell` so a type can reference
//! itself (`ObjectType::recursive`); the view itself is immutable once
//! the fields are in place.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use once_cell::unsync::OnceCell;

use crate::scalar::ScalarKind;
use crate::value::Value;

// ------------------------------- TypeRef ---------------------------------- //

#[derive(Clone)]
pub enum TypeRef {
    NonNull(Box<TypeRef>),
    List(Box<TypeRef>),
    Scalar(ScalarKind),
    Enum(Rc<EnumType>),
    Object(Rc<ObjectType>),
}

impl TypeRef {
    pub fn int() -> Self {
        TypeRef::Scalar(ScalarKind::Int)
    }

    pub fn id() -> Self {
        TypeRef::Scalar(ScalarKind::Id)
    }

    pub fn string() -> Self {
        TypeRef::Scalar(ScalarKind::String)
    }

    pub fn float() -> Self {
        TypeRef::Scalar(ScalarKind::Float)
    }

    pub fn boolean() -> Self {
        TypeRef::Scalar(ScalarKind::Boolean)
    }

    pub fn datetime() -> Self {
        TypeRef::Scalar(ScalarKind::DateTime)
    }

    pub fn date() -> Self {
        TypeRef::Scalar(ScalarKind::Date)
    }

    pub fn json() -> Self {
        TypeRef::Scalar(ScalarKind::Json)
    }

    /// Wrap in a non-null layer: `T` → `T!`.
    pub fn non_null(self) -> Self {
        TypeRef::NonNull(Box::new(self))
    }

    /// Wrap in a list layer: `T` → `[T]`.
    pub fn to_list_type(self) -> Self {
        TypeRef::List(Box::new(self))
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    /// List-ness looks through a non-null wrapper: `[T]!` is a list.
    pub fn is_list(&self) -> bool {
        match self {
            TypeRef::List(_) => true,
            TypeRef::NonNull(inner) => inner.is_list(),
            _ => false,
        }
    }

    /// Peel exactly one wrapper layer; bare types return themselves.
    pub fn of_type(&self) -> &TypeRef {
        match self {
            TypeRef::NonNull(inner) | TypeRef::List(inner) => inner,
            bare => bare,
        }
    }

    /// The bare type: every non-null and list wrapper removed.
    pub fn unwrap(&self) -> &TypeRef {
        match self {
            TypeRef::NonNull(inner) | TypeRef::List(inner) => inner.unwrap(),
            bare => bare,
        }
    }

    /// Peel wrapper layers while the type is list-shaped. `[T!]!` yields
    /// `T!` — the element's own non-null wrapper survives.
    pub fn unwrap_list(&self) -> &TypeRef {
        let mut ty = self;
        while ty.is_list() {
            ty = ty.of_type();
        }
        ty
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.unwrap(), TypeRef::Scalar(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.unwrap(), TypeRef::Enum(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::Scalar(kind) => write!(f, "{kind}"),
            TypeRef::Enum(e) => write!(f, "{}", e.name),
            TypeRef::Object(o) => write!(f, "{}", o.name),
        }
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

// ------------------------------- Fields ----------------------------------- //

/// One declared field: its exposed name, its type, and the accessor used
/// to pull the value off a record. `property` defaults to the field name
/// and differs only under aliasing.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeRef,
    pub property: String,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        let name = name.into();
        let property = name.clone();
        FieldDef { name, ty, property }
    }

    /// Alias the field to a different accessor on the record.
    pub fn via(mut self, property: impl Into<String>) -> Self {
        self.property = property.into();
        self
    }
}

// ------------------------------ ObjectType -------------------------------- //

pub struct ObjectType {
    name: String,
    // Bound once, after construction, so a field may reference the type
    // that declares it.
    fields: OnceCell<IndexMap<String, FieldDef>>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Rc<Self> {
        Self::recursive(name, |_| fields)
    }

    /// Build a type whose fields may refer back to the type itself.
    pub fn recursive(
        name: impl Into<String>,
        build: impl FnOnce(&Rc<ObjectType>) -> Vec<FieldDef>,
    ) -> Rc<Self> {
        let ty = Rc::new(ObjectType {
            name: name.into(),
            fields: OnceCell::new(),
        });
        let fields = build(&ty)
            .into_iter()
            .map(|field| (field.name.clone(), field))
            .collect();
        let _ = ty.fields.set(fields);
        ty
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.get().into_iter().flat_map(|map| map.values())
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get().and_then(|map| map.get(name))
    }
}

impl fmt::Debug for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectType({})", self.name)
    }
}

// ------------------------------- EnumType --------------------------------- //

#[derive(Debug)]
pub struct EnumType {
    name: String,
    values: Vec<Value>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Rc<Self> {
        Rc::new(EnumType {
            name: name.into(),
            values: values.into_iter().collect(),
        })
    }

    /// Convenience for the common case of string-valued enums.
    pub fn of_strings<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Rc<Self> {
        Self::new(name, values.into_iter().map(|s| Value::Str(s.into())))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

// ----------------------------- Model binding ------------------------------ //

/// Optional capability: a record class that carries its own GraphQL
/// description. Models resolve to a type directly and may constrain which
/// model class a given property's value must be an instance of.
pub trait GraphqlModel {
    fn graphql_type(&self) -> TypeRef;

    fn name(&self) -> &str;

    /// Declared model constraint for `property`, if any. `None` disables
    /// the model check for that field.
    fn expected_model_for(&self, _property: &str) -> Option<&str> {
        None
    }
}

// ------------------------------ TypeSource -------------------------------- //

/// What a matcher accepts as "the type": a type, a model that knows its
/// type, or something that is neither (reported, not crashed on).
#[derive(Clone)]
pub enum TypeSource {
    Type(TypeRef),
    Model(Rc<dyn GraphqlModel>),
    Other(String),
}

impl TypeSource {
    /// Resolve to a usable type view; `Err` carries the description used
    /// in the `NotAGraphqlType` mismatch.
    pub fn resolve(&self) -> Result<TypeRef, String> {
        match self {
            TypeSource::Type(ty) => Ok(ty.clone()),
            TypeSource::Model(model) => Ok(model.graphql_type()),
            TypeSource::Other(given) => Err(given.clone()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TypeSource::Type(ty) => ty.to_string(),
            TypeSource::Model(model) => model.name().to_string(),
            TypeSource::Other(given) => given.clone(),
        }
    }
}

impl From<TypeRef> for TypeSource {
    fn from(ty: TypeRef) -> Self {
        TypeSource::Type(ty)
    }
}

impl From<Rc<dyn GraphqlModel>> for TypeSource {
    fn from(model: Rc<dyn GraphqlModel>) -> Self {
        TypeSource::Model(model)
    }
}

impl fmt::Debug for TypeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

// ------------------------------- Tests ------------------------------------ //
