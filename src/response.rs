//! Controller-response matcher.
//!
//! Validates a controller action's response against the action's declared
//! return type: success, nullability, list shape, model class, then field
//! conformance (shallow + loose). Stages short-circuit: each one runs
//! only if every prior stage passed, and the first failure becomes the
//! failure message.

use std::rc::Rc;

use crate::matcher::{first_messages, Matcher, TypeMatcher};
use crate::render::indent;
use crate::schema::{GraphqlModel, TypeRef, TypeSource};
use crate::value::Value;

// ------------------------------ Contracts --------------------------------- //

/// What the matcher needs to know about the action that produced the
/// response.
pub trait ActionDescriptor {
    fn return_type(&self) -> TypeRef;

    /// Declared return model, when the action is model-bound.
    fn return_model(&self) -> Option<Rc<dyn GraphqlModel>> {
        None
    }
}

/// An error attached to a response. The message is optional; errors
/// without one are skipped when listing.
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    pub message: Option<String>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorInfo {
            message: Some(message.into()),
        }
    }
}

pub trait ControllerResponse {
    fn success(&self) -> bool;
    fn result(&self) -> Value;
    fn errors(&self) -> Vec<ErrorInfo>;
    fn action(&self) -> &dyn ActionDescriptor;
}

// ------------------------------- Matcher ---------------------------------- //

const DEFAULT_ERROR_MESSAGE: &str = "expected request to be successful";

pub struct SuccessfulResponseMatcher {
    error_message: Option<String>,
}

impl SuccessfulResponseMatcher {
    pub fn new() -> Self {
        SuccessfulResponseMatcher {
            error_message: None,
        }
    }

    fn fail(&mut self, message: impl Into<String>) -> bool {
        self.error_message = Some(message.into());
        false
    }

    fn validate(&mut self, response: &dyn ControllerResponse) -> bool {
        self.error_message = None;

        self.validate_status(response)
            && self.validate_null_matching(response)
            && self.validate_list_matching(response)
            && self.validate_model_matching(response)
            && self.validate_attributes_matching(response)
    }

    fn validate_status(&mut self, response: &dyn ControllerResponse) -> bool {
        if response.success() {
            return true;
        }
        let messages: Vec<String> = response
            .errors()
            .into_iter()
            .filter_map(|error| error.message)
            .collect();
        self.fail(format!(
            "{DEFAULT_ERROR_MESSAGE}, but got errors:\n{}",
            indent(&first_messages(&messages), 2)
        ))
    }

    fn validate_null_matching(&mut self, response: &dyn ControllerResponse) -> bool {
        if response.action().return_type().is_non_null() && response.result().is_nil() {
            return self.fail("Response type is not nullable, but the result is nil");
        }
        true
    }

    fn validate_list_matching(&mut self, response: &dyn ControllerResponse) -> bool {
        let declared_list = response.action().return_type().is_list();
        // Maps are iterable but never list-shaped.
        let actual_list = response.result().is_list();
        if declared_list && !actual_list {
            return self.fail("Response type is a list, but the result is not a list-like object");
        }
        if !declared_list && actual_list {
            return self.fail("Response type is not a list, but the result is a list-like object");
        }
        true
    }

    /// The single instance field checks run against: the first element of
    /// a list result, or the result itself.
    fn unwrapped_result(response: &dyn ControllerResponse) -> Value {
        match response.result() {
            Value::List(items) => items.into_iter().next().unwrap_or(Value::Nil),
            other => other,
        }
    }

    fn validate_model_matching(&mut self, response: &dyn ControllerResponse) -> bool {
        let unwrapped = Self::unwrapped_result(response);
        if response.result().is_nil() || unwrapped.is_nil() {
            return true;
        }
        let Some(expected_model) = response.action().return_model() else {
            return true;
        };

        let actual_model_name = match &unwrapped {
            Value::Record(record) => record.model().map(|m| m.name().to_string()),
            _ => None,
        };
        if actual_model_name.as_deref() == Some(expected_model.name()) {
            return true;
        }

        self.fail(format!(
            "Expected response to be an instance of {}, but it's {}",
            expected_model.name(),
            unwrapped.kind_name()
        ))
    }

    fn validate_attributes_matching(&mut self, response: &dyn ControllerResponse) -> bool {
        let bare = response.action().return_type().unwrap().clone();
        let mut matcher = TypeMatcher::with_mode(TypeSource::Type(bare), false, false);
        matcher.matches(&Self::unwrapped_result(response));
        if matcher.mismatches().is_empty() {
            return true;
        }

        self.fail(format!(
            "Response type does not match the expected type:\n{}",
            indent(&first_messages(&matcher.error_messages()), 2)
        ))
    }
}

impl Default for SuccessfulResponseMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ControllerResponse> Matcher<R> for SuccessfulResponseMatcher {
    fn matches(&mut self, response: &R) -> bool {
        self.validate(response)
    }

    fn failure_message(&self) -> String {
        self.error_message
            .clone()
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
    }

    fn description(&self) -> String {
        "successful GraphQL controller response".to_string()
    }
}
