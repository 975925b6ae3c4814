pub mod graphql_error;

use std::fmt;

use graphql_parser::Pos;
use tracing::debug;

use self::graphql_error::{GraphQLError, GraphQLErrorLocation};
use crate::context::ExecutionContext;

/// Semantic category a name belongs to. Adapters translate the
/// caller-visible categories and leave schema-internal ones alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRole {
    Field,
    Type,
    Argument,
    Variable,
    Directive,
}

impl fmt::Display for NameRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NameRole::Field => "Field",
            NameRole::Type => "Type",
            NameRole::Argument => "Argument",
            NameRole::Variable => "Variable",
            NameRole::Directive => "Directive",
        };
        f.write_str(label)
    }
}

/// Message payload of a pending error: literal text, or a template evaluated
/// against the adapter-translated name.
pub enum ErrorValue {
    Literal(String),
    Template(Box<dyn Fn(&str) -> String + Send + Sync>),
}

impl ErrorValue {
    pub fn literal(message: impl Into<String>) -> Self {
        ErrorValue::Literal(message.into())
    }

    pub fn template(template: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        ErrorValue::Template(Box::new(template))
    }
}

impl fmt::Debug for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorValue::Literal(message) => f.debug_tuple("Literal").field(message).finish(),
            ErrorValue::Template(_) => f.write_str("Template(..)"),
        }
    }
}

/// An error before formatting: the offending name, the role it plays, and
/// the message payload. The adapter turns this into a `GraphQLError`.
#[derive(Debug)]
pub struct ErrorInfo {
    pub name: String,
    pub role: NameRole,
    pub value: ErrorValue,
}

impl ErrorInfo {
    /// Renders the final message once `name` has been adapted.
    pub fn message_for(&self, adapted_name: &str) -> String {
        match &self.value {
            ErrorValue::Literal(message) => {
                format!("{} `{}': {}", self.role, adapted_name, message)
            }
            ErrorValue::Template(template) => template(adapted_name),
        }
    }
}

/// Builds an error record about type or schema shape, where no name
/// translation applies.
pub fn format_error(message: impl Into<String>, at: &Pos) -> GraphQLError {
    GraphQLError {
        message: message.into(),
        locations: vec![GraphQLErrorLocation::at(at)],
    }
}

impl ExecutionContext {
    /// Records an error against a named construct. This is the only path by
    /// which errors enter the log; existing entries are never removed or
    /// reordered.
    pub fn put_error(
        mut self,
        role: NameRole,
        name: impl Into<String>,
        value: ErrorValue,
        at: &Pos,
    ) -> Self {
        let info = ErrorInfo {
            name: name.into(),
            role,
            value,
        };
        let locations = vec![GraphQLErrorLocation::at(at)];
        let error = self.adapter.format_error(&info, &locations);
        debug!(message = %error.message, "recorded error");
        self.errors.insert(0, error);
        self
    }
}
