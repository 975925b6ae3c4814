use graphql_parser::query::{Type, Value as AstValue};
use serde_json::{Map, Number, Value};
use tracing::warn;

use crate::ast::OperationDefinitionExt;
use crate::context::ExecutionContext;
use crate::error::{PrepareError, VariableError};

/// Builds the typed variable bindings for the selected operation, replacing
/// the raw caller input on the context. Engines with their own coercion
/// rules substitute their own implementation.
pub trait VariableBuilder: Send + Sync {
    fn build(&self, context: ExecutionContext) -> Result<ExecutionContext, PrepareError>;
}

/// Binding policy: a provided value wins, then the declared default, and a
/// non-null declaration with neither is an error. Every unbindable variable
/// is reported, not just the first.
#[derive(Debug, Default)]
pub struct DefaultVariableBuilder;

impl VariableBuilder for DefaultVariableBuilder {
    fn build(&self, mut context: ExecutionContext) -> Result<ExecutionContext, PrepareError> {
        let operation = match &context.selected_operation {
            Some(operation) => operation,
            // Nothing selected (fragment-only document): nothing to bind.
            None => return Ok(context),
        };

        let mut bindings = Map::new();
        let mut failures = Vec::new();
        for definition in operation.variable_definitions() {
            if let Some(value) = context.variables.get(&definition.name) {
                bindings.insert(definition.name.clone(), value.clone());
            } else if let Some(default_value) = &definition.default_value {
                bindings.insert(definition.name.clone(), value_from_ast(default_value));
            } else if matches!(definition.var_type, Type::NonNullType(_)) {
                failures.push(VariableError {
                    name: definition.name.clone(),
                    reason: "no value was provided for a non-nullable variable".to_string(),
                });
            }
        }

        if !failures.is_empty() {
            return Err(PrepareError::Variables(failures));
        }
        context.variables = bindings;
        Ok(context)
    }
}

/// Literal AST value to runtime value. Variable references cannot legally
/// appear inside a default value, so they collapse to null.
fn value_from_ast(value: &AstValue<'static, String>) -> Value {
    match value {
        AstValue::Null => Value::Null,
        AstValue::Boolean(boolean) => Value::Bool(*boolean),
        AstValue::String(string) => Value::String(string.clone()),
        AstValue::Enum(name) => Value::String(name.clone()),
        AstValue::Int(number) => number.as_i64().map(Value::from).unwrap_or(Value::Null),
        AstValue::Float(float) => Number::from_f64(*float)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        AstValue::List(items) => Value::Array(items.iter().map(value_from_ast).collect()),
        AstValue::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, field_value)| (key.clone(), value_from_ast(field_value)))
                .collect(),
        ),
        AstValue::Variable(name) => {
            warn!(variable = %name, "variable reference inside a default value, coercing to null");
            Value::Null
        }
    }
}
