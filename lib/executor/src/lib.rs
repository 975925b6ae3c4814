//! Preparation and dispatch core for graph query execution: decides which
//! operation in a parsed document will run, resolves abstract types to
//! concrete ones during execution, accumulates errors with source locations,
//! and applies a pluggable naming convention at the input/output boundary.
//!
//! Every stage is a pure transform over [`ExecutionContext`]; the chain
//! short-circuits on the first failure and the external runner is only
//! consulted once preparation has fully succeeded.

pub mod adapter;
mod ast;
mod categorize;
pub mod context;
mod error;
pub mod resolve;
pub mod response;
pub mod runner;
pub mod schema;
mod selection;
pub mod variables;

pub use ast::OperationDefinitionExt;
pub use categorize::categorize;
pub use context::{ExecutionContext, OperationKey};
pub use error::{ExecuteError, PrepareError, RunnerError, VariableError};
pub use resolve::resolve_abstract_type;
pub use selection::select_operation;

use std::sync::Arc;

use graphql_parser::query::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use adapter::NamingAdapter;
use response::graphql_error::GraphQLError;
use runner::ExecutionRunner;
use schema::Schema;
use variables::VariableBuilder;

/// Configuration overlay merged into the context before preparation. The
/// recognized options mirror the context's own fields; unset fields leave
/// the context untouched.
#[derive(Default)]
pub struct ExecutionOptions {
    pub schema: Option<Arc<Schema>>,
    pub document: Option<Document<'static, String>>,
    pub variables: Option<Map<String, Value>>,
    pub operation_name: Option<String>,
    pub adapter: Option<Arc<dyn NamingAdapter>>,
    pub strategy: Option<String>,
}

/// Canonical result shape: the data payload alongside any accumulated
/// errors, in chronological order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQLError>>,
}

impl ExecutionContext {
    fn apply_options(mut self, options: ExecutionOptions) -> Self {
        if let Some(schema) = options.schema {
            self.schema = schema;
        }
        if let Some(document) = options.document {
            self.document = document;
        }
        if let Some(variables) = options.variables {
            self.variables = variables;
        }
        if let Some(operation_name) = options.operation_name {
            self.operation_name = Some(operation_name);
        }
        if let Some(adapter) = options.adapter {
            self.adapter = adapter;
        }
        if let Some(strategy) = options.strategy {
            self.strategy = Some(strategy);
        }
        self
    }
}

/// The pure preparation chain: adapter document transform, categorization,
/// operation selection, variable building. Short-circuits on the first
/// failure; the runner is never consulted here. Re-running from the
/// original context with different options has no observable side effect.
#[instrument(skip(context, variable_builder), fields(operation_name = ?context.operation_name))]
pub fn prepare(
    mut context: ExecutionContext,
    variable_builder: &dyn VariableBuilder,
) -> Result<ExecutionContext, PrepareError> {
    let adapter = context.adapter.clone();
    context.document = adapter.load_document(context.document);
    let context = categorize(context);
    let context = select_operation(context)?;
    variable_builder.build(context)
}

/// Full pipeline: merge options into the context, prepare, hand off to the
/// runner, translate its output through the adapter. Any preparation
/// failure is returned as-is with no partial result payload.
pub fn run(
    context: ExecutionContext,
    options: ExecutionOptions,
    runner: &dyn ExecutionRunner,
    variable_builder: &dyn VariableBuilder,
) -> Result<ExecutionResult, ExecuteError> {
    let context = context.apply_options(options);
    let context = prepare(context, variable_builder)?;
    let adapter = context.adapter.clone();
    let outcome = runner.run(context)?;
    let data = adapter.dump_results(outcome.data);
    let errors = outcome.context.sorted_errors();
    debug!(errors = errors.len(), "execution finished");
    Ok(ExecutionResult {
        data: Some(data),
        errors: if errors.is_empty() {
            None
        } else {
            Some(errors)
        },
    })
}

#[cfg(test)]
mod tests;
