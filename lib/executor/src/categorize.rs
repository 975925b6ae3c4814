use std::collections::HashMap;

use graphql_parser::query::Definition;
use tracing::debug;

use crate::ast::OperationDefinitionExt;
use crate::context::{ExecutionContext, OperationKey};

/// Splits the document into its fragment and operation tables and marks the
/// context as categorized. Both tables are rebuilt from scratch on every
/// call; duplicate names are last-write-wins since duplicate detection
/// belongs to upstream validation.
pub fn categorize(mut context: ExecutionContext) -> ExecutionContext {
    let mut operations = HashMap::new();
    let mut fragments = HashMap::new();

    for definition in &context.document.definitions {
        match definition {
            Definition::Operation(operation) => {
                let key = OperationKey::from_name(operation.operation_name());
                operations.insert(key, operation.clone());
            }
            Definition::Fragment(fragment) => {
                fragments.insert(fragment.name.clone(), fragment.clone());
            }
        }
    }

    debug!(
        operations = operations.len(),
        fragments = fragments.len(),
        "categorized document"
    );
    context.operations = operations;
    context.fragments = fragments;
    context.categorized = true;
    context
}
