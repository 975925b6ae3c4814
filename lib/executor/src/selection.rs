use tracing::debug;

use crate::ast::OperationDefinitionExt;
use crate::context::{ExecutionContext, OperationKey};
use crate::error::PrepareError;

/// Picks the single operation this context will execute.
///
/// The rules form an ordered guard chain evaluated top-down, first match
/// wins. The order is load-bearing: reordering changes which documents are
/// accepted.
pub fn select_operation(
    mut context: ExecutionContext,
) -> Result<ExecutionContext, PrepareError> {
    if !context.categorized {
        return Err(PrepareError::NotCategorized);
    }

    // Re-selection on an already prepared context is a no-op, not a
    // re-derivation.
    if context.selected_operation.is_some() {
        return Ok(context);
    }

    let requested = context
        .operation_name
        .clone()
        .filter(|name| !name.is_empty());

    // A document holding only fragments is a valid, degenerate outcome:
    // nothing to run.
    if requested.is_none() && context.operations.is_empty() {
        return Ok(context);
    }

    // Single-operation shorthand, whether or not that operation is named.
    if requested.is_none() && context.operations.len() == 1 {
        context.selected_operation = context.operations.values().next().cloned();
        debug!(
            operation = ?context.selected_operation.as_ref().and_then(|op| op.operation_name()),
            "selected sole operation"
        );
        return Ok(context);
    }

    if let Some(name) = requested {
        let key = OperationKey::Named(name.clone());
        return match context.operations.get(&key).cloned() {
            Some(operation) => {
                context.selected_operation = Some(operation);
                Ok(context)
            }
            None => Err(PrepareError::UnknownOperation(name)),
        };
    }

    Err(PrepareError::AmbiguousOperation)
}
