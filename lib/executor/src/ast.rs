use graphql_parser::query::{OperationDefinition, SelectionSet, VariableDefinition};

/// The parser models operations as four separate variants; this flattens the
/// pieces the preparation pipeline cares about.
pub trait OperationDefinitionExt {
    fn operation_name(&self) -> Option<&str>;
    fn variable_definitions(&self) -> &[VariableDefinition<'static, String>];
    fn selection_set(&self) -> &SelectionSet<'static, String>;
}

impl OperationDefinitionExt for OperationDefinition<'static, String> {
    fn operation_name(&self) -> Option<&str> {
        match self {
            OperationDefinition::SelectionSet(_) => None,
            OperationDefinition::Query(query) => query.name.as_deref(),
            OperationDefinition::Mutation(mutation) => mutation.name.as_deref(),
            OperationDefinition::Subscription(subscription) => subscription.name.as_deref(),
        }
    }

    fn variable_definitions(&self) -> &[VariableDefinition<'static, String>] {
        match self {
            OperationDefinition::SelectionSet(_) => &[],
            OperationDefinition::Query(query) => &query.variable_definitions,
            OperationDefinition::Mutation(mutation) => &mutation.variable_definitions,
            OperationDefinition::Subscription(subscription) => &subscription.variable_definitions,
        }
    }

    fn selection_set(&self) -> &SelectionSet<'static, String> {
        match self {
            OperationDefinition::SelectionSet(selection_set) => selection_set,
            OperationDefinition::Query(query) => &query.selection_set,
            OperationDefinition::Mutation(mutation) => &mutation.selection_set,
            OperationDefinition::Subscription(subscription) => &subscription.selection_set,
        }
    }
}
