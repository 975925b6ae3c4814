use std::collections::BTreeMap;

use graphql_parser::query::{
    Definition, Document, FragmentDefinition, OperationDefinition, Selection, SelectionSet,
    Value as AstValue, VariableDefinition,
};
use heck::{ToLowerCamelCase, ToSnakeCase};
use serde_json::{Map, Value};

use super::NamingAdapter;
use crate::response::graphql_error::{GraphQLError, GraphQLErrorLocation};
use crate::response::{ErrorInfo, NameRole};

/// External camelCase, internal snake_case. Incoming documents get their
/// field, alias, argument and variable names rewritten to snake_case;
/// outgoing result keys are rewritten back to camelCase. Type and directive
/// names are schema-internal and never translated.
#[derive(Debug, Default)]
pub struct LanguageConventionsAdapter;

/// Meta keys such as `__typename` are convention-free and pass through
/// unchanged; case conversion would strip their leading underscores.
fn is_meta_name(name: &str) -> bool {
    name.starts_with("__")
}

fn to_internal(name: &str) -> String {
    if is_meta_name(name) {
        return name.to_string();
    }
    name.to_snake_case()
}

fn to_external(name: &str) -> String {
    if is_meta_name(name) {
        return name.to_string();
    }
    name.to_lower_camel_case()
}

fn adapt_value(value: &mut AstValue<'static, String>) {
    match value {
        AstValue::Variable(name) => *name = to_internal(name),
        AstValue::List(items) => items.iter_mut().for_each(adapt_value),
        AstValue::Object(fields) => {
            let adapted: BTreeMap<String, AstValue<'static, String>> = std::mem::take(fields)
                .into_iter()
                .map(|(key, mut field_value)| {
                    adapt_value(&mut field_value);
                    (to_internal(&key), field_value)
                })
                .collect();
            *fields = adapted;
        }
        _ => {}
    }
}

fn adapt_selection_set(selection_set: &mut SelectionSet<'static, String>) {
    for selection in &mut selection_set.items {
        match selection {
            Selection::Field(field) => {
                field.name = to_internal(&field.name);
                if let Some(alias) = field.alias.take() {
                    field.alias = Some(to_internal(&alias));
                }
                for (name, value) in &mut field.arguments {
                    *name = to_internal(name);
                    adapt_value(value);
                }
                adapt_selection_set(&mut field.selection_set);
            }
            Selection::InlineFragment(inline_fragment) => {
                adapt_selection_set(&mut inline_fragment.selection_set);
            }
            // Spread names refer to fragment definitions, not schema names.
            Selection::FragmentSpread(_) => {}
        }
    }
}

fn adapt_variable_definitions(definitions: &mut [VariableDefinition<'static, String>]) {
    for definition in definitions {
        definition.name = to_internal(&definition.name);
        if let Some(default_value) = &mut definition.default_value {
            adapt_value(default_value);
        }
    }
}

fn adapt_operation(operation: &mut OperationDefinition<'static, String>) {
    match operation {
        OperationDefinition::SelectionSet(selection_set) => adapt_selection_set(selection_set),
        OperationDefinition::Query(query) => {
            adapt_variable_definitions(&mut query.variable_definitions);
            adapt_selection_set(&mut query.selection_set);
        }
        OperationDefinition::Mutation(mutation) => {
            adapt_variable_definitions(&mut mutation.variable_definitions);
            adapt_selection_set(&mut mutation.selection_set);
        }
        OperationDefinition::Subscription(subscription) => {
            adapt_variable_definitions(&mut subscription.variable_definitions);
            adapt_selection_set(&mut subscription.selection_set);
        }
    }
}

fn adapt_fragment(fragment: &mut FragmentDefinition<'static, String>) {
    adapt_selection_set(&mut fragment.selection_set);
}

fn dump_value(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, field_value)| (to_external(&key), dump_value(field_value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(dump_value).collect()),
        other => other,
    }
}

impl NamingAdapter for LanguageConventionsAdapter {
    fn load_document(&self, mut document: Document<'static, String>) -> Document<'static, String> {
        for definition in &mut document.definitions {
            match definition {
                Definition::Operation(operation) => adapt_operation(operation),
                Definition::Fragment(fragment) => adapt_fragment(fragment),
            }
        }
        document
    }

    fn format_error(&self, info: &ErrorInfo, locations: &[GraphQLErrorLocation]) -> GraphQLError {
        let adapted_name = match info.role {
            NameRole::Field | NameRole::Argument | NameRole::Variable => to_external(&info.name),
            NameRole::Type | NameRole::Directive => info.name.clone(),
        };
        GraphQLError {
            message: info.message_for(&adapted_name),
            locations: locations.to_vec(),
        }
    }

    fn dump_results(&self, results: Map<String, Value>) -> Map<String, Value> {
        results
            .into_iter()
            .map(|(key, value)| (to_external(&key), dump_value(value)))
            .collect()
    }
}
