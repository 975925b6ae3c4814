use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use graphql_parser::query::{Document, FragmentDefinition, OperationDefinition};
use serde_json::{Map, Value};

use crate::adapter::{NamingAdapter, PassthroughAdapter};
use crate::response::graphql_error::GraphQLError;
use crate::schema::Schema;

/// Key under which an operation is filed after categorization. Anonymous
/// operations get an explicit key instead of piggybacking on a sentinel name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperationKey {
    Anonymous,
    Named(String),
}

impl OperationKey {
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(name) => OperationKey::Named(name.to_string()),
            None => OperationKey::Anonymous,
        }
    }
}

/// The value threaded through the preparation pipeline. Every stage takes the
/// context by value and returns a new one; nothing is shared or mutated in
/// place across stage boundaries.
#[derive(Clone)]
pub struct ExecutionContext {
    pub schema: Arc<Schema>,
    pub document: Document<'static, String>,
    /// Raw caller input before variable building, typed bindings after.
    pub variables: Map<String, Value>,
    pub fragments: HashMap<String, FragmentDefinition<'static, String>>,
    pub operations: HashMap<OperationKey, OperationDefinition<'static, String>>,
    /// Once set, selection never re-derives it.
    pub selected_operation: Option<OperationDefinition<'static, String>>,
    pub operation_name: Option<String>,
    /// Newest first. Read through `sorted_errors` for chronological order.
    pub errors: Vec<GraphQLError>,
    pub categorized: bool,
    pub adapter: Arc<dyn NamingAdapter>,
    /// Strategy hint for the runner; not interpreted here.
    pub strategy: Option<String>,
    /// Runner-owned state. This core never inspects it.
    pub resolution: Option<Value>,
}

impl ExecutionContext {
    pub fn new(schema: Arc<Schema>, document: Document<'static, String>) -> Self {
        ExecutionContext {
            schema,
            document,
            variables: Map::new(),
            fragments: HashMap::new(),
            operations: HashMap::new(),
            selected_operation: None,
            operation_name: None,
            errors: Vec::new(),
            categorized: false,
            adapter: Arc::new(PassthroughAdapter),
            strategy: None,
            resolution: None,
        }
    }

    /// Errors in the order they were recorded. New entries are prepended to
    /// `errors`, so the chronological view is the reverse of storage order;
    /// the reversal happens here, once, at the point errors are read.
    pub fn sorted_errors(&self) -> Vec<GraphQLError> {
        self.errors.iter().rev().cloned().collect()
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("operation_name", &self.operation_name)
            .field("categorized", &self.categorized)
            .field("operations", &self.operations.len())
            .field("fragments", &self.fragments.len())
            .field("selected", &self.selected_operation.is_some())
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
