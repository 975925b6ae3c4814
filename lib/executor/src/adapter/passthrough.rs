use graphql_parser::query::Document;
use serde_json::{Map, Value};

use super::NamingAdapter;
use crate::response::graphql_error::{GraphQLError, GraphQLErrorLocation};
use crate::response::ErrorInfo;

/// Identity adapter: callers already speak the schema's convention. This is
/// the construction-time default.
#[derive(Debug, Default)]
pub struct PassthroughAdapter;

impl NamingAdapter for PassthroughAdapter {
    fn load_document(&self, document: Document<'static, String>) -> Document<'static, String> {
        document
    }

    fn format_error(&self, info: &ErrorInfo, locations: &[GraphQLErrorLocation]) -> GraphQLError {
        GraphQLError {
            message: info.message_for(&info.name),
            locations: locations.to_vec(),
        }
    }

    fn dump_results(&self, results: Map<String, Value>) -> Map<String, Value> {
        results
    }
}
