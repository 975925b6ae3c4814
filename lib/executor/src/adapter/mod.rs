//! Naming-convention boundary between callers and the schema.

mod language_conventions;
mod passthrough;

pub use language_conventions::LanguageConventionsAdapter;
pub use passthrough::PassthroughAdapter;

use graphql_parser::query::Document;
use serde_json::{Map, Value};

use crate::response::graphql_error::{GraphQLError, GraphQLErrorLocation};
use crate::response::ErrorInfo;

/// Translates identifiers between the convention callers speak and the one
/// the schema is written in. Implementations are stateless and shared.
pub trait NamingAdapter: Send + Sync {
    /// Applied to the incoming document before categorization.
    fn load_document(&self, document: Document<'static, String>) -> Document<'static, String>;

    /// Builds the final error record, translating the offending name
    /// according to its role.
    fn format_error(&self, info: &ErrorInfo, locations: &[GraphQLErrorLocation]) -> GraphQLError;

    /// Applied to the runner's successful output before it is returned to
    /// the caller.
    fn dump_results(&self, results: Map<String, Value>) -> Map<String, Value>;
}
