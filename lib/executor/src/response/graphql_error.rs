use graphql_parser::Pos;
use serde::{Deserialize, Serialize};

/// Column tracking is not available at this layer; every reported location
/// carries this column.
pub const DEFAULT_COLUMN: usize = 0;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<GraphQLErrorLocation>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GraphQLErrorLocation {
    pub line: usize,
    pub column: usize,
}

impl GraphQLErrorLocation {
    pub fn at(position: &Pos) -> Self {
        GraphQLErrorLocation {
            line: position.line,
            column: DEFAULT_COLUMN,
        }
    }
}

impl From<String> for GraphQLError {
    fn from(message: String) -> Self {
        GraphQLError {
            message,
            locations: Vec::new(),
        }
    }
}
