use std::fmt;

use thiserror::Error;

/// A variable declared by the operation that could not be bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableError {
    pub name: String,
    pub reason: String,
}

impl fmt::Display for VariableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variable `{}': {}", self.name, self.reason)
    }
}

fn join_variable_errors(errors: &[VariableError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failures that abort `prepare`. The runner is never invoked after one of
/// these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrepareError {
    #[error("document must be categorized before an operation can be selected")]
    NotCategorized,
    #[error("multiple operations available, but no operation name was given")]
    AmbiguousOperation,
    #[error("no operation named \"{0}\"")]
    UnknownOperation(String),
    #[error("could not build variables: {}", join_variable_errors(.0))]
    Variables(Vec<VariableError>),
}

/// Opaque failure surfaced unchanged from the execution runner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RunnerError(pub String);

#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Prepare(#[from] PrepareError),
    #[error(transparent)]
    Runner(#[from] RunnerError),
}
