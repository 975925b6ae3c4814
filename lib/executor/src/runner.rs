use serde_json::{Map, Value};

use crate::context::ExecutionContext;
use crate::error::RunnerError;

/// What the runner hands back: the data payload plus the context it threaded
/// through field resolution, so errors recorded along the way survive into
/// the final result.
pub struct RunOutcome {
    pub context: ExecutionContext,
    pub data: Map<String, Value>,
}

/// The field-resolution engine. Invoked exactly once per `run` call with a
/// fully prepared context (selected operation, typed variables, adapter,
/// schema and document all present). Whatever concurrency it uses internally
/// is opaque to this core.
pub trait ExecutionRunner {
    fn run(&self, context: ExecutionContext) -> Result<RunOutcome, RunnerError>;
}
