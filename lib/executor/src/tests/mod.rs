use std::cell::Cell;
use std::sync::Arc;

use graphql_parser::parse_query;
use graphql_parser::Pos;
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};

use crate::adapter::LanguageConventionsAdapter;
use crate::context::ExecutionContext;
use crate::error::{ExecuteError, PrepareError, RunnerError};
use crate::response::{ErrorValue, NameRole};
use crate::runner::{ExecutionRunner, RunOutcome};
use crate::variables::DefaultVariableBuilder;
use crate::{prepare, run, ExecutionOptions, OperationDefinitionExt};

pub(crate) mod support {
    use std::sync::Arc;

    use graphql_parser::{parse_query, parse_schema};

    use crate::context::ExecutionContext;
    use crate::schema::Schema;

    pub fn test_schema() -> Schema {
        let sdl = r#"
            type Query {
                pet: Pet
                named: Named
            }
            type Dog {
                name: String
            }
            type Cat {
                name: String
            }
            union Pet = Dog | Cat
            interface Named {
                name: String
            }
            type Person implements Named {
                name: String
            }
        "#;
        Schema::from_document(&parse_schema::<String>(sdl).unwrap().into_static())
    }

    pub fn context_for(query: &str) -> ExecutionContext {
        ExecutionContext::new(
            Arc::new(test_schema()),
            parse_query::<String>(query).unwrap().into_static(),
        )
    }
}

use self::support::context_for;

struct StubRunner;

impl ExecutionRunner for StubRunner {
    fn run(&self, context: ExecutionContext) -> Result<RunOutcome, RunnerError> {
        let mut data = Map::new();
        data.insert("ok".to_string(), Value::Bool(true));
        Ok(RunOutcome { context, data })
    }
}

/// Reports which operation was selected and which strategy was configured.
struct EchoRunner;

impl ExecutionRunner for EchoRunner {
    fn run(&self, context: ExecutionContext) -> Result<RunOutcome, RunnerError> {
        let mut data = Map::new();
        let operation = context
            .selected_operation
            .as_ref()
            .and_then(|op| op.operation_name())
            .map(str::to_string);
        data.insert(
            "operation".to_string(),
            operation.map(Value::String).unwrap_or(Value::Null),
        );
        data.insert(
            "strategy".to_string(),
            context
                .strategy
                .clone()
                .map(Value::String)
                .unwrap_or(Value::Null),
        );
        Ok(RunOutcome { context, data })
    }
}

struct TrackingRunner {
    invoked: Cell<bool>,
}

impl ExecutionRunner for TrackingRunner {
    fn run(&self, context: ExecutionContext) -> Result<RunOutcome, RunnerError> {
        self.invoked.set(true);
        Ok(RunOutcome {
            context,
            data: Map::new(),
        })
    }
}

impl ExecutionContext {
    fn apply_named(mut self, name: &str) -> Self {
        self.operation_name = Some(name.to_string());
        self
    }
}

#[test]
fn prepare_rejects_documents_with_two_operations_and_no_name() {
    // Scenario A.
    let result = prepare(
        context_for("query A { a } query B { b }"),
        &DefaultVariableBuilder,
    );
    assert!(matches!(result, Err(PrepareError::AmbiguousOperation)));
}

#[test]
fn prepare_selects_a_single_anonymous_operation() {
    // Scenario B.
    let context = prepare(context_for("{ a }"), &DefaultVariableBuilder)
        .expect("prepare should succeed");
    assert!(context.selected_operation.is_some());
}

#[test]
fn run_selects_the_requested_operation() {
    // Scenario C, driven through the options overlay.
    let options = ExecutionOptions {
        operation_name: Some("Get".to_string()),
        strategy: Some("serial".to_string()),
        ..Default::default()
    };
    let result = run(
        context_for("query Get { a } query Other { b }"),
        options,
        &EchoRunner,
        &DefaultVariableBuilder,
    )
    .expect("run should succeed");

    assert_eq!(
        result.data,
        json!({"operation": "Get", "strategy": "serial"})
            .as_object()
            .cloned()
    );
}

#[test]
fn run_fails_for_an_unknown_operation_name() {
    // Scenario D.
    let options = ExecutionOptions {
        operation_name: Some("Other".to_string()),
        ..Default::default()
    };
    let result = run(
        context_for("query Get { a }"),
        options,
        &StubRunner,
        &DefaultVariableBuilder,
    );

    match result {
        Err(ExecuteError::Prepare(error)) => {
            assert_eq!(error, PrepareError::UnknownOperation("Other".to_string()));
            assert!(error.to_string().contains("Other"));
        }
        _ => panic!("expected an unknown operation failure"),
    }
}

#[test]
fn preparation_failures_never_reach_the_runner() {
    let runner = TrackingRunner {
        invoked: Cell::new(false),
    };
    let result = run(
        context_for("query A { a } query B { b }"),
        ExecutionOptions::default(),
        &runner,
        &DefaultVariableBuilder,
    );

    assert!(matches!(
        result,
        Err(ExecuteError::Prepare(PrepareError::AmbiguousOperation))
    ));
    assert!(!runner.invoked.get());
}

#[test]
fn fragment_only_documents_run_with_no_selected_operation() {
    let result = run(
        context_for("fragment f on Dog { name }"),
        ExecutionOptions::default(),
        &EchoRunner,
        &DefaultVariableBuilder,
    )
    .expect("run should succeed");

    assert_eq!(
        result.data,
        json!({"operation": null, "strategy": null})
            .as_object()
            .cloned()
    );
}

#[test]
fn runner_failures_propagate_unchanged() {
    struct FailingRunner;
    impl ExecutionRunner for FailingRunner {
        fn run(&self, _context: ExecutionContext) -> Result<RunOutcome, RunnerError> {
            Err(RunnerError("backend unavailable".to_string()))
        }
    }

    let result = run(
        context_for("{ a }"),
        ExecutionOptions::default(),
        &FailingRunner,
        &DefaultVariableBuilder,
    );
    match result {
        Err(ExecuteError::Runner(error)) => {
            assert_eq!(error.to_string(), "backend unavailable");
        }
        _ => panic!("expected a runner failure"),
    }
}

#[test]
fn field_errors_surface_in_chronological_order() {
    struct FieldErrorRunner;
    impl ExecutionRunner for FieldErrorRunner {
        fn run(&self, context: ExecutionContext) -> Result<RunOutcome, RunnerError> {
            let context = context
                .put_error(
                    NameRole::Field,
                    "first_field",
                    ErrorValue::literal("boom"),
                    &Pos { line: 7, column: 3 },
                )
                .put_error(
                    NameRole::Field,
                    "second_field",
                    ErrorValue::literal("bust"),
                    &Pos { line: 9, column: 5 },
                );
            let mut data = Map::new();
            data.insert("partial".to_string(), Value::Bool(true));
            Ok(RunOutcome { context, data })
        }
    }

    let result = run(
        context_for("{ a }"),
        ExecutionOptions::default(),
        &FieldErrorRunner,
        &DefaultVariableBuilder,
    )
    .expect("run should succeed");

    let errors = result.errors.expect("field errors should surface");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].message, "Field `first_field': boom");
    assert_eq!(errors[0].locations[0].line, 7);
    assert_eq!(errors[0].locations[0].column, 0);
    assert_eq!(errors[1].message, "Field `second_field': bust");
    // Partial data coexists with field errors.
    assert_eq!(result.data, json!({"partial": true}).as_object().cloned());
}

#[test]
fn variables_are_bound_during_preparation() {
    let options = ExecutionOptions {
        variables: Some(
            json!({"id": "42", "extra": true})
                .as_object()
                .cloned()
                .unwrap(),
        ),
        ..Default::default()
    };
    struct VariablesRunner;
    impl ExecutionRunner for VariablesRunner {
        fn run(&self, context: ExecutionContext) -> Result<RunOutcome, RunnerError> {
            let data = context.variables.clone();
            Ok(RunOutcome { context, data })
        }
    }

    let result = run(
        context_for("query Get($id: ID!, $limit: Int = 10) { a }"),
        options,
        &VariablesRunner,
        &DefaultVariableBuilder,
    )
    .expect("run should succeed");

    assert_eq!(
        result.data,
        json!({"id": "42", "limit": 10}).as_object().cloned()
    );
}

#[test]
fn missing_non_null_variables_fail_preparation() {
    let result = run(
        context_for("query Get($id: ID!) { a }"),
        ExecutionOptions::default(),
        &StubRunner,
        &DefaultVariableBuilder,
    );
    match result {
        Err(ExecuteError::Prepare(PrepareError::Variables(errors))) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].name, "id");
        }
        _ => panic!("expected a variables failure"),
    }
}

#[test]
fn the_language_conventions_adapter_wraps_both_boundaries() {
    struct SnakeRunner;
    impl ExecutionRunner for SnakeRunner {
        fn run(&self, context: ExecutionContext) -> Result<RunOutcome, RunnerError> {
            // The document was adapted before categorization.
            let rendered = format!("{}", context.document);
            assert!(rendered.contains("home_address"));
            let mut data = Map::new();
            data.insert("home_address".to_string(), json!({"zip_code": "1234"}));
            Ok(RunOutcome { context, data })
        }
    }

    let options = ExecutionOptions {
        adapter: Some(Arc::new(LanguageConventionsAdapter)),
        ..Default::default()
    };
    let result = run(
        context_for("{ homeAddress { zipCode } }"),
        options,
        &SnakeRunner,
        &DefaultVariableBuilder,
    )
    .expect("run should succeed");

    assert_eq!(
        result.data,
        json!({"homeAddress": {"zipCode": "1234"}})
            .as_object()
            .cloned()
    );
}

#[test]
fn retrying_prepare_from_the_original_context_is_side_effect_free() {
    let original = context_for("query Get { a } query Other { b }");

    let first = prepare(
        original.clone().apply_named("Get"),
        &DefaultVariableBuilder,
    )
    .expect("first prepare should succeed");
    let second = prepare(
        original.clone().apply_named("Other"),
        &DefaultVariableBuilder,
    )
    .expect("second prepare should succeed");

    assert_eq!(
        first
            .selected_operation
            .as_ref()
            .and_then(|op| op.operation_name()),
        Some("Get")
    );
    assert_eq!(
        second
            .selected_operation
            .as_ref()
            .and_then(|op| op.operation_name()),
        Some("Other")
    );
    // The original context is untouched by either run.
    assert!(original.selected_operation.is_none());
    assert!(!original.categorized);
}

#[test]
fn execution_results_serialize_to_the_canonical_shape() {
    let result = run(
        context_for("{ a }"),
        ExecutionOptions::default(),
        &StubRunner,
        &DefaultVariableBuilder,
    )
    .expect("run should succeed");

    let serialized = serde_json::to_string(&result).unwrap();
    insta::assert_snapshot!(serialized, @r#"{"data":{"ok":true}}"#);
}

#[test]
fn operations_can_be_parsed_and_reparsed_between_runs() {
    // Swapping the document via options re-derives everything downstream.
    let replacement = parse_query::<String>("query Swapped { b }")
        .unwrap()
        .into_static();
    let options = ExecutionOptions {
        document: Some(replacement),
        ..Default::default()
    };
    let result = run(
        context_for("query Original { a }"),
        options,
        &EchoRunner,
        &DefaultVariableBuilder,
    )
    .expect("run should succeed");

    assert_eq!(
        result.data.as_ref().and_then(|data| data.get("operation")),
        Some(&Value::String("Swapped".to_string()))
    );
}
