//! Behaviour-driven tests for engine selection and instrumentation.

use std::str::FromStr;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::{Engine, InstrumentConfig, RetraceConfig, TransformError, build_transformer};

// ---------------------------------------------------------------------------
// Typed wrappers for Gherkin step parameters
// ---------------------------------------------------------------------------

/// A quoted string value from a Gherkin feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QuotedString(String);

impl FromStr for QuotedString {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim_matches('"').to_owned()))
    }
}

impl QuotedString {
    fn as_str(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TestWorld {
    engine: Option<Engine>,
    instrument: InstrumentConfig,
    result: Option<Result<String, TransformError>>,
}

impl TestWorld {
    fn output(&self) -> &str {
        match self.result.as_ref().expect("source should be transformed") {
            Ok(output) => output,
            Err(error) => panic!("transform failed: {error}"),
        }
    }
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("the {engine} engine")]
fn given_engine(world: &mut TestWorld, engine: QuotedString) {
    world.engine = Some(Engine::from_str(engine.as_str()).expect("known engine"));
}

#[given("the holder suffix {suffix}")]
fn given_holder_suffix(world: &mut TestWorld, suffix: QuotedString) {
    world.instrument = world.instrument.clone().with_holder_suffix(suffix.as_str());
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the source {source} is transformed")]
fn when_transformed(world: &mut TestWorld, source: QuotedString) {
    let config = RetraceConfig::default()
        .with_engine(world.engine.expect("engine should be set"))
        .with_instrument(world.instrument.clone());
    let transformer = build_transformer(&config).expect("build transformer");
    world.result = Some(transformer.transform(source.as_str()));
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the output contains {snippet}")]
fn then_output_contains(world: &mut TestWorld, snippet: QuotedString) {
    let output = world.output();
    assert!(
        output.contains(snippet.as_str()),
        "expected output to contain '{}', got: {}",
        snippet.as_str(),
        output
    );
}

#[then("the output equals {expected}")]
fn then_output_equals(world: &mut TestWorld, expected: QuotedString) {
    assert_eq!(world.output(), expected.as_str());
}

#[then("the transform fails with a parse error at column {column}")]
fn then_parse_error_at(world: &mut TestWorld, column: QuotedString) {
    let result = world.result.as_ref().expect("source should be transformed");
    let error = result.as_ref().expect_err("transform should fail");
    let parse = error.as_parse_error().expect("grammar violation");
    let expected: u32 = column.as_str().parse().expect("numeric column");
    assert_eq!(parse.column(), expected);
}

// ---------------------------------------------------------------------------
// Scenario registration
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/retrace.feature",
    name = "Grammar engine instruments a simple function"
)]
fn grammar_instruments_simple_function(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/retrace.feature",
    name = "Query engine reaches returns in nested blocks"
)]
fn query_reaches_nested_returns(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/retrace.feature",
    name = "Grammar engine rejects statements outside its grammar"
)]
fn grammar_rejects_foreign_statements(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/retrace.feature",
    name = "Source without functions passes through unchanged"
)]
fn source_without_functions_unchanged(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/retrace.feature",
    name = "Holder naming follows the configuration"
)]
fn holder_naming_follows_configuration(world: TestWorld) {
    let _ = world;
}
