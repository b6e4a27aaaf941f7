//! Transform-level tests for the query engine.

use insta::assert_snapshot;
use rstest::{fixture, rstest};

use retrace_core::{InstrumentConfig, Transformer};

use crate::{QueryTransformer, SupportedLanguage, transform};

#[fixture]
fn javascript() -> QueryTransformer {
    QueryTransformer::new(SupportedLanguage::JavaScript, InstrumentConfig::default())
        .expect("queries compile")
}

#[test]
fn instruments_sample_function() {
    let output = transform("function foo(a,b){ return a + b; }").expect("transform");
    assert_snapshot!(output, @r"
    function foo(a,b){
      let fooOutput;
     fooOutput = a + b; console.log(fooOutput); return fooOutput; }
    ");
}

#[rstest]
#[case("")]
#[case("const x = 1;\n")]
#[case("const f = () => { return 1; };")]
fn source_without_function_declarations_is_unchanged(
    javascript: QueryTransformer,
    #[case] source: &str,
) {
    assert_eq!(javascript.transform(source).expect("transform"), source);
}

#[rstest]
fn returns_in_nested_blocks_are_instrumented(javascript: QueryTransformer) {
    let output = javascript
        .transform("function f(x) { if (x) { return 1; } return 2; }")
        .expect("transform");
    assert_eq!(
        output,
        "function f(x) {\n  let fOutput;\n if (x) { fOutput = 1; console.log(fOutput); return fOutput; } \
         fOutput = 2; console.log(fOutput); return fOutput; }"
    );
}

#[rstest]
fn returns_belong_to_nearest_function_declaration(javascript: QueryTransformer) {
    let output = javascript
        .transform("function outer() { function inner() { return 1; } return inner(); }")
        .expect("transform");
    assert_eq!(
        output,
        "function outer() {\n  let outerOutput;\n function inner() {\n  let innerOutput;\n \
         innerOutput = 1; console.log(innerOutput); return innerOutput; } \
         outerOutput = inner(); console.log(outerOutput); return outerOutput; }"
    );
}

#[rstest]
fn top_level_return_is_left_alone(javascript: QueryTransformer) {
    let output = javascript
        .transform("return 1;\nfunction f() { return 2; }")
        .expect("transform");
    assert_eq!(
        output,
        "return 1;\nfunction f() {\n  let fOutput;\n fOutput = 2; console.log(fOutput); return fOutput; }"
    );
}

#[rstest]
fn bare_return_is_left_alone(javascript: QueryTransformer) {
    let output = javascript
        .transform("function f() { return; }")
        .expect("transform");
    assert_eq!(output, "function f() {\n  let fOutput;\n return; }");
}

#[rstest]
fn plan_orders_declarations_before_returns(javascript: QueryTransformer) {
    let plan = javascript
        .plan("function a() { return 1; } function b() { return 2; }")
        .expect("plan");

    let insertions: Vec<_> = plan
        .edits()
        .iter()
        .map(|edit| edit.is_insertion())
        .collect();
    assert_eq!(insertions, vec![true, true, false, false]);
}

#[rstest]
fn syntax_errors_do_not_abort_the_transform(javascript: QueryTransformer) {
    let output = javascript
        .transform("function ok() { return 1; }\nfunction (")
        .expect("error-tolerant transform");
    assert!(output.contains("let okOutput;"));
}

#[rstest]
#[case(
    SupportedLanguage::TypeScript,
    "function add(a: number, b: number): number { return a + b; }"
)]
#[case(
    SupportedLanguage::Tsx,
    "function add(a: number, b: number): number { return a + b; }"
)]
fn typescript_signatures_are_instrumented(
    #[case] language: SupportedLanguage,
    #[case] source: &str,
) {
    let transformer =
        QueryTransformer::new(language, InstrumentConfig::default()).expect("queries compile");
    let output = transformer.transform(source).expect("transform");

    assert!(output.contains("number {\n  let addOutput;\n"));
    let tail = "addOutput = a + b; console.log(addOutput); return addOutput; }";
    assert!(output.ends_with(tail));
    assert_eq!(transformer.language(), language);
}

#[test]
fn custom_configuration_is_rendered() {
    let config = InstrumentConfig::default()
        .with_holder_suffix("Result")
        .with_report_callee("trace");
    let transformer =
        QueryTransformer::new(SupportedLanguage::JavaScript, config).expect("queries compile");

    let output = transformer
        .transform("function g() { return 0; }")
        .expect("transform");
    assert!(output.contains("let gResult;"));
    let rewritten = "gResult = 0; trace(gResult); return gResult;";
    assert!(output.contains(rewritten));
}

#[test]
fn transformer_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<QueryTransformer>();
}
