//! Transform-level tests for the grammar engine.

use insta::assert_debug_snapshot;
use rstest::rstest;

use retrace_core::{DeclarationKeyword, InstrumentConfig, TransformError, Transformer};

use crate::{GrammarTransformer, parse, transform};

#[test]
fn instruments_sample_function() {
    let output = transform("function foo(a,b){ return a + b; }").expect("transform");
    assert_debug_snapshot!(
        output,
        @r#""function foo(a,b){\n  let fooOutput;\n fooOutput = a + b; console.log(fooOutput); return fooOutput; }""#
    );
}

#[rstest]
#[case("")]
#[case("  \n\t")]
#[case("// nothing here\n/* or here */\n")]
fn source_without_functions_is_unchanged(#[case] source: &str) {
    assert_eq!(transform(source).expect("transform"), source);
}

#[test]
fn declaration_precedes_return_at_same_offset() {
    let output = transform("function f(){return x;}").expect("transform");
    assert_eq!(
        output,
        "function f(){\n  let fOutput;\nfOutput = x; console.log(fOutput); return fOutput;}"
    );
}

#[test]
fn bare_return_is_left_alone() {
    let output = transform("function f() { return; }").expect("transform");
    assert_eq!(output, "function f() {\n  let fOutput;\n return; }");
}

#[test]
fn every_function_and_return_is_instrumented() {
    let source = "function a() { return 1; }\nfunction b() { return 2; return 3; }";
    let output = transform(source).expect("transform");
    assert_eq!(
        output,
        concat!(
            "function a() {\n  let aOutput;\n aOutput = 1; console.log(aOutput); return aOutput; }\n",
            "function b() {\n  let bOutput;\n bOutput = 2; console.log(bOutput); return bOutput;",
            " bOutput = 3; console.log(bOutput); return bOutput; }",
        )
    );
}

#[test]
fn opaque_expressions_are_copied_verbatim() {
    let source = r#"function s() { return "a;}b" /* why */ + t(1, (2)); }"#;
    let output = transform(source).expect("transform");
    let rewritten = r#"sOutput = "a;}b" /* why */ + t(1, (2)); console.log(sOutput);"#;
    assert!(output.contains(rewritten));
}

#[test]
fn grammar_violation_is_a_parse_error() {
    let error = transform("function f() { if (x) { return 1; } }").expect_err("should fail");
    let TransformError::Parse(parse_error) = error else {
        panic!("expected a parse error, got {error:?}");
    };
    assert_eq!(parse_error.column(), 16);
}

#[test]
fn plan_holds_one_edit_per_match() {
    let plan = GrammarTransformer::default()
        .plan("function f() { return 1; return 2; }")
        .expect("plan");
    assert_eq!(plan.len(), 3);
    let insertions = plan
        .edits()
        .iter()
        .filter(|edit| edit.is_insertion())
        .count();
    assert_eq!(insertions, 1);
}

#[test]
fn configured_transformer_uses_its_templates() {
    let config = InstrumentConfig::default()
        .with_holder_suffix("Ret")
        .with_declaration(DeclarationKeyword::Var);
    let transformer = GrammarTransformer::new(config);

    let output = transformer
        .transform("function g() { return 7; }")
        .expect("transform");
    assert_eq!(
        output,
        "function g() {\n  var gRet;\n gRet = 7; console.log(gRet); return gRet; }"
    );
    assert_eq!(transformer.name(), "grammar");
}

#[test]
fn parse_exposes_the_cst() {
    let source = "function one() { return 1; } function two() {}";
    let program = parse(source).expect("parse");
    let names: Vec<_> = program.functions().iter().map(|f| f.name(source)).collect();
    assert_eq!(names, vec!["one", "two"]);
}
