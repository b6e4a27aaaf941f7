//! Tests for configuration parsing and engine selection.

use std::path::Path;
use std::str::FromStr;

use rstest::rstest;

use crate::{
    DEFAULT_LOG_FILTER, DeclarationKeyword, Engine, LogFormat, RetraceConfig, SupportedLanguage,
    TelemetryConfig, build_transformer,
};

#[test]
fn empty_document_yields_defaults() {
    let config: RetraceConfig = serde_json::from_str("{}").expect("deserialise");

    assert_eq!(config, RetraceConfig::default());
    assert_eq!(config.engine(), Engine::Query);
    assert_eq!(config.language(), SupportedLanguage::JavaScript);
    assert_eq!(config.telemetry().log_filter(), DEFAULT_LOG_FILTER);
    assert_eq!(config.telemetry().log_format(), LogFormat::Json);
}

#[test]
fn nested_sections_deserialise() {
    let config: RetraceConfig = serde_json::from_str(
        r#"{
            "engine": "grammar",
            "language": "typescript",
            "instrument": { "holder_suffix": "Value", "declaration": "var" },
            "telemetry": { "log_format": "compact" }
        }"#,
    )
    .expect("deserialise");

    assert_eq!(config.engine(), Engine::Grammar);
    assert_eq!(config.language(), SupportedLanguage::TypeScript);
    assert_eq!(config.instrument().holder_suffix(), "Value");
    assert_eq!(config.instrument().declaration(), DeclarationKeyword::Var);
    assert_eq!(config.telemetry().log_format(), LogFormat::Compact);
    assert_eq!(config.telemetry().log_filter(), DEFAULT_LOG_FILTER);
}

#[rstest]
#[case("grammar", Engine::Grammar)]
#[case("QUERY", Engine::Query)]
fn engine_parses_case_insensitively(#[case] input: &str, #[case] expected: Engine) {
    assert_eq!(Engine::from_str(input), Ok(expected));
}

#[test]
fn unknown_engine_is_rejected() {
    assert!(Engine::from_str("regex").is_err());
}

#[rstest]
#[case(LogFormat::Json, "json")]
#[case(LogFormat::Compact, "compact")]
fn log_format_displays_snake_case(#[case] format: LogFormat, #[case] expected: &str) {
    assert_eq!(format.to_string(), expected);
    assert_eq!(LogFormat::from_str(expected), Ok(format));
}

#[rstest]
#[case(Engine::Grammar, "grammar")]
#[case(Engine::Query, "query")]
fn build_transformer_honours_engine(#[case] engine: Engine, #[case] name: &str) {
    let config = RetraceConfig::default().with_engine(engine);
    let transformer = build_transformer(&config).expect("build transformer");
    assert_eq!(transformer.name(), name);
}

#[test]
fn grammar_engine_ignores_language() {
    let config = RetraceConfig::default()
        .with_engine(Engine::Grammar)
        .with_language(SupportedLanguage::Tsx);
    let transformer = build_transformer(&config).expect("build transformer");

    let output = transformer
        .transform("function one(){ return 1; }")
        .expect("transform");
    assert!(output.contains("let oneOutput;"));
}

#[rstest]
#[case("src/widget.ts", SupportedLanguage::TypeScript)]
#[case("src/View.TSX", SupportedLanguage::Tsx)]
#[case("lib/index.mjs", SupportedLanguage::JavaScript)]
#[case("scripts/build.sh", SupportedLanguage::Tsx)]
#[case("Makefile", SupportedLanguage::Tsx)]
fn language_follows_path_extension(#[case] path: &str, #[case] expected: SupportedLanguage) {
    let config = RetraceConfig::default()
        .with_language(SupportedLanguage::Tsx)
        .with_language_for_path(Path::new(path));
    assert_eq!(config.language(), expected);
}

#[test]
fn path_selected_language_reaches_query_engine() {
    let config = RetraceConfig::default().with_language_for_path(Path::new("sum.ts"));
    let transformer = build_transformer(&config).expect("build transformer");

    let output = transformer
        .transform("function sum(a: number, b: number): number { return a + b; }")
        .expect("transform");
    assert!(output.contains("sumOutput = a + b;"));
}

#[test]
fn telemetry_builder_overrides_defaults() {
    let telemetry = TelemetryConfig::default()
        .with_log_filter("retrace=debug")
        .with_log_format(LogFormat::Compact);
    let config = RetraceConfig::default().with_telemetry(telemetry.clone());

    assert_eq!(config.telemetry(), &telemetry);
    assert_eq!(config.telemetry().log_filter(), "retrace=debug");
}
