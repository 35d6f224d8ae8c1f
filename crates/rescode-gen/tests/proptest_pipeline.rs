// crates/rescode-gen/tests/proptest_pipeline.rs
// ============================================================================
// Module: Pipeline Property-Based Tests
// Description: Property tests for parse and generate invariants.
// Purpose: Detect ordering, determinism, and format drift over wide inputs.
// ============================================================================

//! Property-based tests for the parse and generate pipeline.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use rescode_gen::GeneratorConfig;
use rescode_gen::InputFormat;
use rescode_gen::RawDefinition;
use rescode_gen::generate_string;
use rescode_gen::parse_input;
use rescode_gen::validate_all;
use serde_json::Value;
use serde_json::json;

fn definition_strategy() -> impl Strategy<Value = Value> {
    (
        1 .. u64::MAX,
        "[A-Z][A-Za-z0-9]{0,12}",
        "[ -~]{1,40}",
        prop_oneof![100 .. 600_i64, -5 .. -1_i64],
        0 .. 17_i64,
        prop::option::of("[ -~]{0,40}"),
    )
        .prop_map(|(code, key, message, http, grpc, desc)| {
            let mut record = json!({
                "code": code,
                "key": key,
                "message": message,
                "http": http,
                "grpc": grpc,
            });
            if let (Some(desc), Some(object)) = (desc, record.as_object_mut()) {
                object.insert("desc".to_string(), Value::String(desc));
            }
            record
        })
}

fn document_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(definition_strategy(), 0 .. 8)
}

proptest! {
    #[test]
    fn parsed_definitions_preserve_document_order(records in document_strategy()) {
        let text = serde_json::to_string(&records).unwrap();
        let definitions = parse_input(text.as_bytes(), "errors.json").unwrap();
        prop_assert_eq!(definitions.len(), records.len());
        for (definition, record) in definitions.iter().zip(&records) {
            prop_assert_eq!(Some(definition.code), record["code"].as_u64());
            prop_assert_eq!(Some(definition.key.as_str()), record["key"].as_str());
            prop_assert_eq!(Some(i64::from(definition.grpc.value())), record["grpc"].as_i64());
        }
    }

    #[test]
    fn yaml_and_json_encodings_agree(records in document_strategy()) {
        let json_text = serde_json::to_string(&records).unwrap();
        let yaml_text = serde_yaml::to_string(&records).unwrap();
        let from_json = parse_input(json_text.as_bytes(), "errors.json").unwrap();
        let from_yaml = parse_input(yaml_text.as_bytes(), "errors.yaml").unwrap();
        prop_assert_eq!(from_json, from_yaml);
    }

    #[test]
    fn generation_is_deterministic_and_ordered(records in document_strategy()) {
        let text = serde_json::to_string(&records).unwrap();
        let definitions = parse_input(text.as_bytes(), "errors.json").unwrap();
        let config = GeneratorConfig::new("pkg", definitions);
        let first = generate_string(&config).unwrap();
        let second = generate_string(&config).unwrap();
        prop_assert_eq!(&first, &second);

        let mut cursor = 0;
        for definition in &config.definitions {
            let needle = format!("func {}(err ...error) *rescode.RC {{", definition.key);
            let found = first[cursor ..].find(&needle);
            prop_assert!(found.is_some(), "factory for {} out of order", definition.key);
            cursor += found.unwrap_or_default() + needle.len();
        }
    }

    #[test]
    fn sniffing_never_panics(content in ".{0,64}") {
        let format = InputFormat::sniff(&content);
        prop_assert!(matches!(format, InputFormat::Yaml | InputFormat::Json));
    }

    #[test]
    fn validate_all_agrees_with_first_failure(
        code in 0 .. 3_u64,
        key in "[A-Z]{0,2}",
        http in -1 .. 2_i64,
        grpc in -2 .. 19_i64,
    ) {
        let raw = RawDefinition {
            code,
            key,
            message: "m".to_string(),
            http,
            grpc,
            desc: None,
        };
        let all = validate_all(std::slice::from_ref(&raw));
        match raw.validate(0) {
            Ok(_) => prop_assert!(all.is_empty()),
            Err(first) => prop_assert_eq!(all.first(), Some(&first)),
        }
    }
}
