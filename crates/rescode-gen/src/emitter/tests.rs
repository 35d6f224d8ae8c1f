// crates/rescode-gen/src/emitter/tests.rs
// ============================================================================
// Module: Go Emitter Unit Tests
// Description: Unit coverage for identifier checks and rendered layout.
// Purpose: Pin the exact generated file shape and identifier rules.
// Dependencies: rescode-gen emitter module
// ============================================================================

//! ## Overview
//! Compares a full rendered file against a fixed expectation and exercises
//! the private Go syntax helpers directly.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use super::Declaration;
use super::GenerateError;
use super::go_string_literal;
use super::is_go_identifier;
use super::lower;
use crate::ErrorDefinition;
use crate::GeneratorConfig;
use crate::GrpcCode;
use crate::generate_string;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn definition(code: u64, key: &str, message: &str, desc: Option<&str>) -> ErrorDefinition {
    ErrorDefinition {
        code,
        key: key.to_string(),
        message: message.to_string(),
        http: 400,
        grpc: GrpcCode::InvalidArgument,
        desc: desc.map(str::to_string),
    }
}

const EXPECTED_TWO_DEFINITIONS: &str = "// Code generated by rescodegen. DO NOT EDIT.

package testpkg

import (
\t\"github.com/restayway/rescode\"
\t\"google.golang.org/grpc/codes\"
)

const (
\tPolicyNotFoundCode uint64     = 20001
\tPolicyNotFoundHTTP int        = 404
\tPolicyNotFoundGRPC codes.Code = 5
\tPolicyNotFoundMsg  string     = \"Policy not found\"
\tPolicyNotFoundDesc string     = \"Policy could not be located in the database\"

\tInvalidKindCode uint64     = 20002
\tInvalidKindHTTP int        = 400
\tInvalidKindGRPC codes.Code = 3
\tInvalidKindMsg  string     = \"Invalid policy kind\"
)

// PolicyNotFound creates a new PolicyNotFound error.
// Policy could not be located in the database
func PolicyNotFound(err ...error) *rescode.RC {
\treturn rescode.New(PolicyNotFoundCode, PolicyNotFoundHTTP, PolicyNotFoundGRPC, PolicyNotFoundMsg)(err...)
}

// InvalidKind creates a new InvalidKind error.
func InvalidKind(err ...error) *rescode.RC {
\treturn rescode.New(InvalidKindCode, InvalidKindHTTP, InvalidKindGRPC, InvalidKindMsg)(err...)
}
";

// ============================================================================
// SECTION: Rendering
// ============================================================================

#[test]
fn renders_expected_file_layout() {
    let config = GeneratorConfig::new(
        "testpkg",
        vec![
            ErrorDefinition {
                code: 20001,
                key: "PolicyNotFound".to_string(),
                message: "Policy not found".to_string(),
                http: 404,
                grpc: GrpcCode::NotFound,
                desc: Some("Policy could not be located in the database".to_string()),
            },
            definition(20002, "InvalidKind", "Invalid policy kind", None),
        ],
    );
    let rendered = generate_string(&config).unwrap();
    assert_eq!(rendered, EXPECTED_TWO_DEFINITIONS);
}

#[test]
fn empty_definition_list_keeps_imports() {
    let rendered = generate_string(&GeneratorConfig::new("empty", Vec::new())).unwrap();
    assert_eq!(
        rendered,
        "// Code generated by rescodegen. DO NOT EDIT.\n\npackage empty\n\nimport (\n\t\"github.com/restayway/rescode\"\n\t\"google.golang.org/grpc/codes\"\n)\n\nconst ()\n"
    );
}

#[test]
fn multi_line_descriptions_become_comment_lines() {
    let config = GeneratorConfig::new(
        "pkg",
        vec![definition(1, "Multi", "m", Some("first line\n\nthird line  \r\n"))],
    );
    let rendered = generate_string(&config).unwrap();
    assert!(rendered.contains(
        "// Multi creates a new Multi error.\n// first line\n//\n// third line\nfunc Multi("
    ));
    assert!(rendered.contains("MultiDesc string     = \"first line\\n\\nthird line  \\r\\n\""));
}

#[test]
fn empty_description_is_treated_as_absent() {
    let config = GeneratorConfig::new("pkg", vec![definition(1, "Bare", "m", Some(""))]);
    let rendered = generate_string(&config).unwrap();
    assert!(!rendered.contains("BareDesc"));
    assert!(rendered.contains("// Bare creates a new Bare error.\nfunc Bare("));
}

#[test]
fn lowering_places_all_groups_before_factories() {
    let definitions = vec![definition(1, "A", "a", None), definition(2, "B", "b", Some("d"))];
    let declarations = lower(&definitions, "pkg").unwrap();
    let kinds: Vec<&str> = declarations
        .iter()
        .map(|declaration| match declaration {
            Declaration::ConstGroup(_) => "group",
            Declaration::Factory { .. } => "factory",
        })
        .collect();
    assert_eq!(kinds, vec!["group", "group", "factory", "factory"]);
    let Declaration::ConstGroup(second) = &declarations[1] else {
        panic!("expected const group");
    };
    let names: Vec<&str> = second.iter().map(|spec| spec.name.as_str()).collect();
    assert_eq!(names, vec!["BCode", "BHTTP", "BGRPC", "BMsg", "BDesc"]);
}

// ============================================================================
// SECTION: Identifiers
// ============================================================================

#[test]
fn go_identifier_rules() {
    for valid in ["PolicyNotFound", "_private", "Ünïcode", "Err2", "错误", "Err٣"] {
        assert!(is_go_identifier(valid), "{valid} should be valid");
    }
    for invalid in [
        "",
        "2Fast",
        "has-dash",
        "has space",
        "func",
        "type",
        "Err\u{b2}",
        "Err\u{2163}",
        "\u{2163}Roman",
        "Cafe\u{301}",
        "x\u{feff}",
    ] {
        assert!(!is_go_identifier(invalid), "{invalid} should be invalid");
    }
}

#[test]
fn invalid_keys_fail_generation() {
    for key in ["404Error", "not-found", "func", "error", "codes", "string", "int", "uint64", "init"] {
        let config = GeneratorConfig::new("pkg", vec![definition(1, key, "m", None)]);
        let err = generate_string(&config).unwrap_err();
        assert!(
            matches!(&err, GenerateError::InvalidIdentifier { index: 0, identifier } if identifier == key),
            "unexpected error for {key}: {err}"
        );
    }
}

#[test]
fn identifier_failure_names_the_offending_definition() {
    let config = GeneratorConfig::new(
        "",
        vec![definition(1, "Ok", "m", None), definition(2, "Err\u{b2}", "m", None)],
    );
    let err = generate_string(&config).unwrap_err();
    assert!(matches!(err, GenerateError::InvalidIdentifier { index: 1, .. }), "{err}");
}

#[test]
fn main_factory_is_rejected_only_in_package_main() {
    for package in ["", "main"] {
        let config = GeneratorConfig::new(package, vec![definition(1, "main", "m", None)]);
        let err = generate_string(&config).unwrap_err();
        assert!(
            matches!(&err, GenerateError::InvalidIdentifier { index: 0, identifier } if identifier == "main"),
            "unexpected error for package {package:?}: {err}"
        );
    }
    let config = GeneratorConfig::new("errs", vec![definition(1, "main", "m", None)]);
    let rendered = generate_string(&config).unwrap();
    assert!(rendered.contains("func main(err ...error) *rescode.RC {"));
}

#[test]
fn builtin_type_suffixes_remain_valid() {
    let config = GeneratorConfig::new("errs", vec![definition(1, "StringTooLong", "m", None)]);
    let rendered = generate_string(&config).unwrap();
    assert!(rendered.contains("\tStringTooLongMsg  string     = \"m\""));
}

#[test]
fn forbidden_source_characters_are_escaped() {
    let config = GeneratorConfig::new(
        "errs",
        vec![definition(1, "Odd", "bom\u{feff}msg", Some("nul\u{0} and bom\u{feff} here"))],
    );
    let rendered = generate_string(&config).unwrap();
    assert!(!rendered.contains('\u{0}'));
    assert!(!rendered.contains('\u{feff}'));
    assert!(rendered.contains("// nul\\u0000 and bom\\ufeff here\n"));
    assert!(rendered.contains("= \"bom\\ufeffmsg\""));
    assert!(rendered.contains("= \"nul\\u0000 and bom\\ufeff here\""));
}

#[test]
fn invalid_package_fails_generation() {
    for package in ["my-service", "9lives", "_", "package"] {
        let config = GeneratorConfig::new(package, Vec::new());
        let err = generate_string(&config).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidPackage(name) if name == package));
    }
}

#[test]
fn string_literals_escape_go_metacharacters() {
    assert_eq!(go_string_literal("plain").unwrap(), "\"plain\"");
    assert_eq!(go_string_literal("say \"hi\"").unwrap(), "\"say \\\"hi\\\"\"");
    assert_eq!(go_string_literal("back\\slash").unwrap(), "\"back\\\\slash\"");
    assert_eq!(go_string_literal("tab\there").unwrap(), "\"tab\\there\"");
    assert_eq!(go_string_literal("nul\u{0}").unwrap(), "\"nul\\u0000\"");
    assert_eq!(go_string_literal("bom\u{feff}").unwrap(), "\"bom\\ufeff\"");
}
