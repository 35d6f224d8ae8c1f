// crates/rescode-gen/src/emitter.rs
// ============================================================================
// Module: Go Code Emitter
// Description: Deterministic Go source rendering for error definitions.
// Purpose: Emit typed constants and factory functions for each definition.
// Dependencies: regex, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Emission happens in two passes. Definitions are first lowered into an
//! ordered list of declarations (a constant group and a factory function per
//! definition), composing and checking every Go identifier along the way.
//! The declarations are then rendered into one gofmt-compatible file.
//!
//! The rendered file always contains, in order: the generated-code marker,
//! the package clause, the `rescode` and `codes` imports, one `const` block
//! holding a group per definition, and the factory functions.
//!
//! ## Invariants
//! - Output bytes depend only on the [`GeneratorConfig`].
//! - Declaration order follows definition order.
//! - A `<Key>Desc` constant is emitted only when the description is non-empty.
//! - Field values are not re-validated; only identifiers are checked.
//! - Identifiers follow Go's lexical rule: a Unicode letter or `_`, then
//!   letters, decimal digits, or `_`.
//! - NUL and U+FEFF never appear raw in the output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::definition::ErrorDefinition;
use crate::definition::GeneratorConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Marker line recognized by Go tooling as generated code.
pub const GENERATED_MARKER: &str = "// Code generated by rescodegen. DO NOT EDIT.";

/// Import path of the runtime error-value package.
pub const RUNTIME_IMPORT: &str = "github.com/restayway/rescode";

/// Import path of the gRPC status-code package.
pub const CODES_IMPORT: &str = "google.golang.org/grpc/codes";

/// Go keywords, which can never name a declaration.
const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Names the generated file already binds or references.
const RESERVED_NAMES: &[&str] = &["codes", "error", "int", "rescode", "string", "uint64"];

/// Function name Go reserves for argument-less package initializers.
const INIT_FUNC: &str = "init";

/// Function name Go reserves for the entry point of package `main`.
const MAIN_FUNC: &str = "main";

/// Go identifier grammar over Unicode general categories.
static GO_IDENTIFIER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[\p{L}_][\p{L}\p{Nd}_]*$"));

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while emitting Go source.
///
/// These indicate inputs the Go toolchain could not compile; they are not
/// produced for definitions with ordinary identifier keys.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Package name is not a usable Go package identifier.
    #[error("invalid package name '{0}'")]
    InvalidPackage(String),
    /// A composed declaration name is not a valid Go identifier.
    #[error("definition #{index}: invalid Go identifier '{identifier}'")]
    InvalidIdentifier {
        /// Index of the offending definition.
        index: usize,
        /// Composed identifier that failed the check.
        identifier: String,
    },
    /// A literal value could not be rendered.
    #[error("render error: {0}")]
    Render(String),
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Generates Go source for the config.
///
/// # Errors
///
/// Returns [`GenerateError`] when a package name or composed identifier is not
/// valid Go, or when a literal cannot be rendered.
///
/// # Examples
/// ```
/// use rescode_gen::ErrorDefinition;
/// use rescode_gen::GeneratorConfig;
/// use rescode_gen::GrpcCode;
/// use rescode_gen::generate_string;
///
/// let config = GeneratorConfig::new(
///     "policy",
///     vec![ErrorDefinition {
///         code: 20001,
///         key: "PolicyNotFound".to_string(),
///         message: "Policy not found".to_string(),
///         http: 404,
///         grpc: GrpcCode::NotFound,
///         desc: None,
///     }],
/// );
/// let source = generate_string(&config)?;
/// assert!(source.contains("func PolicyNotFound(err ...error) *rescode.RC {"));
/// # Ok::<(), rescode_gen::GenerateError>(())
/// ```
pub fn generate(config: &GeneratorConfig) -> Result<Vec<u8>, GenerateError> {
    generate_string(config).map(String::into_bytes)
}

/// Generates Go source for the config as a string.
///
/// # Errors
///
/// Returns [`GenerateError`] under the same conditions as [`generate`].
pub fn generate_string(config: &GeneratorConfig) -> Result<String, GenerateError> {
    let package = config.package_name();
    if !is_go_identifier(package) || package == "_" {
        return Err(GenerateError::InvalidPackage(package.to_string()));
    }
    let declarations = lower(&config.definitions, package)?;
    render(package, &declarations)
}

// ============================================================================
// SECTION: Declarations
// ============================================================================

/// One typed constant inside a group.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ConstSpec {
    /// Constant name.
    name: String,
    /// Go type name.
    ty: &'static str,
    /// Rendered literal value.
    value: String,
}

/// Lowered declarations in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Declaration<'a> {
    /// Constants for one definition, rendered as one aligned group.
    ConstGroup(Vec<ConstSpec>),
    /// Factory function for one definition.
    Factory {
        /// Function name (the definition key).
        name: &'a str,
        /// Non-empty description quoted in the doc comment.
        description: Option<&'a str>,
    },
}

/// Lowers definitions into constant groups followed by factories.
fn lower<'a>(
    definitions: &'a [ErrorDefinition],
    package: &str,
) -> Result<Vec<Declaration<'a>>, GenerateError> {
    let mut groups = Vec::with_capacity(definitions.len());
    let mut factories = Vec::with_capacity(definitions.len());
    for (index, definition) in definitions.iter().enumerate() {
        let key = definition.key.as_str();
        check_identifier(index, key)?;
        check_factory_name(index, key, package)?;
        let mut specs = vec![
            const_spec(index, key, "Code", "uint64", definition.code.to_string())?,
            const_spec(index, key, "HTTP", "int", definition.http.to_string())?,
            const_spec(index, key, "GRPC", "codes.Code", definition.grpc.value().to_string())?,
            const_spec(index, key, "Msg", "string", go_string_literal(&definition.message)?)?,
        ];
        if let Some(description) = definition.description() {
            specs.push(const_spec(index, key, "Desc", "string", go_string_literal(description)?)?);
        }
        groups.push(Declaration::ConstGroup(specs));
        factories.push(Declaration::Factory {
            name: key,
            description: definition.description(),
        });
    }
    groups.extend(factories);
    Ok(groups)
}

/// Composes a suffixed constant name and checks it.
fn const_spec(
    index: usize,
    key: &str,
    suffix: &str,
    ty: &'static str,
    value: String,
) -> Result<ConstSpec, GenerateError> {
    let name = format!("{key}{suffix}");
    check_identifier(index, &name)?;
    Ok(ConstSpec {
        name,
        ty,
        value,
    })
}

/// Rejects names Go cannot declare in the generated file.
fn check_identifier(index: usize, identifier: &str) -> Result<(), GenerateError> {
    if is_go_identifier(identifier) && !RESERVED_NAMES.contains(&identifier) {
        return Ok(());
    }
    Err(GenerateError::InvalidIdentifier {
        index,
        identifier: identifier.to_string(),
    })
}

/// Rejects factory names Go gives a fixed signature.
fn check_factory_name(index: usize, name: &str, package: &str) -> Result<(), GenerateError> {
    if name == INIT_FUNC || (name == MAIN_FUNC && package == MAIN_FUNC) {
        return Err(GenerateError::InvalidIdentifier {
            index,
            identifier: name.to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders the full Go file.
fn render(package: &str, declarations: &[Declaration<'_>]) -> Result<String, GenerateError> {
    let mut out = String::new();
    out.push_str(GENERATED_MARKER);
    out.push_str("\n\n");
    out.push_str("package ");
    out.push_str(package);
    out.push_str("\n\n");
    out.push_str("import (\n");
    write_line(&mut out, format_args!("\t\"{RUNTIME_IMPORT}\""))?;
    write_line(&mut out, format_args!("\t\"{CODES_IMPORT}\""))?;
    out.push_str(")\n\n");

    let groups: Vec<&[ConstSpec]> = declarations
        .iter()
        .filter_map(|declaration| match declaration {
            Declaration::ConstGroup(specs) => Some(specs.as_slice()),
            Declaration::Factory { .. } => None,
        })
        .collect();
    if groups.is_empty() {
        out.push_str("const ()\n");
    } else {
        out.push_str("const (\n");
        for (position, specs) in groups.iter().enumerate() {
            if position > 0 {
                out.push('\n');
            }
            render_const_group(&mut out, specs)?;
        }
        out.push_str(")\n");
    }

    for declaration in declarations {
        if let Declaration::Factory {
            name,
            description,
        } = declaration
        {
            out.push('\n');
            render_factory(&mut out, name, *description)?;
        }
    }
    Ok(out)
}

/// Renders one constant group with gofmt column alignment.
fn render_const_group(out: &mut String, specs: &[ConstSpec]) -> Result<(), GenerateError> {
    let name_width = specs.iter().map(|spec| spec.name.chars().count()).max().unwrap_or(0);
    let type_width = specs.iter().map(|spec| spec.ty.len()).max().unwrap_or(0);
    for spec in specs {
        write_line(
            out,
            format_args!(
                "\t{name:<name_width$} {ty:<type_width$} = {value}",
                name = spec.name,
                ty = spec.ty,
                value = spec.value
            ),
        )?;
    }
    Ok(())
}

/// Renders one factory function with its doc comment.
fn render_factory(
    out: &mut String,
    name: &str,
    description: Option<&str>,
) -> Result<(), GenerateError> {
    write_line(out, format_args!("// {name} creates a new {name} error."))?;
    if let Some(description) = description {
        for line in description.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                out.push_str("//\n");
            } else {
                write_line(out, format_args!("// {}", comment_text(line)))?;
            }
        }
    }
    write_line(out, format_args!("func {name}(err ...error) *rescode.RC {{"))?;
    write_line(
        out,
        format_args!(
            "\treturn rescode.New({name}Code, {name}HTTP, {name}GRPC, {name}Msg)(err...)"
        ),
    )?;
    out.push_str("}\n");
    Ok(())
}

/// Appends formatted text and a newline.
fn write_line(out: &mut String, args: std::fmt::Arguments<'_>) -> Result<(), GenerateError> {
    out.write_fmt(args).map_err(|err| GenerateError::Render(err.to_string()))?;
    out.push('\n');
    Ok(())
}

// ============================================================================
// SECTION: Go Syntax Helpers
// ============================================================================

/// Renders a Go interpreted string literal.
///
/// JSON string escaping is a subset of Go's escape syntax, so the JSON
/// encoding of a string is a valid Go literal with the same value. JSON
/// leaves U+FEFF raw, which Go rejects past the start of a file.
fn go_string_literal(value: &str) -> Result<String, GenerateError> {
    serde_json::to_string(value)
        .map(|literal| literal.replace('\u{feff}', "\\ufeff"))
        .map_err(|err| GenerateError::Render(err.to_string()))
}

/// Escapes characters Go forbids even inside comments.
fn comment_text(line: &str) -> String {
    line.replace('\0', "\\u0000").replace('\u{feff}', "\\ufeff")
}

/// Returns true when `value` is a Go identifier and not a keyword.
fn is_go_identifier(value: &str) -> bool {
    GO_IDENTIFIER.as_ref().is_ok_and(|pattern| pattern.is_match(value))
        && !GO_KEYWORDS.contains(&value)
}

#[cfg(test)]
mod tests;
