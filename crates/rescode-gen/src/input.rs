// crates/rescode-gen/src/input.rs
// ============================================================================
// Module: Input Parsing
// Description: Format detection, decoding, and validation of definition files.
// Purpose: Turn a YAML or JSON byte stream into ordered, validated definitions.
// Dependencies: serde, serde_json, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! Definition documents are a sequence of records with the fields `code`,
//! `key`, `message`, `http`, `grpc`, and an optional `desc`. YAML and JSON are
//! interchangeable encodings of the same schema.
//!
//! The format comes from the filename extension when it is `yaml`, `yml`, or
//! `json`. Any other hint falls back to content sniffing: the first
//! significant character `[` or `{` selects JSON, anything else selects YAML.
//!
//! Validation runs per record in document order and stops at the first
//! failing record. [`validate_all`] offers an aggregate report for tooling
//! that wants every violation at once; it does not change the fail-fast
//! contract of [`parse_input`].
//!
//! ## Invariants
//! - Decoding failures surface as [`ParseError::Format`], never as
//!   validation errors.
//! - Omitted fields decode to their zero value so the matching validation
//!   rule reports them.
//! - Inputs are read through a bounded reader capped at [`MAX_INPUT_BYTES`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::definition::ErrorDefinition;
use crate::definition::GrpcCode;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum definition document size accepted by the parser.
pub const MAX_INPUT_BYTES: u64 = 4 * 1024 * 1024;

/// UTF-8 byte-order mark skipped during sniffing.
const BYTE_ORDER_MARK: char = '\u{feff}';

// ============================================================================
// SECTION: Formats
// ============================================================================

/// Supported definition document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// YAML sequence of mappings.
    Yaml,
    /// JSON array of objects.
    Json,
}

impl InputFormat {
    /// Returns the lowercase label for the format.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }

    /// Parses a format from a file extension.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detects the format from a filename extension alone.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension().and_then(|extension| extension.to_str()).and_then(Self::from_extension)
    }

    /// Sniffs the format from document content.
    ///
    /// Leading whitespace and a byte-order mark are skipped. A first
    /// significant character of `[` or `{` selects JSON; anything else,
    /// including an empty document, selects YAML.
    #[must_use]
    pub fn sniff(content: &str) -> Self {
        let first = content
            .trim_start_matches(BYTE_ORDER_MARK)
            .chars()
            .find(|ch| !ch.is_whitespace());
        match first {
            Some('[' | '{') => Self::Json,
            _ => Self::Yaml,
        }
    }

    /// Resolves the format from a filename hint, sniffing content when the
    /// extension is missing or unrecognized.
    #[must_use]
    pub fn resolve(filename_hint: &Path, content: &str) -> Self {
        Self::from_path(filename_hint).unwrap_or_else(|| Self::sniff(content))
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Raw Records
// ============================================================================

/// An undecoded definition record as it appears in the document.
///
/// # Invariants
/// - Missing fields take their zero value; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawDefinition {
    /// Numeric error code.
    pub code: u64,
    /// Symbolic key.
    pub key: String,
    /// Human-readable message.
    pub message: String,
    /// HTTP status code.
    pub http: i64,
    /// gRPC status code as written in the document.
    pub grpc: i64,
    /// Optional description.
    pub desc: Option<String>,
}

impl RawDefinition {
    /// Returns every rule this record violates, in rule order.
    #[must_use]
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.code == 0 {
            violations.push(Violation::ZeroCode);
        }
        if self.key.is_empty() {
            violations.push(Violation::EmptyKey);
        }
        if self.message.is_empty() {
            violations.push(Violation::EmptyMessage);
        }
        if self.http == 0 {
            violations.push(Violation::ZeroHttp);
        }
        if GrpcCode::from_value(self.grpc).is_none() {
            violations.push(Violation::GrpcOutOfRange(self.grpc));
        }
        violations
    }

    /// Validates the record, reporting the first violated rule.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] tagged with `index` and the record key when
    /// any rule fails.
    pub fn validate(self, index: usize) -> Result<ErrorDefinition, ValidationError> {
        if let Some(violation) = self.violations().into_iter().next() {
            return Err(ValidationError::new(index, &self.key, violation));
        }
        let grpc = GrpcCode::from_value(self.grpc).ok_or_else(|| {
            ValidationError::new(index, &self.key, Violation::GrpcOutOfRange(self.grpc))
        })?;
        Ok(ErrorDefinition {
            code: self.code,
            key: self.key,
            message: self.message,
            http: self.http,
            grpc,
            desc: self.desc,
        })
    }
}

/// A decoded but unvalidated definition document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Format the document was decoded with.
    pub format: InputFormat,
    /// Records in document order.
    pub definitions: Vec<RawDefinition>,
}

impl RawDocument {
    /// Validates every record in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Validation`] for the first invalid record.
    pub fn into_definitions(self) -> Result<Vec<ErrorDefinition>, ParseError> {
        self.definitions
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.validate(index).map_err(ParseError::Validation))
            .collect()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// A single validation rule violation.
///
/// The display text is stable; callers match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    /// `code` was zero or omitted.
    #[error("code cannot be 0")]
    ZeroCode,
    /// `key` was empty or omitted.
    #[error("key cannot be empty")]
    EmptyKey,
    /// `message` was empty or omitted.
    #[error("message cannot be empty")]
    EmptyMessage,
    /// `http` was zero or omitted.
    #[error("http code cannot be 0")]
    ZeroHttp,
    /// `grpc` fell outside `[0, 16]`.
    #[error("grpc code must be between 0 and 16 (got {0})")]
    GrpcOutOfRange(i64),
}

/// A violation attributed to one record of the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("definition #{index}{}: {violation}", key_label(.key))]
pub struct ValidationError {
    /// Zero-based record index in document order.
    pub index: usize,
    /// Record key, empty when the record has none.
    pub key: String,
    /// Violated rule.
    pub violation: Violation,
}

impl ValidationError {
    /// Builds a validation error for the record at `index`.
    #[must_use]
    pub fn new(index: usize, key: &str, violation: Violation) -> Self {
        Self {
            index,
            key: key.to_string(),
            violation,
        }
    }
}

/// Formats the optional key suffix of a validation message.
fn key_label(key: &str) -> String {
    if key.is_empty() { String::new() } else { format!(" ({key})") }
}

/// Errors raised while reading, decoding, or validating a document.
///
/// # Invariants
/// - Variant meanings are stable for automation and tests.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Reading the stream failed or it was not valid UTF-8.
    #[error("io error: {0}")]
    Io(String),
    /// The stream exceeded the input size limit.
    #[error("input exceeds {limit} bytes")]
    InputTooLarge {
        /// Limit that was exceeded.
        limit: u64,
    },
    /// The document could not be decoded in the selected format.
    #[error("failed to parse {format} input: {error}")]
    Format {
        /// Format that failed to decode.
        format: InputFormat,
        /// Underlying decoder message.
        error: String,
    },
    /// A record failed validation.
    #[error("{0}")]
    Validation(ValidationError),
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Parses and validates a definition document.
///
/// `filename_hint` selects the format by extension; unrecognized extensions
/// fall back to content sniffing.
///
/// # Errors
///
/// Returns [`ParseError`] when reading, decoding, or validation fails.
///
/// # Examples
/// ```
/// use rescode_gen::parse_input;
///
/// let input = r#"[{"code": 20001, "key": "PolicyNotFound", "message": "Policy not found", "http": 404, "grpc": 5}]"#;
/// let definitions = parse_input(input.as_bytes(), "errors.unknown")?;
/// assert_eq!(definitions[0].key, "PolicyNotFound");
/// # Ok::<(), rescode_gen::ParseError>(())
/// ```
pub fn parse_input<R: Read>(
    reader: R,
    filename_hint: impl AsRef<Path>,
) -> Result<Vec<ErrorDefinition>, ParseError> {
    parse_input_as(reader, filename_hint, None)
}

/// Parses and validates a document, optionally forcing the format.
///
/// # Errors
///
/// Returns [`ParseError`] when reading, decoding, or validation fails.
pub fn parse_input_as<R: Read>(
    reader: R,
    filename_hint: impl AsRef<Path>,
    format: Option<InputFormat>,
) -> Result<Vec<ErrorDefinition>, ParseError> {
    decode_input(reader, filename_hint, format)?.into_definitions()
}

/// Reads and decodes a document without validating its records.
///
/// # Errors
///
/// Returns [`ParseError`] when reading or decoding fails.
pub fn decode_input<R: Read>(
    reader: R,
    filename_hint: impl AsRef<Path>,
    format: Option<InputFormat>,
) -> Result<RawDocument, ParseError> {
    let content = read_bounded(reader)?;
    let format = format.unwrap_or_else(|| InputFormat::resolve(filename_hint.as_ref(), &content));
    let definitions = decode(&content, format)?;
    Ok(RawDocument {
        format,
        definitions,
    })
}

/// Collects every violation across all records, in document order.
#[must_use]
pub fn validate_all(definitions: &[RawDefinition]) -> Vec<ValidationError> {
    definitions
        .iter()
        .enumerate()
        .flat_map(|(index, raw)| {
            raw.violations()
                .into_iter()
                .map(move |violation| ValidationError::new(index, &raw.key, violation))
        })
        .collect()
}

// ============================================================================
// SECTION: Decoding Helpers
// ============================================================================

/// Reads the stream with a hard size limit.
fn read_bounded<R: Read>(reader: R) -> Result<String, ParseError> {
    let mut bytes = Vec::new();
    let mut limited = reader.take(MAX_INPUT_BYTES + 1);
    limited.read_to_end(&mut bytes).map_err(|err| ParseError::Io(err.to_string()))?;
    let size = u64::try_from(bytes.len()).map_err(|_| ParseError::InputTooLarge {
        limit: MAX_INPUT_BYTES,
    })?;
    if size > MAX_INPUT_BYTES {
        return Err(ParseError::InputTooLarge {
            limit: MAX_INPUT_BYTES,
        });
    }
    String::from_utf8(bytes).map_err(|err| ParseError::Io(err.to_string()))
}

/// Decodes document content into raw records.
fn decode(content: &str, format: InputFormat) -> Result<Vec<RawDefinition>, ParseError> {
    let content = content.trim_start_matches(BYTE_ORDER_MARK);
    match format {
        InputFormat::Json => serde_json::from_str(content).map_err(|err| ParseError::Format {
            format,
            error: err.to_string(),
        }),
        InputFormat::Yaml => {
            if content.trim().is_empty() {
                return Ok(Vec::new());
            }
            serde_yaml::from_str(content).map_err(|err| ParseError::Format {
                format,
                error: err.to_string(),
            })
        }
    }
}
