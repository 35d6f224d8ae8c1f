// crates/rescode-gen/src/lib.rs
// ============================================================================
// Module: rescode Generator Library
// Description: Deterministic generator for Go error-code constants.
// Purpose: Parse YAML/JSON error definitions and render Go source text.
// Dependencies: serde, serde_json, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! This crate turns a declarative list of error definitions into Go source
//! text: one block of typed constants per definition plus a factory function
//! that builds a `*rescode.RC` from those constants. Callers get
//! compile-time constant error values instead of runtime lookups.
//!
//! The pipeline has two stages, each a pure function of its inputs:
//! - [`input`] detects the document format (YAML or JSON), decodes it, and
//!   validates every record in document order.
//! - [`emitter`] lowers validated definitions into declarations and renders
//!   them as gofmt-compatible Go source.
//!
//! ### Design Notes
//! - Output is deterministic: definition order follows the input document and
//!   nothing environment-dependent is rendered.
//! - The library never logs and performs no file I/O beyond reading the stream
//!   handed to [`parse_input`]. Presentation belongs to the caller.
//!
//! ## Index
//! - Data model: [`ErrorDefinition`], [`GrpcCode`], [`GeneratorConfig`]
//! - Parsing: [`parse_input`], [`InputFormat`], [`ParseError`], [`ValidationError`]
//! - Emission: [`generate`], [`GenerateError`]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod definition;
pub mod emitter;
pub mod input;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use definition::DEFAULT_PACKAGE;
pub use definition::ErrorDefinition;
pub use definition::GeneratorConfig;
pub use definition::GrpcCode;
pub use emitter::GenerateError;
pub use emitter::generate;
pub use emitter::generate_string;
pub use input::InputFormat;
pub use input::MAX_INPUT_BYTES;
pub use input::ParseError;
pub use input::RawDefinition;
pub use input::RawDocument;
pub use input::ValidationError;
pub use input::Violation;
pub use input::decode_input;
pub use input::parse_input;
pub use input::parse_input_as;
pub use input::validate_all;
