// crates/rescode-gen/src/definition.rs
// ============================================================================
// Module: Error Definitions
// Description: Validated error definition records and generator input.
// Purpose: Carry parsed definitions from the input parser to the emitter.
// Dependencies: std
// ============================================================================

//! ## Overview
//! An [`ErrorDefinition`] is one validated row of the input document. Values
//! of this type are produced by [`crate::input`] after every validation rule
//! has passed; the emitter assumes they are well formed.
//!
//! [`GeneratorConfig`] pairs the ordered definitions with the Go package name
//! the emitter should declare.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Package name used when the generator config leaves it empty.
pub const DEFAULT_PACKAGE: &str = "main";

// ============================================================================
// SECTION: gRPC Status Codes
// ============================================================================

/// gRPC status codes, matching `google.golang.org/grpc/codes`.
///
/// # Invariants
/// - Discriminants are the wire values 0 through 16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum GrpcCode {
    /// Not an error; returned on success.
    Ok = 0,
    /// The operation was canceled, typically by the caller.
    Canceled = 1,
    /// Unknown error.
    Unknown = 2,
    /// The client specified an invalid argument.
    InvalidArgument = 3,
    /// The deadline expired before the operation could complete.
    DeadlineExceeded = 4,
    /// Some requested entity was not found.
    NotFound = 5,
    /// The entity a client attempted to create already exists.
    AlreadyExists = 6,
    /// The caller lacks permission for the operation.
    PermissionDenied = 7,
    /// Some resource has been exhausted.
    ResourceExhausted = 8,
    /// The system is not in a state required for the operation.
    FailedPrecondition = 9,
    /// The operation was aborted.
    Aborted = 10,
    /// The operation was attempted past the valid range.
    OutOfRange = 11,
    /// The operation is not implemented or supported.
    Unimplemented = 12,
    /// Internal invariants were broken.
    Internal = 13,
    /// The service is currently unavailable.
    Unavailable = 14,
    /// Unrecoverable data loss or corruption.
    DataLoss = 15,
    /// The request lacks valid authentication credentials.
    Unauthenticated = 16,
}

/// All gRPC status codes in wire order.
const ALL_CODES: [GrpcCode; 17] = [
    GrpcCode::Ok,
    GrpcCode::Canceled,
    GrpcCode::Unknown,
    GrpcCode::InvalidArgument,
    GrpcCode::DeadlineExceeded,
    GrpcCode::NotFound,
    GrpcCode::AlreadyExists,
    GrpcCode::PermissionDenied,
    GrpcCode::ResourceExhausted,
    GrpcCode::FailedPrecondition,
    GrpcCode::Aborted,
    GrpcCode::OutOfRange,
    GrpcCode::Unimplemented,
    GrpcCode::Internal,
    GrpcCode::Unavailable,
    GrpcCode::DataLoss,
    GrpcCode::Unauthenticated,
];

impl GrpcCode {
    /// Smallest accepted wire value.
    pub const MIN: i64 = 0;
    /// Largest accepted wire value.
    pub const MAX: i64 = 16;

    /// Returns the code for a wire value, or `None` when out of range.
    #[must_use]
    pub fn from_value(value: i64) -> Option<Self> {
        usize::try_from(value).ok().and_then(|index| ALL_CODES.get(index).copied())
    }

    /// Returns the numeric wire value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns the constant name used by `google.golang.org/grpc/codes`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Canceled => "Canceled",
            Self::Unknown => "Unknown",
            Self::InvalidArgument => "InvalidArgument",
            Self::DeadlineExceeded => "DeadlineExceeded",
            Self::NotFound => "NotFound",
            Self::AlreadyExists => "AlreadyExists",
            Self::PermissionDenied => "PermissionDenied",
            Self::ResourceExhausted => "ResourceExhausted",
            Self::FailedPrecondition => "FailedPrecondition",
            Self::Aborted => "Aborted",
            Self::OutOfRange => "OutOfRange",
            Self::Unimplemented => "Unimplemented",
            Self::Internal => "Internal",
            Self::Unavailable => "Unavailable",
            Self::DataLoss => "DataLoss",
            Self::Unauthenticated => "Unauthenticated",
        }
    }
}

impl fmt::Display for GrpcCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

// ============================================================================
// SECTION: Definitions
// ============================================================================

/// A validated error definition.
///
/// # Invariants
/// - `code` and `http` are non-zero; `key` and `message` are non-empty.
/// - `desc` keeps whatever the document held; an empty string is treated the
///   same as an absent description when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDefinition {
    /// Unique numeric error code.
    pub code: u64,
    /// Symbolic name used to build Go identifiers.
    pub key: String,
    /// Human-readable error message.
    pub message: String,
    /// HTTP status code.
    pub http: i64,
    /// gRPC status code.
    pub grpc: GrpcCode,
    /// Optional free-text description.
    pub desc: Option<String>,
}

impl ErrorDefinition {
    /// Returns the description when present and non-empty.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.desc.as_deref().filter(|desc| !desc.is_empty())
    }
}

// ============================================================================
// SECTION: Generator Input
// ============================================================================

/// Input to the code emitter.
///
/// # Invariants
/// - Definition order is preserved verbatim in the generated output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Go package name; empty selects [`DEFAULT_PACKAGE`].
    pub package: String,
    /// Ordered, validated definitions.
    pub definitions: Vec<ErrorDefinition>,
}

impl GeneratorConfig {
    /// Builds a config from a package name and ordered definitions.
    #[must_use]
    pub fn new(package: impl Into<String>, definitions: Vec<ErrorDefinition>) -> Self {
        Self {
            package: package.into(),
            definitions,
        }
    }

    /// Returns the package name to declare, falling back to [`DEFAULT_PACKAGE`].
    #[must_use]
    pub fn package_name(&self) -> &str {
        if self.package.is_empty() { DEFAULT_PACKAGE } else { &self.package }
    }
}
