// crates/rescode-gen-cli/src/lib.rs
// ============================================================================
// Module: rescodegen CLI Library
// Description: Shared helpers for the rescodegen command-line binary.
// Purpose: Expose the message catalog and batch config loader to the binary.
// Dependencies: rescode-gen, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Library half of the `rescodegen` binary. The [`i18n`] module holds the
//! localized message catalog behind the [`t!`](crate::t) macro, and
//! [`config`] loads the TOML batch file consumed by `rescodegen run`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod i18n;
