// crates/rescode-gen-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Message catalog and translation utilities for rescodegen.
// Purpose: Centralize user-facing strings so every locale stays in step.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The rescodegen CLI stores user-facing strings in a small translation
//! catalog. All runtime output is routed through the [`t!`](crate::t) macro;
//! diagnostics emitted through `tracing` are not localized.
//!
//! ## Invariants
//! - The locale is selected once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Parses a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "ca" => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
#[derive(Clone)]
pub struct MessageArg {
    /// Placeholder name used in message templates.
    pub key: &'static str,
    /// Preformatted value substituted for the placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "rescodegen version {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("generate.input.required", "Error: --input is required"),
    ("generate.input.open_failed", "Error: Failed to open input file {path}: {error}"),
    ("generate.input.parse_failed", "Error: Failed to parse input file: {error}"),
    (
        "generate.package.cwd_failed",
        "Error: Failed to resolve the working directory for the default package name: {error}",
    ),
    ("generate.failed", "Error: Failed to generate code: {error}"),
    ("generate.output.write_failed", "Error: Failed to write output file {path}: {error}"),
    ("generate.ok", "Successfully generated {path} with {count} error definitions"),
    ("check.violation", "Error: {detail}"),
    (
        "check.duplicate.code",
        "Warning: definitions #{first} and #{second} share code {code}",
    ),
    ("check.duplicate.key", "Warning: definitions #{first} and #{second} share key {key}"),
    ("check.ok", "{path}: {count} error definitions, no violations"),
    ("check.failed", "{path}: {violations} violations in {count} error definitions"),
    ("run.job.failed", "Job {index} failed: {error}"),
    ("run.ok", "Completed {jobs} generation jobs"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Catalan catalog entries.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "rescodegen versió {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("config.load_failed", "No s'ha pogut carregar la configuració: {error}"),
    ("generate.input.required", "Error: --input és obligatori"),
    (
        "generate.input.open_failed",
        "Error: No s'ha pogut obrir el fitxer d'entrada {path}: {error}",
    ),
    ("generate.input.parse_failed", "Error: No s'ha pogut analitzar el fitxer d'entrada: {error}"),
    (
        "generate.package.cwd_failed",
        "Error: No s'ha pogut determinar el directori de treball per al nom de paquet per \
         defecte: {error}",
    ),
    ("generate.failed", "Error: No s'ha pogut generar el codi: {error}"),
    (
        "generate.output.write_failed",
        "Error: No s'ha pogut escriure el fitxer de sortida {path}: {error}",
    ),
    ("generate.ok", "S'ha generat {path} amb {count} definicions d'error"),
    ("check.violation", "Error: {detail}"),
    (
        "check.duplicate.code",
        "Avís: les definicions #{first} i #{second} comparteixen el codi {code}",
    ),
    (
        "check.duplicate.key",
        "Avís: les definicions #{first} i #{second} comparteixen la clau {key}",
    ),
    ("check.ok", "{path}: {count} definicions d'error, cap infracció"),
    ("check.failed", "{path}: {violations} infraccions en {count} definicions d'error"),
    ("run.job.failed", "La tasca {index} ha fallat: {error}"),
    ("run.ok", "S'han completat {jobs} tasques de generació"),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
];

/// Returns the raw catalog entries for the requested locale.
pub const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Ca => CATALOG_CA,
    }
}

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Ca => CATALOG_CA_MAP.get_or_init(|| CATALOG_CA.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    translate_for(current_locale(), key, &args)
}

/// Translates `key` for an explicit locale.
///
/// Placeholders are filled in one pass over the template, so substituted
/// values are never scanned for further placeholders. Unknown placeholders
/// stay verbatim.
#[must_use]
pub fn translate_for(locale: Locale, key: &str, args: &[MessageArg]) -> String {
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[.. open]);
        let after = &rest[open + 1 ..];
        let Some(close) = after.find('}') else {
            rest = &rest[open ..];
            break;
        };
        let name = &after[.. close];
        match args.iter().find(|arg| arg.key == name) {
            Some(arg) => result.push_str(&arg.value),
            None => result.push_str(&rest[open ..= open + close + 1]),
        }
        rest = &after[close + 1 ..];
    }
    result.push_str(rest);
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// Named arguments are substituted into `{placeholder}` positions of the
/// catalog template selected by `$key`.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
