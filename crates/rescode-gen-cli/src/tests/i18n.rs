// crates/rescode-gen-cli/src/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Unit tests for catalog parity and locale parsing.
// Purpose: Ensure CLI localization remains consistent across supported locales.
// Dependencies: rescode-gen-cli i18n module
// ============================================================================

//! ## Overview
//! Verifies the CLI message catalogs stay in sync, locale parsing is tolerant,
//! and locale templates preserve placeholder parity with English.

use std::collections::BTreeSet;

use crate::i18n::Locale;
use crate::i18n::MessageArg;
use crate::i18n::SUPPORTED_LOCALES;
use crate::i18n::catalog_entries_for;
use crate::i18n::catalog_for;
use crate::i18n::translate;
use crate::i18n::translate_for;

fn placeholder_names(template: &str) -> Result<BTreeSet<&str>, String> {
    let mut names = BTreeSet::new();
    let mut rest = template;
    while let Some(open) = rest.find(['{', '}']) {
        if rest[open ..].starts_with('}') {
            return Err(format!("unmatched '}}' in {template:?}"));
        }
        let after = &rest[open + 1 ..];
        let close = after.find('}').ok_or_else(|| format!("unclosed '{{' in {template:?}"))?;
        let name = &after[.. close];
        if name.is_empty() || !name.chars().all(|ch| ch.is_ascii_lowercase() || ch == '_') {
            return Err(format!("placeholder '{name}' must use [a-z_]"));
        }
        names.insert(name);
        rest = &after[close + 1 ..];
    }
    Ok(names)
}

#[test]
fn catalogs_have_matching_keys() {
    let en_keys: BTreeSet<&'static str> = catalog_for(Locale::En).keys().copied().collect();
    for locale in SUPPORTED_LOCALES {
        let locale_keys: BTreeSet<&'static str> = catalog_for(*locale).keys().copied().collect();
        assert_eq!(en_keys, locale_keys, "locale catalogs must stay in parity ({locale:?})");
    }
}

#[test]
fn catalogs_have_unique_keys_per_locale() {
    for locale in SUPPORTED_LOCALES {
        let entries = catalog_entries_for(*locale);
        let unique: BTreeSet<&str> = entries.iter().map(|(key, _)| *key).collect();
        assert_eq!(unique.len(), entries.len(), "duplicate catalog keys ({locale:?})");
    }
}

#[test]
fn catalogs_have_placeholder_parity_with_english() {
    for (key, en_template) in catalog_entries_for(Locale::En) {
        let en_names = placeholder_names(en_template)
            .unwrap_or_else(|error| panic!("invalid placeholder syntax for '{key}': {error}"));
        for locale in SUPPORTED_LOCALES {
            let template = catalog_for(*locale)
                .get(key)
                .copied()
                .unwrap_or_else(|| panic!("missing key '{key}' in locale {locale:?}"));
            let names = placeholder_names(template).unwrap_or_else(|error| {
                panic!("invalid placeholder syntax for '{key}' in {locale:?}: {error}")
            });
            assert_eq!(en_names, names, "placeholder mismatch for '{key}' in {locale:?}");
        }
    }
}

#[test]
fn catalan_differs_for_curated_keys() {
    for key in ["generate.ok", "check.ok", "config.load_failed", "i18n.disclaimer.machine_translated"]
    {
        let en = catalog_for(Locale::En).get(key).copied().expect("en key exists");
        let ca = catalog_for(Locale::Ca).get(key).copied().expect("ca key exists");
        assert_ne!(en, ca, "Catalan must differ from English for '{key}'");
    }
}

#[test]
fn locale_parse_accepts_region_tags_and_case() {
    assert_eq!(Locale::parse("en"), Some(Locale::En));
    assert_eq!(Locale::parse("EN"), Some(Locale::En));
    assert_eq!(Locale::parse("en-US"), Some(Locale::En));
    assert_eq!(Locale::parse("ca_ES"), Some(Locale::Ca));
    assert_eq!(Locale::parse(" ca "), Some(Locale::Ca));
    assert_eq!(Locale::parse(""), None);
    assert_eq!(Locale::parse("de"), None);
    assert_eq!(Locale::Ca.as_str(), "ca");
}

#[test]
fn translate_substitutes_every_placeholder() {
    let output = translate(
        "generate.ok",
        vec![MessageArg::new("path", "out/rescode_gen.go"), MessageArg::new("count", "3")],
    );
    assert_eq!(output, "Successfully generated out/rescode_gen.go with 3 error definitions");
}

#[test]
fn translate_leaves_missing_placeholders_visible() {
    let output = translate("generate.ok", vec![MessageArg::new("path", "x.go")]);
    assert!(output.contains("{count}"));
}

#[test]
fn translate_falls_back_to_key() {
    assert_eq!(translate("nonexistent.key", Vec::new()), "nonexistent.key");
}

#[test]
fn translate_does_not_expand_placeholders_inside_values() {
    let output = translate_for(
        Locale::En,
        "generate.input.open_failed",
        &[MessageArg::new("path", "{error}/errors.yaml"), MessageArg::new("error", "denied")],
    );
    assert_eq!(output, "Error: Failed to open input file {error}/errors.yaml: denied");
}

#[test]
fn translate_keeps_unclosed_brace_text() {
    let output = translate_for(Locale::En, "value {unclosed", &[]);
    assert_eq!(output, "value {unclosed");
}
