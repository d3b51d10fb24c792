//! Catalog completeness validation.
//!
//! Compares every loaded catalog with the default one:
//! - keys the default catalog lacks are errors (the default must be a
//!   superset, since every fallback ends there)
//! - keys a translation lacks are warnings (they fall back at runtime)
//! - `{placeholder}` sets that differ from the default string are warnings

use crate::i18n::translator::placeholder_regex;
use crate::i18n::CatalogStore;
use std::collections::BTreeSet;
use tracing::{error, warn};

/// Validation report containing errors and warnings about the catalogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that break the default-catalog invariant
    pub errors: Vec<String>,

    /// Gaps that are covered by fallback but should be translated
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    /// Emit every finding through `tracing`.
    pub fn log(&self) {
        for message in &self.errors {
            error!("Catalog validation: {}", message);
        }
        for message in &self.warnings {
            warn!("Catalog validation: {}", message);
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for catalog completeness.
pub struct CatalogValidator;

impl CatalogValidator {
    /// Validate all catalogs in the store against the default catalog.
    pub fn validate(store: &CatalogStore) -> ValidationReport {
        let mut report = ValidationReport::new();
        let default_catalog = store.default_catalog();
        let default_keys = default_catalog.keys();

        for catalog in store.catalogs() {
            let locale = catalog.locale();
            if locale == store.default_locale() {
                continue;
            }

            let keys = catalog.keys();

            let extra: Vec<_> = keys.difference(&default_keys).collect();
            if !extra.is_empty() {
                report.errors.push(format!(
                    "'{}' defines keys missing from the default catalog: {:?}",
                    locale, extra
                ));
            }

            let missing: Vec<_> = default_keys.difference(&keys).collect();
            if !missing.is_empty() {
                report.warnings.push(format!(
                    "'{}' is missing {} keys (served from default): {:?}",
                    locale,
                    missing.len(),
                    missing
                ));
            }

            for key in keys.intersection(&default_keys) {
                let (Some(original), Some(translated)) =
                    (default_catalog.lookup(key), catalog.lookup(key))
                else {
                    continue;
                };

                let expected = Self::extract_placeholders(original);
                let actual = Self::extract_placeholders(translated);
                if expected != actual {
                    report.warnings.push(format!(
                        "Placeholder mismatch in '{}' for '{}': default has {:?}, translation has {:?}",
                        locale, key, expected, actual
                    ));
                }
            }
        }

        report
    }

    /// Extract all `{name}` placeholders from a string
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        placeholder_regex()
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Locale, MessageCatalog};

    fn store(en: &str, zh_cn: &str) -> CatalogStore {
        CatalogStore::from_catalogs(vec![
            MessageCatalog::from_json(Locale::EN, en).unwrap(),
            MessageCatalog::from_json(Locale::ZH_CN, zh_cn).unwrap(),
        ])
        .unwrap()
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_new_report_is_clean() {
        let report = ValidationReport::default();
        assert!(report.is_clean());
        assert!(!report.has_errors());
        assert!(!report.has_warnings());
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_matching_catalogs_are_clean() {
        let report = CatalogValidator::validate(&store(
            r#"{"home": {"title": "Welcome {name}"}}"#,
            r#"{"home": {"title": "欢迎 {name}"}}"#,
        ));
        assert!(report.is_clean(), "{:?}", report);
    }

    #[test]
    fn test_missing_translation_is_warning() {
        let report = CatalogValidator::validate(&store(
            r#"{"home": {"title": "Welcome", "subtitle": "Hi"}}"#,
            r#"{"home": {"title": "欢迎"}}"#,
        ));
        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("home.subtitle"));
    }

    #[test]
    fn test_extra_key_is_error() {
        let report = CatalogValidator::validate(&store(
            r#"{"home": {"title": "Welcome"}}"#,
            r#"{"home": {"title": "欢迎", "only": "仅中文"}}"#,
        ));
        assert!(report.has_errors());
        assert!(report.errors[0].contains("home.only"));
    }

    #[test]
    fn test_placeholder_mismatch_is_warning() {
        let report = CatalogValidator::validate(&store(
            r#"{"booking": "Booking with {name}"}"#,
            r#"{"booking": "预约 {counselor}"}"#,
        ));
        assert!(!report.has_errors());
        assert!(report.warnings[0].contains("Placeholder mismatch"));
    }

    #[test]
    fn test_embedded_catalogs_have_no_errors() {
        let store = CatalogStore::embedded().unwrap();
        let report = CatalogValidator::validate(&store);
        assert!(report.is_clean(), "{:?}", report);
    }

    // ==================== Extraction Tests ====================

    #[test]
    fn test_extract_placeholders() {
        let found = CatalogValidator::extract_placeholders("{a} and {b_2} but not { c }");
        let expected: BTreeSet<String> = ["a", "b_2"].iter().map(|s| s.to_string()).collect();
        assert_eq!(found, expected);
    }
}
