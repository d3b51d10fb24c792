//! Locale type: a validated member of the locale registry.
//!
//! A `Locale` can only be obtained through the registry, so holding one is
//! proof that the code is supported and enabled.

use crate::i18n::{I18nError, LocaleConfig, LocaleRegistry};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// Locale code as registered (e.g., "en", "zh-CN")
    code: &'static str,
}

impl Locale {
    /// English (the default locale).
    pub const EN: Locale = Locale { code: "en" };

    /// Simplified Chinese.
    pub const ZH_CN: Locale = Locale { code: "zh-CN" };

    /// Traditional Chinese.
    pub const ZH_TW: Locale = Locale { code: "zh-TW" };

    /// Create a Locale from its exact code.
    ///
    /// # Arguments
    /// * `code` - The locale code (e.g., "en", "zh-TW")
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is registered and enabled
    /// * `Err(I18nError::UnsupportedLocale)` otherwise
    pub fn from_code(code: &str) -> Result<Locale, I18nError> {
        match LocaleRegistry::get().get_by_code(code) {
            Some(config) if config.enabled => Ok(Locale { code: config.code }),
            _ => Err(I18nError::UnsupportedLocale(code.to_string())),
        }
    }

    /// Create a Locale from a code, ignoring ASCII case.
    pub fn from_code_ignore_case(code: &str) -> Option<Locale> {
        LocaleRegistry::get()
            .find_ignore_case(code)
            .filter(|config| config.enabled)
            .map(|config| Locale { code: config.code })
    }

    /// Get the default locale.
    pub fn default_locale() -> Locale {
        Locale {
            code: LocaleRegistry::get().default_locale().code,
        }
    }

    /// All enabled locales, in registry order.
    pub fn all() -> Vec<Locale> {
        LocaleRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Locale { code: config.code })
            .collect()
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full locale configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not in the registry. This cannot happen for a
    /// Locale built through `from_code` or the constants.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn flag(&self) -> &'static str {
        self.config().flag
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::from_code(s)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_constants_match_registry() {
        assert_eq!(Locale::EN.code(), "en");
        assert_eq!(Locale::ZH_CN.native_name(), "简体中文");
        assert_eq!(Locale::ZH_TW.native_name(), "繁體中文");
        assert!(Locale::EN.is_default());
        assert!(!Locale::ZH_TW.is_default());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_valid() {
        let locale = Locale::from_code("zh-CN").expect("Should succeed");
        assert_eq!(locale, Locale::ZH_CN);
    }

    #[test]
    fn test_from_code_unsupported() {
        let err = Locale::from_code("fr").unwrap_err();
        assert!(matches!(err, I18nError::UnsupportedLocale(ref code) if code == "fr"));
        assert!(err.to_string().contains("Unsupported"));
    }

    #[test]
    fn test_from_code_is_case_sensitive() {
        assert!(Locale::from_code("zh-tw").is_err());
        assert_eq!(Locale::from_code_ignore_case("zh-tw"), Some(Locale::ZH_TW));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Locale::from_code("").is_err());
        assert!(Locale::from_code_ignore_case("").is_none());
    }

    #[test]
    fn test_parse_via_from_str() {
        let locale: Locale = "zh-TW".parse().expect("Should parse");
        assert_eq!(locale, Locale::ZH_TW);
    }

    // ==================== Default / Listing Tests ====================

    #[test]
    fn test_default_locale_is_english() {
        assert_eq!(Locale::default_locale(), Locale::EN);
    }

    #[test]
    fn test_all_lists_enabled_locales() {
        assert_eq!(Locale::all(), vec![Locale::EN, Locale::ZH_CN, Locale::ZH_TW]);
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_display_is_code() {
        assert_eq!(Locale::ZH_CN.to_string(), "zh-CN");
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&Locale::ZH_TW).unwrap();
        assert_eq!(json, "\"zh-TW\"");
    }
}
