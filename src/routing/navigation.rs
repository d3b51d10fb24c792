//! Locale-aware navigation helpers.
//!
//! `to_prefixed` and `from_prefixed` are inverses for normalized logical
//! paths; `switch_locale` composes them so that switching language keeps the
//! user on the same resource.

use crate::i18n::{I18nError, Locale};
use crate::routing::path::{first_segment, normalize, split_suffix};
use crate::routing::Pathnames;

/// Builds and decomposes locale-prefixed URLs.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    pathnames: Pathnames,
}

impl Navigator {
    pub fn new(pathnames: Pathnames) -> Self {
        Self { pathnames }
    }

    /// Prefix a logical path with a locale.
    ///
    /// The root maps to `/{locale}/`. A localized pathname, when the table
    /// has one for this locale, replaces the logical path.
    pub fn to_prefixed(&self, logical_path: &str, locale: Locale) -> String {
        let logical = normalize(logical_path);
        if logical == "/" {
            return format!("/{}/", locale.code());
        }

        let localized = self
            .pathnames
            .localize(&logical, locale)
            .unwrap_or(logical);
        normalize(&format!("/{}{}", locale.code(), localized))
    }

    /// Like `to_prefixed`, for a locale code that has not been validated yet.
    pub fn to_prefixed_code(&self, logical_path: &str, code: &str) -> Result<String, I18nError> {
        let locale = Locale::from_code(code)?;
        Ok(self.to_prefixed(logical_path, locale))
    }

    /// Split a leading supported locale segment off a path.
    ///
    /// Returns `None` when the first segment is not a supported locale.
    pub fn split_prefix(&self, prefixed_path: &str) -> Option<(Locale, String)> {
        let (segment, rest) = first_segment(prefixed_path)?;
        let locale = Locale::from_code(segment).ok()?;

        let localized = normalize(rest);
        let logical = self
            .pathnames
            .delocalize(&localized, locale)
            .unwrap_or(localized);
        Some((locale, logical))
    }

    /// Decompose a prefixed path into its locale and logical path.
    ///
    /// Paths without a supported locale segment come back unchanged, paired
    /// with the default locale.
    pub fn from_prefixed(&self, prefixed_path: &str) -> (Locale, String) {
        self.split_prefix(prefixed_path)
            .unwrap_or_else(|| (Locale::default_locale(), prefixed_path.to_string()))
    }

    /// The same resource in another locale.
    ///
    /// `current` may carry a query string or fragment; both are kept.
    pub fn switch_locale_to(&self, current: &str, target: Locale) -> String {
        let (path, suffix) = split_suffix(current);
        let (_, logical) = self.from_prefixed(path);
        format!("{}{}", self.to_prefixed(&logical, target), suffix)
    }

    /// Like `switch_locale_to`, for a locale code from the caller.
    ///
    /// # Errors
    /// `UnsupportedLocale` if `target` is not in the registry. Callers should
    /// treat this as a programming error.
    pub fn switch_locale(&self, current: &str, target: &str) -> Result<String, I18nError> {
        let target = Locale::from_code(target)?;
        Ok(self.switch_locale_to(current, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn navigator_with_pathnames() -> Navigator {
        let mut pathnames = Pathnames::new();
        pathnames
            .insert("/privacy", &[(Locale::ZH_CN, "/yinsi")])
            .unwrap();
        pathnames
            .insert(
                "/knowledge/articles/[slug]",
                &[(Locale::ZH_TW, "/zhishi/wenzhang/[slug]")],
            )
            .unwrap();
        Navigator::new(pathnames)
    }

    // ==================== to_prefixed Tests ====================

    #[test]
    fn test_to_prefixed_basic() {
        let nav = Navigator::default();
        assert_eq!(nav.to_prefixed("/knowledge", Locale::ZH_TW), "/zh-TW/knowledge");
        assert_eq!(
            nav.to_prefixed("/counseling/book/7", Locale::EN),
            "/en/counseling/book/7"
        );
    }

    #[test]
    fn test_to_prefixed_root() {
        let nav = Navigator::default();
        assert_eq!(nav.to_prefixed("/", Locale::ZH_CN), "/zh-CN/");
        assert_eq!(nav.to_prefixed("", Locale::EN), "/en/");
    }

    #[test]
    fn test_to_prefixed_collapses_duplicate_slashes() {
        let nav = Navigator::default();
        assert_eq!(nav.to_prefixed("//community//post/3/", Locale::EN), "/en/community/post/3");
        assert_eq!(nav.to_prefixed("community", Locale::EN), "/en/community");
    }

    #[test]
    fn test_to_prefixed_uses_pathnames() {
        let nav = navigator_with_pathnames();
        assert_eq!(nav.to_prefixed("/privacy", Locale::ZH_CN), "/zh-CN/yinsi");
        assert_eq!(nav.to_prefixed("/privacy", Locale::ZH_TW), "/zh-TW/privacy");
        assert_eq!(
            nav.to_prefixed("/knowledge/articles/sleep", Locale::ZH_TW),
            "/zh-TW/zhishi/wenzhang/sleep"
        );
    }

    #[test]
    fn test_to_prefixed_code_rejects_unsupported() {
        let nav = Navigator::default();
        assert_eq!(nav.to_prefixed_code("/a", "zh-CN").unwrap(), "/zh-CN/a");
        assert!(matches!(
            nav.to_prefixed_code("/a", "de"),
            Err(I18nError::UnsupportedLocale(_))
        ));
    }

    // ==================== from_prefixed Tests ====================

    #[test]
    fn test_from_prefixed_strips_locale() {
        let nav = Navigator::default();
        assert_eq!(
            nav.from_prefixed("/zh-CN/counseling/book/7"),
            (Locale::ZH_CN, "/counseling/book/7".to_string())
        );
        assert_eq!(nav.from_prefixed("/en"), (Locale::EN, "/".to_string()));
        assert_eq!(nav.from_prefixed("/zh-TW/"), (Locale::ZH_TW, "/".to_string()));
    }

    #[test]
    fn test_from_prefixed_unprefixed_returns_default_unchanged() {
        let nav = Navigator::default();
        assert_eq!(
            nav.from_prefixed("/knowledge//faq"),
            (Locale::EN, "/knowledge//faq".to_string())
        );
        assert_eq!(nav.from_prefixed("/fr/about"), (Locale::EN, "/fr/about".to_string()));
    }

    #[test]
    fn test_from_prefixed_reverses_pathnames() {
        let nav = navigator_with_pathnames();
        assert_eq!(
            nav.from_prefixed("/zh-CN/yinsi"),
            (Locale::ZH_CN, "/privacy".to_string())
        );
        assert_eq!(
            nav.from_prefixed("/zh-TW/zhishi/wenzhang/sleep"),
            (Locale::ZH_TW, "/knowledge/articles/sleep".to_string())
        );
    }

    // ==================== switch_locale Tests ====================

    #[test]
    fn test_switch_locale_keeps_resource() {
        let nav = Navigator::default();
        assert_eq!(
            nav.switch_locale("/en/counseling/book/7", "zh-CN").unwrap(),
            "/zh-CN/counseling/book/7"
        );
    }

    #[test]
    fn test_switch_locale_at_root() {
        let nav = Navigator::default();
        assert_eq!(nav.switch_locale("/en", "zh-TW").unwrap(), "/zh-TW/");
        assert_eq!(nav.switch_locale("/en/", "zh-TW").unwrap(), "/zh-TW/");
    }

    #[test]
    fn test_switch_locale_preserves_query_and_fragment() {
        let nav = Navigator::default();
        assert_eq!(
            nav.switch_locale("/zh-TW/knowledge?q=sleep#results", "en").unwrap(),
            "/en/knowledge?q=sleep#results"
        );
    }

    #[test]
    fn test_switch_locale_across_localized_pathnames() {
        let nav = navigator_with_pathnames();
        assert_eq!(nav.switch_locale("/zh-CN/yinsi", "zh-TW").unwrap(), "/zh-TW/privacy");
        assert_eq!(nav.switch_locale("/en/privacy", "zh-CN").unwrap(), "/zh-CN/yinsi");
    }

    #[test]
    fn test_switch_locale_unsupported_target() {
        let nav = Navigator::default();
        let err = nav.switch_locale("/en/knowledge", "ja").unwrap_err();
        assert!(matches!(err, I18nError::UnsupportedLocale(ref code) if code == "ja"));
    }

    // ==================== Property Tests ====================

    fn logical_path() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z0-9][a-z0-9-]{0,7}", 0..5).prop_map(|segments| {
            if segments.is_empty() {
                "/".to_string()
            } else {
                format!("/{}", segments.join("/"))
            }
        })
    }

    fn locale() -> impl Strategy<Value = Locale> {
        prop::sample::select(Locale::all())
    }

    fn param() -> impl Strategy<Value = String> {
        "[a-z0-9][a-z0-9-]{0,7}"
    }

    /// Logical paths of routes that coexist with the localized table.
    fn app_path() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::sample::select(vec![
                "/".to_string(),
                "/privacy".to_string(),
                "/knowledge".to_string(),
                "/community".to_string(),
            ]),
            param().prop_map(|slug| format!("/knowledge/articles/{slug}")),
            param().prop_map(|id| format!("/community/post/{id}")),
            param().prop_map(|id| format!("/counseling/book/{id}")),
        ]
    }

    proptest! {
        #[test]
        fn prop_round_trip_with_pathnames(path in app_path(), locale in locale()) {
            let nav = navigator_with_pathnames();
            let prefixed = nav.to_prefixed(&path, locale);
            prop_assert_eq!(nav.from_prefixed(&prefixed), (locale, path));
        }

        #[test]
        fn prop_switch_with_pathnames(path in app_path(), from in locale(), to in locale()) {
            let nav = navigator_with_pathnames();
            let current = nav.to_prefixed(&path, from);
            prop_assert_eq!(nav.switch_locale_to(&current, to), nav.to_prefixed(&path, to));
        }

        #[test]
        fn prop_round_trip(path in logical_path(), locale in locale()) {
            let nav = Navigator::default();
            let prefixed = nav.to_prefixed(&path, locale);
            prop_assert_eq!(nav.from_prefixed(&prefixed), (locale, path));
        }

        #[test]
        fn prop_switch_keeps_logical_path(path in logical_path(), from in locale(), to in locale()) {
            let nav = Navigator::default();
            let current = nav.to_prefixed(&path, from);
            let switched = nav.switch_locale_to(&current, to);
            prop_assert_eq!(switched, nav.to_prefixed(&path, to));
        }
    }
}
