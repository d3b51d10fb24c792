//! Paths the locale resolver must leave alone.
//!
//! API routes, framework internals, and anything that looks like a static
//! file (a dot in the last segment) are served without locale handling.

use regex::RegexSet;

/// Default exclusion patterns.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    r"^/(api|trpc|_next|_vercel)(/|$)",
    r"/[^/]*\.[^/]*$",
];

/// Decides whether a request path bypasses locale resolution.
#[derive(Debug, Clone)]
pub struct ExclusionMatcher {
    patterns: RegexSet,
}

impl ExclusionMatcher {
    /// Build a matcher from regular expressions tested against the path.
    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            patterns: RegexSet::new(patterns)?,
        })
    }

    /// True if any pattern matches `path`.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.patterns.is_match(path)
    }

    pub fn patterns(&self) -> &[String] {
        self.patterns.patterns()
    }
}

impl Default for ExclusionMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS).expect("default exclusion patterns are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excludes_api_and_internals() {
        let matcher = ExclusionMatcher::default();
        assert!(matcher.is_excluded("/api/analysis/upload"));
        assert!(matcher.is_excluded("/api"));
        assert!(matcher.is_excluded("/trpc/posts.list"));
        assert!(matcher.is_excluded("/_next/static/chunk.js"));
        assert!(matcher.is_excluded("/_vercel/insights/script.js"));
    }

    #[test]
    fn test_excludes_static_files() {
        let matcher = ExclusionMatcher::default();
        assert!(matcher.is_excluded("/favicon.ico"));
        assert!(matcher.is_excluded("/images/hero.png"));
        assert!(matcher.is_excluded("/robots.txt"));
    }

    #[test]
    fn test_pages_are_not_excluded() {
        let matcher = ExclusionMatcher::default();
        assert!(!matcher.is_excluded("/"));
        assert!(!matcher.is_excluded("/knowledge"));
        assert!(!matcher.is_excluded("/en/counseling/book/7"));
        assert!(!matcher.is_excluded("/apiary"));
        assert!(!matcher.is_excluded("/zh-TW/v1.2/notes"));
    }

    #[test]
    fn test_custom_patterns() {
        let matcher = ExclusionMatcher::new(["^/healthz$"]).unwrap();
        assert!(matcher.is_excluded("/healthz"));
        assert!(!matcher.is_excluded("/api/health"));
        assert_eq!(matcher.patterns(), ["^/healthz$".to_string()]);
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        assert!(ExclusionMatcher::new(["("]).is_err());
    }
}
