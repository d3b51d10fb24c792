//! Locale resolution for incoming requests.
//!
//! `LocaleResolver::resolve` is a pure function of the request path, query,
//! preference cookie and `Accept-Language` header. The HTTP middleware turns
//! its `Resolution` into a response.

use crate::i18n::{negotiate, Locale};
use crate::routing::path::{first_segment, with_query};
use crate::routing::{ExclusionMatcher, Navigator};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Top-level route segments of the application.
pub const DEFAULT_KNOWN_ROUTES: &[&str] = &[
    "analysis",
    "auth",
    "community",
    "counseling",
    "knowledge",
    "privacy",
    "profile",
];

/// What to do with a first path segment that is not a supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownPrefixPolicy {
    /// Treat the segment as part of the logical path and redirect to it
    /// under the preferred locale.
    #[default]
    Redirect,
    /// Respond 404 unless the segment is a known top-level route.
    NotFound,
}

impl FromStr for UnknownPrefixPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redirect" => Ok(UnknownPrefixPolicy::Redirect),
            "not_found" | "notfound" | "404" => Ok(UnknownPrefixPolicy::NotFound),
            other => Err(format!(
                "Unknown prefix policy '{}' (expected 'redirect' or 'not_found')",
                other
            )),
        }
    }
}

impl fmt::Display for UnknownPrefixPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownPrefixPolicy::Redirect => write!(f, "redirect"),
            UnknownPrefixPolicy::NotFound => write!(f, "not_found"),
        }
    }
}

/// The parts of a request the resolver looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestInfo<'a> {
    pub path: &'a str,
    /// Raw query string without the leading `?`
    pub query: Option<&'a str>,
    pub cookie_locale: Option<&'a str>,
    pub accept_language: Option<&'a str>,
}

/// Outcome of resolving one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Excluded path, pass through untouched.
    Bypass,
    /// Canonical prefixed path, serve it.
    Serve { locale: Locale, logical_path: String },
    /// Redirect to `location` (path plus query).
    Redirect { locale: Locale, location: String },
    /// Unknown first segment under `UnknownPrefixPolicy::NotFound`.
    NotFound { locale: Locale },
}

impl Resolution {
    /// Locale to remember in the preference cookie, if any.
    pub fn locale(&self) -> Option<Locale> {
        match self {
            Resolution::Bypass => None,
            Resolution::Serve { locale, .. }
            | Resolution::Redirect { locale, .. }
            | Resolution::NotFound { locale } => Some(*locale),
        }
    }
}

/// Chooses the locale for each request and enforces canonical URLs.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    navigator: Navigator,
    matcher: ExclusionMatcher,
    policy: UnknownPrefixPolicy,
    known_routes: HashSet<String>,
}

impl LocaleResolver {
    pub fn new<I, S>(
        navigator: Navigator,
        matcher: ExclusionMatcher,
        policy: UnknownPrefixPolicy,
        known_routes: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            navigator,
            matcher,
            policy,
            known_routes: known_routes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn policy(&self) -> UnknownPrefixPolicy {
        self.policy
    }

    /// Resolve a request.
    pub fn resolve(&self, request: &RequestInfo<'_>) -> Resolution {
        let path = request.path;

        if self.matcher.is_excluded(path) {
            debug!(path, "Excluded path, bypassing locale resolution");
            return Resolution::Bypass;
        }

        if !path.starts_with('/') {
            let locale = Locale::default_locale();
            debug!(path, "Malformed path, redirecting to default root");
            return Resolution::Redirect {
                locale,
                location: self.navigator.to_prefixed("/", locale),
            };
        }

        let Some((segment, rest)) = first_segment(path) else {
            let locale = self.preferred_locale(request);
            return self.redirect(request, "/", locale);
        };

        if let Some((locale, logical_path)) = self.navigator.split_prefix(path) {
            let canonical = self.navigator.to_prefixed(&logical_path, locale);
            let root_alias = logical_path == "/" && path == canonical.trim_end_matches('/');
            if path != canonical && !root_alias {
                debug!(path, canonical = %canonical, "Non-canonical prefixed path");
                return self.redirect(request, &logical_path, locale);
            }
            debug!(path, locale = %locale, logical_path = %logical_path, "Serving prefixed path");
            return Resolution::Serve {
                locale,
                logical_path,
            };
        }

        if let Some(locale) = Locale::from_code_ignore_case(segment) {
            let (_, logical_path) = self
                .navigator
                .from_prefixed(&format!("/{}{}", locale.code(), rest));
            debug!(path, locale = %locale, "Locale segment with wrong casing");
            return self.redirect(request, &logical_path, locale);
        }

        let locale = self.preferred_locale(request);
        if self.policy == UnknownPrefixPolicy::NotFound && !self.known_routes.contains(segment) {
            debug!(path, segment, "Unknown first segment, not found");
            return Resolution::NotFound { locale };
        }

        self.redirect(request, path, locale)
    }

    /// Locale for an unprefixed request: cookie, then `Accept-Language`,
    /// then the default.
    pub fn preferred_locale(&self, request: &RequestInfo<'_>) -> Locale {
        if let Some(locale) = request
            .cookie_locale
            .and_then(|code| Locale::from_code(code.trim()).ok())
        {
            debug!(locale = %locale, "Locale from preference cookie");
            return locale;
        }

        if let Some(locale) = request.accept_language.and_then(negotiate) {
            debug!(locale = %locale, "Locale from Accept-Language");
            return locale;
        }

        Locale::default_locale()
    }

    fn redirect(&self, request: &RequestInfo<'_>, logical_path: &str, locale: Locale) -> Resolution {
        let target = self.navigator.to_prefixed(logical_path, locale);
        let location = with_query(&target, request.query);
        debug!(from = request.path, to = %location, "Redirecting to prefixed path");
        Resolution::Redirect { locale, location }
    }
}

impl Default for LocaleResolver {
    fn default() -> Self {
        Self::new(
            Navigator::default(),
            ExclusionMatcher::default(),
            UnknownPrefixPolicy::default(),
            DEFAULT_KNOWN_ROUTES.iter().copied(),
        )
    }
}
