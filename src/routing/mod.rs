//! Locale-prefixed routing.
//!
//! # Architecture
//!
//! - `path`: Path normalization helpers
//! - `template`: `[param]` route templates
//! - `pathnames`: Optional per-locale slugs for logical routes
//! - `navigation`: `to_prefixed`, `from_prefixed`, `switch_locale`
//! - `matcher`: Paths that skip locale handling
//! - `resolver`: Pure per-request locale decision
//! - `middleware`: Axum layer and extractors built on the resolver

pub mod path;

mod matcher;
mod middleware;
mod navigation;
mod pathnames;
mod resolver;
mod template;

pub use matcher::{ExclusionMatcher, DEFAULT_EXCLUSIONS};
pub use middleware::{
    locale_layer, read_cookie, CookieSettings, LocaleContext, LocalizedRequest,
    DEFAULT_COOKIE_MAX_AGE, DEFAULT_COOKIE_NAME,
};
pub use navigation::Navigator;
pub use pathnames::Pathnames;
pub use resolver::{
    LocaleResolver, RequestInfo, Resolution, UnknownPrefixPolicy, DEFAULT_KNOWN_ROUTES,
};
pub use template::RouteTemplate;
