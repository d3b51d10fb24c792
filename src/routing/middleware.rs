//! Locale middleware and extractors for Axum.
//!
//! [`locale_layer`] resolves the locale once per request and stores a
//! [`LocaleContext`] as a request extension. Handlers read it back through
//! [`LocalizedRequest`], which also hands them a translator bound to that
//! locale.
//!
//! ```ignore
//! use axum::middleware::from_fn_with_state;
//!
//! let app = Router::new()
//!     .fallback(render_page)
//!     .layer(from_fn_with_state(state.clone(), locale_layer))
//!     .with_state(state);
//! ```

use crate::i18n::{Locale, TranslationMetrics, Translator};
use crate::pages;
use crate::routing::{RequestInfo, Resolution};
use crate::server::AppState;
use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{instrument, warn};

/// Default name of the preference cookie.
pub const DEFAULT_COOKIE_NAME: &str = "NEXT_LOCALE";

/// One year, in seconds.
pub const DEFAULT_COOKIE_MAX_AGE: u64 = 31_536_000;

/// Preference cookie settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSettings {
    pub name: String,
    pub max_age: u64,
}

impl CookieSettings {
    /// `Set-Cookie` value remembering `locale`.
    pub fn header_value(&self, locale: Locale) -> String {
        format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            self.name,
            locale.code(),
            self.max_age
        )
    }
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.to_string(),
            max_age: DEFAULT_COOKIE_MAX_AGE,
        }
    }
}

/// Locale and logical path of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleContext {
    pub locale: Locale,
    pub logical_path: String,
}

/// Locale resolution middleware.
///
/// Excluded paths pass through untouched. Everything else is either served
/// with a [`LocaleContext`] attached, redirected (307) to its canonical
/// prefixed form, or answered with a translated 404. The preference cookie
/// is written on every resolved response.
#[instrument(
    name = "locale_layer",
    skip(state, request, next),
    fields(
        path = %request.uri().path(),
        locale = tracing::field::Empty,
    )
)]
pub async fn locale_layer(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let resolution = {
        let headers = request.headers();
        let cookie = read_cookie(headers, &state.cookie.name);
        let accept_language = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());

        let info = RequestInfo {
            path: request.uri().path(),
            query: request.uri().query(),
            cookie_locale: cookie.as_deref(),
            accept_language,
        };
        state.resolver.resolve(&info)
    };

    if let Some(locale) = resolution.locale() {
        tracing::Span::current().record("locale", tracing::field::display(locale));
    }

    match resolution {
        Resolution::Bypass => next.run(request).await,
        Resolution::Serve {
            locale,
            logical_path,
        } => {
            request.extensions_mut().insert(LocaleContext {
                locale,
                logical_path,
            });
            let mut response = next.run(request).await;
            set_locale_cookie(&mut response, &state, locale);
            response
        }
        Resolution::Redirect { locale, location } => {
            TranslationMetrics::global().record_redirect();
            let mut response = Redirect::temporary(&location).into_response();
            set_locale_cookie(&mut response, &state, locale);
            response
        }
        Resolution::NotFound { locale } => {
            let translator = state.catalogs.resolve_catalog(locale);
            let navigator = state.resolver.navigator();
            let mut response =
                pages::not_found(&translator, navigator, request.uri().path()).into_response();
            set_locale_cookie(&mut response, &state, locale);
            response
        }
    }
}

/// Value of the named cookie, if the request carries it.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| {
            let value = value.trim();
            value
                .strip_prefix('"')
                .and_then(|inner| inner.strip_suffix('"'))
                .unwrap_or(value)
                .to_string()
        })
}

fn set_locale_cookie(response: &mut Response, state: &AppState, locale: Locale) {
    match HeaderValue::from_str(&state.cookie.header_value(locale)) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => warn!(error = %e, cookie = %state.cookie.name, "Invalid locale cookie header"),
    }
}

/// Extractor for the resolved locale, logical path and a translator.
///
/// Rejects with 500 when the locale middleware did not run for this request.
#[derive(Debug, Clone)]
pub struct LocalizedRequest {
    pub locale: Locale,
    pub logical_path: String,
    pub translator: Translator,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for LocalizedRequest {
    type Rejection = StatusCode;

    #[instrument(name = "LocalizedRequest::from_request_parts", skip_all)]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<LocaleContext>()
            .cloned()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

        Ok(LocalizedRequest {
            locale: context.locale,
            translator: state.catalogs.resolve_catalog(context.locale),
            logical_path: context.logical_path,
        })
    }
}
