//! HTTP server wiring: shared state, router and JSON API handlers.

use crate::config::Config;
use crate::i18n::{CatalogStore, CatalogValidator, Locale, MetricsReport, TranslationMetrics};
use crate::pages;
use crate::routing::{
    locale_layer, CookieSettings, ExclusionMatcher, LocaleResolver, Navigator, Pathnames,
};
use anyhow::{bail, Context, Result};
use axum::{extract::State, middleware::from_fn_with_state, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// State shared by every handler. Immutable after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalogs: Arc<CatalogStore>,
    pub resolver: Arc<LocaleResolver>,
    pub cookie: Arc<CookieSettings>,
}

impl AppState {
    pub fn new(catalogs: CatalogStore, resolver: LocaleResolver, cookie: CookieSettings) -> Self {
        Self {
            catalogs: Arc::new(catalogs),
            resolver: Arc::new(resolver),
            cookie: Arc::new(cookie),
        }
    }

    /// Load catalogs and routing tables described by `config`.
    ///
    /// Fails if any catalog cannot be loaded or the default catalog is not a
    /// superset of the others.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalogs = match &config.messages_dir {
            Some(dir) => CatalogStore::load_from_dir(dir)
                .with_context(|| format!("Failed to load message catalogs from {}", dir.display()))?,
            None => CatalogStore::embedded().context("Failed to load embedded message catalogs")?,
        };

        let report = CatalogValidator::validate(&catalogs);
        report.log();
        if report.has_errors() {
            bail!(
                "Message catalogs failed validation with {} error(s)",
                report.errors.len()
            );
        }

        let pathnames = match &config.pathnames_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let pathnames = Pathnames::from_json(&raw)
                    .with_context(|| format!("Invalid pathname table in {}", path.display()))?;
                pathnames
                    .check_routes(pages::logical_routes())
                    .with_context(|| format!("Pathname table in {} shadows a page", path.display()))?;
                pathnames
            }
            None => Pathnames::new(),
        };

        let matcher = ExclusionMatcher::new(&config.exclude_patterns)
            .context("Invalid LOCALE_EXCLUDE pattern")?;

        let resolver = LocaleResolver::new(
            Navigator::new(pathnames),
            matcher,
            config.unknown_prefix_policy,
            config.known_routes.iter().cloned(),
        );

        let cookie = CookieSettings {
            name: config.cookie_name.clone(),
            max_age: config.cookie_max_age,
        };

        info!(
            policy = %config.unknown_prefix_policy,
            cookie = %cookie.name,
            "Locale routing configured"
        );

        Ok(Self::new(catalogs, resolver, cookie))
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/i18n/locales", get(list_locales))
        .route("/api/i18n/metrics", get(metrics))
        .fallback(pages::render_page)
        .layer(from_fn_with_state(state.clone(), locale_layer))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    locales: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        locales: state.catalogs.catalogs().len(),
    })
}

#[derive(Debug, Serialize)]
struct LocaleEntry {
    code: Locale,
    name: &'static str,
    native_name: &'static str,
    flag: &'static str,
    is_default: bool,
}

async fn list_locales() -> Json<Vec<LocaleEntry>> {
    let locales = Locale::all()
        .into_iter()
        .map(|locale| LocaleEntry {
            code: locale,
            name: locale.name(),
            native_name: locale.native_name(),
            flag: locale.flag(),
            is_default: locale.is_default(),
        })
        .collect();
    Json(locales)
}

async fn metrics() -> Json<MetricsReport> {
    Json(TranslationMetrics::global().report())
}
