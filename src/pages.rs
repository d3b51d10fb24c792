//! Translated HTML page shell.
//!
//! Every app section renders the same shell: site navigation, a language
//! switcher with one link per locale, and a translated title and
//! description. All links go through the `Navigator`, so they carry the
//! active locale prefix.

use crate::i18n::{Locale, Translator};
use crate::routing::{LocalizedRequest, Navigator, RouteTemplate};
use crate::server::AppState;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::OnceLock;

struct Page {
    template: &'static str,
    title: &'static str,
    description: Option<&'static str>,
}

const PAGES: &[Page] = &[
    Page { template: "/", title: "home.title", description: Some("home.description") },
    Page { template: "/analysis", title: "analysis.title", description: Some("analysis.description") },
    Page { template: "/analysis/[id]", title: "analysis.resultsTitle", description: Some("analysis.resultsDescription") },
    Page { template: "/knowledge", title: "knowledge.title", description: Some("knowledge.description") },
    Page { template: "/knowledge/articles/[slug]", title: "knowledge.articleTitle", description: Some("knowledge.articleDescription") },
    Page { template: "/counseling", title: "counseling.title", description: Some("counseling.description") },
    Page { template: "/counseling/book/[counselorId]", title: "counseling.bookTitle", description: Some("counseling.bookDescription") },
    Page { template: "/counseling/confirmation/[appointmentId]", title: "counseling.confirmationTitle", description: Some("counseling.confirmationDescription") },
    Page { template: "/community", title: "community.title", description: Some("community.description") },
    Page { template: "/community/post/[postId]", title: "community.postTitle", description: Some("community.postDescription") },
    Page { template: "/privacy", title: "privacy.title", description: Some("privacy.description") },
    Page { template: "/profile", title: "profile.title", description: None },
    Page { template: "/auth/login", title: "auth.loginTitle", description: None },
    Page { template: "/auth/register", title: "auth.registerTitle", description: None },
];

/// (logical path, nav key) for the site navigation bar.
const NAV_LINKS: &[(&str, &str)] = &[
    ("/", "home"),
    ("/analysis", "analysis"),
    ("/knowledge", "knowledge"),
    ("/counseling", "counseling"),
    ("/community", "community"),
    ("/profile", "profile"),
];

/// Logical route templates of every page.
pub fn logical_routes() -> impl Iterator<Item = &'static str> {
    PAGES.iter().map(|page| page.template)
}

static PAGE_TEMPLATES: OnceLock<Vec<(RouteTemplate, &'static Page)>> = OnceLock::new();

fn page_templates() -> &'static [(RouteTemplate, &'static Page)] {
    PAGE_TEMPLATES.get_or_init(|| {
        PAGES
            .iter()
            .map(|page| {
                let template =
                    RouteTemplate::parse(page.template).expect("page templates are valid");
                (template, page)
            })
            .collect()
    })
}

fn find_page(logical_path: &str) -> Option<(&'static Page, HashMap<String, String>)> {
    page_templates()
        .iter()
        .find_map(|(template, page)| template.matches(logical_path).map(|params| (*page, params)))
}

/// Fallback handler rendering the page for the request's logical path.
///
/// Requests that never went through locale resolution (excluded paths with
/// no route) get a plain 404.
pub async fn render_page(
    State(state): State<AppState>,
    localized: Option<LocalizedRequest>,
    uri: Uri,
) -> Response {
    let Some(request) = localized else {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };

    let navigator = state.resolver.navigator();
    let current = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let Some((page, params)) = find_page(&request.logical_path) else {
        return not_found(&request.translator, navigator, current).into_response();
    };

    let t = &request.translator;
    let args: Vec<(&str, &str)> = params
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();

    let title = t.t(page.title);
    let description = page.description.map(|key| t.t_fmt(key, &args));

    Html(render_shell(
        t,
        navigator,
        current,
        &title,
        description.as_deref(),
    ))
    .into_response()
}

/// Translated 404 page for `path`.
pub fn not_found(translator: &Translator, navigator: &Navigator, path: &str) -> (StatusCode, Html<String>) {
    let title = translator.t("errors.notFoundTitle");
    let description = translator.t_fmt("errors.notFoundDescription", &[("path", path)]);
    (
        StatusCode::NOT_FOUND,
        Html(render_shell(translator, navigator, path, &title, Some(&description))),
    )
}

fn render_shell(
    t: &Translator,
    navigator: &Navigator,
    current: &str,
    title: &str,
    description: Option<&str>,
) -> String {
    let locale = t.locale();
    let nav = t.namespace("nav");

    let nav_links: String = NAV_LINKS
        .iter()
        .map(|(path, key)| {
            format!(
                r#"<a href="{}">{}</a>"#,
                escape_html(&navigator.to_prefixed(path, locale)),
                escape_html(&nav.t(key))
            )
        })
        .collect();

    let switcher = language_switcher(navigator, current, locale);

    let mut html = String::with_capacity(2048);
    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!(r#"<html lang="{}">"#, locale.code()));
    html.push_str(r#"<head><meta charset="utf-8">"#);
    html.push_str(&format!(
        "<title>{} | {}</title>",
        escape_html(title),
        escape_html(&t.t("meta.siteName"))
    ));
    html.push_str(&format!(
        r#"<meta name="description" content="{}">"#,
        escape_html(&t.t("meta.description"))
    ));
    html.push_str("</head><body><header>");
    html.push_str(&format!(r#"<nav class="site-nav">{}</nav>"#, nav_links));
    html.push_str(&format!(
        r#"<nav class="language-switcher" aria-label="{}">{}</nav>"#,
        escape_html(&nav.t("language")),
        switcher
    ));
    html.push_str("</header><main>");
    html.push_str(&format!("<h1>{}</h1>", escape_html(title)));
    if let Some(description) = description {
        html.push_str(&format!("<p>{}</p>", escape_html(description)));
    }
    html.push_str(&format!(
        r#"<a class="back" href="{}">{}</a>"#,
        escape_html(&navigator.to_prefixed("/", locale)),
        escape_html(&t.t("common.back"))
    ));
    html.push_str("</main>");
    html.push_str(&format!("<footer>{}</footer>", escape_html(&t.t("footer.tagline"))));
    html.push_str("</body></html>");
    html
}

/// One link per locale, each pointing at the current page in that locale.
fn language_switcher(navigator: &Navigator, current: &str, active: Locale) -> String {
    Locale::all()
        .into_iter()
        .map(|locale| {
            let href = navigator.switch_locale_to(current, locale);
            let marker = if locale == active { r#" aria-current="true""# } else { "" };
            format!(
                r#"<a href="{}" hreflang="{code}" lang="{code}"{}>{} {}</a>"#,
                escape_html(&href),
                marker,
                locale.flag(),
                escape_html(locale.native_name()),
                code = locale.code(),
            )
        })
        .collect()
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 16);

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }

    result
}
