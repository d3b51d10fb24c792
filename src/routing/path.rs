//! Small path utilities shared by navigation and resolution.

/// Normalize a logical path: leading `/`, no empty segments, no trailing
/// slash. The empty path and `/` both normalize to `/`.
pub fn normalize(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Split `/a/b?x=1#top` into (`/a/b`, `?x=1#top`). The suffix keeps its
/// leading `?` or `#` and is empty when absent.
pub fn split_suffix(url: &str) -> (&str, &str) {
    match url.find(['?', '#']) {
        Some(index) => url.split_at(index),
        None => (url, ""),
    }
}

/// First non-empty segment of a path and the remainder after it.
///
/// `/zh-CN/knowledge` → `("zh-CN", "/knowledge")`; `/` → `None`.
pub fn first_segment(path: &str) -> Option<(&str, &str)> {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.find('/') {
        Some(index) => Some((&trimmed[..index], &trimmed[index..])),
        None => Some((trimmed, "")),
    }
}

/// Append a raw query string (without `?`) to a path.
pub fn with_query(path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{path}?{query}"),
        _ => path.to_string(),
    }
}
