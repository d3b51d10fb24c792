//! Route templates with `[param]` segments, e.g. `/counseling/book/[counselorId]`.

use crate::i18n::I18nError;
use crate::routing::path::normalize;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A parsed route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl RouteTemplate {
    /// Parse a template. Parameter names must be unique and non-empty.
    pub fn parse(template: &str) -> Result<Self, I18nError> {
        let source = normalize(template);
        let invalid = |reason: &str| I18nError::InvalidPathname {
            path: template.to_string(),
            reason: reason.to_string(),
        };

        let mut seen = BTreeSet::new();
        let mut segments = Vec::new();
        for raw in source.split('/').filter(|s| !s.is_empty()) {
            if let Some(inner) = raw.strip_prefix('[') {
                let name = inner
                    .strip_suffix(']')
                    .ok_or_else(|| invalid("unterminated parameter"))?;
                if name.is_empty() || name.contains(['[', ']']) {
                    return Err(invalid("invalid parameter name"));
                }
                if !seen.insert(name.to_string()) {
                    return Err(invalid("duplicate parameter"));
                }
                segments.push(Segment::Param(name.to_string()));
            } else if raw.contains(['[', ']']) {
                return Err(invalid("brackets must enclose a whole segment"));
            } else {
                segments.push(Segment::Static(raw.to_string()));
            }
        }

        Ok(Self { source, segments })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Names of all parameters in this template.
    pub fn params(&self) -> BTreeSet<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Static(_) => None,
            })
            .collect()
    }

    /// Match a normalized path, returning captured parameters.
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) if expected == part => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(params)
    }

    /// True if some concrete path could match both templates.
    pub fn overlaps(&self, other: &RouteTemplate) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| match (a, b) {
                    (Segment::Static(x), Segment::Static(y)) => x == y,
                    _ => true,
                })
    }

    /// Fill in parameters. Missing parameters render as `[name]`.
    pub fn render(&self, params: &HashMap<String, String>) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }

        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Static(text) => out.push_str(text),
                Segment::Param(name) => match params.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('[');
                        out.push_str(name);
                        out.push(']');
                    }
                },
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_match() {
        let template = RouteTemplate::parse("/counseling/book/[counselorId]").unwrap();
        let params = template.matches("/counseling/book/7").expect("Should match");
        assert_eq!(params.get("counselorId").map(String::as_str), Some("7"));
        assert!(template.matches("/counseling/book").is_none());
        assert!(template.matches("/counseling/cancel/7").is_none());
    }

    #[test]
    fn test_root_template() {
        let template = RouteTemplate::parse("/").unwrap();
        assert!(template.matches("/").is_some());
        assert_eq!(template.render(&HashMap::new()), "/");
    }

    #[test]
    fn test_render() {
        let template = RouteTemplate::parse("/knowledge/articles/[slug]").unwrap();
        let params = HashMap::from([("slug".to_string(), "anxiety".to_string())]);
        assert_eq!(template.render(&params), "/knowledge/articles/anxiety");
        assert_eq!(template.render(&HashMap::new()), "/knowledge/articles/[slug]");
    }

    #[test]
    fn test_params() {
        let template = RouteTemplate::parse("/a/[x]/b/[y]").unwrap();
        assert_eq!(template.params(), BTreeSet::from(["x", "y"]));
    }

    #[test]
    fn test_parse_rejects_bad_templates() {
        assert!(RouteTemplate::parse("/a/[x").is_err());
        assert!(RouteTemplate::parse("/a/[]").is_err());
        assert!(RouteTemplate::parse("/a/[x]/[x]").is_err());
        assert!(RouteTemplate::parse("/a/b[x]").is_err());
    }

    #[test]
    fn test_overlaps() {
        let parse = |s: &str| RouteTemplate::parse(s).unwrap();
        assert!(parse("/community").overlaps(&parse("/community")));
        assert!(parse("/post/[id]").overlaps(&parse("/post/7")));
        assert!(parse("/[a]/x").overlaps(&parse("/y/[b]")));
        assert!(!parse("/post/[id]").overlaps(&parse("/post")));
        assert!(!parse("/yinsi").overlaps(&parse("/privacy")));
        assert!(parse("/").overlaps(&parse("/")));
    }

    #[test]
    fn test_parse_normalizes_source() {
        let template = RouteTemplate::parse("about//team/").unwrap();
        assert_eq!(template.as_str(), "/about/team");
    }
}
