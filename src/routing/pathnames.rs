//! Localized pathname table.
//!
//! Maps a logical route to a per-locale slug, so that `/about` can be served
//! as `/zh-CN/guanyu`. Loaded from JSON shaped like
//!
//! ```json
//! {
//!   "/privacy": { "zh-CN": "/yinsi", "zh-TW": "/yinsi" },
//!   "/knowledge/articles/[slug]": { "zh-CN": "/zhishi/wenzhang/[slug]" }
//! }
//! ```
//!
//! A plain string value applies the same slug to every locale. Locales not
//! listed for an entry use the logical path unchanged.

use crate::i18n::{I18nError, Locale};
use crate::routing::RouteTemplate;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct PathnameEntry {
    logical: RouteTemplate,
    localized: HashMap<Locale, RouteTemplate>,
}

/// Table of localized pathnames. Empty by default.
#[derive(Debug, Clone, Default)]
pub struct Pathnames {
    entries: Vec<PathnameEntry>,
}

impl Pathnames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a logical route and its localized forms.
    ///
    /// The mapping must stay reversible:
    /// - each localized template uses exactly the parameters of the logical one
    /// - a localized template may not overlap any other route's logical path
    /// - two logical routes may not share a localized path in one locale
    pub fn insert(&mut self, logical: &str, localized: &[(Locale, &str)]) -> Result<(), I18nError> {
        let logical = RouteTemplate::parse(logical)?;
        let invalid = |path: &RouteTemplate, reason: String| I18nError::InvalidPathname {
            path: path.as_str().to_string(),
            reason,
        };

        for entry in &self.entries {
            if entry.logical.overlaps(&logical) {
                return Err(invalid(&logical, "duplicate logical route".to_string()));
            }
            if let Some(taken) = entry
                .localized
                .values()
                .find(|template| template.overlaps(&logical))
            {
                return Err(invalid(
                    &logical,
                    format!("already used as the localized path of '{}'", taken.as_str()),
                ));
            }
        }

        let mut map = HashMap::new();
        for (locale, template) in localized {
            let template = RouteTemplate::parse(template)?;
            if template.params() != logical.params() {
                return Err(invalid(
                    &template,
                    format!("parameters must match '{}'", logical.as_str()),
                ));
            }
            if template.overlaps(&logical) && template != logical {
                return Err(invalid(
                    &template,
                    format!("ambiguous with its own logical route '{}'", logical.as_str()),
                ));
            }

            for entry in &self.entries {
                if template.overlaps(&entry.logical) {
                    return Err(invalid(
                        &template,
                        format!("collides with logical route '{}'", entry.logical.as_str()),
                    ));
                }
                if entry
                    .localized
                    .get(locale)
                    .is_some_and(|taken| taken.overlaps(&template))
                {
                    return Err(invalid(
                        &template,
                        format!(
                            "already mapped to '{}' for '{}'",
                            entry.logical.as_str(),
                            locale
                        ),
                    ));
                }
            }
            map.insert(*locale, template);
        }

        self.entries.push(PathnameEntry {
            logical,
            localized: map,
        });
        Ok(())
    }

    /// Check the table against the application's logical routes.
    ///
    /// A localized path that overlaps some other route would make that route
    /// unreachable in the locale.
    pub fn check_routes<'a, I>(&self, routes: I) -> Result<(), I18nError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for route in routes {
            let route = RouteTemplate::parse(route)?;
            for entry in &self.entries {
                if entry.logical.overlaps(&route) {
                    continue;
                }
                for (locale, template) in &entry.localized {
                    if template.overlaps(&route) {
                        return Err(I18nError::InvalidPathname {
                            path: template.as_str().to_string(),
                            reason: format!(
                                "'{}' for '{}' collides with route '{}'",
                                entry.logical.as_str(),
                                locale,
                                route.as_str()
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Parse a pathname table from JSON.
    pub fn from_json(raw: &str) -> Result<Self, I18nError> {
        let invalid = |path: &str, reason: &str| I18nError::InvalidPathname {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let value: Value =
            serde_json::from_str(raw).map_err(|e| invalid("<pathnames>", &e.to_string()))?;
        let Value::Object(table) = value else {
            return Err(invalid("<pathnames>", "top level must be an object"));
        };

        let mut pathnames = Pathnames::new();
        for (logical, entry) in &table {
            let localized: Vec<(Locale, &str)> = match entry {
                Value::String(slug) => Locale::all()
                    .into_iter()
                    .map(|locale| (locale, slug.as_str()))
                    .collect(),
                Value::Object(per_locale) => per_locale
                    .iter()
                    .map(|(code, slug)| {
                        let locale = Locale::from_code(code)?;
                        let slug = slug
                            .as_str()
                            .ok_or_else(|| invalid(logical, "localized path must be a string"))?;
                        Ok((locale, slug))
                    })
                    .collect::<Result<_, I18nError>>()?,
                _ => return Err(invalid(logical, "expected a string or an object")),
            };
            pathnames.insert(logical, &localized)?;
        }

        Ok(pathnames)
    }

    /// Localized form of a normalized logical path, if an entry covers it.
    pub fn localize(&self, logical: &str, locale: Locale) -> Option<String> {
        self.entries.iter().find_map(|entry| {
            let params = entry.logical.matches(logical)?;
            let template = entry.localized.get(&locale)?;
            Some(template.render(&params))
        })
    }

    /// Logical form of a normalized localized path, if an entry covers it.
    pub fn delocalize(&self, localized: &str, locale: Locale) -> Option<String> {
        self.entries.iter().find_map(|entry| {
            let template = entry.localized.get(&locale)?;
            let params = template.matches(localized)?;
            Some(entry.logical.render(&params))
        })
    }
}
