//! `Accept-Language` negotiation against the registry.

use crate::i18n::Locale;

/// One entry of an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange {
    pub tag: String,
    pub quality: f32,
}

/// Parse an `Accept-Language` header value into ranges ordered by quality.
///
/// Entries with `q=0` or an unparsable quality are dropped. Entries with equal
/// quality keep their header order.
pub fn parse_accept_language(header: &str) -> Vec<LanguageRange> {
    let mut ranges: Vec<LanguageRange> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.trim().split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() {
                return None;
            }

            let mut quality = 1.0_f32;
            for param in pieces {
                let param = param.trim();
                if let Some(value) = param.strip_prefix("q=").or_else(|| param.strip_prefix("Q=")) {
                    quality = value.trim().parse().ok()?;
                }
            }

            if !(quality > 0.0 && quality <= 1.0) {
                return None;
            }

            Some(LanguageRange {
                tag: tag.to_string(),
                quality,
            })
        })
        .collect();

    ranges.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    ranges
}

/// Map a single language tag onto a supported locale.
///
/// Exact matches (ignoring case) win. Chinese tags are split by script or
/// region: `zh-Hant`, `zh-HK`, `zh-MO` select Traditional; any other `zh`
/// variant selects Simplified. Otherwise the first enabled locale sharing the
/// primary subtag is chosen (`en-GB` → `en`).
pub fn match_tag(tag: &str) -> Option<Locale> {
    if tag == "*" {
        return None;
    }

    if let Some(locale) = Locale::from_code_ignore_case(tag) {
        return Some(locale);
    }

    let normalized = tag.replace('_', "-").to_ascii_lowercase();
    let mut subtags = normalized.split('-');
    let primary = subtags.next()?;

    if primary == "zh" {
        let traditional = subtags.any(|subtag| matches!(subtag, "hant" | "tw" | "hk" | "mo"));
        let code = if traditional { "zh-TW" } else { "zh-CN" };
        return Locale::from_code(code).ok();
    }

    Locale::all().into_iter().find(|locale| {
        locale
            .code()
            .split('-')
            .next()
            .is_some_and(|p| p.eq_ignore_ascii_case(primary))
    })
}

/// Pick the best supported locale for an `Accept-Language` header.
pub fn negotiate(header: &str) -> Option<Locale> {
    parse_accept_language(header)
        .iter()
        .find_map(|range| match_tag(&range.tag))
}
