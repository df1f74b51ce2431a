//! Text normalization shared by every index adapter.
//!
//! The client-side search does plain substring matching on `searchText`, so
//! everything it can match must go through [`normalize`] first.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use sitesearch_shared::Locale;

/// Lowercase, diacritic-free, punctuation-free form of `text`.
///
/// Turkish dotless `ı` is mapped to `i` before decomposition because NFKD
/// leaves it untouched. Output only contains `[a-z0-9 -]` with single spaces.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase().replace('ı', "i");

    let folded: String = lowered
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join the non-empty parts with a space and normalize the result once.
pub fn build_search_text<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = parts
        .into_iter()
        .filter(|part| !part.as_ref().trim().is_empty())
        .map(|part| part.as_ref().trim().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    normalize(&joined)
}

/// Trim, drop blanks, and drop repeats (first occurrence wins).
pub fn dedupe<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let value = value.as_ref().trim();
        if value.is_empty() || out.iter().any(|seen| seen == value) {
            continue;
        }
        out.push(value.to_string());
    }
    out
}

/// Prefix a site-relative path with `/<locale>` unless it already has it.
pub fn localize_href(locale: Locale, href: &str) -> String {
    let prefix = format!("/{locale}");
    let path = href.trim();

    if path == prefix
        || path.starts_with(&format!("{prefix}/"))
        || path.starts_with(&format!("{prefix}#"))
    {
        return path.to_string();
    }

    match path {
        "" | "/" => prefix,
        p if p.starts_with('/') => format!("{prefix}{p}"),
        p => format!("{prefix}/{p}"),
    }
}
