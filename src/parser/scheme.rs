//! Scheme detection for raw share links.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::{ParseError, Result};

lazy_static! {
    static ref SCHEME: Regex = Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*)://").unwrap();
}

/// A link whose scheme token has been case-folded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLink {
    /// Lower-case scheme, or a best-effort guess for malformed input.
    pub scheme: String,
    /// The trimmed link with only the scheme token lower-cased.
    pub link: String,
}

/// Trims `link` and lower-cases its leading `scheme://` token.
///
/// When no well-formed scheme is found, the text before the first `://` (or
/// the whole trimmed input when there is none) is taken as the scheme. Such a
/// guess is not guaranteed to name a known scheme.
pub fn normalize_scheme(link: &str) -> NormalizedLink {
    let link = link.trim();
    if let Some(caps) = SCHEME.captures(link) {
        let scheme = caps[1].to_ascii_lowercase();
        let rest = &link[caps[0].len()..];
        return NormalizedLink {
            link: format!("{}://{}", scheme, rest),
            scheme,
        };
    }
    let scheme = link.split("://").next().unwrap_or_default().to_string();
    NormalizedLink {
        scheme,
        link: link.to_string(),
    }
}

/// Strips `<scheme>://` from `link` for any of `schemes` (compared
/// case-insensitively) and returns the remainder.
pub fn strip_scheme<'a>(
    link: &'a str,
    schemes: &[&str],
    scheme_name: &'static str,
) -> Result<&'a str> {
    let link = link.trim();
    let (head, rest) = link
        .split_once("://")
        .ok_or_else(|| ParseError::invalid(scheme_name))?;
    if schemes.iter().any(|s| s.eq_ignore_ascii_case(head)) {
        Ok(rest)
    } else {
        Err(ParseError::invalid(scheme_name))
    }
}
