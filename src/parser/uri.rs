//! Generic decomposition of `auth@host:port/path?query#fragment` shaped links.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::{ParseError, Result};
use crate::utils::url::{strip_brackets, url_decode};

lazy_static! {
    static ref URL_LIKE: Regex = Regex::new(
        r"^(?:(?P<auth>[^?#]*)@)?(?P<host>[^/?#]*?)(?::(?P<port>[0-9]+))?(?P<path>/[^?#]*)?(?:\?(?P<query>[^#]*))?(?:#(?P<fragment>.*))?$"
    )
    .unwrap();
}

/// The pieces of a scheme-stripped link. Every part is raw (still
/// percent-encoded) except `host`, which has IPv6 brackets removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlLike {
    pub auth: Option<String>,
    pub host: String,
    pub port: Option<String>,
    /// Path with its leading `/`; a bare `/` counts as no path.
    pub path: Option<String>,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl UrlLike {
    /// The percent-decoded fragment, trimmed; `None` when blank.
    pub fn name(&self) -> Option<String> {
        decode_name(self.fragment.as_deref())
    }

    /// The percent-decoded auth segment; `None` when absent or empty.
    pub fn decoded_auth(&self) -> Option<String> {
        self.auth
            .as_deref()
            .filter(|a| !a.is_empty())
            .map(url_decode)
    }
}

/// Splits `input` into its URL-like parts.
///
/// With `auth_required` set to a field name, a missing or empty auth segment
/// is a [`ParseError::MissingField`] naming that field. A blank host is
/// always an error.
pub fn parse_url_like(
    input: &str,
    scheme: &'static str,
    auth_required: Option<&'static str>,
) -> Result<UrlLike> {
    let caps = URL_LIKE
        .captures(input.trim())
        .ok_or_else(|| ParseError::invalid(scheme))?;
    let text = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

    let parsed = UrlLike {
        auth: text("auth"),
        host: strip_brackets(caps.name("host").map_or("", |m| m.as_str())).to_string(),
        port: text("port"),
        path: text("path").filter(|p| p != "/"),
        query: text("query"),
        fragment: text("fragment"),
    };

    if let Some(field) = auth_required {
        if parsed.auth.as_deref().map_or(true, str::is_empty) {
            return Err(ParseError::missing(scheme, field));
        }
    }
    if parsed.host.trim().is_empty() {
        return Err(ParseError::invalid(scheme));
    }
    Ok(parsed)
}

/// Percent-decodes and trims a display name, dropping it when blank.
pub fn decode_name(raw: Option<&str>) -> Option<String> {
    raw.map(|r| url_decode(r).trim().to_string())
        .filter(|n| !n.is_empty())
}
