//! Query-string tokenizing with hyphenated key normalization.

use std::collections::HashMap;
use std::str::FromStr;

use crate::utils::url::url_decode;

/// Parsed query parameters of a share link.
///
/// Keys are lower-cased and have every `_` replaced by `-` (so
/// `Skip_Cert_Verify` and `skip-cert-verify` are the same key); values are percent-decoded. A bare
/// key without `=` is stored with no value. When a key repeats, the last
/// occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: HashMap<String, Option<String>>,
}

impl Query {
    pub fn parse(query: Option<&str>) -> Self {
        let mut params = HashMap::new();
        for part in query.unwrap_or_default().split('&') {
            if part.is_empty() {
                continue;
            }
            let (key, value) = match part.split_once('=') {
                Some((k, v)) => (k, Some(url_decode(v))),
                None => (part, None),
            };
            params.insert(normalize_key(key), value);
        }
        Query { params }
    }

    /// Whether `key` appears at all, with or without a value.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// The raw value of `key`, if it has one.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(|v| v.as_deref())
    }

    /// The value of `key` when it is not blank.
    pub fn non_blank(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    /// The first non-blank value among `keys`, in order.
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.non_blank(key))
    }

    /// Owned copy of the first non-blank value among `keys`.
    pub fn string(&self, keys: &[&str]) -> Option<String> {
        self.first_of(keys).map(str::to_string)
    }

    /// Strict boolean: `true`/`1` and `false`/`0` (case-insensitive).
    /// Anything else, including a bare key, is `None`.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(parse_bool)
    }

    /// Boolean with presence semantics: a bare key counts as `true`.
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.params.get(key) {
            Some(None) => Some(true),
            Some(Some(v)) if v.is_empty() => Some(true),
            Some(Some(v)) => parse_bool(v),
            None => None,
        }
    }

    /// The first key among `keys` that yields a flag value.
    pub fn flag_of(&self, keys: &[&str]) -> Option<bool> {
        keys.iter().find_map(|key| self.flag(key))
    }

    /// Strict integer: the whole value must be ASCII digits that fit `T`.
    pub fn int<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(parse_int)
    }

    /// The first key among `keys` that yields an integer.
    pub fn int_of<T: FromStr>(&self, keys: &[&str]) -> Option<T> {
        keys.iter().find_map(|key| self.int(key))
    }

    /// Comma-separated list, trimmed, without empty items. `None` when the
    /// key is absent or the list is empty.
    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).and_then(split_list)
    }
}

/// Lower-cases a query key and replaces `_` with `-`.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace('_', "-")
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

pub fn parse_int<T: FromStr>(value: &str) -> Option<T> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

pub fn split_list(value: &str) -> Option<Vec<String>> {
    let items: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
