//! Typed field decoders shared by the scheme parsers.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::{ParseError, Result};
use crate::models::IpVersion;

/// Port used by TLS-first schemes when the link omits one.
pub const DEFAULT_TLS_PORT: u16 = 443;

/// Shadowsocks-family ciphers accepted as-is.
const SS_CIPHERS: &[&str] = &[
    "none",
    "auto",
    "dummy",
    "table",
    "rc4",
    "rc4-md5",
    "aes-128-gcm",
    "aes-192-gcm",
    "aes-256-gcm",
    "aes-128-gcm-siv",
    "aes-256-gcm-siv",
    "aes-128-ccm",
    "aes-192-ccm",
    "aes-256-ccm",
    "aes-128-cfb",
    "aes-192-cfb",
    "aes-256-cfb",
    "aes-128-ctr",
    "aes-192-ctr",
    "aes-256-ctr",
    "camellia-128-cfb",
    "camellia-192-cfb",
    "camellia-256-cfb",
    "bf-cfb",
    "salsa20",
    "chacha20",
    "chacha20-ietf",
    "chacha20-ietf-poly1305",
    "chacha8-ietf-poly1305",
    "xchacha20",
    "xchacha20-ietf-poly1305",
    "xchacha8-ietf-poly1305",
    "lea-128-gcm",
    "lea-192-gcm",
    "lea-256-gcm",
    "rabbit128-poly1305",
    "aegis-128l",
    "aegis-256",
    "2022-blake3-aes-128-gcm",
    "2022-blake3-aes-256-gcm",
    "2022-blake3-chacha20-poly1305",
];

/// Alternative spellings mapped to their canonical cipher name.
const SS_CIPHER_ALIASES: &[(&str, &str)] = &[
    ("chacha20-poly1305", "chacha20-ietf-poly1305"),
    ("xchacha20-poly1305", "xchacha20-ietf-poly1305"),
    ("chacha8-poly1305", "chacha8-ietf-poly1305"),
];

const VMESS_CIPHERS: &[&str] = &["auto", "none", "zero", "aes-128-gcm", "chacha20-poly1305"];

lazy_static! {
    static ref FLOW: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{0,63}$").unwrap();
}

/// Parses an optional port, falling back to `default` when it is missing,
/// not a number, or outside `1..=65535`.
pub fn parse_port_or_default(port: Option<&str>, default: u16) -> u16 {
    port.and_then(|p| p.trim().parse::<u16>().ok())
        .filter(|&p| p != 0)
        .unwrap_or(default)
}

/// Parses a port that must be present and within `1..=65535`.
pub fn parse_required_port(port: Option<&str>, scheme: &'static str) -> Result<u16> {
    let raw = port.map(str::trim).unwrap_or_default();
    match raw.parse::<u16>() {
        Ok(p) if p != 0 && raw.bytes().all(|b| b.is_ascii_digit()) => Ok(p),
        _ => Err(ParseError::InvalidPort {
            scheme,
            value: raw.to_string(),
        }),
    }
}

/// Resolves a Shadowsocks/ShadowsocksR cipher name.
///
/// Known aliases are mapped first, then the result is checked against the
/// supported set. Unknown names become `"auto"`, an absent or blank name
/// becomes `"none"`.
pub fn resolve_cipher(cipher: Option<&str>) -> String {
    let cipher = match cipher.map(str::trim).filter(|c| !c.is_empty()) {
        Some(c) => c.to_ascii_lowercase(),
        None => return "none".to_string(),
    };
    let canonical = SS_CIPHER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == cipher)
        .map(|(_, target)| target.to_string())
        .unwrap_or(cipher);
    if SS_CIPHERS.contains(&canonical.as_str()) {
        canonical
    } else {
        "auto".to_string()
    }
}

/// Resolves a VMess security setting; VMess keeps its own names
/// (`chacha20-poly1305` is not rewritten). Unknown or absent means `"auto"`.
pub fn resolve_vmess_cipher(cipher: Option<&str>) -> String {
    cipher
        .map(|c| c.trim().to_ascii_lowercase())
        .filter(|c| VMESS_CIPHERS.contains(&c.as_str()))
        .unwrap_or_else(|| "auto".to_string())
}

pub fn parse_ip_version(value: Option<&str>) -> Option<IpVersion> {
    match value?.trim().to_ascii_lowercase().as_str() {
        "dual" => Some(IpVersion::Dual),
        "ipv4" => Some(IpVersion::Ipv4),
        "ipv6" => Some(IpVersion::Ipv6),
        "ipv4-prefer" => Some(IpVersion::Ipv4Prefer),
        "ipv6-prefer" => Some(IpVersion::Ipv6Prefer),
        _ => None,
    }
}

/// Validates a VLESS flow. `"none"` and anything outside a plain identifier
/// are dropped.
pub fn parse_flow(value: Option<&str>) -> Option<String> {
    let flow = value?.trim();
    if flow.eq_ignore_ascii_case("none") || !FLOW.is_match(flow) {
        return None;
    }
    Some(flow.to_string())
}

/// `"<Label> <server>:<port>"`, used when a link carries no name.
pub fn default_name(label: &str, server: &str, port: u16) -> String {
    format!("{} {}:{}", label, server, port)
}
