use crate::models::{Proxy, ProxyType, Socks5Proxy};
use crate::parser::error::Result;
use crate::parser::fields::{default_name, parse_ip_version, parse_port_or_default};
use crate::parser::query::Query;
use crate::parser::scheme::strip_scheme;
use crate::parser::uri::parse_url_like;
use crate::utils::base64::decode_base64_or_original;
use crate::utils::url::url_decode;

const SCHEME: &str = "socks5";

/// Default SOCKS port
const DEFAULT_PORT: u16 = 1080;

/// Parse a SOCKS5 link into a Proxy object
///
/// Format: `socks5://[user:pass@]server[:port][?tls&skip-cert-verify][#name]`,
/// also accepted under the `socks` scheme. Credentials are optional.
pub fn explode_socks(socks: &str) -> Result<Proxy> {
    let content = strip_scheme(socks, &["socks5", "socks"], SCHEME)?;
    let url = parse_url_like(content, SCHEME, None)?;

    let port = parse_port_or_default(url.port.as_deref(), DEFAULT_PORT);
    let query = Query::parse(url.query.as_deref());
    let (username, password) = split_credentials(url.auth.as_deref());

    let name = url
        .name()
        .unwrap_or_else(|| default_name(ProxyType::Socks5.label(), &url.host, port));

    Ok(Proxy::Socks5(Socks5Proxy {
        name,
        port,
        username,
        password,
        tls: query.flag("tls").filter(|&tls| tls),
        skip_cert_verify: query.flag_of(&["skip-cert-verify", "insecure", "allowinsecure"]),
        fingerprint: query.string(&["fingerprint", "fp"]),
        udp: query.flag("udp"),
        ip_version: parse_ip_version(query.get("ip-version")),
        server: url.host,
    }))
}

/// Splits `user:pass` credentials after percent-decoding. A userinfo
/// without `:` is tried as Base64 of `user:pass` before being taken as a
/// bare user name.
pub(super) fn split_credentials(auth: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(auth) = auth.filter(|a| !a.is_empty()) else {
        return (None, None);
    };
    let mut decoded = url_decode(auth);
    if !decoded.contains(':') {
        let unwrapped = decode_base64_or_original(&decoded);
        if unwrapped.contains(':') {
            decoded = unwrapped;
        }
    }
    let non_empty = |s: &str| Some(s.to_string()).filter(|s| !s.is_empty());
    match decoded.split_once(':') {
        Some((user, pass)) => (non_empty(user), non_empty(pass)),
        None => (non_empty(&decoded), None),
    }
}
