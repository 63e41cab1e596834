use std::net::IpAddr;

use crate::models::{Proxy, ProxyType, WireGuardProxy};
use crate::parser::error::{ParseError, Result};
use crate::parser::fields::{default_name, parse_port_or_default};
use crate::parser::query::{parse_int, Query};
use crate::parser::scheme::strip_scheme;
use crate::parser::uri::parse_url_like;
use crate::utils::url::strip_brackets;

const SCHEME: &str = "wireguard";

/// Default WireGuard listen port
const DEFAULT_PORT: u16 = 51820;

/// Parse a WireGuard link into a Proxy object
///
/// Format: `wireguard://privatekey@server[:port]?publickey=..&address=10.0.0.2/32,fd00::2/128#name`,
/// also accepted under the `wg` scheme. The private key may be given as the
/// `private-key` query parameter instead of the userinfo.
pub fn explode_wireguard(wireguard: &str) -> Result<Proxy> {
    let content = strip_scheme(wireguard, &["wireguard", "wg"], SCHEME)?;
    let url = parse_url_like(content, SCHEME, None)?;

    let port = parse_port_or_default(url.port.as_deref(), DEFAULT_PORT);
    let query = Query::parse(url.query.as_deref());

    let private_key = url
        .decoded_auth()
        .or_else(|| query.string(&["private-key", "privatekey"]))
        .ok_or_else(|| ParseError::missing(SCHEME, "private-key"))?;

    // Split interface addresses by family
    let (ip, ipv6) = query
        .first_of(&["address", "ip"])
        .map(classify_addresses)
        .unwrap_or_default();

    let name = url
        .name()
        .unwrap_or_else(|| default_name(ProxyType::WireGuard.label(), &url.host, port));

    Ok(Proxy::WireGuard(WireGuardProxy {
        name,
        port,
        private_key,
        public_key: query.string(&["public-key", "publickey"]),
        pre_shared_key: query.string(&["pre-shared-key", "presharedkey"]),
        ip,
        ipv6,
        allowed_ips: query.list("allowed-ips"),
        reserved: query.get("reserved").and_then(parse_reserved),
        mtu: query.int("mtu"),
        dns: query.list("dns"),
        remote_dns_resolve: query.flag("remote-dns-resolve"),
        dialer_proxy: query.string(&["dialer-proxy"]),
        udp: query.flag("udp").unwrap_or(true),
        server: url.host,
    }))
}

/// Returns the first IPv4 and the first IPv6 address among the
/// comma-separated tokens. CIDR suffixes and brackets are stripped and the
/// address is kept as written; unparseable tokens are skipped.
fn classify_addresses(value: &str) -> (Option<String>, Option<String>) {
    let mut ip = None;
    let mut ipv6 = None;
    for token in value.split(',') {
        let token = token.trim();
        let addr = token.split('/').next().unwrap_or_default();
        let addr = strip_brackets(addr.trim());
        match addr.parse::<IpAddr>() {
            Ok(IpAddr::V4(_)) if ip.is_none() => ip = Some(addr.to_string()),
            Ok(IpAddr::V6(_)) if ipv6.is_none() => ipv6 = Some(addr.to_string()),
            _ => {}
        }
    }
    (ip, ipv6)
}

/// `reserved` must be exactly three byte values; anything else is dropped
/// as a whole.
fn parse_reserved(value: &str) -> Option<[u8; 3]> {
    let bytes: Vec<u8> = value
        .split(',')
        .map(|b| parse_int::<u8>(b))
        .collect::<Option<Vec<u8>>>()?;
    bytes.try_into().ok()
}
