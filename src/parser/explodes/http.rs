use super::socks::split_credentials;
use crate::models::{HttpProxy, Proxy, ProxyType};
use crate::parser::error::Result;
use crate::parser::fields::{default_name, parse_ip_version, parse_port_or_default, DEFAULT_TLS_PORT};
use crate::parser::query::Query;
use crate::parser::scheme::strip_scheme;
use crate::parser::uri::parse_url_like;

const SCHEME: &str = "http";

/// Parse an HTTP/HTTPS proxy link into a Proxy object
///
/// Format: `http(s)://[user:pass@]server[:port][?tls&sni=..][#name]`. TLS is
/// only enabled by an explicit `tls` flag, whichever of the two schemes is
/// used.
pub fn explode_http(link: &str) -> Result<Proxy> {
    let content = strip_scheme(link, &["http", "https"], SCHEME)?;
    let url = parse_url_like(content, SCHEME, None)?;

    let port = parse_port_or_default(url.port.as_deref(), DEFAULT_TLS_PORT);
    let query = Query::parse(url.query.as_deref());
    let (username, password) = split_credentials(url.auth.as_deref());

    let name = url
        .name()
        .unwrap_or_else(|| default_name(ProxyType::Http.label(), &url.host, port));

    Ok(Proxy::Http(HttpProxy {
        name,
        port,
        username,
        password,
        tls: query.flag("tls").filter(|&tls| tls),
        sni: query.string(&["sni", "peer"]),
        skip_cert_verify: query.flag_of(&["skip-cert-verify", "insecure", "allowinsecure"]),
        fingerprint: query.string(&["fingerprint", "fp"]),
        ip_version: parse_ip_version(query.get("ip-version")),
        server: url.host,
    }))
}
