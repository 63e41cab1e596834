use crate::models::{AnyTlsProxy, Proxy, ProxyType};
use crate::parser::error::Result;
use crate::parser::fields::{default_name, parse_port_or_default, DEFAULT_TLS_PORT};
use crate::parser::query::Query;
use crate::parser::scheme::strip_scheme;
use crate::parser::uri::parse_url_like;

const SCHEME: &str = "anytls";

/// Parse an AnyTLS link into a Proxy object
///
/// Format: `anytls://password@server[:port][?sni=..&insecure=1][#name]`
pub fn explode_anytls(anytls: &str) -> Result<Proxy> {
    let content = strip_scheme(anytls, &[SCHEME], SCHEME)?;
    let url = parse_url_like(content, SCHEME, Some("password"))?;

    let password = url.decoded_auth().unwrap_or_default();
    let port = parse_port_or_default(url.port.as_deref(), DEFAULT_TLS_PORT);
    let query = Query::parse(url.query.as_deref());

    let name = url
        .name()
        .unwrap_or_else(|| default_name(ProxyType::AnyTls.label(), &url.host, port));

    Ok(Proxy::AnyTls(AnyTlsProxy {
        name,
        port,
        password,
        sni: query.string(&["sni", "peer"]),
        alpn: query.list("alpn"),
        skip_cert_verify: query.flag_of(&["insecure", "skip-cert-verify", "allowinsecure"]),
        client_fingerprint: query.string(&["fp", "client-fingerprint"]),
        udp: query.flag("udp"),
        idle_session_check_interval: query.int("idle-session-check-interval"),
        idle_session_timeout: query.int("idle-session-timeout"),
        min_idle_session: query.int("min-idle-session"),
        server: url.host,
    }))
}
