use super::transport::transport_from_query;
use crate::models::{Proxy, ProxyType, TrojanProxy};
use crate::parser::error::Result;
use crate::parser::fields::{default_name, parse_port_or_default, DEFAULT_TLS_PORT};
use crate::parser::query::Query;
use crate::parser::scheme::strip_scheme;
use crate::parser::uri::parse_url_like;

const SCHEME: &str = "trojan";

/// Parse a Trojan link into a Proxy object
///
/// Format: `trojan://password@server[:port][?query][#name]`. The password is
/// mandatory; the port defaults to 443.
pub fn explode_trojan(trojan: &str) -> Result<Proxy> {
    let content = strip_scheme(trojan, &[SCHEME], SCHEME)?;
    let url = parse_url_like(content, SCHEME, Some("password"))?;

    let password = url.decoded_auth().unwrap_or_default();
    let port = parse_port_or_default(url.port.as_deref(), DEFAULT_TLS_PORT);
    let query = Query::parse(url.query.as_deref());

    let name = url
        .name()
        .unwrap_or_else(|| default_name(ProxyType::Trojan.label(), &url.host, port));

    Ok(Proxy::Trojan(TrojanProxy {
        name,
        server: url.host,
        port,
        password,
        sni: query.string(&["sni", "peer"]),
        alpn: query.list("alpn"),
        skip_cert_verify: query.flag_of(&["allowinsecure", "skip-cert-verify", "insecure"]),
        client_fingerprint: query.string(&["fp", "client-fingerprint"]),
        udp: query.flag("udp"),
        tfo: query.flag("tfo"),
        transport: transport_from_query(&query),
    }))
}
