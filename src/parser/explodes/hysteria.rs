use crate::models::{HysteriaProxy, Proxy, ProxyType};
use crate::parser::error::Result;
use crate::parser::fields::{default_name, parse_port_or_default, DEFAULT_TLS_PORT};
use crate::parser::query::Query;
use crate::parser::scheme::strip_scheme;
use crate::parser::uri::parse_url_like;

const SCHEME: &str = "hysteria";

/// Parse a Hysteria (v1) link into a Proxy object
///
/// Format: `hysteria://[auth@]server[:port]?upmbps=..&downmbps=..&obfsParam=..#name`
pub fn explode_hysteria(hysteria: &str) -> Result<Proxy> {
    let content = strip_scheme(hysteria, &["hysteria", "hy"], SCHEME)?;
    let url = parse_url_like(content, SCHEME, None)?;

    let port = parse_port_or_default(url.port.as_deref(), DEFAULT_TLS_PORT);
    let query = Query::parse(url.query.as_deref());

    let name = url
        .name()
        .unwrap_or_else(|| default_name(ProxyType::Hysteria.label(), &url.host, port));

    Ok(Proxy::Hysteria(HysteriaProxy {
        name,
        port,
        protocol: query
            .string(&["protocol"])
            .unwrap_or_else(|| "udp".to_string()),
        auth_str: url
            .decoded_auth()
            .or_else(|| query.string(&["auth", "auth-str"])),
        ports: query.string(&["mport", "ports"]),
        up: query.string(&["upmbps", "up"]),
        down: query.string(&["downmbps", "down"]),
        // `obfsParam` carries the obfs password in most clients
        obfs: query.string(&["obfsparam", "obfs"]),
        sni: query.string(&["peer", "sni"]),
        alpn: query.list("alpn"),
        skip_cert_verify: query.flag_of(&["insecure", "skip-cert-verify", "allowinsecure"]),
        fingerprint: query.string(&["fingerprint"]),
        ca: query.string(&["ca"]),
        ca_str: query.string(&["ca-str"]),
        recv_window_conn: query.int("recv-window-conn"),
        recv_window: query.int("recv-window"),
        disable_mtu_discovery: query.flag("disable-mtu-discovery"),
        fast_open: query.flag("fast-open"),
        server: url.host,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hysteria(link: &str) -> HysteriaProxy {
        match explode_hysteria(link).unwrap() {
            Proxy::Hysteria(p) => p,
            other => panic!("unexpected proxy {:?}", other),
        }
    }

    #[test]
    fn test_full_link() {
        let node = hysteria(
            "hysteria://example.com:36712?protocol=udp&auth=secret&peer=sni.example.com&insecure=1&upmbps=50&downmbps=100&alpn=hysteria&obfs=xplus&obfsParam=obfskey&mport=20000-30000&recv_window_conn=15728640&fast-open=1#HY",
        );
        assert_eq!(node.name, "HY");
        assert_eq!(node.server, "example.com");
        assert_eq!(node.port, 36712);
        assert_eq!(node.protocol, "udp");
        assert_eq!(node.auth_str.as_deref(), Some("secret"));
        assert_eq!(node.sni.as_deref(), Some("sni.example.com"));
        assert_eq!(node.skip_cert_verify, Some(true));
        assert_eq!(node.up.as_deref(), Some("50"));
        assert_eq!(node.down.as_deref(), Some("100"));
        assert_eq!(node.alpn, Some(vec!["hysteria".to_string()]));
        assert_eq!(node.obfs.as_deref(), Some("obfskey"));
        assert_eq!(node.ports.as_deref(), Some("20000-30000"));
        assert_eq!(node.recv_window_conn, Some(15728640));
        assert_eq!(node.fast_open, Some(true));
    }

    #[test]
    fn test_auth_from_userinfo_and_defaults() {
        let node = hysteria("hy://token@1.2.3.4");
        assert_eq!(node.auth_str.as_deref(), Some("token"));
        assert_eq!(node.port, 443);
        assert_eq!(node.protocol, "udp");
        assert_eq!(node.name, "Hysteria 1.2.3.4:443");
    }

    #[test]
    fn test_obfs_without_param() {
        let node = hysteria("hysteria://h:443?obfs=xplus&protocol=faketcp");
        assert_eq!(node.obfs.as_deref(), Some("xplus"));
        assert_eq!(node.protocol, "faketcp");
        assert_eq!(node.auth_str, None);
    }
}
