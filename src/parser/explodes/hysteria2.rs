use crate::models::{Hysteria2Proxy, Proxy, ProxyType};
use crate::parser::error::Result;
use crate::parser::fields::{default_name, parse_port_or_default, DEFAULT_TLS_PORT};
use crate::parser::query::Query;
use crate::parser::scheme::strip_scheme;
use crate::parser::uri::parse_url_like;

const SCHEME: &str = "hysteria2";

/// Parse a Hysteria2 link into a Proxy object
///
/// Format: `hysteria2://password@server[:port][?query][#name]`, also accepted
/// under the `hy2` scheme.
pub fn explode_hysteria2(hysteria2: &str) -> Result<Proxy> {
    let content = strip_scheme(hysteria2, &["hysteria2", "hy2"], SCHEME)?;
    let url = parse_url_like(content, SCHEME, Some("password"))?;

    let password = url.decoded_auth().unwrap_or_default();
    let port = parse_port_or_default(url.port.as_deref(), DEFAULT_TLS_PORT);
    let query = Query::parse(url.query.as_deref());

    let name = url
        .name()
        .unwrap_or_else(|| default_name(ProxyType::Hysteria2.label(), &url.host, port));

    Ok(Proxy::Hysteria2(Hysteria2Proxy {
        name,
        port,
        password,
        ports: query.string(&["mport", "ports"]),
        hop_interval: query.int("hop-interval"),
        up: query.string(&["up", "upmbps"]),
        down: query.string(&["down", "downmbps"]),
        obfs: query
            .string(&["obfs"])
            .filter(|o| !o.eq_ignore_ascii_case("none")),
        obfs_password: query.string(&["obfs-password"]),
        sni: query.string(&["sni", "peer"]),
        alpn: query.list("alpn"),
        skip_cert_verify: query.flag_of(&["insecure", "skip-cert-verify", "allowinsecure"]),
        fingerprint: query.string(&["pinsha256", "fingerprint"]),
        udp: query.flag("udp"),
        tfo: query.flag_of(&["fastopen", "fast-open", "tfo"]),
        server: url.host,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::error::ParseError;

    fn hysteria2(link: &str) -> Hysteria2Proxy {
        match explode_hysteria2(link).unwrap() {
            Proxy::Hysteria2(p) => p,
            other => panic!("unexpected proxy {:?}", other),
        }
    }

    #[test]
    fn test_full_link() {
        let node = hysteria2(
            "hysteria2://letmein@example.com:8443/?insecure=1&obfs=salamander&obfs-password=gawrgura&sni=real.example.com&mport=6000-7000&pinSHA256=deadbeef&up=30&down=200#HY2",
        );
        assert_eq!(node.name, "HY2");
        assert_eq!(node.password, "letmein");
        assert_eq!(node.port, 8443);
        assert_eq!(node.skip_cert_verify, Some(true));
        assert_eq!(node.obfs.as_deref(), Some("salamander"));
        assert_eq!(node.obfs_password.as_deref(), Some("gawrgura"));
        assert_eq!(node.sni.as_deref(), Some("real.example.com"));
        assert_eq!(node.ports.as_deref(), Some("6000-7000"));
        assert_eq!(node.fingerprint.as_deref(), Some("deadbeef"));
        assert_eq!(node.up.as_deref(), Some("30"));
        assert_eq!(node.down.as_deref(), Some("200"));
    }

    #[test]
    fn test_hy2_alias_and_defaults() {
        let node = hysteria2("hy2://pw@example.com?obfs=none&fastopen=1");
        assert_eq!(node.port, 443);
        assert_eq!(node.obfs, None);
        assert_eq!(node.tfo, Some(true));
        assert_eq!(node.name, "Hysteria2 example.com:443");
    }

    #[test]
    fn test_missing_password() {
        assert_eq!(
            explode_hysteria2("hysteria2://example.com:443"),
            Err(ParseError::missing("hysteria2", "password"))
        );
    }
}
