use linkparser::models::{Network, Proxy, ProxyType};
use linkparser::{parse_uri, ErrorKind, ParseError};

#[cfg(test)]
mod parse_uri_tests {
    use super::*;

    /// One minimal, well-formed link per scheme key.
    const MINIMAL_LINKS: &[(&str, ProxyType)] = &[
        ("ss://aes-128-gcm:pw@example.com:8388", ProxyType::Shadowsocks),
        // example.com:443:origin:aes-128-ctr:plain:cHc
        (
            "ssr://ZXhhbXBsZS5jb206NDQzOm9yaWdpbjphZXMtMTI4LWN0cjpwbGFpbjpjSGM",
            ProxyType::ShadowsocksR,
        ),
        // {"add":"a.com","port":"443","id":"b831381d-6324-4d53-ad4f-8cda48b30811","net":"ws"}
        (
            "vmess://eyJhZGQiOiJhLmNvbSIsInBvcnQiOiI0NDMiLCJpZCI6ImI4MzEzODFkLTYzMjQtNGQ1My1hZDRmLThjZGE0OGIzMDgxMSIsIm5ldCI6IndzIn0=",
            ProxyType::VMess,
        ),
        (
            "vless://b831381d-6324-4d53-ad4f-8cda48b30811@example.com",
            ProxyType::Vless,
        ),
        ("trojan://pw@example.com", ProxyType::Trojan),
        ("hysteria://example.com", ProxyType::Hysteria),
        ("hy://example.com", ProxyType::Hysteria),
        ("hysteria2://pw@example.com", ProxyType::Hysteria2),
        ("hy2://pw@example.com", ProxyType::Hysteria2),
        (
            "tuic://b831381d-6324-4d53-ad4f-8cda48b30811:pw@example.com",
            ProxyType::Tuic,
        ),
        ("wireguard://key@example.com", ProxyType::WireGuard),
        ("wg://key@example.com", ProxyType::WireGuard),
        ("socks5://example.com", ProxyType::Socks5),
        ("socks://example.com", ProxyType::Socks5),
        ("http://example.com", ProxyType::Http),
        ("https://example.com", ProxyType::Http),
        ("anytls://pw@example.com", ProxyType::AnyTls),
    ];

    #[test]
    fn test_minimal_link_per_scheme() {
        for (link, expected) in MINIMAL_LINKS {
            let proxy = parse_uri(link).unwrap_or_else(|e| panic!("{}: {}", link, e));
            assert_eq!(proxy.proxy_type(), *expected, "{}", link);
            assert!(proxy.port() >= 1, "{}", link);
            assert!(!proxy.name().is_empty(), "{}", link);
            assert!(!proxy.server().is_empty(), "{}", link);

            let json = serde_json::to_value(&proxy).unwrap();
            assert_eq!(json["type"], expected.type_key(), "{}", link);
        }
    }

    #[test]
    fn test_decoding_is_deterministic() {
        for (link, _) in MINIMAL_LINKS {
            assert_eq!(parse_uri(link), parse_uri(link), "{}", link);
        }
    }

    #[test]
    fn test_name_fallback_and_fragment_decoding() {
        let proxy = parse_uri("trojan://pw@example.com:8443").unwrap();
        assert_eq!(proxy.name(), "Trojan example.com:8443");

        let proxy = parse_uri("trojan://pw@example.com:8443#My%20Node").unwrap();
        assert_eq!(proxy.name(), "My Node");

        // A blank fragment falls back to the synthesized name
        let proxy = parse_uri("socks5://example.com:1080#%20%20").unwrap();
        assert_eq!(proxy.name(), "SOCKS5 example.com:1080");
    }

    #[test]
    fn test_trojan_default_port() {
        let proxy = parse_uri("trojan://pw@host#n").unwrap();
        assert_eq!(proxy.port(), 443);
        assert_eq!(proxy.name(), "n");
    }

    #[test]
    fn test_ss_end_to_end() {
        let proxy =
            parse_uri("ss://YWVzLTI1Ni1nY206cGFzc3dvcmQ=@example.com:8388#MyServer").unwrap();
        let json = serde_json::to_value(&proxy).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "ss",
                "name": "MyServer",
                "server": "example.com",
                "port": 8388,
                "cipher": "aes-256-gcm",
                "password": "password",
            })
        );
    }

    #[test]
    fn test_ss_cipher_resolution() {
        let cipher = |link: &str| match parse_uri(link).unwrap() {
            Proxy::Shadowsocks(p) => p.cipher,
            other => panic!("unexpected proxy {:?}", other),
        };
        assert_eq!(
            cipher("ss://chacha20-poly1305:pw@host:1/?udp=1"),
            "chacha20-ietf-poly1305"
        );
        assert_eq!(cipher("ss://rot13:pw@host:1"), "auto");
        assert_eq!(cipher("ss://pw@host:1"), "none");
    }

    #[test]
    fn test_fatal_cases() {
        let err = parse_uri("ss://bm90aGluZyBoZXJl").unwrap_err();
        assert_eq!(err, ParseError::InvalidUri { scheme: "ss" });
        assert_eq!(err.kind(), ErrorKind::Structural);

        let err = parse_uri("trojan://host").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequiredField);
        assert_eq!(err.to_string(), "Invalid trojan uri: missing password");

        let err = parse_uri("anytl://pw@host").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFeature);
        assert!(err.to_string().to_lowercase().contains("unknown scheme"));
    }

    #[test]
    fn test_vmess_json_versus_quantumult() {
        // V2RayN JSON
        let json_link = "vmess://eyJhZGQiOiJhLmNvbSIsInBvcnQiOiI0NDMiLCJpZCI6ImI4MzEzODFkLTYzMjQtNGQ1My1hZDRmLThjZGE0OGIzMDgxMSIsIm5ldCI6IndzIn0=";
        match parse_uri(json_link).unwrap() {
            Proxy::VMess(p) => {
                assert_eq!(p.server, "a.com");
                assert_eq!(p.name, "VMess a.com:443");
            }
            other => panic!("unexpected proxy {:?}", other),
        }

        // JP = vmess, jp.example.com, 443, auto, "b831381d-...", obfs=http
        let quantumult = "vmess://SlAgPSB2bWVzcywganAuZXhhbXBsZS5jb20sIDQ0MywgYXV0bywgImI4MzEzODFkLTYzMjQtNGQ1My1hZDRmLThjZGE0OGIzMDgxMSIsIG9iZnM9aHR0cA==";
        assert_eq!(
            parse_uri(quantumult),
            Err(ParseError::UnsupportedObfs("http".to_string()))
        );
    }

    #[test]
    fn test_vmess_transport_suppression() {
        let link = "vmess://eyJhZGQiOiJhLmNvbSIsInBvcnQiOiI0NDMiLCJpZCI6ImI4MzEzODFkLTYzMjQtNGQ1My1hZDRmLThjZGE0OGIzMDgxMSIsIm5ldCI6IndzIn0=";
        match parse_uri(link).unwrap() {
            Proxy::VMess(p) => {
                assert_eq!(p.transport.network, None);
                assert_eq!(p.transport.ws_opts, None);
            }
            other => panic!("unexpected proxy {:?}", other),
        }
    }

    #[test]
    fn test_vless_ws_serialization() {
        let proxy = parse_uri(
            "vless://b831381d-6324-4d53-ad4f-8cda48b30811@example.com:443?security=tls&type=ws&path=%2Fws&host=cdn.example.com#WS",
        )
        .unwrap();
        let json = serde_json::to_value(&proxy).unwrap();
        assert_eq!(json["type"], "vless");
        assert_eq!(json["network"], "ws");
        assert_eq!(json["ws-opts"]["path"], "/ws");
        assert_eq!(json["ws-opts"]["headers"]["Host"], "cdn.example.com");
        assert_eq!(json["servername"], "cdn.example.com");
        assert_eq!(json["tls"], true);
        assert!(json.get("reality-opts").is_none());
        match proxy {
            Proxy::Vless(p) => assert_eq!(p.transport.network, Some(Network::Ws)),
            other => panic!("unexpected proxy {:?}", other),
        }
    }

    #[test]
    fn test_vmess_alter_id_key() {
        let proxy = parse_uri("vmess://eyJhZGQiOiIxLjIuMy40IiwicG9ydCI6ODQ0MywiaWQiOiJiODMxMzgxZC02MzI0LTRkNTMtYWQ0Zi04Y2RhNDhiMzA4MTEiLCJhaWQiOjY0LCJuZXQiOiJ0Y3AifQ==").unwrap();
        let json = serde_json::to_value(&proxy).unwrap();
        assert_eq!(json["alterId"], 64);
        assert_eq!(json["network"], "tcp");
    }
}
