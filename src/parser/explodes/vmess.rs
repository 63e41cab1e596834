use std::collections::BTreeMap;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde_json::{Map, Value};

use crate::models::{GrpcOpts, H2Opts, HttpOpts, Network, Proxy, ProxyType, Transport, VmessProxy, WsOpts};
use crate::parser::error::{ParseError, Result};
use crate::parser::fields::{default_name, parse_port_or_default, resolve_vmess_cipher, DEFAULT_TLS_PORT};
use crate::parser::query::{parse_bool, parse_int, split_list, Query};
use crate::parser::scheme::strip_scheme;
use crate::parser::uri::decode_name;
use crate::utils::base64::decode_base64_or_original;
use crate::utils::url::{split_fragment, url_decode};

const SCHEME: &str = "vmess";

lazy_static! {
    static ref QUANTUMULT: Regex = Regex::new(r"=\s*vmess\s*,").unwrap();
    static ref SHADOWROCKET_BODY: Regex = Regex::new(r"^([^?]+?)/?(?:\?(.*))?$").unwrap();
    static ref SHADOWROCKET_AUTH: Regex =
        Regex::new(r"^([^:]+?):([^:]+?)@(.*):([0-9]+)$").unwrap();
}

/// Parse a VMess link into a Proxy object
///
/// Dialects are tried in this order, the first match wins:
/// 1. Quantumult: Base64 of `name = vmess, server, port, cipher, "uuid", key=value...`
/// 2. V2RayN: Base64 of a JSON object (`add`, `port`, `id`, `net`...)
/// 3. Shadowrocket: `BASE64(cipher:uuid@server:port)?remarks=..&obfs=..`
///
/// Each dialect is first translated to V2RayN field names, so a single
/// builder assembles the final record.
pub fn explode_vmess(vmess: &str) -> Result<Proxy> {
    let content = strip_scheme(vmess, &[SCHEME], SCHEME)?;
    let (body, fragment) = split_fragment(content);
    let body = body.trim();
    // Base64 padding is sometimes percent-encoded
    let decoded = decode_base64_or_original(&url_decode(body));

    if QUANTUMULT.is_match(&decoded) {
        debug!("vmess link in Quantumult layout");
        return build_vmess(&quantumult_fields(&decoded)?, fragment);
    }

    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(&decoded) {
        debug!("vmess link in V2RayN layout");
        return build_vmess(&fields, fragment);
    }

    if let Some(fields) = shadowrocket_fields(body) {
        debug!("vmess link in Shadowrocket layout");
        return build_vmess(&fields, fragment);
    }

    Err(ParseError::malformed(
        SCHEME,
        "payload is neither JSON nor a known positional layout",
    ))
}

/// Reads a V2RayN field as trimmed text. Numbers and booleans are
/// stringified; blank strings count as absent.
fn field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn build_vmess(fields: &Map<String, Value>, fragment: Option<&str>) -> Result<Proxy> {
    let text = |key: &str| field(fields, key);

    let server = text("add").ok_or_else(|| ParseError::missing(SCHEME, "server"))?;
    let uuid = text("id").ok_or_else(|| ParseError::missing(SCHEME, "uuid"))?;
    let port = parse_port_or_default(text("port").as_deref(), DEFAULT_TLS_PORT);

    let tls = text("tls").map_or(false, |t| {
        matches!(t.to_ascii_lowercase().as_str(), "tls" | "1" | "true")
    });

    // Transport host may be a JSON header object
    let mut host = text("host").and_then(|h| host_header(&h));
    let mut path = text("path");

    // Legacy `host;path` packing
    if path.is_none() {
        if let Some((h, p)) = host.as_deref().and_then(|h| h.split_once(';')) {
            let (h, p) = (h.trim().to_string(), p.trim().to_string());
            path = Some(p).filter(|p| !p.is_empty());
            host = Some(h).filter(|h| !h.is_empty());
        }
    }

    let transport = build_transport(
        text("net").or_else(|| text("obfs")),
        text("type"),
        host,
        path,
    );

    let name = decode_name(fragment)
        .or_else(|| ["ps", "remarks", "remark"].iter().find_map(|&k| text(k)))
        .unwrap_or_else(|| default_name(ProxyType::VMess.label(), &server, port));

    let skip_cert_verify = text("allowInsecure")
        .or_else(|| text("skip-cert-verify"))
        .and_then(|v| parse_bool(&v))
        .or_else(|| {
            text("verify_cert")
                .and_then(|v| parse_bool(&v))
                .map(|verify| !verify)
        });

    Ok(Proxy::VMess(VmessProxy {
        name,
        server,
        port,
        uuid,
        alter_id: text("aid").and_then(|a| parse_int(&a)).unwrap_or(0),
        cipher: resolve_vmess_cipher(text("scy").as_deref()),
        tls,
        servername: if tls { text("sni") } else { None },
        alpn: text("alpn").and_then(|a| split_list(&a)),
        client_fingerprint: text("fp"),
        skip_cert_verify,
        udp: text("udp").and_then(|v| parse_bool(&v)),
        tfo: text("tfo").and_then(|v| parse_bool(&v)),
        transport,
    }))
}

/// Extracts the `Host` value from a `{"Host": ".."}` object, or returns the
/// plain host unchanged.
fn host_header(raw: &str) -> Option<String> {
    if !raw.starts_with('{') {
        return Some(raw.to_string());
    }
    let headers: Map<String, Value> = serde_json::from_str(raw).ok()?;
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("host"))
        .and_then(|(_, v)| v.as_str())
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
}

/// Derives the network and its option block.
///
/// `httpupgrade` becomes `ws` with the upgrade flags set. A non-TCP network
/// with neither host nor path has nothing to configure and is dropped.
fn build_transport(
    net: Option<String>,
    header_type: Option<String>,
    host: Option<String>,
    path: Option<String>,
) -> Transport {
    let net = net
        .map(|n| n.to_ascii_lowercase())
        .unwrap_or_else(|| "tcp".to_string());
    let upgrade = net == "httpupgrade";
    let network = if upgrade {
        Some(Network::Ws)
    } else {
        Network::from_name(&net)
    };
    let network = match network {
        Some(Network::Tcp) if header_type.as_deref() == Some("http") => Some(Network::Http),
        other => other,
    };

    match network {
        None => {
            debug!("vmess network {} is not supported, leaving it unset", net);
            Transport::default()
        }
        Some(Network::Tcp) => Transport::tcp(),
        Some(_) if host.is_none() && path.is_none() && !upgrade => Transport::default(),
        Some(Network::Ws) => Transport {
            network: Some(Network::Ws),
            ws_opts: Some(WsOpts {
                path,
                headers: host.map(|h| BTreeMap::from([("Host".to_string(), h)])),
                v2ray_http_upgrade: upgrade.then_some(true),
                v2ray_http_upgrade_fast_open: upgrade.then_some(true),
            }),
            ..Default::default()
        },
        Some(Network::Http) => Transport {
            network: Some(Network::Http),
            http_opts: Some(HttpOpts {
                method: None,
                path: Some(vec![path.unwrap_or_else(|| "/".to_string())]),
                headers: host.map(|h| BTreeMap::from([("Host".to_string(), vec![h])])),
            }),
            ..Default::default()
        },
        Some(Network::H2) => Transport {
            network: Some(Network::H2),
            h2_opts: Some(H2Opts {
                host: host.map(|h| vec![h]),
                path,
            }),
            ..Default::default()
        },
        Some(Network::Grpc) => Transport {
            network: Some(Network::Grpc),
            grpc_opts: Some(GrpcOpts {
                grpc_service_name: path,
            }),
            ..Default::default()
        },
    }
}

/// Translates the Quantumult positional layout into V2RayN fields.
fn quantumult_fields(text: &str) -> Result<Map<String, Value>> {
    let (name, rest) = text
        .split_once('=')
        .ok_or_else(|| ParseError::malformed(SCHEME, "missing Quantumult name"))?;
    let items: Vec<&str> = rest.split(',').map(str::trim).collect();
    if items.len() < 5 {
        return Err(ParseError::malformed(SCHEME, "truncated Quantumult layout"));
    }

    let unquote = |s: &str| s.trim().trim_matches('"').trim().to_string();
    let mut fields = Map::new();
    let mut set = |key: &str, value: String| {
        fields.insert(key.to_string(), Value::String(value));
    };
    set("ps", name.trim().to_string());
    set("add", unquote(items[1]));
    set("port", unquote(items[2]));
    set("scy", unquote(items[3]));
    set("id", unquote(items[4]));

    for item in &items[5..] {
        let Some((key, value)) = item.split_once('=') else {
            continue;
        };
        let value = unquote(value);
        match key.trim() {
            "over-tls" if parse_bool(&value) == Some(true) => set("tls", "tls".to_string()),
            "tls-host" => set("sni", value),
            "tls-verification" if parse_bool(&value) == Some(false) => {
                set("allowInsecure", "true".to_string())
            }
            "obfs" => match value.to_ascii_lowercase().as_str() {
                "ws" => set("net", "ws".to_string()),
                "wss" => {
                    set("net", "ws".to_string());
                    set("tls", "tls".to_string());
                }
                "" | "none" => {}
                other => return Err(ParseError::UnsupportedObfs(other.to_string())),
            },
            "obfs-path" => set("path", value),
            "obfs-header" => {
                let host = value
                    .split("[Rr][Nn]")
                    .filter_map(|header| header.split_once(':'))
                    .find(|(k, _)| k.trim().eq_ignore_ascii_case("host"))
                    .map(|(_, v)| v.trim().to_string());
                if let Some(host) = host {
                    set("host", host);
                }
            }
            "udp-relay" => set("udp", value),
            "fast-open" => set("tfo", value),
            _ => {}
        }
    }
    Ok(fields)
}

/// Translates the Shadowrocket layout into V2RayN fields, or `None` when the
/// body does not follow it.
fn shadowrocket_fields(body: &str) -> Option<Map<String, Value>> {
    let caps = SHADOWROCKET_BODY.captures(body)?;
    let auth = decode_base64_or_original(&url_decode(caps.get(1)?.as_str()));
    let auth = SHADOWROCKET_AUTH.captures(&auth)?;
    let query = Query::parse(caps.get(2).map(|m| m.as_str()));

    let mut fields = Map::new();
    let mut set = |key: &str, value: &str| {
        fields.insert(key.to_string(), Value::String(value.to_string()));
    };
    set("scy", &auth[1]);
    set("id", &auth[2]);
    set("add", &auth[3]);
    set("port", &auth[4]);

    if let Some(remarks) = query.non_blank("remarks") {
        set("ps", remarks);
    }
    match query.non_blank("obfs").map(str::to_ascii_lowercase).as_deref() {
        Some("websocket") | Some("ws") => set("net", "ws"),
        Some("none") | None => {}
        Some(other) => set("net", other),
    }
    if let Some(host) = query.non_blank("obfsparam") {
        set("host", host);
    }
    if let Some(path) = query.non_blank("path") {
        set("path", path);
    }
    if query.flag("tls") == Some(true) {
        set("tls", "tls");
    }
    for (from, to) in [
        ("peer", "sni"),
        ("alterid", "aid"),
        ("allowinsecure", "allowInsecure"),
        ("alpn", "alpn"),
        ("tfo", "tfo"),
    ] {
        if let Some(value) = query.non_blank(from) {
            set(to, value);
        }
    }
    Some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    const UUID: &str = "b831381d-6324-4d53-ad4f-8cda48b30811";

    fn vmess(link: &str) -> VmessProxy {
        match explode_vmess(link).unwrap() {
            Proxy::VMess(p) => p,
            other => panic!("unexpected proxy {:?}", other),
        }
    }

    #[test]
    fn test_v2rayn_ws_tls() {
        let node = vmess("vmess://eyJ2IjoiMiIsInBzIjoiSlAgTm9kZSIsImFkZCI6ImpwLmV4YW1wbGUuY29tIiwicG9ydCI6IjQ0MyIsImlkIjoiYjgzMTM4MWQtNjMyNC00ZDUzLWFkNGYtOGNkYTQ4YjMwODExIiwiYWlkIjoiMCIsInNjeSI6ImF1dG8iLCJuZXQiOiJ3cyIsInR5cGUiOiJub25lIiwiaG9zdCI6ImNkbi5leGFtcGxlLmNvbSIsInBhdGgiOiIvd3MiLCJ0bHMiOiJ0bHMiLCJzbmkiOiJjZG4uZXhhbXBsZS5jb20iLCJhbHBuIjoiaDIsaHR0cC8xLjEiLCJmcCI6ImNocm9tZSJ9");
        assert_eq!(node.name, "JP Node");
        assert_eq!(node.server, "jp.example.com");
        assert_eq!(node.port, 443);
        assert_eq!(node.uuid, UUID);
        assert_eq!(node.cipher, "auto");
        assert!(node.tls);
        assert_eq!(node.servername.as_deref(), Some("cdn.example.com"));
        assert_eq!(
            node.alpn,
            Some(vec!["h2".to_string(), "http/1.1".to_string()])
        );
        assert_eq!(node.client_fingerprint.as_deref(), Some("chrome"));
        assert_eq!(node.transport.network, Some(Network::Ws));
        assert_eq!(node.transport.ws_host(), Some("cdn.example.com"));
        assert_eq!(
            node.transport.ws_opts.as_ref().and_then(|o| o.path.as_deref()),
            Some("/ws")
        );
    }

    #[test]
    fn test_numeric_fields_and_default_name() {
        let node = vmess("vmess://eyJhZGQiOiIxLjIuMy40IiwicG9ydCI6ODQ0MywiaWQiOiJiODMxMzgxZC02MzI0LTRkNTMtYWQ0Zi04Y2RhNDhiMzA4MTEiLCJhaWQiOjY0LCJuZXQiOiJ0Y3AifQ==");
        assert_eq!(node.port, 8443);
        assert_eq!(node.alter_id, 64);
        assert_eq!(node.name, "VMess 1.2.3.4:8443");
        assert_eq!(node.transport, Transport::tcp());
        assert!(!node.tls);
    }

    #[test]
    fn test_ws_without_host_or_path_is_dropped() {
        let node = vmess("vmess://eyJhZGQiOiJhLmNvbSIsInBvcnQiOiI0NDMiLCJpZCI6ImI4MzEzODFkLTYzMjQtNGQ1My1hZDRmLThjZGE0OGIzMDgxMSIsIm5ldCI6IndzIn0=");
        assert_eq!(node.transport.network, None);
        assert_eq!(node.transport.ws_opts, None);
    }

    #[test]
    fn test_percent_encoded_padding() {
        let node = vmess("vmess://eyJhZGQiOiJhLmNvbSIsInBvcnQiOiI0NDMiLCJpZCI6ImI4MzEzODFkLTYzMjQtNGQ1My1hZDRmLThjZGE0OGIzMDgxMSIsIm5ldCI6IndzIn0%3D");
        assert_eq!(node.server, "a.com");
        assert_eq!(node.uuid, UUID);
    }

    #[test]
    fn test_other_networks_without_host_or_path_are_dropped() {
        // net=grpc
        let node = vmess("vmess://eyJhZGQiOiJhLmNvbSIsInBvcnQiOiI0NDMiLCJpZCI6ImI4MzEzODFkLTYzMjQtNGQ1My1hZDRmLThjZGE0OGIzMDgxMSIsIm5ldCI6ImdycGMifQ==");
        assert_eq!(node.transport, Transport::default());
        // net=h2
        let node = vmess("vmess://eyJhZGQiOiJhLmNvbSIsInBvcnQiOiI0NDMiLCJpZCI6ImI4MzEzODFkLTYzMjQtNGQ1My1hZDRmLThjZGE0OGIzMDgxMSIsIm5ldCI6ImgyIn0=");
        assert_eq!(node.transport, Transport::default());
        // net=tcp, type=http
        let node = vmess("vmess://eyJhZGQiOiJhLmNvbSIsInBvcnQiOiI0NDMiLCJpZCI6ImI4MzEzODFkLTYzMjQtNGQ1My1hZDRmLThjZGE0OGIzMDgxMSIsIm5ldCI6InRjcCIsInR5cGUiOiJodHRwIn0=");
        assert_eq!(node.transport, Transport::default());
    }

    #[test]
    fn test_quantumult_wss_and_flags() {
        // Q = vmess, q.example.com, 443, aes-128-gcm, "<uuid>", over-tls=false, obfs=wss,
        // obfs-path="/ws", obfs-header="Host: cdn.example.com[Rr][Nn]User-Agent: x",
        // udp-relay=true, fast-open=false
        let node = vmess("vmess://USA9IHZtZXNzLCBxLmV4YW1wbGUuY29tLCA0NDMsIGFlcy0xMjgtZ2NtLCAiYjgzMTM4MWQtNjMyNC00ZDUzLWFkNGYtOGNkYTQ4YjMwODExIiwgb3Zlci10bHM9ZmFsc2UsIG9iZnM9d3NzLCBvYmZzLXBhdGg9Ii93cyIsIG9iZnMtaGVhZGVyPSJIb3N0OiBjZG4uZXhhbXBsZS5jb21bUnJdW05uXVVzZXItQWdlbnQ6IHgiLCB1ZHAtcmVsYXk9dHJ1ZSwgZmFzdC1vcGVuPWZhbHNl");
        assert_eq!(node.name, "Q");
        assert_eq!(node.server, "q.example.com");
        assert_eq!(node.cipher, "aes-128-gcm");
        assert!(node.tls);
        assert_eq!(node.transport.network, Some(Network::Ws));
        assert_eq!(node.transport.ws_host(), Some("cdn.example.com"));
        assert_eq!(
            node.transport.ws_opts.as_ref().and_then(|o| o.path.as_deref()),
            Some("/ws")
        );
        assert_eq!(node.udp, Some(true));
        assert_eq!(node.tfo, Some(false));
    }

    #[test]
    fn test_httpupgrade() {
        let node = vmess("vmess://eyJhZGQiOiJhLmNvbSIsInBvcnQiOiI4MCIsImlkIjoiYjgzMTM4MWQtNjMyNC00ZDUzLWFkNGYtOGNkYTQ4YjMwODExIiwibmV0IjoiaHR0cHVwZ3JhZGUiLCJwYXRoIjoiL3VwIn0=");
        assert_eq!(node.transport.network, Some(Network::Ws));
        let opts = node.transport.ws_opts.unwrap();
        assert_eq!(opts.path.as_deref(), Some("/up"));
        assert_eq!(opts.v2ray_http_upgrade, Some(true));
        assert_eq!(opts.headers, None);
    }

    #[test]
    fn test_grpc_service_name_from_path() {
        let node = vmess("vmess://eyJhZGQiOiJhLmNvbSIsInBvcnQiOiI0NDMiLCJpZCI6ImI4MzEzODFkLTYzMjQtNGQ1My1hZDRmLThjZGE0OGIzMDgxMSIsIm5ldCI6ImdycGMiLCJwYXRoIjoic3ZjIiwidGxzIjoidGxzIn0=");
        assert_eq!(node.transport.network, Some(Network::Grpc));
        assert_eq!(
            node.transport.grpc_opts,
            Some(GrpcOpts {
                grpc_service_name: Some("svc".to_string())
            })
        );
    }

    #[test]
    fn test_http_header_type() {
        let node = vmess("vmess://eyJhZGQiOiJhLmNvbSIsInBvcnQiOiI4MCIsImlkIjoiYjgzMTM4MWQtNjMyNC00ZDUzLWFkNGYtOGNkYTQ4YjMwODExIiwibmV0IjoidGNwIiwidHlwZSI6Imh0dHAiLCJob3N0IjoiYi5jb20ifQ==");
        assert_eq!(node.transport.network, Some(Network::Http));
        let opts = node.transport.http_opts.as_ref().unwrap();
        assert_eq!(opts.path, Some(vec!["/".to_string()]));
        assert_eq!(node.transport.http_host(), Some("b.com"));
    }

    #[test]
    fn test_json_host_header_and_verify_cert() {
        let node = vmess("vmess://eyJhZGQiOiJhLmNvbSIsInBvcnQiOiI0NDMiLCJpZCI6ImI4MzEzODFkLTYzMjQtNGQ1My1hZDRmLThjZGE0OGIzMDgxMSIsIm5ldCI6IndzIiwiaG9zdCI6IntcIkhvc3RcIjpcImguY29tXCJ9IiwidmVyaWZ5X2NlcnQiOmZhbHNlfQ==");
        assert_eq!(node.transport.ws_host(), Some("h.com"));
        assert_eq!(node.skip_cert_verify, Some(true));
    }

    #[test]
    fn test_legacy_host_path_packing() {
        let node = vmess("vmess://eyJ2IjoiMSIsImFkZCI6ImEuY29tIiwicG9ydCI6IjQ0MyIsImlkIjoiYjgzMTM4MWQtNjMyNC00ZDUzLWFkNGYtOGNkYTQ4YjMwODExIiwibmV0Ijoid3MiLCJob3N0IjoiaC5jb207L2xlZ2FjeSJ9");
        assert_eq!(node.transport.ws_host(), Some("h.com"));
        assert_eq!(
            node.transport.ws_opts.as_ref().and_then(|o| o.path.as_deref()),
            Some("/legacy")
        );
    }

    #[test]
    fn test_fragment_overrides_ps() {
        let node = vmess("vmess://eyJ2IjoiMiIsInBzIjoiSlAgTm9kZSIsImFkZCI6ImpwLmV4YW1wbGUuY29tIiwicG9ydCI6IjQ0MyIsImlkIjoiYjgzMTM4MWQtNjMyNC00ZDUzLWFkNGYtOGNkYTQ4YjMwODExIiwiYWlkIjoiMCIsInNjeSI6ImF1dG8iLCJuZXQiOiJ3cyIsInR5cGUiOiJub25lIiwiaG9zdCI6ImNkbi5leGFtcGxlLmNvbSIsInBhdGgiOiIvd3MiLCJ0bHMiOiJ0bHMiLCJzbmkiOiJjZG4uZXhhbXBsZS5jb20iLCJhbHBuIjoiaDIsaHR0cC8xLjEiLCJmcCI6ImNocm9tZSJ9#My%20Node");
        assert_eq!(node.name, "My Node");
    }

    #[test]
    fn test_quantumult_layout() {
        let node = vmess("vmess://SlAgPSB2bWVzcywganAuZXhhbXBsZS5jb20sIDQ0MywgY2hhY2hhMjAtcG9seTEzMDUsICJiODMxMzgxZC02MzI0LTRkNTMtYWQ0Zi04Y2RhNDhiMzA4MTEiLCBncm91cD1HLCBvdmVyLXRscz10cnVlLCB0bHMtaG9zdD1qcC5leGFtcGxlLmNvbSwgb2Jmcz13cywgb2Jmcy1wYXRoPSIvd3MiLCBvYmZzLWhlYWRlcj0iSG9zdDogY2RuLmV4YW1wbGUuY29tW1JyXVtObl1Vc2VyLUFnZW50OiB4Ig==");
        assert_eq!(node.name, "JP");
        assert_eq!(node.server, "jp.example.com");
        assert_eq!(node.port, 443);
        assert_eq!(node.cipher, "chacha20-poly1305");
        assert_eq!(node.uuid, UUID);
        assert!(node.tls);
        assert_eq!(node.servername.as_deref(), Some("jp.example.com"));
        assert_eq!(node.transport.network, Some(Network::Ws));
        assert_eq!(node.transport.ws_host(), Some("cdn.example.com"));
    }

    #[test]
    fn test_quantumult_unsupported_obfs() {
        assert_eq!(
            explode_vmess("vmess://SlAgPSB2bWVzcywganAuZXhhbXBsZS5jb20sIDQ0MywgYXV0bywgImI4MzEzODFkLTYzMjQtNGQ1My1hZDRmLThjZGE0OGIzMDgxMSIsIG9iZnM9aHR0cA=="),
            Err(ParseError::UnsupportedObfs("http".to_string()))
        );
    }

    #[test]
    fn test_shadowrocket_layout() {
        let node = vmess("vmess://YXV0bzpiODMxMzgxZC02MzI0LTRkNTMtYWQ0Zi04Y2RhNDhiMzA4MTFAc3IuZXhhbXBsZS5jb206NDQz?remarks=SR&obfs=websocket&path=/ws&obfsParam=cdn.example.com&tls=1&peer=sni.example.com&alterId=2");
        assert_eq!(node.name, "SR");
        assert_eq!(node.server, "sr.example.com");
        assert_eq!(node.port, 443);
        assert_eq!(node.uuid, UUID);
        assert_eq!(node.alter_id, 2);
        assert!(node.tls);
        assert_eq!(node.servername.as_deref(), Some("sni.example.com"));
        assert_eq!(node.transport.ws_host(), Some("cdn.example.com"));
    }

    #[test]
    fn test_malformed_payload() {
        let err = explode_vmess("vmess://bm90IGpzb24=").unwrap_err();
        assert_eq!(err.kind(), crate::parser::error::ErrorKind::MalformedPayload);
    }

    #[test]
    fn test_missing_uuid() {
        assert_eq!(
            explode_vmess("vmess://eyJhZGQiOiJhLmNvbSIsInBvcnQiOiI0NDMifQ=="),
            Err(ParseError::missing("vmess", "uuid"))
        );
    }
}
