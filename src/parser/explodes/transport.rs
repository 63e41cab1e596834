//! Transport options carried as query parameters (`type`, `host`, `path`,
//! `serviceName`...), shared by the URL-shaped V2Ray family links.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::models::{GrpcOpts, H2Opts, HttpOpts, Network, Transport, WsOpts};
use crate::parser::query::Query;

/// Builds the transport block described by `query`.
///
/// `type` (or Shadowrocket's `obfs`) selects the network; `headerType=http`
/// on TCP selects HTTP obfuscation and `httpupgrade` is WebSocket with the
/// upgrade flags set. Unknown networks leave the transport unset.
pub fn transport_from_query(query: &Query) -> Transport {
    let net = query
        .first_of(&["type", "obfs"])
        .map(|t| t.trim().to_ascii_lowercase())
        .unwrap_or_else(|| "tcp".to_string());
    let upgrade = net == "httpupgrade";
    let network = if upgrade {
        Some(Network::Ws)
    } else {
        Network::from_name(&net)
    };
    let network = match network {
        Some(Network::Tcp)
            if query
                .non_blank("headertype")
                .is_some_and(|h| h.eq_ignore_ascii_case("http")) =>
        {
            Some(Network::Http)
        }
        other => other,
    };

    let headers = query
        .first_of(&["host", "obfsparam"])
        .map(parse_headers)
        .filter(|h| !h.is_empty());
    let host = headers.as_ref().and_then(|h| h.get("Host")).cloned();
    let path = query.string(&["path"]);

    let mut transport = Transport {
        network,
        ..Default::default()
    };
    match network {
        Some(Network::Ws) => {
            if headers.is_some() || path.is_some() || upgrade {
                transport.ws_opts = Some(WsOpts {
                    path,
                    headers,
                    v2ray_http_upgrade: upgrade.then_some(true),
                    v2ray_http_upgrade_fast_open: upgrade.then_some(true),
                });
            }
        }
        Some(Network::Http) => {
            transport.http_opts = Some(HttpOpts {
                method: query.string(&["method"]),
                path: Some(vec![path.unwrap_or_else(|| "/".to_string())]),
                headers: host.map(|h| BTreeMap::from([("Host".to_string(), vec![h])])),
            });
        }
        Some(Network::H2) => {
            if host.is_some() || path.is_some() {
                transport.h2_opts = Some(H2Opts {
                    host: host.map(|h| vec![h]),
                    path,
                });
            }
        }
        Some(Network::Grpc) => {
            transport.grpc_opts = Some(GrpcOpts {
                grpc_service_name: query.string(&["servicename", "service-name"]),
            });
        }
        Some(Network::Tcp) | None => {}
    }
    transport
}

/// Parses a header value that is either a bare host name or a JSON object of
/// headers such as `{"Host":"cdn.example.com"}`.
pub fn parse_headers(raw: &str) -> BTreeMap<String, String> {
    let raw = raw.trim();
    if raw.starts_with('{') {
        return serde_json::from_str::<Map<String, Value>>(raw)
            .map(|obj| {
                obj.into_iter()
                    .filter_map(|(k, v)| {
                        let k = if k.eq_ignore_ascii_case("host") {
                            "Host".to_string()
                        } else {
                            k
                        };
                        v.as_str().map(|v| (k, v.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();
    }
    if raw.is_empty() {
        return BTreeMap::new();
    }
    BTreeMap::from([("Host".to_string(), raw.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_with_host_and_path() {
        let q = Query::parse(Some("type=ws&host=cdn.a.com&path=%2Fws"));
        let t = transport_from_query(&q);
        assert_eq!(t.network, Some(Network::Ws));
        assert_eq!(t.ws_host(), Some("cdn.a.com"));
        assert_eq!(t.ws_opts.unwrap().path.as_deref(), Some("/ws"));
    }

    #[test]
    fn test_http_upgrade() {
        let q = Query::parse(Some("type=httpupgrade&path=/u"));
        let t = transport_from_query(&q);
        assert_eq!(t.network, Some(Network::Ws));
        let opts = t.ws_opts.unwrap();
        assert_eq!(opts.v2ray_http_upgrade, Some(true));
        assert_eq!(opts.v2ray_http_upgrade_fast_open, Some(true));
    }

    #[test]
    fn test_header_type_http() {
        let q = Query::parse(Some("type=tcp&headerType=http&host=h.com"));
        let t = transport_from_query(&q);
        assert_eq!(t.network, Some(Network::Http));
        assert_eq!(t.http_host(), Some("h.com"));
        assert_eq!(t.http_opts.unwrap().path, Some(vec!["/".to_string()]));
    }

    #[test]
    fn test_grpc() {
        let q = Query::parse(Some("type=grpc&serviceName=svc"));
        let t = transport_from_query(&q);
        assert_eq!(t.network, Some(Network::Grpc));
        assert_eq!(
            t.grpc_opts.unwrap().grpc_service_name.as_deref(),
            Some("svc")
        );
    }

    #[test]
    fn test_default_and_unknown() {
        assert_eq!(transport_from_query(&Query::default()), Transport::tcp());
        let q = Query::parse(Some("type=kcp"));
        assert_eq!(transport_from_query(&q), Transport::default());
    }

    #[test]
    fn test_json_headers() {
        let headers = parse_headers(r#"{"host":"a.com","User-Agent":"x"}"#);
        assert_eq!(headers.get("Host").map(String::as_str), Some("a.com"));
        assert_eq!(headers.get("User-Agent").map(String::as_str), Some("x"));
        assert!(parse_headers("{broken").is_empty());
        assert!(parse_headers("").is_empty());
    }
}
