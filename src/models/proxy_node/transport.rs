//! Transport and TLS option records shared by several proxy types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Transport used to carry proxy traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Tcp,
    Ws,
    Http,
    H2,
    Grpc,
}

impl Network {
    /// Parses a transport name as written in share links. `websocket` is
    /// accepted for `ws`; `none` means plain TCP.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tcp" | "none" => Some(Network::Tcp),
            "ws" | "websocket" => Some(Network::Ws),
            "http" => Some(Network::Http),
            "h2" => Some(Network::H2),
            "grpc" => Some(Network::Grpc),
            _ => None,
        }
    }
}

/// Preferred address family for outbound dials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IpVersion {
    Dual,
    Ipv4,
    Ipv6,
    Ipv4Prefer,
    Ipv6Prefer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WsOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v2ray_http_upgrade: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v2ray_http_upgrade_fast_open: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HttpOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct H2Opts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GrpcOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grpc_service_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RealityOpts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
}

/// Network selection plus the matching option block. At most one of the
/// option records is set, and only the one matching `network`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Transport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_opts: Option<WsOpts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_opts: Option<HttpOpts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h2_opts: Option<H2Opts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grpc_opts: Option<GrpcOpts>,
}

impl Transport {
    pub fn tcp() -> Self {
        Transport {
            network: Some(Network::Tcp),
            ..Default::default()
        }
    }

    /// Host header of the WebSocket transport, if any.
    pub fn ws_host(&self) -> Option<&str> {
        self.ws_opts
            .as_ref()
            .and_then(|o| o.headers.as_ref())
            .and_then(|h| h.get("Host"))
            .map(String::as_str)
    }

    /// First Host header of the HTTP transport, if any.
    pub fn http_host(&self) -> Option<&str> {
        self.http_opts
            .as_ref()
            .and_then(|o| o.headers.as_ref())
            .and_then(|h| h.get("Host"))
            .and_then(|hosts| hosts.first())
            .map(String::as_str)
    }
}
