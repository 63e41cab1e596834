//! Proxy model definitions
//!
//! Contains the canonical, protocol-tagged proxy configuration produced by
//! the link parsers.

use serde::{Deserialize, Serialize};

use super::proxy_node::{
    AnyTlsProxy, HttpProxy, Hysteria2Proxy, HysteriaProxy, ShadowsocksProxy, ShadowsocksRProxy,
    Socks5Proxy, TrojanProxy, TuicProxy, VlessProxy, VmessProxy, WireGuardProxy,
};

/// Represents the type of a proxy.
/// This is the canonical enum used for proxy type identification across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyType {
    Shadowsocks,
    ShadowsocksR,
    VMess,
    Vless,
    Trojan,
    Hysteria,
    Hysteria2,
    Tuic,
    WireGuard,
    Socks5,
    Http,
    AnyTls,
}

/// Link schemes and the proxy type each one decodes to. Several schemes
/// alias the same type.
const SCHEMES: &[(&str, ProxyType)] = &[
    ("ss", ProxyType::Shadowsocks),
    ("ssr", ProxyType::ShadowsocksR),
    ("vmess", ProxyType::VMess),
    ("vless", ProxyType::Vless),
    ("trojan", ProxyType::Trojan),
    ("hysteria", ProxyType::Hysteria),
    ("hy", ProxyType::Hysteria),
    ("hysteria2", ProxyType::Hysteria2),
    ("hy2", ProxyType::Hysteria2),
    ("tuic", ProxyType::Tuic),
    ("wireguard", ProxyType::WireGuard),
    ("wg", ProxyType::WireGuard),
    ("socks5", ProxyType::Socks5),
    ("socks", ProxyType::Socks5),
    ("http", ProxyType::Http),
    ("https", ProxyType::Http),
    ("anytls", ProxyType::AnyTls),
];

impl ProxyType {
    /// Human-readable label, used to synthesize default proxy names.
    pub fn label(self) -> &'static str {
        match self {
            ProxyType::Shadowsocks => "SS",
            ProxyType::ShadowsocksR => "SSR",
            ProxyType::VMess => "VMess",
            ProxyType::Vless => "VLESS",
            ProxyType::Trojan => "Trojan",
            ProxyType::Hysteria => "Hysteria",
            ProxyType::Hysteria2 => "Hysteria2",
            ProxyType::Tuic => "TUIC",
            ProxyType::WireGuard => "WireGuard",
            ProxyType::Socks5 => "SOCKS5",
            ProxyType::Http => "HTTP",
            ProxyType::AnyTls => "AnyTLS",
        }
    }

    /// The `type` discriminant written to configuration documents.
    pub fn type_key(self) -> &'static str {
        match self {
            ProxyType::Shadowsocks => "ss",
            ProxyType::ShadowsocksR => "ssr",
            ProxyType::VMess => "vmess",
            ProxyType::Vless => "vless",
            ProxyType::Trojan => "trojan",
            ProxyType::Hysteria => "hysteria",
            ProxyType::Hysteria2 => "hysteria2",
            ProxyType::Tuic => "tuic",
            ProxyType::WireGuard => "wireguard",
            ProxyType::Socks5 => "socks5",
            ProxyType::Http => "http",
            ProxyType::AnyTls => "anytls",
        }
    }

    /// Looks up the proxy type for a lower-case link scheme.
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        SCHEMES
            .iter()
            .find(|(key, _)| *key == scheme)
            .map(|(_, proxy_type)| *proxy_type)
    }

    /// Every scheme that decodes to this type.
    pub fn schemes(self) -> impl Iterator<Item = &'static str> {
        SCHEMES
            .iter()
            .filter(move |(_, proxy_type)| *proxy_type == self)
            .map(|(key, _)| *key)
    }
}

/// Represents a proxy configuration.
///
/// One variant per protocol; serializes with a `type` discriminant and
/// kebab-case fields so it can be embedded directly in a `proxies` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Proxy {
    #[serde(rename = "ss")]
    Shadowsocks(ShadowsocksProxy),
    #[serde(rename = "ssr")]
    ShadowsocksR(ShadowsocksRProxy),
    #[serde(rename = "vmess")]
    VMess(VmessProxy),
    #[serde(rename = "vless")]
    Vless(VlessProxy),
    #[serde(rename = "trojan")]
    Trojan(TrojanProxy),
    #[serde(rename = "hysteria")]
    Hysteria(HysteriaProxy),
    #[serde(rename = "hysteria2")]
    Hysteria2(Hysteria2Proxy),
    #[serde(rename = "tuic")]
    Tuic(TuicProxy),
    #[serde(rename = "wireguard")]
    WireGuard(WireGuardProxy),
    #[serde(rename = "socks5")]
    Socks5(Socks5Proxy),
    #[serde(rename = "http")]
    Http(HttpProxy),
    #[serde(rename = "anytls")]
    AnyTls(AnyTlsProxy),
}

impl Proxy {
    pub fn proxy_type(&self) -> ProxyType {
        match self {
            Proxy::Shadowsocks(_) => ProxyType::Shadowsocks,
            Proxy::ShadowsocksR(_) => ProxyType::ShadowsocksR,
            Proxy::VMess(_) => ProxyType::VMess,
            Proxy::Vless(_) => ProxyType::Vless,
            Proxy::Trojan(_) => ProxyType::Trojan,
            Proxy::Hysteria(_) => ProxyType::Hysteria,
            Proxy::Hysteria2(_) => ProxyType::Hysteria2,
            Proxy::Tuic(_) => ProxyType::Tuic,
            Proxy::WireGuard(_) => ProxyType::WireGuard,
            Proxy::Socks5(_) => ProxyType::Socks5,
            Proxy::Http(_) => ProxyType::Http,
            Proxy::AnyTls(_) => ProxyType::AnyTls,
        }
    }

    pub fn name(&self) -> &str {
        self.common().0
    }

    pub fn server(&self) -> &str {
        self.common().1
    }

    pub fn port(&self) -> u16 {
        self.common().2
    }

    fn common(&self) -> (&str, &str, u16) {
        match self {
            Proxy::Shadowsocks(p) => (&p.name, &p.server, p.port),
            Proxy::ShadowsocksR(p) => (&p.name, &p.server, p.port),
            Proxy::VMess(p) => (&p.name, &p.server, p.port),
            Proxy::Vless(p) => (&p.name, &p.server, p.port),
            Proxy::Trojan(p) => (&p.name, &p.server, p.port),
            Proxy::Hysteria(p) => (&p.name, &p.server, p.port),
            Proxy::Hysteria2(p) => (&p.name, &p.server, p.port),
            Proxy::Tuic(p) => (&p.name, &p.server, p.port),
            Proxy::WireGuard(p) => (&p.name, &p.server, p.port),
            Proxy::Socks5(p) => (&p.name, &p.server, p.port),
            Proxy::Http(p) => (&p.name, &p.server, p.port),
            Proxy::AnyTls(p) => (&p.name, &p.server, p.port),
        }
    }
}

/// A `proxies:` document as consumed by Clash-compatible engines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyList {
    pub proxies: Vec<Proxy>,
}
