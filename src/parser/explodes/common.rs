use log::{debug, warn};

use crate::models::{Proxy, ProxyType};
use crate::parser::error::{ParseError, Result};
use crate::parser::scheme::normalize_scheme;
use crate::utils::base64::decode_base64_or_original;

/// Explode a share link into a Proxy object
///
/// The scheme token is case-folded and looked up in the scheme table; the
/// matching decoder receives the normalized link. An unrecognized scheme is
/// an [`ParseError::UnknownScheme`] error.
pub fn explode(link: &str) -> Result<Proxy> {
    let normalized = normalize_scheme(link);
    let proxy_type = ProxyType::from_scheme(&normalized.scheme)
        .ok_or_else(|| ParseError::UnknownScheme(normalized.scheme.clone()))?;
    debug!(
        "decoding {} link as {}",
        normalized.scheme,
        proxy_type.type_key()
    );

    let link = normalized.link.as_str();
    match proxy_type {
        ProxyType::Shadowsocks => super::ss::explode_ss(link),
        ProxyType::ShadowsocksR => super::ssr::explode_ssr(link),
        ProxyType::VMess => super::vmess::explode_vmess(link),
        ProxyType::Vless => super::vless::explode_vless(link),
        ProxyType::Trojan => super::trojan::explode_trojan(link),
        ProxyType::Hysteria => super::hysteria::explode_hysteria(link),
        ProxyType::Hysteria2 => super::hysteria2::explode_hysteria2(link),
        ProxyType::Tuic => super::tuic::explode_tuic(link),
        ProxyType::WireGuard => super::wireguard::explode_wireguard(link),
        ProxyType::Socks5 => super::socks::explode_socks(link),
        ProxyType::Http => super::http::explode_http(link),
        ProxyType::AnyTls => super::anytls::explode_anytls(link),
    }
}

/// A link of a batch that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFailure {
    /// 1-based line number within the (decoded) batch.
    pub line: usize,
    pub link: String,
    pub error: ParseError,
}

/// Outcome of decoding a batch of links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub proxies: Vec<Proxy>,
    pub failures: Vec<LinkFailure>,
}

impl BatchResult {
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty() && self.failures.is_empty()
    }
}

/// Explode subscription content into Proxy objects
///
/// With `try_base64` set, the whole block is first decoded as Base64 and
/// used as literal text when that fails. The result is split into lines;
/// blank lines are skipped and every other line is decoded on its own, so a
/// bad link only produces a [`LinkFailure`] for that line.
pub fn explode_sub(sub: &str, try_base64: bool) -> BatchResult {
    let sub = sub.trim();
    let content = if try_base64 {
        decode_base64_or_original(sub)
    } else {
        sub.to_string()
    };

    let mut result = BatchResult::default();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match explode(line) {
            Ok(proxy) => result.proxies.push(proxy),
            Err(error) => {
                warn!("skipping link on line {}: {}", index + 1, error);
                result.failures.push(LinkFailure {
                    line: index + 1,
                    link: line.to_string(),
                    error,
                });
            }
        }
    }
    debug!(
        "decoded {} links, {} failed",
        result.proxies.len(),
        result.failures.len()
    );
    result
}
