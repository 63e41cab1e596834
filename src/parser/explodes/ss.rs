use log::debug;

use crate::models::{ObfsPluginOpts, PluginOpts, Proxy, ProxyType, ShadowsocksProxy, V2rayPluginOpts};
use crate::parser::error::{ParseError, Result};
use crate::parser::fields::{default_name, parse_ip_version, parse_required_port, resolve_cipher};
use crate::parser::query::Query;
use crate::parser::scheme::strip_scheme;
use crate::parser::uri::decode_name;
use crate::utils::base64::decode_base64_or_original;
use crate::utils::url::{split_fragment, strip_brackets, url_decode};

const SCHEME: &str = "ss";

/// Parse a Shadowsocks link into a Proxy object
///
/// Two layouts are understood, tried in this order:
/// 1. SIP002: `ss://userinfo@server:port[/][?query][#name]`, where
///    `userinfo` is either Base64 of `cipher:password` or literal
///    (percent-encoded) `cipher:password`.
/// 2. Legacy: `ss://BASE64(cipher:password@server:port)[?query][#name]`.
pub fn explode_ss(ss: &str) -> Result<Proxy> {
    let content = strip_scheme(ss, &[SCHEME], SCHEME)?;
    let (content, fragment) = split_fragment(content);
    let (main, raw_query) = match content.split_once('?') {
        Some((main, query)) => (main, Some(query)),
        None => (content, None),
    };

    let (user_info, server_port) = match split_sip002(main) {
        Some((user_info, server_port)) => {
            debug!("ss link in SIP002 layout");
            (decode_user_info(user_info), server_port.to_string())
        }
        None => {
            debug!("ss link in legacy Base64 layout");
            let decoded = decode_base64_or_original(main.trim_end_matches('/'));
            let (user_info, server_port) =
                split_sip002(&decoded).ok_or_else(|| ParseError::invalid(SCHEME))?;
            (user_info.to_string(), server_port.to_string())
        }
    };

    let (server, port) = split_server_port(&server_port)?;
    let (cipher, password) = match user_info.split_once(':') {
        Some((cipher, password)) => (Some(cipher), password),
        None => (None, user_info.as_str()),
    };

    let query = Query::parse(raw_query);
    let mut node = ShadowsocksProxy {
        name: decode_name(fragment)
            .unwrap_or_else(|| default_name(ProxyType::Shadowsocks.label(), &server, port)),
        server,
        port,
        cipher: resolve_cipher(cipher),
        password: password.to_string(),
        udp: query.flag("udp"),
        udp_over_tcp: query.flag_of(&["uot", "udp-over-tcp"]).filter(|&v| v),
        tfo: query.flag("tfo").filter(|&v| v),
        ip_version: parse_ip_version(query.get("ip-version")),
        ..Default::default()
    };

    if let Some(plugin) = query.non_blank("plugin") {
        node.set_plugin(parse_plugin(plugin)?);
    } else if let Some(blob) = query.non_blank("v2ray-plugin") {
        node.set_plugin(parse_v2ray_plugin_blob(blob)?);
    }

    Ok(Proxy::Shadowsocks(node))
}

/// Splits `userinfo@server:port` at the last `@`.
fn split_sip002(main: &str) -> Option<(&str, &str)> {
    let (user_info, server_port) = main.rsplit_once('@')?;
    Some((user_info, server_port.trim_end_matches('/')))
}

/// SIP002 userinfo is Base64 for stream/AEAD ciphers and percent-encoded
/// plain text for 2022 ciphers. Base64 padding may itself be
/// percent-encoded (`%3D`), so percent-decoding comes first.
fn decode_user_info(user_info: &str) -> String {
    decode_base64_or_original(&url_decode(user_info))
}

fn split_server_port(server_port: &str) -> Result<(String, u16)> {
    // A port is mandatory, so a missing `:port` is reported as such
    let (server, port) = match server_port.rsplit_once(':') {
        Some((server, port)) => (server, Some(port)),
        None => (server_port, None),
    };
    let server = strip_brackets(server.trim());
    if server.is_empty() {
        return Err(ParseError::invalid(SCHEME));
    }
    let port = parse_required_port(port, SCHEME)?;
    Ok((server.to_string(), port))
}

/// Decodes a SIP003 `plugin` value such as
/// `obfs-local;obfs=http;obfs-host=example.com`.
fn parse_plugin(plugin: &str) -> Result<PluginOpts> {
    let mut parts = plugin.split(';');
    let name = parts.next().unwrap_or_default().trim();
    let mut opts: Vec<(&str, Option<&str>)> = Vec::new();
    for part in parts {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.split_once('=') {
            Some((k, v)) => opts.push((k.trim(), Some(v.trim()))),
            None => opts.push((part, None)),
        }
    }
    let value = |key: &str| {
        opts.iter()
            .rev()
            .find(|(k, _)| *k == key)
            .and_then(|(_, v)| *v)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    let present = |key: &str| opts.iter().any(|(k, _)| *k == key);

    match name {
        "obfs-local" | "simple-obfs" => Ok(PluginOpts::Obfs(ObfsPluginOpts {
            mode: value("obfs"),
            host: value("obfs-host"),
        })),
        "v2ray-plugin" => Ok(PluginOpts::V2ray(V2rayPluginOpts {
            mode: Some(value("mode").unwrap_or_else(|| "websocket".to_string())),
            host: value("obfs-host").or_else(|| value("host")),
            path: value("path"),
            tls: present("tls").then_some(true),
            mux: present("mux").then_some(true),
            ..Default::default()
        })),
        other => Err(ParseError::UnsupportedPlugin(other.to_string())),
    }
}

/// Decodes the legacy `v2ray-plugin=<BASE64(JSON)>` query parameter.
fn parse_v2ray_plugin_blob(blob: &str) -> Result<PluginOpts> {
    let json = decode_base64_or_original(blob);
    serde_json::from_str::<V2rayPluginOpts>(&json)
        .map(PluginOpts::V2ray)
        .map_err(|e| ParseError::malformed(SCHEME, format!("v2ray-plugin options: {}", e)))
}
