use log::debug;

use crate::models::{Proxy, ProxyType, ShadowsocksRProxy};
use crate::parser::error::{ParseError, Result};
use crate::parser::fields::{default_name, parse_required_port, resolve_cipher};
use crate::parser::query::Query;
use crate::parser::scheme::strip_scheme;
use crate::parser::uri::decode_name;
use crate::utils::base64::decode_base64_or_original;
use crate::utils::url::{split_fragment, strip_brackets};

const SCHEME: &str = "ssr";

/// Markers that open the protocol field. The SSR layout predates URL
/// syntax, so the server part is everything before the first one.
const PROTOCOL_MARKERS: &[&str] = &[":origin", ":auth_"];

/// Parse a ShadowsocksR link into a Proxy object
///
/// Layout once decoded:
/// `server:port:protocol:cipher:obfs:BASE64(password)/?obfsparam=..&protoparam=..&remarks=..`
/// where every query value is Base64 as well.
pub fn explode_ssr(ssr: &str) -> Result<Proxy> {
    let content = strip_scheme(ssr, &[SCHEME], SCHEME)?;
    let (content, fragment) = split_fragment(content);
    let decoded = decode_base64_or_original(content.trim());

    // Split off the parameter block
    let (main, raw_query) = match decoded.split_once("/?") {
        Some((main, query)) => (main, Some(query)),
        None => match decoded.split_once('?') {
            Some((main, query)) => (main, Some(query)),
            None => (decoded.as_str(), None),
        },
    };
    let main = main.trim_end_matches('/');

    let marker = PROTOCOL_MARKERS
        .iter()
        .filter_map(|m| main.find(m))
        .min()
        .ok_or_else(|| ParseError::invalid(SCHEME))?;
    let (server_port, rest) = (&main[..marker], &main[marker + 1..]);

    // Extract server and port
    let (server, port) = match server_port.rsplit_once(':') {
        Some((server, port)) => (strip_brackets(server.trim()), Some(port)),
        None => (server_port.trim(), None),
    };
    if server.is_empty() {
        return Err(ParseError::invalid(SCHEME));
    }
    let port = parse_required_port(port, SCHEME)?;

    // protocol:cipher:obfs:password
    let fields: Vec<&str> = rest.splitn(4, ':').collect();
    if fields.len() < 4 {
        return Err(ParseError::invalid(SCHEME));
    }
    let (protocol, cipher, obfs, password) = (fields[0], fields[1], fields[2], fields[3]);
    debug!("ssr protocol {} obfs {}", protocol, obfs);

    let query = Query::parse(raw_query);
    let param = |key: &str| query.get(key).and_then(decode_param);

    let name = decode_name(fragment)
        .or_else(|| param("remarks"))
        .unwrap_or_else(|| default_name(ProxyType::ShadowsocksR.label(), server, port));

    Ok(Proxy::ShadowsocksR(ShadowsocksRProxy {
        name,
        server: server.to_string(),
        port,
        cipher: resolve_cipher(Some(cipher)),
        password: decode_base64_or_original(password),
        protocol: non_empty_or(protocol, "origin"),
        obfs: non_empty_or(obfs, "plain"),
        protocol_param: param("protoparam"),
        obfs_param: param("obfsparam"),
        udp: query.flag("udp"),
    }))
}

/// Base64-decodes an SSR parameter and strips all whitespace; blank
/// results are dropped.
fn decode_param(raw: &str) -> Option<String> {
    let value: String = decode_base64_or_original(raw)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn non_empty_or(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}
