//! Core data models for the application
//!
//! This module contains the canonical proxy configuration types produced by
//! the link parsers, separated from the parsing logic itself.
//!
//! # Usage
//!
//! ```rust
//! use linkparser::models::{Proxy, ProxyType, TrojanProxy};
//!
//! let proxy = Proxy::Trojan(TrojanProxy {
//!     name: "Trojan example.com:443".to_string(),
//!     server: "example.com".to_string(),
//!     port: 443,
//!     password: "secret".to_string(),
//!     ..Default::default()
//! });
//! assert_eq!(proxy.proxy_type(), ProxyType::Trojan);
//! ```
//!
//! Optional attributes are `Option` fields and are omitted from serialized
//! output when unset.

mod proxy;
pub mod proxy_node;

pub use proxy::*;
pub use proxy_node::*;
