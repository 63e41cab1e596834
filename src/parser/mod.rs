//! Share link decoding
//!
//! Every supported scheme has its own decoder under [`explodes`]; they share
//! the URL-like splitter in [`uri`], the query map in [`query`] and the typed
//! field helpers in [`fields`]. [`parse_uri`] is the single entry point.
//!
//! ```rust
//! use linkparser::parser::parse_uri;
//!
//! let proxy = parse_uri("ss://YWVzLTI1Ni1nY206cGFzc3dvcmQ=@example.com:8388#MyServer").unwrap();
//! assert_eq!(proxy.name(), "MyServer");
//! assert_eq!(proxy.port(), 8388);
//! ```

pub mod error;
pub mod explodes;
pub mod fields;
pub mod query;
pub mod scheme;
pub mod uri;

pub use error::{ErrorKind, ParseError, Result};
pub use explodes::{explode_sub, BatchResult, LinkFailure};

use crate::models::Proxy;

/// Decodes one share link into a proxy record.
pub fn parse_uri(link: &str) -> Result<Proxy> {
    explodes::explode(link)
}
