pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;

// Re-export the main proxy types for easier access
pub use models::{Proxy, ProxyList, ProxyType};

// Re-export the decoding entry points
pub use parser::{explode_sub, parse_uri, BatchResult, ErrorKind, LinkFailure, ParseError};

pub use settings::{OutputFormat, Settings};
