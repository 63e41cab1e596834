use thiserror::Error;

/// Error raised when a share link cannot be decoded.
///
/// Decoding is all-or-nothing: any of these aborts the link and no partial
/// record is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid {scheme} uri")]
    InvalidUri { scheme: &'static str },

    #[error("Invalid {scheme} uri: missing {field}")]
    MissingField {
        scheme: &'static str,
        field: &'static str,
    },

    #[error("Invalid {scheme} uri: invalid port {value:?}")]
    InvalidPort { scheme: &'static str, value: String },

    #[error("Unknown scheme: {0}")]
    UnknownScheme(String),

    #[error("Unsupported plugin option: {0}")]
    UnsupportedPlugin(String),

    #[error("Unsupported obfs: {0}")]
    UnsupportedObfs(String),

    #[error("Invalid {scheme} uri: {reason}")]
    MalformedPayload {
        scheme: &'static str,
        reason: String,
    },
}

/// Broad failure category of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or incorrect scheme prefix, or an unusable overall shape.
    Structural,
    /// A mandatory field (auth, port) is missing or out of range.
    RequiredField,
    /// The scheme is recognized but a sub-option is not.
    UnsupportedFeature,
    /// Content that should be JSON or a positional format is neither.
    MalformedPayload,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::InvalidUri { .. } => ErrorKind::Structural,
            ParseError::MissingField { .. } | ParseError::InvalidPort { .. } => {
                ErrorKind::RequiredField
            }
            ParseError::UnknownScheme(_)
            | ParseError::UnsupportedPlugin(_)
            | ParseError::UnsupportedObfs(_) => ErrorKind::UnsupportedFeature,
            ParseError::MalformedPayload { .. } => ErrorKind::MalformedPayload,
        }
    }

    pub(crate) fn invalid(scheme: &'static str) -> Self {
        ParseError::InvalidUri { scheme }
    }

    pub(crate) fn missing(scheme: &'static str, field: &'static str) -> Self {
        ParseError::MissingField { scheme, field }
    }

    pub(crate) fn malformed(scheme: &'static str, reason: impl Into<String>) -> Self {
        ParseError::MalformedPayload {
            scheme,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_scheme() {
        assert_eq!(ParseError::invalid("vless").to_string(), "Invalid vless uri");
        assert_eq!(
            ParseError::missing("trojan", "password").to_string(),
            "Invalid trojan uri: missing password"
        );
        assert_eq!(
            ParseError::UnknownScheme("anytl".to_string()).to_string(),
            "Unknown scheme: anytl"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ParseError::invalid("ss").kind(), ErrorKind::Structural);
        assert_eq!(
            ParseError::InvalidPort {
                scheme: "ss",
                value: "0".to_string()
            }
            .kind(),
            ErrorKind::RequiredField
        );
        assert_eq!(
            ParseError::UnsupportedPlugin("kcptun".to_string()).kind(),
            ErrorKind::UnsupportedFeature
        );
        assert_eq!(
            ParseError::malformed("vmess", "bad json").kind(),
            ErrorKind::MalformedPayload
        );
    }
}
