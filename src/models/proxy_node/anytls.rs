use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AnyTlsProxy {
    pub name: String,
    pub server: String,
    pub port: u16,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpn: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<bool>,
    /// Seconds between idle-session checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_session_check_interval: Option<u32>,
    /// Seconds before an idle session is closed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_session_timeout: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_idle_session: Option<u32>,
}
