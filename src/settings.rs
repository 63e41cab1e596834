use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid YAML settings: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Serialization format of the `proxies` document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Settings of the command line converter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keep going when a link in a batch fails to decode
    pub skip_failed_links: bool,
    /// Try to Base64-decode the whole input before splitting it into links
    pub try_base64_batch: bool,
    pub output_format: OutputFormat,
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
}

pub fn default_true() -> bool {
    true
}

pub fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            skip_failed_links: default_true(),
            try_base64_batch: default_true(),
            output_format: OutputFormat::default(),
            log_level: default_log_level(),
        }
    }
}

/// Source format of a settings document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceFormat {
    Toml,
    Yaml,
}

impl Settings {
    /// Load settings from a TOML or YAML file
    ///
    /// The format follows the file extension (`.toml`, `.yaml`, `.yml`).
    /// Other files are tried as TOML first, then as YAML.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let format = match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => Some(SourceFormat::Toml),
            Some("yaml") | Some("yml") => Some(SourceFormat::Yaml),
            _ => None,
        };
        Self::load_from_content_as(&content, format)
    }

    /// Parse settings content, guessing the format when none is given
    pub fn load_from_content(content: &str) -> Result<Self, SettingsError> {
        Self::load_from_content_as(content, None)
    }

    fn load_from_content_as(
        content: &str,
        format: Option<SourceFormat>,
    ) -> Result<Self, SettingsError> {
        match format {
            Some(SourceFormat::Toml) => Ok(toml::from_str(content)?),
            Some(SourceFormat::Yaml) => Ok(Self::from_yaml(content)?),
            None => match toml::from_str(content) {
                Ok(settings) => Ok(settings),
                Err(toml_err) => {
                    debug!("settings are not TOML ({}), trying YAML", toml_err);
                    Ok(Self::from_yaml(content)?)
                }
            },
        }
    }

    fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty YAML document is null rather than an empty mapping
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_yaml::from_str(content)
    }
}
