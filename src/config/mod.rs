//! Configuration module for Chatdrop
//!
//! Handles loading and parsing of YAML configuration files with support for
//! environment variable expansion and validation. The caller is expected to
//! re-read configuration before each upload attempt; the upload service never
//! caches it.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Validate that a URL starts with http:// or https://
fn is_valid_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Upload endpoint configuration.
///
/// Mirrors the host settings store one-to-one: where to send uploads, which
/// token to present, and how large a file may be. Every field has a
/// placeholder default so a fresh install parses without a config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// URL that receives uploads
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Static credential, sent as a Bearer header and duplicated as a form field
    #[serde(default = "default_bearer_token")]
    pub bearer_token: String,

    /// Maximum upload size in MiB
    #[serde(default = "default_max_upload_size_mib")]
    pub max_upload_size_mib: u64,
}

impl UploadConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        ConfigLoader::load(path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_http_url(&self.endpoint_url) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid endpoint URL '{}': must start with http:// or https://",
                self.endpoint_url
            )));
        }

        if self.max_upload_size_mib == 0 {
            return Err(ConfigError::ValidationError(
                "max_upload_size_mib must be greater than zero".into(),
            ));
        }

        Ok(())
    }

    /// Configured size limit in bytes
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_size_mib * 1024 * 1024
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            bearer_token: default_bearer_token(),
            max_upload_size_mib: default_max_upload_size_mib(),
        }
    }
}

fn default_endpoint_url() -> String {
    "https://example.com/upload".to_string()
}

fn default_bearer_token() -> String {
    "INSERT TOKEN HERE".to_string()
}

fn default_max_upload_size_mib() -> u64 {
    500
}
