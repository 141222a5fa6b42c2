//
//  cctrl-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module provides [`ClientConfig`], the explicit configuration a
//! [`Session`](crate::api::Session) is built from.
//!
//! ## Overview
//!
//! Every setting that affects how requests are sent lives here and is
//! resolved once, when the session is constructed:
//!
//! - **Base URL**: the API origin every resource path is appended to
//! - **TLS**: certificate verification and custom trust roots
//! - **Deadline**: optional per-request timeout
//! - **User-Agent**: library identification sent on every call
//!
//! ## Environment
//!
//! `CCTRL_API_URL` overrides the base URL when the configuration is built
//! with [`ClientConfig::from_env`] or [`ClientConfig::load`].
//!
//! ## Example Configuration File
//!
//! ```toml
//! base_url = "https://api.cloudcontrol.com"
//! ssl_check = true
//! ca_certs = ["/etc/ssl/private-ca.pem"]
//! timeout_ms = 30000
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use cctrl_client::config::ClientConfig;
//!
//! let config = ClientConfig::default()
//!     .with_base_url("https://api.example.com")
//!     .with_timeout(Duration::from_secs(30));
//!
//! assert_eq!(config.base_url, "https://api.example.com");
//! assert!(config.ssl_check);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::common::ApiError;

/// Default API origin.
pub const DEFAULT_API_URL: &str = "https://api.cloudcontrol.com";

/// Environment variable overriding the API origin.
pub const API_URL_ENV: &str = "CCTRL_API_URL";

/// Configuration of a cloudControl API client.
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `base_url` | `"https://api.cloudcontrol.com"` |
/// | `ssl_check` | `true` |
/// | `ca_certs` | empty (built-in trust roots) |
/// | `timeout_ms` | `None` (no deadline) |
/// | `user_agent` | `"cctrl-client/<version>"` |
///
/// # Notes
///
/// - `ClientConfig::default()` never reads the environment; use
///   [`from_env`](Self::from_env) for the `CCTRL_API_URL` override.
/// - When `ca_certs` is non-empty the listed PEM certificates replace the
///   built-in trust roots rather than adding to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API origin, e.g. `https://api.cloudcontrol.com`.
    ///
    /// Resource paths are appended verbatim, so it should not end with a
    /// slash.
    pub base_url: String,

    /// Whether TLS certificates are verified.
    ///
    /// Disable only for self-signed test environments.
    pub ssl_check: bool,

    /// PEM files of trusted root certificates.
    pub ca_certs: Vec<PathBuf>,

    /// Request deadline in milliseconds.
    ///
    /// When it fires the call fails with [`ApiError::Cancelled`].
    pub timeout_ms: Option<u64>,

    /// `User-Agent` header sent on every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            ssl_check: true,
            ca_certs: Vec::new(),
            timeout_ms: None,
            user_agent: crate::USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Default configuration with the `CCTRL_API_URL` override applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Loads the configuration from a TOML file.
    ///
    /// Missing keys take their default value. The `CCTRL_API_URL`
    /// override is applied after the file is read.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Io`] if the file cannot be read
    /// - [`ApiError::Config`] if it is not valid TOML for this struct
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?.with_env_overrides())
    }

    /// Parses the configuration from TOML text, without env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the text is not a valid configuration.
    pub fn from_toml_str(content: &str) -> Result<Self, ApiError> {
        toml::from_str(content).map_err(|e| ApiError::Config(e.to_string()))
    }

    /// Applies the `CCTRL_API_URL` override, if set and non-empty.
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.is_empty() => {
                tracing::debug!("Using API URL from {}", API_URL_ENV);
                self.with_base_url(url)
            }
            _ => self,
        }
    }

    /// Sets the API origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Enables or disables TLS certificate verification.
    pub fn with_ssl_check(mut self, ssl_check: bool) -> Self {
        self.ssl_check = ssl_check;
        self
    }

    /// Adds a PEM file of trusted root certificates.
    pub fn with_ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_certs.push(path.into());
        self
    }

    /// Sets the request deadline, kept to the millisecond.
    ///
    /// A non-zero deadline shorter than one millisecond is rounded up so it
    /// never turns into a zero timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        let millis = if millis == 0 && !timeout.is_zero() { 1 } else { millis };
        self.timeout_ms = Some(millis);
        self
    }

    /// Sets the `User-Agent` header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the request deadline, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert!(config.ssl_check);
        assert!(config.ca_certs.is_empty());
        assert_eq!(config.timeout(), None);
        assert!(config.user_agent.starts_with("cctrl-client/"));
    }

    #[test]
    fn test_from_toml_str() {
        let config = ClientConfig::from_toml_str(
            r#"
            base_url = "https://api.example.com"
            ssl_check = false
            ca_certs = ["/etc/ssl/ca.pem"]
            timeout_ms = 15000
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://api.example.com");
        assert!(!config.ssl_check);
        assert_eq!(config.ca_certs, vec![PathBuf::from("/etc/ssl/ca.pem")]);
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.user_agent, crate::USER_AGENT);
    }

    #[test]
    fn test_from_toml_str_partial() {
        let config = ClientConfig::from_toml_str("ssl_check = false").unwrap();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert!(!config.ssl_check);
    }

    #[test]
    fn test_from_toml_str_invalid() {
        assert!(matches!(
            ClientConfig::from_toml_str("ssl_check = \"maybe\""),
            Err(ApiError::Config(_))
        ));
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::default()
            .with_base_url("http://localhost:8080")
            .with_ssl_check(false)
            .with_ca_cert("/tmp/ca.pem")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("tests/1.0");

        assert_eq!(config.base_url, "http://localhost:8080");
        assert!(!config.ssl_check);
        assert_eq!(config.ca_certs.len(), 1);
        assert_eq!(config.timeout_ms, Some(5000));
        assert_eq!(config.user_agent, "tests/1.0");
    }

    #[test]
    fn test_sub_second_timeout() {
        let config = ClientConfig::default().with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout(), Some(Duration::from_millis(500)));

        let config = ClientConfig::default().with_timeout(Duration::from_millis(1900));
        assert_eq!(config.timeout(), Some(Duration::from_millis(1900)));

        let config = ClientConfig::default().with_timeout(Duration::from_micros(10));
        assert_eq!(config.timeout(), Some(Duration::from_millis(1)));
    }
}
