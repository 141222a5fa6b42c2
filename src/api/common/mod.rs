//
//  cctrl-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! This module provides the types shared by every layer of the client: the
//! unified error type and the form payload used for POST/PUT bodies.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`FormData`] - Ordered `application/x-www-form-urlencoded` multimap
//! - [`content_type_for`] - Content type detection for encoded bodies
//!
//! # Example
//!
//! ```rust
//! use cctrl_client::api::common::{ApiError, FormData};
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::AuthorizationRequired) => println!("Please authenticate first"),
//!         Err(e) if e.is_unauthorized() => println!("Token expired, authenticate again"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//!
//! let form = FormData::new().with("name", "myapp").with("type", "python");
//! assert_eq!(form.encode(), "name=myapp&type=python");
//! ```

use serde::Serialize;
use thiserror::Error;

/// Content type sent with form-encoded POST/PUT bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Content type sent when the body is a JSON document.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Unified error type for all cloudControl API operations.
///
/// Every operation of the client returns its failure as one of these
/// variants. There is no partial success: a call either returns its decoded
/// value or exactly one `ApiError`.
///
/// # Variants
///
/// | Variant | Description | Retried |
/// |---------|-------------|---------|
/// | `AuthorizationRequired` | No token and no credentials for the call | No |
/// | `Transport` | DNS, TLS, connection or protocol failure | No |
/// | `HttpStatus` | Server answered outside 200/201/204 | No |
/// | `Decode` | Body is neither plain nor gzip-wrapped JSON | No |
/// | `Cancelled` | Cancellation token or deadline fired mid-request | No |
///
/// The remaining variants cover local failures (URLs, files, configuration,
/// typed record mapping) that happen before or after the HTTP exchange.
///
/// # Notes
///
/// - A `401` answer is an `HttpStatus`; use [`ApiError::is_unauthorized`]
///   to decide whether to authenticate again.
/// - `reqwest` timeouts are reported as `Cancelled`, every other
///   `reqwest::Error` as `Transport`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The call requires authentication but neither a token nor an
    /// email/password pair is available.
    ///
    /// Raised before any network traffic happens.
    #[error("Authorization required")]
    AuthorizationRequired,

    /// A network-level error occurred during the request.
    ///
    /// This covers connection failures, DNS resolution errors, TLS
    /// handshake failures and other transport-layer issues.
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a status outside `{200, 201, 204}`.
    ///
    /// # Fields
    ///
    /// - `status` - The numeric status code
    /// - `status_line` - The literal status line, e.g. `"404 Not Found"`
    #[error("HTTP error: {status_line}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: u16,
        /// Status line as received, e.g. `"401 Unauthorized"`.
        status_line: String,
    },

    /// The response body could not be decoded.
    ///
    /// Raised when a body is neither valid JSON nor a gzip stream wrapping
    /// valid JSON, or when a token response is not a JSON object of strings.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The request was cancelled before it completed.
    ///
    /// Raised when the session's cancellation token fires or the configured
    /// request deadline elapses.
    #[error("Request cancelled")]
    Cancelled,

    /// The base URL joined with the resource path is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A decoded response does not have the shape of the requested record.
    #[error("Field mapping error: {0}")]
    FieldMapping(#[source] serde_json::Error),

    /// The credentials file is malformed.
    #[error("Invalid credentials file: {0}")]
    Credentials(String),

    /// The client configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An endpoint template was rendered with the wrong arguments.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Cancelled
        } else {
            Self::Transport(err)
        }
    }
}

impl ApiError {
    /// Returns the HTTP status code for `HttpStatus` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Checks whether the server rejected the credentials (HTTP 401).
    ///
    /// Tokens expire server-side; the client never tracks expiry itself.
    /// A `true` here means the caller should authenticate again.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Ordered multimap of form fields for POST/PUT bodies.
///
/// Keys may repeat and insertion order is kept on the wire.
///
/// # Example
///
/// ```rust
/// use cctrl_client::api::common::FormData;
///
/// let mut form = FormData::new();
/// form.add("name", "my app").add("repository_type", "git");
///
/// assert_eq!(form.get("name"), Some("my app"));
/// assert_eq!(form.encode(), "name=my+app&repository_type=git");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, keeping any earlier value for the same key.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Builder-style variant of [`add`](Self::add).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(key, value);
        self
    }

    /// Appends a field whose value is the JSON encoding of `value`.
    ///
    /// Add-on endpoints take their settings as a JSON object carried inside
    /// a single form field.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::FieldMapping`] if `value` cannot be serialized.
    pub fn add_json<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<&mut Self, ApiError> {
        let encoded = serde_json::to_string(value).map_err(ApiError::FieldMapping)?;
        Ok(self.add(key, encoded))
    }

    /// Returns the first value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value stored under `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Number of fields, counting repeated keys.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encodes the form as `application/x-www-form-urlencoded`.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Picks the `Content-Type` for an encoded POST/PUT body.
///
/// Bodies that are a JSON object or array are sent as `application/json`;
/// everything else is form-encoded.
///
/// # Example
///
/// ```rust
/// use cctrl_client::api::common::{content_type_for, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE};
///
/// assert_eq!(content_type_for(br#"{"name":"mysql.free"}"#), JSON_CONTENT_TYPE);
/// assert_eq!(content_type_for(b"name=myapp"), FORM_CONTENT_TYPE);
/// assert_eq!(content_type_for(b""), FORM_CONTENT_TYPE);
/// ```
pub fn content_type_for(body: &[u8]) -> &'static str {
    let starts_like_json = body
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'{' || *b == b'[');

    if starts_like_json && serde_json::from_slice::<serde::de::IgnoredAny>(body).is_ok() {
        JSON_CONTENT_TYPE
    } else {
        FORM_CONTENT_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_keeps_order_and_duplicates() {
        let form = FormData::new()
            .with("addon", "mysql.free")
            .with("alias", "a.example.com")
            .with("alias", "b.example.com");

        assert_eq!(form.len(), 3);
        assert_eq!(form.get("alias"), Some("a.example.com"));
        assert_eq!(form.get_all("alias"), vec!["a.example.com", "b.example.com"]);
        assert_eq!(
            form.encode(),
            "addon=mysql.free&alias=a.example.com&alias=b.example.com"
        );
    }

    #[test]
    fn test_form_escapes_reserved_characters() {
        let form = FormData::new().with("url", "http://example.com/cron?a=1&b=2");
        assert_eq!(
            form.encode(),
            "url=http%3A%2F%2Fexample.com%2Fcron%3Fa%3D1%26b%3D2"
        );
    }

    #[test]
    fn test_form_add_json() {
        let mut form = FormData::new();
        form.add("addon", "config.free");
        form.add_json("options", &serde_json::json!({"foo": "bar"}))
            .unwrap();

        assert_eq!(form.get("options"), Some(r#"{"foo":"bar"}"#));
    }

    #[test]
    fn test_empty_form() {
        let form = FormData::new();
        assert!(form.is_empty());
        assert_eq!(form.encode(), "");
    }

    #[test]
    fn test_content_type_detection() {
        assert_eq!(content_type_for(b"  [1, 2]"), JSON_CONTENT_TYPE);
        assert_eq!(content_type_for(br#"{"a":"b"}"#), JSON_CONTENT_TYPE);
        assert_eq!(content_type_for(b"{not json"), FORM_CONTENT_TYPE);
        assert_eq!(content_type_for(b"name=x&type=y"), FORM_CONTENT_TYPE);
    }

    #[test]
    fn test_unauthorized_helper() {
        let err = ApiError::HttpStatus {
            status: 401,
            status_line: "401 Unauthorized".to_string(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
        assert!(!ApiError::AuthorizationRequired.is_unauthorized());
        assert_eq!(err.to_string(), "HTTP error: 401 Unauthorized");
    }
}
