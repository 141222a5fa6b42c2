//
//  cctrl-client
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! This module executes exactly one HTTP exchange with the cloudControl API
//! and returns the raw response body or a classified error.
//!
//! ## Features
//!
//! - Authorization header selection (token, Basic, or refusal)
//! - Fixed `Host`, `User-Agent` and `Accept-Encoding` headers
//! - Content type detection for POST/PUT bodies
//! - Status classification (200, 201 and 204 are the only successes)
//! - Togglable TLS verification and custom trust roots
//!
//! ## Wire Format
//!
//! ```text
//! POST /app/ HTTP/1.1
//! Host: api.cloudcontrol.com
//! User-Agent: cctrl-client/0.1.0
//! Accept-Encoding: compress, gzip
//! Authorization: cc_auth_token="<key>"
//! Content-Type: application/x-www-form-urlencoded
//! Content-Length: 42
//!
//! name=myapp&type=python&repository_type=git
//! ```
//!
//! The body of a successful answer is returned untouched; it may still be
//! gzip-compressed and is decoded by [`decode_content`](super::decode_content).

use async_trait::async_trait;
use reqwest::header::{ACCEPT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE, HOST};
use reqwest::{Certificate, Client, Method, StatusCode};
use url::Url;

use super::common::{content_type_for, ApiError};
use crate::auth::AuthMaterial;
use crate::config::ClientConfig;

/// Value of the `Accept-Encoding` header sent on every request.
pub const ACCEPT_ENCODING_VALUE: &str = "compress, gzip";

/// Description of one API call.
///
/// # Fields
///
/// * `method` - HTTP method
/// * `path` - Resource path relative to the base URL, kept byte-for-byte
/// * `body` - Encoded POST/PUT body; ignored for other methods
/// * `allow_anonymous` - Whether the call may go out without authorization
///
/// # Example
///
/// ```rust
/// use cctrl_client::api::ApiRequest;
/// use reqwest::Method;
///
/// let request = ApiRequest::post("/app/", b"name=myapp".to_vec());
/// assert_eq!(request.method, Method::POST);
/// assert!(!request.allow_anonymous);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Resource path, e.g. `/app/myapp/deployment/default/`.
    pub path: String,
    /// Encoded body for POST/PUT.
    pub body: Option<Vec<u8>>,
    /// Only set for the token request.
    pub allow_anonymous: bool,
}

impl ApiRequest {
    /// Creates a request without a body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            allow_anonymous: false,
        }
    }

    /// `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` request with an encoded body.
    pub fn post(path: impl Into<String>, body: Vec<u8>) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    /// `PUT` request with an encoded body.
    pub fn put(path: impl Into<String>, body: Vec<u8>) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    /// `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// `HEAD` request.
    pub fn head(path: impl Into<String>) -> Self {
        Self::new(Method::HEAD, path)
    }

    /// Sets the encoded body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Lets the request go out without any authorization.
    pub fn anonymous(mut self) -> Self {
        self.allow_anonymous = true;
        self
    }

    /// Returns `true` for the methods that carry a body.
    pub fn has_body(&self) -> bool {
        self.method == Method::POST || self.method == Method::PUT
    }
}

/// Joins the base URL and a resource path into the request target.
///
/// The path is appended verbatim: trailing slashes are kept and nothing is
/// collapsed. Trailing slashes of the base URL are dropped so that a base
/// of `https://api.example.com/` does not produce `//`.
///
/// # Errors
///
/// Returns [`ApiError::InvalidUrl`] if the result is not a valid URL.
///
/// # Example
///
/// ```rust
/// use cctrl_client::api::request_url;
///
/// let url = request_url("https://api.example.com", "/app/myapp/")?;
/// assert_eq!(url.as_str(), "https://api.example.com/app/myapp/");
/// # Ok::<(), cctrl_client::api::ApiError>(())
/// ```
pub fn request_url(base_url: &str, path: &str) -> Result<Url, ApiError> {
    let target = format!("{}{}", base_url.trim_end_matches('/'), path);
    Ok(Url::parse(&target)?)
}

/// Value of the `Host` header for a request target, port included.
pub fn host_header(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Returns `true` for the statuses the API uses to signal success.
pub fn is_success(status: StatusCode) -> bool {
    matches!(status.as_u16(), 200 | 201 | 204)
}

/// Formats a status the way it appears on the status line.
pub fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Executes a single API call.
///
/// [`Session`](super::Session) talks to the API through this trait.
/// [`HttpTransport`] is the production implementation; tests can plug in
/// their own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` to `base_url` and returns the raw response body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::AuthorizationRequired`] if `auth` resolves to nothing
    ///   and the request is not anonymous; nothing is sent in that case
    /// - [`ApiError::Transport`] for network and TLS failures
    /// - [`ApiError::HttpStatus`] for statuses other than 200, 201 and 204
    async fn execute(
        &self,
        base_url: &str,
        request: &ApiRequest,
        auth: AuthMaterial<'_>,
    ) -> Result<Vec<u8>, ApiError>;
}

/// `reqwest`-backed [`Transport`].
///
/// The underlying client is built once and shared, so connections are
/// pooled across calls. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// The underlying HTTP client
    http: Client,
}

impl HttpTransport {
    /// Builds the transport from a client configuration.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Io`] if a CA certificate file cannot be read
    /// - [`ApiError::Config`] if a certificate is not valid PEM or the
    ///   HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(!config.ssl_check);

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        if !config.ca_certs.is_empty() {
            builder = builder.tls_built_in_root_certs(false);
            for path in &config.ca_certs {
                let pem = std::fs::read(path)?;
                let certificate = Certificate::from_pem(&pem).map_err(|e| {
                    ApiError::Config(format!("invalid CA certificate {}: {e}", path.display()))
                })?;
                builder = builder.add_root_certificate(certificate);
            }
        }

        if !config.ssl_check {
            tracing::warn!("TLS certificate verification is disabled");
        }

        let http = builder
            .build()
            .map_err(|e| ApiError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        base_url: &str,
        request: &ApiRequest,
        auth: AuthMaterial<'_>,
    ) -> Result<Vec<u8>, ApiError> {
        let url = request_url(base_url, &request.path)?;

        let credential = auth.resolve();
        if credential.is_none() && !request.allow_anonymous {
            return Err(ApiError::AuthorizationRequired);
        }

        let mut builder = self
            .http
            .request(request.method.clone(), url.clone())
            .header(HOST, host_header(&url))
            .header(ACCEPT_ENCODING, ACCEPT_ENCODING_VALUE);

        if let Some(credential) = &credential {
            builder = credential.apply_to_request(builder);
        }

        if request.has_body() {
            let body = request.body.clone().unwrap_or_default();
            builder = builder
                .header(CONTENT_TYPE, content_type_for(&body))
                .header(CONTENT_LENGTH, body.len())
                .body(body);
        }

        tracing::debug!(
            method = %request.method,
            url = %url,
            auth = credential.map_or("none", |c| c.scheme()),
            "Sending request"
        );

        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(status = %status, url = %url, "Received response");

        if !is_success(status) {
            // Drain so the pooled connection can be reused.
            let _ = response.bytes().await;
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                status_line: status_line(status),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_keeps_path() {
        let url = request_url("https://api.example.com", "/app/myapp/").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/app/myapp/");

        let url = request_url("https://api.example.com", "/app/myapp").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/app/myapp");
    }

    #[test]
    fn test_request_url_trailing_base_slash() {
        let url = request_url("https://api.example.com/", "/token/").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/token/");
    }

    #[test]
    fn test_request_url_with_query() {
        let url = request_url(
            "https://api.example.com",
            "/app/a/deployment/b/log/error/?timestamp=1356998400.123456",
        )
        .unwrap();
        assert_eq!(url.path(), "/app/a/deployment/b/log/error/");
        assert_eq!(url.query(), Some("timestamp=1356998400.123456"));
    }

    #[test]
    fn test_request_url_invalid() {
        assert!(matches!(
            request_url("not a url", "/app/"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_host_header() {
        let url = Url::parse("https://api.example.com/app/").unwrap();
        assert_eq!(host_header(&url), "api.example.com");

        let url = Url::parse("http://127.0.0.1:8080/app/").unwrap();
        assert_eq!(host_header(&url), "127.0.0.1:8080");
    }

    #[test]
    fn test_status_classification() {
        assert!(is_success(StatusCode::OK));
        assert!(is_success(StatusCode::CREATED));
        assert!(is_success(StatusCode::NO_CONTENT));
        assert!(!is_success(StatusCode::ACCEPTED));
        assert!(!is_success(StatusCode::NOT_FOUND));
        assert!(!is_success(StatusCode::MOVED_PERMANENTLY));
    }

    #[test]
    fn test_status_line() {
        assert_eq!(status_line(StatusCode::NOT_FOUND), "404 Not Found");
        assert_eq!(status_line(StatusCode::UNAUTHORIZED), "401 Unauthorized");
    }

    #[test]
    fn test_request_constructors() {
        assert!(ApiRequest::post("/app/", Vec::new()).has_body());
        assert!(ApiRequest::put("/app/", Vec::new()).has_body());
        assert!(!ApiRequest::get("/app/").has_body());
        assert!(!ApiRequest::delete("/app/").has_body());
        assert!(ApiRequest::post("/token/", Vec::new()).anonymous().allow_anonymous);
    }

    #[test]
    fn test_transport_builds_with_defaults() {
        assert!(HttpTransport::new(&ClientConfig::default()).is_ok());
        assert!(HttpTransport::new(&ClientConfig::default().with_ssl_check(false)).is_ok());
    }

    #[test]
    fn test_transport_rejects_missing_ca_file() {
        let config = ClientConfig::default().with_ca_cert("/nonexistent/ca.pem");
        assert!(matches!(HttpTransport::new(&config), Err(ApiError::Io(_))));
    }
}
