//
//  cctrl-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! This module provides the authentication material used by the transport:
//! the server-issued [`Token`], the email/password [`Credentials`] used to
//! obtain it, and the rule that picks which of the two goes on a request.
//!
//! ## Supported Authentication Methods
//!
//! - **Token**: `Authorization: cc_auth_token="<key>"`. Used for every
//!   resource call once a token has been issued.
//! - **Basic**: `Authorization: Basic <base64(email:password)>`. Used to
//!   obtain a token from `POST /token/`.
//!
//! ## Module Structure
//!
//! - [`token`]: The [`Token`] value object and its file persistence
//!
//! ## Example
//!
//! ```rust
//! use cctrl_client::auth::{AuthMaterial, Credentials, Token};
//!
//! let token = Token::from_key("abc123");
//! let credentials = Credentials::new("user@example.com", "secret");
//!
//! // A token always wins over credentials.
//! let material = AuthMaterial::new(Some(&token), Some(&credentials));
//! let header = material.resolve().map(|c| c.header_value());
//! assert_eq!(header.as_deref(), Some("cc_auth_token=\"abc123\""));
//! ```

mod token;

pub use token::*;

use std::fmt;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;

use crate::api::common::ApiError;

/// Email and password of a cloudControl account.
///
/// Only used to obtain a [`Token`]; the session never keeps them.
///
/// # Notes
///
/// - `Debug` output redacts the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account email address.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns `true` if both email and password are non-empty.
    ///
    /// Incomplete credentials are never sent as Basic authentication.
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Reads credentials from a file.
///
/// The file holds the email on its first line and the password on its
/// second. Anything after the second line is ignored.
///
/// # Errors
///
/// - [`ApiError::Io`] if the file cannot be read
/// - [`ApiError::Credentials`] if the file has fewer than two lines
///
/// # Example
///
/// ```rust,no_run
/// use cctrl_client::auth::read_credentials_file;
///
/// let credentials = read_credentials_file("/home/me/.cctrl/credentials")?;
/// println!("Authenticating as {}", credentials.email);
/// # Ok::<(), cctrl_client::api::ApiError>(())
/// ```
pub fn read_credentials_file(path: impl AsRef<Path>) -> Result<Credentials, ApiError> {
    let content = std::fs::read_to_string(path)?;
    let mut lines = content.lines();

    match (lines.next(), lines.next()) {
        (Some(email), Some(password)) => Ok(Credentials::new(email, password)),
        _ => Err(ApiError::Credentials(
            "expected the email on the first line and the password on the second".to_string(),
        )),
    }
}

/// The authentication actually attached to one request.
///
/// Produced by [`AuthMaterial::resolve`].
#[derive(Debug, Clone, Copy)]
pub enum AuthCredential<'a> {
    /// Server-issued token, sent as `cc_auth_token="<key>"`.
    Token(&'a Token),
    /// Email/password pair, sent as HTTP Basic authentication.
    Basic(&'a Credentials),
}

impl AuthCredential<'_> {
    /// Returns the value of the `Authorization` header for this credential.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cctrl_client::auth::{AuthCredential, Credentials};
    ///
    /// let credentials = Credentials::new("user@example.com", "secret");
    /// assert_eq!(
    ///     AuthCredential::Basic(&credentials).header_value(),
    ///     "Basic dXNlckBleGFtcGxlLmNvbTpzZWNyZXQ="
    /// );
    /// ```
    pub fn header_value(&self) -> String {
        match self {
            Self::Token(token) => format!("cc_auth_token=\"{}\"", token.key()),
            Self::Basic(credentials) => {
                let raw = format!("{}:{}", credentials.email, credentials.password);
                format!("Basic {}", STANDARD.encode(raw))
            }
        }
    }

    /// Adds the `Authorization` header to a request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, self.header_value())
    }

    /// Short name of the scheme, safe to log.
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Token(_) => "token",
            Self::Basic(_) => "basic",
        }
    }
}

/// Everything a request could authenticate with.
///
/// # Priority
///
/// 1. A token with a non-empty key
/// 2. Complete credentials (non-empty email and password)
/// 3. Nothing: the transport refuses the call with
///    [`ApiError::AuthorizationRequired`] unless the request is the token
///    request, the only one allowed to go out anonymously
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthMaterial<'a> {
    /// Token held by the session, if any.
    pub token: Option<&'a Token>,
    /// Credentials supplied for this call, if any.
    pub credentials: Option<&'a Credentials>,
}

impl<'a> AuthMaterial<'a> {
    /// Bundles a token and credentials.
    pub fn new(token: Option<&'a Token>, credentials: Option<&'a Credentials>) -> Self {
        Self { token, credentials }
    }

    /// Authentication by token only.
    pub fn token(token: &'a Token) -> Self {
        Self::new(Some(token), None)
    }

    /// Authentication by credentials only.
    pub fn credentials(credentials: &'a Credentials) -> Self {
        Self::new(None, Some(credentials))
    }

    /// Picks the credential to attach, following the priority rule.
    pub fn resolve(&self) -> Option<AuthCredential<'a>> {
        if let Some(token) = self.token.filter(|t| t.has_key()) {
            return Some(AuthCredential::Token(token));
        }

        self.credentials
            .filter(|c| c.is_complete())
            .map(AuthCredential::Basic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_header() {
        let token = Token::from_key("1234567890");
        let credential = AuthMaterial::token(&token).resolve().unwrap();
        assert_eq!(credential.header_value(), "cc_auth_token=\"1234567890\"");
        assert_eq!(credential.scheme(), "token");
    }

    #[test]
    fn test_basic_header() {
        let credentials = Credentials::new("user@example.com", "secret");
        let credential = AuthMaterial::credentials(&credentials).resolve().unwrap();
        assert_eq!(
            credential.header_value(),
            "Basic dXNlckBleGFtcGxlLmNvbTpzZWNyZXQ="
        );
        assert_eq!(credential.scheme(), "basic");
    }

    #[test]
    fn test_token_takes_priority() {
        let token = Token::from_key("abc");
        let credentials = Credentials::new("user@example.com", "secret");
        let credential = AuthMaterial::new(Some(&token), Some(&credentials))
            .resolve()
            .unwrap();
        assert!(matches!(credential, AuthCredential::Token(_)));
    }

    #[test]
    fn test_empty_token_falls_back_to_credentials() {
        let token = Token::default();
        let credentials = Credentials::new("user@example.com", "secret");
        let credential = AuthMaterial::new(Some(&token), Some(&credentials))
            .resolve()
            .unwrap();
        assert!(matches!(credential, AuthCredential::Basic(_)));
    }

    #[test]
    fn test_nothing_to_attach() {
        assert!(AuthMaterial::default().resolve().is_none());

        let missing_password = Credentials::new("user@example.com", "");
        assert!(AuthMaterial::credentials(&missing_password).resolve().is_none());

        let missing_email = Credentials::new("", "secret");
        assert!(AuthMaterial::credentials(&missing_email).resolve().is_none());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("user@example.com", "secret");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("user@example.com"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_read_credentials_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials");
        std::fs::write(&path, "email\npassword\n").unwrap();

        let credentials = read_credentials_file(&path).unwrap();
        assert_eq!(credentials, Credentials::new("email", "password"));
    }

    #[test]
    fn test_read_credentials_file_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials");
        std::fs::write(&path, "email\r\npassword\r\nextra\r\n").unwrap();

        let credentials = read_credentials_file(&path).unwrap();
        assert_eq!(credentials, Credentials::new("email", "password"));
    }

    #[test]
    fn test_read_credentials_file_too_short() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials");
        std::fs::write(&path, "email").unwrap();

        assert!(matches!(
            read_credentials_file(&path),
            Err(ApiError::Credentials(_))
        ));
    }
}
