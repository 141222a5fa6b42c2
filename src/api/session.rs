//
//  cctrl-client
//  api/session.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Session
//!
//! This module provides [`Session`], the authenticated facade over the
//! cloudControl API.
//!
//! ## Lifecycle
//!
//! ```text
//!                 authenticate() / set_token()
//!  UNAUTHENTICATED ─────────────────────────────▶ AUTHENTICATED
//!        ▲                                             │
//!        └──────────────── clear_token() ──────────────┘
//! ```
//!
//! - `get`, `post`, `put` and `delete` only work while a token is held;
//!   otherwise they fail with [`ApiError::AuthorizationRequired`] without
//!   touching the network.
//! - Nothing expires automatically. An expired token shows up as a `401`
//!   [`ApiError::HttpStatus`]; the caller authenticates again.
//!
//! ## Concurrency
//!
//! Requests borrow the session immutably and token changes borrow it
//! mutably, so a token cannot be swapped under an in-flight request. To share
//! one session between tasks, wrap it in a lock or clone it: clones share the
//! connection pool but each owns its token.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::common::{ApiError, FormData};
use super::decode::decode_content;
use super::transport::{request_url, ApiRequest, HttpTransport, Transport};
use crate::auth::{read_credentials_file, AuthMaterial, Credentials, Token};
use crate::config::ClientConfig;

/// Path of the token issuing endpoint.
pub const TOKEN_PATH: &str = "/token/";

/// Path used to check that a token is still accepted.
pub const TOKEN_CHECK_PATH: &str = "/user/";

/// Authenticated client for the cloudControl API.
///
/// # Creating a Session
///
/// ```rust,no_run
/// use cctrl_client::api::Session;
///
/// # async fn example() -> Result<(), cctrl_client::api::ApiError> {
/// // Base URL from CCTRL_API_URL, or the public API
/// let mut session = Session::from_env()?;
/// session.authenticate("user@example.com", "secret").await?;
///
/// let apps = session.get("/app/").await?;
/// println!("{apps:#}");
/// # Ok(())
/// # }
/// ```
///
/// # Reusing a Token
///
/// ```rust,no_run
/// use cctrl_client::api::Session;
/// use cctrl_client::auth::Token;
/// use cctrl_client::config::ClientConfig;
///
/// # fn example() -> Result<(), cctrl_client::api::ApiError> {
/// let token = Token::read("/home/me/.cctrl/token.json")?;
/// let session = Session::new(ClientConfig::from_env())?.with_token(token);
/// assert!(session.is_authenticated());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Session {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    token: Option<Token>,
    cancellation: Option<CancellationToken>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("token", &self.token)
            .field("cancellable", &self.cancellation.is_some())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates an unauthenticated session using the HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] or [`ApiError::Io`] if the transport
    /// cannot be built from `config` (bad trust roots).
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a session from the default configuration with the
    /// `CCTRL_API_URL` override applied.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::from_env())
    }

    /// Creates an unauthenticated session on top of any transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            token: None,
            cancellation: None,
        }
    }

    /// Sets the token, builder style.
    pub fn with_token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    /// Attaches a cancellation token.
    ///
    /// Cancelling it aborts every in-flight and future request of this
    /// session with [`ApiError::Cancelled`].
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = Some(cancellation);
        self
    }

    /// The configuration the session was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The API origin requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// The held token, if any.
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Replaces the held token and returns the previous one.
    ///
    /// Passing `None` logs the session out.
    pub fn set_token(&mut self, token: Option<Token>) -> Option<Token> {
        std::mem::replace(&mut self.token, token)
    }

    /// Drops the held token and returns it.
    pub fn clear_token(&mut self) -> Option<Token> {
        self.token.take()
    }

    /// Returns `true` if the session holds a token with a non-empty key.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_ref().is_some_and(Token::has_key)
    }

    /// The full URL a resource path resolves to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the result is not a valid URL.
    pub fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        request_url(self.base_url(), path)
    }

    /// Obtains a token with an email and password.
    ///
    /// Sends `POST /token/` with Basic authentication and no body, decodes
    /// the answer as a [`Token`] and holds it. On failure the session keeps
    /// whatever token it had before.
    ///
    /// # Errors
    ///
    /// - [`ApiError::HttpStatus`] if the server refuses the credentials
    /// - [`ApiError::Decode`] if the answer is not a token or has no key
    /// - [`ApiError::Transport`] / [`ApiError::Cancelled`] as for any call
    pub async fn authenticate(&mut self, email: &str, password: &str) -> Result<(), ApiError> {
        self.authenticate_with(&Credentials::new(email, password))
            .await
    }

    /// Obtains a token with a credential pair.
    ///
    /// See [`authenticate`](Self::authenticate).
    pub async fn authenticate_with(&mut self, credentials: &Credentials) -> Result<(), ApiError> {
        let request = ApiRequest::post(TOKEN_PATH, Vec::new()).anonymous();
        let content = self
            .send(&request, AuthMaterial::credentials(credentials))
            .await?;

        let token = Token::decode(&content)?;
        if !token.has_key() {
            return Err(ApiError::Decode(
                "token response has no token field".to_string(),
            ));
        }

        tracing::debug!(email = %credentials.email, "Obtained API token");
        self.token = Some(token);
        Ok(())
    }

    /// Obtains a token with the credentials stored in a file.
    ///
    /// The file holds the email on its first line and the password on its
    /// second.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Io`] or [`ApiError::Credentials`] if the file
    /// cannot be used, otherwise as [`authenticate`](Self::authenticate).
    pub async fn authenticate_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), ApiError> {
        let credentials = read_credentials_file(path)?;
        self.authenticate_with(&credentials).await
    }

    /// Checks that the server still accepts the held token.
    ///
    /// Sends an authenticated `HEAD /user/`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::AuthorizationRequired`] if no token is held
    /// - [`ApiError::HttpStatus`] with status 401 if the token was rejected
    pub async fn verify_token(&self) -> Result<(), ApiError> {
        let token = self.require_token()?;
        self.send(&ApiRequest::head(TOKEN_CHECK_PATH), AuthMaterial::token(token))
            .await?;
        Ok(())
    }

    /// Sends an authenticated `GET` and decodes the answer.
    ///
    /// # Errors
    ///
    /// - [`ApiError::AuthorizationRequired`] if no token is held
    /// - [`ApiError::HttpStatus`] for statuses other than 200, 201 and 204
    /// - [`ApiError::Decode`] if the body is not (gzip-wrapped) JSON
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.call(ApiRequest::get(path)).await
    }

    /// Sends an authenticated form-encoded `POST` and decodes the answer.
    ///
    /// Errors as for [`get`](Self::get).
    pub async fn post(&self, path: &str, data: &FormData) -> Result<Value, ApiError> {
        self.call(ApiRequest::post(path, data.encode().into_bytes()))
            .await
    }

    /// Sends an authenticated `POST` whose body is a JSON document.
    ///
    /// The body goes out as `application/json`. Errors as for
    /// [`get`](Self::get), plus [`ApiError::FieldMapping`] if `value` cannot
    /// be serialized.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        value: &T,
    ) -> Result<Value, ApiError> {
        let body = serde_json::to_vec(value).map_err(ApiError::FieldMapping)?;
        self.call(ApiRequest::post(path, body)).await
    }

    /// Sends an authenticated form-encoded `PUT` and decodes the answer.
    ///
    /// Errors as for [`get`](Self::get).
    pub async fn put(&self, path: &str, data: &FormData) -> Result<Value, ApiError> {
        self.call(ApiRequest::put(path, data.encode().into_bytes()))
            .await
    }

    /// Sends an authenticated `DELETE`.
    ///
    /// The decoded answer is discarded, but a success status with a body
    /// that is not JSON is still an error.
    ///
    /// Errors as for [`get`](Self::get).
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.call(ApiRequest::delete(path)).await?;
        Ok(())
    }

    async fn call(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let token = self.require_token()?;
        let content = self.send(&request, AuthMaterial::token(token)).await?;
        decode_content(&content)
    }

    fn require_token(&self) -> Result<&Token, ApiError> {
        self.token
            .as_ref()
            .filter(|token| token.has_key())
            .ok_or(ApiError::AuthorizationRequired)
    }

    async fn send(&self, request: &ApiRequest, auth: AuthMaterial<'_>) -> Result<Vec<u8>, ApiError> {
        let exchange = self.transport.execute(self.base_url(), request, auth);

        match &self.cancellation {
            Some(cancellation) => tokio::select! {
                biased;
                _ = cancellation.cancelled() => {
                    tracing::debug!(method = %request.method, path = %request.path, "Request cancelled");
                    Err(ApiError::Cancelled)
                }
                result = exchange => result,
            },
            None => exchange.await,
        }
    }
}
