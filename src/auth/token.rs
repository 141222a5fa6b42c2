//
//  cctrl-client
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Module
//!
//! This module provides the [`Token`] issued by the cloudControl API in
//! exchange for an email/password pair.
//!
//! ## Overview
//!
//! A token is a flat JSON object of string fields. The server always sends
//! a `token` field (the bearer key) and usually an `expires` timestamp:
//!
//! ```json
//! {"token": "abcdefghijklmnopqrstuvxyz", "expires": "2014-11-24T16:39:54.450"}
//! ```
//!
//! The key is attached to later requests as
//! `Authorization: cc_auth_token="<key>"`. The client never checks `expires`
//! itself; an expired token surfaces as a `401` from the server.
//!
//! ## Example
//!
//! ```rust
//! use cctrl_client::auth::Token;
//!
//! let token = Token::decode(br#"{"token":"abc123","expires":"2014-11-24T16:39:54.450"}"#)?;
//! assert_eq!(token.key(), "abc123");
//!
//! let bytes = token.encode()?;
//! assert_eq!(Token::decode(&bytes)?, token);
//! # Ok::<(), cctrl_client::api::ApiError>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::common::ApiError;

/// Name of the field holding the bearer key.
pub const TOKEN_KEY_FIELD: &str = "token";

/// Name of the field holding the expiry timestamp.
pub const TOKEN_EXPIRES_FIELD: &str = "expires";

/// Authentication token issued by the cloudControl API.
///
/// Stored as an ordered map of string fields so that every field the server
/// sends survives an encode/decode round trip. Tokens are never mutated in
/// place; a session replaces its token wholesale.
///
/// # Example
///
/// ```rust
/// use cctrl_client::auth::Token;
///
/// let token = Token::new("abc123", "2014-11-24T16:39:54.450");
/// assert_eq!(token.key(), "abc123");
/// assert_eq!(token.expires(), Some("2014-11-24T16:39:54.450"));
///
/// // A token without a key has an empty key, it never fails.
/// assert_eq!(Token::default().key(), "");
/// ```
///
/// # Notes
///
/// - `Debug` output redacts the key so tokens can be logged safely.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token {
    fields: BTreeMap<String, String>,
}

impl Token {
    /// Creates a token from a key and an expiry timestamp.
    pub fn new(key: impl Into<String>, expires: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(TOKEN_KEY_FIELD.to_string(), key.into());
        fields.insert(TOKEN_EXPIRES_FIELD.to_string(), expires.into());
        Self { fields }
    }

    /// Creates a token holding only a key.
    pub fn from_key(key: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(TOKEN_KEY_FIELD.to_string(), key.into());
        Self { fields }
    }

    /// Decodes a token from the JSON object sent by the server.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if `bytes` is not a JSON object whose
    /// values are all strings.
    pub fn decode(bytes: &[u8]) -> Result<Self, ApiError> {
        serde_json::from_slice(bytes).map_err(|e| ApiError::Decode(format!("invalid token: {e}")))
    }

    /// Encodes the token back into its JSON object form.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if serialization fails, which cannot
    /// happen for a map of strings but is kept in the signature.
    pub fn encode(&self) -> Result<Vec<u8>, ApiError> {
        serde_json::to_vec(self).map_err(|e| ApiError::Decode(format!("invalid token: {e}")))
    }

    /// Returns the bearer key, or an empty string if the token has none.
    pub fn key(&self) -> &str {
        self.get(TOKEN_KEY_FIELD).unwrap_or_default()
    }

    /// Returns the raw `expires` value, if present.
    pub fn expires(&self) -> Option<&str> {
        self.get(TOKEN_EXPIRES_FIELD)
    }

    /// Returns any field of the token.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Returns `true` if the token carries a non-empty key.
    pub fn has_key(&self) -> bool {
        !self.key().is_empty()
    }

    /// Writes the encoded token to `path`, replacing any existing file.
    ///
    /// Lets a caller reuse a token across processes instead of sending the
    /// password again.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Io`] if the file cannot be written.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), ApiError> {
        let bytes = self.encode()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Reads a token previously stored with [`write`](Self::write).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Io`] if the file cannot be read and
    /// [`ApiError::Decode`] if its content is not a token.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let bytes = std::fs::read(path)?;
        Self::decode(&bytes)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in &self.fields {
            if name == TOKEN_KEY_FIELD {
                map.entry(name, &"<redacted>");
            } else {
                map.entry(name, value);
            }
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let token = Token::decode(
            br#"{"token":"abcdefghijklmnopqrstuvxyz","expires":"2014-11-24T16:39:54.450"}"#,
        )
        .unwrap();

        assert_eq!(token, Token::new("abcdefghijklmnopqrstuvxyz", "2014-11-24T16:39:54.450"));
    }

    #[test]
    fn test_decode_keeps_unknown_fields() {
        let token = Token::decode(br#"{"token":"k","scope":"full"}"#).unwrap();
        assert_eq!(token.get("scope"), Some("full"));
        assert_eq!(token.expires(), None);
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        assert!(matches!(
            Token::decode(b"{\"token\": "),
            Err(ApiError::Decode(_))
        ));
        assert!(matches!(Token::decode(b"[]"), Err(ApiError::Decode(_))));
        assert!(matches!(
            Token::decode(br#"{"token": 42}"#),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_round_trip() {
        let tokens = [
            Token::default(),
            Token::from_key("abc123"),
            Token::new("abc123", "2014-11-24T16:39:54.450"),
            Token::decode(r#"{"token":"é\"quoted\"","other":""}"#.as_bytes()).unwrap(),
        ];

        for token in tokens {
            let decoded = Token::decode(&token.encode().unwrap()).unwrap();
            assert_eq!(decoded, token);
        }
    }

    #[test]
    fn test_key_never_fails() {
        assert_eq!(Token::default().key(), "");
        assert!(!Token::default().has_key());
        assert!(!Token::from_key("").has_key());
        assert!(Token::from_key("abc").has_key());
    }

    #[test]
    fn test_debug_redacts_key() {
        let token = Token::new("super-secret", "2014-11-24T16:39:54.450");
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("2014-11-24T16:39:54.450"));
    }

    #[test]
    fn test_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        let token = Token::new("abcdefghijklmnopqrstuvxyz", "2014-11-24T16:39:54.450");

        token.write(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            r#"{"expires":"2014-11-24T16:39:54.450","token":"abcdefghijklmnopqrstuvxyz"}"#
        );

        assert_eq!(Token::read(&path).unwrap(), token);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Token::read(dir.path().join("missing.json")),
            Err(ApiError::Io(_))
        ));
    }
}
