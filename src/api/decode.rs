//
//  cctrl-client
//  api/decode.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Response body decoding.
//!
//! The API may answer with plain JSON or with a gzip stream wrapping JSON,
//! and the `Content-Encoding` header cannot be relied on. [`decode_content`]
//! tells the two apart from the bytes themselves: a gzip stream always
//! starts with `0x1f 0x8b`, which is never valid UTF-8.

use std::io::Read;

use flate2::read::MultiGzDecoder;
use serde_json::Value;

use super::common::ApiError;

/// Decodes a response body into an untyped JSON tree.
///
/// Valid UTF-8 input is parsed as JSON directly; anything else is
/// decompressed as gzip first. An empty (or whitespace-only) document
/// decodes to [`Value::Null`], which is what `204 No Content` answers carry.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if the body is not JSON, is not a valid
/// gzip stream, or decompresses to something that is not JSON.
///
/// # Example
///
/// ```rust
/// use cctrl_client::api::decode_content;
///
/// let value = decode_content(br#"{"name":"myapp"}"#)?;
/// assert_eq!(value["name"], "myapp");
///
/// assert!(decode_content(b"").unwrap().is_null());
/// # Ok::<(), cctrl_client::api::ApiError>(())
/// ```
pub fn decode_content(content: &[u8]) -> Result<Value, ApiError> {
    if std::str::from_utf8(content).is_ok() {
        return parse_json(content);
    }

    tracing::trace!(len = content.len(), "Decompressing binary response body");
    let mut decompressed = Vec::new();
    MultiGzDecoder::new(content)
        .read_to_end(&mut decompressed)
        .map_err(|e| ApiError::Decode(format!("invalid gzip body: {e}")))?;

    parse_json(&decompressed)
}

fn parse_json(bytes: &[u8]) -> Result<Value, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(bytes).map_err(|e| ApiError::Decode(format!("invalid JSON body: {e}")))
}
