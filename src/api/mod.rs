//
//  cctrl-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the request pipeline for the cloudControl REST API.
//!
//! ## Architecture
//!
//! ```text
//!  Session ──▶ Transport ──▶ HTTP ──▶ decode_content ──▶ serde_json::Value
//!     │                                                        │
//!     └── resources::Endpoint ◀──── typed records ◀────────────┘
//! ```
//!
//! - [`session`]: Authenticated facade holding the configuration and token
//! - [`transport`]: One raw HTTP exchange with the wire headers applied
//! - [`decode`]: Plain or gzip-wrapped JSON bodies into an untyped tree
//! - [`resources`]: Endpoint table, generic invoker and typed records
//! - [`common`]: Error type and form encoding
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cctrl_client::api::{resources, Session};
//!
//! # async fn example() -> Result<(), cctrl_client::api::ApiError> {
//! let mut session = Session::from_env()?;
//! session.authenticate("user@example.com", "secret").await?;
//!
//! let apps: Vec<resources::Application> =
//!     session.invoke(&resources::LIST_APPS, &[], None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]. Server refusals keep their status:
//!
//! - `AuthorizationRequired`: no token held, nothing was sent
//! - `HttpStatus`: any status other than 200, 201 and 204
//! - `Decode`: the body was neither JSON nor gzip-wrapped JSON
//! - `Cancelled`: the session's cancellation token fired, or the deadline

/// Shared error type and form encoding.
pub mod common;

/// Response body decoding.
pub mod decode;

/// Resource endpoints and typed records.
pub mod resources;

/// The authenticated session.
pub mod session;

/// Raw HTTP exchange.
pub mod transport;

pub use common::{ApiError, FormData};
pub use decode::decode_content;
pub use session::Session;
pub use transport::{request_url, ApiRequest, HttpTransport, Transport};

/// Re-export of the HTTP method type used by [`ApiRequest`].
pub use reqwest::Method;
