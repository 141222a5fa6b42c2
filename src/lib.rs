//
//  cctrl-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # cloudControl API Client Library
//!
//! An asynchronous client for the cloudControl platform-as-a-service REST
//! API.
//!
//! ## Overview
//!
//! The library authenticates against the API, sends requests with the headers
//! the platform expects and decodes answers that may arrive as plain or
//! gzip-compressed JSON. On top of that request pipeline, every resource
//! (applications, deployments, aliases, workers, cron jobs, add-ons, users,
//! keys, logs and billing accounts) is reachable through one table of
//! endpoints and a generic, typed invoker.
//!
//! ## Module Structure
//!
//! - [`api`]: Session, transport, body decoding and resource endpoints
//! - [`auth`]: Tokens, credentials and the `Authorization` header
//! - [`config`]: Client configuration (base URL, TLS, deadline)
//! - [`util`]: Timestamp helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cctrl_client::api::{resources, Session};
//!
//! # async fn example() -> Result<(), cctrl_client::api::ApiError> {
//! let mut session = Session::from_env()?;
//! session.authenticate("user@example.com", "secret").await?;
//!
//! let app: resources::Application = session
//!     .invoke(&resources::READ_APP, &["myapp"], None)
//!     .await?;
//! for deployment in &app.deployments {
//!     println!("{} ({} containers)", deployment.name, deployment.containers);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The library emits [`tracing`] events and never installs a subscriber;
//! that is left to the application.

/// Request pipeline and resource endpoints.
///
/// The [`Session`](api::Session) is the entry point: it holds the
/// configuration and the current token, and every API call goes through it.
pub mod api;

/// Authentication material.
///
/// Handles the two ways of authorizing a request:
/// - Token issued by the API (`cc_auth_token`)
/// - Email and password (HTTP Basic), only used to obtain a token
pub mod auth;

/// Client configuration.
pub mod config;

/// Utility functions and helpers.
pub mod util;

pub use api::{ApiError, Session};
pub use auth::{Credentials, Token};
pub use config::ClientConfig;

/// Library version constant.
///
/// Derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `User-Agent` header, `cctrl-client/<version>`.
pub const USER_AGENT: &str = concat!("cctrl-client/", env!("CARGO_PKG_VERSION"));
