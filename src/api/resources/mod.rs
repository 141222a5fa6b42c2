//
//  cctrl-client
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource Endpoints
//!
//! The cloudControl resources as a table of [`Endpoint`] constants and a
//! single generic invoker, [`Session::invoke`].
//!
//! ## Overview
//!
//! Every resource call is the same three steps: render a path template with
//! the caller's identifiers, send it with one of the session's verbs, and map
//! the decoded JSON tree onto a typed record. An [`Endpoint`] carries the verb
//! and the template; the record type is chosen by the caller.
//!
//! | Resource | Collection | Item |
//! |----------|------------|------|
//! | Applications | `/app/` | `/app/{}/` |
//! | Deployments | `/app/{}/deployment/` | `/app/{}/deployment/{}/` |
//! | Aliases | `.../deployment/{}/alias/` | `.../alias/{}/` |
//! | Workers | `.../deployment/{}/worker/` | `.../worker/{}/` |
//! | Cron jobs | `.../deployment/{}/cron/` | `.../cron/{}/` |
//! | Add-ons | `.../deployment/{}/addon/` | `.../addon/{}/` |
//! | Add-on catalogue | `/addon/` | |
//! | Application users | `/app/{}/user/` | `/app/{}/user/{}/` |
//! | Deployment users | `.../deployment/{}/user/` | `.../user/{}/` |
//! | Users | `/user/` | `/user/{}/` |
//! | Keys | `/user/{}/key/` | `/user/{}/key/{}/` |
//! | Logs | | `.../deployment/{}/log/{}/` |
//! | Billing accounts | `/user/{}/billing/` | `/user/{}/billing/{}/` |
//!
//! ## Example
//!
//! ```rust,no_run
//! use cctrl_client::api::resources::{self, Application, Deployment};
//! use cctrl_client::api::{FormData, Session};
//!
//! # async fn example(session: &Session) -> Result<(), cctrl_client::api::ApiError> {
//! let apps: Vec<Application> = session.invoke(&resources::LIST_APPS, &[], None).await?;
//!
//! let data = FormData::new().with("name", "staging").with("stack", "pinky");
//! let deployment: Deployment = session
//!     .invoke(&resources::CREATE_DEPLOYMENT, &["myapp"], Some(&data))
//!     .await?;
//!
//! session
//!     .invoke_delete(&resources::DELETE_DEPLOYMENT, &["myapp", "staging"])
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod types;

pub use types::*;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::common::{ApiError, FormData};
use super::session::Session;
use crate::util::build_timestamp;

/// Placeholder replaced by one identifier in an endpoint template.
pub const PLACEHOLDER: &str = "{}";

/// HTTP verb of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Read; no body.
    Get,
    /// Create; form body.
    Post,
    /// Update; form body.
    Put,
    /// Remove; no body, answer discarded.
    Delete,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// One resource operation: a verb and a path template.
///
/// Templates use `{}` for each identifier and keep the trailing slash the
/// API expects.
///
/// # Example
///
/// ```rust
/// use cctrl_client::api::resources::{Endpoint, Verb, READ_ALIAS};
///
/// assert_eq!(READ_ALIAS.verb, Verb::Get);
/// assert_eq!(
///     READ_ALIAS.path(&["myapp", "default", "www.example.com"])?,
///     "/app/myapp/deployment/default/alias/www.example.com/"
/// );
/// # Ok::<(), cctrl_client::api::ApiError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Verb the endpoint is called with.
    pub verb: Verb,
    /// Path template with one `{}` per identifier.
    pub template: &'static str,
}

impl Endpoint {
    /// Creates an endpoint.
    pub const fn new(verb: Verb, template: &'static str) -> Self {
        Self { verb, template }
    }

    /// Number of identifiers the template takes.
    pub fn arity(&self) -> usize {
        self.template.matches(PLACEHOLDER).count()
    }

    /// Renders the template with `args`, in order.
    ///
    /// Identifiers are inserted verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidEndpoint`] if the number of `args` differs
    /// from the number of placeholders.
    pub fn path(&self, args: &[&str]) -> Result<String, ApiError> {
        let arity = self.arity();
        if args.len() != arity {
            return Err(ApiError::InvalidEndpoint(format!(
                "{} {} takes {} identifier(s), got {}",
                self.verb,
                self.template,
                arity,
                args.len()
            )));
        }

        let mut pieces = self.template.split(PLACEHOLDER);
        let args_len: usize = args.iter().map(|a| a.len()).sum();
        let mut path = String::with_capacity(self.template.len() + args_len);
        path.push_str(pieces.next().unwrap_or_default());
        for (arg, piece) in args.iter().zip(pieces) {
            path.push_str(arg);
            path.push_str(piece);
        }
        Ok(path)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb, self.template)
    }
}

// Applications. Create takes `name`, `type`, `repository_type` and an
// optional `buildpack_url`.
/// Creates an application.
pub const CREATE_APP: Endpoint = Endpoint::new(Verb::Post, "/app/");
/// Lists applications.
pub const LIST_APPS: Endpoint = Endpoint::new(Verb::Get, "/app/");
/// Reads an application.
pub const READ_APP: Endpoint = Endpoint::new(Verb::Get, "/app/{}/");
/// Deletes an application.
pub const DELETE_APP: Endpoint = Endpoint::new(Verb::Delete, "/app/{}/");

// Deployments. Create takes `name` and `stack`; update any of `version`,
// `billing_account`, `stack`, `min_boxes` and `max_boxes`.
/// Creates a deployment of an application.
pub const CREATE_DEPLOYMENT: Endpoint = Endpoint::new(Verb::Post, "/app/{}/deployment/");
/// Lists the deployments of an application.
pub const LIST_DEPLOYMENTS: Endpoint = Endpoint::new(Verb::Get, "/app/{}/deployment/");
/// Reads a deployment of an application.
pub const READ_DEPLOYMENT: Endpoint = Endpoint::new(Verb::Get, "/app/{}/deployment/{}/");
/// Updates a deployment of an application.
pub const UPDATE_DEPLOYMENT: Endpoint = Endpoint::new(Verb::Put, "/app/{}/deployment/{}/");
/// Deletes a deployment of an application.
pub const DELETE_DEPLOYMENT: Endpoint = Endpoint::new(Verb::Delete, "/app/{}/deployment/{}/");

// Aliases. Create takes `name`.
/// Creates a domain alias of a deployment.
pub const CREATE_ALIAS: Endpoint = Endpoint::new(Verb::Post, "/app/{}/deployment/{}/alias/");
/// Lists the aliases of a deployment.
pub const LIST_ALIASES: Endpoint = Endpoint::new(Verb::Get, "/app/{}/deployment/{}/alias/");
/// Reads a domain alias of a deployment.
pub const READ_ALIAS: Endpoint = Endpoint::new(Verb::Get, "/app/{}/deployment/{}/alias/{}/");
/// Deletes a domain alias of a deployment.
pub const DELETE_ALIAS: Endpoint = Endpoint::new(Verb::Delete, "/app/{}/deployment/{}/alias/{}/");

// Workers. Create takes `command` and optional `params` and `size`.
/// Creates a worker of a deployment.
pub const CREATE_WORKER: Endpoint = Endpoint::new(Verb::Post, "/app/{}/deployment/{}/worker/");
/// Lists the workers of a deployment.
pub const LIST_WORKERS: Endpoint = Endpoint::new(Verb::Get, "/app/{}/deployment/{}/worker/");
/// Reads a worker of a deployment.
pub const READ_WORKER: Endpoint = Endpoint::new(Verb::Get, "/app/{}/deployment/{}/worker/{}/");
/// Deletes a worker of a deployment.
pub const DELETE_WORKER: Endpoint =
    Endpoint::new(Verb::Delete, "/app/{}/deployment/{}/worker/{}/");

// Cron jobs. Create takes `url`.
/// Creates a cron job of a deployment.
pub const CREATE_CRONJOB: Endpoint = Endpoint::new(Verb::Post, "/app/{}/deployment/{}/cron/");
/// Lists the cron jobs of a deployment.
pub const LIST_CRONJOBS: Endpoint = Endpoint::new(Verb::Get, "/app/{}/deployment/{}/cron/");
/// Reads a cron job of a deployment.
pub const READ_CRONJOB: Endpoint = Endpoint::new(Verb::Get, "/app/{}/deployment/{}/cron/{}/");
/// Deletes a cron job of a deployment.
pub const DELETE_CRONJOB: Endpoint = Endpoint::new(Verb::Delete, "/app/{}/deployment/{}/cron/{}/");

// Add-ons. Create takes `addon` and JSON `options`; update takes `addon`,
// optional JSON `settings` and `force`.
/// Creates an add-on of a deployment.
pub const CREATE_ADDON: Endpoint = Endpoint::new(Verb::Post, "/app/{}/deployment/{}/addon/");
/// Lists the add-ons of a deployment.
pub const LIST_ADDONS: Endpoint = Endpoint::new(Verb::Get, "/app/{}/deployment/{}/addon/");
/// Lists every add-on plan the platform offers.
pub const LIST_ADDON_CATALOGUE: Endpoint = Endpoint::new(Verb::Get, "/addon/");
/// Reads an add-on of a deployment.
pub const READ_ADDON: Endpoint = Endpoint::new(Verb::Get, "/app/{}/deployment/{}/addon/{}/");
/// Updates an add-on of a deployment.
pub const UPDATE_ADDON: Endpoint = Endpoint::new(Verb::Put, "/app/{}/deployment/{}/addon/{}/");
/// Deletes an add-on of a deployment.
pub const DELETE_ADDON: Endpoint = Endpoint::new(Verb::Delete, "/app/{}/deployment/{}/addon/{}/");

// Application members. Create takes `email` and optional `role`.
/// Creates a member of an application.
pub const CREATE_APP_USER: Endpoint = Endpoint::new(Verb::Post, "/app/{}/user/");
/// Lists the members of an application.
pub const LIST_APP_USERS: Endpoint = Endpoint::new(Verb::Get, "/app/{}/user/");
/// Deletes a member of an application.
pub const DELETE_APP_USER: Endpoint = Endpoint::new(Verb::Delete, "/app/{}/user/{}/");

// Deployment members. Create takes `email` and optional `role`.
/// Creates a member of a deployment.
pub const CREATE_DEPLOYMENT_USER: Endpoint =
    Endpoint::new(Verb::Post, "/app/{}/deployment/{}/user/");
/// Lists the members of a deployment.
pub const LIST_DEPLOYMENT_USERS: Endpoint =
    Endpoint::new(Verb::Get, "/app/{}/deployment/{}/user/");
/// Deletes a member of a deployment.
pub const DELETE_DEPLOYMENT_USER: Endpoint =
    Endpoint::new(Verb::Delete, "/app/{}/deployment/{}/user/{}/");

// Accounts. Create takes `username`, `email` and `password`; update takes
// `activation_code` to activate, or any of `first_name`, `last_name`,
// `password` and `email`.
/// Creates an account.
pub const CREATE_USER: Endpoint = Endpoint::new(Verb::Post, "/user/");
/// Lists accounts.
pub const LIST_USERS: Endpoint = Endpoint::new(Verb::Get, "/user/");
/// Reads an account.
pub const READ_USER: Endpoint = Endpoint::new(Verb::Get, "/user/{}/");
/// Updates an account.
pub const UPDATE_USER: Endpoint = Endpoint::new(Verb::Put, "/user/{}/");
/// Deletes an account.
pub const DELETE_USER: Endpoint = Endpoint::new(Verb::Delete, "/user/{}/");

// Public keys. Create takes `key`.
/// Creates a public key of an account.
pub const CREATE_KEY: Endpoint = Endpoint::new(Verb::Post, "/user/{}/key/");
/// Lists the public keys of an account.
pub const LIST_KEYS: Endpoint = Endpoint::new(Verb::Get, "/user/{}/key/");
/// Reads a public key of an account.
pub const READ_KEY: Endpoint = Endpoint::new(Verb::Get, "/user/{}/key/{}/");
/// Deletes a public key of an account.
pub const DELETE_KEY: Endpoint = Endpoint::new(Verb::Delete, "/user/{}/key/{}/");

/// Log of one type (`worker`, `error`, `access`, `deploy`) of a deployment.
///
/// Use [`log_path`] to read only the entries after a given instant.
pub const READ_LOG: Endpoint = Endpoint::new(Verb::Get, "/app/{}/deployment/{}/log/{}/");

// Billing accounts. Create and update take the account fields as form data.
/// Lists the billing accounts of a user.
pub const LIST_BILLING_ACCOUNTS: Endpoint = Endpoint::new(Verb::Get, "/user/{}/billing/");
/// Creates a billing account of a user.
pub const CREATE_BILLING_ACCOUNT: Endpoint = Endpoint::new(Verb::Post, "/user/{}/billing/{}/");
/// Updates a billing account of a user.
pub const UPDATE_BILLING_ACCOUNT: Endpoint = Endpoint::new(Verb::Put, "/user/{}/billing/{}/");

/// Path of a deployment log, optionally restricted to entries after `since`.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use cctrl_client::api::resources::log_path;
///
/// let since = Utc.timestamp_opt(1356998400, 500_000_000).unwrap();
/// assert_eq!(
///     log_path("myapp", "default", "error", Some(&since))?,
///     "/app/myapp/deployment/default/log/error/?timestamp=1356998400.500000"
/// );
/// # Ok::<(), cctrl_client::api::ApiError>(())
/// ```
pub fn log_path(
    app: &str,
    deployment: &str,
    log_type: &str,
    since: Option<&DateTime<Utc>>,
) -> Result<String, ApiError> {
    let path = READ_LOG.path(&[app, deployment, log_type])?;
    Ok(match since {
        Some(instant) => format!("{path}?timestamp={}", build_timestamp(instant)),
        None => path,
    })
}

impl Session {
    /// Calls a resource endpoint and maps the answer onto `T`.
    ///
    /// The endpoint's template is rendered with `args`, then sent with the
    /// endpoint's verb. `data` is the form body of `POST` and `PUT` calls; an
    /// empty form is sent when it is `None`, and it is ignored for `GET` and
    /// `DELETE`.
    ///
    /// # Type Parameters
    ///
    /// * `T` - Any deserializable type: a record, a `Vec` of records,
    ///   [`serde_json::Value`], or `()` for answers without a body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidEndpoint`] if `args` does not fit the template
    /// - [`ApiError::FieldMapping`] if the answer does not fit `T`
    /// - any error of [`Session::get`]
    pub async fn invoke<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        args: &[&str],
        data: Option<&FormData>,
    ) -> Result<T, ApiError> {
        let path = endpoint.path(args)?;
        let value = self.invoke_path(endpoint.verb, &path, data).await?;
        serde_json::from_value(value).map_err(ApiError::FieldMapping)
    }

    /// Calls a `DELETE` endpoint, discarding the answer.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidEndpoint`] if `endpoint` is not a `DELETE`
    /// endpoint or `args` does not fit it, otherwise as
    /// [`Session::delete`].
    pub async fn invoke_delete(&self, endpoint: &Endpoint, args: &[&str]) -> Result<(), ApiError> {
        if endpoint.verb != Verb::Delete {
            return Err(ApiError::InvalidEndpoint(format!(
                "{endpoint} is not a DELETE endpoint"
            )));
        }
        self.delete(&endpoint.path(args)?).await
    }

    /// Reads a deployment log, optionally only the entries after `since`.
    pub async fn read_log(
        &self,
        app: &str,
        deployment: &str,
        log_type: &str,
        since: Option<&DateTime<Utc>>,
    ) -> Result<Vec<LogEntry>, ApiError> {
        let path = log_path(app, deployment, log_type, since)?;
        let value = self.get(&path).await?;
        serde_json::from_value(value).map_err(ApiError::FieldMapping)
    }

    async fn invoke_path(
        &self,
        verb: Verb,
        path: &str,
        data: Option<&FormData>,
    ) -> Result<Value, ApiError> {
        let empty = FormData::new();
        let data = data.unwrap_or(&empty);
        tracing::trace!(%verb, path, "Invoking resource endpoint");

        match verb {
            Verb::Get => self.get(path).await,
            Verb::Post => self.post(path, data).await,
            Verb::Put => self.put(path, data).await,
            Verb::Delete => self.delete(path).await.map(|()| Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::{ApiRequest, Transport};
    use crate::auth::{AuthMaterial, Token};
    use crate::config::ClientConfig;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::{Arc, Mutex};

    const ALL: &[Endpoint] = &[
        CREATE_APP,
        LIST_APPS,
        READ_APP,
        DELETE_APP,
        CREATE_DEPLOYMENT,
        LIST_DEPLOYMENTS,
        READ_DEPLOYMENT,
        UPDATE_DEPLOYMENT,
        DELETE_DEPLOYMENT,
        CREATE_ALIAS,
        LIST_ALIASES,
        READ_ALIAS,
        DELETE_ALIAS,
        CREATE_WORKER,
        LIST_WORKERS,
        READ_WORKER,
        DELETE_WORKER,
        CREATE_CRONJOB,
        LIST_CRONJOBS,
        READ_CRONJOB,
        DELETE_CRONJOB,
        CREATE_ADDON,
        LIST_ADDONS,
        LIST_ADDON_CATALOGUE,
        READ_ADDON,
        UPDATE_ADDON,
        DELETE_ADDON,
        CREATE_APP_USER,
        LIST_APP_USERS,
        DELETE_APP_USER,
        CREATE_DEPLOYMENT_USER,
        LIST_DEPLOYMENT_USERS,
        DELETE_DEPLOYMENT_USER,
        CREATE_USER,
        LIST_USERS,
        READ_USER,
        UPDATE_USER,
        DELETE_USER,
        CREATE_KEY,
        LIST_KEYS,
        READ_KEY,
        DELETE_KEY,
        READ_LOG,
        LIST_BILLING_ACCOUNTS,
        CREATE_BILLING_ACCOUNT,
        UPDATE_BILLING_ACCOUNT,
    ];

    /// Answers every request with a fixed body and records what was sent.
    struct Recorder {
        body: &'static [u8],
        seen: Mutex<Vec<(reqwest::Method, String, Option<Vec<u8>>)>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn execute(
            &self,
            _base_url: &str,
            request: &ApiRequest,
            _auth: AuthMaterial<'_>,
        ) -> Result<Vec<u8>, ApiError> {
            self.seen.lock().unwrap().push((
                request.method.clone(),
                request.path.clone(),
                request.body.clone(),
            ));
            Ok(self.body.to_vec())
        }
    }

    fn recorder(body: &'static [u8]) -> (Arc<Recorder>, Session) {
        let recorder = Arc::new(Recorder {
            body,
            seen: Mutex::new(Vec::new()),
        });
        let session = Session::with_transport(ClientConfig::default(), recorder.clone())
            .with_token(Token::from_key("abc123"));
        (recorder, session)
    }

    #[test]
    fn test_templates_are_well_formed() {
        for endpoint in ALL {
            assert!(endpoint.template.starts_with('/'), "{endpoint}");
            assert!(endpoint.template.ends_with('/'), "{endpoint}");

            let args = vec!["x"; endpoint.arity()];
            let path = endpoint.path(&args).unwrap();
            assert!(!path.contains(PLACEHOLDER), "{endpoint}");
        }
    }

    #[test]
    fn test_path_substitutes_in_order() {
        assert_eq!(
            READ_WORKER.path(&["myapp", "default", "wrk42"]).unwrap(),
            "/app/myapp/deployment/default/worker/wrk42/"
        );
        assert_eq!(LIST_APPS.path(&[]).unwrap(), "/app/");
    }

    #[test]
    fn test_path_arity_mismatch() {
        assert!(matches!(
            READ_APP.path(&[]),
            Err(ApiError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            READ_APP.path(&["a", "b"]),
            Err(ApiError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_delete_user_targets_user_resource() {
        assert_eq!(DELETE_USER.path(&["jdoe"]).unwrap(), "/user/jdoe/");
    }

    #[test]
    fn test_log_path() {
        assert_eq!(
            log_path("myapp", "default", "access", None).unwrap(),
            "/app/myapp/deployment/default/log/access/"
        );

        let since = Utc.timestamp_opt(1356998400, 123_456_789).unwrap();
        assert_eq!(
            log_path("myapp", "default", "access", Some(&since)).unwrap(),
            "/app/myapp/deployment/default/log/access/?timestamp=1356998400.123456"
        );
    }

    #[tokio::test]
    async fn test_invoke_list() {
        let (recorder, session) =
            recorder(br#"[{"name":"one","type":{"name":"php"}},{"name":"two"}]"#);

        let apps: Vec<Application> = session.invoke(&LIST_APPS, &[], None).await.unwrap();

        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].app_type.name, "php");
        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen[0].0, reqwest::Method::GET);
        assert_eq!(seen[0].1, "/app/");
    }

    #[tokio::test]
    async fn test_invoke_post_sends_form() {
        let (recorder, session) = recorder(br#"{"name":"www.example.com"}"#);
        let data = FormData::new().with("name", "www.example.com");

        let alias: Alias = session
            .invoke(&CREATE_ALIAS, &["myapp", "default"], Some(&data))
            .await
            .unwrap();

        assert_eq!(alias.name, "www.example.com");
        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen[0].0, reqwest::Method::POST);
        assert_eq!(seen[0].1, "/app/myapp/deployment/default/alias/");
        assert_eq!(seen[0].2.as_deref(), Some(&b"name=www.example.com"[..]));
    }

    #[tokio::test]
    async fn test_invoke_put_without_data_sends_empty_form() {
        let (recorder, session) = recorder(br#"{"username":"jdoe"}"#);

        let user: User = session.invoke(&UPDATE_USER, &["jdoe"], None).await.unwrap();

        assert_eq!(user.username, "jdoe");
        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen[0].0, reqwest::Method::PUT);
        assert_eq!(seen[0].2.as_deref(), Some(&b""[..]));
    }

    #[tokio::test]
    async fn test_invoke_mapping_error() {
        let (_, session) = recorder(br#"{"name":"myapp"}"#);

        let result: Result<Vec<Application>, _> = session.invoke(&LIST_APPS, &[], None).await;
        assert!(matches!(result, Err(ApiError::FieldMapping(_))));
    }

    #[tokio::test]
    async fn test_invoke_bad_arity_sends_nothing() {
        let (recorder, session) = recorder(b"{}");

        let result: Result<Value, _> = session.invoke(&READ_DEPLOYMENT, &["myapp"], None).await;

        assert!(matches!(result, Err(ApiError::InvalidEndpoint(_))));
        assert!(recorder.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invoke_delete() {
        let (recorder, session) = recorder(b"");

        session
            .invoke_delete(&DELETE_KEY, &["jdoe", "k1"])
            .await
            .unwrap();
        assert!(matches!(
            session.invoke_delete(&READ_KEY, &["jdoe", "k1"]).await,
            Err(ApiError::InvalidEndpoint(_))
        ));

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, reqwest::Method::DELETE);
        assert_eq!(seen[0].1, "/user/jdoe/key/k1/");
    }

    #[tokio::test]
    async fn test_read_log() {
        let (recorder, session) =
            recorder(br#"[{"type":"error","message":"boom","time":1356998400.5}]"#);
        let since = Utc.timestamp_opt(1356998400, 0).unwrap();

        let entries = session
            .read_log("myapp", "default", "error", Some(&since))
            .await
            .unwrap();

        assert_eq!(entries[0].message, "boom");
        assert_eq!(
            recorder.seen.lock().unwrap()[0].1,
            "/app/myapp/deployment/default/log/error/?timestamp=1356998400.000000"
        );
    }
}
