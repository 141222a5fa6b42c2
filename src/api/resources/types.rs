//
//  cctrl-client
//  api/resources/types.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Typed records returned by the resource endpoints.
//!
//! Every record derives [`Deserialize`] and tolerates missing keys: fields the
//! server leaves out take their default value, and keys the record does not
//! know about are ignored. A key that is present with the wrong JSON type is
//! a mapping error ([`ApiError::FieldMapping`](crate::api::ApiError::FieldMapping)).
//!
//! # Example
//!
//! ```rust
//! use cctrl_client::api::resources::Application;
//!
//! let app: Application = serde_json::from_str(
//!     r#"{"name":"myapp","type":{"name":"python"},"deployments":[{"name":"myapp/default","dep_id":"dep1234"}]}"#,
//! ).unwrap();
//!
//! assert_eq!(app.app_type.name, "python");
//! assert_eq!(app.deployments[0].id, "dep1234");
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::parse_timestamp;

/// Runtime type of an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationType {
    /// `python`, `ruby`, `java`, `php`, `nodejs` or `custom`.
    pub name: String,
}

/// Owner of an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_active: bool,
}

/// A user, either as an account or as a member of an application or
/// deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub username: String,
    pub email: String,

    /// `owner`, `admin` or `readonly` for members; empty for accounts.
    pub role: String,
}

/// Stack (base image) a deployment runs on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stack {
    pub name: String,
}

/// Billing of one add-on of a deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BilledAddon {
    #[serde(rename = "addon")]
    pub name: String,
    pub hours: i64,
    pub costs: f64,

    /// Fractional Unix timestamp the figures are valid until.
    pub until: f64,
}

/// Billing of the containers of a deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Boxes {
    pub boxes: i64,
    pub costs: f64,
    pub free_boxes: i64,
    pub until: f64,
}

/// Support plan attached to a billing account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportPlan {
    pub name: String,
    pub thirty_days_price: String,
    pub price_in_bill_percentage: String,
}

/// A billing account of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingAccount {
    pub default: bool,
    pub email: String,
    pub postal_code: String,
    pub title: String,
    pub name: String,
    pub first_name: String,
    pub second_name: String,
    pub user: User,
    pub company: String,
    pub country: String,
    pub support_plan: SupportPlan,
}

/// A deployment of an application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deployment {
    /// Full name, `<app>/<deployment>`.
    pub name: String,

    /// Identifier of the form `depxxxxxxxx`.
    #[serde(rename = "dep_id")]
    pub id: String,

    pub default_subdomain: Option<String>,
    pub users: Vec<User>,
    pub stack: Stack,
    pub billed_addons: Vec<BilledAddon>,
    pub version: Option<String>,
    pub is_default: bool,

    #[serde(rename = "boxes")]
    pub billed_boxes: Boxes,

    pub billing_account: Option<BillingAccount>,
    pub state: Option<String>,

    /// Number of containers.
    #[serde(rename = "min_boxes")]
    pub containers: i64,

    /// Memory size of each container, in units of 128 MB.
    #[serde(rename = "max_boxes")]
    pub size: i64,
}

/// An application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    pub name: String,

    #[serde(rename = "type")]
    pub app_type: ApplicationType,

    pub owner: Owner,

    /// Only set for the `custom` application type.
    pub buildpack_url: Option<String>,

    pub users: Vec<User>,
    pub deployments: Vec<Deployment>,
}

/// A domain alias of a deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alias {
    pub name: String,

    /// Code to publish in a TXT record to verify the domain.
    pub verification_code: String,

    /// Number of failed TXT record checks.
    pub verification_errors: i64,

    /// `true` for the aliases the platform creates itself.
    pub is_default: bool,
    pub is_verified: bool,
}

/// A background worker of a deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Worker {
    /// Identifier of the form `wrkxxxxxxxx`.
    #[serde(rename = "wrk_id")]
    pub id: String,

    /// Procfile command the worker runs.
    pub command: String,
}

/// A cron job of a deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cronjob {
    /// Identifier of the form `jobxxxxxxxx`.
    #[serde(rename = "job_id")]
    pub id: String,
}

/// Plan of an add-on, named `<addon>.<option>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddonOption {
    pub name: String,
}

/// An add-on, either in the catalogue or attached to a deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Addon {
    pub name: String,

    #[serde(rename = "addon_option")]
    pub option: AddonOption,

    /// Free-form settings, as configured by the add-on provider.
    pub settings: BTreeMap<String, Value>,
}

/// A public SSH key of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Key {
    /// Random ten character identifier.
    #[serde(rename = "key_id")]
    pub id: String,
}

/// One line of a deployment log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogEntry {
    /// `worker`, `error`, `access` or `deploy`.
    #[serde(rename = "type")]
    pub log_type: String,

    pub message: String,

    /// Fractional Unix timestamp.
    pub time: f64,
}

impl LogEntry {
    /// The entry's time as an instant, if it is in range.
    ///
    /// Pass it back to [`log_path`](super::log_path) to read only newer
    /// entries.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.time)
    }
}
