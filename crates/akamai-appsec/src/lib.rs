//! Application Security API client.
//!
//! This crate binds the appsec v1 REST surface: hostname coverage, IP/Geo
//! firewall controls, evaluation rules and rule condition exceptions.
//!
//! Every operation is an async method on [`AppsecClient`] taking a request
//! struct. Identifying fields (configuration id, version, policy id, rule id)
//! are validated before any network I/O and only ever appear in the URL.
//!
//! ```no_run
//! use akamai_appsec::ip_geo::GetIpGeoRequest;
//! use akamai_appsec::AppsecClient;
//!
//! # async fn run() -> akamai_appsec::Result<()> {
//! let client = AppsecClient::new("https://akab-host.luna.akamaiapis.net")?;
//! let firewall = client
//!     .get_ip_geo(&GetIpGeoRequest {
//!         config_id: 43253,
//!         version: 15,
//!         policy_id: "AAAA_81230".to_string(),
//!     })
//!     .await?;
//! println!("{}", firewall.block);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod condition_exception;
pub mod eval_rule;
pub mod eval_rule_action;
pub mod eval_rule_condition_exception;
pub mod filter;
pub mod hostname_coverage;
pub mod ip_geo;
pub mod ip_geo_protection;
pub mod payload;
pub mod rule_condition_exception;

pub use akamai_core::{ApiError, Error};
pub use client::{AppsecClient, AppsecClientBuilder, Endpoint};
pub use payload::RawPayload;

/// Result type for appsec operations.
pub type Result<T> = akamai_core::Result<T>;
