//! Synchronous client for the Maplerad payments API.
//!
//! # Overview
//! [`Maplerad`] owns one [`Transport`] and hands out a wrapper per resource
//! group (customers, issuing, bills, collections, counterparties, FX,
//! institutions, transactions, transfers, wallets, misc). Every wrapper
//! method builds a path and optional JSON payload, sends it through the
//! Transport and maps the response through [`parse_response`].
//!
//! # Design
//! - The Transport captures the secret, base URL and retry budget at
//!   construction and never changes them. Each request gets the same three
//!   headers: `accept`, `content-type` and `authorization: Bearer <secret>`.
//! - The environment selector only recognizes `"PRODUCTION"`. Any other value
//!   targets the sandbox.
//! - Outcomes are `Result<serde_json::Value, MapleradError>`: 200/201 decode
//!   the body, 401 is always `Unauthorized`, other statuses carry the remote
//!   error body, and a missing response is `Connectivity`.
//! - I/O sits behind [`HttpExecutor`]; the default executor is a pooled
//!   `ureq::Agent`, and tests substitute their own.
//!
//! ```rust,no_run
//! use maplerad_core::{CreateCustomer, Environment, Maplerad, MapleradError};
//!
//! fn main() -> Result<(), MapleradError> {
//!     let client = Maplerad::new("sk_test_...", Environment::from_selector("DEVELOPMENT"))?;
//!     let customer = client.customers().create(&CreateCustomer {
//!         first_name: "Ada".into(),
//!         last_name: "Obi".into(),
//!         email: "ada@example.com".into(),
//!         country: "NG".into(),
//!     })?;
//!     println!("{customer}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{parse_response, Maplerad};
pub use config::{ClientConfig, Credentials, Environment};
pub use error::{MapleradError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
pub use resources::*;
pub use transport::{HttpExecutor, Transport, UreqExecutor};
pub use types::{Address, Identity, PageQuery, Phone};
