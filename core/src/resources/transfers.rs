//! Payouts: NGN bank transfers, USD domiciliary (DOM) transfers and cash
//! pickup.
//!
//! All three share `POST /transfers`; the scheme in `meta` distinguishes
//! them. The DOM and cash-pickup helpers check the scheme before sending so a
//! payload built for one rail cannot be submitted through the other.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::{dispatch, segment};
use crate::error::MapleradError;
use crate::http::{HttpMethod, RequestOptions};
use crate::transport::Transport;
use crate::types::PageQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferScheme {
    #[serde(rename = "DOM")]
    Dom,
    #[serde(rename = "CASHPICKUP")]
    CashPickup,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransferMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<TransferScheme>,
    /// Sender and counterparty details required by the scheme.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Transfer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_code: Option<String>,
    /// Minor units of `currency`.
    pub amount: u64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<TransferMeta>,
}

impl Transfer {
    fn scheme(&self) -> Option<TransferScheme> {
        self.meta.as_ref().and_then(|meta| meta.scheme)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Transfers<'a> {
    transport: &'a Transport,
}

impl<'a> Transfers<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub fn naira(&self, input: &Transfer) -> Result<Value, MapleradError> {
        self.submit(input)
    }

    /// Fails with `InvalidRequest` unless `meta.scheme` is `DOM`.
    pub fn dom(&self, input: &Transfer) -> Result<Value, MapleradError> {
        require_scheme(input, TransferScheme::Dom)?;
        self.submit(input)
    }

    /// Fails with `InvalidRequest` unless `meta.scheme` is `CASHPICKUP`.
    pub fn cash_pickup(&self, input: &Transfer) -> Result<Value, MapleradError> {
        require_scheme(input, TransferScheme::CashPickup)?;
        self.submit(input)
    }

    pub fn get(&self, transfer_id: &str) -> Result<Value, MapleradError> {
        let id = segment("transfer id", transfer_id)?;
        dispatch(
            self.transport,
            HttpMethod::Get,
            &format!("/transfers/{id}"),
            RequestOptions::new(),
        )
    }

    pub fn list(&self, page: &PageQuery) -> Result<Value, MapleradError> {
        dispatch(self.transport, HttpMethod::Get, "/transfers", RequestOptions::new().query(page)?)
    }

    fn submit(&self, input: &Transfer) -> Result<Value, MapleradError> {
        reject_shadowed_scheme(input)?;
        dispatch(
            self.transport,
            HttpMethod::Post,
            "/transfers",
            RequestOptions::new().json(input)?,
        )
    }
}

/// `extra` is flattened into `meta` after `scheme`, so a `scheme` key there
/// would replace the checked value on the wire.
fn reject_shadowed_scheme(input: &Transfer) -> Result<(), MapleradError> {
    match &input.meta {
        Some(meta) if meta.extra.contains_key("scheme") => Err(MapleradError::InvalidRequest(
            "set the transfer scheme through `meta.scheme`, not the extra fields".into(),
        )),
        _ => Ok(()),
    }
}

fn require_scheme(input: &Transfer, expected: TransferScheme) -> Result<(), MapleradError> {
    match input.scheme() {
        Some(scheme) if scheme == expected => Ok(()),
        other => Err(MapleradError::InvalidRequest(format!(
            "transfer scheme must be {expected:?}, got {other:?}"
        ))),
    }
}
