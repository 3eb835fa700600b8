//! Wallet balances and history.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{dispatch, segment};
use crate::error::MapleradError;
use crate::http::{HttpMethod, RequestOptions};
use crate::transport::Transport;

/// Filters for wallet history. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletHistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct Wallets<'a> {
    transport: &'a Transport,
}

impl<'a> Wallets<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub fn list(&self) -> Result<Value, MapleradError> {
        dispatch(self.transport, HttpMethod::Get, "/wallets", RequestOptions::new())
    }

    pub fn history(&self, filter: &WalletHistoryQuery) -> Result<Value, MapleradError> {
        dispatch(
            self.transport,
            HttpMethod::Get,
            "/wallets/history",
            RequestOptions::new().query(filter)?,
        )
    }

    pub fn history_by_currency(
        &self,
        currency: &str,
        filter: &WalletHistoryQuery,
    ) -> Result<Value, MapleradError> {
        let currency = segment("currency", currency)?;
        dispatch(
            self.transport,
            HttpMethod::Get,
            &format!("/wallets/{currency}/history"),
            RequestOptions::new().query(filter)?,
        )
    }
}
