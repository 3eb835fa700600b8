//! Transaction ledger lookups.

use serde_json::Value;

use crate::client::{dispatch, segment};
use crate::error::MapleradError;
use crate::http::{HttpMethod, RequestOptions};
use crate::transport::Transport;
use crate::types::PageQuery;

#[derive(Debug, Clone, Copy)]
pub struct Transactions<'a> {
    transport: &'a Transport,
}

impl<'a> Transactions<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub fn list(&self, page: &PageQuery) -> Result<Value, MapleradError> {
        dispatch(
            self.transport,
            HttpMethod::Get,
            "/transactions",
            RequestOptions::new().query(page)?,
        )
    }

    pub fn get(&self, transaction_id: &str) -> Result<Value, MapleradError> {
        let id = segment("transaction id", transaction_id)?;
        dispatch(
            self.transport,
            HttpMethod::Get,
            &format!("/transactions/{id}"),
            RequestOptions::new(),
        )
    }

    /// Confirm that a collection (incoming payment) settled.
    pub fn verify_collection(&self, transaction_id: &str) -> Result<Value, MapleradError> {
        let id = segment("transaction id", transaction_id)?;
        dispatch(
            self.transport,
            HttpMethod::Get,
            &format!("/transactions/verify/{id}"),
            RequestOptions::new(),
        )
    }
}
