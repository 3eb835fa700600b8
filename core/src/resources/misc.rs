//! Reference data and sandbox helpers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::dispatch;
use crate::error::MapleradError;
use crate::http::{HttpMethod, RequestOptions};
use crate::transport::Transport;

/// Credit the sandbox wallet. Only honoured by the sandbox.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreditTestWallet {
    pub amount: u64,
    pub currency: String,
}

#[derive(Debug, Clone, Copy)]
pub struct Misc<'a> {
    transport: &'a Transport,
}

impl<'a> Misc<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub fn currencies(&self) -> Result<Value, MapleradError> {
        dispatch(self.transport, HttpMethod::Get, "/currencies", RequestOptions::new())
    }

    pub fn countries(&self) -> Result<Value, MapleradError> {
        dispatch(self.transport, HttpMethod::Get, "/countries", RequestOptions::new())
    }

    pub fn credit_test_wallet(&self, input: &CreditTestWallet) -> Result<Value, MapleradError> {
        dispatch(
            self.transport,
            HttpMethod::Post,
            "/test/wallet/credit",
            RequestOptions::new().json(input)?,
        )
    }
}
