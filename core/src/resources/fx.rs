//! Currency exchange: quote first, then exchange against the quote.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::client::dispatch;
use crate::error::MapleradError;
use crate::http::{HttpMethod, RequestOptions};
use crate::transport::Transport;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FxQuote {
    pub source_currency: String,
    pub target_currency: String,
    /// Amount of `source_currency`, in minor units.
    pub amount: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct Fx<'a> {
    transport: &'a Transport,
}

impl<'a> Fx<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub fn quote(&self, input: &FxQuote) -> Result<Value, MapleradError> {
        dispatch(self.transport, HttpMethod::Post, "/fx/quote", RequestOptions::new().json(input)?)
    }

    /// Execute the exchange locked in by a previous [`Fx::quote`].
    pub fn exchange(&self, quote_reference: &str) -> Result<Value, MapleradError> {
        if quote_reference.trim().is_empty() {
            return Err(MapleradError::InvalidRequest("quote reference must not be empty".into()));
        }
        dispatch(
            self.transport,
            HttpMethod::Post,
            "/fx",
            RequestOptions::new().json(&json!({ "quote_reference": quote_reference }))?,
        )
    }

    pub fn history(&self) -> Result<Value, MapleradError> {
        dispatch(self.transport, HttpMethod::Get, "/fx", RequestOptions::new())
    }
}
