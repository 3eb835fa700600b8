//! Airtime purchases.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{dispatch, segment};
use crate::error::MapleradError;
use crate::http::{HttpMethod, RequestOptions};
use crate::transport::Transport;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuyAirtime {
    pub phone_number: String,
    /// Biller identifier as returned by [`Bills::airtime_billers`].
    pub identifier: String,
    pub amount: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct Bills<'a> {
    transport: &'a Transport,
}

impl<'a> Bills<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub fn buy_airtime(&self, input: &BuyAirtime) -> Result<Value, MapleradError> {
        dispatch(
            self.transport,
            HttpMethod::Post,
            "/bills/airtime",
            RequestOptions::new().json(input)?,
        )
    }

    pub fn airtime_billers(&self, country: &str) -> Result<Value, MapleradError> {
        let country = segment("country", country)?;
        dispatch(
            self.transport,
            HttpMethod::Get,
            &format!("/bills/airtime/billers/{country}"),
            RequestOptions::new(),
        )
    }

    pub fn airtime_history(&self) -> Result<Value, MapleradError> {
        dispatch(self.transport, HttpMethod::Get, "/bills/airtime", RequestOptions::new())
    }
}
