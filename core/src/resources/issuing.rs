//! Card issuing: creation, lookup, PIN, freeze state and balance movements.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::client::{dispatch, segment};
use crate::error::MapleradError;
use crate::http::{HttpMethod, RequestOptions};
use crate::transport::Transport;
use crate::types::PageQuery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardType {
    Virtual,
    Physical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardBrand {
    Visa,
    Mastercard,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateCard {
    pub customer_id: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub brand: CardBrand,
    pub currency: String,
    /// Initial funding, in minor units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_approve: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateBusinessCard {
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub brand: CardBrand,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_approve: Option<bool>,
}

#[derive(Debug, Clone, Copy)]
pub struct Issuing<'a> {
    transport: &'a Transport,
}

impl<'a> Issuing<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub fn create_card(&self, input: &CreateCard) -> Result<Value, MapleradError> {
        dispatch(self.transport, HttpMethod::Post, "/issuing", RequestOptions::new().json(input)?)
    }

    pub fn create_business_card(&self, input: &CreateBusinessCard) -> Result<Value, MapleradError> {
        dispatch(
            self.transport,
            HttpMethod::Post,
            "/issuing/business",
            RequestOptions::new().json(input)?,
        )
    }

    pub fn get_card(&self, card_id: &str) -> Result<Value, MapleradError> {
        let id = segment("card id", card_id)?;
        dispatch(self.transport, HttpMethod::Get, &format!("/issuing/{id}"), RequestOptions::new())
    }

    pub fn list_cards(&self, page: &PageQuery) -> Result<Value, MapleradError> {
        dispatch(self.transport, HttpMethod::Get, "/issuing", RequestOptions::new().query(page)?)
    }

    pub fn set_pin(&self, card_id: &str, pin: &str) -> Result<Value, MapleradError> {
        let id = segment("card id", card_id)?;
        dispatch(
            self.transport,
            HttpMethod::Patch,
            &format!("/issuing/{id}/set-pin"),
            RequestOptions::new().json(&json!({ "pin": pin }))?,
        )
    }

    pub fn freeze(&self, card_id: &str) -> Result<Value, MapleradError> {
        self.card_action(card_id, "freeze")
    }

    pub fn unfreeze(&self, card_id: &str) -> Result<Value, MapleradError> {
        self.card_action(card_id, "unfreeze")
    }

    /// Move `amount` (minor units) from the wallet onto the card.
    pub fn fund(&self, card_id: &str, amount: u64) -> Result<Value, MapleradError> {
        self.card_movement(card_id, "fund", amount)
    }

    /// Move `amount` (minor units) from the card back to the wallet.
    pub fn withdraw(&self, card_id: &str, amount: u64) -> Result<Value, MapleradError> {
        self.card_movement(card_id, "withdraw", amount)
    }

    fn card_action(&self, card_id: &str, action: &str) -> Result<Value, MapleradError> {
        let id = segment("card id", card_id)?;
        dispatch(
            self.transport,
            HttpMethod::Patch,
            &format!("/issuing/{id}/{action}"),
            RequestOptions::new(),
        )
    }

    fn card_movement(
        &self,
        card_id: &str,
        action: &str,
        amount: u64,
    ) -> Result<Value, MapleradError> {
        let id = segment("card id", card_id)?;
        dispatch(
            self.transport,
            HttpMethod::Post,
            &format!("/issuing/{id}/{action}"),
            RequestOptions::new().json(&json!({ "amount": amount }))?,
        )
    }
}
