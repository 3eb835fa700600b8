//! Customer onboarding, KYC tier upgrades and per-customer lookups.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::client::{dispatch, segment};
use crate::error::MapleradError;
use crate::http::{HttpMethod, RequestOptions};
use crate::transport::Transport;
use crate::types::{Address, Identity, PageQuery, Phone};

/// Minimal (tier 0) customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: String,
}

/// Customer created with full KYC details in one call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrollCustomer {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub email: String,
    pub dob: String,
    pub identification_number: String,
    pub phone: Phone,
    pub identity: Identity,
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpgradeTier1 {
    pub customer_id: String,
    pub phone: Phone,
    pub address: Address,
    pub dob: String,
    pub identification_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpgradeTier2 {
    pub customer_id: String,
    pub identity: Identity,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateCustomer {
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

#[derive(Debug, Clone, Copy)]
pub struct Customers<'a> {
    transport: &'a Transport,
}

impl<'a> Customers<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub fn create(&self, input: &CreateCustomer) -> Result<Value, MapleradError> {
        dispatch(self.transport, HttpMethod::Post, "/customers", RequestOptions::new().json(input)?)
    }

    pub fn enroll(&self, input: &EnrollCustomer) -> Result<Value, MapleradError> {
        dispatch(
            self.transport,
            HttpMethod::Post,
            "/customers/enroll",
            RequestOptions::new().json(input)?,
        )
    }

    pub fn get(&self, customer_id: &str) -> Result<Value, MapleradError> {
        let id = segment("customer id", customer_id)?;
        dispatch(
            self.transport,
            HttpMethod::Get,
            &format!("/customers/{id}"),
            RequestOptions::new(),
        )
    }

    pub fn list(&self, page: &PageQuery) -> Result<Value, MapleradError> {
        dispatch(self.transport, HttpMethod::Get, "/customers", RequestOptions::new().query(page)?)
    }

    pub fn upgrade_tier1(&self, input: &UpgradeTier1) -> Result<Value, MapleradError> {
        dispatch(
            self.transport,
            HttpMethod::Patch,
            "/customers/upgrade/tier1",
            RequestOptions::new().json(input)?,
        )
    }

    pub fn upgrade_tier2(&self, input: &UpgradeTier2) -> Result<Value, MapleradError> {
        dispatch(
            self.transport,
            HttpMethod::Patch,
            "/customers/upgrade/tier2",
            RequestOptions::new().json(input)?,
        )
    }

    pub fn update(&self, input: &UpdateCustomer) -> Result<Value, MapleradError> {
        dispatch(
            self.transport,
            HttpMethod::Patch,
            "/customers/update",
            RequestOptions::new().json(input)?,
        )
    }

    /// Blacklist (`true`) or reinstate (`false`) a customer.
    pub fn set_blacklist(
        &self,
        customer_id: &str,
        blacklist: bool,
    ) -> Result<Value, MapleradError> {
        let id = segment("customer id", customer_id)?;
        dispatch(
            self.transport,
            HttpMethod::Post,
            &format!("/customers/{id}/active"),
            RequestOptions::new().json(&json!({ "blacklist": blacklist }))?,
        )
    }

    pub fn cards(&self, customer_id: &str) -> Result<Value, MapleradError> {
        let id = segment("customer id", customer_id)?;
        dispatch(
            self.transport,
            HttpMethod::Get,
            &format!("/customers/{id}/cards"),
            RequestOptions::new(),
        )
    }

    pub fn transactions(&self, customer_id: &str) -> Result<Value, MapleradError> {
        let id = segment("customer id", customer_id)?;
        dispatch(
            self.transport,
            HttpMethod::Get,
            &format!("/customers/{id}/transactions"),
            RequestOptions::new(),
        )
    }

    pub fn virtual_accounts(&self, customer_id: &str) -> Result<Value, MapleradError> {
        let id = segment("customer id", customer_id)?;
        dispatch(
            self.transport,
            HttpMethod::Get,
            &format!("/customers/{id}/virtual-account"),
            RequestOptions::new(),
        )
    }

    /// Enroll an existing customer for cards of `brand` (e.g. `VISA`).
    pub fn card_enroll(&self, customer_id: &str, brand: &str) -> Result<Value, MapleradError> {
        dispatch(
            self.transport,
            HttpMethod::Patch,
            "/customers/card-enroll",
            RequestOptions::new().json(&json!({ "customer_id": customer_id, "brand": brand }))?,
        )
    }
}
