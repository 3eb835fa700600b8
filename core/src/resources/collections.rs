//! Virtual accounts for receiving payments.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::dispatch;
use crate::error::MapleradError;
use crate::http::{HttpMethod, RequestOptions};
use crate::transport::Transport;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateVirtualAccount {
    pub customer_id: String,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_bank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_account_id: Option<String>,
    /// KYC material required for some currencies (occupation, utility bill,
    /// identity documents, ...). Passed through as-is.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

#[derive(Debug, Clone, Copy)]
pub struct Collections<'a> {
    transport: &'a Transport,
}

impl<'a> Collections<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub fn create_virtual_account(
        &self,
        input: &CreateVirtualAccount,
    ) -> Result<Value, MapleradError> {
        dispatch(
            self.transport,
            HttpMethod::Post,
            "/collections/virtual-account",
            RequestOptions::new().json(input)?,
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{body_of, path_of, scripted_client, ScriptedExecutor};

    #[test]
    fn create_virtual_account_passes_meta_through() {
        let (client, executor) =
            scripted_client(ScriptedExecutor::new().respond(201, r#"{"status":true}"#));
        let mut meta = Map::new();
        meta.insert("occupation".to_string(), json!("Engineer"));
        let input = CreateVirtualAccount {
            customer_id: "c_1".to_string(),
            currency: "USD".to_string(),
            preferred_bank: None,
            deposit_account_id: None,
            meta,
        };

        let result = client.collections().create_virtual_account(&input).unwrap();
        assert_eq!(result, json!({"status": true}));

        let req = executor.last_request();
        assert_eq!(path_of(&req), "/collections/virtual-account");
        assert_eq!(
            body_of(&req),
            json!({"customer_id": "c_1", "currency": "USD", "meta": {"occupation": "Engineer"}})
        );
    }
}
