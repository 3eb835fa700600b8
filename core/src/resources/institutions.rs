//! Banks and other financial institutions, and account-name resolution.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::dispatch;
use crate::error::MapleradError;
use crate::http::{HttpMethod, RequestOptions};
use crate::transport::Transport;

/// Filters for [`Institutions::list`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstitutionQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// e.g. `bank` or `mobile_money`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolveAccount {
    pub account_number: String,
    pub bank_code: String,
}

#[derive(Debug, Clone, Copy)]
pub struct Institutions<'a> {
    transport: &'a Transport,
}

impl<'a> Institutions<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub fn list(&self, filter: &InstitutionQuery) -> Result<Value, MapleradError> {
        dispatch(
            self.transport,
            HttpMethod::Get,
            "/institutions",
            RequestOptions::new().query(filter)?,
        )
    }

    /// Look up the account holder behind an account number.
    pub fn resolve(&self, input: &ResolveAccount) -> Result<Value, MapleradError> {
        dispatch(
            self.transport,
            HttpMethod::Post,
            "/institutions/resolve",
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
    fn list_uses_remote_query_names() {
        let (client, executor) = scripted_client(ScriptedExecutor::new());
        let filter = InstitutionQuery {
            page: Some(1),
            page_size: Some(10),
            kind: Some("bank".to_string()),
            country: Some("US".to_string()),
        };
        client.institutions().list(&filter).unwrap();

        let req = executor.last_request();
        assert_eq!(path_of(&req), "/institutions");
        assert!(req.body.is_none());
        assert_eq!(
            req.query,
            vec![
                ("page".to_string(), "1".to_string()),
                ("pageSize".to_string(), "10".to_string()),
                ("type".to_string(), "bank".to_string()),
                ("country".to_string(), "US".to_string()),
            ]
        );
    }

    #[test]
    fn resolve_posts_account() {
        let (client, executor) = scripted_client(ScriptedExecutor::new());
        client
            .institutions()
            .resolve(&ResolveAccount {
                account_number: "1234567890".to_string(),
                bank_code: "058".to_string(),
            })
            .unwrap();
        let req = executor.last_request();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(path_of(&req), "/institutions/resolve");
        assert_eq!(body_of(&req), json!({"account_number": "1234567890", "bank_code": "058"}));
    }
}
