//! Response policy and the `Maplerad` facade.
//!
//! # Design
//! Every resource wrapper funnels through [`dispatch`]: the Transport sends
//! the request and [`parse_response`] decides the outcome. The policy lives
//! here once, so a 401 from bills behaves exactly like a 401 from customers.

use serde_json::Value;

use crate::config::{ClientConfig, Environment};
use crate::error::MapleradError;
use crate::http::{HttpMethod, HttpResponse, RequestOptions};
use crate::resources::{
    Bills, Collections, Counterparties, Customers, Fx, Institutions, Issuing, Misc, Transactions,
    Transfers, Wallets,
};
use crate::transport::Transport;

/// Map a raw response to the decoded body or a typed error.
///
/// - 200 and 201 decode the body as JSON.
/// - 401 becomes `Unauthorized`.
/// - Any other status becomes `RemoteRequest` carrying the body. A body that
///   is not JSON is kept as a JSON string, an empty one as `null`.
pub fn parse_response(response: HttpResponse) -> Result<Value, MapleradError> {
    match response.status {
        200 | 201 => serde_json::from_str(&response.body).map_err(|e| MapleradError::Decode {
            status: response.status,
            message: e.to_string(),
        }),
        401 => Err(MapleradError::Unauthorized {
            body: serde_json::from_str(&response.body).ok(),
        }),
        status => Err(MapleradError::RemoteRequest {
            status,
            body: error_body(response.body),
        }),
    }
}

fn error_body(raw: String) -> Value {
    if raw.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}

pub(crate) fn dispatch(
    transport: &Transport,
    method: HttpMethod,
    path: &str,
    options: RequestOptions,
) -> Result<Value, MapleradError> {
    parse_response(transport.send(method, path, options)?)
}

/// Validate an identifier interpolated into a path segment.
pub(crate) fn segment<'a>(name: &str, value: &'a str) -> Result<&'a str, MapleradError> {
    if value.is_empty() {
        return Err(MapleradError::InvalidRequest(format!("{name} must not be empty")));
    }
    if value == "." || value == ".." {
        return Err(MapleradError::InvalidRequest(format!(
            "{name} `{value}` is a relative path segment"
        )));
    }
    // `%` would let an encoded `/` or `?` through.
    if value.chars().any(|c| matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace()) {
        return Err(MapleradError::InvalidRequest(format!(
            "{name} `{value}` contains characters not allowed in a path segment"
        )));
    }
    Ok(value)
}

/// Entry point: one Transport, one accessor per resource group.
#[derive(Debug, Clone)]
pub struct Maplerad {
    transport: Transport,
}

impl Maplerad {
    pub fn new(secret: impl Into<String>, environment: Environment) -> Result<Self, MapleradError> {
        Ok(Self::from_transport(Transport::configure(secret, environment)?))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, MapleradError> {
        Ok(Self::from_transport(Transport::from_config(config)?))
    }

    pub fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn customers(&self) -> Customers<'_> {
        Customers::new(&self.transport)
    }

    pub fn issuing(&self) -> Issuing<'_> {
        Issuing::new(&self.transport)
    }

    pub fn bills(&self) -> Bills<'_> {
        Bills::new(&self.transport)
    }

    pub fn collections(&self) -> Collections<'_> {
        Collections::new(&self.transport)
    }

    pub fn counterparties(&self) -> Counterparties<'_> {
        Counterparties::new(&self.transport)
    }

    pub fn fx(&self) -> Fx<'_> {
        Fx::new(&self.transport)
    }

    pub fn institutions(&self) -> Institutions<'_> {
        Institutions::new(&self.transport)
    }

    pub fn transactions(&self) -> Transactions<'_> {
        Transactions::new(&self.transport)
    }

    pub fn transfers(&self) -> Transfers<'_> {
        Transfers::new(&self.transport)
    }

    pub fn wallets(&self) -> Wallets<'_> {
        Wallets::new(&self.transport)
    }

    pub fn misc(&self) -> Misc<'_> {
        Misc::new(&self.transport)
    }
}
