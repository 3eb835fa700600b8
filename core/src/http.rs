//! Plain-data HTTP request and response types.
//!
//! # Design
//! The Transport builds an `HttpRequest` for every call and hands it to an
//! `HttpExecutor`, which returns an `HttpResponse`. Keeping both sides as
//! plain owned data means the response policy in `client` never touches the
//! network and the executor can be swapped in tests.

use serde::Serialize;
use serde_json::Value;

use crate::error::MapleradError;

/// HTTP method for a request.
///
/// The resource wrappers only issue GET, POST and PATCH. `Put` and `Delete`
/// are there for callers going through [`Transport::send`] directly.
///
/// [`Transport::send`]: crate::Transport::send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether repeating the request cannot change the outcome on the server.
    pub fn is_idempotent(self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Put | HttpMethod::Delete)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute (base URL plus endpoint path). Query pairs are kept
/// separate so the executor can encode them.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// All values of the header `name`, compared case-insensitively.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Optional parts of a request: a JSON body and query parameters.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub json_body: Option<Value>,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `payload` as the JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, MapleradError> {
        let value = serde_json::to_value(payload).map_err(|e| {
            MapleradError::InvalidRequest(format!("payload serialization failed: {e}"))
        })?;
        self.json_body = Some(value);
        Ok(self)
    }

    /// Append the query pairs produced by [`query_pairs`].
    pub fn query<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self, MapleradError> {
        self.query.extend(query_pairs(params)?);
        Ok(self)
    }
}

/// Flatten a serializable struct into query pairs, in field order.
///
/// `null` fields are skipped and scalars are stringified. Nested objects and
/// arrays have no query-string encoding here and are rejected.
pub fn query_pairs<T: Serialize + ?Sized>(
    params: &T,
) -> Result<Vec<(String, String)>, MapleradError> {
    let value = serde_json::to_value(params)
        .map_err(|e| MapleradError::InvalidRequest(format!("query serialization failed: {e}")))?;
    let map = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        other => {
            return Err(MapleradError::InvalidRequest(format!(
                "query parameters must be an object, got {other}"
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        let rendered = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(MapleradError::InvalidRequest(format!(
                    "query parameter `{key}` must be a scalar"
                )))
            }
        };
        pairs.push((key, rendered));
    }
    Ok(pairs)
}
