//! Error types for the Maplerad client.
//!
//! # Design
//! Every operation returns `Result<Value, MapleradError>`. A 401 always maps
//! to `Unauthorized`, whichever resource produced it. Other non-success
//! statuses land in `RemoteRequest` with the remote error body kept verbatim,
//! so callers can branch on the kind and still read Maplerad's message.

use serde_json::Value;
use thiserror::Error;

/// Failure to obtain any HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The TCP connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("host not found: {0}")]
    HostNotFound(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    /// I/O failure after the connection was established.
    #[error("i/o error: {0}")]
    Io(String),

    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// True when the failure happened before any bytes reached the server.
    pub fn is_connect(&self) -> bool {
        matches!(self, TransportError::ConnectionFailed(_) | TransportError::HostNotFound(_))
    }
}

/// Errors returned by every Maplerad operation.
#[derive(Debug, Error)]
pub enum MapleradError {
    /// No response was obtained (network, DNS, timeout, TLS).
    #[error("could not reach maplerad: {0}")]
    Connectivity(#[from] TransportError),

    /// The server answered 401: the secret key is wrong or expired.
    #[error("unauthorized: the secret key was rejected")]
    Unauthorized { body: Option<Value> },

    /// The server answered with a status other than 200, 201 or 401.
    #[error("maplerad rejected the request with HTTP {status}: {body}")]
    RemoteRequest { status: u16, body: Value },

    /// A success response did not carry valid JSON.
    #[error("invalid JSON in HTTP {status} response: {message}")]
    Decode { status: u16, message: String },

    /// The request was rejected locally and never sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl MapleradError {
    /// HTTP status of the response behind this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            MapleradError::Unauthorized { .. } => Some(401),
            MapleradError::RemoteRequest { status, .. } | MapleradError::Decode { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, MapleradError::Unauthorized { .. })
    }

    /// The error body returned by Maplerad, if any.
    pub fn remote_body(&self) -> Option<&Value> {
        match self {
            MapleradError::RemoteRequest { body, .. } => Some(body),
            MapleradError::Unauthorized { body } => body.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn connect_failures_are_distinguished() {
        assert!(TransportError::ConnectionFailed("refused".into()).is_connect());
        assert!(TransportError::HostNotFound("x".into()).is_connect());
        assert!(!TransportError::Timeout("read".into()).is_connect());
        assert!(!TransportError::Io("reset".into()).is_connect());
    }

    #[test]
    fn transport_error_converts_into_connectivity() {
        let err: MapleradError = TransportError::Timeout("global".into()).into();
        assert!(matches!(err, MapleradError::Connectivity(TransportError::Timeout(_))));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn remote_body_and_status() {
        let body = json!({"status": false, "message": "customer not found"});
        let err = MapleradError::RemoteRequest {
            status: 404,
            body: body.clone(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.remote_body(), Some(&body));
        assert!(!err.is_unauthorized());
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[test]
    fn unauthorized_reports_401() {
        let err = MapleradError::Unauthorized { body: None };
        assert_eq!(err.status(), Some(401));
        assert!(err.is_unauthorized());
        assert!(err.remote_body().is_none());
    }
}
