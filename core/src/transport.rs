//! The single point of egress to Maplerad.
//!
//! # Design
//! `Transport` turns `(method, path, options)` into an `HttpRequest` carrying
//! the fixed JSON and bearer headers, then hands it to an `HttpExecutor`.
//! The production executor owns one `ureq::Agent`, whose connection pool is
//! shared by every clone of the Transport. Transient transport failures are
//! retried a bounded number of times. A received response is never retried,
//! whatever its status.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{ClientConfig, Environment};
use crate::error::{MapleradError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};

pub const ACCEPT: &str = "accept";
pub const CONTENT_TYPE: &str = "content-type";
pub const AUTHORIZATION: &str = "authorization";
pub const APPLICATION_JSON: &str = "application/json";

/// Executes a fully built request.
///
/// Implementations must return HTTP error statuses as `Ok` responses and only
/// use `Err` when no response was obtained.
pub trait HttpExecutor: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<E: HttpExecutor + ?Sized> HttpExecutor for Arc<E> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// `HttpExecutor` backed by a pooled `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqExecutor {
    agent: ureq::Agent,
}

impl UreqExecutor {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .timeout_connect(Some(config.connect_timeout))
            .max_idle_connections(config.max_idle_connections)
            .build()
            .new_agent();
        Self { agent }
    }
}

fn decorate<B>(
    mut builder: ureq::RequestBuilder<B>,
    request: &HttpRequest,
) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    for (key, value) in &request.query {
        builder = builder.query(key, value);
    }
    builder
}

impl HttpExecutor for UreqExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let body = request.body.as_deref();

        let result = match (request.method, body) {
            (HttpMethod::Get, _) => decorate(self.agent.get(url), request).call(),
            (HttpMethod::Delete, _) => decorate(self.agent.delete(url), request).call(),
            (HttpMethod::Post, Some(body)) => {
                decorate(self.agent.post(url), request).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => decorate(self.agent.post(url), request).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                decorate(self.agent.put(url), request).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => decorate(self.agent.put(url), request).send_empty(),
            (HttpMethod::Patch, Some(body)) => {
                decorate(self.agent.patch(url), request).send(body.as_bytes())
            }
            (HttpMethod::Patch, None) => decorate(self.agent.patch(url), request).send_empty(),
        };

        let mut response = result.map_err(|err| map_ureq_error(err, url))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                let value = value.to_str().ok()?;
                Some((name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|err| map_ureq_error(err, url))?;

        Ok(HttpResponse { status, headers, body })
    }
}

fn map_ureq_error(err: ureq::Error, url: &str) -> TransportError {
    match &err {
        ureq::Error::HostNotFound => TransportError::HostNotFound(url.to_string()),
        ureq::Error::ConnectionFailed => TransportError::ConnectionFailed(url.to_string()),
        ureq::Error::Timeout(_) => TransportError::Timeout(err.to_string()),
        ureq::Error::Io(io) => match io.kind() {
            std::io::ErrorKind::ConnectionRefused => {
                TransportError::ConnectionFailed(io.to_string())
            }
            std::io::ErrorKind::TimedOut => TransportError::Timeout(io.to_string()),
            _ => TransportError::Io(io.to_string()),
        },
        _ => TransportError::Other(err.to_string()),
    }
}

/// Authenticated, pooled access to the Maplerad API.
#[derive(Clone)]
pub struct Transport {
    base_url: String,
    environment: Environment,
    authorization: String,
    max_retries: u32,
    executor: Arc<dyn HttpExecutor>,
}

impl Transport {
    /// Build a Transport for `environment` using the default `ureq` executor.
    pub fn configure(
        secret: impl Into<String>,
        environment: Environment,
    ) -> Result<Self, MapleradError> {
        Self::from_config(ClientConfig::new(secret, environment)?)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, MapleradError> {
        let executor = UreqExecutor::new(&config);
        Self::with_executor(config, executor)
    }

    pub fn with_executor<E>(config: ClientConfig, executor: E) -> Result<Self, MapleradError>
    where
        E: HttpExecutor + 'static,
    {
        let base_url = config.resolved_base_url();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(MapleradError::Config(format!(
                "base URL must start with http:// or https://, got `{base_url}`"
            )));
        }
        Ok(Self {
            base_url,
            environment: config.environment,
            authorization: config.credentials.authorization_header(),
            max_retries: config.max_retries,
            executor: Arc::new(executor),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Build the request for `path` without sending it.
    pub fn build(&self, method: HttpMethod, path: &str, options: RequestOptions) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            query: options.query,
            headers: vec![
                (ACCEPT.to_string(), APPLICATION_JSON.to_string()),
                (CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()),
                (AUTHORIZATION.to_string(), self.authorization.clone()),
            ],
            body: options.json_body.map(|body| body.to_string()),
        }
    }

    /// Build and execute a request, returning the raw response.
    pub fn send(
        &self,
        method: HttpMethod,
        path: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, MapleradError> {
        let request = self.build(method, path, options);
        self.execute(&request)
    }

    /// Execute a built request, retrying transient transport failures.
    pub fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, MapleradError> {
        let attempts = self.max_retries.saturating_add(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(
                attempt,
                method = %request.method,
                url = %request.url,
                "sending maplerad request"
            );

            match self.executor.execute(request) {
                Ok(response) => {
                    debug!(
                        attempt,
                        method = %request.method,
                        url = %request.url,
                        status = response.status,
                        "received maplerad response"
                    );
                    return Ok(response);
                }
                Err(err) => {
                    if attempt < attempts && should_retry(request.method, &err) {
                        warn!(
                            attempt,
                            method = %request.method,
                            url = %request.url,
                            error = %err,
                            "retrying maplerad request"
                        );
                        continue;
                    }
                    debug!(
                        attempt,
                        method = %request.method,
                        url = %request.url,
                        error = %err,
                        "maplerad request failed"
                    );
                    return Err(MapleradError::Connectivity(err));
                }
            }
        }
    }
}

/// Nothing reached the server on a connect failure, so any method is safe to
/// repeat. Later failures are only retried for idempotent methods.
fn should_retry(method: HttpMethod, err: &TransportError) -> bool {
    if err.is_connect() {
        return true;
    }
    method.is_idempotent() && matches!(err, TransportError::Timeout(_) | TransportError::Io(_))
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("environment", &self.environment)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::testing::ScriptedExecutor;

    fn transport_with(executor: Arc<ScriptedExecutor>, environment: Environment) -> Transport {
        let config = ClientConfig::new("tok", environment).unwrap();
        Transport::with_executor(config, executor).unwrap()
    }

    #[test]
    fn build_uses_sandbox_for_development() {
        let transport = transport_with(Arc::new(ScriptedExecutor::new()), Environment::Development);
        let req = transport.build(HttpMethod::Get, "/customers", RequestOptions::new());
        assert_eq!(req.url, "https://sandbox.api.maplerad.com/v1/customers");
        assert_eq!(req.method, HttpMethod::Get);
        assert!(req.body.is_none());
    }

    #[test]
    fn build_uses_production_host() {
        let transport = transport_with(Arc::new(ScriptedExecutor::new()), Environment::Production);
        let req = transport.build(HttpMethod::Get, "/wallets", RequestOptions::new());
        assert_eq!(req.url, "https://api.maplerad.com/v1/wallets");
    }

    #[test]
    fn build_attaches_each_fixed_header_once() {
        let transport = transport_with(Arc::new(ScriptedExecutor::new()), Environment::Development);
        let options = RequestOptions::new().json(&json!({"amount": 100})).unwrap();
        let req = transport.build(HttpMethod::Post, "/issuing/card_1/fund", options);

        assert_eq!(req.header_values(AUTHORIZATION), vec!["Bearer tok"]);
        assert_eq!(req.header_values(ACCEPT), vec![APPLICATION_JSON]);
        assert_eq!(req.header_values(CONTENT_TYPE), vec![APPLICATION_JSON]);
        assert_eq!(req.headers.len(), 3);

        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"amount": 100}));
    }

    #[test]
    fn configure_rejects_empty_secret() {
        let err = Transport::configure("", Environment::Development).unwrap_err();
        assert!(matches!(err, MapleradError::Config(_)));
    }

    #[test]
    fn with_executor_rejects_bad_base_url() {
        let config = ClientConfig::new("tok", Environment::Development)
            .unwrap()
            .with_base_url("localhost:3000");
        let err = Transport::with_executor(config, ScriptedExecutor::new()).unwrap_err();
        assert!(matches!(err, MapleradError::Config(_)));
    }

    #[test]
    fn http_error_status_is_not_retried() {
        let executor = Arc::new(ScriptedExecutor::new().respond(500, r#"{"message":"boom"}"#));
        let transport = transport_with(executor.clone(), Environment::Development);

        let response = transport.send(HttpMethod::Get, "/wallets", RequestOptions::new()).unwrap();
        assert_eq!(response.status, 500);
        assert_eq!(executor.requests().len(), 1);
    }

    #[test]
    fn connect_failure_is_retried_for_post() {
        let executor = Arc::new(
            ScriptedExecutor::new()
                .fail(TransportError::ConnectionFailed("refused".into()))
                .fail(TransportError::ConnectionFailed("refused".into()))
                .respond(201, r#"{"id":"c_1"}"#),
        );
        let transport = transport_with(executor.clone(), Environment::Development);

        let response = transport
            .send(HttpMethod::Post, "/customers", RequestOptions::new())
            .unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(executor.requests().len(), 3);
    }

    #[test]
    fn timeout_is_not_retried_for_post() {
        let executor = Arc::new(
            ScriptedExecutor::new()
                .fail(TransportError::Timeout("recv".into()))
                .respond(201, "{}"),
        );
        let transport = transport_with(executor.clone(), Environment::Development);

        let err = transport
            .send(HttpMethod::Post, "/transfers", RequestOptions::new())
            .unwrap_err();
        assert!(matches!(err, MapleradError::Connectivity(TransportError::Timeout(_))));
        assert_eq!(executor.requests().len(), 1);
    }

    #[test]
    fn timeout_is_retried_for_get() {
        let executor = Arc::new(
            ScriptedExecutor::new()
                .fail(TransportError::Timeout("recv".into()))
                .respond(200, "[]"),
        );
        let transport = transport_with(executor.clone(), Environment::Development);

        let response = transport
            .send(HttpMethod::Get, "/transfers", RequestOptions::new())
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(executor.requests().len(), 2);
    }

    #[test]
    fn retries_are_bounded() {
        let mut executor = ScriptedExecutor::new();
        for _ in 0..10 {
            executor = executor.fail(TransportError::HostNotFound("sandbox".into()));
        }
        let executor = Arc::new(executor);
        let transport = transport_with(executor.clone(), Environment::Development);

        let err = transport
            .send(HttpMethod::Get, "/currencies", RequestOptions::new())
            .unwrap_err();
        assert!(matches!(err, MapleradError::Connectivity(TransportError::HostNotFound(_))));
        assert_eq!(executor.requests().len(), 4);
    }

    #[test]
    fn debug_output_hides_secret() {
        let transport = transport_with(Arc::new(ScriptedExecutor::new()), Environment::Development);
        assert!(!format!("{transport:?}").contains("tok"));
    }

    #[test]
    fn transport_is_usable_across_threads() {
        let mut executor = ScriptedExecutor::new();
        for _ in 0..8 {
            executor = executor.respond(200, "{}");
        }
        let executor = Arc::new(executor);
        let transport = transport_with(executor.clone(), Environment::Development);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let transport = transport.clone();
                std::thread::spawn(move || {
                    let path = format!("/transactions/t_{i}");
                    transport
                        .send(HttpMethod::Get, &path, RequestOptions::new())
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().status, 200);
        }

        let requests = executor.requests();
        assert_eq!(requests.len(), 8);
        assert!(requests.iter().all(|r| r.header_values(AUTHORIZATION) == vec!["Bearer tok"]));
    }
}
