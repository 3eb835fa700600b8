//! In-memory `HttpExecutor` for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::config::{ClientConfig, Environment};
use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{HttpExecutor, Transport};
use crate::Maplerad;

/// Replays scripted outcomes in order and records every request it sees.
/// Once the script runs out it answers `200 {}`.
#[derive(Default)]
pub(crate) struct ScriptedExecutor {
    script: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl ScriptedExecutor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.script.lock().unwrap().push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub(crate) fn fail(self, err: TransportError) -> Self {
        self.script.lock().unwrap().push_back(Err(err));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was executed")
    }
}

impl HttpExecutor for ScriptedExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, "{}")))
    }
}

/// A sandbox client whose requests land in the returned executor.
pub(crate) fn scripted_client(executor: ScriptedExecutor) -> (Maplerad, Arc<ScriptedExecutor>) {
    let executor = Arc::new(executor);
    let config = ClientConfig::new("tok", Environment::Development).unwrap();
    let transport = Transport::with_executor(config, executor.clone()).unwrap();
    (Maplerad::from_transport(transport), executor)
}

/// Path of `request` relative to the sandbox base URL.
pub(crate) fn path_of(request: &HttpRequest) -> &str {
    request
        .url
        .strip_prefix(crate::config::SANDBOX_BASE_URL)
        .expect("request did not target the sandbox")
}

pub(crate) fn body_of(request: &HttpRequest) -> serde_json::Value {
    serde_json::from_str(request.body.as_deref().expect("request has no body")).unwrap()
}
