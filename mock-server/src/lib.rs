//! In-process stand-in for the Maplerad sandbox.
//!
//! Serves a small slice of the `/v1` API, records every request it sees in a
//! journal and answers 401 unless the request carries exactly one
//! `authorization: Bearer <secret>` header.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEFAULT_SECRET: &str = "sk_test";

/// One request as seen by the server, before authorization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub host: Option<String>,
    pub accept: Vec<String>,
    pub content_type: Vec<String>,
    pub authorization: Vec<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuote {
    pub source_currency: String,
    pub target_currency: String,
    pub amount: u64,
}

struct Inner {
    secret: String,
    next_customer: AtomicU64,
    customers: RwLock<HashMap<String, Value>>,
    journal: RwLock<Vec<ObservedRequest>>,
}

/// Shared server state. Clones share the same store and journal.
#[derive(Clone)]
pub struct Sandbox {
    inner: Arc<Inner>,
}

impl Sandbox {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                secret: secret.into(),
                next_customer: AtomicU64::new(1),
                customers: RwLock::new(HashMap::new()),
                journal: RwLock::new(Vec::new()),
            }),
        }
    }

    pub async fn journal(&self) -> Vec<ObservedRequest> {
        self.inner.journal.read().await.clone()
    }

    /// Journal snapshot for callers outside the runtime.
    pub fn blocking_journal(&self) -> Vec<ObservedRequest> {
        self.inner.journal.blocking_read().clone()
    }
}

pub fn app() -> Router {
    app_with(Sandbox::new(DEFAULT_SECRET))
}

pub fn app_with(sandbox: Sandbox) -> Router {
    let api = Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/{id}", get(get_customer))
        .route("/fx/quote", post(create_quote))
        .route("/wallets", get(list_wallets))
        .route("/currencies", get(list_currencies));

    Router::new()
        .nest("/v1", api)
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(sandbox.clone(), record_and_authorize))
        .with_state(sandbox)
}

pub async fn run(listener: TcpListener, sandbox: Sandbox) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(sandbox)).await
}

fn header_values(headers: &HeaderMap, name: header::HeaderName) -> Vec<String> {
    headers
        .get_all(name)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect()
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "status": false, "message": message }))).into_response()
}

async fn record_and_authorize(
    State(sandbox): State<Sandbox>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, 1024 * 1024).await {
        Ok(bytes) => bytes,
        Err(_) => return failure(StatusCode::PAYLOAD_TOO_LARGE, "request body too large"),
    };

    let authorization = header_values(&parts.headers, header::AUTHORIZATION);
    let observed = ObservedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        host: header_values(&parts.headers, header::HOST).into_iter().next(),
        accept: header_values(&parts.headers, header::ACCEPT),
        content_type: header_values(&parts.headers, header::CONTENT_TYPE),
        authorization: authorization.clone(),
        body: serde_json::from_slice(&bytes).ok(),
    };
    tracing::debug!(method = %observed.method, path = %observed.path, "observed request");
    sandbox.inner.journal.write().await.push(observed);

    let expected = format!("Bearer {}", sandbox.inner.secret);
    if authorization != [expected] {
        return failure(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn parse_body<T: serde::de::DeserializeOwned>(bytes: &Bytes) -> Result<T, Response> {
    serde_json::from_slice(bytes)
        .map_err(|e| failure(StatusCode::BAD_REQUEST, &format!("invalid payload: {e}")))
}

async fn create_customer(State(sandbox): State<Sandbox>, body: Bytes) -> Response {
    let input: CreateCustomer = match parse_body(&body) {
        Ok(input) => input,
        Err(rejection) => return rejection,
    };
    if !input.email.contains('@') {
        return failure(StatusCode::BAD_REQUEST, "email is invalid");
    }
    if input.first_name.trim().is_empty() || input.last_name.trim().is_empty() {
        return failure(StatusCode::BAD_REQUEST, "first_name and last_name are required");
    }

    let id = format!("c_{}", sandbox.inner.next_customer.fetch_add(1, Ordering::SeqCst));
    let customer = json!({
        "id": id,
        "first_name": input.first_name,
        "last_name": input.last_name,
        "email": input.email,
        "country": input.country,
        "tier": 0,
        "status": "ACTIVE",
    });
    sandbox.inner.customers.write().await.insert(id.clone(), customer);
    (StatusCode::CREATED, Json(json!({ "id": id }))).into_response()
}

async fn list_customers(State(sandbox): State<Sandbox>) -> Response {
    let customers = sandbox.inner.customers.read().await;
    let mut data: Vec<Value> = customers.values().cloned().collect();
    data.sort_by(|a, b| a["id"].as_str().cmp(&b["id"].as_str()));
    Json(json!({ "status": true, "message": "customers fetched", "data": data })).into_response()
}

async fn get_customer(State(sandbox): State<Sandbox>, Path(id): Path<String>) -> Response {
    let customers = sandbox.inner.customers.read().await;
    match customers.get(&id) {
        Some(customer) => Json(json!({
            "status": true,
            "message": "customer fetched",
            "data": customer,
        }))
        .into_response(),
        None => failure(StatusCode::NOT_FOUND, "customer not found"),
    }
}

async fn create_quote(body: Bytes) -> Response {
    let input: CreateQuote = match parse_body(&body) {
        Ok(input) => input,
        Err(rejection) => return rejection,
    };
    if input.amount == 0 {
        return failure(StatusCode::BAD_REQUEST, "amount must be greater than zero");
    }
    if input.source_currency == input.target_currency {
        return failure(StatusCode::BAD_REQUEST, "source and target currency must differ");
    }
    let data = json!({
        "reference": Uuid::new_v4(),
        "source": { "currency": input.source_currency, "amount": input.amount },
        "target": { "currency": input.target_currency, "amount": input.amount / 1500 },
        "rate": 1500,
    });
    let body = json!({ "status": true, "message": "quote generated", "data": data });
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn list_wallets() -> Json<Value> {
    Json(json!({
        "status": true,
        "message": "wallets fetched",
        "data": [
            { "currency": "NGN", "available_balance": 0, "ledger_balance": 0 },
            { "currency": "USD", "available_balance": 0, "ledger_balance": 0 },
        ],
    }))
}

async fn list_currencies() -> Json<Value> {
    Json(json!({
        "status": true,
        "message": "currencies fetched",
        "data": [
            { "code": "NGN", "name": "Nigerian Naira" },
            { "code": "USD", "name": "US Dollar" },
        ],
    }))
}

async fn route_not_found() -> Response {
    failure(StatusCode::NOT_FOUND, "route not found")
}
