#![allow(dead_code)]

use httpmock::{prelude::HttpMockRequest, MockServer};
use serde_json::Value;
use square_dispatch::{Dispatcher, SquareConfig};

pub const TOKEN: &str = "test-token";
pub const BEARER: &str = "Bearer test-token";

pub fn config_for(server: &MockServer) -> SquareConfig {
    SquareConfig::new(TOKEN).with_base_url(server.base_url())
}

pub fn dispatcher_for(server: &MockServer) -> Dispatcher {
    Dispatcher::from_config(config_for(server)).expect("http client")
}

pub fn is_idempotency_key(value: &Value) -> bool {
    value
        .as_str()
        .map(|key| key.len() == 40 && key.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false)
}

fn request_json(req: &HttpMockRequest) -> Option<Value> {
    req.body
        .as_deref()
        .and_then(|body| serde_json::from_slice::<Value>(body).ok())
}

/// Matcher: the body carries a 40-letter `idempotency_key`.
pub fn has_idempotency_key(req: &HttpMockRequest) -> bool {
    request_json(req)
        .map(|body| is_idempotency_key(&body["idempotency_key"]))
        .unwrap_or(false)
}

/// Matcher: the body carries no `idempotency_key` at all.
pub fn lacks_idempotency_key(req: &HttpMockRequest) -> bool {
    request_json(req)
        .map(|body| body.get("idempotency_key").is_none())
        .unwrap_or(false)
}

/// Matcher: the single tax line has its own 40-letter uid, distinct from the key.
pub fn has_tax_uid(req: &HttpMockRequest) -> bool {
    request_json(req)
        .map(|body| {
            let uid = &body["taxes"][0]["uid"];
            is_idempotency_key(uid) && uid != &body["idempotency_key"]
        })
        .unwrap_or(false)
}
