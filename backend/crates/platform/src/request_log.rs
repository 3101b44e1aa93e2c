//! Request logging middleware
//!
//! Assigns every request an ID and runs the rest of the stack inside a
//! `request` span. `user_id` and `role` start out empty; the auth layer
//! fills them in once it has attached an identity, so the completion line
//! below carries them for authenticated requests.

use std::time::Instant;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, field::Empty};

use crate::crypto::random_hex;

/// Response header echoing the request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID, available to handlers as a request extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    fn generate() -> Self {
        Self(random_hex(16))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Logs one line per request with status and latency
pub async fn log_request(mut req: Request, next: Next) -> Response {
    let request_id = RequestId::generate();
    req.extensions_mut().insert(request_id.clone());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id.as_str(),
        method = %req.method(),
        path = %req.uri().path(),
        user_id = Empty,
        role = Empty,
    );

    async move {
        let started = Instant::now();
        let mut response = next.run(req).await;

        let status = response.status().as_u16();
        let latency_ms = started.elapsed().as_millis() as u64;
        if response.status().is_server_error() {
            tracing::error!(status, latency_ms, "Request failed");
        } else {
            tracing::info!(status, latency_ms, "Request completed");
        }

        if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}
