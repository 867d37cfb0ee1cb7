//! Correlation identifier middleware and extractor.
//!
//! Every inbound request gets exactly one correlation identifier: taken
//! from the `x-correlation-id` header when the caller supplied one,
//! freshly generated otherwise. The identifier rides the request
//! extensions for the rest of the request's lifetime and is echoed on the
//! response header unconditionally, error responses included.

use axum::{
    extract::{ConnectInfo, FromRequestParts, Request},
    http::{
        HeaderValue,
        header::{HeaderName, USER_AGENT},
        request::Parts,
    },
    middleware::Next,
    response::Response,
};
use http_body::Body as _;
use std::convert::Infallible;
use std::fmt;
use std::net::SocketAddr;
use tracing::info;
use uuid::Uuid;

/// Name of the inbound and outbound correlation header.
pub const CORRELATION_HEADER: &str = "x-correlation-id";

/// Per-request opaque correlation token.
///
/// Ephemeral: attached to one request, echoed on its response, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generates a fresh correlation identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps a caller-supplied correlation identifier.
    #[must_use]
    pub fn from_header_value(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // The middleware runs before any handler, so the extension is
        // always present; generating here keeps the extractor total.
        Ok(parts
            .extensions
            .get::<Self>()
            .cloned()
            .unwrap_or_else(Self::generate))
    }
}

/// Assigns the correlation identifier and logs request entry and exit.
///
/// Emits one structured event when the request arrives (method, path,
/// remote address, user agent) and one when the response is complete
/// (status code, body size), both tagged with the correlation identifier.
pub async fn correlation_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id = request
        .headers()
        .get(CORRELATION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map_or_else(CorrelationId::generate, CorrelationId::from_header_value);

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let remote_address = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.to_string());
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);

    info!(
        component = "http",
        operation = "request",
        correlation_id = %correlation_id,
        method = %method,
        path = path.as_str(),
        remote_address = remote_address.as_deref(),
        user_agent = user_agent.as_deref(),
        "incoming HTTP request"
    );

    request.extensions_mut().insert(correlation_id.clone());
    let mut response = next.run(request).await;

    let status_code = response.status().as_u16();
    let content_length = response.body().size_hint().exact().unwrap_or(0);
    info!(
        component = "http",
        operation = "response",
        correlation_id = %correlation_id,
        status_code,
        content_length,
        "outgoing HTTP response"
    );

    if let Ok(value) = HeaderValue::from_str(correlation_id.as_str()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(CORRELATION_HEADER), value);
    }
    response
}
