//! Request metadata recorded on new sessions.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use numisroma_core::device::UNKNOWN;

/// Header through which clients may pass a human-readable location hint.
pub const LOCATION_HEADER: &str = "x-client-location";

/// Where a request came from: user agent, client IP, and location hint.
///
/// Extraction never fails; missing pieces fall back to placeholders.
#[derive(Debug, Clone)]
pub struct ClientContext {
    pub user_agent: Option<String>,
    pub ip_address: String,
    pub location: String,
}

impl ClientContext {
    /// Prefer a non-empty location supplied in a request body over the header.
    pub fn with_location(mut self, location: Option<&str>) -> Self {
        if let Some(location) = location.map(str::trim).filter(|l| !l.is_empty()) {
            self.location = location.to_string();
        }
        self
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ClientContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = header_str(&parts.headers, USER_AGENT.as_str()).map(str::to_string);

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        let location = header_str(&parts.headers, LOCATION_HEADER)
            .unwrap_or(UNKNOWN)
            .to_string();

        Ok(Self {
            user_agent,
            ip_address: client_ip(&parts.headers, peer),
            location,
        })
    }
}

/// First `x-forwarded-for` entry, then `x-real-ip`, then the socket peer.
fn client_ip(headers: &HeaderMap, peer: Option<String>) -> String {
    header_str(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .or_else(|| header_str(headers, "x-real-ip"))
        .map(str::to_string)
        .or(peer)
        .unwrap_or_else(|| "unknown".to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
