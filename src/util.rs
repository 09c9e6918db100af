use std::net::SocketAddr;

use axum::http::{HeaderMap, header};

use crate::geo::RequestContext;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

pub fn get_header(headers: &HeaderMap, key: impl header::AsHeaderName) -> Option<String> {
    if let Some(header) = headers.get(key) {
        if let Ok(header) = header.to_str() {
            return Some(header.to_string());
        }
    }
    None
}

/// First hop of `X-Forwarded-For`, the original client.
pub fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    let value = get_header(headers, X_FORWARDED_FOR)?;
    let first = value.split(',').next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}

pub fn request_context(peer: SocketAddr, headers: &HeaderMap, trust_forwarded_for: bool) -> RequestContext {
    if trust_forwarded_for {
        if let Some(client) = forwarded_for(headers) {
            return RequestContext::new(client);
        }
    }
    RequestContext::from(peer)
}
