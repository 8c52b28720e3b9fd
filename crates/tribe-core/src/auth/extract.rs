//! Locating a candidate bearer token in an incoming request.
//!
//! This module only finds a string; it never verifies anything.

use std::collections::HashMap;

/// Cookie that carries the session token.
pub const TOKEN_COOKIE: &str = "token";

const AUTH_HEADER: &str = "authorization";
const BEARER_SCHEME: &str = "Bearer";

/// Minimal view of a request that the guard needs.
///
/// Transport adapters (whatever HTTP framework hosts the portal) implement
/// this; the core never depends on a web framework. Header names are looked
/// up lowercase.
pub trait RequestLike {
    fn cookie(&self, name: &str) -> Option<&str>;
    fn header(&self, name: &str) -> Option<&str>;
}

/// Recover a single candidate token, cookie first, then `Authorization`
/// header.
///
/// The header value is split on whitespace and the final segment wins, which
/// tolerates clients that send `Bearer <token>`, a bare token, or a doubled
/// scheme (`Bearer Bearer <token>`). A lone scheme word is no credential.
pub fn extract_token<R: RequestLike + ?Sized>(request: &R) -> Option<String> {
    if let Some(token) = request.cookie(TOKEN_COOKIE) {
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    let header = request.header(AUTH_HEADER)?;
    let candidate = header.split_whitespace().last()?;
    if candidate == BEARER_SCHEME {
        return None;
    }
    Some(candidate.to_string())
}

/// Owned cookie/header maps implementing [`RequestLike`]; used by tests and
/// callers without a framework request type.
#[derive(Clone, Debug, Default)]
pub struct RequestParts {
    cookies: HashMap<String, String>,
    headers: HashMap<String, String>,
}

impl RequestParts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }
}

impl RequestLike for RequestParts {
    fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }
}
