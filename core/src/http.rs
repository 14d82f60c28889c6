//! Plain-data HTTP request and response types.
//!
//! # Design
//! Requests are fully formed at build time: URL, header set, and optional
//! body. Once handed to a transport the request is owned by that transport
//! until its completion fires. All fields use owned types so values can move
//! across the thread boundary inside a transport without lifetime concerns.

/// HTTP method for a request. Only the verbs the client issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An outbound HTTP request described as plain data.
///
/// Built by `AuthClient::build_*` methods and consumed by a [`Transport`]
/// implementation. Building one has no side effect on shared state.
///
/// [`Transport`]: crate::transport::Transport
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value by exact key.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a transport once a round trip completes and passed to the
/// completion continuation, which validates and parses it.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status code falls in the 2xx success range.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}
