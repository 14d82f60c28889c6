//! Authenticated request builder and the login flow.
//!
//! # Design
//! `AuthClient` holds a fixed base URL, the token handle, and an injected
//! transport. Request building is pure: the base URL and subroute are
//! concatenated verbatim (no normalization, the caller avoids double
//! slashes) and the standard header set is attached with the token value
//! read at build time. `login` is the one round trip the client drives
//! itself: serialize credentials, POST to `user/login`, and in the
//! completion validate, decode, and rotate the token. Failed attempts
//! leave the token untouched and are visible only in the logs.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Completion, Transport};
use crate::types::{AuthToken, Credentials, LoginResponse};

/// Subroute of the login endpoint, relative to the base URL.
pub const LOGIN_ROUTE: &str = "user/login";

/// `User-Agent` value attached to every request.
const USER_AGENT: &str = "auth-core-agent";

/// HTTP client that stamps every request with the current authorization
/// token and drives the login exchange that rotates it.
pub struct AuthClient {
    base_url: String,
    token: AuthToken,
    transport: Arc<dyn Transport>,
}

impl AuthClient {
    /// Create a client for `base_url` (e.g. `http://host/api/`), seeded with
    /// a placeholder token that stands in until the first successful login.
    pub fn new(
        base_url: impl Into<String>,
        initial_token: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            token: AuthToken::new(initial_token),
            transport,
        }
    }

    /// Current authorization token value.
    pub fn token(&self) -> String {
        self.token.get()
    }

    /// Build a GET request for `subroute`. Carries the standard headers and
    /// no body.
    pub fn build_get(&self, subroute: &str) -> HttpRequest {
        self.request_with_route(HttpMethod::Get, subroute, None)
    }

    /// Build a POST request for `subroute` with a pre-serialized body.
    pub fn build_post(&self, subroute: &str, body: String) -> HttpRequest {
        self.request_with_route(HttpMethod::Post, subroute, Some(body))
    }

    /// Build the login request: credentials serialized to JSON, POSTed to
    /// [`LOGIN_ROUTE`].
    pub fn build_login(&self, credentials: &Credentials) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(credentials)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.build_post(LOGIN_ROUTE, body))
    }

    /// Hand a built request to the transport. Non-blocking; `on_complete`
    /// fires exactly once, on a transport-managed thread, at an
    /// indeterminate future time.
    pub fn submit(&self, request: HttpRequest, on_complete: Completion) {
        self.transport.submit(request, on_complete);
    }

    /// Fire-and-forget login. A successful response rotates the token to the
    /// returned `hash`; transport failure, a non-2xx status, or an
    /// undecodable body leaves it unchanged. The `Err` case covers only
    /// credential serialization, before anything is submitted.
    pub fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let request = self.build_login(credentials)?;
        let token = self.token.clone();
        self.submit(
            request,
            Box::new(move |response, transport_succeeded| {
                login_complete(&token, response, transport_succeeded);
            }),
        );
        Ok(())
    }

    /// Start routine gated on an authority flag supplied by the host: only
    /// an authoritative instance logs in. Returns whether a login was
    /// submitted.
    pub fn start(&self, has_authority: bool, credentials: &Credentials) -> Result<bool, ApiError> {
        if !has_authority {
            debug!("client lacks authority, skipping login");
            return Ok(false);
        }
        self.login(credentials)?;
        Ok(true)
    }

    fn request_with_route(
        &self,
        method: HttpMethod,
        subroute: &str,
        body: Option<String>,
    ) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{subroute}", self.base_url),
            headers: self.standard_headers(),
            body,
        }
    }

    fn standard_headers(&self) -> Vec<(String, String)> {
        vec![
            ("User-Agent".to_string(), USER_AGENT.to_string()),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accepts".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), self.token.get()),
        ]
    }
}

/// Whether a completed exchange is worth parsing: the transport round trip
/// succeeded, a response is present, and the status is 2xx. HTTP failures
/// are logged with their status code; the attempt is then abandoned.
pub fn response_is_valid(response: Option<&HttpResponse>, transport_succeeded: bool) -> bool {
    if !transport_succeeded {
        return false;
    }
    let Some(response) = response else {
        return false;
    };
    if response.is_success() {
        true
    } else {
        warn!("http response returned error code: {}", response.status);
        false
    }
}

/// Decode a validated login response body.
pub fn parse_login(response: HttpResponse) -> Result<LoginResponse, ApiError> {
    if !response.is_success() {
        return Err(ApiError::HttpStatus {
            status: response.status,
            body: response.body,
        });
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn login_complete(token: &AuthToken, response: Option<HttpResponse>, transport_succeeded: bool) {
    if !response_is_valid(response.as_ref(), transport_succeeded) {
        return;
    }
    let Some(response) = response else {
        return;
    };
    match parse_login(response) {
        Ok(login) => {
            info!("logged in as {} (id {})", login.name, login.id);
            token.set(login.hash);
        }
        Err(err) => warn!("login response could not be decoded: {err}"),
    }
}
