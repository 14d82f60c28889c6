//! Authenticated HTTP client core.
//!
//! # Overview
//! Builds `HttpRequest` values against a fixed base URL, attaches the
//! standard header set including an `Authorization` token, and submits them
//! through a pluggable [`Transport`]. The one stateful flow is `login`: a
//! POST to `user/login` whose successful response rotates the in-memory
//! authorization token carried by every request built afterwards.
//!
//! # Design
//! - `AuthClient` holds the base URL, the token handle, and an injected
//!   transport; request building never touches the network.
//! - Requests and responses are plain data (`HttpRequest` / `HttpResponse`),
//!   so the build and parse steps stay deterministic and unit-testable.
//! - Submission is fire-and-forget: the transport invokes the completion
//!   continuation exactly once, on its own thread, and failures surface only
//!   as an unchanged token plus a log line.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{parse_login, response_is_valid, AuthClient, LOGIN_ROUTE};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Completion, ThreadTransport, Transport};
pub use types::{AuthToken, Credentials, LoginResponse};
