//! Transport seam: asynchronous submission with a one-shot completion.
//!
//! # Design
//! The client never performs I/O itself; it hands fully built requests to a
//! [`Transport`]. The contract is narrow: execution happens off the caller's
//! thread, the completion fires exactly once at an indeterminate future time,
//! and transport-level failure is reported as `(None, false)` with no further
//! detail. There is no cancellation and no client-side timeout; once
//! submitted, a request runs to completion or transport failure.

use log::warn;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// One-shot completion continuation for a submitted request.
///
/// Arguments: the response if one was received, and whether the transport
/// round trip succeeded at all. A response with a non-2xx status still counts
/// as a successful round trip.
pub type Completion = Box<dyn FnOnce(Option<HttpResponse>, bool) + Send + 'static>;

/// Capability to execute an [`HttpRequest`] asynchronously.
pub trait Transport: Send + Sync {
    /// Hand off `request` for execution. Must not block the caller and must
    /// invoke `on_complete` exactly once.
    fn submit(&self, request: HttpRequest, on_complete: Completion);
}

/// Thread-per-request transport backed by ureq.
///
/// Each submission spawns a worker thread that performs the blocking round
/// trip and invokes the completion from that thread. Status-code-as-error
/// behavior is disabled so 4xx/5xx responses come back as data and status
/// interpretation stays with the client.
pub struct ThreadTransport;

impl Transport for ThreadTransport {
    fn submit(&self, request: HttpRequest, on_complete: Completion) {
        std::thread::spawn(move || match execute(request) {
            Ok(response) => on_complete(Some(response), true),
            Err(err) => {
                warn!("http transport failure: {err}");
                on_complete(None, false);
            }
        });
    }
}

fn execute(request: HttpRequest) -> Result<HttpResponse, ureq::Error> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (request.method, request.body) {
        (HttpMethod::Get, _) => {
            let mut builder = agent.get(&request.url);
            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            builder.call()?
        }
        (HttpMethod::Post, body) => {
            let mut builder = agent.post(&request.url);
            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }
            match body {
                Some(body) => builder.send(body.as_bytes())?,
                None => builder.send_empty()?,
            }
        }
    };

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}
