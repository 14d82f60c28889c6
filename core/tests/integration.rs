//! Login round trip against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the client over real
//! HTTP through `ThreadTransport`. Validates that a successful login rotates
//! the token, that the rotated token authenticates a follow-up request, and
//! that a rejected login leaves the token at its placeholder.

use std::net::SocketAddr;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use auth_core::{AuthClient, Credentials, HttpResponse, ThreadTransport};

/// Start the mock server on a random port and return its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn client_for(addr: SocketAddr) -> AuthClient {
    AuthClient::new(
        format!("http://{addr}/api/"),
        "placeholder",
        Arc::new(ThreadTransport),
    )
}

/// Poll the client's token until it differs from `initial` or the deadline
/// passes. Login completion runs on a transport thread, so the observable
/// effect is the token changing.
fn wait_for_token(client: &AuthClient, initial: &str, timeout: Duration) -> Option<String> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        let token = client.token();
        if token != initial {
            return Some(token);
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    None
}

#[test]
fn login_rotates_token_and_authenticates_follow_up_request() {
    let addr = start_server();
    let client = client_for(addr);

    // Step 1: login with seeded credentials.
    client
        .login(&Credentials {
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
        })
        .unwrap();
    let token = wait_for_token(&client, "placeholder", Duration::from_secs(5))
        .expect("token should rotate after successful login");
    assert!(!token.is_empty());

    // Step 2: the next build snapshots the rotated token.
    let request = client.build_get("user/me");
    assert_eq!(request.header("Authorization"), Some(token.as_str()));

    // Step 3: the server accepts the rotated token.
    let (tx, rx) = mpsc::channel::<(Option<HttpResponse>, bool)>();
    client.submit(
        request,
        Box::new(move |response, transport_succeeded| {
            let _ = tx.send((response, transport_succeeded));
        }),
    );
    let (response, transport_succeeded) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(transport_succeeded);
    let response = response.expect("successful round trip carries a response");
    assert_eq!(response.status, 200);
    let profile: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(profile["id"], 7);
    assert_eq!(profile["name"], "Ann");
    assert_eq!(profile["email"], "a@b.com");
}

#[test]
fn rejected_login_leaves_token_at_placeholder() {
    let addr = start_server();
    let client = client_for(addr);

    client
        .login(&Credentials {
            email: "a@b.com".to_string(),
            password: "wrong".to_string(),
        })
        .unwrap();

    // The 401 completion never writes the token; give the exchange ample
    // time and assert the token stayed put throughout.
    assert_eq!(
        wait_for_token(&client, "placeholder", Duration::from_millis(500)),
        None
    );
    assert_eq!(client.token(), "placeholder");
}

#[test]
fn unreachable_server_leaves_token_at_placeholder() {
    // Bind and drop a listener so the port is very likely closed.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = client_for(addr);

    client
        .login(&Credentials {
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
        })
        .unwrap();

    assert_eq!(
        wait_for_token(&client, "placeholder", Duration::from_millis(500)),
        None
    );
    assert_eq!(client.token(), "placeholder");
}
