use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// A known account the server accepts logins for.
#[derive(Clone, Debug)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of a successful login: `hash` is the session token the client must
/// present on the `Authorization` header afterwards.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginReply {
    pub id: i64,
    pub name: String,
    pub hash: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub email: String,
}

struct AppState {
    accounts: Vec<Account>,
    sessions: RwLock<HashMap<String, i64>>,
}

type SharedState = Arc<AppState>;

/// Accounts the default `app()` is seeded with.
pub fn default_accounts() -> Vec<Account> {
    vec![
        Account {
            id: 7,
            name: "Ann".to_string(),
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
        },
        Account {
            id: 12,
            name: "Ben".to_string(),
            email: "ben@example.com".to_string(),
            password: "hunter2".to_string(),
        },
    ]
}

pub fn app() -> Router {
    app_with_accounts(default_accounts())
}

pub fn app_with_accounts(accounts: Vec<Account>) -> Router {
    let state: SharedState = Arc::new(AppState {
        accounts,
        sessions: RwLock::new(HashMap::new()),
    });
    Router::new()
        .route("/api/user/login", post(login))
        .route("/api/user/me", get(me))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn login(
    State(state): State<SharedState>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<LoginReply>, StatusCode> {
    let account = state
        .accounts
        .iter()
        .find(|a| a.email == input.email && a.password == input.password)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let hash = Uuid::new_v4().simple().to_string();
    state.sessions.write().await.insert(hash.clone(), account.id);

    Ok(Json(LoginReply {
        id: account.id,
        name: account.name.clone(),
        hash,
    }))
}

async fn me(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Profile>, StatusCode> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let sessions = state.sessions.read().await;
    let id = sessions.get(token).ok_or(StatusCode::UNAUTHORIZED)?;
    let account = state
        .accounts
        .iter()
        .find(|a| a.id == *id)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    Ok(Json(Profile {
        id: account.id,
        name: account.name.clone(),
        email: account.email.clone(),
    }))
}
