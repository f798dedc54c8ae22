//! Stub of the admin REST backend, served on an ephemeral port.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use admin_types::{CreateUserRequest, LoginRequest, LoginResponse, Role, User};
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const MEMBER_TOKEN: &str = "member-token";
pub const ADMIN_UUID: &str = "0000-admin";
pub const MEMBER_UUID: &str = "0001-member";

#[derive(Clone, Default)]
pub struct Backend {
    users: Arc<Mutex<Vec<User>>>,
    next_id: Arc<AtomicUsize>,
    pub deletes: Arc<AtomicUsize>,
    /// When set, DELETE replies 500 with this message.
    pub fail_deletes: Arc<Mutex<Option<String>>>,
    /// When set, POST /users replies 200 instead of 201 and stores nothing.
    pub create_replies_ok: Arc<AtomicBool>,
}

impl Backend {
    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn fail_deletes_with(&self, message: &str) {
        *self.fail_deletes.lock().unwrap() = Some(message.to_string());
    }

    pub fn reply_ok_on_create(&self) {
        self.create_replies_ok.store(true, Ordering::SeqCst);
    }

    fn caller(&self, headers: &HeaderMap) -> Option<User> {
        let token = headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?;
        let uuid = match token {
            ADMIN_TOKEN => ADMIN_UUID,
            MEMBER_TOKEN => MEMBER_UUID,
            _ => return None,
        };
        self.users().into_iter().find(|user| user.uuid == uuid)
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub backend: Backend,
}

impl TestServer {
    pub async fn start() -> Self {
        let backend = Backend::default();
        backend.users.lock().unwrap().extend([
            User {
                uuid: ADMIN_UUID.into(),
                username: "root".into(),
                role: Role::Admin,
            },
            User {
                uuid: MEMBER_UUID.into(),
                username: "bob".into(),
                role: Role::User,
            },
        ]);

        let app = Router::new()
            .route("/api/login", post(login))
            .route("/api/users/me", get(me))
            .route("/api/users", get(list).post(create))
            .route("/api/users/:uuid", delete(remove))
            .with_state(backend.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, backend }
    }

    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

async fn login(Json(body): Json<LoginRequest>) -> Response {
    let reply = match (body.username.as_str(), body.password.as_str()) {
        ("root", "secret") => (ADMIN_TOKEN, Role::Admin),
        ("bob", "hunter2") => (MEMBER_TOKEN, Role::User),
        _ => return error(StatusCode::UNAUTHORIZED, "invalid credentials"),
    };
    Json(LoginResponse {
        token: reply.0.into(),
        role: reply.1,
    })
    .into_response()
}

async fn me(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    match backend.caller(&headers) {
        Some(user) => Json(user).into_response(),
        None => error(StatusCode::UNAUTHORIZED, "invalid token"),
    }
}

async fn list(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    match backend.caller(&headers) {
        Some(user) if user.role == Role::Admin => Json(backend.users()).into_response(),
        Some(_) => error(StatusCode::FORBIDDEN, "admin only"),
        None => error(StatusCode::UNAUTHORIZED, "invalid token"),
    }
}

async fn create(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<CreateUserRequest>,
) -> Response {
    if backend.caller(&headers).map(|u| u.role) != Some(Role::Admin) {
        return error(StatusCode::UNAUTHORIZED, "invalid token");
    }
    if body.username.is_empty() {
        return error(StatusCode::BAD_REQUEST, "username is required");
    }
    let mut users = backend.users.lock().unwrap();
    if users.iter().any(|u| u.username == body.username) {
        return error(StatusCode::CONFLICT, "username already exists");
    }
    let id = backend.next_id.fetch_add(1, Ordering::SeqCst);
    let user = User {
        uuid: format!("1000-{id}"),
        username: body.username,
        role: body.role,
    };
    if backend.create_replies_ok.load(Ordering::SeqCst) {
        return (StatusCode::OK, Json(user)).into_response();
    }
    users.push(user.clone());
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn remove(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(uuid): Path<String>,
) -> Response {
    backend.deletes.fetch_add(1, Ordering::SeqCst);
    if backend.caller(&headers).map(|u| u.role) != Some(Role::Admin) {
        return error(StatusCode::UNAUTHORIZED, "invalid token");
    }
    if let Some(message) = backend.fail_deletes.lock().unwrap().clone() {
        return error(StatusCode::INTERNAL_SERVER_ERROR, &message);
    }
    let mut users = backend.users.lock().unwrap();
    let before = users.len();
    users.retain(|u| u.uuid != uuid);
    if users.len() == before {
        return error(StatusCode::NOT_FOUND, "user not found");
    }
    StatusCode::NO_CONTENT.into_response()
}
