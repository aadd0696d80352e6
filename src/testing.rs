// In-process stand-in for the booking backend, used by unit tests

use crate::api::client::ApiClient;
use crate::core::config::ApiConfig;
use crate::models::user::{Role, User};
use crate::session::store::Session;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub user_id: Option<String>,
    pub user_role: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct StoredBooking {
    id: i64,
    user_id: i64,
    start_time: String,
    end_time: String,
    created_at: String,
}

#[derive(Debug, Clone, Copy)]
enum Failure {
    Json,
    Plain,
}

struct MockState {
    users: Vec<User>,
    bookings: Vec<StoredBooking>,
    next_id: i64,
    requests: Vec<RecordedRequest>,
    failures: HashMap<String, Failure>,
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockBackend {
    pub base_url: String,
    state: Shared,
}

pub fn session_for(id: i64, name: &str, role: Role) -> Session {
    Session::new(User::new(id, name, role))
}

impl MockBackend {
    /// Seeded with Ada (admin, 1), Olive (owner, 2) and Uma (user, 3);
    /// booking 10 belongs to Uma and booking 11 to Olive.
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(MockState {
            users: vec![
                User::new(1, "Ada", Role::Admin),
                User::new(2, "Olive", Role::Owner),
                User::new(3, "Uma", Role::User),
            ],
            bookings: vec![
                StoredBooking {
                    id: 10,
                    user_id: 3,
                    start_time: "2025-06-02T09:00:00".to_string(),
                    end_time: "2025-06-02T10:00:00".to_string(),
                    created_at: "2025-06-01T12:00:00".to_string(),
                },
                StoredBooking {
                    id: 11,
                    user_id: 2,
                    start_time: "2025-06-03T14:00:00".to_string(),
                    end_time: "2025-06-03T15:30:00".to_string(),
                    created_at: "2025-06-01T12:05:00".to_string(),
                },
            ],
            next_id: 100,
            requests: Vec::new(),
            failures: HashMap::new(),
        }));

        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    /// A base URL nothing is listening on
    pub async fn unreachable_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/api", addr)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: self.base_url.clone(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    /// Make `"METHOD /api/path"` answer 500 with a JSON error body
    pub fn fail(&self, route: &str) {
        self.state.lock().unwrap().failures.insert(route.to_string(), Failure::Json);
    }

    /// Make `"METHOD /api/path"` answer 500 with a non-JSON body
    pub fn fail_plain(&self, route: &str) {
        self.state.lock().unwrap().failures.insert(route.to_string(), Failure::Plain);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn booking_count(&self) -> usize {
        self.state.lock().unwrap().bookings.len()
    }

    pub fn user_role(&self, id: i64) -> Option<Role> {
        self.state
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.role)
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn joined(state: &MockState, booking: &StoredBooking) -> Value {
    let user_name = state
        .users
        .iter()
        .find(|u| u.id == booking.user_id)
        .map(|u| u.name.clone());
    json!({
        "id": booking.id,
        "user_id": booking.user_id,
        "user_name": user_name,
        "start_time": booking.start_time,
        "end_time": booking.end_time,
        "created_at": booking.created_at,
    })
}

// The user endpoint answers in camelCase like the real backend does
fn camel(booking: &StoredBooking) -> Value {
    json!({
        "id": booking.id,
        "userId": booking.user_id.to_string(),
        "startTime": booking.start_time,
        "endTime": booking.end_time,
        "createdAt": booking.created_at,
    })
}

async fn handle(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let body: Option<Value> = serde_json::from_slice(&body).ok();
    let caller: Option<i64> = header(&headers, "user-id").and_then(|v| v.parse().ok());

    let mut state = state.lock().unwrap();
    state.requests.push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        user_id: header(&headers, "user-id"),
        user_role: header(&headers, "user-role"),
        authorization: header(&headers, "authorization"),
        body: body.clone(),
    });

    match state.failures.get(&format!("{} {}", method, path)) {
        Some(Failure::Json) => return error(StatusCode::INTERNAL_SERVER_ERROR, "Internal failure"),
        Some(Failure::Plain) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "oops").into_response();
        }
        None => {}
    }

    let segments: Vec<&str> = path.trim_start_matches("/api/").split('/').collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["public" | "admin" | "owner", "users"]) => {
            Json(json!(state.users)).into_response()
        }

        ("POST", ["admin", "users"]) => {
            let body = body.unwrap_or(Value::Null);
            let name = body["name"].as_str().unwrap_or("").trim().to_string();
            if name.is_empty() {
                return error(StatusCode::BAD_REQUEST, "Name is required");
            }
            let role = match body["role"].as_str().map(|r| r.parse::<Role>()) {
                Some(Ok(role)) => role,
                _ => return error(StatusCode::BAD_REQUEST, "Invalid role"),
            };
            let id = state.next_id;
            state.next_id += 1;
            let user = User::new(id, name, role);
            state.users.push(user.clone());
            (StatusCode::CREATED, Json(json!(user))).into_response()
        }

        ("DELETE", ["admin", "users", id]) => {
            let id: i64 = id.parse().unwrap_or(-1);
            if !state.users.iter().any(|u| u.id == id) {
                return error(StatusCode::NOT_FOUND, "User not found");
            }
            state.users.retain(|u| u.id != id);
            state.bookings.retain(|b| b.user_id != id);
            Json(json!({ "message": "User deleted" })).into_response()
        }

        ("PATCH", ["admin", "users", id, "role"]) => {
            let id: i64 = id.parse().unwrap_or(-1);
            let requested = body.as_ref().and_then(|b| b["role"].as_str());
            let role = match requested.map(|r| r.parse::<Role>()) {
                Some(Ok(role)) => role,
                _ => return error(StatusCode::BAD_REQUEST, "Invalid role"),
            };
            match state.users.iter_mut().find(|u| u.id == id) {
                Some(user) => {
                    user.role = role;
                    Json(json!(user)).into_response()
                }
                None => error(StatusCode::NOT_FOUND, "User not found"),
            }
        }

        ("GET", ["admin" | "owner", "bookings"]) => {
            let rows: Vec<Value> = state.bookings.iter().map(|b| joined(&state, b)).collect();
            Json(json!(rows)).into_response()
        }

        ("GET", ["admin" | "owner", "bookingsByUser", id]) => {
            let id: i64 = id.parse().unwrap_or(-1);
            let rows: Vec<Value> = state
                .bookings
                .iter()
                .filter(|b| b.user_id == id)
                .map(|b| joined(&state, b))
                .collect();
            Json(json!(rows)).into_response()
        }

        ("GET", ["user", "bookings"]) => {
            let rows: Vec<Value> = state
                .bookings
                .iter()
                .filter(|b| Some(b.user_id) == caller)
                .map(camel)
                .collect();
            Json(json!(rows)).into_response()
        }

        ("POST", ["owner", "createBookings"] | ["user", "bookings"]) => {
            let body = body.unwrap_or(Value::Null);
            let user_id = body["userId"].as_i64().unwrap_or(-1);
            let id = state.next_id;
            state.next_id += 1;
            let booking = StoredBooking {
                id,
                user_id,
                start_time: body["startTime"].as_str().unwrap_or("").to_string(),
                end_time: body["endTime"].as_str().unwrap_or("").to_string(),
                created_at: "2025-06-05T08:00:00".to_string(),
            };
            let row = joined(&state, &booking);
            state.bookings.push(booking);
            (StatusCode::CREATED, Json(row)).into_response()
        }

        (
            "DELETE",
            ["admin", "deleteBookings", id]
            | ["owner", "deleteBookings", id]
            | ["user", "bookings", id],
        ) => {
            let id: i64 = id.parse().unwrap_or(-1);
            let before = state.bookings.len();
            state.bookings.retain(|b| b.id != id);
            if state.bookings.len() == before {
                return error(StatusCode::NOT_FOUND, "Booking not found");
            }
            Json(json!({ "message": "Booking deleted" })).into_response()
        }

        ("GET", ["owner", "usage-summary"]) => {
            let rows: Vec<Value> = state
                .users
                .iter()
                .filter(|u| u.role != Role::Admin)
                .map(|u| {
                    let total = state.bookings.iter().filter(|b| b.user_id == u.id).count();
                    json!({
                        "user_id": u.id,
                        "user_name": u.name,
                        "total_bookings": total.to_string(),
                    })
                })
                .collect();
            Json(json!(rows)).into_response()
        }

        _ => error(StatusCode::NOT_FOUND, "Route not found"),
    }
}
