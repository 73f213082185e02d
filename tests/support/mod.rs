#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

/// In-process stand-in for the habits REST API, shared by every test in a
/// test binary. It records each request as `"METHOD /path"`.
pub struct MockApi {
    pub base_url: String,
    state: MockState,
}

#[derive(Clone, Default)]
struct MockState {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    habits: Vec<Value>,
    next_id: u64,
    requests: Vec<String>,
    failures: Vec<(&'static str, StatusCode)>,
}

impl MockApi {
    /// Replaces the stored habits and clears the request log.
    pub fn reset(&self, habits: Vec<Value>) {
        let mut inner = self.state.inner.lock().unwrap();
        inner.next_id = habits
            .iter()
            .filter_map(|habit| habit["id"].as_u64())
            .max()
            .unwrap_or(0)
            + 1;
        inner.habits = habits;
        inner.requests.clear();
        inner.failures.clear();
    }

    /// Makes the next request with `method` answer `status` without touching
    /// the stored habits.
    pub fn fail_next(&self, method: &'static str, status: StatusCode) {
        self.state.inner.lock().unwrap().failures.push((method, status));
    }

    pub fn habits(&self) -> Vec<Value> {
        self.state.inner.lock().unwrap().habits.clone()
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.inner.lock().unwrap().requests.clone()
    }

    pub fn write_requests(&self) -> usize {
        self.requests()
            .iter()
            .filter(|request| !request.starts_with("GET "))
            .count()
    }
}

pub static MOCK_API: Lazy<MockApi> = Lazy::new(spawn_mock_api);

pub fn mock_api() -> &'static MockApi {
    &MOCK_API
}

fn spawn_mock_api() -> MockApi {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock api");
    listener.set_nonblocking(true).expect("nonblocking mock api");
    let port = listener.local_addr().unwrap().port();
    let state = MockState::default();

    let app = Router::new()
        .route("/api/habits", get(list_habits).post(create_habit))
        .route("/api/habits/:id", put(update_habit).delete(delete_habit))
        .with_state(state.clone());

    // Own runtime, so the mock outlives the per-test runtimes of #[tokio::test].
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("mock api runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("mock api listener");
            axum::serve(listener, app).await.expect("mock api server");
        });
    });

    MockApi {
        base_url: format!("http://127.0.0.1:{port}/api/habits"),
        state,
    }
}

/// Logs the request and hands back an injected failure for its method, if any.
fn record(state: &MockState, request: String) -> Option<StatusCode> {
    let mut inner = state.inner.lock().unwrap();
    let method = request.split(' ').next().unwrap_or_default().to_string();
    inner.requests.push(request);
    let position = inner.failures.iter().position(|(m, _)| *m == method)?;
    Some(inner.failures.remove(position).1)
}

async fn list_habits(State(state): State<MockState>) -> Result<Json<Value>, StatusCode> {
    if let Some(status) = record(&state, "GET /api/habits".into()) {
        return Err(status);
    }
    Ok(Json(Value::Array(state.inner.lock().unwrap().habits.clone())))
}

async fn create_habit(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    if let Some(status) = record(&state, "POST /api/habits".into()) {
        return Err(status);
    }
    let mut inner = state.inner.lock().unwrap();
    let id = inner.next_id;
    inner.next_id += 1;
    let habit = json!({
        "id": id,
        "name": body["name"],
        "category": body["category"],
        "habit_time": body["habit_time"],
        "streak": 0,
        "completed": false,
    });
    inner.habits.push(habit.clone());
    Ok((StatusCode::CREATED, Json(habit)))
}

async fn update_habit(
    State(state): State<MockState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if let Some(status) = record(&state, format!("PUT /api/habits/{id}")) {
        return Err(status);
    }
    let completed = body["completed"].as_bool().ok_or(StatusCode::BAD_REQUEST)?;
    let mut inner = state.inner.lock().unwrap();
    let habit = inner
        .habits
        .iter_mut()
        .find(|habit| id_of(habit) == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if completed {
        let streak = habit["streak"].as_u64().unwrap_or(0);
        habit["streak"] = json!(streak + 1);
    }
    habit["completed"] = json!(completed);
    Ok(Json(habit.clone()))
}

async fn delete_habit(State(state): State<MockState>, Path(id): Path<String>) -> StatusCode {
    if let Some(status) = record(&state, format!("DELETE /api/habits/{id}")) {
        return status;
    }
    let mut inner = state.inner.lock().unwrap();
    let before = inner.habits.len();
    inner.habits.retain(|habit| id_of(habit) != id);
    if inner.habits.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

fn id_of(habit: &Value) -> String {
    match &habit["id"] {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

pub fn habit(id: u64, name: &str, category: &str, streak: u64, completed: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "category": category,
        "habit_time": null,
        "streak": streak,
        "completed": completed,
    })
}
