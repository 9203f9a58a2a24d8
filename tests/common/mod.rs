//! Shared test helpers: a mock GitHub API server.
//!
//! Serves /user and /user/repos the way api.github.com does, from canned
//! data. Requests without the expected token get GitHub's 401 body.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const TEST_TOKEN: &str = "ghp_testtoken";
pub const TEST_LOGIN: &str = "octocat";

/// Mock GitHub API server builder
pub struct MockGithub {
    repos: Vec<Value>,
    fail_create: Option<(u16, String)>,
    broken_user: bool,
    user_delay: Option<Duration>,
}

struct MockState {
    repos: Vec<Value>,
    fail_create: Option<(u16, String)>,
    broken_user: bool,
    user_delay: Option<Duration>,
    requests: AtomicUsize,
}

impl MockGithub {
    pub fn new() -> Self {
        Self {
            repos: vec![
                json!({
                    "id": 1,
                    "name": "demo",
                    "full_name": "octocat/demo",
                    "private": false,
                    "html_url": "https://github.com/octocat/demo",
                    "description": "A demo repository",
                    "clone_url": "https://github.com/octocat/demo.git",
                    "updated_at": "2024-01-15T10:00:00Z"
                }),
                json!({
                    "id": 2,
                    "name": "tools",
                    "full_name": "octocat/tools",
                    "private": true,
                    "html_url": "https://github.com/octocat/tools",
                    "description": null,
                    "clone_url": "https://github.com/octocat/tools.git",
                    "updated_at": "2024-02-20T12:30:00Z"
                }),
            ],
            fail_create: None,
            broken_user: false,
            user_delay: None,
        }
    }

    /// Make POST /user/repos fail with the given status and message
    pub fn with_create_failure(mut self, status: u16, message: &str) -> Self {
        self.fail_create = Some((status, message.to_string()));
        self
    }

    /// Make GET /user return a 200 with a non-JSON body
    pub fn with_broken_user(mut self) -> Self {
        self.broken_user = true;
        self
    }

    /// Delay GET /user responses
    pub fn with_user_delay(mut self, delay: Duration) -> Self {
        self.user_delay = Some(delay);
        self
    }

    /// Start the mock server and return its address and handle
    pub async fn start(self) -> (SocketAddr, MockGithubHandle) {
        let state = Arc::new(MockState {
            repos: self.repos,
            fail_create: self.fail_create,
            broken_user: self.broken_user,
            user_delay: self.user_delay,
            requests: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/user", get(get_user))
            .route("/user/repos", get(list_repos).post(create_repo))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (
            addr,
            MockGithubHandle {
                state,
                _handle: handle,
            },
        )
    }
}

pub struct MockGithubHandle {
    state: Arc<MockState>,
    _handle: JoinHandle<()>,
}

impl MockGithubHandle {
    /// Number of requests the mock has received
    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }
}

/// The REST backend sends `token <t>`, octocrab sends `Bearer <t>`
fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.ends_with(TEST_TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "message": "Bad credentials",
            "documentation_url": "https://docs.github.com/rest"
        })),
    )
        .into_response()
}

async fn get_user(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);

    if let Some(delay) = state.user_delay {
        tokio::time::sleep(delay).await;
    }
    if !authorized(&headers) {
        return unauthorized();
    }
    if state.broken_user {
        return "this is not json".into_response();
    }

    Json(json!({ "login": TEST_LOGIN, "id": 583231 })).into_response()
}

async fn list_repos(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return unauthorized();
    }

    Json(state.repos.clone()).into_response()
}

async fn create_repo(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return unauthorized();
    }
    if let Some((status, message)) = &state.fail_create {
        let status = StatusCode::from_u16(*status).unwrap();
        return (status, Json(json!({ "message": message }))).into_response();
    }

    let name = body["name"].as_str().unwrap_or_default().to_string();
    let description = body["description"].as_str().unwrap_or_default().to_string();
    let private = body["private"].as_bool().unwrap_or(false);

    (
        StatusCode::CREATED,
        Json(json!({
            "id": 99,
            "name": name,
            "full_name": format!("{}/{}", TEST_LOGIN, name),
            "private": private,
            "html_url": format!("https://github.com/{}/{}", TEST_LOGIN, name),
            "description": description,
            "clone_url": format!("https://github.com/{}/{}.git", TEST_LOGIN, name),
            "updated_at": "2024-06-01T00:00:00Z"
        })),
    )
        .into_response()
}

/// Bridge config pointed at the mock server
pub fn config_for(addr: SocketAddr) -> github_mcp::Config {
    let mut config = github_mcp::Config::default();
    config.github_api_url = format!("http://{}", addr);
    config.github_token = Some(TEST_TOKEN.to_string());
    config.timeout_secs = 5;
    config
}
