//! In-memory stand-in for the Argus dashboards web service.
//!
//! Sessions are fixed bearer tokens mapped to users; one of them is marked
//! expired so clients can exercise re-authentication paths. Dashboards are
//! kept in id order and scoped to their owner.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const GUEST_TOKEN: &str = "guest-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: u64,
    pub created_by_id: u64,
    pub created_date: i64,
    pub modified_by_id: u64,
    pub modified_date: i64,
    pub name: String,
    pub content: Option<String>,
    pub owner_name: String,
    pub shared: bool,
    pub description: Option<String>,
}

/// Client-settable dashboard fields. Server-assigned fields in the body are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardInput {
    pub name: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub shared: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug)]
pub struct User {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug)]
struct Session {
    user: User,
    expired: bool,
}

#[derive(Default)]
struct Store {
    next_id: u64,
    dashboards: BTreeMap<u64, Dashboard>,
}

#[derive(Clone)]
pub struct AppState {
    sessions: Arc<HashMap<String, Session>>,
    store: Arc<RwLock<Store>>,
}

impl Default for AppState {
    fn default() -> Self {
        let admin = User {
            id: 1,
            name: "admin".to_string(),
        };
        let guest = User {
            id: 2,
            name: "guest".to_string(),
        };
        let sessions = HashMap::from([
            (
                ADMIN_TOKEN.to_string(),
                Session {
                    user: admin.clone(),
                    expired: false,
                },
            ),
            (
                GUEST_TOKEN.to_string(),
                Session {
                    user: guest,
                    expired: false,
                },
            ),
            (
                EXPIRED_TOKEN.to_string(),
                Session {
                    user: admin,
                    expired: true,
                },
            ),
        ]);
        Self {
            sessions: Arc::new(sessions),
            store: Arc::new(RwLock::new(Store::default())),
        }
    }
}

/// Error response in the service's `{"status", "message"}` shape.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn unauthorized(message: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    fn not_found(id: u64) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("Dashboard {id} does not exist"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "status": self.status.as_u16(),
            "message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

pub fn app() -> Router {
    router(AppState::default())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dashboards", get(list_dashboards).post(create_dashboard))
        .route(
            "/dashboards/{id}",
            get(get_dashboard).put(update_dashboard).delete(delete_dashboard),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;
    let session = state
        .sessions
        .get(token)
        .ok_or_else(|| ApiError::unauthorized("Unknown token"))?;
    if session.expired {
        tracing::info!(user = %session.user.name, "rejecting expired token");
        return Err(ApiError::unauthorized("Token expired"));
    }
    Ok(session.user.clone())
}

/// Caller resolved from the bearer token. Runs before any body extractor, so
/// credential failures win over malformed payloads.
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(state, &parts.headers).map(AuthUser)
    }
}

fn validate(input: &DashboardInput) -> Result<(), ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "Dashboard name cannot be empty",
        ));
    }
    Ok(())
}

fn check_owner(dashboard: &Dashboard, user: &User) -> Result<(), ApiError> {
    if dashboard.owner_name != user.name {
        return Err(ApiError::new(
            StatusCode::FORBIDDEN,
            format!("{} is not the owner of dashboard {}", user.name, dashboard.id),
        ));
    }
    Ok(())
}

async fn list_dashboards(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Dashboard>>, ApiError> {
    let store = state.store.read().await;
    let owned = store
        .dashboards
        .values()
        .filter(|d| d.owner_name == user.name)
        .cloned()
        .collect();
    Ok(Json(owned))
}

async fn create_dashboard(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<DashboardInput>,
) -> Result<Json<Dashboard>, ApiError> {
    validate(&input)?;

    let mut store = state.store.write().await;
    if store
        .dashboards
        .values()
        .any(|d| d.owner_name == user.name && d.name == input.name)
    {
        return Err(ApiError::new(
            StatusCode::CONFLICT,
            format!("Dashboard {} already exists for {}", input.name, user.name),
        ));
    }

    store.next_id += 1;
    let now = now_millis();
    let dashboard = Dashboard {
        id: store.next_id,
        created_by_id: user.id,
        created_date: now,
        modified_by_id: user.id,
        modified_date: now,
        name: input.name,
        content: input.content,
        owner_name: user.name,
        shared: input.shared,
        description: input.description,
    };
    store.dashboards.insert(dashboard.id, dashboard.clone());
    Ok(Json(dashboard))
}

async fn get_dashboard(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<u64>,
) -> Result<Json<Dashboard>, ApiError> {
    let store = state.store.read().await;
    let dashboard = store.dashboards.get(&id).ok_or_else(|| ApiError::not_found(id))?;
    if !dashboard.shared {
        check_owner(dashboard, &user)?;
    }
    Ok(Json(dashboard.clone()))
}

async fn update_dashboard(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<u64>,
    Json(input): Json<DashboardInput>,
) -> Result<Json<Dashboard>, ApiError> {
    validate(&input)?;

    let mut store = state.store.write().await;
    let dashboard = store
        .dashboards
        .get_mut(&id)
        .ok_or_else(|| ApiError::not_found(id))?;
    check_owner(dashboard, &user)?;

    let changed = dashboard.name != input.name
        || dashboard.content != input.content
        || dashboard.shared != input.shared
        || dashboard.description != input.description;
    if changed {
        dashboard.name = input.name;
        dashboard.content = input.content;
        dashboard.shared = input.shared;
        dashboard.description = input.description;
        dashboard.modified_by_id = user.id;
        dashboard.modified_date = now_millis();
    }
    Ok(Json(dashboard.clone()))
}

async fn delete_dashboard(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    let dashboard = store.dashboards.get(&id).ok_or_else(|| ApiError::not_found(id))?;
    check_owner(dashboard, &user)?;
    store.dashboards.remove(&id);
    Ok(StatusCode::OK)
}
