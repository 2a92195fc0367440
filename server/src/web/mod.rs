use std::sync::Arc;

use axum::Router;
use axum::http::{StatusCode, Uri};
use axum::response::Json;
use axum::routing::get;
use sea_orm::Database;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use migration::MigratorTrait;

use crate::config::{self, Config};
use crate::task::TaskServiceError;
use crate::task::api::create_api_router;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<sea_orm::DatabaseConnection>,
}

impl AppState {
    /// Maps a task service failure onto an HTTP error response. The error
    /// chain is attached as `stack` only outside production mode.
    pub fn api_error(&self, err: TaskServiceError) -> ApiError {
        let status = match &err {
            TaskServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            TaskServiceError::TaskNotFound(_) => StatusCode::NOT_FOUND,
            TaskServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Task operation failed: {}", err);
        }
        let stack = (!self.config.is_production()).then(|| format!("{err:?}"));
        ApiError::new(status, err.to_string()).with_stack(stack)
    }
}

/// Error response rendered as JSON `{message, stack?}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    stack: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: Option<String>) -> Self {
        self.stack = stack;
        self
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorBody {
                message: self.message,
                stack: self.stack,
            }),
        )
            .into_response()
    }
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: config::Config) -> anyhow::Result<()> {
    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Task API server running on http://{}", server_address);

    let db = Database::connect(&config.db_url).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let state = Arc::new(AppState {
        config: Arc::new(config),
        db: Arc::new(db),
    });

    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

/// Builds the full application router: the JSON API under /api, an info
/// route at the root, and a JSON 404 fallback for everything else.
pub fn create_app(state: Arc<AppState>) -> Router {
    let health_router = Router::new()
        .route("/health", get(health_check_handler))
        .with_state(state.clone());
    let api_routes = health_router.merge(create_api_router(state));

    Router::new()
        .route("/", get(api_info_handler))
        .nest("/api", api_routes)
        .fallback(not_found_handler)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    store_state: &'static str,
    env: String,
}

#[tracing::instrument(skip(state))]
pub async fn health_check_handler(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> Json<HealthResponse> {
    let store_state = match state.db.ping().await {
        Ok(()) => "connected",
        Err(_) => "error",
    };
    Json(HealthResponse {
        status: "ok",
        store_state,
        env: state.config.env.clone(),
    })
}

#[derive(Debug, Serialize)]
struct ApiInfo {
    name: &'static str,
    version: &'static str,
    endpoints: [&'static str; 5],
}

/// Root info route, so '/' answers instead of falling through to the 404.
#[tracing::instrument]
pub async fn api_info_handler() -> Json<ApiInfo> {
    Json(ApiInfo {
        name: "Task Manager API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: [
            "GET /api/health",
            "GET /api/tasks",
            "POST /api/tasks",
            "PUT /api/tasks/{id}",
            "DELETE /api/tasks/{id}",
        ],
    })
}

/// Fallback for requests matching no route.
#[tracing::instrument]
pub async fn not_found_handler(uri: Uri) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, format!("Not Found - {uri}"))
}
