//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::aggregator::AggregateError;
use crate::domain::StationQuery;
use crate::tasks::TaskError;
use crate::transport::TransportError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/connection", get(resolve_connection))
        .route("/api/connection/current", get(current_connection))
        .route("/api/connection/current/furthest", get(furthest_station))
        .route("/api/stations/search", get(search_stations))
        .route("/api/tasks", get(list_tasks).post(add_task))
        .route("/api/tasks/:index/toggle", post(toggle_task))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Resolve a departure station and publish the connection.
///
/// A blank station name is not an error: nothing happens.
async fn resolve_connection(
    State(state): State<AppState>,
    Query(req): Query<ConnectionRequest>,
) -> Result<Response, AppError> {
    let Some(query) = StationQuery::parse(&req.station) else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let connection = state.aggregator.resolve_connection(&query).await?;
    Ok(Json(ConnectionResponse::from_connection(&connection)).into_response())
}

/// The most recently published connection.
async fn current_connection(
    State(state): State<AppState>,
) -> Result<Json<ConnectionResponse>, AppError> {
    let connection = state.aggregator.slot().current().await.ok_or_else(no_connection)?;
    Ok(Json(ConnectionResponse::from_connection(&connection)))
}

/// The station of the current connection furthest from its departure.
async fn furthest_station(
    State(state): State<AppState>,
) -> Result<Json<StationResult>, AppError> {
    let connection = state.aggregator.slot().current().await.ok_or_else(no_connection)?;
    Ok(Json(StationResult::from_station(connection.furthest_station())))
}

fn no_connection() -> AppError {
    AppError::NotFound {
        message: "No connection has been resolved yet".to_string(),
    }
}

/// Station name autocomplete.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Result<Json<StationSearchResponse>, AppError> {
    let stations = state.aggregator.provider().search_stations(req.q.trim()).await?;
    Ok(Json(StationSearchResponse { stations }))
}

async fn list_tasks(State(state): State<AppState>) -> Json<TasksResponse> {
    let tasks = state.tasks.lock().await;
    Json(TasksResponse::from_tasks(tasks.tasks()))
}

async fn add_task(
    State(state): State<AppState>,
    Json(req): Json<AddTaskRequest>,
) -> Result<(StatusCode, Json<TaskResult>), AppError> {
    let mut tasks = state.tasks.lock().await;
    let index = tasks.tasks().len();
    let task = tasks.add(&req.title, &req.description, &req.due_date)?;
    Ok((StatusCode::CREATED, Json(TaskResult::from_task(index, task))))
}

async fn toggle_task(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<TaskResult>, AppError> {
    let mut tasks = state.tasks.lock().await;
    let task = tasks.toggle(index)?;
    Ok(Json(TaskResult::from_task(index, task)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<AggregateError> for AppError {
    fn from(e: AggregateError) -> Self {
        match e {
            AggregateError::StationNotFound { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            AggregateError::NoScheduleData { .. } => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl From<TransportError> for AppError {
    fn from(e: TransportError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl From<TaskError> for AppError {
    fn from(e: TaskError) -> Self {
        match e {
            TaskError::Invalid(_) | TaskError::InvalidDueDate(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            TaskError::NoSuchTask(_) => AppError::NotFound {
                message: e.to_string(),
            },
            TaskError::Corrupt { .. } | TaskError::Io(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
