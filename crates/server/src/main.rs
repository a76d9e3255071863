// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use civic_report_api::{
    AddCommentRequest, ApiError, CheckPointResponse, CommentResponse, CreateIncidentRequest,
    EditIncidentRequest, IncidentResponse, NotificationResponse, StatusLogEntryResponse,
    TransitionStatusRequest, add_comment, check_point, create_incident, edit_incident,
    get_incident, list_comments, list_incidents, list_notifications, list_status_log,
    mark_notification_read, transition_status,
};
use civic_report_geofence::ServiceArea;
use civic_report_persistence::IncidentStore;

/// Civic Report Server - HTTP server for the Civic Incident Reporting System
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Path to the service-area boundary document (`GeoJSON`).
    #[arg(short, long)]
    boundary: String,

    /// Display name of the service area (used in rejection messages).
    #[arg(short = 'n', long, default_value = "service area")]
    area_name: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The store is wrapped in a Mutex for safe concurrent access; the service
/// area is read-only and loaded once at startup.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for incidents and lifecycle records.
    store: Arc<Mutex<IncidentStore>>,
    /// The service-area boundary, shared by every geofence call site.
    service_area: Arc<ServiceArea>,
}

/// Request body for status transitions (incident id comes from the path).
#[derive(Debug, Clone, Deserialize, Serialize)]
struct TransitionStatusBody {
    /// The target status (one of the nine values).
    new_status: String,
    /// The acting identity.
    actor_id: Option<String>,
    /// The acting identity's role.
    actor_role: Option<String>,
}

/// Request body for incident edits (incident id comes from the path).
#[derive(Debug, Clone, Deserialize, Serialize)]
struct EditIncidentBody {
    /// The acting identity.
    actor_id: Option<String>,
    /// The acting identity's role.
    actor_role: Option<String>,
    /// Replacement description.
    description: Option<String>,
    /// Replacement longitude (requires latitude).
    longitude: Option<f64>,
    /// Replacement latitude (requires longitude).
    latitude: Option<f64>,
    /// Replacement address.
    address: Option<String>,
    /// Replacement media reference list.
    images: Option<Vec<String>>,
    /// Replacement event date.
    event_date: Option<String>,
    /// Replacement day-of-week list.
    days_of_week: Option<Vec<String>>,
    /// Replacement time-of-day bucket.
    time_of_day: Option<String>,
}

/// Request body for adding a comment (incident id comes from the path).
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AddCommentBody {
    /// The comment author.
    author_id: Option<String>,
    /// The comment text.
    body: String,
}

/// Request body for marking a notification read.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct MarkReadBody {
    /// The identity claiming to be the recipient.
    recipient: String,
}

/// Query parameters for listing incidents.
#[derive(Debug, Deserialize)]
struct ListIncidentsQuery {
    /// Optional status filter.
    status: Option<String>,
}

/// Query parameters for listing notifications.
#[derive(Debug, Deserialize)]
struct ListNotificationsQuery {
    /// The recipient identity.
    recipient: String,
}

/// Query parameters for the interactive geofence check.
#[derive(Debug, Deserialize)]
struct CheckPointQuery {
    /// Candidate longitude.
    longitude: f64,
    /// Candidate latitude.
    latitude: f64,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::ValidationError { .. }
            | ApiError::InvalidStatus { .. }
            | ApiError::MissingActor { .. } => StatusCode::BAD_REQUEST,
            ApiError::GeofenceRejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/incidents`.
///
/// Creates a new incident after geofence validation.
async fn handle_create_incident(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateIncidentRequest>,
) -> Result<Json<IncidentResponse>, HttpError> {
    info!(
        category = %req.category,
        longitude = req.longitude,
        latitude = req.latitude,
        "Handling create_incident request"
    );

    let mut store = app_state.store.lock().await;
    let response: IncidentResponse =
        create_incident(&mut store, &app_state.service_area, req)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET `/incidents`.
///
/// Lists incidents, optionally filtered by status.
async fn handle_list_incidents(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListIncidentsQuery>,
) -> Result<Json<Vec<IncidentResponse>>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: Vec<IncidentResponse> = list_incidents(&mut store, query.status.as_deref())?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET `/incidents/{id}`.
async fn handle_get_incident(
    AxumState(app_state): AxumState<AppState>,
    Path(incident_id): Path<String>,
) -> Result<Json<IncidentResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: IncidentResponse = get_incident(&mut store, &incident_id)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST `/incidents/{id}/status`.
///
/// Transitions an incident's lifecycle status.
async fn handle_transition_status(
    AxumState(app_state): AxumState<AppState>,
    Path(incident_id): Path<String>,
    Json(body): Json<TransitionStatusBody>,
) -> Result<Json<IncidentResponse>, HttpError> {
    info!(
        incident_id = %incident_id,
        new_status = %body.new_status,
        "Handling transition_status request"
    );

    let request: TransitionStatusRequest = TransitionStatusRequest {
        incident_id,
        new_status: body.new_status,
        actor_id: body.actor_id,
        actor_role: body.actor_role,
    };

    let mut store = app_state.store.lock().await;
    let response: IncidentResponse = transition_status(&mut store, request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for PUT `/incidents/{id}`.
///
/// Applies owner edits, re-running the geofence check on a changed location.
async fn handle_edit_incident(
    AxumState(app_state): AxumState<AppState>,
    Path(incident_id): Path<String>,
    Json(body): Json<EditIncidentBody>,
) -> Result<Json<IncidentResponse>, HttpError> {
    info!(incident_id = %incident_id, "Handling edit_incident request");

    let request: EditIncidentRequest = EditIncidentRequest {
        incident_id,
        actor_id: body.actor_id,
        actor_role: body.actor_role,
        description: body.description,
        longitude: body.longitude,
        latitude: body.latitude,
        address: body.address,
        images: body.images,
        event_date: body.event_date,
        days_of_week: body.days_of_week,
        time_of_day: body.time_of_day,
    };

    let mut store = app_state.store.lock().await;
    let response: IncidentResponse =
        edit_incident(&mut store, &app_state.service_area, request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET `/incidents/{id}/status_log`.
///
/// Returns the audit trail in append order.
async fn handle_list_status_log(
    AxumState(app_state): AxumState<AppState>,
    Path(incident_id): Path<String>,
) -> Result<Json<Vec<StatusLogEntryResponse>>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: Vec<StatusLogEntryResponse> = list_status_log(&mut store, &incident_id)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST `/incidents/{id}/comments`.
async fn handle_add_comment(
    AxumState(app_state): AxumState<AppState>,
    Path(incident_id): Path<String>,
    Json(body): Json<AddCommentBody>,
) -> Result<Json<CommentResponse>, HttpError> {
    let request: AddCommentRequest = AddCommentRequest {
        incident_id,
        author_id: body.author_id,
        body: body.body,
    };

    let mut store = app_state.store.lock().await;
    let response: CommentResponse = add_comment(&mut store, request)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET `/incidents/{id}/comments`.
async fn handle_list_comments(
    AxumState(app_state): AxumState<AppState>,
    Path(incident_id): Path<String>,
) -> Result<Json<Vec<CommentResponse>>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: Vec<CommentResponse> = list_comments(&mut store, &incident_id)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET `/notifications`.
///
/// Lists the notifications addressed to a recipient.
async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<Json<Vec<NotificationResponse>>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: Vec<NotificationResponse> =
        list_notifications(&mut store, &query.recipient)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for POST `/notifications/{id}/read`.
async fn handle_mark_notification_read(
    AxumState(app_state): AxumState<AppState>,
    Path(notification_id): Path<i64>,
    Json(body): Json<MarkReadBody>,
) -> Result<Json<NotificationResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: NotificationResponse =
        mark_notification_read(&mut store, notification_id, &body.recipient)?;
    drop(store);

    Ok(Json(response))
}

/// Handler for GET `/geofence/check`.
///
/// Interactive pre-submission containment check; shares the boundary
/// implementation with the write path.
async fn handle_check_point(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CheckPointQuery>,
) -> Result<Json<CheckPointResponse>, HttpError> {
    let response: CheckPointResponse =
        check_point(&app_state.service_area, query.longitude, query.latitude)?;
    Ok(Json(response))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/incidents",
            post(handle_create_incident).get(handle_list_incidents),
        )
        .route(
            "/incidents/{id}",
            get(handle_get_incident).put(handle_edit_incident),
        )
        .route("/incidents/{id}/status", post(handle_transition_status))
        .route("/incidents/{id}/status_log", get(handle_list_status_log))
        .route(
            "/incidents/{id}/comments",
            post(handle_add_comment).get(handle_list_comments),
        )
        .route("/notifications", get(handle_list_notifications))
        .route(
            "/notifications/{id}/read",
            post(handle_mark_notification_read),
        )
        .route("/geofence/check", get(handle_check_point))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Civic Report Server");

    // Load the service-area boundary once; every geofence call site shares it
    let service_area: ServiceArea = ServiceArea::load_from_file(&args.area_name, &args.boundary)?;
    info!(boundary = %args.boundary, area = %args.area_name, "Loaded service-area boundary");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let store: IncidentStore = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        IncidentStore::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        IncidentStore::new_in_memory()?
    };

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(store)),
        service_area: Arc::new(service_area),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
