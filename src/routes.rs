use axum::extract::{Path, Query};
use axum::routing::{post, put};
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::editor::EditSession;
use crate::error::AppError;
use crate::models::{Enrollment, Record, Table};
use crate::services::{
    AdminService, DEFAULT_RECENT_LIMIT, EnrollmentRequest, StatKind, StatsReport, StatsService,
    submit_enrollment,
};
use crate::session::AdminSession;
use crate::state::AppState;

#[derive(Deserialize)]
struct TableQuery {
    table: Table,
}

#[derive(Deserialize)]
struct StatsQuery {
    #[serde(rename = "type", default)]
    kind: StatKind,
    #[serde(default = "default_recent_limit")]
    limit: usize,
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

#[derive(Deserialize)]
struct LoginRequest {
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    token: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/courses", get(list_courses))
        .route("/instructors", get(list_instructors))
        .route("/enrollments", post(enroll))
        .route("/admin/records", get(admin_list).post(admin_create))
        .route("/admin/records/{id}", put(admin_update).delete(admin_delete))
        .route("/admin/stats", get(admin_stats))
        .with_state(state)
}

fn admin(state: &AppState) -> AdminService {
    AdminService::new(state.store.clone(), state.lists.clone())
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let token = state.gate.authenticate(&req.password).await?;
    Ok(Json(LoginResponse { token }))
}

async fn logout(session: AdminSession, State(state): State<AppState>) -> StatusCode {
    state.gate.logout(&session.token).await;
    StatusCode::NO_CONTENT
}

async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Record>>, AppError> {
    let rows = admin(&state).refresh(Table::Courses).await?;
    Ok(Json(rows))
}

async fn list_instructors(State(state): State<AppState>) -> Result<Json<Vec<Record>>, AppError> {
    let rows = admin(&state).refresh(Table::Instructors).await?;
    Ok(Json(rows))
}

async fn enroll(
    State(state): State<AppState>,
    Json(req): Json<EnrollmentRequest>,
) -> Result<(StatusCode, Json<Enrollment>), AppError> {
    let enrollment = submit_enrollment(state.store.as_ref(), req).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

async fn admin_list(
    _session: AdminSession,
    State(state): State<AppState>,
    Query(params): Query<TableQuery>,
) -> Result<Json<Vec<Record>>, AppError> {
    let rows = admin(&state).refresh(params.table).await?;
    Ok(Json(rows))
}

async fn admin_create(
    _session: AdminSession,
    State(state): State<AppState>,
    Query(params): Query<TableQuery>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<Record>), AppError> {
    let mut edit = EditSession::for_create(params.table);
    edit.apply(&fields);
    let saved = admin(&state).save(edit).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn admin_update(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<TableQuery>,
    Json(fields): Json<Map<String, Value>>,
) -> Result<Json<Record>, AppError> {
    let service = admin(&state);
    let mut edit = service.edit(params.table, id).await?;
    edit.apply(&fields);
    let saved = service.save(edit).await?;
    Ok(Json(saved))
}

async fn admin_stats(
    _session: AdminSession,
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<StatsReport>, AppError> {
    let report = StatsService::new(state.store.clone())
        .report(params.kind, params.limit)
        .await?;
    Ok(Json(report))
}

async fn admin_delete(
    _session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<TableQuery>,
) -> Result<StatusCode, AppError> {
    admin(&state).delete(params.table, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
