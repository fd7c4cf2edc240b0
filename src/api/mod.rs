use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::models::*;
use crate::services::RoadmapService;
use crate::state::AppState;

#[derive(Serialize)]
struct ProbeResponse {
    message: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate", post(generate).get(generate_probe))
        .route(
            "/api/createRoadmap",
            post(create_roadmap).fallback(method_not_allowed),
        )
        .route("/api/roadmaps/{id}", get(fetch_roadmap))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn service(state: &AppState) -> RoadmapService {
    RoadmapService::new(state.db.clone(), state.generator.clone())
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn generate_probe() -> Json<ProbeResponse> {
    Json(ProbeResponse { message: "generate" })
}

async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let response = service(&state).generate(&req).await?;
    Ok(Json(response))
}

async fn create_roadmap(
    State(state): State<AppState>,
    payload: Result<Json<RoadmapDocument>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateRoadmapResponse>), AppError> {
    let Json(document) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let summary = service(&state).create(document).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateRoadmapResponse {
            message: "Roadmap created successfully".to_string(),
            course_id: summary.course_id,
        }),
    ))
}

async fn fetch_roadmap(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredRoadmap>, AppError> {
    let roadmap = service(&state).fetch(&id).await?;
    Ok(Json(roadmap))
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
