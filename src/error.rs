use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::roadmap::RoadmapError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Malformed roadmap: {0}")]
    MalformedRoadmap(#[from] serde_json::Error),

    #[error("Invalid roadmap: {0}")]
    InvalidRoadmap(#[from] RoadmapError),

    /// The model answered with JSON that does not describe a usable roadmap.
    #[error("Generated roadmap rejected: {0}")]
    RejectedOutput(RoadmapError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method Not Allowed".to_string(),
            ),
            AppError::InvalidRoadmap(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            AppError::Generation(detail) => {
                error!("error generating content: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error generating content".to_string(),
                )
            }
            AppError::MalformedRoadmap(e) => {
                error!("generated roadmap is not valid JSON: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Generated roadmap was not valid JSON".to_string(),
                )
            }
            AppError::RejectedOutput(e) => {
                error!("generated roadmap failed validation: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Generated roadmap failed validation".to_string(),
                )
            }
            AppError::Database(e) => {
                error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to create roadmap".to_string(),
                )
            }
            AppError::Config(msg) => {
                error!("configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
