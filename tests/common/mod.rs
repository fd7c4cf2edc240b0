#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use roadmap_backend::api::router;
use roadmap_backend::error::AppError;
use roadmap_backend::gemini::TextGenerator;
use roadmap_backend::state::AppState;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

/// Generator that replays a fixed answer and records every call.
pub struct ScriptedGenerator {
    answer: Result<String, String>,
    pub calls: Mutex<Vec<(String, Option<Value>)>>,
}

impl ScriptedGenerator {
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(text.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(reason: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            answer: Err(reason.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(prompt, _)| prompt.clone())
            .collect()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, schema: Option<&Value>) -> Result<String, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), schema.cloned()));
        self.answer.clone().map_err(AppError::Generation)
    }
}

pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test db");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn build_test_app(pool: SqlitePool, generator: Arc<dyn TextGenerator>) -> Router {
    router(AppState { db: pool, generator })
}

pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

/// A well-formed roadmap of `days` days starting on `start_date`, one video,
/// two docs and one quiz per day.
pub fn sample_roadmap(course: &str, start_date: &str, days: u32) -> Value {
    let roadmap: Vec<Value> = (1..=days)
        .map(|day| {
            json!({
                "day": day,
                "topic": format!("{} topic {}", course, day),
                "video": {
                    "title": format!("{} lesson {}", course, day),
                    "url": format!("https://www.youtube.com/watch?v={}", day)
                },
                "docs": [
                    format!("https://docs.example.com/{}/a", day),
                    format!("https://docs.example.com/{}/b", day)
                ],
                "quiz": [{
                    "question": format!("Question for day {}?", day),
                    "options": ["yes", "no", "maybe"],
                    "answer": "yes"
                }],
                "startTime": "18:00",
                "endTime": "20:00"
            })
        })
        .collect();

    json!({
        "title": format!("{} in {} days", course, days),
        "prerequisites": "Basic programming",
        "start_date": start_date,
        "roadmap": roadmap
    })
}
