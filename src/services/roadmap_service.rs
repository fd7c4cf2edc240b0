use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::repository;
use crate::error::AppError;
use crate::gemini::TextGenerator;
use crate::models::{GenerateRequest, GenerateResponse, RoadmapDocument, RoadmapSummary, StoredRoadmap};
use crate::prompt;
use crate::roadmap;

/// Generation-and-persistence pipeline.
///
/// prompt → model call → parse → validate → persist. Persistence is awaited,
/// so a successful return means every row is committed.
pub struct RoadmapService {
    db: SqlitePool,
    generator: Arc<dyn TextGenerator>,
}

impl RoadmapService {
    pub fn new(db: SqlitePool, generator: Arc<dyn TextGenerator>) -> Self {
        Self { db, generator }
    }

    pub async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse, AppError> {
        info!(
            course = %req.course,
            duration = %req.learning_duration,
            start_date = %req.start_date,
            "Generating roadmap"
        );

        let prompt = prompt::build_prompt(req);
        let schema = prompt::response_schema();
        let output = self.generator.generate(&prompt, Some(&schema)).await?;

        let document = roadmap::parse_roadmap(&output)?;
        if document.start_date != req.start_date {
            warn!(
                requested = %req.start_date,
                generated = %document.start_date,
                "Generated roadmap starts on a different date"
            );
        }
        let validated = document.validate().map_err(AppError::RejectedOutput)?;

        let summary = repository::persist_roadmap(&self.db, &validated).await?;
        info!(
            course_id = %summary.course_id,
            days = summary.day_ids.len(),
            "Roadmap generated and saved"
        );

        Ok(GenerateResponse {
            output,
            course_id: Some(summary.course_id),
        })
    }

    /// Persist a roadmap supplied by the caller, without calling the model.
    pub async fn create(&self, document: RoadmapDocument) -> Result<RoadmapSummary, AppError> {
        let validated = document.validate()?;
        let summary = repository::persist_roadmap(&self.db, &validated).await?;
        info!(course_id = %summary.course_id, "Roadmap created");
        Ok(summary)
    }

    pub async fn fetch(&self, course_id: &str) -> Result<StoredRoadmap, AppError> {
        repository::fetch_roadmap(&self.db, course_id)
            .await?
            .ok_or(AppError::NotFound)
    }
}
