use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`. Every field is passed to the prompt verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub course: String,
    pub start_date: String,
    pub learning_duration: String,
    pub daily_hours_weekdays: String,
    pub daily_hours_weekends: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Raw text returned by the model.
    pub output: String,
    #[serde(default)]
    pub course_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoadmapResponse {
    pub message: String,
    pub course_id: String,
}

/// Roadmap as produced by the model, and as accepted by `POST /api/createRoadmap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapDocument {
    pub title: String,
    pub prerequisites: String,
    pub start_date: String,
    pub roadmap: Vec<RoadmapEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapEntry {
    pub day: i64,
    pub topic: String,
    pub video: Option<VideoEntry>,
    pub docs: Vec<String>,
    pub quiz: Vec<QuizEntry>,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEntry {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizEntry {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}
