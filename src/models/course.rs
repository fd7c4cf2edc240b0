use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub prerequisites: String,
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoadmapDay {
    pub id: String,
    pub course_id: String,
    pub day: i64,
    pub topic: String,
    pub date: NaiveDate,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Video {
    pub id: String,
    pub roadmap_day_id: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Doc {
    pub id: String,
    pub roadmap_day_id: String,
    pub position: i64,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub roadmap_day_id: String,
    pub position: i64,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

// options is stored as a JSON array in a TEXT column
impl<'r> FromRow<'r, SqliteRow> for Quiz {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let options: String = row.try_get("options")?;
        let options = serde_json::from_str(&options).map_err(|e| sqlx::Error::ColumnDecode {
            index: "options".to_string(),
            source: Box::new(e),
        })?;

        Ok(Quiz {
            id: row.try_get("id")?,
            roadmap_day_id: row.try_get("roadmap_day_id")?,
            position: row.try_get("position")?,
            question: row.try_get("question")?,
            options,
            answer: row.try_get("answer")?,
        })
    }
}

/// One day of a stored roadmap with its children attached.
#[derive(Debug, Clone, Serialize)]
pub struct StoredDay {
    #[serde(flatten)]
    pub day: RoadmapDay,
    pub video: Option<Video>,
    pub docs: Vec<Doc>,
    pub quiz: Vec<Quiz>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredRoadmap {
    pub course: Course,
    pub days: Vec<StoredDay>,
}

/// Identifiers and row counts produced by one persisted roadmap.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RoadmapSummary {
    pub course_id: String,
    pub day_ids: Vec<String>,
    pub videos: usize,
    pub docs: usize,
    pub quizzes: usize,
}
