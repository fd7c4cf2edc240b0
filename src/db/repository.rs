use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{Course, Doc, Quiz, RoadmapDay, RoadmapSummary, StoredDay, StoredRoadmap, Video};
use crate::roadmap::ValidatedRoadmap;

/// Insert a course and its whole roadmap in one transaction.
///
/// Either every row is committed or none is.
pub async fn persist_roadmap(
    db: &SqlitePool,
    roadmap: &ValidatedRoadmap,
) -> Result<RoadmapSummary, sqlx::Error> {
    let mut tx = db.begin().await?;

    let course_id = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO courses (id, title, prerequisites, start_date, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&course_id)
    .bind(&roadmap.title)
    .bind(&roadmap.prerequisites)
    .bind(roadmap.start_date)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    let mut summary = RoadmapSummary {
        course_id: course_id.clone(),
        day_ids: Vec::with_capacity(roadmap.days.len()),
        videos: 0,
        docs: 0,
        quizzes: 0,
    };

    for day in &roadmap.days {
        let day_id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO roadmap_days (id, course_id, day, topic, date, start_time, end_time)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&day_id)
        .bind(&course_id)
        .bind(i64::from(day.day))
        .bind(&day.topic)
        .bind(day.date)
        .bind(day.start_time)
        .bind(day.end_time)
        .execute(&mut *tx)
        .await?;

        if let Some(video) = &day.video {
            sqlx::query("INSERT INTO videos (id, roadmap_day_id, title, url) VALUES (?1, ?2, ?3, ?4)")
                .bind(Uuid::new_v4().to_string())
                .bind(&day_id)
                .bind(&video.title)
                .bind(&video.url)
                .execute(&mut *tx)
                .await?;
            summary.videos += 1;
        }

        for (position, url) in day.docs.iter().enumerate() {
            sqlx::query("INSERT INTO docs (id, roadmap_day_id, position, url) VALUES (?1, ?2, ?3, ?4)")
                .bind(Uuid::new_v4().to_string())
                .bind(&day_id)
                .bind(position as i64)
                .bind(url)
                .execute(&mut *tx)
                .await?;
            summary.docs += 1;
        }

        for (position, quiz) in day.quiz.iter().enumerate() {
            let options = serde_json::to_string(&quiz.options)
                .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

            sqlx::query(
                r#"
                INSERT INTO quizzes (id, roadmap_day_id, position, question, options, answer)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&day_id)
            .bind(position as i64)
            .bind(&quiz.question)
            .bind(options)
            .bind(&quiz.answer)
            .execute(&mut *tx)
            .await?;
            summary.quizzes += 1;
        }

        summary.day_ids.push(day_id);
    }

    tx.commit().await?;

    tracing::debug!(
        course_id = %summary.course_id,
        days = summary.day_ids.len(),
        videos = summary.videos,
        docs = summary.docs,
        quizzes = summary.quizzes,
        "Roadmap persisted"
    );

    Ok(summary)
}

pub async fn find_course_by_id(db: &SqlitePool, id: &str) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, prerequisites, start_date, created_at FROM courses WHERE id = ?"
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn fetch_roadmap(db: &SqlitePool, course_id: &str) -> Result<Option<StoredRoadmap>, sqlx::Error> {
    let Some(course) = find_course_by_id(db, course_id).await? else {
        return Ok(None);
    };

    let roadmap_days = sqlx::query_as::<_, RoadmapDay>(
        "SELECT id, course_id, day, topic, date, start_time, end_time FROM roadmap_days WHERE course_id = ? ORDER BY day"
    )
    .bind(course_id)
    .fetch_all(db)
    .await?;

    let mut days = Vec::with_capacity(roadmap_days.len());
    for day in roadmap_days {
        let video = sqlx::query_as::<_, Video>(
            "SELECT id, roadmap_day_id, title, url FROM videos WHERE roadmap_day_id = ?"
        )
        .bind(&day.id)
        .fetch_optional(db)
        .await?;

        let docs = sqlx::query_as::<_, Doc>(
            "SELECT id, roadmap_day_id, position, url FROM docs WHERE roadmap_day_id = ? ORDER BY position"
        )
        .bind(&day.id)
        .fetch_all(db)
        .await?;

        let quiz = sqlx::query_as::<_, Quiz>(
            "SELECT id, roadmap_day_id, position, question, options, answer FROM quizzes WHERE roadmap_day_id = ? ORDER BY position"
        )
        .bind(&day.id)
        .fetch_all(db)
        .await?;

        days.push(StoredDay { day, video, docs, quiz });
    }

    Ok(Some(StoredRoadmap { course, days }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::models::RoadmapDocument;

    async fn setup_test_db() -> SqlitePool {
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

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
            .expect("Failed to count rows")
    }

    fn go_roadmap() -> ValidatedRoadmap {
        let doc: RoadmapDocument = serde_json::from_value(serde_json::json!({
            "title": "Go in 3 days",
            "prerequisites": "Basic programming",
            "start_date": "2024-01-01",
            "roadmap": [
                {
                    "day": 1,
                    "topic": "Syntax",
                    "video": { "title": "Go basics", "url": "https://youtu.be/1" },
                    "docs": ["https://go.dev/tour", "https://go.dev/doc", "https://go.dev/tour"],
                    "quiz": [
                        { "question": "Declare a function?", "options": ["func", "fn"], "answer": "func" }
                    ],
                    "startTime": "2024-01-01T18:00:00",
                    "endTime": "2024-01-01T20:00:00"
                },
                {
                    "day": 2,
                    "topic": "Goroutines",
                    "video": { "title": "Concurrency", "url": "https://youtu.be/2" },
                    "docs": [],
                    "quiz": [
                        { "question": "Start a goroutine?", "options": ["go f()", "spawn f()"], "answer": "go f()" },
                        { "question": "Channel op?", "options": ["<-", "->", "=>"], "answer": "<-" }
                    ],
                    "startTime": "18:00",
                    "endTime": "20:00"
                },
                {
                    "day": 3,
                    "topic": "Modules",
                    "video": { "title": "go mod", "url": "https://youtu.be/3" },
                    "docs": ["https://go.dev/ref/mod"],
                    "quiz": [],
                    "startTime": "10:00",
                    "endTime": "14:00"
                }
            ]
        }))
        .expect("sample roadmap should deserialize");

        doc.validate().expect("sample roadmap should be valid")
    }

    #[tokio::test]
    async fn test_persist_creates_expected_row_counts() {
        let pool = setup_test_db().await;

        let summary = persist_roadmap(&pool, &go_roadmap())
            .await
            .expect("Failed to persist roadmap");

        assert_eq!(summary.day_ids.len(), 3);
        assert_eq!(summary.videos, 3);
        assert_eq!(summary.docs, 4);
        assert_eq!(summary.quizzes, 3);

        assert_eq!(count(&pool, "courses").await, 1);
        assert_eq!(count(&pool, "roadmap_days").await, 3);
        assert_eq!(count(&pool, "videos").await, 3);
        assert_eq!(count(&pool, "docs").await, 4);
        assert_eq!(count(&pool, "quizzes").await, 3);
    }

    #[tokio::test]
    async fn test_fetch_roadmap_returns_nested_children_in_order() {
        let pool = setup_test_db().await;
        let summary = persist_roadmap(&pool, &go_roadmap())
            .await
            .expect("Failed to persist roadmap");

        let stored = fetch_roadmap(&pool, &summary.course_id)
            .await
            .expect("Failed to fetch roadmap")
            .expect("Roadmap not found");

        assert_eq!(stored.course.title, "Go in 3 days");
        assert_eq!(stored.course.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(stored.days.len(), 3);

        let first = &stored.days[0];
        assert_eq!(first.day.day, 1);
        assert_eq!(first.day.date, stored.course.start_date);
        assert_eq!(first.video.as_ref().map(|v| v.url.as_str()), Some("https://youtu.be/1"));
        let urls: Vec<&str> = first.docs.iter().map(|d| d.url.as_str()).collect();
        assert_eq!(urls, vec!["https://go.dev/tour", "https://go.dev/doc", "https://go.dev/tour"]);

        let second = &stored.days[1];
        assert_eq!(second.quiz.len(), 2);
        assert_eq!(second.quiz[1].options, vec!["<-", "->", "=>"]);
        assert_eq!(
            second.day.start_time,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(18, 0, 0).unwrap()
        );

        let last = &stored.days[2];
        assert_eq!(last.day.date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[tokio::test]
    async fn test_fetch_unknown_course_returns_none() {
        let pool = setup_test_db().await;
        let stored = fetch_roadmap(&pool, "missing").await.expect("query should succeed");
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_failed_insert_rolls_back_whole_course() {
        let pool = setup_test_db().await;

        // duplicate day index trips UNIQUE(course_id, day) after the course row is written
        let mut roadmap = go_roadmap();
        roadmap.days[1].day = 1;

        let result = persist_roadmap(&pool, &roadmap).await;
        assert!(result.is_err());

        assert_eq!(count(&pool, "courses").await, 0);
        assert_eq!(count(&pool, "roadmap_days").await, 0);
        assert_eq!(count(&pool, "videos").await, 0);
        assert_eq!(count(&pool, "docs").await, 0);
        assert_eq!(count(&pool, "quizzes").await, 0);
    }

    #[tokio::test]
    async fn test_two_courses_are_independent() {
        let pool = setup_test_db().await;

        let first = persist_roadmap(&pool, &go_roadmap()).await.expect("first insert");
        let second = persist_roadmap(&pool, &go_roadmap()).await.expect("second insert");

        assert_ne!(first.course_id, second.course_id);
        assert_eq!(count(&pool, "courses").await, 2);
        assert_eq!(count(&pool, "roadmap_days").await, 6);
    }
}
