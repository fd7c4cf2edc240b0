//! Prompt and response schema for roadmap generation.
//!
//! Both are pure functions of the request so the same input always produces
//! the same model call.

use serde_json::{Value, json};

use crate::models::GenerateRequest;

pub fn build_prompt(req: &GenerateRequest) -> String {
    format!(
        r#"You are a learning roadmap generator. Generate a well-structured JSON response for a personalized {course} learning roadmap, with one entry per day of the learning duration.

Each day's plan must include:
1. A topic to focus on.
2. One YouTube video (title and URL).
3. Links to relevant documentation.
4. A short quiz with questions, options, and the correct answer.
5. A study start time and end time that fit the daily study hours.

Here is the input:
- Course: {course}
- Start date: {start_date}
- Learning duration: {learning_duration}
- Daily study hours: {weekdays}
- Weekend study hours: {weekends}
- Preferred content type: [Video, Documentation, Quiz]

Rules:
- "title" is "{course} in {learning_duration}".
- "prerequisites" lists what the learner should know before starting.
- "start_date" is {start_date} in YYYY-MM-DD form.
- Days are numbered from 1 with no gaps; day N falls on the start date plus N-1 days.
- "startTime" and "endTime" are date-times (YYYY-MM-DDTHH:MM:SS) on that day's date.
- Every quiz question has at least two options and the answer is one of them.
- Respond with JSON only."#,
        course = req.course,
        start_date = req.start_date,
        learning_duration = req.learning_duration,
        weekdays = req.daily_hours_weekdays,
        weekends = req.daily_hours_weekends,
    )
}

/// Structured-output schema in the Gemini `responseSchema` dialect.
pub fn response_schema() -> Value {
    let video = json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "url": { "type": "STRING" }
        },
        "required": ["title", "url"]
    });

    let quiz = json!({
        "type": "OBJECT",
        "properties": {
            "question": { "type": "STRING" },
            "options": { "type": "ARRAY", "items": { "type": "STRING" } },
            "answer": { "type": "STRING" }
        },
        "required": ["question", "options", "answer"]
    });

    let day = json!({
        "type": "OBJECT",
        "properties": {
            "day": { "type": "NUMBER" },
            "topic": { "type": "STRING" },
            "video": video,
            "docs": { "type": "ARRAY", "items": { "type": "STRING" } },
            "quiz": { "type": "ARRAY", "items": quiz },
            "startTime": { "type": "STRING" },
            "endTime": { "type": "STRING" }
        },
        "required": ["day", "topic", "video", "docs", "quiz", "startTime", "endTime"]
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "prerequisites": { "type": "STRING" },
            "start_date": { "type": "STRING" },
            "roadmap": { "type": "ARRAY", "items": day }
        },
        "required": ["title", "prerequisites", "start_date", "roadmap"]
    })
}
