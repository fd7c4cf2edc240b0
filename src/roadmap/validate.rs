use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use tracing::warn;

use super::{day_date, parse_date, parse_day_time};
use crate::models::{QuizEntry, RoadmapDocument, VideoEntry};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoadmapError {
    #[error("start_date {0:?} is not a YYYY-MM-DD date")]
    InvalidStartDate(String),

    #[error("roadmap has no days")]
    EmptyRoadmap,

    #[error("expected day {expected}, found day {found}")]
    DaySequence { expected: u32, found: i64 },

    #[error("day {day} falls outside the calendar")]
    DateOutOfRange { day: u32 },

    #[error("day {day}: {field} {value:?} is not a recognised time")]
    InvalidTime {
        day: u32,
        field: &'static str,
        value: String,
    },

    #[error("day {day}: quiz question {question:?} has {count} option(s), at least 2 required")]
    TooFewOptions {
        day: u32,
        question: String,
        count: usize,
    },
}

/// A roadmap whose days are numbered 1..=N and whose dates and times resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRoadmap {
    pub title: String,
    pub prerequisites: String,
    pub start_date: NaiveDate,
    pub days: Vec<ValidatedDay>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDay {
    pub day: u32,
    pub topic: String,
    pub date: NaiveDate,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub video: Option<VideoEntry>,
    pub docs: Vec<String>,
    pub quiz: Vec<QuizEntry>,
}

impl RoadmapDocument {
    pub fn validate(self) -> Result<ValidatedRoadmap, RoadmapError> {
        let start_date = parse_date(&self.start_date)
            .ok_or_else(|| RoadmapError::InvalidStartDate(self.start_date.clone()))?;

        if self.roadmap.is_empty() {
            return Err(RoadmapError::EmptyRoadmap);
        }

        let mut days = Vec::with_capacity(self.roadmap.len());
        for (index, entry) in self.roadmap.into_iter().enumerate() {
            let expected = index as u32 + 1;
            if entry.day != i64::from(expected) {
                return Err(RoadmapError::DaySequence {
                    expected,
                    found: entry.day,
                });
            }

            let date = day_date(start_date, expected)
                .ok_or(RoadmapError::DateOutOfRange { day: expected })?;
            let start_time = parse_day_time(&entry.start_time, date).ok_or_else(|| {
                RoadmapError::InvalidTime {
                    day: expected,
                    field: "startTime",
                    value: entry.start_time.clone(),
                }
            })?;
            let end_time = parse_day_time(&entry.end_time, date).ok_or_else(|| {
                RoadmapError::InvalidTime {
                    day: expected,
                    field: "endTime",
                    value: entry.end_time.clone(),
                }
            })?;

            for quiz in &entry.quiz {
                if quiz.options.len() < 2 {
                    return Err(RoadmapError::TooFewOptions {
                        day: expected,
                        question: quiz.question.clone(),
                        count: quiz.options.len(),
                    });
                }
                if !quiz.options.contains(&quiz.answer) {
                    warn!(
                        day = expected,
                        question = %quiz.question,
                        "quiz answer is not one of its options"
                    );
                }
            }

            days.push(ValidatedDay {
                day: expected,
                topic: entry.topic,
                date,
                start_time,
                end_time,
                video: entry.video,
                docs: entry.docs,
                quiz: entry.quiz,
            });
        }

        Ok(ValidatedRoadmap {
            title: self.title,
            prerequisites: self.prerequisites,
            start_date,
            days,
        })
    }
}
