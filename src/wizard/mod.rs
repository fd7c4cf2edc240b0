//! Chat-style onboarding wizard.
//!
//! A scripted conversation collects a technology and a duration, then issues
//! one generation request. The wizard only holds conversation state; the
//! network call goes through a [`RoadmapApi`].
//!
//! Flow: technology prompt → duration prompt → loading message → result.
//! An answered prompt ignores further selections.

pub mod client;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::models::{GenerateRequest, GenerateResponse};

pub use client::{HttpRoadmapApi, RoadmapApi, WizardError};

pub const TECH_QUESTION: &str = "What tech do you want to learn?";

pub const TECH_OPTIONS: [&str; 12] = [
    "Python",
    "Go",
    "Rust",
    "Javascript",
    "HTML",
    "PostgreSQL",
    "React",
    "Typescript",
    "NextJS",
    "Redis",
    "Vue",
    "PHP",
];

pub const DURATION_OPTIONS: [&str; 6] = ["3 days", "5 days", "1 week", "2 week", "3 weeks", "Customise"];

/// Duration option that asks for free text instead.
pub const CUSTOM_DURATION: &str = "Customise";

pub const LOADING_TEXT: &str = "Crafting your journey...";
pub const ERROR_TEXT: &str =
    "Sorry, there was an error creating your learning path. Please try again.";

pub const WEEKDAY_HOURS: &str = "2";
pub const WEEKEND_HOURS: &str = "4";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    Bot,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    Technology,
    Duration,
}

/// Selectable options attached to a bot message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub kind: PromptKind,
    pub options: Vec<String>,
    pub answered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: u64,
    pub author: Author,
    pub content: String,
    pub prompt: Option<Prompt>,
    pub loading: bool,
}

#[derive(Debug, Clone)]
pub struct Wizard {
    messages: Vec<Message>,
    next_id: u64,
    selected_tech: Option<String>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        let mut wizard = Self {
            messages: Vec::new(),
            next_id: 1,
            selected_tech: None,
        };
        wizard.push_prompt(TECH_QUESTION.to_string(), PromptKind::Technology, &TECH_OPTIONS);
        wizard
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn selected_technology(&self) -> Option<&str> {
        self.selected_tech.as_deref()
    }

    /// The prompt currently waiting for an answer, if any.
    pub fn pending_prompt(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.prompt.as_ref().is_some_and(|p| !p.answered))
    }

    pub fn is_loading(&self) -> bool {
        self.messages.iter().any(|m| m.loading)
    }

    /// Answer the technology prompt. Returns false (and changes nothing) when
    /// `message_id` is not an open technology prompt.
    pub fn select_technology(&mut self, message_id: u64, tech: &str) -> bool {
        if !self.answer(message_id, PromptKind::Technology) {
            return false;
        }

        self.selected_tech = Some(tech.to_string());
        self.push(Author::User, format!("I want to learn {}", tech), None, false);
        self.push_prompt(
            format!("In how much time do you want to complete {}?", tech),
            PromptKind::Duration,
            &DURATION_OPTIONS,
        );
        true
    }

    /// Answer the duration prompt and return the generation request to send.
    ///
    /// Returns `None` (and changes nothing) when `message_id` is not an open
    /// duration prompt.
    pub fn select_duration(
        &mut self,
        message_id: u64,
        duration: &str,
        today: NaiveDate,
    ) -> Option<GenerateRequest> {
        let course = self.selected_tech.clone()?;
        if !self.answer(message_id, PromptKind::Duration) {
            return None;
        }

        self.push(
            Author::User,
            format!("I want to complete within {}", duration),
            None,
            false,
        );
        self.push(Author::Bot, LOADING_TEXT.to_string(), None, true);

        Some(GenerateRequest {
            course,
            start_date: today.format("%Y-%m-%d").to_string(),
            learning_duration: duration.to_string(),
            daily_hours_weekdays: WEEKDAY_HOURS.to_string(),
            daily_hours_weekends: WEEKEND_HOURS.to_string(),
        })
    }

    /// Replace the loading message with the outcome of the request.
    pub fn complete_generation(&mut self, result: Result<GenerateResponse, WizardError>) {
        let content = match result {
            Ok(response) => format!("Your learning path is ready! : {}", response.output),
            Err(e) => {
                tracing::error!("roadmap generation failed: {}", e);
                ERROR_TEXT.to_string()
            }
        };

        match self.messages.iter_mut().rev().find(|m| m.loading) {
            Some(message) => {
                message.content = content;
                message.loading = false;
            }
            None => self.push(Author::Bot, content, None, false),
        }
    }

    /// Send `request` through `api` once and record the outcome.
    ///
    /// Returns true when the roadmap was generated.
    pub async fn submit<A>(&mut self, api: &A, request: &GenerateRequest) -> bool
    where
        A: RoadmapApi + ?Sized,
    {
        let result = api.generate(request).await;
        let ok = result.is_ok();
        self.complete_generation(result);
        ok
    }

    fn answer(&mut self, message_id: u64, kind: PromptKind) -> bool {
        let Some(prompt) = self
            .messages
            .iter_mut()
            .find(|m| m.id == message_id)
            .and_then(|m| m.prompt.as_mut())
        else {
            return false;
        };

        if prompt.kind != kind || prompt.answered {
            return false;
        }
        prompt.answered = true;
        true
    }

    fn push_prompt(&mut self, content: String, kind: PromptKind, options: &[&str]) {
        let prompt = Prompt {
            kind,
            options: options.iter().map(|o| o.to_string()).collect(),
            answered: false,
        };
        self.push(Author::Bot, content, Some(prompt), false);
    }

    fn push(&mut self, author: Author, content: String, prompt: Option<Prompt>, loading: bool) {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            author,
            content,
            prompt,
            loading,
        });
    }
}

/// Today's date in UTC, used as the roadmap start date.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
