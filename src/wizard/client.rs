use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::models::{GenerateRequest, GenerateResponse};

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },
}

/// The server-side generation endpoint as seen by the wizard.
#[async_trait]
pub trait RoadmapApi: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, WizardError>;
}

pub struct HttpRoadmapApi {
    client: Client,
    base_url: String,
}

impl HttpRoadmapApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, WizardError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl RoadmapApi for HttpRoadmapApi {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, WizardError> {
        let response = self.client
            .post(self.generate_url())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WizardError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<GenerateResponse>().await?)
    }
}
