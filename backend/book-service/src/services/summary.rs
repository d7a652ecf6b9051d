/// Summary generation client
///
/// Thin JSON client for an Ollama-compatible text generation endpoint. The
/// service treats it as best-effort: book creation degrades gracefully when
/// it is down, while the direct generation endpoint surfaces a 502.
use crate::config::SummaryConfig;
use crate::error::{AppError, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub struct SummaryClient {
    http: reqwest::Client,
    url: String,
    model: String,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl SummaryClient {
    pub fn new(config: &SummaryConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            url: config.url.clone(),
            model: config.model.clone(),
            num_predict: config.num_predict,
        })
    }

    /// Generate a short free-text summary for the given prompt
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let payload = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": { "num_predict": self.num_predict },
        });

        let response = self
            .http
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("summary request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "summary service returned {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("summary response malformed: {e}")))?;

        debug!(chars = body.response.len(), "summary generated");

        Ok(body.response)
    }
}
