use std::time::Duration;

use crate::config::Config;
use crate::error::AiError;
use crate::models::suggestion::AiSuggestion;

use super::suggestions;

const SYSTEM_PROMPT: &str =
    "You are a helpful habit coach. Always respond in the exact format requested.";

/// Client for the OpenAI-compatible Groq chat-completion API.
#[derive(Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqClient {
    pub fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            api_key: config.groq_api_key.clone(),
            model: config.groq_model.clone(),
            base_url: config.groq_base_url.clone(),
        })
    }

    /// Generate a habit suggestion for a free-text goal and parse it.
    pub async fn suggest_habit(&self, goal: &str) -> Result<AiSuggestion, AiError> {
        let raw = self.complete(&build_prompt(goal)).await?;
        suggestions::parse_suggestion(&raw, goal)
    }

    /// One chat completion round-trip, returning the raw assistant text.
    pub async fn complete(&self, prompt: &str) -> Result<String, AiError> {
        if self.api_key.is_empty() {
            return Err(AiError::InvalidApiKey);
        }

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "model": self.model,
                "messages": [
                    { "role": "system", "content": SYSTEM_PROMPT },
                    { "role": "user", "content": prompt }
                ],
                "temperature": 0.7,
                "max_tokens": 200
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Chat completion rejected");
            return Err(classify_status(status.as_u16()));
        }

        let payload: serde_json::Value = response.json().await?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(AiError::InvalidResponse)?;

        Ok(content.to_string())
    }
}

fn classify_status(status: u16) -> AiError {
    match status {
        429 => AiError::RateLimitExceeded,
        401 | 403 => AiError::InvalidApiKey,
        400 => AiError::BadRequest,
        _ => AiError::InvalidResponse,
    }
}

fn build_prompt(goal: &str) -> String {
    format!(
        r#"Generate a specific, actionable habit suggestion based on the user's goal: "{goal}".
The habit should be:
- Clear and measurable
- Achievable daily or weekly
- Related to their goal
- Include a brief explanation of benefits

Format your response EXACTLY like this:
Habit: [specific habit name, keep it short - max 5 words]
Frequency: [daily or weekly]
Duration: [time if applicable, e.g., "15 minutes" or "N/A"]
Benefits: [1-2 sentences about why this helps]"#
    )
}
