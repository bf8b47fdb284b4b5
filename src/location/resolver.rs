use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::location::LocationError;
use crate::web::config::LocationConfig;

const SYSTEM_PROMPT: &str = r#"You are a location parser. Given a location description (city, country, region, ocean, lake, etc.), return the approximate latitude and longitude coordinates.

Respond ONLY with a JSON object in this exact format:
{"success": true, "lat": <latitude>, "lng": <longitude>, "name": "<formatted location name>"}

If the input is not a valid location or you cannot determine coordinates, respond with:
{"success": false, "error": "<brief explanation>"}

Examples:
- "Paris" -> {"success": true, "lat": 48.8566, "lng": 2.3522, "name": "Paris, France"}
- "Pacific Ocean" -> {"success": true, "lat": 0.0, "lng": -160.0, "name": "Pacific Ocean"}
- "asdfgh" -> {"success": false, "error": "Not a recognized location"}"#;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LocationRequest {
    pub query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl LocationResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Interpret the model's JSON reply, tolerating a surrounding code fence.
pub fn parse_model_reply(content: &str) -> LocationResponse {
    let trimmed = content.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    match serde_json::from_str::<LocationResponse>(unfenced) {
        Ok(reply) if reply.success && (reply.lat.is_none() || reply.lng.is_none()) => {
            LocationResponse::failure("Model reply lacks coordinates")
        }
        Ok(reply) => reply,
        Err(_) => LocationResponse::failure("Failed to parse AI response"),
    }
}

/// Resolves free-form place names to coordinates with a chat-completions model.
pub struct LocationResolver {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

impl LocationResolver {
    pub fn new(config: &LocationConfig) -> Result<Self, LocationError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            model: config.model.clone(),
            client,
        })
    }

    /// Never fails; problems are reported in `LocationResponse::error`.
    pub async fn resolve(&self, query: &str) -> LocationResponse {
        match self.complete(query).await {
            Ok(content) => parse_model_reply(&content),
            Err(LocationError::EmptyReply) => LocationResponse::failure("Empty response from AI"),
            Err(e) => {
                warn!("Location lookup for {:?} failed: {}", query, e);
                LocationResponse::failure(format!("API error: {}", e))
            }
        }
    }

    async fn complete(&self, query: &str) -> Result<String, LocationError> {
        let api_key = self.api_key.as_deref().ok_or(LocationError::MissingApiKey)?;

        let request = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": query},
            ],
            "temperature": 0,
            "max_tokens": 150,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LocationError::Status(status.as_u16()));
        }

        let completion: ChatCompletion = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LocationError::EmptyReply)
    }
}
