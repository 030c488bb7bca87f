//! OpenAI-compatible adapter for coach advice.
//!
//! Supports OpenAI API, Azure OpenAI, Gemini's OpenAI endpoint and local Ollama instances.
//! Implements `AdvicePort`; every failure is returned as `DomainError::Advice`.

use crate::adapters::ai::history_to_csv;
use crate::domain::{DailySummary, DomainError, UserProfile, progress_percent};
use crate::domain::goal::weight_kg;
use crate::ports::AdvicePort;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// OpenAI-compatible advice adapter.
///
/// Can be configured to work with:
/// - OpenAI API (api.openai.com)
/// - Gemini (generativelanguage.googleapis.com/v1beta/openai)
/// - Ollama (localhost)
/// - Any OpenAI-compatible API
pub struct OpenAiAdviceAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiAdviceAdapter {
    /// Create a new adapter.
    ///
    /// # Arguments
    /// * `api_url` - API endpoint (e.g., "https://api.openai.com/v1/chat/completions")
    /// * `api_key` - API key (can be empty for local Ollama)
    /// * `model` - Model name (e.g., "gpt-4o-mini", "llama3.2")
    /// * `timeout` - Whole-request timeout; the UI waits on this call
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Advice(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }

    fn system_prompt() -> &'static str {
        "You are a professional health and hydration coach. \
         Reply with a concise (max 2 sentences) encouraging tip or health fact \
         relevant to the user's current status. Plain text only, no markdown."
    }

    /// Build the user prompt from the profile, today's progress and the week's totals.
    fn user_prompt(profile: &UserProfile, intake_today: f64, history_csv: &str) -> String {
        let d = profile.details();
        let goal = profile.daily_goal();
        format!(
            "User Profile:\n\
             - Age: {age}\n\
             - Gender: {gender}\n\
             - Weight: {weight:.1}kg\n\
             - Exercise: {minutes} min/session, {days} days/week\n\
             - Climate: {climate}\n\
             - Caffeine: {cups} cups/day\n\
             - Medical condition affecting hydration: {medical}\n\
             - Daily Hydration Goal: {goal}ml\n\
             - Current Intake Today: {intake}ml\n\n\
             Current Progress: {progress}%\n\n\
             Last 7 days (Date;Total;Goal, ml):\n{history_csv}\n\
             Focus on the benefits of water for their activity level, climate or body metrics.",
            age = d.age,
            gender = d.gender,
            weight = weight_kg(d),
            minutes = d.exercise_minutes_per_session,
            days = d.exercise_days_per_week,
            climate = d.climate,
            cups = d.caffeine_cups,
            medical = if d.has_medical_condition { "yes" } else { "no" },
            goal = goal,
            intake = intake_today.round() as i64,
            progress = progress_percent(intake_today, goal).round() as i64,
            history_csv = history_csv,
        )
    }

    /// Strip the wrapping LLMs like to add around a one-liner (quotes, code fences).
    fn clean_tip(raw_text: &str) -> String {
        let mut text = raw_text.trim();
        if let Some(inner) = text.strip_prefix("```") {
            text = inner.strip_suffix("```").unwrap_or(inner).trim();
        }
        for (open, close) in [('"', '"'), ('\u{201c}', '\u{201d}')] {
            if text.len() > 1 && text.starts_with(open) && text.ends_with(close) {
                text = text[open.len_utf8()..text.len() - close.len_utf8()].trim();
            }
        }
        text.to_string()
    }
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

#[async_trait::async_trait]
impl AdvicePort for OpenAiAdviceAdapter {
    async fn advise(
        &self,
        profile: &UserProfile,
        intake_today: f64,
        history: &[DailySummary],
    ) -> Result<String, DomainError> {
        let history_csv = history_to_csv(history)
            .map_err(|e| DomainError::Advice(format!("Failed to generate CSV: {}", e)))?;

        info!(
            model = %self.model,
            intake_today,
            goal = profile.daily_goal(),
            "requesting coach tip"
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Self::system_prompt().to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Self::user_prompt(profile, intake_today, &history_csv),
                },
            ],
            temperature: 0.7,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::Advice(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "advice API returned error");
            return Err(DomainError::Advice(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Advice(format!("Failed to parse API response: {}", e)))?;

        let raw = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| DomainError::Advice("No response choices returned".to_string()))?;

        debug!(raw_len = raw.len(), "received coach tip");

        let tip = Self::clean_tip(&raw);
        if tip.is_empty() {
            return Err(DomainError::Advice("Empty tip returned".to_string()));
        }
        Ok(tip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Climate, ProfileDetails, WeightUnit};

    #[test]
    fn test_clean_tip_plain() {
        assert_eq!(
            OpenAiAdviceAdapter::clean_tip("  Drink a glass now.\n"),
            "Drink a glass now."
        );
    }

    #[test]
    fn test_clean_tip_quotes() {
        assert_eq!(
            OpenAiAdviceAdapter::clean_tip("\"Sip steadily.\""),
            "Sip steadily."
        );
        assert_eq!(
            OpenAiAdviceAdapter::clean_tip("\u{201c}Sip steadily.\u{201d}"),
            "Sip steadily."
        );
    }

    #[test]
    fn test_clean_tip_code_fence() {
        assert_eq!(
            OpenAiAdviceAdapter::clean_tip("```\nStay ahead of thirst.\n```"),
            "Stay ahead of thirst."
        );
        assert_eq!(OpenAiAdviceAdapter::clean_tip("\"\""), "");
    }

    #[test]
    fn test_user_prompt_contains_progress_and_history() {
        let profile = UserProfile::new(ProfileDetails {
            weight: 154.0,
            weight_unit: WeightUnit::Lbs,
            climate: Climate::HighAltitude,
            ..ProfileDetails::default()
        });
        let prompt = OpenAiAdviceAdapter::user_prompt(
            &profile,
            1500.0,
            "Date;Total;Goal\n2024-03-10;1500;3544\n",
        );
        assert!(prompt.contains("Weight: 69.9kg"));
        assert!(prompt.contains("Climate: High Altitude"));
        assert!(prompt.contains(&format!("Daily Hydration Goal: {}ml", profile.daily_goal())));
        assert!(prompt.contains("Current Intake Today: 1500ml"));
        assert!(prompt.contains("2024-03-10;1500;3544"));
    }
}
