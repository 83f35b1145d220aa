//! Gemini upstream client.
//!
//! One logical capability: send a conversation to the chat-completion
//! endpoint with fixed sampling parameters and get a single text reply back.
//! Any transport error, non-success status or reply without text surfaces as
//! one upstream error; there is no retry.

use netdraft_common::config::GeminiSettings;
use netdraft_common::conversation::ConversationContext;
use netdraft_common::requirements::NetworkRequirements;
use netdraft_common::rpc::{ChatMessage, ChatRole};
use netdraft_common::NetdraftError;
use std::time::Duration;

const TEMPERATURE: f64 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 512;
const TOP_K: u32 = 40;
const TOP_P: f64 = 0.9;

pub struct GeminiClient {
    client: reqwest::Client,
    settings: GeminiSettings,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Result<Self, NetdraftError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| NetdraftError::Upstream(e.to_string()))?;
        Ok(Self { client, settings })
    }

    pub fn has_api_key(&self) -> bool {
        self.settings
            .api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty())
    }

    /// Send one composite conversation and return the reply text.
    pub async fn generate(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, NetdraftError> {
        let key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                NetdraftError::Config("Gemini API key not configured".to_string())
            })?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.settings.endpoint, self.settings.model, key
        );

        let body = serde_json::json!({
            "contents": build_contents(system_prompt, messages),
            "generationConfig": {
                "temperature": TEMPERATURE,
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
                "topK": TOP_K,
                "topP": TOP_P,
            },
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NetdraftError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NetdraftError::Upstream(format!(
                "Gemini request failed: {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| NetdraftError::Upstream(e.to_string()))?;

        reply_text(&json)
            .ok_or_else(|| NetdraftError::Upstream("Invalid response from Gemini API".to_string()))
    }

    /// Ask the model for extra recommendations for an already-generated
    /// design. Callers are expected to swallow failures: the section is
    /// optional enrichment, never part of the deterministic output.
    pub async fn ai_recommendations(
        &self,
        req: &NetworkRequirements,
    ) -> Result<String, NetdraftError> {
        let prompt = format!(
            "You are an expert network engineer. A customer has these network \
             requirements as JSON:\n{}\n\
             Suggest three further improvements to the design. Respond with a \
             single HTML unordered list (<ul><li>...</li></ul>) and nothing else.",
            serde_json::to_string(req)?
        );
        self.generate(&prompt, &[]).await
    }
}

/// The composite system prompt embedding what has been collected so far and
/// the questions still pending.
pub fn system_prompt(context: &ConversationContext) -> String {
    format!(
        "You are an expert network engineer assistant. Your goal is to help design a comprehensive network infrastructure.\n\
         \n\
         CURRENT CONTEXT:\n\
         - Collected Information: {}\n\
         - Pending Questions: {}\n\
         \n\
         DESIGN GUIDELINES:\n\
         1. Ask clarifying questions to gather complete network requirements\n\
         2. Provide detailed, practical recommendations\n\
         3. Consider scalability, security, and budget constraints\n\
         4. Give concise, actionable insights\n\
         \n\
         INTERACTION STRATEGY:\n\
         - If information is incomplete, ask specific follow-up questions\n\
         - Summarize collected information periodically\n\
         - Offer initial design recommendations when sufficient data is available\n\
         \n\
         RESPONSE FORMAT:\n\
         - Clear, professional language\n\
         - Technical but accessible explanations\n\
         - Prioritize user's business objectives",
        serde_json::to_string(&context.collected_info).unwrap_or_else(|_| "{}".to_string()),
        context.questions.join(", ")
    )
}

/// History mapped to the upstream schema: the system prompt leads as a user
/// turn, assistant turns become "model".
pub fn build_contents(system_prompt: &str, messages: &[ChatMessage]) -> serde_json::Value {
    let mut contents = vec![serde_json::json!({
        "role": "user",
        "parts": [{"text": system_prompt}],
    })];
    for message in messages {
        let role = match message.role {
            ChatRole::User => "user",
            ChatRole::Assistant => "model",
        };
        contents.push(serde_json::json!({
            "role": role,
            "parts": [{"text": message.content}],
        }));
    }
    serde_json::Value::Array(contents)
}

fn reply_text(json: &serde_json::Value) -> Option<String> {
    json.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_embeds_context() {
        let mut ctx = ConversationContext::default();
        ctx.track_reply("Industry: retail");
        let prompt = system_prompt(&ctx);
        assert!(prompt.contains("\"industryType\":\"retail\""));
        assert!(prompt.contains("What is your company size?"));
        assert!(prompt.contains("network engineer assistant"));
    }

    #[test]
    fn test_build_contents_maps_roles() {
        let messages = vec![
            ChatMessage::assistant("Welcome!"),
            ChatMessage::user("We have 50 people."),
        ];
        let contents = build_contents("system", &messages);
        let arr = contents.as_array().unwrap();
        assert_eq!(arr.len(), 3);
        assert_eq!(arr[0]["role"], "user");
        assert_eq!(arr[1]["role"], "model");
        assert_eq!(arr[2]["role"], "user");
        assert_eq!(arr[2]["parts"][0]["text"], "We have 50 people.");
    }

    #[test]
    fn test_reply_text_navigation() {
        let json = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "hello"}]}}]
        });
        assert_eq!(reply_text(&json).unwrap(), "hello");
        assert!(reply_text(&serde_json::json!({"candidates": []})).is_none());
    }

    #[test]
    fn test_missing_key_is_a_config_error() {
        let client = GeminiClient::new(GeminiSettings::default()).unwrap();
        assert!(!client.has_api_key());
    }
}
