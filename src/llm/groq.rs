use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{Error, Res, config::Config};

use super::LanguageModel;

/// Client for Groq's OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct GroqClient {
    api_key: Option<String>,
    api_url: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

impl GroqClient {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            api_key: config.groq_api_key.clone(),
            api_url: config.groq_api_url.trim_end_matches('/').to_string(),
            model: config.groq_model.clone(),
            client,
        }
    }
}

#[async_trait]
impl LanguageModel for GroqClient {
    async fn complete(&self, prompt: &str) -> Res<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(Error::Config {
                missing: vec![crate::config::GROQ_API_KEY],
            });
        };

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".into(),
                content: prompt.to_string(),
            }],
            temperature: 0.3,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Classification(format!(
                "Groq API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let chat: ChatResponse = response.json().await?;

        chat.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| Error::Classification("No response from Groq".into()))
    }
}
