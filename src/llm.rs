//! Chat-completion client used to distill memories from free text.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::embedding::api_endpoint;
use crate::errors::Error;

/// A language model that answers with a JSON object.
pub trait Llm {
    /// Send a system and user prompt; return the raw text of the reply.
    fn complete_json(&self, system: &str, user: &str) -> Result<String, Error>;
}

/// LLM backed by the OpenAI chat completions API.
pub struct OpenAiLlm {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl OpenAiLlm {
    pub fn new(config: &LlmConfig) -> Result<Self, Error> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key: config.api_key.clone(),
            endpoint: api_endpoint(&config.base_url, "chat/completions"),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

impl Llm for OpenAiLlm {
    fn complete_json(&self, system: &str, user: &str) -> Result<String, Error> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        tracing::debug!(model = %self.model, "requesting chat completion");
        let response: ChatResponse = builder.send()?.error_for_status()?.json()?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| Error::Llm("chat completion returned no content".to_string()))
    }
}
