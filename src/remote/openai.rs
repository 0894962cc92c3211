//! OpenAI-compatible HTTP client
//!
//! Implements both remote contracts against the chat-completions and
//! image-generations endpoints. The credential is checked per call, so a
//! session without one still starts and each action fails on its own.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::DreamConfig;
use crate::error::RemoteCallError;
use crate::remote::model::{
    art_prompt, ArtClient, InterpretationClient, ART_IMAGE_SIZE, INTERPRETATION_INSTRUCTION,
};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: String,
    n: u32,
    size: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

impl ChatResponse {
    fn into_content(self) -> Result<String, RemoteCallError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| RemoteCallError::MalformedResponse {
                reason: "response contained no choices".to_string(),
            })?;

        choice
            .message
            .content
            .ok_or_else(|| RemoteCallError::MalformedResponse {
                reason: "first choice has no message content".to_string(),
            })
    }
}

impl ImageResponse {
    fn into_url(self) -> Result<String, RemoteCallError> {
        let item = self
            .data
            .into_iter()
            .next()
            .ok_or_else(|| RemoteCallError::MalformedResponse {
                reason: "response contained no images".to_string(),
            })?;

        item.url.ok_or_else(|| RemoteCallError::MalformedResponse {
            reason: "first image has no url".to_string(),
        })
    }
}

/// Client for an OpenAI-compatible API.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    chat_model: String,
    image_model: String,
}

impl OpenAiClient {
    pub fn with_config(config: &DreamConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            chat_model: config.chat_model.clone(),
            image_model: config.image_model.clone(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, RemoteCallError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(RemoteCallError::MissingCredential)?;

        let url = format!("{}/{}", self.api_base, path);
        tracing::debug!(%url, "Sending request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteCallError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| RemoteCallError::MalformedResponse {
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl InterpretationClient for OpenAiClient {
    async fn interpret(&self, text: &str) -> Result<String, RemoteCallError> {
        let request = ChatRequest {
            model: &self.chat_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: INTERPRETATION_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
        };

        let response: ChatResponse = self.post_json("chat/completions", &request).await?;
        response.into_content()
    }
}

#[async_trait]
impl ArtClient for OpenAiClient {
    async fn generate_art(&self, text: &str) -> Result<String, RemoteCallError> {
        let request = ImageRequest {
            model: &self.image_model,
            prompt: art_prompt(text),
            n: 1,
            size: ART_IMAGE_SIZE,
        };

        let response: ImageResponse = self.post_json("images/generations", &request).await?;
        response.into_url()
    }
}
