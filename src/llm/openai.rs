use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use super::provider::{ChatProvider, EmbeddingProvider, ProviderError};
use super::types::ChatRequest;
use crate::core::config::OpenAiConfig;

const PROVIDER: &str = "openai";

/// Client for OpenAI-compatible `/embeddings` and `/chat/completions` APIs.
#[derive(Clone)]
pub struct OpenAiProvider {
    base_url: String,
    api_key: String,
    chat_model: String,
    embedding_model: String,
    batch_size: usize,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(config: &OpenAiConfig) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(http_error)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            chat_model: config.chat_model.clone(),
            embedding_model: config.embedding_model.clone(),
            batch_size: config.embedding_batch_size.max(1),
            client,
        })
    }

    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        let url = format!("{}/embeddings", self.base_url);

        let body = json!({
            "model": self.embedding_model,
            "input": inputs,
        });

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(http_error)?;
        let res = ensure_success(res).await?;

        let payload: EmbeddingsResponse = res.json().await.map_err(http_error)?;
        if payload.data.len() != inputs.len() {
            return Err(protocol_error(format!(
                "expected {} embeddings, got {}",
                inputs.len(),
                payload.data.len()
            )));
        }

        let mut data = payload.data;
        data.sort_by_key(|item| item.index);
        Ok(data.into_iter().map(|item| item.embedding).collect())
    }
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OpenAiProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        let mut embeddings = Vec::with_capacity(inputs.len());
        for batch in inputs.chunks(self.batch_size) {
            embeddings.extend(self.embed_batch(batch).await?);
        }
        Ok(embeddings)
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut body = json!({
            "model": self.chat_model,
            "messages": request.messages,
            "stream": false,
        });

        if let (Some(obj), Some(t)) = (body.as_object_mut(), request.temperature) {
            obj.insert("temperature".to_string(), json!(t));
        }

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(http_error)?;
        let res = ensure_success(res).await?;

        let payload: Value = res.json().await.map_err(http_error)?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| protocol_error("completion has no message content".to_string()))
    }
}

async fn ensure_success(res: Response) -> Result<Response, ProviderError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(ProviderError::Status {
        provider: PROVIDER,
        status: status.as_u16(),
        body,
    })
}

fn http_error(source: reqwest::Error) -> ProviderError {
    ProviderError::Http {
        provider: PROVIDER,
        source,
    }
}

fn protocol_error(reason: String) -> ProviderError {
    ProviderError::Protocol {
        provider: PROVIDER,
        reason,
    }
}
