//! Text-to-vector conversion through an OpenAI-compatible `/embeddings` endpoint.
//!
//! Calls are blocking; supamem has no async runtime of its own.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::EmbedderConfig;
use crate::errors::Error;

/// Anything that turns text into a fixed-length vector.
pub trait Embedder {
    /// Vector length this embedder produces.
    fn dimensions(&self) -> usize;

    /// Generate an embedding for a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>, Error>;
}

/// Embedder backed by the OpenAI embeddings API.
pub struct OpenAiEmbedder {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
    dims: usize,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
    dimensions: usize,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl OpenAiEmbedder {
    pub fn new(config: &EmbedderConfig) -> Result<Self, Error> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key: config.api_key.clone(),
            endpoint: api_endpoint(&config.base_url, "embeddings"),
            model: config.model.clone(),
            dims: config.embedding_dims,
        })
    }
}

impl Embedder for OpenAiEmbedder {
    fn dimensions(&self) -> usize {
        self.dims
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, Error> {
        // Newlines degrade embedding quality on older OpenAI models.
        let text = text.replace('\n', " ");
        let request = EmbeddingRequest {
            model: &self.model,
            input: [text.as_str()],
            dimensions: self.dims,
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        tracing::debug!(model = %self.model, chars = text.len(), "requesting embedding");
        let response: EmbeddingResponse = builder.send()?.error_for_status()?.json()?;

        let embedding = response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| Error::Embedding("empty embedding response".to_string()))?;

        if embedding.len() != self.dims {
            return Err(Error::MismatchedDimensions {
                expected: self.dims,
                actual: embedding.len(),
            });
        }
        if embedding.iter().any(|v| !v.is_finite()) {
            return Err(Error::Embedding(
                "embedding contains NaN or infinite values".to_string(),
            ));
        }

        Ok(embedding)
    }
}

fn has_version_suffix(base_url: &str) -> bool {
    let Some(last_segment) = base_url.rsplit('/').next() else {
        return false;
    };
    let Some(rest) = last_segment.strip_prefix('v') else {
        return false;
    };
    !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit())
}

/// Build the URL for an OpenAI-style resource (`embeddings`, `chat/completions`)
/// from a base URL that may or may not carry a version segment.
pub(crate) fn api_endpoint(base_url: &str, resource: &str) -> String {
    let normalized = base_url.trim_end_matches('/');
    if normalized.ends_with(&format!("/{resource}")) {
        return normalized.to_string();
    }
    if has_version_suffix(normalized) {
        return format!("{normalized}/{resource}");
    }
    format!("{normalized}/v1/{resource}")
}
