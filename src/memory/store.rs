//! Core memory client struct combining embedding, fact extraction and storage.

use crate::config::Config;
use crate::embedding::{Embedder, OpenAiEmbedder};
use crate::errors::Error;
use crate::llm::{Llm, OpenAiLlm};
use crate::vector_store::{PgVectorStore, VectorStore};

/// Maximum allowed input length (100,000 bytes).
pub const MAX_INPUT_LENGTH: usize = 100_000;
/// Maximum allowed limit for search operations.
pub const MAX_SEARCH_LIMIT: usize = 10_000;

/// Memory client: embeds text, optionally distills it into facts, and keeps it
/// in a vector store keyed by user.
///
/// # Mutability Requirements
///
/// `add` and `search` require `&mut self` because the vector store holds a
/// single Postgres connection.
pub struct Memory {
    pub(crate) config: Config,
    pub(crate) embedder: Box<dyn Embedder>,
    pub(crate) llm: Option<Box<dyn Llm>>,
    pub(crate) store: Box<dyn VectorStore>,
}

impl Memory {
    /// Build a client from configuration: OpenAI embedder, OpenAI LLM (when
    /// `infer` is on) and a Supabase pgvector store.
    ///
    /// # Errors
    ///
    /// Returns error if any HTTP client cannot be built, or if connecting to
    /// Postgres or preparing the collection fails. Nothing is retried.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let embedder = OpenAiEmbedder::new(&config.embedder)?;
        let llm: Option<Box<dyn Llm>> = if config.infer {
            Some(Box::new(OpenAiLlm::new(&config.llm)?))
        } else {
            None
        };
        let store = PgVectorStore::connect(&config.vector_store)?;

        Self::new(config.clone(), Box::new(embedder), llm, Box::new(store))
    }

    /// Assemble a client from already-built parts.
    ///
    /// # Errors
    ///
    /// Returns `Error::MismatchedDimensions` if the embedder's vector length
    /// differs from the collection dimension, and `Error::Config` if `infer`
    /// is on but no LLM is given.
    pub fn new(
        config: Config,
        embedder: Box<dyn Embedder>,
        llm: Option<Box<dyn Llm>>,
        store: Box<dyn VectorStore>,
    ) -> Result<Self, Error> {
        let expected = config.vector_store.embedding_model_dims;
        if embedder.dimensions() != expected {
            return Err(Error::MismatchedDimensions {
                expected,
                actual: embedder.dimensions(),
            });
        }
        if config.infer && llm.is_none() {
            return Err(Error::Config(
                "Fact inference is enabled but no LLM is configured".to_string(),
            ));
        }

        tracing::debug!(
            collection = store.collection_name(),
            infer = config.infer,
            "memory client ready"
        );
        Ok(Memory {
            config,
            embedder,
            llm,
            store,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate input length (rejects empty and whitespace-only inputs).
    pub(crate) fn validate_input_length(text: &str) -> Result<(), Error> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        if text.len() > MAX_INPUT_LENGTH {
            return Err(Error::InputTooLong {
                max_length: MAX_INPUT_LENGTH,
                actual_length: text.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn validate_user_id(user_id: &str) -> Result<(), Error> {
        if user_id.trim().is_empty() {
            return Err(Error::InvalidInput("user_id cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Embed text and check the vector against the collection dimension.
    pub(crate) fn embed_checked(&self, text: &str) -> Result<Vec<f32>, Error> {
        let embedding = self.embedder.embed(text)?;
        let expected = self.config.vector_store.embedding_model_dims;
        if embedding.len() != expected {
            return Err(Error::MismatchedDimensions {
                expected,
                actual: embedding.len(),
            });
        }
        Ok(embedding)
    }
}

/// Validate search limit is within acceptable bounds.
pub(crate) fn validate_limit(limit: usize) -> Result<(), Error> {
    if limit == 0 {
        return Err(Error::InvalidLimit(
            "Limit must be greater than 0".to_string(),
        ));
    }
    if limit > MAX_SEARCH_LIMIT {
        return Err(Error::InvalidLimit(format!(
            "Limit {} exceeds maximum allowed ({})",
            limit, MAX_SEARCH_LIMIT
        )));
    }
    Ok(())
}
