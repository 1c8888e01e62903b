//! Configuration system for supamem.
//!
//! Values resolve with priority: defaults < config file < environment variables.
//! A local `.env` file, when present, is loaded into the process environment
//! before anything is read.

mod env_parser;
mod loader;
mod validation;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

pub use loader::ConfigFile;

pub const ENV_DB_URL: &str = "SUPABASE_DB_URL";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_COLLECTION_NAME: &str = "MEM0_COLLECTION_NAME";
pub const ENV_EMBEDDING_DIMS: &str = "MEM0_EMBEDDING_DIMS";
pub const ENV_EMBEDDING_MODEL: &str = "MEM0_EMBEDDING_MODEL";
pub const ENV_LLM_MODEL: &str = "MEM0_LLM_MODEL";
pub const ENV_INFER: &str = "MEM0_INFER";
pub const ENV_USER_ID: &str = "MEM0_TEST_USER_ID";
pub const ENV_CONFIG_PATH: &str = "SUPAMEM_CONFIG";

pub const DEFAULT_COLLECTION_NAME: &str = "mem0_memories";
pub const DEFAULT_EMBEDDING_DIMS: usize = 1536;
pub const DEFAULT_USER_ID: &str = "test-user";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Variable lookup used to resolve configuration. `Config::load` passes the
/// process environment; tests pass a map.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Vector store backends the client can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorStoreProvider {
    /// Supabase-hosted Postgres with the pgvector extension.
    Supabase,
}

impl VectorStoreProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            VectorStoreProvider::Supabase => "supabase",
        }
    }
}

/// Providers for embedding and LLM calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    OpenAi,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VectorStoreConfig {
    pub provider: VectorStoreProvider,
    /// `postgresql://` connection URI.
    pub connection_string: String,
    /// Table name inside the `vecs` schema.
    pub collection_name: String,
    pub embedding_model_dims: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedderConfig {
    pub provider: ModelProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
    /// Requested vector length; always equals the collection dimension.
    pub embedding_dims: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub provider: ModelProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub temperature: f32,
}

/// Fully resolved, validated configuration. Built once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub vector_store: VectorStoreConfig,
    pub embedder: EmbedderConfig,
    pub llm: LlmConfig,
    /// User the round trip reads and writes memories for.
    pub user_id: String,
    /// Extract facts with the LLM before storing (`false` stores raw text).
    pub infer: bool,
}

impl Config {
    /// Load configuration from `.env`-populated process environment and the
    /// optional config file.
    pub fn load() -> Result<Self, Error> {
        let lookup = |name: &str| std::env::var(name).ok();
        let file = loader::load_from_file(&lookup)?;
        Self::from_sources(file, &lookup)
    }

    /// Resolve configuration from an optional file layer and a variable lookup.
    pub fn from_sources(file: Option<ConfigFile>, lookup: Lookup<'_>) -> Result<Self, Error> {
        let file = file.unwrap_or_default();

        let connection_string = env_parser::resolve_db_url(lookup)?;

        let mut collection_name = file
            .collection_name
            .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string());
        env_parser::apply_string_override(lookup, ENV_COLLECTION_NAME, &mut collection_name)?;

        let mut embedding_model_dims = file.embedding_dims.unwrap_or(DEFAULT_EMBEDDING_DIMS);
        env_parser::apply_dims_override(lookup, &mut embedding_model_dims)?;

        let mut user_id = file.user_id.unwrap_or_else(|| DEFAULT_USER_ID.to_string());
        env_parser::apply_string_override(lookup, ENV_USER_ID, &mut user_id)?;

        let mut embedding_model = file
            .embedding_model
            .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string());
        env_parser::apply_string_override(lookup, ENV_EMBEDDING_MODEL, &mut embedding_model)?;

        let mut llm_model = file
            .llm_model
            .unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string());
        env_parser::apply_string_override(lookup, ENV_LLM_MODEL, &mut llm_model)?;

        let mut base_url = file
            .openai_base_url
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
        env_parser::apply_string_override(lookup, ENV_OPENAI_BASE_URL, &mut base_url)?;

        let mut infer = file.infer.unwrap_or(true);
        env_parser::apply_bool_override(lookup, ENV_INFER, &mut infer)?;

        // Read by both the embedder and the LLM; empty counts as unset.
        let api_key = env_parser::optional_secret(lookup, ENV_OPENAI_API_KEY);

        let config = Config {
            vector_store: VectorStoreConfig {
                provider: file.provider.unwrap_or(VectorStoreProvider::Supabase),
                connection_string,
                collection_name,
                embedding_model_dims,
            },
            embedder: EmbedderConfig {
                provider: ModelProvider::OpenAi,
                model: embedding_model,
                api_key: api_key.clone(),
                base_url: base_url.clone(),
                embedding_dims: embedding_model_dims,
            },
            llm: LlmConfig {
                provider: ModelProvider::OpenAi,
                model: llm_model,
                api_key,
                base_url,
                temperature: file.llm_temperature.unwrap_or(0.1),
            },
            user_id,
            infer,
        };

        config.validate()?;
        tracing::debug!(
            provider = config.vector_store.provider.as_str(),
            collection = %config.vector_store.collection_name,
            dims = config.vector_store.embedding_model_dims,
            infer = config.infer,
            "configuration resolved"
        );

        Ok(config)
    }

    /// Non-fatal problems the user should know about before the run starts.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.embedder.api_key.is_none() {
            warnings.push(format!(
                "{ENV_OPENAI_API_KEY} is not set; embedding and LLM calls to OpenAI will fail."
            ));
        }
        warnings
    }

    fn validate(&self) -> Result<(), Error> {
        let validator = validation::ConfigValidator {
            connection_string: &self.vector_store.connection_string,
            collection_name: &self.vector_store.collection_name,
            embedding_dims: self.vector_store.embedding_model_dims,
            user_id: &self.user_id,
            embedding_model: &self.embedder.model,
            llm_model: &self.llm.model,
            temperature: self.llm.temperature,
        };

        validator.validate()
    }
}

/// Load `./.env` (or the nearest one up the tree) into the process environment.
///
/// Returns the path that was loaded, or `None` when there is no file. Runs
/// before logging is set up, so the caller reports the outcome.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
