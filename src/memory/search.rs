//! Read path for the memory client.

use serde_json::{Map, Value};

use crate::errors::Error;
use crate::memory_types::{MemoryItem, SearchResult};

use super::store::{Memory, validate_limit};

impl Memory {
    #[must_use = "handle the error or results may be lost"]
    /// Search a user's memories by semantic similarity.
    ///
    /// The query is embedded and the vector store returns the nearest
    /// memories belonging to `user_id`. Order and scores come from the store.
    ///
    /// # Arguments
    ///
    /// * `query` - Search query text (1 to 100,000 bytes)
    /// * `user_id` - Only this user's memories are considered
    /// * `limit` - Maximum number of results to return
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Query or user id is empty
    /// - Query exceeds 100,000 bytes
    /// - Limit is 0 or exceeds MAX_SEARCH_LIMIT
    /// - Embedding generation or the database query fails
    pub fn search(&mut self, query: &str, user_id: &str, limit: usize) -> Result<SearchResult, Error> {
        validate_limit(limit)?;

        let query = query.trim();
        Self::validate_input_length(query)?;
        Self::validate_user_id(user_id)?;

        let embedding = self.embed_checked(query)?;

        let mut filters = Map::new();
        filters.insert("user_id".to_string(), Value::String(user_id.to_string()));
        let matches = self.store.search(&embedding, &filters, limit)?;

        let results = matches
            .into_iter()
            .map(|m| MemoryItem {
                memory: m.payload.get("data").and_then(Value::as_str).map(str::to_string),
                id: m.id,
                score: Some(m.score),
                payload: m.payload,
            })
            .collect::<Vec<_>>();

        tracing::info!(user_id, hits = results.len(), "memory search complete");
        Ok(SearchResult { results })
    }
}
