//! Write path for the memory client.

use chrono::Utc;
use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::errors::Error;
use crate::memory_types::{AddResult, MemoryEvent, MemoryEventKind};
use crate::vector_store::VectorRecord;

use super::facts::extract_facts;
use super::store::Memory;

/// Payload stored next to each vector.
fn build_payload(data: &str, user_id: &str) -> Value {
    json!({
        "data": data,
        "user_id": user_id,
        "hash": hex::encode(Sha256::digest(data.as_bytes())),
        "created_at": Utc::now().to_rfc3339(),
    })
}

impl Memory {
    #[must_use = "handle the error or results may be lost"]
    /// Add a memory for a user.
    ///
    /// With fact inference on, the text is first distilled into standalone
    /// facts by the LLM and each fact is stored separately; an input with no
    /// facts stores nothing. With inference off, the text is stored as is.
    ///
    /// # Arguments
    ///
    /// * `text` - Text to remember (1 to 100,000 bytes)
    /// * `user_id` - Owner of the memory; searches are scoped to it
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Input or user id is empty
    /// - Input exceeds 100,000 bytes
    /// - The LLM or embedding call fails
    /// - The database write fails
    pub fn add(&mut self, text: &str, user_id: &str) -> Result<AddResult, Error> {
        Self::validate_input_length(text)?;
        Self::validate_user_id(user_id)?;

        let memories = match &self.llm {
            Some(llm) if self.config.infer => extract_facts(&**llm, text)?,
            _ => vec![text.trim().to_string()],
        };
        if memories.is_empty() {
            tracing::info!(user_id, "no memories extracted from input");
            return Ok(AddResult::default());
        }

        let mut records = Vec::with_capacity(memories.len());
        for memory in &memories {
            records.push(VectorRecord {
                id: Uuid::new_v4().to_string(),
                vector: self.embed_checked(memory)?,
                payload: build_payload(memory, user_id),
            });
        }
        self.store.insert(&records)?;

        let results = records
            .into_iter()
            .zip(memories)
            .map(|(record, memory)| MemoryEvent {
                id: record.id,
                memory,
                event: MemoryEventKind::Add,
            })
            .collect::<Vec<_>>();

        tracing::info!(user_id, added = results.len(), "memories added");
        Ok(AddResult { results })
    }
}
