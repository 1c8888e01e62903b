//! Vector store backends for supamem.
//!
//! This module provides:
//! - `VectorStore`: the seam the memory client writes to and searches
//! - `VectorRecord` / `VectorMatch`: rows going in and coming out
//! - `pg`: Postgres + pgvector backend (Supabase)

pub mod pg;

use serde_json::{Map, Value};

use crate::errors::Error;

pub use self::pg::PgVectorStore;

/// A vector and its JSON payload, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorRecord {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: Value,
}

/// A stored record returned by a similarity query.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorMatch {
    pub id: String,
    /// Cosine similarity to the query (1.0 = identical direction).
    pub score: f64,
    pub payload: Value,
}

/// Storage for embedding vectors with payload filtering.
///
/// Methods take `&mut self` because the Postgres client needs exclusive access
/// for every statement.
pub trait VectorStore {
    /// Name of the collection this store writes to.
    fn collection_name(&self) -> &str;

    /// Insert records, replacing any with the same id.
    fn insert(&mut self, records: &[VectorRecord]) -> Result<(), Error>;

    /// Return up to `limit` records whose payload contains every key/value in
    /// `filters`, most similar first.
    fn search(
        &mut self,
        query: &[f32],
        filters: &Map<String, Value>,
        limit: usize,
    ) -> Result<Vec<VectorMatch>, Error>;
}
