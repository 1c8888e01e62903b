//! supamem - an add-then-search smoke test for a Supabase (pgvector) backed memory client.
//!
//! The crate reads its configuration from the environment, builds a memory
//! client (OpenAI embeddings and fact extraction, Postgres/pgvector storage)
//! and runs one write followed by one read. All operations are synchronous.
//!
//! # Example
//!
//! ```no_run
//! use supamem::{Config, Memory};
//!
//! let config = Config::load().expect("invalid configuration");
//! let mut memory = Memory::from_config(&config).expect("failed to build client");
//!
//! memory
//!     .add("My name is Alice and I am building a SaaS startup.", &config.user_id)
//!     .expect("add failed");
//!
//! let found = memory.search("What is my name?", &config.user_id, 5).expect("search failed");
//! for item in &found.results {
//!     println!("{:?}: {:?}", item.score, item.display_text());
//! }
//! ```

pub mod config;
pub mod embedding;
pub mod errors;
pub mod llm;
pub mod memory;
pub mod memory_types;
pub mod output;
pub mod runner;
pub mod vector_store;

// Re-export public API
pub use config::Config;
pub use embedding::{Embedder, OpenAiEmbedder};
pub use errors::Error;
pub use llm::{Llm, OpenAiLlm};
pub use memory::Memory;
pub use memory::store::{MAX_INPUT_LENGTH, MAX_SEARCH_LIMIT};
pub use memory_types::{AddResult, MemoryEvent, MemoryEventKind, MemoryItem, SearchResult};
pub use vector_store::{PgVectorStore, VectorMatch, VectorRecord, VectorStore};
