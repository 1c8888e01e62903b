//! Memory client orchestrating fact extraction, embedding and vector storage.
//!
//! Provides the two-call API the round trip needs: `add` and `search`.

mod crud;
mod facts;
mod search;

// pub(crate): module internals hidden; public items re-exported explicitly via lib.rs
pub(crate) mod store;

pub use facts::extract_facts;
pub use store::Memory;
