//! Postgres + pgvector backend.
//!
//! Collections live in the `vecs` schema as
//! `vecs."<name>" (id varchar PRIMARY KEY, vec vector(<dims>), metadata jsonb)`,
//! with an HNSW index on cosine distance. Similarity is computed by Postgres
//! (`<=>`); this module only issues statements.

use native_tls::TlsConnector;
use pgvector::Vector;
use postgres::Client;
use postgres_native_tls::MakeTlsConnector;
use serde_json::{Map, Value};

use crate::config::VectorStoreConfig;
use crate::errors::Error;

use super::{VectorMatch, VectorRecord, VectorStore};

const SCHEMA: &str = "vecs";

/// pgvector-backed vector store over a single Postgres connection.
pub struct PgVectorStore {
    client: Client,
    collection_name: String,
    table: String,
    dims: usize,
}

/// Quoted, schema-qualified table name for a collection.
///
/// The name is validated as a plain identifier during config loading; quoting
/// keeps mixed-case names intact.
fn qualified_table(collection_name: &str) -> String {
    format!("{SCHEMA}.\"{collection_name}\"")
}

/// Statements that create the collection if it does not exist yet.
fn schema_statements(collection_name: &str, dims: usize) -> String {
    let table = qualified_table(collection_name);
    format!(
        r#"
        CREATE EXTENSION IF NOT EXISTS vector;
        CREATE SCHEMA IF NOT EXISTS {SCHEMA};
        CREATE TABLE IF NOT EXISTS {table} (
            id VARCHAR PRIMARY KEY,
            vec VECTOR({dims}) NOT NULL,
            metadata JSONB NOT NULL DEFAULT '{{}}'::jsonb
        );
        CREATE INDEX IF NOT EXISTS "ix_{collection_name}_vec_hnsw"
            ON {table} USING hnsw (vec vector_cosine_ops);
        "#
    )
}

impl PgVectorStore {
    /// Connect to Postgres and make sure the collection table exists with the
    /// configured dimension.
    ///
    /// TLS is negotiated when the server offers it (`sslmode=prefer` unless the
    /// URL says otherwise).
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The TLS connector cannot be built
    /// - The connection or schema setup fails
    /// - An existing collection was created with a different dimension
    pub fn connect(config: &VectorStoreConfig) -> Result<Self, Error> {
        let connector = MakeTlsConnector::new(TlsConnector::builder().build()?);
        let client = Client::connect(&config.connection_string, connector)?;
        tracing::debug!(collection = %config.collection_name, "connected to postgres");
        Self::with_client(client, &config.collection_name, config.embedding_model_dims)
    }

    /// Wrap an existing connection and initialize the collection.
    pub fn with_client(mut client: Client, collection_name: &str, dims: usize) -> Result<Self, Error> {
        client.batch_execute(&schema_statements(collection_name, dims))?;

        let table = qualified_table(collection_name);
        let mut store = Self {
            client,
            collection_name: collection_name.to_string(),
            table,
            dims,
        };
        store.check_dimension()?;

        tracing::info!(collection = %store.collection_name, dims, "collection ready");
        Ok(store)
    }

    /// Compare the dimension of an existing `vec` column with the configured one.
    fn check_dimension(&mut self) -> Result<(), Error> {
        let row = self.client.query_one(
            r#"
            SELECT a.atttypmod
            FROM pg_attribute a
            JOIN pg_class c ON c.oid = a.attrelid
            JOIN pg_namespace n ON n.oid = c.relnamespace
            WHERE n.nspname = $1 AND c.relname = $2 AND a.attname = 'vec'
            "#,
            &[&SCHEMA, &self.collection_name],
        )?;
        let existing: i32 = row.get(0);

        if usize::try_from(existing).ok() != Some(self.dims) {
            return Err(Error::MismatchedDimensions {
                expected: self.dims,
                actual: usize::try_from(existing).unwrap_or(0),
            });
        }
        Ok(())
    }

    fn check_vector(&self, vector: &[f32]) -> Result<(), Error> {
        if vector.len() != self.dims {
            return Err(Error::MismatchedDimensions {
                expected: self.dims,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

impl VectorStore for PgVectorStore {
    fn collection_name(&self) -> &str {
        &self.collection_name
    }

    fn insert(&mut self, records: &[VectorRecord]) -> Result<(), Error> {
        for record in records {
            self.check_vector(&record.vector)?;
        }

        let sql = format!(
            r#"
            INSERT INTO {} (id, vec, metadata)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET vec = EXCLUDED.vec, metadata = EXCLUDED.metadata
            "#,
            self.table
        );

        let mut tx = self.client.transaction()?;
        let stmt = tx.prepare(&sql)?;
        for record in records {
            let vector = Vector::from(record.vector.clone());
            tx.execute(&stmt, &[&record.id, &vector, &record.payload])?;
        }
        tx.commit()?;

        tracing::debug!(count = records.len(), collection = %self.collection_name, "inserted vectors");
        Ok(())
    }

    fn search(
        &mut self,
        query: &[f32],
        filters: &Map<String, Value>,
        limit: usize,
    ) -> Result<Vec<VectorMatch>, Error> {
        self.check_vector(query)?;
        let limit = i64::try_from(limit)
            .map_err(|_| Error::InvalidLimit(format!("Limit {limit} is too large")))?;

        let sql = format!(
            r#"
            SELECT id, (vec <=> $1)::float8 AS distance, metadata
            FROM {}
            WHERE metadata @> $2
            ORDER BY vec <=> $1
            LIMIT $3
            "#,
            self.table
        );

        let vector = Vector::from(query.to_vec());
        let filter = Value::Object(filters.clone());
        let rows = self.client.query(&sql, &[&vector, &filter, &limit])?;

        let matches = rows
            .iter()
            .map(|row| {
                let distance: f64 = row.get(1);
                VectorMatch {
                    id: row.get(0),
                    score: 1.0 - distance,
                    payload: row.get(2),
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(hits = matches.len(), collection = %self.collection_name, "vector search");
        Ok(matches)
    }
}
