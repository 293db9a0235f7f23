//! LanceDB-backed vector store.

use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use arrow_array::{FixedSizeListArray, Float32Array, Int64Array, RecordBatch, RecordBatchIterator, StringArray};
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{connect, Connection, DistanceType, Table};

use vecgraph_core::config::{expand_path, EngineSettings};
use vecgraph_core::error::{Error, Result};
use vecgraph_core::traits::VectorStore;
use vecgraph_core::types::SearchHit;

use crate::schema::build_document_schema;

fn store_err(e: impl std::fmt::Display) -> Error {
    Error::VectorStore(e.to_string())
}

pub struct LanceVectorStore {
    db: Connection,
    table_name: String,
    dim: i32,
    next_id: AtomicI64,
}

impl LanceVectorStore {
    /// Connect to (or create) the table at `db_path`. Id assignment resumes
    /// from the current row count, matching the original collection's
    /// monotonic integer scheme.
    pub async fn open(db_path: &Path, table_name: &str, dim: usize) -> Result<Self> {
        let dim = i32::try_from(dim)
            .map_err(|_| Error::InvalidConfig(format!("embedding dim out of range: {dim}")))?;
        let db = connect(db_path.to_string_lossy().as_ref())
            .execute()
            .await
            .map_err(store_err)?;
        let store = Self {
            db,
            table_name: table_name.to_string(),
            dim,
            next_id: AtomicI64::new(0),
        };
        store.ensure_table().await?;
        let existing = store
            .open_table()
            .await?
            .count_rows(None)
            .await
            .map_err(store_err)?;
        store.next_id.store(existing as i64, Ordering::SeqCst);
        Ok(store)
    }

    /// Open using `[engine]` settings: db path expanded (`~`, `${VAR}`),
    /// table name and dimension applied.
    pub async fn open_with(settings: &EngineSettings) -> Result<Self> {
        let path = expand_path(&settings.db_path);
        Self::open(&path, &settings.vector_table, settings.dim).await
    }

    async fn ensure_table(&self) -> Result<()> {
        let names = self.db.table_names().execute().await.map_err(store_err)?;
        if names.contains(&self.table_name) {
            return Ok(());
        }
        let schema = build_document_schema(self.dim);
        // create empty table with 0 rows
        let iter = RecordBatchIterator::new(vec![].into_iter(), schema);
        self.db
            .create_table(&self.table_name, Box::new(iter))
            .execute()
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn open_table(&self) -> Result<Table> {
        self.db
            .open_table(&self.table_name)
            .execute()
            .await
            .map_err(store_err)
    }
}

impl VectorStore for LanceVectorStore {
    async fn insert(&self, vector: Vec<f32>, text: &str) -> Result<i64> {
        if vector.len() != self.dim as usize {
            return Err(Error::InvalidInput(format!(
                "vector dimension mismatch: expected {}, got {}",
                self.dim,
                vector.len()
            )));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let schema = build_document_schema(self.dim);
        let vectors: Vec<Option<Vec<Option<f32>>>> =
            vec![Some(vector.into_iter().map(Some).collect())];
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![id])),
                Arc::new(StringArray::from(vec![text.to_string()])),
                Arc::new(FixedSizeListArray::from_iter_primitive::<
                    arrow_array::types::Float32Type,
                    _,
                    _,
                >(vectors.into_iter(), self.dim)),
            ],
        )
        .map_err(store_err)?;
        let reader = Box::new(RecordBatchIterator::new(vec![Ok(batch)].into_iter(), schema));
        self.open_table()
            .await?
            .add(reader)
            .execute()
            .await
            .map_err(store_err)?;
        tracing::debug!(vector_id = id, table = %self.table_name, "inserted vector record");
        Ok(id)
    }

    async fn search(&self, vector: Vec<f32>, k: usize) -> Result<Vec<SearchHit>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let table = self.open_table().await?;
        let mut stream = table
            .vector_search(vector)
            .map_err(store_err)?
            .distance_type(DistanceType::Cosine)
            .limit(k)
            .execute()
            .await
            .map_err(store_err)?;
        let mut hits = Vec::new();
        while let Some(batch) = stream.try_next().await.map_err(store_err)? {
            let ids = batch
                .column_by_name("id")
                .and_then(|c| c.as_any().downcast_ref::<Int64Array>())
                .ok_or_else(|| Error::VectorStore("id column missing".to_string()))?;
            let contents = batch
                .column_by_name("content")
                .and_then(|c| c.as_any().downcast_ref::<StringArray>())
                .ok_or_else(|| Error::VectorStore("content column missing".to_string()))?;
            let distances = batch
                .column_by_name("_distance")
                .and_then(|c| c.as_any().downcast_ref::<Float32Array>());
            for i in 0..batch.num_rows() {
                // Cosine distance -> similarity.
                let score = distances.map_or(0.0, |d| 1.0 - d.value(i));
                hits.push(SearchHit {
                    vector_id: ids.value(i),
                    score,
                    text: contents.value(i).to_string(),
                });
            }
        }
        Ok(hits)
    }
}
