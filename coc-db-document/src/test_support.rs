//! Store wrappers for observational tests: `RecordingStore` captures every
//! adapter call for query push-down assertions, `FaultInjectingStore`
//! simulates transport failure at chosen points.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use coc_api::{CocError, CocResult};
use coc_db::store::{Document, DocumentStore, FieldOp, FieldValue, WriteOp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedOp {
    Get { collection: String },
    GetMany { collection: String },
    FindWhere { collection: String, field: String },
    FindMatching { collection: String, fields: Vec<String> },
    Write { collection: String },
    BatchWrite { op_count: usize },
}

/// Delegating store that records the shape of every read and write.
pub struct RecordingStore {
    inner: Arc<dyn DocumentStore>,
    ops: Mutex<Vec<RecordedOp>>,
}

impl RecordingStore {
    pub fn new(inner: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner,
            ops: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<RecordedOp> {
        self.ops.lock().expect("recording mutex").clone()
    }

    pub fn clear(&self) {
        self.ops.lock().expect("recording mutex").clear();
    }

    fn record(&self, op: RecordedOp) {
        self.ops.lock().expect("recording mutex").push(op);
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn get(&self, collection: &str, id: &str) -> CocResult<Option<Document>> {
        self.record(RecordedOp::Get {
            collection: collection.to_string(),
        });
        self.inner.get(collection, id).await
    }

    async fn get_many(
        &self,
        collection: &str,
        limit: usize,
    ) -> CocResult<Vec<(String, Document)>> {
        self.record(RecordedOp::GetMany {
            collection: collection.to_string(),
        });
        self.inner.get_many(collection, limit).await
    }

    async fn find_where(
        &self,
        collection: &str,
        field: &str,
        op: FieldOp,
        value: FieldValue,
    ) -> CocResult<Vec<Document>> {
        self.record(RecordedOp::FindWhere {
            collection: collection.to_string(),
            field: field.to_string(),
        });
        self.inner.find_where(collection, field, op, value).await
    }

    async fn find_matching(
        &self,
        collection: &str,
        criteria: &[(&str, FieldValue)],
    ) -> CocResult<Vec<Document>> {
        self.record(RecordedOp::FindMatching {
            collection: collection.to_string(),
            fields: criteria.iter().map(|(f, _)| f.to_string()).collect(),
        });
        self.inner.find_matching(collection, criteria).await
    }

    async fn create(&self, collection: &str, id: &str, fields: Document) -> CocResult<()> {
        self.record(RecordedOp::Write {
            collection: collection.to_string(),
        });
        self.inner.create(collection, id, fields).await
    }

    async fn update(&self, collection: &str, id: &str, patch: Document) -> CocResult<()> {
        self.record(RecordedOp::Write {
            collection: collection.to_string(),
        });
        self.inner.update(collection, id, patch).await
    }

    async fn upsert(&self, collection: &str, id: &str, fields: Document) -> CocResult<()> {
        self.record(RecordedOp::Write {
            collection: collection.to_string(),
        });
        self.inner.upsert(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> CocResult<()> {
        self.record(RecordedOp::Write {
            collection: collection.to_string(),
        });
        self.inner.delete(collection, id).await
    }

    async fn delete_many(&self, collection: &str, ids: &[String]) -> CocResult<()> {
        self.record(RecordedOp::Write {
            collection: collection.to_string(),
        });
        self.inner.delete_many(collection, ids).await
    }

    async fn max_id(&self, collection: &str, id_field: &str) -> CocResult<Option<i64>> {
        self.inner.max_id(collection, id_field).await
    }

    async fn compare_and_update(
        &self,
        collection: &str,
        id: &str,
        guards: &[(&str, FieldValue)],
        patch: Document,
    ) -> CocResult<bool> {
        self.inner
            .compare_and_update(collection, id, guards, patch)
            .await
    }

    async fn batch_write(&self, ops: Vec<WriteOp>) -> CocResult<()> {
        self.record(RecordedOp::BatchWrite { op_count: ops.len() });
        self.inner.batch_write(ops).await
    }
}

/// Delegating store whose next `batch_write` fails before touching the
/// backend, for atomicity properties under simulated crashes.
pub struct FaultInjectingStore {
    inner: Arc<dyn DocumentStore>,
    fail_next_batch_write: AtomicBool,
}

impl FaultInjectingStore {
    pub fn new(inner: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner,
            fail_next_batch_write: AtomicBool::new(false),
        }
    }

    pub fn fail_next_batch_write(&self) {
        self.fail_next_batch_write.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for FaultInjectingStore {
    async fn get(&self, collection: &str, id: &str) -> CocResult<Option<Document>> {
        self.inner.get(collection, id).await
    }

    async fn get_many(
        &self,
        collection: &str,
        limit: usize,
    ) -> CocResult<Vec<(String, Document)>> {
        self.inner.get_many(collection, limit).await
    }

    async fn find_where(
        &self,
        collection: &str,
        field: &str,
        op: FieldOp,
        value: FieldValue,
    ) -> CocResult<Vec<Document>> {
        self.inner.find_where(collection, field, op, value).await
    }

    async fn find_matching(
        &self,
        collection: &str,
        criteria: &[(&str, FieldValue)],
    ) -> CocResult<Vec<Document>> {
        self.inner.find_matching(collection, criteria).await
    }

    async fn create(&self, collection: &str, id: &str, fields: Document) -> CocResult<()> {
        self.inner.create(collection, id, fields).await
    }

    async fn update(&self, collection: &str, id: &str, patch: Document) -> CocResult<()> {
        self.inner.update(collection, id, patch).await
    }

    async fn upsert(&self, collection: &str, id: &str, fields: Document) -> CocResult<()> {
        self.inner.upsert(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> CocResult<()> {
        self.inner.delete(collection, id).await
    }

    async fn delete_many(&self, collection: &str, ids: &[String]) -> CocResult<()> {
        self.inner.delete_many(collection, ids).await
    }

    async fn max_id(&self, collection: &str, id_field: &str) -> CocResult<Option<i64>> {
        self.inner.max_id(collection, id_field).await
    }

    async fn compare_and_update(
        &self,
        collection: &str,
        id: &str,
        guards: &[(&str, FieldValue)],
        patch: Document,
    ) -> CocResult<bool> {
        self.inner
            .compare_and_update(collection, id, guards, patch)
            .await
    }

    async fn batch_write(&self, ops: Vec<WriteOp>) -> CocResult<()> {
        if self.fail_next_batch_write.swap(false, Ordering::SeqCst) {
            return Err(CocError::StoreUnavailable {
                details: "injected batch-write failure".to_string(),
            });
        }
        self.inner.batch_write(ops).await
    }
}
