use async_trait::async_trait;
use coc_api::CocResult;
use serde::{Deserialize, Serialize};

use crate::store::value::{Document, FieldValue};

/// Comparison operators the store evaluates server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// One operation inside an atomic multi-write.
#[derive(Debug, Clone)]
pub enum WriteOp {
    Create {
        collection: String,
        id: String,
        fields: Document,
    },
    Update {
        collection: String,
        id: String,
        patch: Document,
    },
    Upsert {
        collection: String,
        id: String,
        fields: Document,
    },
    Delete {
        collection: String,
        id: String,
    },
}

/// Typed abstraction over the keyed document store. This trait is the only
/// seam between the engine and the storage backend; every call runs under
/// the caller's deadline and surfaces transport failure as
/// `StoreUnavailable` without partial state.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> CocResult<Option<Document>>;

    /// Bounded whole-collection scan returning (document id, document).
    /// Reserved for collections with no usable predicate (libraries,
    /// configuration); `limit` is mandatory.
    async fn get_many(&self, collection: &str, limit: usize)
        -> CocResult<Vec<(String, Document)>>;

    /// Single-field comparison scan.
    async fn find_where(
        &self,
        collection: &str,
        field: &str,
        op: FieldOp,
        value: FieldValue,
    ) -> CocResult<Vec<Document>>;

    /// AND-of-equalities match; the workhorse for indexed lookups.
    async fn find_matching(
        &self,
        collection: &str,
        criteria: &[(&str, FieldValue)],
    ) -> CocResult<Vec<Document>>;

    /// Fails with `AlreadyExists` when the id is taken.
    async fn create(&self, collection: &str, id: &str, fields: Document) -> CocResult<()>;

    /// Partial patch; `NotFound` when the document is absent. A `Null`
    /// field value overwrites; fields are never removed from a closed record.
    async fn update(&self, collection: &str, id: &str, patch: Document) -> CocResult<()>;

    async fn upsert(&self, collection: &str, id: &str, fields: Document) -> CocResult<()>;

    async fn delete(&self, collection: &str, id: &str) -> CocResult<()>;

    async fn delete_many(&self, collection: &str, ids: &[String]) -> CocResult<()>;

    /// Largest value of an integer id field, None on an empty collection.
    async fn max_id(&self, collection: &str, id_field: &str) -> CocResult<Option<i64>>;

    /// Compare-and-set: apply `patch` only if every guard field currently
    /// equals its expected value (a missing document never matches).
    /// Returns whether the patch was applied. Lock documents and id
    /// counters are built on this.
    async fn compare_and_update(
        &self,
        collection: &str,
        id: &str,
        guards: &[(&str, FieldValue)],
        patch: Document,
    ) -> CocResult<bool>;

    /// Atomic multi-write: all operations commit or none do.
    async fn batch_write(&self, ops: Vec<WriteOp>) -> CocResult<()>;
}
