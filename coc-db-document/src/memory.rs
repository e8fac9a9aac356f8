use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use coc_api::{CocError, CocResult};
use coc_db::store::{Document, DocumentStore, FieldOp, FieldValue, WriteOp};

/// In-memory keyed document store: individual
/// document writes are serialized and `batch_write` commits all-or-nothing.
/// The backend for tests and single-node deployments.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> CocResult<std::sync::RwLockReadGuard<'_, HashMap<String, BTreeMap<String, Document>>>> {
        self.collections
            .read()
            .map_err(|_| CocError::Internal("document store lock poisoned".to_string()))
    }

    fn write(
        &self,
    ) -> CocResult<std::sync::RwLockWriteGuard<'_, HashMap<String, BTreeMap<String, Document>>>> {
        self.collections
            .write()
            .map_err(|_| CocError::Internal("document store lock poisoned".to_string()))
    }

    /// Total ordering where both sides have the same shape; None otherwise.
    fn compare(left: &FieldValue, right: &FieldValue) -> Option<Ordering> {
        match (left, right) {
            (FieldValue::Str(a), FieldValue::Str(b)) => Some(a.cmp(b)),
            (FieldValue::Int(a), FieldValue::Int(b)) => Some(a.cmp(b)),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.partial_cmp(b),
            (FieldValue::Int(a), FieldValue::Float(b)) => (*a as f64).partial_cmp(b),
            (FieldValue::Float(a), FieldValue::Int(b)) => a.partial_cmp(&(*b as f64)),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => Some(a.cmp(b)),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => Some(a.cmp(b)),
            (FieldValue::Null, FieldValue::Null) => Some(Ordering::Equal),
            _ => None,
        }
    }

    fn matches_op(doc: &Document, field: &str, op: FieldOp, value: &FieldValue) -> bool {
        let Some(actual) = doc.get(field) else {
            return false;
        };
        let Some(ordering) = Self::compare(actual, value) else {
            return op == FieldOp::Ne;
        };
        match op {
            FieldOp::Eq => ordering == Ordering::Equal,
            FieldOp::Ne => ordering != Ordering::Equal,
            FieldOp::Lt => ordering == Ordering::Less,
            FieldOp::Le => ordering != Ordering::Greater,
            FieldOp::Gt => ordering == Ordering::Greater,
            FieldOp::Ge => ordering != Ordering::Less,
        }
    }

    fn apply(
        collections: &mut HashMap<String, BTreeMap<String, Document>>,
        op: WriteOp,
    ) -> CocResult<()> {
        match op {
            WriteOp::Create { collection, id, fields } => {
                let docs = collections.entry(collection.clone()).or_default();
                if docs.contains_key(&id) {
                    return Err(CocError::AlreadyExists(format!("{collection}/{id}")));
                }
                docs.insert(id, fields);
                Ok(())
            }
            WriteOp::Update { collection, id, patch } => {
                let docs = collections.entry(collection.clone()).or_default();
                let Some(doc) = docs.get_mut(&id) else {
                    return Err(CocError::NotFound(format!("{collection}/{id}")));
                };
                doc.extend(patch);
                Ok(())
            }
            WriteOp::Upsert { collection, id, fields } => {
                collections.entry(collection).or_default().insert(id, fields);
                Ok(())
            }
            WriteOp::Delete { collection, id } => {
                if let Some(docs) = collections.get_mut(&collection) {
                    docs.remove(&id);
                }
                Ok(())
            }
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> CocResult<Option<Document>> {
        Ok(self
            .read()?
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn get_many(
        &self,
        collection: &str,
        limit: usize,
    ) -> CocResult<Vec<(String, Document)>> {
        Ok(self
            .read()?
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .take(limit)
                    .map(|(id, doc)| (id.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_where(
        &self,
        collection: &str,
        field: &str,
        op: FieldOp,
        value: FieldValue,
    ) -> CocResult<Vec<Document>> {
        Ok(self
            .read()?
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| Self::matches_op(doc, field, op, &value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_matching(
        &self,
        collection: &str,
        criteria: &[(&str, FieldValue)],
    ) -> CocResult<Vec<Document>> {
        Ok(self
            .read()?
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| {
                        criteria
                            .iter()
                            .all(|(field, value)| Self::matches_op(doc, field, FieldOp::Eq, value))
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn create(&self, collection: &str, id: &str, fields: Document) -> CocResult<()> {
        let mut collections = self.write()?;
        Self::apply(
            &mut collections,
            WriteOp::Create {
                collection: collection.to_string(),
                id: id.to_string(),
                fields,
            },
        )
    }

    async fn update(&self, collection: &str, id: &str, patch: Document) -> CocResult<()> {
        let mut collections = self.write()?;
        Self::apply(
            &mut collections,
            WriteOp::Update {
                collection: collection.to_string(),
                id: id.to_string(),
                patch,
            },
        )
    }

    async fn upsert(&self, collection: &str, id: &str, fields: Document) -> CocResult<()> {
        let mut collections = self.write()?;
        Self::apply(
            &mut collections,
            WriteOp::Upsert {
                collection: collection.to_string(),
                id: id.to_string(),
                fields,
            },
        )
    }

    async fn delete(&self, collection: &str, id: &str) -> CocResult<()> {
        let mut collections = self.write()?;
        Self::apply(
            &mut collections,
            WriteOp::Delete {
                collection: collection.to_string(),
                id: id.to_string(),
            },
        )
    }

    async fn delete_many(&self, collection: &str, ids: &[String]) -> CocResult<()> {
        let mut collections = self.write()?;
        for id in ids {
            Self::apply(
                &mut collections,
                WriteOp::Delete {
                    collection: collection.to_string(),
                    id: id.clone(),
                },
            )?;
        }
        Ok(())
    }

    async fn max_id(&self, collection: &str, id_field: &str) -> CocResult<Option<i64>> {
        Ok(self.read()?.get(collection).and_then(|docs| {
            docs.values()
                .filter_map(|doc| match doc.get(id_field) {
                    Some(FieldValue::Int(v)) => Some(*v),
                    _ => None,
                })
                .max()
        }))
    }

    async fn compare_and_update(
        &self,
        collection: &str,
        id: &str,
        guards: &[(&str, FieldValue)],
        patch: Document,
    ) -> CocResult<bool> {
        let mut collections = self.write()?;
        let Some(doc) = collections.get_mut(collection).and_then(|docs| docs.get_mut(id)) else {
            return Ok(false);
        };
        let guards_hold = guards
            .iter()
            .all(|(field, expected)| doc.get(*field) == Some(expected));
        if !guards_hold {
            return Ok(false);
        }
        doc.extend(patch);
        Ok(true)
    }

    async fn batch_write(&self, ops: Vec<WriteOp>) -> CocResult<()> {
        let mut collections = self.write()?;
        // validate against a shadow copy so a failing op leaves pre-state
        let mut shadow = collections.clone();
        for op in &ops {
            Self::apply(&mut shadow, op.clone())?;
        }
        *collections = shadow;
        Ok(())
    }
}
