use coc_api::{CocError, CocResult};
use coc_db::store::collections::ID_COUNTERS;
use coc_db::store::{req_i64, Document, DocumentStore, FieldValue};

pub const NEXT_ID: &str = "nextId";

/// Reserve `count` consecutive ids from a compare-and-set counter document,
/// seeding the counter from the collection's current max id on first use.
/// Concurrent writers retry until their CAS lands, so reserved ranges never
/// overlap and every fresh id exceeds every persisted one.
pub async fn reserve_ids(
    store: &dyn DocumentStore,
    counter_key: &str,
    seed_collection: &str,
    seed_field: &str,
    count: usize,
) -> CocResult<i64> {
    let count = count.max(1) as i64;
    loop {
        match store.get(ID_COUNTERS, counter_key).await? {
            Some(doc) => {
                let next = req_i64(&doc, ID_COUNTERS, counter_key, NEXT_ID)?;
                let mut patch = Document::new();
                patch.insert(NEXT_ID.to_string(), FieldValue::Int(next + count));
                let applied = store
                    .compare_and_update(
                        ID_COUNTERS,
                        counter_key,
                        &[(NEXT_ID, FieldValue::Int(next))],
                        patch,
                    )
                    .await?;
                if applied {
                    return Ok(next);
                }
            }
            None => {
                let seed = store.max_id(seed_collection, seed_field).await?.unwrap_or(0) + 1;
                let mut fields = Document::new();
                fields.insert(NEXT_ID.to_string(), FieldValue::Int(seed + count));
                match store.create(ID_COUNTERS, counter_key, fields).await {
                    Ok(()) => return Ok(seed),
                    // another writer seeded first; take the CAS path
                    Err(CocError::AlreadyExists(_)) => continue,
                    Err(e) => return Err(e),
                }
            }
        }
    }
}
