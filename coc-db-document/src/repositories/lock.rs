use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use coc_api::{CocError, CocResult};
use coc_db::models::lock::fields;
use coc_db::models::LockModel;
use coc_db::repository::{LockRepository, LockToken};
use coc_db::store::collections::LOCKS;
use coc_db::store::{Document, DocumentStore, FieldValue};
use uuid::Uuid;

const RETRY_INTERVAL: Duration = Duration::from_millis(25);

/// Advisory locks over compare-and-set lock documents. A fresh scope is
/// claimed with `create`; a lapsed holder is displaced by CAS on its token.
pub struct DocumentLockRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentLockRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn try_acquire(&self, scope: &str, owner: &str, ttl: Duration) -> CocResult<Option<Uuid>> {
        let now = Utc::now();
        let token = Uuid::new_v4();
        let model = LockModel {
            scope: scope.to_string(),
            token,
            owner: owner.to_string(),
            expires_at: now + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::seconds(30)),
        };

        match self.store.create(LOCKS, scope, model.to_document()).await {
            Ok(()) => return Ok(Some(token)),
            Err(CocError::AlreadyExists(_)) => {}
            Err(e) => return Err(e),
        }

        // scope is held; displace only a lapsed holder
        let Some(doc) = self.store.get(LOCKS, scope).await? else {
            return Ok(None); // released in between; retry from the top
        };
        let held = LockModel::from_document(scope, &doc)?;
        if held.expires_at > now {
            return Ok(None);
        }
        let displaced = self
            .store
            .compare_and_update(
                LOCKS,
                scope,
                &[(fields::TOKEN, FieldValue::Str(held.token.to_string()))],
                model.to_document(),
            )
            .await?;
        Ok(displaced.then_some(token))
    }
}

#[async_trait]
impl LockRepository for DocumentLockRepository {
    async fn acquire(
        &self,
        scope: &str,
        owner: &str,
        ttl: Duration,
        wait_deadline: Duration,
    ) -> CocResult<LockToken> {
        let started = std::time::Instant::now();
        loop {
            if let Some(token) = self.try_acquire(scope, owner, ttl).await? {
                return Ok(LockToken {
                    scope: scope.to_string(),
                    token,
                });
            }
            if started.elapsed() >= wait_deadline {
                return Err(CocError::StoreUnavailable {
                    details: format!("lock {scope} not acquired within deadline"),
                });
            }
            tokio::time::sleep(RETRY_INTERVAL).await;
        }
    }

    async fn release(&self, token: LockToken) -> CocResult<()> {
        // expire in place rather than delete, so a concurrent displacement
        // never has its fresh lock removed from under it
        let mut patch = Document::new();
        patch.insert(
            fields::EXPIRES_AT.to_string(),
            FieldValue::Timestamp(chrono::DateTime::<Utc>::MIN_UTC),
        );
        self.store
            .compare_and_update(
                LOCKS,
                &token.scope,
                &[(fields::TOKEN, FieldValue::Str(token.token.to_string()))],
                patch,
            )
            .await?;
        Ok(())
    }
}
