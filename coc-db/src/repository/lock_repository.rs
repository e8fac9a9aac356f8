use std::time::Duration;

use async_trait::async_trait;
use coc_api::CocResult;
use uuid::Uuid;

/// Proof of a held advisory lock; required to release it.
#[derive(Debug, Clone)]
pub struct LockToken {
    pub scope: String,
    pub token: Uuid,
}

/// Per-scope advisory locks over compare-and-set lock documents.
/// Certification and debit serialize on the employee scope.
#[async_trait]
pub trait LockRepository: Send + Sync {
    /// Block until the lock is held or `wait_deadline` lapses; a lapsed
    /// deadline is `StoreUnavailable` (retriable). A holder that outlives
    /// `ttl` may be displaced by the next acquirer.
    async fn acquire(
        &self,
        scope: &str,
        owner: &str,
        ttl: Duration,
        wait_deadline: Duration,
    ) -> CocResult<LockToken>;

    /// Release only succeeds for the current token; a displaced holder's
    /// release is a quiet no-op.
    async fn release(&self, token: LockToken) -> CocResult<()>;
}

/// Lock scope for everything that serializes per employee.
pub fn employee_scope(employee_id: &str) -> String {
    format!("employee:{employee_id}")
}
