use async_trait::async_trait;
use indexmap::IndexMap;

use crate::{domain::LibraryCategory, error::CocResult};

/// Ordered value lists (offices, positions, signatories) for UI lookups.
#[async_trait]
pub trait LibraryService: Send + Sync {
    async fn entries(&self, category: LibraryCategory) -> CocResult<Vec<String>>;

    /// Every category with its entries, insertion-ordered.
    async fn all_entries(&self) -> CocResult<IndexMap<String, Vec<String>>>;

    async fn add_entry(&self, category: LibraryCategory, value: &str) -> CocResult<()>;

    async fn remove_entry(&self, category: LibraryCategory, value: &str) -> CocResult<()>;
}
