use async_trait::async_trait;
use coc_api::CocResult;

use crate::models::LibraryListModel;

#[async_trait]
pub trait LibraryRepository: Send + Sync {
    async fn get(&self, category: &str) -> CocResult<Option<LibraryListModel>>;

    /// Whole-list replace; entry order is the stored order.
    async fn put(&self, model: LibraryListModel) -> CocResult<()>;

    async fn find_all(&self, limit: usize) -> CocResult<Vec<LibraryListModel>>;
}
