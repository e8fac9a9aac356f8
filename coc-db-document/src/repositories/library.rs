use std::sync::Arc;

use async_trait::async_trait;
use coc_api::CocResult;
use coc_db::models::LibraryListModel;
use coc_db::repository::LibraryRepository;
use coc_db::store::collections::LIBRARIES;
use coc_db::store::DocumentStore;

pub struct DocumentLibraryRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentLibraryRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LibraryRepository for DocumentLibraryRepository {
    async fn get(&self, category: &str) -> CocResult<Option<LibraryListModel>> {
        match self.store.get(LIBRARIES, category).await? {
            Some(doc) => Ok(Some(LibraryListModel::from_document(category, &doc)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, model: LibraryListModel) -> CocResult<()> {
        self.store
            .upsert(LIBRARIES, &model.category.clone(), model.to_document())
            .await
    }

    async fn find_all(&self, limit: usize) -> CocResult<Vec<LibraryListModel>> {
        let pairs = self.store.get_many(LIBRARIES, limit).await?;
        let mut models = Vec::with_capacity(pairs.len());
        for (category, doc) in &pairs {
            models.push(LibraryListModel::from_document(category, doc)?);
        }
        Ok(models)
    }
}
