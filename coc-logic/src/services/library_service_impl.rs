use std::sync::Arc;

use async_trait::async_trait;
use coc_api::{
    domain::LibraryCategory,
    error::{CocError, CocResult},
    service::LibraryService,
};
use coc_db::models::LibraryListModel;
use coc_db::repository::LibraryRepository;
use indexmap::IndexMap;

pub struct LibraryServiceImpl {
    library_repository: Arc<dyn LibraryRepository>,
}

impl LibraryServiceImpl {
    pub fn new(library_repository: Arc<dyn LibraryRepository>) -> Self {
        Self { library_repository }
    }

    async fn entries_for(&self, category: LibraryCategory) -> CocResult<Vec<String>> {
        Ok(self
            .library_repository
            .get(category.as_str())
            .await?
            .map(|model| model.entries)
            .unwrap_or_default())
    }
}

#[async_trait]
impl LibraryService for LibraryServiceImpl {
    async fn entries(&self, category: LibraryCategory) -> CocResult<Vec<String>> {
        self.entries_for(category).await
    }

    async fn all_entries(&self) -> CocResult<IndexMap<String, Vec<String>>> {
        let mut all = IndexMap::with_capacity(LibraryCategory::ALL.len());
        for category in LibraryCategory::ALL {
            all.insert(category.as_str().to_string(), self.entries_for(category).await?);
        }
        Ok(all)
    }

    async fn add_entry(&self, category: LibraryCategory, value: &str) -> CocResult<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(CocError::missing_field("value"));
        }
        let mut entries = self.entries_for(category).await?;
        if entries.iter().any(|existing| existing == value) {
            return Err(CocError::AlreadyExists(format!(
                "{} entry {value}",
                category.as_str()
            )));
        }
        entries.push(value.to_string());
        self.library_repository
            .put(LibraryListModel {
                category: category.as_str().to_string(),
                entries,
            })
            .await
    }

    async fn remove_entry(&self, category: LibraryCategory, value: &str) -> CocResult<()> {
        let mut entries = self.entries_for(category).await?;
        let before = entries.len();
        entries.retain(|existing| existing != value);
        if entries.len() == before {
            return Err(CocError::NotFound(format!(
                "{} entry {value}",
                category.as_str()
            )));
        }
        self.library_repository
            .put(LibraryListModel {
                category: category.as_str().to_string(),
                entries,
            })
            .await
    }
}
