use std::sync::Arc;

use async_trait::async_trait;
use coc_api::CocResult;
use coc_db::models::ConfigurationModel;
use coc_db::repository::ConfigurationRepository;
use coc_db::store::collections::CONFIGURATION;
use coc_db::store::DocumentStore;

pub struct DocumentConfigurationRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentConfigurationRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ConfigurationRepository for DocumentConfigurationRepository {
    async fn get(&self, key: &str) -> CocResult<Option<ConfigurationModel>> {
        match self.store.get(CONFIGURATION, key).await? {
            Some(doc) => Ok(Some(ConfigurationModel::from_document(key, &doc)?)),
            None => Ok(None),
        }
    }

    async fn upsert(&self, model: ConfigurationModel) -> CocResult<()> {
        self.store
            .upsert(CONFIGURATION, &model.key.clone(), model.to_document())
            .await
    }

    async fn find_all(&self, limit: usize) -> CocResult<Vec<ConfigurationModel>> {
        // configuration has no secondary predicate; the recognized-key set
        // is tiny and bounded
        let pairs = self.store.get_many(CONFIGURATION, limit).await?;
        let mut models = Vec::with_capacity(pairs.len());
        for (key, doc) in &pairs {
            models.push(ConfigurationModel::from_document(key, doc)?);
        }
        Ok(models)
    }
}
