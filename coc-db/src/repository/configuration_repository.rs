use async_trait::async_trait;
use coc_api::CocResult;

use crate::models::ConfigurationModel;

#[async_trait]
pub trait ConfigurationRepository: Send + Sync {
    async fn get(&self, key: &str) -> CocResult<Option<ConfigurationModel>>;

    async fn upsert(&self, model: ConfigurationModel) -> CocResult<()>;

    async fn find_all(&self, limit: usize) -> CocResult<Vec<ConfigurationModel>>;
}
