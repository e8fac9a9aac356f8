use async_trait::async_trait;

use crate::{
    domain::{ConfigKey, EngineConfig},
    error::CocResult,
};

#[async_trait]
pub trait ConfigurationService: Send + Sync {
    /// Assemble the typed configuration from the store, defaults filling
    /// absent keys. Fetched per request; never cached process-wide.
    async fn engine_config(&self) -> CocResult<EngineConfig>;

    async fn get_value(&self, key: ConfigKey) -> CocResult<Option<String>>;

    /// Values are validated against the key's interpretation before write.
    async fn set_value(&self, key: ConfigKey, value: &str) -> CocResult<()>;
}
