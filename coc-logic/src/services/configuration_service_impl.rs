use std::sync::Arc;

use async_trait::async_trait;
use chrono_tz::Tz;
use coc_api::{
    domain::{ConfigKey, EngineConfig, WeekendDays},
    error::{CocError, CocResult},
    service::{Clock, ConfigurationService},
};
use coc_db::models::ConfigurationModel;
use coc_db::repository::ConfigurationRepository;
use rust_decimal::Decimal;

/// Configuration assembled from the store on every request; no
/// process-wide cache. Recognized keys only; absent keys take their
/// documented defaults.
pub struct ConfigurationServiceImpl {
    configuration_repository: Arc<dyn ConfigurationRepository>,
    clock: Arc<dyn Clock>,
}

impl ConfigurationServiceImpl {
    pub fn new(
        configuration_repository: Arc<dyn ConfigurationRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            configuration_repository,
            clock,
        }
    }

    async fn raw_or_default(&self, key: ConfigKey) -> CocResult<String> {
        Ok(self
            .configuration_repository
            .get(key.as_str())
            .await?
            .map(|model| model.value)
            .unwrap_or_else(|| key.default_value().to_string()))
    }

    fn parse_weekend(raw: &str) -> CocResult<WeekendDays> {
        WeekendDays::from_indices(raw)
            .map_err(|invalid_days| CocError::InvalidWeekendDays { invalid_days })
    }

    fn parse_cap(key: ConfigKey, raw: &str) -> CocResult<Decimal> {
        let value: Decimal = raw.trim().parse().map_err(|_| {
            CocError::Internal(format!("configuration {} holds unparseable value {raw:?}", key.as_str()))
        })?;
        if value <= Decimal::ZERO {
            return Err(CocError::Internal(format!(
                "configuration {} must be positive, got {value}",
                key.as_str()
            )));
        }
        Ok(value)
    }

    fn parse_validity_months(raw: &str) -> CocResult<u32> {
        let months: u32 = raw.trim().parse().map_err(|_| {
            CocError::Internal(format!(
                "configuration CertificateValidityMonths holds unparseable value {raw:?}"
            ))
        })?;
        if months == 0 {
            return Err(CocError::Internal(
                "configuration CertificateValidityMonths must be at least 1".to_string(),
            ));
        }
        Ok(months)
    }

    fn parse_time_zone(raw: &str) -> CocResult<Tz> {
        raw.trim().parse::<Tz>().map_err(|_| {
            CocError::Internal(format!("configuration TimeZone holds unknown zone {raw:?}"))
        })
    }
}

#[async_trait]
impl ConfigurationService for ConfigurationServiceImpl {
    async fn engine_config(&self) -> CocResult<EngineConfig> {
        let weekend_days = Self::parse_weekend(&self.raw_or_default(ConfigKey::WeekendDays).await?)?;
        let monthly_cap =
            Self::parse_cap(ConfigKey::MonthlyCap, &self.raw_or_default(ConfigKey::MonthlyCap).await?)?;
        let total_cap =
            Self::parse_cap(ConfigKey::TotalCap, &self.raw_or_default(ConfigKey::TotalCap).await?)?;
        let certificate_validity_months = Self::parse_validity_months(
            &self.raw_or_default(ConfigKey::CertificateValidityMonths).await?,
        )?;
        let time_zone = Self::parse_time_zone(&self.raw_or_default(ConfigKey::TimeZone).await?)?;

        Ok(EngineConfig {
            weekend_days,
            monthly_cap,
            total_cap,
            certificate_validity_months,
            time_zone,
        })
    }

    async fn get_value(&self, key: ConfigKey) -> CocResult<Option<String>> {
        Ok(self
            .configuration_repository
            .get(key.as_str())
            .await?
            .map(|model| model.value))
    }

    async fn set_value(&self, key: ConfigKey, value: &str) -> CocResult<()> {
        // reject values the readers would choke on
        match key {
            ConfigKey::WeekendDays => {
                Self::parse_weekend(value)?;
            }
            ConfigKey::MonthlyCap | ConfigKey::TotalCap => {
                Self::parse_cap(key, value).map_err(|_| CocError::Validation {
                    kind: coc_api::ValidationKind::BadValue,
                    field: key.as_str().to_string(),
                    message: format!("{value:?} is not a positive decimal"),
                })?;
            }
            ConfigKey::CertificateValidityMonths => {
                Self::parse_validity_months(value).map_err(|_| CocError::Validation {
                    kind: coc_api::ValidationKind::BadValue,
                    field: key.as_str().to_string(),
                    message: format!("{value:?} is not a positive month count"),
                })?;
            }
            ConfigKey::TimeZone => {
                Self::parse_time_zone(value).map_err(|_| CocError::Validation {
                    kind: coc_api::ValidationKind::BadValue,
                    field: key.as_str().to_string(),
                    message: format!("{value:?} is not a known time zone"),
                })?;
            }
        }

        self.configuration_repository
            .upsert(ConfigurationModel {
                key: key.as_str().to_string(),
                value: value.trim().to_string(),
                updated_at: self.clock.now(),
            })
            .await
    }
}
