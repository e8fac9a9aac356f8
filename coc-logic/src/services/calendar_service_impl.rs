use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use coc_api::{
    domain::{ConfigKey, DayType, Holiday, WeekendDays},
    error::{CocError, CocResult},
    service::{CalendarService, ConfigurationService, NewHoliday},
};
use coc_db::repository::CalendarRepository;
use uuid::Uuid;

use crate::mappers::CalendarMapper;

/// Production implementation of CalendarService. Classification reads the
/// holiday registry and weekend configuration fresh on every call.
pub struct CalendarServiceImpl {
    calendar_repository: Arc<dyn CalendarRepository>,
    configuration: Arc<dyn ConfigurationService>,
}

impl CalendarServiceImpl {
    pub fn new(
        calendar_repository: Arc<dyn CalendarRepository>,
        configuration: Arc<dyn ConfigurationService>,
    ) -> Self {
        Self {
            calendar_repository,
            configuration,
        }
    }
}

#[async_trait]
impl CalendarService for CalendarServiceImpl {
    async fn day_type(&self, date: NaiveDate) -> CocResult<DayType> {
        // holiday first: a holiday on a weekend is a Holiday
        if self.is_holiday(date).await? {
            return Ok(DayType::Holiday);
        }
        let weekend_days = self.weekend_days().await?;
        if weekend_days.contains(date.weekday()) {
            return Ok(DayType::Weekend);
        }
        Ok(DayType::Weekday)
    }

    async fn is_holiday(&self, date: NaiveDate) -> CocResult<bool> {
        Ok(self
            .calendar_repository
            .find_holiday_by_date(date)
            .await?
            .is_some())
    }

    async fn weekend_days(&self) -> CocResult<WeekendDays> {
        Ok(self.configuration.engine_config().await?.weekend_days)
    }

    async fn set_weekend_days(&self, days: WeekendDays) -> CocResult<()> {
        self.configuration
            .set_value(ConfigKey::WeekendDays, &days.to_indices())
            .await
    }

    async fn add_holiday(&self, request: NewHoliday) -> CocResult<Holiday> {
        let holiday = Holiday::new(
            Uuid::new_v4(),
            &request.name,
            request.date,
            request.holiday_type,
        )
        .map_err(|message| CocError::Validation {
            kind: coc_api::ValidationKind::BadValue,
            field: "name".to_string(),
            message: message.to_string(),
        })?;

        let created = self
            .calendar_repository
            .create_holiday(CalendarMapper::holiday_to_model(holiday))
            .await?;
        tracing::info!("holiday {} registered on {}", created.name, created.date);
        Ok(CalendarMapper::holiday_from_model(created))
    }

    async fn remove_holiday(&self, holiday_id: Uuid) -> CocResult<()> {
        if self
            .calendar_repository
            .find_holiday_by_id(holiday_id)
            .await?
            .is_none()
        {
            return Err(CocError::NotFound(format!("holiday {holiday_id}")));
        }
        self.calendar_repository.delete_holiday(holiday_id).await
    }

    async fn holidays_for_year(&self, year: i32) -> CocResult<Vec<Holiday>> {
        let models = self.calendar_repository.find_holidays_by_year(year).await?;
        Ok(models
            .into_iter()
            .map(CalendarMapper::holiday_from_model)
            .collect())
    }
}
