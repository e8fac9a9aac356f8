use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{DayType, Holiday, HolidayType, WeekendDays},
    error::CocResult,
};

#[async_trait]
pub trait CalendarService: Send + Sync {
    /// Classify a date. Holidays win over weekends.
    async fn day_type(&self, date: NaiveDate) -> CocResult<DayType>;

    async fn is_holiday(&self, date: NaiveDate) -> CocResult<bool>;

    /// Currently configured weekend-day set.
    async fn weekend_days(&self) -> CocResult<WeekendDays>;

    async fn set_weekend_days(&self, days: WeekendDays) -> CocResult<()>;

    /// Register a holiday; the date must not already carry one.
    async fn add_holiday(&self, request: NewHoliday) -> CocResult<Holiday>;

    async fn remove_holiday(&self, holiday_id: Uuid) -> CocResult<()>;

    async fn holidays_for_year(&self, year: i32) -> CocResult<Vec<Holiday>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHoliday {
    pub name: String,
    pub date: NaiveDate,
    pub holiday_type: HolidayType,
}
