use async_trait::async_trait;
use chrono::NaiveDate;
use coc_api::CocResult;
use uuid::Uuid;

use crate::models::HolidayModel;

#[async_trait]
pub trait CalendarRepository: Send + Sync {
    async fn create_holiday(&self, holiday: HolidayModel) -> CocResult<HolidayModel>;

    async fn delete_holiday(&self, holiday_id: Uuid) -> CocResult<()>;

    async fn find_holiday_by_id(&self, holiday_id: Uuid) -> CocResult<Option<HolidayModel>>;

    /// Holidays are unique by date.
    async fn find_holiday_by_date(&self, date: NaiveDate) -> CocResult<Option<HolidayModel>>;

    async fn find_holidays_by_year(&self, year: i32) -> CocResult<Vec<HolidayModel>>;
}
