use async_trait::async_trait;
use coc_api::{CocResult, Month};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{DayType, LogStatus, OvertimeLogModel};

#[async_trait]
pub trait OvertimeLogRepository: Send + Sync {
    /// Reserve `count` consecutive log ids and return the first. Fresh ids
    /// are strictly greater than any existing log id, safe under
    /// concurrent writers.
    async fn reserve_log_ids(&self, count: usize) -> CocResult<i64>;

    /// Persist a batch of logs atomically, verifying the write landed
    /// (read-back by correlation id) and rolling forward on partial
    /// failure. Returns the verified count.
    async fn create_many(&self, logs: Vec<OvertimeLogModel>) -> CocResult<usize>;

    async fn find_by_id(&self, log_id: i64) -> CocResult<Option<OvertimeLogModel>>;

    /// Replace punches and the derived classification/credit of one log.
    async fn update_punch_result(&self, log_id: i64, update: PunchUpdate) -> CocResult<()>;

    async fn delete(&self, log_id: i64) -> CocResult<()>;

    async fn find_by_employee(&self, employee_id: &str) -> CocResult<Vec<OvertimeLogModel>>;

    async fn find_by_period(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
    ) -> CocResult<Vec<OvertimeLogModel>>;

    async fn find_by_period_and_status(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
        status: LogStatus,
    ) -> CocResult<Vec<OvertimeLogModel>>;

    async fn find_by_status(&self, status: LogStatus) -> CocResult<Vec<OvertimeLogModel>>;

    async fn find_by_employee_and_status(
        &self,
        employee_id: &str,
        status: LogStatus,
    ) -> CocResult<Vec<OvertimeLogModel>>;

    async fn find_by_correlation(&self, correlation_id: Uuid) -> CocResult<Vec<OvertimeLogModel>>;
}

#[derive(Debug, Clone)]
pub struct PunchUpdate {
    pub am_in: Option<String>,
    pub am_out: Option<String>,
    pub pm_in: Option<String>,
    pub pm_out: Option<String>,
    pub day_type: DayType,
    pub coc_earned: Decimal,
}
