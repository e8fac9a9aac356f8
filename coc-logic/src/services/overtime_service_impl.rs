use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use coc_api::{
    domain::{EngineConfig, LogStatus, Month, OvertimeLog, PunchTimes},
    error::{CocError, CocResult, PeriodLockFlavor},
    service::{
        Clock, ConfigurationService, IdentityProvider, OvertimeBatchRequest, OvertimeLogPatch,
        OvertimeLogService,
    },
    views::BatchLogResult,
};
use coc_db::models::{BatchSource, OvertimeLogModel};
use coc_db::repository::{
    CertificateRepository, CreditBatchRepository, EmployeeRepository, OvertimeLogRepository,
    PunchUpdate,
};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::accrual;
use crate::mappers::OvertimeLogMapper;
use crate::validation::{CalendarClassification, OvertimeValidation};

/// The batch overtime write path: the validation cascade, short-circuiting
/// on the first failure, then one atomic persist of the accepted entries.
pub struct OvertimeLogServiceImpl {
    overtime_log_repository: Arc<dyn OvertimeLogRepository>,
    employee_repository: Arc<dyn EmployeeRepository>,
    credit_batch_repository: Arc<dyn CreditBatchRepository>,
    certificate_repository: Arc<dyn CertificateRepository>,
    calendar_repository: Arc<dyn coc_db::repository::CalendarRepository>,
    configuration: Arc<dyn ConfigurationService>,
    clock: Arc<dyn Clock>,
    identity: Arc<dyn IdentityProvider>,
}

impl OvertimeLogServiceImpl {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        overtime_log_repository: Arc<dyn OvertimeLogRepository>,
        employee_repository: Arc<dyn EmployeeRepository>,
        credit_batch_repository: Arc<dyn CreditBatchRepository>,
        certificate_repository: Arc<dyn CertificateRepository>,
        calendar_repository: Arc<dyn coc_db::repository::CalendarRepository>,
        configuration: Arc<dyn ConfigurationService>,
        clock: Arc<dyn Clock>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            overtime_log_repository,
            employee_repository,
            credit_batch_repository,
            certificate_repository,
            calendar_repository,
            configuration,
            clock,
            identity,
        }
    }

    async fn check_period_locks(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
    ) -> CocResult<()> {
        let historical = self
            .credit_batch_repository
            .find_by_period_and_source(employee_id, month, year, BatchSource::HistoricalImport)
            .await?;
        if !historical.is_empty() {
            return Err(CocError::PeriodLocked {
                flavor: PeriodLockFlavor::Historical,
                employee_id: employee_id.to_string(),
                month,
                year,
            });
        }
        if self
            .certificate_repository
            .find_by_period(employee_id, month, year)
            .await?
            .is_some()
        {
            return Err(CocError::PeriodLocked {
                flavor: PeriodLockFlavor::Certified,
                employee_id: employee_id.to_string(),
                month,
                year,
            });
        }
        Ok(())
    }

    /// Active certified credits still inside their validity window.
    async fn active_credits(&self, employee_id: &str, as_of: NaiveDate) -> CocResult<Decimal> {
        let batches = self
            .credit_batch_repository
            .find_by_employee_and_status(employee_id, coc_db::models::BatchStatus::Active)
            .await?;
        Ok(batches
            .iter()
            .filter(|batch| batch.valid_until >= as_of)
            .map(|batch| batch.remaining_hours)
            .sum())
    }

    /// Uncertified credits across every period; they count against the
    /// total cap before certification.
    async fn uncertified_credits(&self, employee_id: &str) -> CocResult<Decimal> {
        let logs = self
            .overtime_log_repository
            .find_by_employee_and_status(employee_id, coc_db::models::LogStatus::Uncertified)
            .await?;
        Ok(logs.iter().map(|log| log.coc_earned).sum())
    }

    fn punches_from_entry(entry: &coc_api::OvertimeEntryInput) -> CocResult<PunchTimes> {
        // a punch longer than "12:59 PM" cannot be valid; it earns nothing
        // rather than failing the batch, like any other unparseable punch
        fn usable(raw: &Option<String>) -> Option<&str> {
            raw.as_deref().map(str::trim).filter(|s| s.len() <= 8)
        }
        PunchTimes::from_strs(
            usable(&entry.am_in),
            usable(&entry.am_out),
            usable(&entry.pm_in),
            usable(&entry.pm_out),
        )
        .map_err(|message| CocError::Validation {
            kind: coc_api::ValidationKind::BadTime,
            field: "punches".to_string(),
            message: message.to_string(),
        })
    }

    async fn monthly_cap_check(
        &self,
        period_logs: &[OvertimeLogModel],
        batch_total: Decimal,
        config: &EngineConfig,
    ) -> CocResult<()> {
        let existing_month_total: Decimal = period_logs
            .iter()
            .filter(|log| !log.status.is_terminal())
            .map(|log| log.coc_earned)
            .sum();
        if existing_month_total + batch_total > config.monthly_cap {
            return Err(CocError::MonthlyCapExceeded {
                current: existing_month_total,
                delta: batch_total,
                limit: config.monthly_cap,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl OvertimeLogService for OvertimeLogServiceImpl {
    async fn log_batch(&self, request: OvertimeBatchRequest) -> CocResult<BatchLogResult> {
        // 1. schema
        let parsed_dates = OvertimeValidation::validate_request_shape(&request)?;

        // 2. employee exists, any status
        self.employee_repository
            .find_by_id(&request.employee_id)
            .await?
            .ok_or_else(|| CocError::EmployeeNotFound(request.employee_id.clone()))?;

        // 3-4. period locks
        self.check_period_locks(&request.employee_id, request.month, request.year)
            .await?;

        // 5. pre-fetch: existing dates, holiday set, weekend config
        let config = self.configuration.engine_config().await?;
        let period_logs = self
            .overtime_log_repository
            .find_by_period(&request.employee_id, request.month, request.year)
            .await?;
        let existing_dates: HashSet<NaiveDate> = period_logs
            .iter()
            .filter(|log| !log.status.is_terminal())
            .map(|log| log.date_worked)
            .collect();
        let holiday_dates: HashSet<NaiveDate> = self
            .calendar_repository
            .find_holidays_by_year(request.year)
            .await?
            .iter()
            .map(|holiday| holiday.date)
            .collect();

        // 6. per-entry, input order
        let mut accepted: Vec<(NaiveDate, PunchTimes, coc_api::DayType, Decimal)> = Vec::new();
        let mut accepted_dates: HashSet<NaiveDate> = HashSet::new();
        let mut skipped_duplicates: Vec<NaiveDate> = Vec::new();
        let mut batch_total = Decimal::ZERO;

        for (entry, date) in request.entries.iter().zip(parsed_dates) {
            OvertimeValidation::validate_date_in_period(date, request.month, request.year)?;

            if existing_dates.contains(&date) || accepted_dates.contains(&date) {
                skipped_duplicates.push(date);
                continue;
            }

            let day_type =
                CalendarClassification::classify(date, &holiday_dates, &config.weekend_days);
            let punches = Self::punches_from_entry(entry)?;
            let earned = accrual::credit_hours(day_type, &punches);

            batch_total += earned;
            accepted_dates.insert(date);
            accepted.push((date, punches, day_type, earned));
        }

        if accepted.is_empty() {
            return Err(CocError::Validation {
                kind: coc_api::ValidationKind::MissingField,
                field: "entries".to_string(),
                message: "no entries left to log after duplicate skip".to_string(),
            });
        }

        // 7. monthly cap
        self.monthly_cap_check(&period_logs, batch_total, &config)
            .await?;

        // 8. total cap
        let today = self.clock.today(config.time_zone);
        let active = self.active_credits(&request.employee_id, today).await?;
        let uncertified = self.uncertified_credits(&request.employee_id).await?;
        if active + uncertified + batch_total > config.total_cap {
            return Err(CocError::TotalCapExceeded {
                current: active + uncertified,
                delta: batch_total,
                limit: config.total_cap,
            });
        }

        // persist accepted entries as one correlated batch
        let correlation_id = request.correlation_id.unwrap_or_else(Uuid::new_v4);
        let first_id = self
            .overtime_log_repository
            .reserve_log_ids(accepted.len())
            .await?;
        let employee_id: HeaplessString<20> = HeaplessString::try_from(request.employee_id.as_str())
            .map_err(|_| CocError::Validation {
                kind: coc_api::ValidationKind::BadValue,
                field: "employeeId".to_string(),
                message: "employeeId exceeds maximum length of 20 characters".to_string(),
            })?;
        let logged_by = HeaplessString::try_from(self.identity.current_user().as_str())
            .unwrap_or_default();
        let logged_at = self.clock.now();

        let models: Vec<OvertimeLogModel> = accepted
            .iter()
            .enumerate()
            .map(|(offset, (date, punches, day_type, earned))| OvertimeLogModel {
                log_id: first_id + offset as i64,
                employee_id: employee_id.clone(),
                month: request.month,
                year: request.year,
                date_worked: *date,
                day_type: OvertimeLogMapper::day_type_to_model(*day_type),
                am_in: punches.am_in.clone(),
                am_out: punches.am_out.clone(),
                pm_in: punches.pm_in.clone(),
                pm_out: punches.pm_out.clone(),
                coc_earned: *earned,
                status: coc_db::models::LogStatus::Uncertified,
                logged_by: logged_by.clone(),
                logged_at,
                valid_until: None,
                correlation_id: Some(correlation_id),
            })
            .collect();

        let entries_logged = self.overtime_log_repository.create_many(models).await?;

        if !skipped_duplicates.is_empty() {
            tracing::warn!(
                "batch {} for {} skipped {} duplicate date(s)",
                correlation_id,
                request.employee_id,
                skipped_duplicates.len()
            );
        }
        tracing::info!(
            "logged {} overtime entr{} ({} h) for {} {} {}",
            entries_logged,
            if entries_logged == 1 { "y" } else { "ies" },
            batch_total,
            request.employee_id,
            request.month,
            request.year
        );

        Ok(BatchLogResult {
            entries_logged,
            total_credit_hours: batch_total,
            skipped_duplicates,
            correlation_id,
        })
    }

    async fn get_log(&self, log_id: i64) -> CocResult<OvertimeLog> {
        let model = self
            .overtime_log_repository
            .find_by_id(log_id)
            .await?
            .ok_or(CocError::LogNotFound(log_id))?;
        Ok(OvertimeLogMapper::from_model(model))
    }

    async fn update_log(&self, log_id: i64, patch: OvertimeLogPatch) -> CocResult<OvertimeLog> {
        let model = self
            .overtime_log_repository
            .find_by_id(log_id)
            .await?
            .ok_or(CocError::LogNotFound(log_id))?;
        if model.status != coc_db::models::LogStatus::Uncertified {
            return Err(CocError::PreconditionFailed(format!(
                "log {log_id} is {} and can no longer be edited",
                model.status.as_str()
            )));
        }
        let Some(punches) = patch.punches else {
            return Ok(OvertimeLogMapper::from_model(model));
        };

        // reclassify and re-earn under the current calendar, then re-check
        // the monthly cap with the old figure swapped out
        let config = self.configuration.engine_config().await?;
        let holiday_dates: HashSet<NaiveDate> = self
            .calendar_repository
            .find_holidays_by_year(model.year)
            .await?
            .iter()
            .map(|holiday| holiday.date)
            .collect();
        let day_type = CalendarClassification::classify(
            model.date_worked,
            &holiday_dates,
            &config.weekend_days,
        );
        let earned = accrual::credit_hours(day_type, &punches);

        let period_logs = self
            .overtime_log_repository
            .find_by_period(&model.employee_id, model.month, model.year)
            .await?;
        let other_total: Decimal = period_logs
            .iter()
            .filter(|log| log.log_id != log_id && !log.status.is_terminal())
            .map(|log| log.coc_earned)
            .sum();
        if other_total + earned > config.monthly_cap {
            return Err(CocError::MonthlyCapExceeded {
                current: other_total,
                delta: earned,
                limit: config.monthly_cap,
            });
        }

        self.overtime_log_repository
            .update_punch_result(
                log_id,
                PunchUpdate {
                    am_in: punches.am_in.as_ref().map(|s| s.to_string()),
                    am_out: punches.am_out.as_ref().map(|s| s.to_string()),
                    pm_in: punches.pm_in.as_ref().map(|s| s.to_string()),
                    pm_out: punches.pm_out.as_ref().map(|s| s.to_string()),
                    day_type: OvertimeLogMapper::day_type_to_model(day_type),
                    coc_earned: earned,
                },
            )
            .await?;

        let updated = self
            .overtime_log_repository
            .find_by_id(log_id)
            .await?
            .ok_or(CocError::LogNotFound(log_id))?;
        Ok(OvertimeLogMapper::from_model(updated))
    }

    async fn delete_log(&self, log_id: i64) -> CocResult<()> {
        let model = self
            .overtime_log_repository
            .find_by_id(log_id)
            .await?
            .ok_or(CocError::LogNotFound(log_id))?;
        if model.status != coc_db::models::LogStatus::Uncertified {
            return Err(CocError::PreconditionFailed(format!(
                "log {log_id} is {} and cannot be deleted",
                model.status.as_str()
            )));
        }
        self.overtime_log_repository.delete(log_id).await
    }

    async fn logs_for_employee(&self, employee_id: &str) -> CocResult<Vec<OvertimeLog>> {
        let models = self
            .overtime_log_repository
            .find_by_employee(employee_id)
            .await?;
        Ok(models.into_iter().map(OvertimeLogMapper::from_model).collect())
    }

    async fn logs_for_period(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
    ) -> CocResult<Vec<OvertimeLog>> {
        let models = self
            .overtime_log_repository
            .find_by_period(employee_id, month, year)
            .await?;
        Ok(models.into_iter().map(OvertimeLogMapper::from_model).collect())
    }

    async fn logs_by_status(&self, status: LogStatus) -> CocResult<Vec<OvertimeLog>> {
        let models = self
            .overtime_log_repository
            .find_by_status(OvertimeLogMapper::status_to_model(status))
            .await?;
        Ok(models.into_iter().map(OvertimeLogMapper::from_model).collect())
    }

    async fn uncertified_month_total(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
    ) -> CocResult<Decimal> {
        let logs = self
            .overtime_log_repository
            .find_by_period_and_status(
                employee_id,
                month,
                year,
                coc_db::models::LogStatus::Uncertified,
            )
            .await?;
        Ok(logs.iter().map(|log| log.coc_earned).sum())
    }
}
