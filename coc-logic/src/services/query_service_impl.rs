use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use coc_api::{
    domain::{LogStatus, Month, PunchTimes},
    error::CocResult,
    service::{Clock, ConfigurationService, LedgerQueryService},
    views::{
        CertifiedMonth, CreditProgress, EmployeeLedgerView, LedgerRow, UncertifiedLogRow,
        UncertifiedStats,
    },
};
use coc_db::models::{BatchSource, BatchStatus, CreditBatchModel, OvertimeLogModel};
use coc_db::repository::{
    CertificateRepository, CreditBatchRepository, EmployeeRepository, OvertimeLogRepository,
};
use rust_decimal::Decimal;

use crate::mappers::OvertimeLogMapper;

/// Read-side composition over the log store and the batch ledger. Every
/// query pushes known equality predicates to the store; joins happen in
/// memory over the fetched sets.
pub struct LedgerQueryServiceImpl {
    overtime_log_repository: Arc<dyn OvertimeLogRepository>,
    credit_batch_repository: Arc<dyn CreditBatchRepository>,
    certificate_repository: Arc<dyn CertificateRepository>,
    employee_repository: Arc<dyn EmployeeRepository>,
    configuration: Arc<dyn ConfigurationService>,
    clock: Arc<dyn Clock>,
}

impl LedgerQueryServiceImpl {
    pub fn new(
        overtime_log_repository: Arc<dyn OvertimeLogRepository>,
        credit_batch_repository: Arc<dyn CreditBatchRepository>,
        certificate_repository: Arc<dyn CertificateRepository>,
        employee_repository: Arc<dyn EmployeeRepository>,
        configuration: Arc<dyn ConfigurationService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            overtime_log_repository,
            credit_batch_repository,
            certificate_repository,
            employee_repository,
            configuration,
            clock,
        }
    }

    fn log_row(log: &OvertimeLogModel, batches: &[CreditBatchModel]) -> LedgerRow {
        // the issuing batch for a certified log, matched in memory from the
        // already-fetched set
        let issuing_batch = batches.iter().find(|batch| {
            batch.source == BatchSource::MonthlyCertificate
                && batch.earned_month == log.month
                && batch.earned_year == log.year
        });
        LedgerRow {
            month: log.month,
            year: log.year,
            date: Some(log.date_worked),
            day_type: Some(OvertimeLogMapper::day_type_from_model(log.day_type)),
            punches: Some(PunchTimes {
                am_in: log.am_in.clone(),
                am_out: log.am_out.clone(),
                pm_in: log.pm_in.clone(),
                pm_out: log.pm_out.clone(),
            }),
            earned: log.coc_earned,
            used: None,
            remaining: None,
            date_of_issuance: issuing_batch.map(|batch| batch.date_of_issuance),
            valid_until: log.valid_until,
            status: OvertimeLogMapper::status_from_model(log.status),
            is_historical: false,
        }
    }

    fn historical_row(batch: &CreditBatchModel) -> LedgerRow {
        let status = match batch.status {
            BatchStatus::Active => LogStatus::Active,
            BatchStatus::Used => LogStatus::Used,
            BatchStatus::Expired => LogStatus::Expired,
        };
        LedgerRow {
            month: batch.earned_month,
            year: batch.earned_year,
            date: None,
            day_type: None,
            punches: None,
            earned: batch.original_hours,
            used: Some(batch.used_hours),
            remaining: Some(batch.remaining_hours),
            date_of_issuance: Some(batch.date_of_issuance),
            valid_until: Some(batch.valid_until),
            status,
            is_historical: true,
        }
    }

    /// Sort key: a log row by its date worked, a historical row by its
    /// issuance date.
    fn row_date(row: &LedgerRow) -> NaiveDate {
        row.date
            .or(row.date_of_issuance)
            .unwrap_or(NaiveDate::MIN)
    }
}

#[async_trait]
impl LedgerQueryService for LedgerQueryServiceImpl {
    async fn employee_detailed_ledger(&self, employee_id: &str) -> CocResult<EmployeeLedgerView> {
        // the two permitted store queries
        let batches = self
            .credit_batch_repository
            .find_by_employee(employee_id)
            .await?;
        let logs = self
            .overtime_log_repository
            .find_by_employee(employee_id)
            .await?;

        let config = self.configuration.engine_config().await?;
        let today = self.clock.today(config.time_zone);

        let active_balance: Decimal = batches
            .iter()
            .filter(|batch| batch.status == BatchStatus::Active && batch.valid_until >= today)
            .map(|batch| batch.remaining_hours)
            .sum();
        let uncertified_balance: Decimal = logs
            .iter()
            .filter(|log| log.status == coc_db::models::LogStatus::Uncertified)
            .map(|log| log.coc_earned)
            .sum();
        let used_credits: Decimal = batches.iter().map(|batch| batch.used_hours).sum();
        let total_earned =
            batches.iter().map(|batch| batch.original_hours).sum::<Decimal>() + uncertified_balance;

        let mut rows: Vec<LedgerRow> = batches
            .iter()
            .filter(|batch| batch.source == BatchSource::HistoricalImport)
            .map(Self::historical_row)
            .chain(logs.iter().map(|log| Self::log_row(log, &batches)))
            .collect();
        rows.sort_by_key(|row| std::cmp::Reverse(Self::row_date(row)));

        Ok(EmployeeLedgerView {
            employee_id: employee_id.to_string(),
            active_balance,
            uncertified_balance,
            total_earned,
            used_credits,
            rows,
        })
    }

    async fn uncertified_stats(&self) -> CocResult<UncertifiedStats> {
        let logs = self
            .overtime_log_repository
            .find_by_status(coc_db::models::LogStatus::Uncertified)
            .await?;

        let total_hours: Decimal = logs.iter().map(|log| log.coc_earned).sum();
        let employees: HashSet<&str> = logs.iter().map(|log| log.employee_id.as_str()).collect();
        let oldest_date = logs.iter().map(|log| log.date_worked).min();

        Ok(UncertifiedStats {
            total_hours,
            log_count: logs.len(),
            employee_count: employees.len(),
            oldest_date,
        })
    }

    async fn uncertified_logs_with_employees(&self) -> CocResult<Vec<UncertifiedLogRow>> {
        // one query for the logs, one for active employees, joined here;
        // never a per-row employee fetch
        let logs = self
            .overtime_log_repository
            .find_by_status(coc_db::models::LogStatus::Uncertified)
            .await?;
        let employees = self
            .employee_repository
            .find_by_status(coc_db::models::EmployeeStatus::Active)
            .await?;

        let names: HashMap<String, String> = employees
            .iter()
            .map(|employee| {
                (
                    employee.employee_id.to_string(),
                    format!("{}, {}", employee.last_name, employee.first_name),
                )
            })
            .collect();

        Ok(logs
            .iter()
            .map(|log| UncertifiedLogRow {
                log_id: log.log_id,
                employee_id: log.employee_id.to_string(),
                employee_name: names.get(log.employee_id.as_str()).cloned(),
                date_worked: log.date_worked,
                day_type: OvertimeLogMapper::day_type_from_model(log.day_type),
                coc_earned: log.coc_earned,
            })
            .collect())
    }

    async fn certified_months(
        &self,
        employee_id: &str,
        year: i32,
    ) -> CocResult<Vec<CertifiedMonth>> {
        let certificates = self
            .certificate_repository
            .find_by_employee_and_year(employee_id, year)
            .await?;
        Ok(certificates
            .iter()
            .map(|certificate| CertifiedMonth {
                month: certificate.month,
                certificate_id: certificate.certificate_id,
                date_of_issuance: certificate.date_of_issuance,
            })
            .collect())
    }

    async fn credit_progress(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
    ) -> CocResult<CreditProgress> {
        let config = self.configuration.engine_config().await?;
        let today = self.clock.today(config.time_zone);

        let period_logs = self
            .overtime_log_repository
            .find_by_period(employee_id, month, year)
            .await?;
        let monthly_total: Decimal = period_logs
            .iter()
            .filter(|log| !log.status.is_terminal())
            .map(|log| log.coc_earned)
            .sum();

        let active: Decimal = self
            .credit_batch_repository
            .find_by_employee_and_status(employee_id, BatchStatus::Active)
            .await?
            .iter()
            .filter(|batch| batch.valid_until >= today)
            .map(|batch| batch.remaining_hours)
            .sum();
        let uncertified: Decimal = self
            .overtime_log_repository
            .find_by_employee_and_status(employee_id, coc_db::models::LogStatus::Uncertified)
            .await?
            .iter()
            .map(|log| log.coc_earned)
            .sum();
        let combined_balance = active + uncertified;

        Ok(CreditProgress {
            monthly_total,
            monthly_cap: config.monthly_cap,
            monthly_remaining: (config.monthly_cap - monthly_total).max(Decimal::ZERO),
            combined_balance,
            total_cap: config.total_cap,
            total_remaining: (config.total_cap - combined_balance).max(Decimal::ZERO),
        })
    }
}
