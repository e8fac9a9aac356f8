use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Months, NaiveDate};
use coc_api::{
    domain::Month,
    error::{CocError, CocResult},
    service::{CertificationRequest, CertificationService, Clock, ConfigurationService, IdentityProvider},
    views::{CertificationResult, RecoveryReport},
};
use coc_db::models::{
    BatchSource, BatchStatus, CertificateModel, CreditBatchModel, LedgerEntryModel,
    LedgerEntryType, LogStatus, OvertimeLogModel,
};
use coc_db::repository::{
    employee_scope, CertificateRepository, CreditBatchRepository, LedgerRepository, LockRepository,
    OvertimeLogRepository, UnitOfWork,
};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::constants::{LOCK_TTL, LOCK_WAIT_DEADLINE};

/// Certification: uncertified logs of one period become one active credit
/// batch, a ledger Credit and a certificate, as a single commit.
pub struct CertificationServiceImpl {
    overtime_log_repository: Arc<dyn OvertimeLogRepository>,
    credit_batch_repository: Arc<dyn CreditBatchRepository>,
    ledger_repository: Arc<dyn LedgerRepository>,
    certificate_repository: Arc<dyn CertificateRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
    lock_repository: Arc<dyn LockRepository>,
    configuration: Arc<dyn ConfigurationService>,
    clock: Arc<dyn Clock>,
    identity: Arc<dyn IdentityProvider>,
}

impl CertificationServiceImpl {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        overtime_log_repository: Arc<dyn OvertimeLogRepository>,
        credit_batch_repository: Arc<dyn CreditBatchRepository>,
        ledger_repository: Arc<dyn LedgerRepository>,
        certificate_repository: Arc<dyn CertificateRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
        lock_repository: Arc<dyn LockRepository>,
        configuration: Arc<dyn ConfigurationService>,
        clock: Arc<dyn Clock>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            overtime_log_repository,
            credit_batch_repository,
            ledger_repository,
            certificate_repository,
            unit_of_work,
            lock_repository,
            configuration,
            clock,
            identity,
        }
    }

    /// valid-until = issuance + validity months - 1 day.
    fn compute_valid_until(issuance: NaiveDate, validity_months: u32) -> CocResult<NaiveDate> {
        issuance
            .checked_add_months(Months::new(validity_months))
            .and_then(|date| date.pred_opt())
            .ok_or_else(|| CocError::Internal(format!("valid-until overflow from {issuance}")))
    }

    fn issuance_from_valid_until(valid_until: NaiveDate, validity_months: u32) -> CocResult<NaiveDate> {
        valid_until
            .succ_opt()
            .and_then(|date| date.checked_sub_months(Months::new(validity_months)))
            .ok_or_else(|| CocError::Internal(format!("issuance underflow from {valid_until}")))
    }

    fn actor(&self) -> HeaplessString<50> {
        HeaplessString::try_from(self.identity.current_user().as_str()).unwrap_or_default()
    }

    async fn certify_locked(
        &self,
        request: &CertificationRequest,
    ) -> CocResult<CertificationResult> {
        let config = self.configuration.engine_config().await?;
        let today = self.clock.today(config.time_zone);
        if request.date_of_issuance > today {
            return Err(CocError::FutureDateOfIssuance {
                date_of_issuance: request.date_of_issuance,
                today,
            });
        }

        if self
            .certificate_repository
            .find_by_period(&request.employee_id, request.month, request.year)
            .await?
            .is_some()
        {
            return Err(CocError::AlreadyCertified {
                employee_id: request.employee_id.clone(),
                month: request.month,
                year: request.year,
            });
        }

        let uncertified = self
            .overtime_log_repository
            .find_by_period_and_status(
                &request.employee_id,
                request.month,
                request.year,
                LogStatus::Uncertified,
            )
            .await?;
        if uncertified.is_empty() {
            return Err(CocError::PreconditionFailed(format!(
                "no uncertified logs for {} {} {}",
                request.employee_id, request.month, request.year
            )));
        }

        let valid_until =
            Self::compute_valid_until(request.date_of_issuance, config.certificate_validity_months)?;
        let total_hours: Decimal = uncertified.iter().map(|log| log.coc_earned).sum();
        let log_ids: Vec<i64> = uncertified.iter().map(|log| log.log_id).collect();

        let employee_id = uncertified[0].employee_id.clone();
        let certificate_id = Uuid::new_v4();
        let batch_id = Uuid::new_v4();
        let transaction_id = self.ledger_repository.reserve_transaction_ids(1).await?;
        let now = self.clock.now();
        let actor = self.actor();

        let batch = CreditBatchModel {
            batch_id,
            employee_id: employee_id.clone(),
            earned_month: request.month,
            earned_year: request.year,
            original_hours: total_hours,
            remaining_hours: total_hours,
            used_hours: Decimal::ZERO,
            status: BatchStatus::Active,
            date_of_issuance: request.date_of_issuance,
            valid_until,
            source: BatchSource::MonthlyCertificate,
            source_certificate_id: Some(certificate_id),
            notes: None,
        };
        let ledger_entry = LedgerEntryModel {
            transaction_id,
            employee_id: employee_id.clone(),
            entry_type: LedgerEntryType::Credit,
            hours: total_hours,
            batch_id: Some(batch_id),
            reference_id: Some(
                HeaplessString::try_from(certificate_id.to_string().as_str()).unwrap_or_default(),
            ),
            notes: HeaplessString::try_from(
                format!("COC certificate {} {}", request.month, request.year).as_str(),
            )
            .unwrap_or_default(),
            transaction_date: now,
            performed_by: actor.clone(),
        };
        let certificate = CertificateModel {
            certificate_id,
            employee_id,
            month: request.month,
            year: request.year,
            total_hours,
            date_of_issuance: request.date_of_issuance,
            valid_until,
            certified_by: actor,
            certified_at: now,
        };

        self.unit_of_work
            .commit_certification(&log_ids, valid_until, batch, ledger_entry, certificate)
            .await?;

        tracing::info!(
            "certified {} logs ({} h) for {} {} {}, valid until {}",
            log_ids.len(),
            total_hours,
            request.employee_id,
            request.month,
            request.year,
            valid_until
        );

        Ok(CertificationResult {
            certificate_id,
            batch_id,
            logs_certified: log_ids.len(),
            total_hours,
            valid_until,
        })
    }

    /// Complete one detected half-certified period: the batch, the ledger
    /// Credit and the certificate, whichever are missing, in that order.
    async fn complete_period(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
        logs: &[&OvertimeLogModel],
        report: &mut RecoveryReport,
    ) -> CocResult<()> {
        let config = self.configuration.engine_config().await?;
        let valid_until = logs
            .iter()
            .find_map(|log| log.valid_until)
            .ok_or_else(|| {
                CocError::Internal(format!(
                    "active logs for {employee_id} {month} {year} carry no valid-until"
                ))
            })?;
        let date_of_issuance =
            Self::issuance_from_valid_until(valid_until, config.certificate_validity_months)?;
        let total_hours: Decimal = logs.iter().map(|log| log.coc_earned).sum();

        let existing_batches = self
            .credit_batch_repository
            .find_by_period_and_source(employee_id, month, year, BatchSource::MonthlyCertificate)
            .await?;
        let (batch_id, certificate_id) = match existing_batches.first() {
            Some(batch) => (
                batch.batch_id,
                batch.source_certificate_id.unwrap_or_else(Uuid::new_v4),
            ),
            None => {
                let certificate_id = Uuid::new_v4();
                let batch = CreditBatchModel {
                    batch_id: Uuid::new_v4(),
                    employee_id: logs[0].employee_id.clone(),
                    earned_month: month,
                    earned_year: year,
                    original_hours: total_hours,
                    remaining_hours: total_hours,
                    used_hours: Decimal::ZERO,
                    status: BatchStatus::Active,
                    date_of_issuance,
                    valid_until,
                    source: BatchSource::MonthlyCertificate,
                    source_certificate_id: Some(certificate_id),
                    notes: None,
                };
                let batch_id = batch.batch_id;
                self.credit_batch_repository.create(batch).await?;
                report.batches_created += 1;
                (batch_id, certificate_id)
            }
        };

        let has_credit_entry = self
            .ledger_repository
            .find_by_batch(batch_id)
            .await?
            .iter()
            .any(|entry| entry.entry_type == LedgerEntryType::Credit);
        if !has_credit_entry {
            let transaction_id = self.ledger_repository.reserve_transaction_ids(1).await?;
            self.ledger_repository
                .append(LedgerEntryModel {
                    transaction_id,
                    employee_id: logs[0].employee_id.clone(),
                    entry_type: LedgerEntryType::Credit,
                    hours: total_hours,
                    batch_id: Some(batch_id),
                    reference_id: Some(
                        HeaplessString::try_from(certificate_id.to_string().as_str())
                            .unwrap_or_default(),
                    ),
                    notes: HeaplessString::try_from(
                        format!("recovered COC certificate {month} {year}").as_str(),
                    )
                    .unwrap_or_default(),
                    transaction_date: self.clock.now(),
                    performed_by: self.actor(),
                })
                .await?;
            report.ledger_entries_created += 1;
        }

        self.certificate_repository
            .create(CertificateModel {
                certificate_id,
                employee_id: logs[0].employee_id.clone(),
                month,
                year,
                total_hours,
                date_of_issuance,
                valid_until,
                certified_by: self.actor(),
                certified_at: self.clock.now(),
            })
            .await?;
        report.certificates_created += 1;
        report.periods_completed += 1;

        tracing::warn!(
            "recovered incomplete certification for {} {} {} ({} h)",
            employee_id,
            month,
            year,
            total_hours
        );
        Ok(())
    }
}

#[async_trait]
impl CertificationService for CertificationServiceImpl {
    async fn certify(&self, request: CertificationRequest) -> CocResult<CertificationResult> {
        if request.employee_id.trim().is_empty() {
            return Err(CocError::missing_field("employeeId"));
        }

        // one certification at a time per employee
        let token = self
            .lock_repository
            .acquire(
                &employee_scope(&request.employee_id),
                "certification",
                LOCK_TTL,
                LOCK_WAIT_DEADLINE,
            )
            .await?;
        let outcome = self.certify_locked(&request).await;
        if let Err(release_error) = self.lock_repository.release(token).await {
            tracing::warn!(
                "failed to release certification lock for {}: {release_error}",
                request.employee_id
            );
        }
        outcome
    }

    async fn recover_incomplete(&self) -> CocResult<RecoveryReport> {
        // a crash mid-commit leaves logs Active with no certificate; find
        // those periods and finish the chain
        let active_logs = self
            .overtime_log_repository
            .find_by_status(LogStatus::Active)
            .await?;

        let mut by_period: BTreeMap<(String, i32, Month), Vec<&OvertimeLogModel>> = BTreeMap::new();
        for log in &active_logs {
            by_period
                .entry((log.employee_id.to_string(), log.year, log.month))
                .or_default()
                .push(log);
        }

        let mut report = RecoveryReport {
            periods_completed: 0,
            batches_created: 0,
            ledger_entries_created: 0,
            certificates_created: 0,
        };

        for ((employee_id, year, month), logs) in &by_period {
            if self
                .certificate_repository
                .find_by_period(employee_id, *month, *year)
                .await?
                .is_some()
            {
                continue;
            }
            let token = self
                .lock_repository
                .acquire(&employee_scope(employee_id), "recovery", LOCK_TTL, LOCK_WAIT_DEADLINE)
                .await?;
            let outcome = self
                .complete_period(employee_id, *month, *year, logs, &mut report)
                .await;
            if let Err(release_error) = self.lock_repository.release(token).await {
                tracing::warn!("failed to release recovery lock for {employee_id}: {release_error}");
            }
            outcome?;
        }

        Ok(report)
    }
}
