use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use coc_api::{
    domain::{CreditBatch, LedgerEntry},
    error::{CocError, CocResult},
    service::{
        Clock, ConfigurationService, CreditLedgerService, DebitRequest, HistoricalImportRequest,
        IdentityProvider,
    },
    views::{BalanceSummary, BatchDebit, DebitOutcome, ExpireSweepReport},
};
use coc_db::models::{
    BatchSource, BatchStatus, CreditBatchModel, LedgerEntryModel, LedgerEntryType, LogStatus,
};
use coc_db::repository::{
    employee_scope, BatchHoursUpdate, CreditBatchRepository, EmployeeRepository, LedgerRepository,
    LockRepository, LogStatusUpdate, OvertimeLogRepository, UnitOfWork,
};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::constants::{LOCK_TTL, LOCK_WAIT_DEADLINE};
use crate::mappers::{CreditBatchMapper, LedgerMapper};

/// The credit batch and ledger engine: historical imports, FIFO debits,
/// the expiry sweep and balance reads.
pub struct CreditLedgerServiceImpl {
    credit_batch_repository: Arc<dyn CreditBatchRepository>,
    ledger_repository: Arc<dyn LedgerRepository>,
    overtime_log_repository: Arc<dyn OvertimeLogRepository>,
    employee_repository: Arc<dyn EmployeeRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
    lock_repository: Arc<dyn LockRepository>,
    configuration: Arc<dyn ConfigurationService>,
    clock: Arc<dyn Clock>,
    identity: Arc<dyn IdentityProvider>,
}

impl CreditLedgerServiceImpl {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        credit_batch_repository: Arc<dyn CreditBatchRepository>,
        ledger_repository: Arc<dyn LedgerRepository>,
        overtime_log_repository: Arc<dyn OvertimeLogRepository>,
        employee_repository: Arc<dyn EmployeeRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
        lock_repository: Arc<dyn LockRepository>,
        configuration: Arc<dyn ConfigurationService>,
        clock: Arc<dyn Clock>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            credit_batch_repository,
            ledger_repository,
            overtime_log_repository,
            employee_repository,
            unit_of_work,
            lock_repository,
            configuration,
            clock,
            identity,
        }
    }

    fn actor(&self) -> HeaplessString<50> {
        HeaplessString::try_from(self.identity.current_user().as_str()).unwrap_or_default()
    }

    fn notes_field(raw: Option<&str>, fallback: &str) -> HeaplessString<200> {
        let text = raw.unwrap_or(fallback);
        match HeaplessString::try_from(text) {
            Ok(notes) => notes,
            Err(_) => {
                // keep whatever fits rather than reject the whole write
                let mut truncated = HeaplessString::new();
                for ch in text.chars() {
                    if truncated.push(ch).is_err() {
                        break;
                    }
                }
                truncated
            }
        }
    }

    /// Logs covered by an exhausted or expired certificate batch follow
    /// the batch's status. Historical batches cover no logs.
    async fn covered_log_updates(
        &self,
        batch: &CreditBatchModel,
        status: LogStatus,
    ) -> CocResult<Vec<LogStatusUpdate>> {
        if batch.source != BatchSource::MonthlyCertificate {
            return Ok(Vec::new());
        }
        let logs = self
            .overtime_log_repository
            .find_by_period_and_status(
                &batch.employee_id,
                batch.earned_month,
                batch.earned_year,
                LogStatus::Active,
            )
            .await?;
        Ok(logs
            .iter()
            .map(|log| LogStatusUpdate {
                log_id: log.log_id,
                status,
            })
            .collect())
    }

    async fn debit_locked(&self, request: &DebitRequest) -> CocResult<DebitOutcome> {
        let config = self.configuration.engine_config().await?;
        let today = self.clock.today(config.time_zone);

        // repository order is the FIFO order: valid-until, then issuance
        let batches: Vec<CreditBatchModel> = self
            .credit_batch_repository
            .find_by_employee_and_status(&request.employee_id, BatchStatus::Active)
            .await?
            .into_iter()
            .filter(|batch| batch.valid_until >= today)
            .collect();

        let available: Decimal = batches.iter().map(|batch| batch.remaining_hours).sum();
        if request.hours > available {
            return Err(CocError::PreconditionFailed(format!(
                "insufficient credits: requested {}, available {available}",
                request.hours
            )));
        }

        let mut remaining_to_debit = request.hours;
        let mut batch_updates: Vec<BatchHoursUpdate> = Vec::new();
        let mut debits: Vec<BatchDebit> = Vec::new();
        let mut log_updates: Vec<LogStatusUpdate> = Vec::new();
        let mut touched: Vec<(CreditBatchModel, Decimal)> = Vec::new();

        for batch in batches {
            if remaining_to_debit.is_zero() {
                break;
            }
            let consumed = batch.remaining_hours.min(remaining_to_debit);
            remaining_to_debit -= consumed;

            let new_remaining = batch.remaining_hours - consumed;
            let new_status = if new_remaining.is_zero() {
                BatchStatus::Used
            } else {
                BatchStatus::Active
            };
            if new_status == BatchStatus::Used {
                log_updates.extend(self.covered_log_updates(&batch, LogStatus::Used).await?);
            }
            batch_updates.push(BatchHoursUpdate {
                batch_id: batch.batch_id,
                remaining_hours: new_remaining,
                used_hours: batch.used_hours + consumed,
                status: new_status,
            });
            debits.push(BatchDebit {
                batch_id: batch.batch_id,
                hours_consumed: consumed,
            });
            touched.push((batch, consumed));
        }

        let first_transaction_id = self
            .ledger_repository
            .reserve_transaction_ids(touched.len())
            .await?;
        let now = self.clock.now();
        let actor = self.actor();
        let reference_id = match &request.reference_id {
            Some(reference) => Some(
                HeaplessString::try_from(reference.as_str()).map_err(|_| CocError::Validation {
                    kind: coc_api::ValidationKind::BadValue,
                    field: "referenceId".to_string(),
                    message: "referenceId exceeds maximum length of 100 characters".to_string(),
                })?,
            ),
            None => None,
        };

        let ledger_entries: Vec<LedgerEntryModel> = touched
            .iter()
            .enumerate()
            .map(|(offset, (batch, consumed))| LedgerEntryModel {
                transaction_id: first_transaction_id + offset as i64,
                employee_id: batch.employee_id.clone(),
                entry_type: LedgerEntryType::Debit,
                hours: -*consumed,
                batch_id: Some(batch.batch_id),
                reference_id: reference_id.clone(),
                notes: Self::notes_field(request.notes.as_deref(), "COC debit"),
                transaction_date: now,
                performed_by: actor.clone(),
            })
            .collect();

        self.unit_of_work
            .commit_debit(batch_updates, ledger_entries, log_updates)
            .await?;

        tracing::info!(
            "debited {} h from {} across {} batch(es)",
            request.hours,
            request.employee_id,
            debits.len()
        );

        Ok(DebitOutcome {
            total_debited: request.hours,
            debits,
        })
    }
}

#[async_trait]
impl CreditLedgerService for CreditLedgerServiceImpl {
    async fn create_historical_batch(
        &self,
        request: HistoricalImportRequest,
    ) -> CocResult<CreditBatch> {
        if request.hours <= Decimal::ZERO {
            return Err(CocError::Validation {
                kind: coc_api::ValidationKind::BadValue,
                field: "hours".to_string(),
                message: format!("historical import hours must be positive, got {}", request.hours),
            });
        }
        if request.valid_until < request.date_of_issuance {
            return Err(CocError::PreconditionFailed(format!(
                "valid-until {} precedes date of issuance {}",
                request.valid_until, request.date_of_issuance
            )));
        }
        let employee = self
            .employee_repository
            .find_by_id(&request.employee_id)
            .await?
            .ok_or_else(|| CocError::EmployeeNotFound(request.employee_id.clone()))?;

        // exactly one historical batch per (employee, month, year)
        let existing = self
            .credit_batch_repository
            .find_by_period_and_source(
                &request.employee_id,
                request.month,
                request.year,
                BatchSource::HistoricalImport,
            )
            .await?;
        if !existing.is_empty() {
            return Err(CocError::AlreadyExists(format!(
                "historical batch for {} {} {}",
                request.employee_id, request.month, request.year
            )));
        }

        let batch = CreditBatchModel {
            batch_id: Uuid::new_v4(),
            employee_id: employee.employee_id,
            earned_month: request.month,
            earned_year: request.year,
            original_hours: request.hours,
            remaining_hours: request.hours,
            used_hours: Decimal::ZERO,
            status: BatchStatus::Active,
            date_of_issuance: request.date_of_issuance,
            valid_until: request.valid_until,
            source: BatchSource::HistoricalImport,
            source_certificate_id: None,
            notes: Some(Self::notes_field(
                request.notes.as_deref(),
                "Historical balance import",
            )),
        };

        let transaction_id = self.ledger_repository.reserve_transaction_ids(1).await?;
        let ledger_entry = LedgerEntryModel {
            transaction_id,
            employee_id: batch.employee_id.clone(),
            entry_type: LedgerEntryType::Credit,
            hours: request.hours,
            batch_id: Some(batch.batch_id),
            reference_id: None,
            notes: Self::notes_field(None, "Historical balance import"),
            transaction_date: self.clock.now(),
            performed_by: self.actor(),
        };

        let domain_batch = CreditBatchMapper::from_model(batch.clone());
        self.unit_of_work
            .commit_historical_import(batch, ledger_entry)
            .await?;
        tracing::info!(
            "historical batch of {} h imported for {} {} {}",
            request.hours,
            request.employee_id,
            request.month,
            request.year
        );
        Ok(domain_batch)
    }

    async fn debit(&self, request: DebitRequest) -> CocResult<DebitOutcome> {
        if request.hours <= Decimal::ZERO {
            return Err(CocError::Validation {
                kind: coc_api::ValidationKind::BadValue,
                field: "hours".to_string(),
                message: format!("debit hours must be positive, got {}", request.hours),
            });
        }

        // serialized per employee so concurrent debits cannot overdraw
        let token = self
            .lock_repository
            .acquire(
                &employee_scope(&request.employee_id),
                "debit",
                LOCK_TTL,
                LOCK_WAIT_DEADLINE,
            )
            .await?;
        let outcome = self.debit_locked(&request).await;
        if let Err(release_error) = self.lock_repository.release(token).await {
            tracing::warn!(
                "failed to release debit lock for {}: {release_error}",
                request.employee_id
            );
        }
        outcome
    }

    async fn expire_sweep(&self, as_of: NaiveDate) -> CocResult<ExpireSweepReport> {
        let lapsed: Vec<CreditBatchModel> = self
            .credit_batch_repository
            .find_by_status(BatchStatus::Active)
            .await?
            .into_iter()
            .filter(|batch| batch.valid_until < as_of)
            .collect();

        let mut batches_expired = 0usize;
        let mut hours_forfeited = Decimal::ZERO;

        // one commit per batch; a failure mid-sweep leaves prior batches
        // correctly expired and the rest for the next run
        for batch in lapsed {
            let forfeited = batch.remaining_hours;
            let ledger_entry = if forfeited > Decimal::ZERO {
                let transaction_id = self.ledger_repository.reserve_transaction_ids(1).await?;
                Some(LedgerEntryModel {
                    transaction_id,
                    employee_id: batch.employee_id.clone(),
                    entry_type: LedgerEntryType::Expiration,
                    hours: -forfeited,
                    batch_id: Some(batch.batch_id),
                    reference_id: None,
                    notes: Self::notes_field(None, "COC validity lapsed"),
                    transaction_date: self.clock.now(),
                    performed_by: self.actor(),
                })
            } else {
                None
            };
            let log_updates = self.covered_log_updates(&batch, LogStatus::Expired).await?;

            self.unit_of_work
                .commit_expiration(batch.batch_id, ledger_entry, log_updates)
                .await?;

            batches_expired += 1;
            hours_forfeited += forfeited;
        }

        if batches_expired > 0 {
            tracing::info!(
                "expire sweep as of {as_of}: {batches_expired} batch(es), {hours_forfeited} h forfeited"
            );
        }
        Ok(ExpireSweepReport {
            as_of,
            batches_expired,
            hours_forfeited,
        })
    }

    async fn balance(&self, employee_id: &str, as_of: NaiveDate) -> CocResult<BalanceSummary> {
        let batches = self
            .credit_batch_repository
            .find_by_employee(employee_id)
            .await?;
        let uncertified_logs = self
            .overtime_log_repository
            .find_by_employee_and_status(employee_id, LogStatus::Uncertified)
            .await?;

        let active = batches
            .iter()
            .filter(|batch| batch.status == BatchStatus::Active && batch.valid_until >= as_of)
            .map(|batch| batch.remaining_hours)
            .sum();
        let uncertified: Decimal = uncertified_logs.iter().map(|log| log.coc_earned).sum();
        let used = batches.iter().map(|batch| batch.used_hours).sum();
        let expired = batches
            .iter()
            .filter(|batch| batch.status == BatchStatus::Expired)
            .map(|batch| batch.remaining_hours)
            .sum();
        let total_earned =
            batches.iter().map(|batch| batch.original_hours).sum::<Decimal>() + uncertified;

        Ok(BalanceSummary {
            active,
            uncertified,
            total_earned,
            used,
            expired,
        })
    }

    async fn batches_for_employee(&self, employee_id: &str) -> CocResult<Vec<CreditBatch>> {
        let models = self
            .credit_batch_repository
            .find_by_employee(employee_id)
            .await?;
        Ok(models.into_iter().map(CreditBatchMapper::from_model).collect())
    }

    async fn ledger_entries(&self, employee_id: &str) -> CocResult<Vec<LedgerEntry>> {
        let models = self.ledger_repository.find_by_employee(employee_id).await?;
        Ok(models.into_iter().map(LedgerMapper::from_model).collect())
    }
}
