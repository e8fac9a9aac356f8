use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DayType, LogStatus, Month, PunchTimes};

/// Outcome of a successful batch overtime write. Skipped duplicates are
/// part of the success payload, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchLogResult {
    pub entries_logged: usize,
    pub total_credit_hours: Decimal,
    pub skipped_duplicates: Vec<NaiveDate>,
    pub correlation_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificationResult {
    pub certificate_id: Uuid,
    pub batch_id: Uuid,
    pub logs_certified: usize,
    pub total_hours: Decimal,
    pub valid_until: NaiveDate,
}

/// One batch touched by a debit, FIFO order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchDebit {
    pub batch_id: Uuid,
    pub hours_consumed: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebitOutcome {
    pub debits: Vec<BatchDebit>,
    pub total_debited: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub active: Decimal,
    pub uncertified: Decimal,
    pub total_earned: Decimal,
    pub used: Decimal,
    pub expired: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpireSweepReport {
    pub as_of: NaiveDate,
    pub batches_expired: usize,
    pub hours_forfeited: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryReport {
    pub periods_completed: usize,
    pub batches_created: usize,
    pub ledger_entries_created: usize,
    pub certificates_created: usize,
}

/// Combined batch-and-log history for one employee, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeLedgerView {
    pub employee_id: String,
    pub active_balance: Decimal,
    pub uncertified_balance: Decimal,
    pub total_earned: Decimal,
    pub used_credits: Decimal,
    pub rows: Vec<LedgerRow>,
}

/// One row of the detailed ledger. Log rows carry punches and day type;
/// historical batch rows carry used/remaining instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRow {
    pub month: Month,
    pub year: i32,
    pub date: Option<NaiveDate>,
    pub day_type: Option<DayType>,
    pub punches: Option<PunchTimes>,
    pub earned: Decimal,
    pub used: Option<Decimal>,
    pub remaining: Option<Decimal>,
    pub date_of_issuance: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub status: LogStatus,
    pub is_historical: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UncertifiedStats {
    pub total_hours: Decimal,
    pub log_count: usize,
    pub employee_count: usize,
    pub oldest_date: Option<NaiveDate>,
}

/// An uncertified log joined with its employee's display name in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UncertifiedLogRow {
    pub log_id: i64,
    pub employee_id: String,
    pub employee_name: Option<String>,
    pub date_worked: NaiveDate,
    pub day_type: DayType,
    pub coc_earned: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertifiedMonth {
    pub month: Month,
    pub certificate_id: Uuid,
    pub date_of_issuance: NaiveDate,
}

/// Cap headroom for one (employee, month, year).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditProgress {
    pub monthly_total: Decimal,
    pub monthly_cap: Decimal,
    pub monthly_remaining: Decimal,
    pub combined_balance: Decimal,
    pub total_cap: Decimal,
    pub total_remaining: Decimal,
}
