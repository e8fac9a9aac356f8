use chrono::NaiveDate;
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Month;

/// An immutable block of certified credits with an expiration date.
/// Only `remaining_hours`, `used_hours` and `status` ever change after
/// creation; batches are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditBatch {
    pub batch_id: Uuid,
    pub employee_id: HeaplessString<20>,
    pub earned_month: Month,
    pub earned_year: i32,
    pub original_hours: Decimal,
    pub remaining_hours: Decimal,
    pub used_hours: Decimal,
    pub status: BatchStatus,
    pub date_of_issuance: NaiveDate,
    pub valid_until: NaiveDate,
    pub source: BatchSource,
    pub source_certificate_id: Option<Uuid>,
    pub notes: Option<HeaplessString<200>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    Active,
    Used,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchSource {
    MonthlyCertificate,
    HistoricalImport,
}

impl CreditBatch {
    /// The bookkeeping invariants every persisted batch must satisfy.
    /// An Expired batch keeps its remaining hours on the record for audit.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.remaining_hours < Decimal::ZERO {
            return Err("Remaining hours cannot be negative");
        }
        if self.used_hours < Decimal::ZERO {
            return Err("Used hours cannot be negative");
        }
        if self.original_hours != self.remaining_hours + self.used_hours {
            return Err("Original hours must equal remaining plus used");
        }
        if self.status == BatchStatus::Used && !self.remaining_hours.is_zero() {
            return Err("Used batch must have zero remaining hours");
        }
        if self.status == BatchStatus::Active && self.remaining_hours.is_zero() {
            return Err("Active batch must have remaining hours");
        }
        Ok(())
    }

    pub fn is_debitable(&self, as_of: NaiveDate) -> bool {
        self.status == BatchStatus::Active && self.valid_until >= as_of
    }
}
