use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One append-only journal row. Hours are signed: positive for Credit and
/// upward Adjustment, negative for Debit, Expiration and downward
/// Adjustment. Rows are never modified; corrections are new Adjustment rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub transaction_id: i64,
    pub employee_id: HeaplessString<20>,
    pub entry_type: LedgerEntryType,
    pub hours: Decimal,
    pub batch_id: Option<Uuid>,
    pub reference_id: Option<HeaplessString<100>>,
    pub notes: HeaplessString<200>,
    pub transaction_date: DateTime<Utc>,
    pub performed_by: HeaplessString<50>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEntryType {
    Credit,
    Debit,
    Adjustment,
    Expiration,
}

impl LedgerEntry {
    pub fn validate(&self) -> Result<(), &'static str> {
        match self.entry_type {
            LedgerEntryType::Credit if self.hours <= Decimal::ZERO => {
                Err("Credit entry must carry positive hours")
            }
            LedgerEntryType::Debit | LedgerEntryType::Expiration if self.hours >= Decimal::ZERO => {
                Err("Debit and Expiration entries must carry negative hours")
            }
            LedgerEntryType::Adjustment if self.hours.is_zero() => {
                Err("Adjustment entry cannot carry zero hours")
            }
            _ => Ok(()),
        }
    }
}
