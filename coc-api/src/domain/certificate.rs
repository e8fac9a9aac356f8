use chrono::{DateTime, NaiveDate, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The period-lock record a successful certification leaves behind.
/// Its existence makes `(employee_id, month, year)` immutable for the
/// overtime write path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    pub certificate_id: Uuid,
    pub employee_id: HeaplessString<20>,
    pub month: crate::domain::Month,
    pub year: i32,
    pub total_hours: Decimal,
    pub date_of_issuance: NaiveDate,
    pub valid_until: NaiveDate,
    pub certified_by: HeaplessString<50>,
    pub certified_at: DateTime<Utc>,
}
