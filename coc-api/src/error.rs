use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Month;

pub type CocResult<T> = Result<T, CocError>;

#[derive(Debug, Error, Serialize, Deserialize)]
pub enum CocError {
    // Input validation
    #[error("Validation error ({kind:?}) in {field}: {message}")]
    Validation {
        kind: ValidationKind,
        field: String,
        message: String,
    },

    // Entity lookups
    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    #[error("Overtime log not found: {0}")]
    LogNotFound(i64),

    #[error("Not found: {0}")]
    NotFound(String),

    // Conflicts
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Period {month} {year} already certified for employee {employee_id}")]
    AlreadyCertified {
        employee_id: String,
        month: Month,
        year: i32,
    },

    #[error("Period {month} {year} for employee {employee_id} is locked ({flavor:?})")]
    PeriodLocked {
        flavor: PeriodLockFlavor,
        employee_id: String,
        month: Month,
        year: i32,
    },

    // Cap enforcement
    #[error("Monthly cap exceeded: current {current}, new {delta}, limit {limit}")]
    MonthlyCapExceeded {
        current: Decimal,
        delta: Decimal,
        limit: Decimal,
    },

    #[error("Total cap exceeded: current {current}, new {delta}, limit {limit}")]
    TotalCapExceeded {
        current: Decimal,
        delta: Decimal,
        limit: Decimal,
    },

    // State guards
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Future date of issuance: {date_of_issuance} is after {today}")]
    FutureDateOfIssuance {
        date_of_issuance: NaiveDate,
        today: NaiveDate,
    },

    // Weekend configuration
    #[error("Invalid weekend days: {invalid_days:?} - indices must be between 0 (Sunday) and 6 (Saturday)")]
    InvalidWeekendDays { invalid_days: Vec<i32> },

    // Store transport
    #[error("Store unavailable: {details}")]
    StoreUnavailable { details: String },

    // Persisted row missing a required field
    #[error("Schema drift in {collection}/{document_id}: field {field}")]
    SchemaDrift {
        collection: String,
        document_id: String,
        field: String,
    },

    // Invariant violations
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationKind {
    MissingField,
    BadDate,
    BadTime,
    MonthMismatch,
    BadValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodLockFlavor {
    Historical,
    Certified,
}

impl CocError {
    pub fn missing_field(field: &str) -> Self {
        CocError::Validation {
            kind: ValidationKind::MissingField,
            field: field.to_string(),
            message: format!("{field} is required"),
        }
    }

    pub fn bad_date(field: &str, raw: &str) -> Self {
        CocError::Validation {
            kind: ValidationKind::BadDate,
            field: field.to_string(),
            message: format!("unparseable date: {raw}"),
        }
    }

    /// Retriable failures leave no partial state and may be resubmitted as-is.
    pub fn is_retriable(&self) -> bool {
        matches!(self, CocError::StoreUnavailable { .. })
    }
}

impl From<anyhow::Error> for CocError {
    fn from(err: anyhow::Error) -> Self {
        CocError::Internal(err.to_string())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CocError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CocError::Internal(err.to_string())
    }
}
