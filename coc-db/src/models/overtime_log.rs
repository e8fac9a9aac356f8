use chrono::{DateTime, NaiveDate, Utc};
use coc_api::{CocError, CocResult, Month};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{bounded, bounded_opt};
use crate::store::collections::OVERTIME_LOGS;
use crate::store::{
    opt_date, opt_str, req_date, req_hours, req_i64, req_instant, req_str, Document, FieldValue,
};

pub mod fields {
    pub const LOG_ID: &str = "logId";
    pub const EMPLOYEE_ID: &str = "employeeId";
    pub const MONTH: &str = "month";
    pub const YEAR: &str = "year";
    pub const DATE_WORKED: &str = "dateWorked";
    pub const DAY_TYPE: &str = "dayType";
    pub const AM_IN: &str = "amIn";
    pub const AM_OUT: &str = "amOut";
    pub const PM_IN: &str = "pmIn";
    pub const PM_OUT: &str = "pmOut";
    pub const COC_EARNED: &str = "cocEarned";
    pub const STATUS: &str = "status";
    pub const LOGGED_BY: &str = "loggedBy";
    pub const LOGGED_AT: &str = "loggedAt";
    pub const VALID_UNTIL: &str = "validUntil";
    pub const CORRELATION_ID: &str = "correlationId";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeLogModel {
    pub log_id: i64,
    pub employee_id: HeaplessString<20>,
    pub month: Month,
    pub year: i32,
    pub date_worked: NaiveDate,
    pub day_type: DayType,
    pub am_in: Option<HeaplessString<8>>,
    pub am_out: Option<HeaplessString<8>>,
    pub pm_in: Option<HeaplessString<8>>,
    pub pm_out: Option<HeaplessString<8>>,
    pub coc_earned: Decimal,
    pub status: LogStatus,
    pub logged_by: HeaplessString<50>,
    pub logged_at: DateTime<Utc>,
    pub valid_until: Option<NaiveDate>,
    /// Batch-correlation id of the originating write; recovery uses it to
    /// distinguish partial batch writes.
    pub correlation_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogStatus {
    Uncertified,
    Active,
    Used,
    Expired,
}

impl LogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStatus::Uncertified => "Uncertified",
            LogStatus::Active => "Active",
            LogStatus::Used => "Used",
            LogStatus::Expired => "Expired",
        }
    }

    pub fn parse(raw: &str) -> Option<LogStatus> {
        match raw {
            "Uncertified" => Some(LogStatus::Uncertified),
            "Active" => Some(LogStatus::Active),
            "Used" => Some(LogStatus::Used),
            "Expired" => Some(LogStatus::Expired),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LogStatus::Used | LogStatus::Expired)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayType {
    Weekday,
    Weekend,
    Holiday,
}

impl DayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Weekday => "Weekday",
            DayType::Weekend => "Weekend",
            DayType::Holiday => "Holiday",
        }
    }

    pub fn parse(raw: &str) -> Option<DayType> {
        match raw {
            "Weekday" => Some(DayType::Weekday),
            "Weekend" => Some(DayType::Weekend),
            "Holiday" => Some(DayType::Holiday),
            _ => None,
        }
    }
}

fn drift(id: &str, field: &str) -> CocError {
    CocError::SchemaDrift {
        collection: OVERTIME_LOGS.to_string(),
        document_id: id.to_string(),
        field: field.to_string(),
    }
}

impl OvertimeLogModel {
    pub fn document_id(&self) -> String {
        self.log_id.to_string()
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(fields::LOG_ID.into(), FieldValue::Int(self.log_id));
        doc.insert(
            fields::EMPLOYEE_ID.into(),
            FieldValue::Str(self.employee_id.to_string()),
        );
        doc.insert(fields::MONTH.into(), FieldValue::Str(self.month.name().into()));
        doc.insert(fields::YEAR.into(), FieldValue::Int(self.year as i64));
        doc.insert(fields::DATE_WORKED.into(), FieldValue::from_date(self.date_worked));
        doc.insert(
            fields::DAY_TYPE.into(),
            FieldValue::Str(self.day_type.as_str().into()),
        );
        doc.insert(
            fields::AM_IN.into(),
            FieldValue::from_opt_str(self.am_in.as_ref().map(|s| s.as_str())),
        );
        doc.insert(
            fields::AM_OUT.into(),
            FieldValue::from_opt_str(self.am_out.as_ref().map(|s| s.as_str())),
        );
        doc.insert(
            fields::PM_IN.into(),
            FieldValue::from_opt_str(self.pm_in.as_ref().map(|s| s.as_str())),
        );
        doc.insert(
            fields::PM_OUT.into(),
            FieldValue::from_opt_str(self.pm_out.as_ref().map(|s| s.as_str())),
        );
        doc.insert(fields::COC_EARNED.into(), FieldValue::from_hours(self.coc_earned));
        doc.insert(fields::STATUS.into(), FieldValue::Str(self.status.as_str().into()));
        doc.insert(
            fields::LOGGED_BY.into(),
            FieldValue::Str(self.logged_by.to_string()),
        );
        doc.insert(fields::LOGGED_AT.into(), FieldValue::Timestamp(self.logged_at));
        doc.insert(
            fields::VALID_UNTIL.into(),
            match self.valid_until {
                Some(date) => FieldValue::from_date(date),
                None => FieldValue::Null,
            },
        );
        doc.insert(
            fields::CORRELATION_ID.into(),
            FieldValue::from_opt_str(self.correlation_id.map(|u| u.to_string()).as_deref()),
        );
        doc
    }

    pub fn from_document(id: &str, doc: &Document) -> CocResult<OvertimeLogModel> {
        let month_raw = req_str(doc, OVERTIME_LOGS, id, fields::MONTH)?;
        let month = Month::parse(&month_raw).ok_or_else(|| drift(id, fields::MONTH))?;
        let status_raw = req_str(doc, OVERTIME_LOGS, id, fields::STATUS)?;
        let status = LogStatus::parse(&status_raw).ok_or_else(|| drift(id, fields::STATUS))?;
        let day_type_raw = req_str(doc, OVERTIME_LOGS, id, fields::DAY_TYPE)?;
        let day_type = DayType::parse(&day_type_raw).ok_or_else(|| drift(id, fields::DAY_TYPE))?;
        let correlation_id = match opt_str(doc, fields::CORRELATION_ID) {
            Some(raw) => Some(
                raw.parse::<Uuid>()
                    .map_err(|_| drift(id, fields::CORRELATION_ID))?,
            ),
            None => None,
        };

        Ok(OvertimeLogModel {
            log_id: req_i64(doc, OVERTIME_LOGS, id, fields::LOG_ID)?,
            employee_id: bounded(
                OVERTIME_LOGS,
                id,
                fields::EMPLOYEE_ID,
                &req_str(doc, OVERTIME_LOGS, id, fields::EMPLOYEE_ID)?,
            )?,
            month,
            year: req_i64(doc, OVERTIME_LOGS, id, fields::YEAR)? as i32,
            date_worked: req_date(doc, OVERTIME_LOGS, id, fields::DATE_WORKED)?,
            day_type,
            am_in: bounded_opt(OVERTIME_LOGS, id, fields::AM_IN, opt_str(doc, fields::AM_IN))?,
            am_out: bounded_opt(OVERTIME_LOGS, id, fields::AM_OUT, opt_str(doc, fields::AM_OUT))?,
            pm_in: bounded_opt(OVERTIME_LOGS, id, fields::PM_IN, opt_str(doc, fields::PM_IN))?,
            pm_out: bounded_opt(OVERTIME_LOGS, id, fields::PM_OUT, opt_str(doc, fields::PM_OUT))?,
            coc_earned: req_hours(doc, OVERTIME_LOGS, id, fields::COC_EARNED)?,
            status,
            logged_by: bounded(
                OVERTIME_LOGS,
                id,
                fields::LOGGED_BY,
                &req_str(doc, OVERTIME_LOGS, id, fields::LOGGED_BY)?,
            )?,
            logged_at: req_instant(doc, OVERTIME_LOGS, id, fields::LOGGED_AT)?,
            valid_until: opt_date(doc, OVERTIME_LOGS, id, fields::VALID_UNTIL)?,
            correlation_id,
        })
    }
}
