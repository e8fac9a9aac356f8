use chrono::{DateTime, NaiveDate, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{DayType, Month};

/// One day of logged overtime for one employee. `(employee_id, date_worked)`
/// is unique across all non-terminal states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeLog {
    pub log_id: i64,
    pub employee_id: HeaplessString<20>,
    pub month: Month,
    pub year: i32,
    pub date_worked: NaiveDate,
    pub day_type: DayType,
    pub punches: PunchTimes,
    pub coc_earned: Decimal,
    pub status: LogStatus,
    pub logged_by: HeaplessString<50>,
    pub logged_at: DateTime<Utc>,
    /// None iff status = Uncertified; set for every log a certificate covers.
    pub valid_until: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogStatus {
    Uncertified,
    Active,
    Used,
    Expired,
}

impl LogStatus {
    /// Terminal logs no longer count toward caps or duplicate detection.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LogStatus::Used | LogStatus::Expired)
    }
}

impl OvertimeLog {
    pub fn validate(&self) -> Result<(), &'static str> {
        if Month::of(self.date_worked) != self.month {
            return Err("Month does not match date worked");
        }
        if chrono::Datelike::year(&self.date_worked) != self.year {
            return Err("Year does not match date worked");
        }
        if self.coc_earned < Decimal::ZERO {
            return Err("Earned credit cannot be negative");
        }
        match (self.status, self.valid_until) {
            (LogStatus::Uncertified, Some(_)) => Err("Uncertified log cannot carry valid-until"),
            (LogStatus::Uncertified, None) => Ok(()),
            (_, None) => Err("Certified log must carry valid-until"),
            (_, Some(_)) => Ok(()),
        }
    }
}

/// The four raw punch strings for a day, kept verbatim as entered
/// ("H:MM AM"). Parsing to minutes happens in the accrual rule engine;
/// an unparseable punch contributes zero, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchTimes {
    pub am_in: Option<HeaplessString<8>>,
    pub am_out: Option<HeaplessString<8>>,
    pub pm_in: Option<HeaplessString<8>>,
    pub pm_out: Option<HeaplessString<8>>,
}

impl PunchTimes {
    pub fn from_strs(
        am_in: Option<&str>,
        am_out: Option<&str>,
        pm_in: Option<&str>,
        pm_out: Option<&str>,
    ) -> Result<Self, &'static str> {
        let convert = |raw: Option<&str>| -> Result<Option<HeaplessString<8>>, &'static str> {
            match raw.map(str::trim).filter(|s| !s.is_empty()) {
                Some(value) => HeaplessString::try_from(value)
                    .map(Some)
                    .map_err(|_| "Punch time exceeds maximum length of 8 characters"),
                None => Ok(None),
            }
        };
        Ok(PunchTimes {
            am_in: convert(am_in)?,
            am_out: convert(am_out)?,
            pm_in: convert(pm_in)?,
            pm_out: convert(pm_out)?,
        })
    }

    /// The AM and PM sessions as (in, out) pairs.
    pub fn sessions(&self) -> [(Option<&str>, Option<&str>); 2] {
        [
            (
                self.am_in.as_ref().map(|s| s.as_str()),
                self.am_out.as_ref().map(|s| s.as_str()),
            ),
            (
                self.pm_in.as_ref().map(|s| s.as_str()),
                self.pm_out.as_ref().map(|s| s.as_str()),
            ),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.am_in.is_none() && self.am_out.is_none() && self.pm_in.is_none() && self.pm_out.is_none()
    }
}
