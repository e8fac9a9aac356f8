use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use coc_api::{DayType, WeekendDays};

/// Pure date classification over prefetched sets, so the write path
/// classifies a whole batch without per-entry store reads.
pub struct CalendarClassification;

impl CalendarClassification {
    /// Holiday wins over weekend; the order is observable in accrual rates
    /// and pinned by test.
    pub fn classify(
        date: NaiveDate,
        holiday_dates: &HashSet<NaiveDate>,
        weekend_days: &WeekendDays,
    ) -> DayType {
        if holiday_dates.contains(&date) {
            DayType::Holiday
        } else if weekend_days.contains(date.weekday()) {
            DayType::Weekend
        } else {
            DayType::Weekday
        }
    }
}
