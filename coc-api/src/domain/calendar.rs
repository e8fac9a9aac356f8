use chrono::{NaiveDate, Weekday};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classification of a civil date, determining the accrual rule applied.
/// A holiday falling on a configured weekend day is a `Holiday`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayType {
    Weekday,
    Weekend,
    Holiday,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holiday {
    pub holiday_id: Uuid,
    pub name: HeaplessString<100>,
    pub date: NaiveDate,
    /// Always equals `date.year()`; stored for indexed year lookups.
    pub year: i32,
    pub holiday_type: HolidayType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HolidayType {
    Regular,
    Special,
}

impl Holiday {
    pub fn new(
        holiday_id: Uuid,
        name: &str,
        date: NaiveDate,
        holiday_type: HolidayType,
    ) -> Result<Self, &'static str> {
        if name.trim().is_empty() {
            return Err("Holiday name cannot be empty");
        }
        let name = HeaplessString::try_from(name)
            .map_err(|_| "Holiday name exceeds maximum length of 100 characters")?;
        Ok(Holiday {
            holiday_id,
            name,
            date,
            year: chrono::Datelike::year(&date),
            holiday_type,
        })
    }
}

/// Configured weekend-day set. Wire format is comma-separated indices with
/// 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekendDays(Vec<Weekday>);

impl WeekendDays {
    /// Saturday and Sunday, the configuration default ("0,6").
    pub fn standard() -> Self {
        WeekendDays(vec![Weekday::Sun, Weekday::Sat])
    }

    pub fn from_weekdays(days: Vec<Weekday>) -> Result<Self, Vec<i32>> {
        let mut unique = days.clone();
        unique.sort_by_key(|d| d.num_days_from_sunday());
        unique.dedup();
        if unique.is_empty() || unique.len() >= 7 {
            // signal the whole set as invalid
            return Err(days.iter().map(|d| d.num_days_from_sunday() as i32).collect());
        }
        Ok(WeekendDays(unique))
    }

    /// Parse a comma-separated index list such as "0,6".
    pub fn from_indices(raw: &str) -> Result<Self, Vec<i32>> {
        let mut invalid = Vec::new();
        let mut days = Vec::new();
        for part in raw.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            match part.parse::<i32>() {
                Ok(index @ 0..=6) => days.push(Self::weekday_from_index(index as u32)),
                Ok(index) => invalid.push(index),
                Err(_) => invalid.push(-1),
            }
        }
        if !invalid.is_empty() {
            return Err(invalid);
        }
        Self::from_weekdays(days)
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0.contains(&weekday)
    }

    pub fn days(&self) -> &[Weekday] {
        &self.0
    }

    /// Render back to the "0,6" wire format, indices ascending.
    pub fn to_indices(&self) -> String {
        let mut indices: Vec<u32> = self.0.iter().map(|d| d.num_days_from_sunday()).collect();
        indices.sort_unstable();
        indices
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn weekday_from_index(index: u32) -> Weekday {
        match index {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_days_default_round_trip() {
        let weekend = WeekendDays::standard();
        assert_eq!(weekend.to_indices(), "0,6");
        assert!(weekend.contains(Weekday::Sat));
        assert!(weekend.contains(Weekday::Sun));
        assert!(!weekend.contains(Weekday::Mon));
    }

    #[test]
    fn test_weekend_days_from_indices() {
        // Friday-Saturday weekend
        let weekend = WeekendDays::from_indices("5,6").unwrap();
        assert!(weekend.contains(Weekday::Fri));
        assert!(!weekend.contains(Weekday::Sun));

        assert!(WeekendDays::from_indices("7,8").is_err());
        assert!(WeekendDays::from_indices("").is_err());
        assert!(WeekendDays::from_indices("0,1,2,3,4,5,6").is_err());
    }

    #[test]
    fn test_holiday_year_derived_from_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let holiday =
            Holiday::new(Uuid::new_v4(), "Araw ng Kagitingan", date, HolidayType::Regular).unwrap();
        assert_eq!(holiday.year, 2025);
    }
}
