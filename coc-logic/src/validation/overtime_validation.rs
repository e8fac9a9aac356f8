use chrono::{Datelike, NaiveDate};
use coc_api::{
    CocError, CocResult, Month, OvertimeBatchRequest, ValidationKind,
};

/// Schema-level checks for the batch write path and the per-entry month
/// gate. No I/O.
pub struct OvertimeValidation;

impl OvertimeValidation {
    /// Presence checks plus date parsing; returns the parsed dates in
    /// input order.
    pub fn validate_request_shape(request: &OvertimeBatchRequest) -> CocResult<Vec<NaiveDate>> {
        if request.employee_id.trim().is_empty() {
            return Err(CocError::missing_field("employeeId"));
        }
        if request.year < 2000 || request.year > 2100 {
            return Err(CocError::Validation {
                kind: ValidationKind::BadDate,
                field: "year".to_string(),
                message: format!("year {} out of range", request.year),
            });
        }
        if request.entries.is_empty() {
            return Err(CocError::missing_field("entries"));
        }
        request
            .entries
            .iter()
            .map(|entry| {
                entry
                    .date_worked
                    .trim()
                    .parse::<NaiveDate>()
                    .map_err(|_| CocError::bad_date("dateWorked", &entry.date_worked))
            })
            .collect()
    }

    /// Every date must fall inside the batch's declared (month, year).
    pub fn validate_date_in_period(date: NaiveDate, month: Month, year: i32) -> CocResult<()> {
        if Month::of(date) != month || date.year() != year {
            return Err(CocError::Validation {
                kind: ValidationKind::MonthMismatch,
                field: "dateWorked".to_string(),
                message: format!("{date} is not in {month} {year}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coc_api::OvertimeEntryInput;

    fn request(employee_id: &str, entries: Vec<OvertimeEntryInput>) -> OvertimeBatchRequest {
        OvertimeBatchRequest {
            employee_id: employee_id.to_string(),
            month: Month::March,
            year: 2025,
            entries,
            correlation_id: None,
        }
    }

    fn entry(date: &str) -> OvertimeEntryInput {
        OvertimeEntryInput {
            date_worked: date.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_employee_and_entries() {
        let err = OvertimeValidation::validate_request_shape(&request("  ", vec![entry("2025-03-10")]))
            .unwrap_err();
        assert!(matches!(
            err,
            CocError::Validation { kind: ValidationKind::MissingField, .. }
        ));

        let err = OvertimeValidation::validate_request_shape(&request("EMP-001", vec![])).unwrap_err();
        assert!(matches!(
            err,
            CocError::Validation { kind: ValidationKind::MissingField, .. }
        ));
    }

    #[test]
    fn test_unparseable_date() {
        let err = OvertimeValidation::validate_request_shape(&request(
            "EMP-001",
            vec![entry("2025-03-10"), entry("March 11")],
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            CocError::Validation { kind: ValidationKind::BadDate, .. }
        ));
    }

    #[test]
    fn test_month_mismatch() {
        let april = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let err = OvertimeValidation::validate_date_in_period(april, Month::March, 2025).unwrap_err();
        assert!(matches!(
            err,
            CocError::Validation { kind: ValidationKind::MonthMismatch, .. }
        ));

        let march_2024 = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert!(OvertimeValidation::validate_date_in_period(march_2024, Month::March, 2025).is_err());

        let march_2025 = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(OvertimeValidation::validate_date_in_period(march_2025, Month::March, 2025).is_ok());
    }
}
