//! The accrual rule engine: day type plus four punches in, credit-hours
//! out. Pure; no store, no clock.

pub mod time;

use coc_api::{DayType, PunchTimes};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::accrual::time::session_window;

/// Weekday overtime only credits the 17:00-19:00 window.
const WEEKDAY_WINDOW: (u32, u32) = (17 * 60, 19 * 60);
const WEEKDAY_CLAMP_MINUTES: u32 = 120;

/// Weekend and holiday work credits the working day around the noon break.
const MORNING_WINDOW: (u32, u32) = (8 * 60, 12 * 60);
const AFTERNOON_WINDOW: (u32, u32) = (13 * 60, 17 * 60);

/// Credit-hours earned for one day, rounded half-away-from-zero to one
/// decimal. Rounding happens once, on the final figure.
pub fn credit_hours(day_type: DayType, punches: &PunchTimes) -> Decimal {
    let sessions: Vec<(u32, u32)> = punches
        .sessions()
        .into_iter()
        .filter_map(|(punch_in, punch_out)| session_window(punch_in, punch_out))
        .collect();

    let hours = match day_type {
        DayType::Weekday => {
            let minutes: u32 = sessions
                .iter()
                .map(|session| overlap_minutes(*session, WEEKDAY_WINDOW))
                .sum();
            minutes_to_hours(minutes.min(WEEKDAY_CLAMP_MINUTES))
        }
        DayType::Weekend | DayType::Holiday => {
            let minutes: u32 = sessions
                .iter()
                .flat_map(|session| {
                    [MORNING_WINDOW, AFTERNOON_WINDOW]
                        .into_iter()
                        .map(|window| overlap_minutes(*session, window))
                })
                .sum();
            minutes_to_hours(minutes) * Decimal::new(15, 1)
        }
    };

    hours.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

fn overlap_minutes(session: (u32, u32), window: (u32, u32)) -> u32 {
    let start = session.0.max(window.0);
    let end = session.1.min(window.1);
    end.saturating_sub(start)
}

fn minutes_to_hours(minutes: u32) -> Decimal {
    Decimal::from(minutes) / Decimal::from(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn punches(
        am_in: Option<&str>,
        am_out: Option<&str>,
        pm_in: Option<&str>,
        pm_out: Option<&str>,
    ) -> PunchTimes {
        PunchTimes::from_strs(am_in, am_out, pm_in, pm_out).unwrap()
    }

    fn hours(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn test_weekday_single_evening_session() {
        // pm session 1:00 PM - 6:30 PM overlaps 17:00-19:00 by 90 minutes
        let day = punches(Some("8:00 AM"), Some("12:00 PM"), Some("1:00 PM"), Some("6:30 PM"));
        assert_eq!(credit_hours(DayType::Weekday, &day), hours("1.5"));
    }

    #[test]
    fn test_weekday_clamped_at_two_hours() {
        let day = punches(None, None, Some("1:00 PM"), Some("10:00 PM"));
        assert_eq!(credit_hours(DayType::Weekday, &day), hours("2.0"));
    }

    #[test]
    fn test_weekday_work_outside_window_earns_nothing() {
        let day = punches(Some("8:00 AM"), Some("12:00 PM"), Some("1:00 PM"), Some("5:00 PM"));
        assert_eq!(credit_hours(DayType::Weekday, &day), Decimal::ZERO);
    }

    #[test]
    fn test_weekend_full_day() {
        // 4h morning + 4h afternoon, at 1.5x
        let day = punches(Some("8:00 AM"), Some("12:00 PM"), Some("1:00 PM"), Some("5:00 PM"));
        assert_eq!(credit_hours(DayType::Weekend, &day), hours("12.0"));
    }

    #[test]
    fn test_holiday_uses_weekend_windows() {
        let day = punches(Some("8:00 AM"), Some("12:00 PM"), Some("1:00 PM"), Some("5:00 PM"));
        assert_eq!(credit_hours(DayType::Holiday, &day), hours("12.0"));
    }

    #[test]
    fn test_weekend_session_spanning_noon_break_skips_the_break() {
        // one long am session 8:00 AM - 5:00 PM; 12:00-13:00 is uncredited
        let day = punches(Some("8:00 AM"), Some("5:00 PM"), None, None);
        assert_eq!(credit_hours(DayType::Weekend, &day), hours("12.0"));
    }

    #[test]
    fn test_weekend_early_and_late_work_is_uncredited() {
        let day = punches(Some("6:00 AM"), Some("7:30 AM"), Some("5:30 PM"), Some("9:00 PM"));
        assert_eq!(credit_hours(DayType::Weekend, &day), Decimal::ZERO);
    }

    #[test]
    fn test_rounding_is_half_away_from_zero_once() {
        // 75 minutes in window = 1.25h -> 1.3
        let day = punches(None, None, Some("4:30 PM"), Some("6:15 PM"));
        assert_eq!(credit_hours(DayType::Weekday, &day), hours("1.3"));

        // weekend: 90 minutes = 1.5h * 1.5 = 2.25 -> 2.3 (rounded after
        // the multiplier, not before)
        let day = punches(Some("8:00 AM"), Some("9:30 AM"), None, None);
        assert_eq!(credit_hours(DayType::Weekend, &day), hours("2.3"));
    }

    #[test]
    fn test_invalid_punch_drops_only_its_session() {
        let day = punches(Some("bogus"), Some("12:00 PM"), Some("1:00 PM"), Some("5:00 PM"));
        assert_eq!(credit_hours(DayType::Weekend, &day), hours("6.0"));
    }

    #[test]
    fn test_reversed_session_contributes_nothing() {
        let day = punches(Some("12:00 PM"), Some("8:00 AM"), None, None);
        assert_eq!(credit_hours(DayType::Weekend, &day), Decimal::ZERO);
    }

    #[test]
    fn test_empty_punches_earn_nothing() {
        assert_eq!(credit_hours(DayType::Weekday, &PunchTimes::default()), Decimal::ZERO);
        assert_eq!(credit_hours(DayType::Holiday, &PunchTimes::default()), Decimal::ZERO);
    }

    // accrual-purity: the function depends only on its inputs
    #[test]
    fn test_same_input_same_output() {
        let day = punches(Some("8:00 AM"), Some("12:00 PM"), Some("1:00 PM"), Some("6:30 PM"));
        let first = credit_hours(DayType::Weekday, &day);
        let second = credit_hours(DayType::Weekday, &day);
        assert_eq!(first, second);
    }

    // accrual-bounds over a sweep of inputs, and at-most-one-decimal output
    #[test]
    fn test_bounds_and_scale_over_sweep() {
        for in_hour in 1..=12u32 {
            for out_hour in 1..=12u32 {
                for minute in [0u32, 15, 30, 45] {
                    let am_in = format!("{in_hour}:00 AM");
                    let am_out = format!("{out_hour}:{minute:02} AM");
                    let pm_out = format!("{out_hour}:{minute:02} PM");
                    let day = punches(Some(&am_in), Some(&am_out), Some("1:15 PM"), Some(&pm_out));

                    let weekday = credit_hours(DayType::Weekday, &day);
                    assert!(weekday >= Decimal::ZERO && weekday <= hours("2.0"), "weekday {weekday}");
                    assert!(weekday.scale() <= 1);

                    let weekend = credit_hours(DayType::Weekend, &day);
                    assert!(weekend >= Decimal::ZERO && weekend <= hours("12.0"), "weekend {weekend}");
                    assert!(weekend.scale() <= 1);
                }
            }
        }
    }
}
