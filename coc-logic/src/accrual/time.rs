/// Punch-time parsing for the accrual rules. The format is the one the
/// spreadsheets carried: "H:MM AM" / "HH:MM PM", marker case-insensitive,
/// hours 1..=12, minutes 0..=59. 12 AM is midnight, 12 PM is noon.
///
/// An unparseable punch is `None`; it contributes nothing, it never fails
/// a request.
pub fn parse_punch(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (time_part, marker) = trimmed.rsplit_once(' ')?;
    let (hours_raw, minutes_raw) = time_part.trim().split_once(':')?;
    let hours: u32 = hours_raw.parse().ok()?;
    let minutes: u32 = minutes_raw.parse().ok()?;
    if !(1..=12).contains(&hours) || minutes > 59 {
        return None;
    }
    let hour_of_day = match marker.trim().to_ascii_uppercase().as_str() {
        "AM" => {
            if hours == 12 {
                0
            } else {
                hours
            }
        }
        "PM" => {
            if hours == 12 {
                12
            } else {
                hours + 12
            }
        }
        _ => return None,
    };
    Some(hour_of_day * 60 + minutes)
}

/// A punch pair as a half-usable session: both ends must parse and the out
/// must be after the in, otherwise the session is worth nothing.
pub fn session_window(punch_in: Option<&str>, punch_out: Option<&str>) -> Option<(u32, u32)> {
    let start = parse_punch(punch_in?)?;
    let end = parse_punch(punch_out?)?;
    if end <= start {
        return None;
    }
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_punch_basics() {
        assert_eq!(parse_punch("8:00 AM"), Some(480));
        assert_eq!(parse_punch("12:00 PM"), Some(720));
        assert_eq!(parse_punch("12:00 AM"), Some(0));
        assert_eq!(parse_punch("12:30 AM"), Some(30));
        assert_eq!(parse_punch("6:30 PM"), Some(1110));
        assert_eq!(parse_punch("11:59 PM"), Some(1439));
    }

    #[test]
    fn test_parse_punch_marker_case_insensitive() {
        assert_eq!(parse_punch("5:00 pm"), Some(1020));
        assert_eq!(parse_punch("5:00 Pm"), Some(1020));
        assert_eq!(parse_punch(" 5:00 PM "), Some(1020));
    }

    #[test]
    fn test_parse_punch_rejects_malformed() {
        assert_eq!(parse_punch(""), None);
        assert_eq!(parse_punch("  "), None);
        assert_eq!(parse_punch("17:00"), None);
        assert_eq!(parse_punch("13:00 PM"), None);
        assert_eq!(parse_punch("0:30 AM"), None);
        assert_eq!(parse_punch("8:60 AM"), None);
        assert_eq!(parse_punch("8:00 XM"), None);
        assert_eq!(parse_punch("eight AM"), None);
    }

    #[test]
    fn test_session_window_requires_forward_span() {
        assert_eq!(session_window(Some("8:00 AM"), Some("12:00 PM")), Some((480, 720)));
        assert_eq!(session_window(Some("12:00 PM"), Some("8:00 AM")), None);
        assert_eq!(session_window(Some("8:00 AM"), Some("8:00 AM")), None);
        assert_eq!(session_window(None, Some("12:00 PM")), None);
        assert_eq!(session_window(Some("junk"), Some("12:00 PM")), None);
    }
}
