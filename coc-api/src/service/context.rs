use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Time source for the engine. Production uses the system clock; tests pin
/// a fixed instant so issuance and expiry checks are deterministic.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Civil date of `now()` in the configured zone.
    fn today(&self, zone: Tz) -> NaiveDate {
        self.now().with_timezone(&zone).date_naive()
    }
}

/// Answers "who did this" for `logged_by` / `performed_by` stamps.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> String;
}
