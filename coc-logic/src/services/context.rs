use std::sync::Mutex;

use chrono::{DateTime, Utc};
use coc_api::service::{Clock, IdentityProvider};

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A pinnable clock for deterministic tests and replays.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn advance_to(&self, now: DateTime<Utc>) {
        *self.now.lock().expect("clock mutex") = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock mutex")
    }
}

/// A fixed acting user, supplied by the embedding application's
/// authentication layer.
pub struct StaticIdentity {
    user: String,
}

impl StaticIdentity {
    pub fn new(user: &str) -> Self {
        Self {
            user: user.to_string(),
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> String {
        self.user.clone()
    }
}
