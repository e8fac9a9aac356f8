use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::WeekendDays;

/// Recognized configuration keys; the key string is the document id in the
/// `configuration` collection. Unrecognized documents are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigKey {
    WeekendDays,
    MonthlyCap,
    TotalCap,
    CertificateValidityMonths,
    TimeZone,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::WeekendDays,
        ConfigKey::MonthlyCap,
        ConfigKey::TotalCap,
        ConfigKey::CertificateValidityMonths,
        ConfigKey::TimeZone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::WeekendDays => "WeekendDays",
            ConfigKey::MonthlyCap => "MonthlyCap",
            ConfigKey::TotalCap => "TotalCap",
            ConfigKey::CertificateValidityMonths => "CertificateValidityMonths",
            ConfigKey::TimeZone => "TimeZone",
        }
    }

    pub fn parse(raw: &str) -> Option<ConfigKey> {
        ConfigKey::ALL.iter().copied().find(|k| k.as_str() == raw)
    }

    pub fn default_value(&self) -> &'static str {
        match self {
            ConfigKey::WeekendDays => "0,6",
            ConfigKey::MonthlyCap => "40.0",
            ConfigKey::TotalCap => "120.0",
            ConfigKey::CertificateValidityMonths => "12",
            ConfigKey::TimeZone => "Asia/Manila",
        }
    }
}

/// The typed engine configuration, assembled per request from the store
/// with documented defaults filling any absent keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub weekend_days: WeekendDays,
    pub monthly_cap: Decimal,
    pub total_cap: Decimal,
    pub certificate_validity_months: u32,
    pub time_zone: Tz,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            weekend_days: WeekendDays::standard(),
            monthly_cap: Decimal::new(400, 1),
            total_cap: Decimal::new(1200, 1),
            certificate_validity_months: 12,
            time_zone: chrono_tz::Asia::Manila,
        }
    }
}
