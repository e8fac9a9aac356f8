use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    domain::Month,
    error::CocResult,
    views::{CertificationResult, RecoveryReport},
};

#[async_trait]
pub trait CertificationService: Send + Sync {
    /// Convert every uncertified log of the period into one active credit
    /// batch, observable as a single commit. Repeating the call for an
    /// already-certified period fails and changes nothing.
    async fn certify(&self, request: CertificationRequest) -> CocResult<CertificationResult>;

    /// Scan for periods whose logs went Active without a complete
    /// certificate chain and finish the missing artifacts.
    async fn recover_incomplete(&self) -> CocResult<RecoveryReport>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificationRequest {
    pub employee_id: String,
    pub month: Month,
    pub year: i32,
    pub date_of_issuance: NaiveDate,
}
