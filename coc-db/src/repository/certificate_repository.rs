use async_trait::async_trait;
use coc_api::{CocResult, Month};
use uuid::Uuid;

use crate::models::CertificateModel;

#[async_trait]
pub trait CertificateRepository: Send + Sync {
    async fn create(&self, certificate: CertificateModel) -> CocResult<()>;

    async fn find_by_id(&self, certificate_id: Uuid) -> CocResult<Option<CertificateModel>>;

    /// The period-lock probe: at most one certificate per
    /// (employee, month, year).
    async fn find_by_period(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
    ) -> CocResult<Option<CertificateModel>>;

    async fn find_by_employee_and_year(
        &self,
        employee_id: &str,
        year: i32,
    ) -> CocResult<Vec<CertificateModel>>;
}
