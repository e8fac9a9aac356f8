use async_trait::async_trait;
use coc_api::CocResult;

use crate::models::{EmployeeModel, EmployeeStatus};

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn create(&self, employee: EmployeeModel) -> CocResult<EmployeeModel>;

    async fn update(&self, employee: EmployeeModel) -> CocResult<EmployeeModel>;

    async fn find_by_id(&self, employee_id: &str) -> CocResult<Option<EmployeeModel>>;

    /// Email uniqueness probe.
    async fn find_by_email(&self, email: &str) -> CocResult<Option<EmployeeModel>>;

    async fn find_all(&self, limit: usize) -> CocResult<Vec<EmployeeModel>>;

    async fn find_by_status(&self, status: EmployeeStatus) -> CocResult<Vec<EmployeeModel>>;
}
