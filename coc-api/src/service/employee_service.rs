use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{domain::Employee, error::CocResult};

#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Register an employee; email must be unique among all employees.
    async fn create_employee(&self, request: NewEmployee) -> CocResult<Employee>;

    async fn update_employee(&self, employee_id: &str, update: EmployeeUpdate)
        -> CocResult<Employee>;

    /// Soft delete: status flips to Inactive; the record and every log,
    /// batch and ledger row referencing it stay behind.
    async fn deactivate_employee(&self, employee_id: &str) -> CocResult<()>;

    async fn find_employee(&self, employee_id: &str) -> CocResult<Option<Employee>>;

    async fn list_employees(&self) -> CocResult<Vec<Employee>>;

    async fn list_active_employees(&self) -> CocResult<Vec<Employee>>;
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewEmployee {
    #[validate(length(min = 1, max = 20))]
    pub employee_id: String,
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    pub middle_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(length(max = 100))]
    pub position: String,
    #[validate(length(max = 100))]
    pub office: String,
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EmployeeUpdate {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub office: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}
