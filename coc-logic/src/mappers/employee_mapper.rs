use coc_api::domain::{Employee, EmployeeStatus as DomainEmployeeStatus};
use coc_db::models::{EmployeeModel, EmployeeStatus as ModelEmployeeStatus};

/// Mapper for converting between domain and database employee records
pub struct EmployeeMapper;

impl EmployeeMapper {
    pub fn to_model(employee: Employee) -> EmployeeModel {
        EmployeeModel {
            employee_id: employee.employee_id,
            first_name: employee.first_name,
            middle_name: employee.middle_name,
            last_name: employee.last_name,
            status: Self::status_to_model(employee.status),
            position: employee.position,
            office: employee.office,
            email: employee.email,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }

    pub fn from_model(model: EmployeeModel) -> Employee {
        Employee {
            employee_id: model.employee_id,
            first_name: model.first_name,
            middle_name: model.middle_name,
            last_name: model.last_name,
            status: Self::status_from_model(model.status),
            position: model.position,
            office: model.office,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    pub fn status_to_model(status: DomainEmployeeStatus) -> ModelEmployeeStatus {
        match status {
            DomainEmployeeStatus::Active => ModelEmployeeStatus::Active,
            DomainEmployeeStatus::Inactive => ModelEmployeeStatus::Inactive,
        }
    }

    pub fn status_from_model(status: ModelEmployeeStatus) -> DomainEmployeeStatus {
        match status {
            ModelEmployeeStatus::Active => DomainEmployeeStatus::Active,
            ModelEmployeeStatus::Inactive => DomainEmployeeStatus::Inactive,
        }
    }
}
