use std::sync::Arc;

use async_trait::async_trait;
use coc_api::{
    domain::{Employee, EmployeeStatus},
    error::{CocError, CocResult},
    service::{Clock, EmployeeService, EmployeeUpdate, NewEmployee},
};
use coc_db::repository::EmployeeRepository;
use heapless::String as HeaplessString;
use validator::Validate;

use crate::constants::MAX_SCAN_DOCUMENTS;
use crate::mappers::EmployeeMapper;

pub struct EmployeeServiceImpl {
    employee_repository: Arc<dyn EmployeeRepository>,
    clock: Arc<dyn Clock>,
}

impl EmployeeServiceImpl {
    pub fn new(employee_repository: Arc<dyn EmployeeRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            employee_repository,
            clock,
        }
    }

    fn validation_error(errors: validator::ValidationErrors) -> CocError {
        let field = errors
            .field_errors()
            .keys()
            .next()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "request".to_string());
        CocError::Validation {
            kind: coc_api::ValidationKind::BadValue,
            field,
            message: errors.to_string(),
        }
    }

    fn bounded<const N: usize>(field: &str, value: &str) -> CocResult<HeaplessString<N>> {
        HeaplessString::try_from(value).map_err(|_| CocError::Validation {
            kind: coc_api::ValidationKind::BadValue,
            field: field.to_string(),
            message: format!("{field} exceeds maximum length of {N} characters"),
        })
    }
}

#[async_trait]
impl EmployeeService for EmployeeServiceImpl {
    async fn create_employee(&self, request: NewEmployee) -> CocResult<Employee> {
        request.validate().map_err(Self::validation_error)?;

        if self
            .employee_repository
            .find_by_id(&request.employee_id)
            .await?
            .is_some()
        {
            return Err(CocError::AlreadyExists(format!(
                "employee {}",
                request.employee_id
            )));
        }
        if self
            .employee_repository
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(CocError::AlreadyExists(format!("email {}", request.email)));
        }

        let now = self.clock.now();
        let mut builder = Employee::builder(&request.employee_id)
            .first_name(&request.first_name)
            .last_name(&request.last_name)
            .position(&request.position)
            .office(&request.office)
            .email(&request.email)
            .created_at(now);
        if let Some(middle) = &request.middle_name {
            builder = builder.middle_name(middle);
        }
        let employee = builder.build().map_err(|message| CocError::Validation {
            kind: coc_api::ValidationKind::BadValue,
            field: "request".to_string(),
            message: message.to_string(),
        })?;

        let created = self
            .employee_repository
            .create(EmployeeMapper::to_model(employee))
            .await?;
        tracing::info!("employee {} registered", created.employee_id);
        Ok(EmployeeMapper::from_model(created))
    }

    async fn update_employee(
        &self,
        employee_id: &str,
        update: EmployeeUpdate,
    ) -> CocResult<Employee> {
        update.validate().map_err(Self::validation_error)?;

        let mut model = self
            .employee_repository
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| CocError::EmployeeNotFound(employee_id.to_string()))?;

        if let Some(email) = &update.email {
            if email.as_str() != model.email.as_str() {
                if let Some(holder) = self.employee_repository.find_by_email(email).await? {
                    if holder.employee_id != model.employee_id {
                        return Err(CocError::AlreadyExists(format!("email {email}")));
                    }
                }
                model.email = Self::bounded("email", email)?;
            }
        }
        if let Some(first_name) = &update.first_name {
            model.first_name = Self::bounded("firstName", first_name)?;
        }
        if let Some(middle_name) = &update.middle_name {
            model.middle_name = Some(Self::bounded("middleName", middle_name)?);
        }
        if let Some(last_name) = &update.last_name {
            model.last_name = Self::bounded("lastName", last_name)?;
        }
        if let Some(position) = &update.position {
            model.position = Self::bounded("position", position)?;
        }
        if let Some(office) = &update.office {
            model.office = Self::bounded("office", office)?;
        }
        model.updated_at = self.clock.now();

        let updated = self.employee_repository.update(model).await?;
        Ok(EmployeeMapper::from_model(updated))
    }

    async fn deactivate_employee(&self, employee_id: &str) -> CocResult<()> {
        let mut model = self
            .employee_repository
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| CocError::EmployeeNotFound(employee_id.to_string()))?;

        // soft delete: flip to Inactive, keep the record and everything
        // referencing it
        model.status = coc_db::models::EmployeeStatus::Inactive;
        model.updated_at = self.clock.now();
        self.employee_repository.update(model).await?;
        tracing::info!("employee {} deactivated", employee_id);
        Ok(())
    }

    async fn find_employee(&self, employee_id: &str) -> CocResult<Option<Employee>> {
        Ok(self
            .employee_repository
            .find_by_id(employee_id)
            .await?
            .map(EmployeeMapper::from_model))
    }

    async fn list_employees(&self) -> CocResult<Vec<Employee>> {
        let models = self.employee_repository.find_all(MAX_SCAN_DOCUMENTS).await?;
        Ok(models.into_iter().map(EmployeeMapper::from_model).collect())
    }

    async fn list_active_employees(&self) -> CocResult<Vec<Employee>> {
        let models = self
            .employee_repository
            .find_by_status(EmployeeMapper::status_to_model(EmployeeStatus::Active))
            .await?;
        Ok(models.into_iter().map(EmployeeMapper::from_model).collect())
    }
}
