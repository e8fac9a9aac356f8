use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Stable HR-office identifier, e.g. an employee number.
    pub employee_id: HeaplessString<20>,
    pub first_name: HeaplessString<50>,
    pub middle_name: Option<HeaplessString<50>>,
    pub last_name: HeaplessString<50>,
    pub status: EmployeeStatus,
    pub position: HeaplessString<100>,
    pub office: HeaplessString<100>,
    pub email: HeaplessString<100>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl Employee {
    /// Builder for Employee construction - preferred approach
    pub fn builder(employee_id: &str) -> EmployeeBuilder {
        EmployeeBuilder::new(employee_id)
    }

    /// "Last, First Middle" as rendered on certificates and rosters.
    pub fn display_name(&self) -> String {
        match &self.middle_name {
            Some(middle) => format!(
                "{}, {} {}",
                self.last_name.as_str(),
                self.first_name.as_str(),
                middle.as_str()
            ),
            None => format!("{}, {}", self.last_name.as_str(), self.first_name.as_str()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

/// Builder for Employee construction
pub struct EmployeeBuilder {
    employee_id: String,
    first_name: Option<String>,
    middle_name: Option<String>,
    last_name: Option<String>,
    status: EmployeeStatus,
    position: Option<String>,
    office: Option<String>,
    email: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl EmployeeBuilder {
    pub fn new(employee_id: &str) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            first_name: None,
            middle_name: None,
            last_name: None,
            status: EmployeeStatus::Active,
            position: None,
            office: None,
            email: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn first_name(mut self, first_name: &str) -> Self {
        self.first_name = Some(first_name.to_string());
        self
    }

    pub fn middle_name(mut self, middle_name: &str) -> Self {
        self.middle_name = Some(middle_name.to_string());
        self
    }

    pub fn last_name(mut self, last_name: &str) -> Self {
        self.last_name = Some(last_name.to_string());
        self
    }

    pub fn status(mut self, status: EmployeeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn position(mut self, position: &str) -> Self {
        self.position = Some(position.to_string());
        self
    }

    pub fn office(mut self, office: &str) -> Self {
        self.office = Some(office.to_string());
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn build(self) -> Result<Employee, &'static str> {
        if self.employee_id.trim().is_empty() {
            return Err("Employee id cannot be empty");
        }
        let first_name = self.first_name.ok_or("First name is required")?;
        let last_name = self.last_name.ok_or("Last name is required")?;
        let position = self.position.unwrap_or_default();
        let office = self.office.unwrap_or_default();
        let email = self.email.ok_or("Email is required")?;
        let created_at = self.created_at.ok_or("Created at is required")?;
        let updated_at = self.updated_at.unwrap_or(created_at);

        let employee_id = HeaplessString::try_from(self.employee_id.as_str())
            .map_err(|_| "Employee id exceeds maximum length of 20 characters")?;
        let first_name = HeaplessString::try_from(first_name.as_str())
            .map_err(|_| "First name exceeds maximum length of 50 characters")?;
        let middle_name = match self.middle_name {
            Some(middle) => Some(
                HeaplessString::try_from(middle.as_str())
                    .map_err(|_| "Middle name exceeds maximum length of 50 characters")?,
            ),
            None => None,
        };
        let last_name = HeaplessString::try_from(last_name.as_str())
            .map_err(|_| "Last name exceeds maximum length of 50 characters")?;
        let position = HeaplessString::try_from(position.as_str())
            .map_err(|_| "Position exceeds maximum length of 100 characters")?;
        let office = HeaplessString::try_from(office.as_str())
            .map_err(|_| "Office exceeds maximum length of 100 characters")?;
        let email = HeaplessString::try_from(email.as_str())
            .map_err(|_| "Email exceeds maximum length of 100 characters")?;

        Ok(Employee {
            employee_id,
            first_name,
            middle_name,
            last_name,
            status: self.status,
            position,
            office,
            email,
            created_at,
            updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_builder() {
        let now = Utc::now();
        let employee = Employee::builder("EMP-001")
            .first_name("Juan")
            .middle_name("Santos")
            .last_name("dela Cruz")
            .position("Administrative Officer II")
            .office("Records Section")
            .email("jdelacruz@lgu.gov.ph")
            .created_at(now)
            .build()
            .expect("Should build successfully");

        assert_eq!(employee.employee_id.as_str(), "EMP-001");
        assert_eq!(employee.status, EmployeeStatus::Active);
        assert_eq!(employee.display_name(), "dela Cruz, Juan Santos");
        assert_eq!(employee.updated_at, now);
    }

    #[test]
    fn test_employee_builder_requires_email() {
        let result = Employee::builder("EMP-002")
            .first_name("Maria")
            .last_name("Reyes")
            .created_at(Utc::now())
            .build();

        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), "Email is required");
    }
}
