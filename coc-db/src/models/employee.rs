use chrono::{DateTime, Utc};
use coc_api::CocResult;
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};

use crate::models::{bounded, bounded_opt};
use crate::store::collections::EMPLOYEES;
use crate::store::{opt_str, req_instant, req_str, Document, FieldValue};

pub mod fields {
    pub const EMPLOYEE_ID: &str = "employeeId";
    pub const FIRST_NAME: &str = "firstName";
    pub const MIDDLE_NAME: &str = "middleName";
    pub const LAST_NAME: &str = "lastName";
    pub const STATUS: &str = "status";
    pub const POSITION: &str = "position";
    pub const OFFICE: &str = "office";
    pub const EMAIL: &str = "email";
    pub const CREATED_AT: &str = "createdAt";
    pub const UPDATED_AT: &str = "updatedAt";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeModel {
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

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "Active",
            EmployeeStatus::Inactive => "Inactive",
        }
    }

    pub fn parse(raw: &str) -> Option<EmployeeStatus> {
        match raw {
            "Active" => Some(EmployeeStatus::Active),
            "Inactive" => Some(EmployeeStatus::Inactive),
            _ => None,
        }
    }
}

impl EmployeeModel {
    pub fn document_id(&self) -> String {
        self.employee_id.to_string()
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(
            fields::EMPLOYEE_ID.into(),
            FieldValue::Str(self.employee_id.to_string()),
        );
        doc.insert(
            fields::FIRST_NAME.into(),
            FieldValue::Str(self.first_name.to_string()),
        );
        doc.insert(
            fields::MIDDLE_NAME.into(),
            FieldValue::from_opt_str(self.middle_name.as_ref().map(|s| s.as_str())),
        );
        doc.insert(
            fields::LAST_NAME.into(),
            FieldValue::Str(self.last_name.to_string()),
        );
        doc.insert(fields::STATUS.into(), FieldValue::Str(self.status.as_str().into()));
        doc.insert(
            fields::POSITION.into(),
            FieldValue::Str(self.position.to_string()),
        );
        doc.insert(fields::OFFICE.into(), FieldValue::Str(self.office.to_string()));
        doc.insert(fields::EMAIL.into(), FieldValue::Str(self.email.to_string()));
        doc.insert(fields::CREATED_AT.into(), FieldValue::Timestamp(self.created_at));
        doc.insert(fields::UPDATED_AT.into(), FieldValue::Timestamp(self.updated_at));
        doc
    }

    pub fn from_document(id: &str, doc: &Document) -> CocResult<EmployeeModel> {
        let status_raw = req_str(doc, EMPLOYEES, id, fields::STATUS)?;
        let status = EmployeeStatus::parse(&status_raw).ok_or(coc_api::CocError::SchemaDrift {
            collection: EMPLOYEES.to_string(),
            document_id: id.to_string(),
            field: fields::STATUS.to_string(),
        })?;
        Ok(EmployeeModel {
            employee_id: bounded(EMPLOYEES, id, fields::EMPLOYEE_ID, id)?,
            first_name: bounded(
                EMPLOYEES,
                id,
                fields::FIRST_NAME,
                &req_str(doc, EMPLOYEES, id, fields::FIRST_NAME)?,
            )?,
            middle_name: bounded_opt(
                EMPLOYEES,
                id,
                fields::MIDDLE_NAME,
                opt_str(doc, fields::MIDDLE_NAME),
            )?,
            last_name: bounded(
                EMPLOYEES,
                id,
                fields::LAST_NAME,
                &req_str(doc, EMPLOYEES, id, fields::LAST_NAME)?,
            )?,
            status,
            position: bounded(
                EMPLOYEES,
                id,
                fields::POSITION,
                &req_str(doc, EMPLOYEES, id, fields::POSITION)?,
            )?,
            office: bounded(
                EMPLOYEES,
                id,
                fields::OFFICE,
                &req_str(doc, EMPLOYEES, id, fields::OFFICE)?,
            )?,
            email: bounded(
                EMPLOYEES,
                id,
                fields::EMAIL,
                &req_str(doc, EMPLOYEES, id, fields::EMAIL)?,
            )?,
            created_at: req_instant(doc, EMPLOYEES, id, fields::CREATED_AT)?,
            updated_at: req_instant(doc, EMPLOYEES, id, fields::UPDATED_AT)?,
        })
    }
}
