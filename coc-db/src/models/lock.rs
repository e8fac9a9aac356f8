use chrono::{DateTime, Utc};
use coc_api::CocResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::collections::LOCKS;
use crate::store::{req_instant, req_str, req_uuid, Document, FieldValue};

pub mod fields {
    pub const TOKEN: &str = "token";
    pub const OWNER: &str = "owner";
    pub const EXPIRES_AT: &str = "expiresAt";
}

/// Advisory lock document, compare-and-set on `token`. A lock whose
/// `expires_at` has passed may be taken over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockModel {
    pub scope: String,
    pub token: Uuid,
    pub owner: String,
    pub expires_at: DateTime<Utc>,
}

impl LockModel {
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert(fields::TOKEN.into(), FieldValue::Str(self.token.to_string()));
        doc.insert(fields::OWNER.into(), FieldValue::Str(self.owner.clone()));
        doc.insert(fields::EXPIRES_AT.into(), FieldValue::Timestamp(self.expires_at));
        doc
    }

    pub fn from_document(id: &str, doc: &Document) -> CocResult<LockModel> {
        Ok(LockModel {
            scope: id.to_string(),
            token: req_uuid(doc, LOCKS, id, fields::TOKEN)?,
            owner: req_str(doc, LOCKS, id, fields::OWNER)?,
            expires_at: req_instant(doc, LOCKS, id, fields::EXPIRES_AT)?,
        })
    }
}
