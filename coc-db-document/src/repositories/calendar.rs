use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use coc_api::{CocError, CocResult};
use coc_db::models::calendar::fields;
use coc_db::models::HolidayModel;
use coc_db::repository::CalendarRepository;
use coc_db::store::collections::HOLIDAYS;
use coc_db::store::{opt_str, Document, DocumentStore, FieldValue};
use uuid::Uuid;

pub struct DocumentCalendarRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentCalendarRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn parse_all(docs: Vec<Document>) -> CocResult<Vec<HolidayModel>> {
        let mut models = Vec::with_capacity(docs.len());
        for doc in &docs {
            let id = opt_str(doc, fields::HOLIDAY_ID).unwrap_or_default();
            models.push(HolidayModel::from_document(&id, doc)?);
        }
        models.sort_by_key(|m| m.date);
        Ok(models)
    }
}

#[async_trait]
impl CalendarRepository for DocumentCalendarRepository {
    async fn create_holiday(&self, holiday: HolidayModel) -> CocResult<HolidayModel> {
        if self.find_holiday_by_date(holiday.date).await?.is_some() {
            return Err(CocError::AlreadyExists(format!(
                "holiday on {}",
                holiday.date
            )));
        }
        self.store
            .create(HOLIDAYS, &holiday.document_id(), holiday.to_document())
            .await?;
        Ok(holiday)
    }

    async fn delete_holiday(&self, holiday_id: Uuid) -> CocResult<()> {
        self.store.delete(HOLIDAYS, &holiday_id.to_string()).await
    }

    async fn find_holiday_by_id(&self, holiday_id: Uuid) -> CocResult<Option<HolidayModel>> {
        let id = holiday_id.to_string();
        match self.store.get(HOLIDAYS, &id).await? {
            Some(doc) => Ok(Some(HolidayModel::from_document(&id, &doc)?)),
            None => Ok(None),
        }
    }

    async fn find_holiday_by_date(&self, date: NaiveDate) -> CocResult<Option<HolidayModel>> {
        let docs = self
            .store
            .find_matching(HOLIDAYS, &[(fields::DATE, FieldValue::from_date(date))])
            .await?;
        Ok(Self::parse_all(docs)?.into_iter().next())
    }

    async fn find_holidays_by_year(&self, year: i32) -> CocResult<Vec<HolidayModel>> {
        let docs = self
            .store
            .find_matching(HOLIDAYS, &[(fields::YEAR, FieldValue::Int(year as i64))])
            .await?;
        Self::parse_all(docs)
    }
}
