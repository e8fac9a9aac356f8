use coc_api::domain::{Holiday, HolidayType as DomainHolidayType};
use coc_db::models::{HolidayModel, HolidayType as ModelHolidayType};

/// Mapper for converting between domain and database holidays
pub struct CalendarMapper;

impl CalendarMapper {
    pub fn holiday_to_model(holiday: Holiday) -> HolidayModel {
        HolidayModel {
            holiday_id: holiday.holiday_id,
            name: holiday.name,
            date: holiday.date,
            year: holiday.year,
            holiday_type: Self::holiday_type_to_model(holiday.holiday_type),
        }
    }

    pub fn holiday_from_model(model: HolidayModel) -> Holiday {
        Holiday {
            holiday_id: model.holiday_id,
            name: model.name,
            date: model.date,
            year: model.year,
            holiday_type: Self::holiday_type_from_model(model.holiday_type),
        }
    }

    pub fn holiday_type_to_model(holiday_type: DomainHolidayType) -> ModelHolidayType {
        match holiday_type {
            DomainHolidayType::Regular => ModelHolidayType::Regular,
            DomainHolidayType::Special => ModelHolidayType::Special,
        }
    }

    pub fn holiday_type_from_model(holiday_type: ModelHolidayType) -> DomainHolidayType {
        match holiday_type {
            ModelHolidayType::Regular => DomainHolidayType::Regular,
            ModelHolidayType::Special => DomainHolidayType::Special,
        }
    }
}
