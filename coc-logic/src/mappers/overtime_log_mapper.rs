use coc_api::domain::{
    DayType as DomainDayType, LogStatus as DomainLogStatus, OvertimeLog, PunchTimes,
};
use coc_db::models::{
    DayType as ModelDayType, LogStatus as ModelLogStatus, OvertimeLogModel,
};
use uuid::Uuid;

/// Mapper for converting between domain and database overtime logs
pub struct OvertimeLogMapper;

impl OvertimeLogMapper {
    pub fn to_model(log: OvertimeLog, correlation_id: Option<Uuid>) -> OvertimeLogModel {
        OvertimeLogModel {
            log_id: log.log_id,
            employee_id: log.employee_id,
            month: log.month,
            year: log.year,
            date_worked: log.date_worked,
            day_type: Self::day_type_to_model(log.day_type),
            am_in: log.punches.am_in,
            am_out: log.punches.am_out,
            pm_in: log.punches.pm_in,
            pm_out: log.punches.pm_out,
            coc_earned: log.coc_earned,
            status: Self::status_to_model(log.status),
            logged_by: log.logged_by,
            logged_at: log.logged_at,
            valid_until: log.valid_until,
            correlation_id,
        }
    }

    pub fn from_model(model: OvertimeLogModel) -> OvertimeLog {
        OvertimeLog {
            log_id: model.log_id,
            employee_id: model.employee_id,
            month: model.month,
            year: model.year,
            date_worked: model.date_worked,
            day_type: Self::day_type_from_model(model.day_type),
            punches: PunchTimes {
                am_in: model.am_in,
                am_out: model.am_out,
                pm_in: model.pm_in,
                pm_out: model.pm_out,
            },
            coc_earned: model.coc_earned,
            status: Self::status_from_model(model.status),
            logged_by: model.logged_by,
            logged_at: model.logged_at,
            valid_until: model.valid_until,
        }
    }

    pub fn status_to_model(status: DomainLogStatus) -> ModelLogStatus {
        match status {
            DomainLogStatus::Uncertified => ModelLogStatus::Uncertified,
            DomainLogStatus::Active => ModelLogStatus::Active,
            DomainLogStatus::Used => ModelLogStatus::Used,
            DomainLogStatus::Expired => ModelLogStatus::Expired,
        }
    }

    pub fn status_from_model(status: ModelLogStatus) -> DomainLogStatus {
        match status {
            ModelLogStatus::Uncertified => DomainLogStatus::Uncertified,
            ModelLogStatus::Active => DomainLogStatus::Active,
            ModelLogStatus::Used => DomainLogStatus::Used,
            ModelLogStatus::Expired => DomainLogStatus::Expired,
        }
    }

    pub fn day_type_to_model(day_type: DomainDayType) -> ModelDayType {
        match day_type {
            DomainDayType::Weekday => ModelDayType::Weekday,
            DomainDayType::Weekend => ModelDayType::Weekend,
            DomainDayType::Holiday => ModelDayType::Holiday,
        }
    }

    pub fn day_type_from_model(day_type: ModelDayType) -> DomainDayType {
        match day_type {
            ModelDayType::Weekday => DomainDayType::Weekday,
            ModelDayType::Weekend => DomainDayType::Weekend,
            ModelDayType::Holiday => DomainDayType::Holiday,
        }
    }
}
