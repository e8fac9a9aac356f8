use coc_api::domain::Certificate;
use coc_db::models::CertificateModel;

/// Mapper for converting between domain and database certificates
pub struct CertificateMapper;

impl CertificateMapper {
    pub fn to_model(certificate: Certificate) -> CertificateModel {
        CertificateModel {
            certificate_id: certificate.certificate_id,
            employee_id: certificate.employee_id,
            month: certificate.month,
            year: certificate.year,
            total_hours: certificate.total_hours,
            date_of_issuance: certificate.date_of_issuance,
            valid_until: certificate.valid_until,
            certified_by: certificate.certified_by,
            certified_at: certificate.certified_at,
        }
    }

    pub fn from_model(model: CertificateModel) -> Certificate {
        Certificate {
            certificate_id: model.certificate_id,
            employee_id: model.employee_id,
            month: model.month,
            year: model.year,
            total_hours: model.total_hours,
            date_of_issuance: model.date_of_issuance,
            valid_until: model.valid_until,
            certified_by: model.certified_by,
            certified_at: model.certified_at,
        }
    }
}
