//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the practice
//! management system. These fixtures are designed to be consistent and
//! predictable for unit tests.

use chrono::NaiveDate;
use core_kernel::{
    PatientId, RecommendationId, ToothNumber, ToothRecordId, TreatmentId, XrayId,
};
use domain_patient::{Patient, PatientXray, ToothRecord};
use uuid::Uuid;

/// Fixture for patient test data
pub struct PatientFixtures;

impl PatientFixtures {
    /// A standard patient with complete insurance attributes
    pub fn jane_doe() -> Patient {
        Patient::new(
            "Jane Doe",
            NaiveDate::from_ymd_opt(1985, 6, 15).unwrap(),
            "Delta Dental",
            "DD-4417-8892",
        )
    }

    /// A second patient, for cross-patient ownership tests
    pub fn john_smith() -> Patient {
        Patient::new(
            "John Smith",
            NaiveDate::from_ymd_opt(1972, 11, 3).unwrap(),
            "MetLife",
            "ML-2201-0034",
        )
    }

    /// Standard date of birth (age ~40 at time of writing)
    pub fn date_of_birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(1985, 6, 15).unwrap()
    }
}

/// Fixture for tooth record test data
pub struct ToothFixtures;

impl ToothFixtures {
    /// The tooth number most tests use (upper left first molar)
    pub fn molar() -> ToothNumber {
        ToothNumber::new(14).unwrap()
    }

    /// A record of deep caries on tooth 14, no x-ray attached
    pub fn deep_caries(patient_id: PatientId) -> ToothRecord {
        ToothRecord::new(patient_id, Self::molar(), "deep caries", None)
    }

    /// A record of a fractured cusp on tooth 30, with an x-ray attached
    pub fn fractured_cusp(patient_id: PatientId, xray_id: XrayId) -> ToothRecord {
        ToothRecord::new(
            patient_id,
            ToothNumber::new(30).unwrap(),
            "fractured distal cusp",
            Some(xray_id),
        )
    }
}

/// Fixture for x-ray upload test data
pub struct XrayFixtures;

impl XrayFixtures {
    /// A periapical x-ray upload for the given patient
    pub fn periapical(patient_id: PatientId) -> PatientXray {
        PatientXray::new(
            patient_id,
            "/var/uploads/test/periapical_14.jpg",
            "periapical_14.jpg",
            "image/jpeg",
        )
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic patient ID for testing
    pub fn patient_id() -> PatientId {
        PatientId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a deterministic tooth record ID for testing
    pub fn tooth_record_id() -> ToothRecordId {
        ToothRecordId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// Creates a deterministic x-ray ID for testing
    pub fn xray_id() -> XrayId {
        XrayId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }

    /// Creates a deterministic recommendation ID for testing
    pub fn recommendation_id() -> RecommendationId {
        RecommendationId::from_uuid(
            Uuid::parse_str("550e8400-e29b-41d4-a716-446655440004").unwrap(),
        )
    }

    /// Creates a deterministic treatment ID for testing
    pub fn treatment_id() -> TreatmentId {
        TreatmentId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440005").unwrap())
    }
}

/// Fixture for common string values
pub struct StringFixtures;

impl StringFixtures {
    /// Standard insurance carrier name
    pub fn insurance_provider() -> &'static str {
        "Delta Dental"
    }

    /// Standard policy number
    pub fn policy_number() -> &'static str {
        "DD-4417-8892"
    }

    /// Standard free-text diagnosis
    pub fn diagnosis() -> &'static str {
        "deep caries"
    }

    /// Standard recommendation reason
    pub fn reason() -> &'static str {
        "Extensive decay requiring full-coverage restoration"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_ids_are_stable() {
        assert_eq!(IdFixtures::patient_id(), IdFixtures::patient_id());
        assert_ne!(
            IdFixtures::patient_id().as_uuid(),
            IdFixtures::tooth_record_id().as_uuid()
        );
    }

    #[test]
    fn fixture_tooth_belongs_to_its_patient() {
        let patient = PatientFixtures::jane_doe();
        let tooth = ToothFixtures::deep_caries(patient.id);
        assert_eq!(tooth.patient_id, patient.id);
        assert_eq!(tooth.tooth_number.get(), 14);
    }
}
