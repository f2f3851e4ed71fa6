//! Tests for the patient domain

use chrono::NaiveDate;
use core_kernel::ToothNumber;
use domain_patient::{Patient, PatientValidator, PatientXray, ToothRecord};

fn jane() -> Patient {
    Patient::new(
        "Jane Doe",
        NaiveDate::from_ymd_opt(1985, 4, 12).unwrap(),
        "Acme Dental Insurance",
        "ADI-100200",
    )
}

#[test]
fn new_patient_has_matching_timestamps() {
    let patient = jane();
    assert_eq!(patient.created_at, patient.updated_at);
}

#[test]
fn update_insurance_touches_updated_at() {
    let mut patient = jane();
    let created = patient.created_at;
    patient.update_insurance("Delta Dental", "DD-9");
    assert_eq!(patient.insurance_provider, "Delta Dental");
    assert!(patient.updated_at >= created);
}

#[test]
fn tooth_record_belongs_to_patient() {
    let patient = jane();
    let record = ToothRecord::new(
        patient.id,
        ToothNumber::new(14).unwrap(),
        "deep caries",
        None,
    );
    assert_eq!(record.patient_id, patient.id);
    assert_eq!(record.tooth_number.get(), 14);
}

#[test]
fn xray_upload_records_metadata() {
    let patient = jane();
    let xray = PatientXray::new(patient.id, "xrays/abc.png", "tooth14.png", "image/png");
    assert_eq!(xray.patient_id, patient.id);
    assert_eq!(xray.content_type, "image/png");
}

#[test]
fn patient_serde_round_trip() {
    let patient = jane();
    let json = serde_json::to_string(&patient).unwrap();
    let back: Patient = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, patient.id);
    assert_eq!(back.policy_number, patient.policy_number);
}

#[test]
fn validator_accepts_realistic_patient() {
    assert!(PatientValidator::validate(&jane()).is_valid);
}
