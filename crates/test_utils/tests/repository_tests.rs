//! Repository Round-Trip Tests
//!
//! These tests run against a real PostgreSQL instance started through
//! testcontainers. They are ignored by default; run them with
//! `cargo test -- --ignored` when Docker is available.

use core_kernel::{CdtCode, Quadrant, ToothNumber};
use domain_claims::{ClaimStatus, CrownRecommendation, TreatmentRecord};
use infra_db::{
    PatientRepository, RecommendationRepository, ToothRepository, TreatmentRepository,
    XrayRepository,
};
use rust_decimal_macros::dec;

use test_utils::{
    get_shared_test_database, PatientFixtures, TestPatientBuilder, TestToothRecordBuilder,
    TestTreatmentBuilder, XrayFixtures,
};

#[tokio::test]
#[ignore]
async fn patient_round_trip_and_delete() {
    let db = get_shared_test_database().await;
    let repo = PatientRepository::new(db.pool.clone());

    let patient = TestPatientBuilder::new().with_name("Round Trip").build();
    repo.create(&patient).await.unwrap();

    let loaded = repo.get_by_id(patient.id).await.unwrap();
    assert_eq!(loaded.name, "Round Trip");
    assert_eq!(loaded.insurance_provider, patient.insurance_provider);

    repo.delete(patient.id).await.unwrap();
    let missing = repo.get_by_id(patient.id).await;
    assert!(missing.is_err());
}

#[tokio::test]
#[ignore]
async fn tooth_upsert_overwrites_in_place() {
    let db = get_shared_test_database().await;
    let patients = PatientRepository::new(db.pool.clone());
    let teeth = ToothRepository::new(db.pool.clone());

    let patient = PatientFixtures::jane_doe();
    patients.create(&patient).await.unwrap();

    let first = TestToothRecordBuilder::for_patient(patient.id)
        .with_tooth_number(ToothNumber::new(8).unwrap())
        .with_diagnosis("chipped incisal edge")
        .build();
    let stored = teeth.upsert(&first).await.unwrap();

    // Same patient, same tooth: the later observation wins and the row
    // identity is preserved
    let second = TestToothRecordBuilder::for_patient(patient.id)
        .with_tooth_number(ToothNumber::new(8).unwrap())
        .with_diagnosis("fractured incisal edge")
        .build();
    let updated = teeth.upsert(&second).await.unwrap();

    assert_eq!(updated.id, stored.id);
    assert_eq!(updated.diagnosis, "fractured incisal edge");

    let records = teeth.find_by_patient(patient.id).await.unwrap();
    assert_eq!(
        records
            .iter()
            .filter(|r| r.tooth_number.get() == 8)
            .count(),
        1
    );
}

#[tokio::test]
#[ignore]
async fn latest_xray_orders_by_upload_time() {
    let db = get_shared_test_database().await;
    let patients = PatientRepository::new(db.pool.clone());
    let xrays = XrayRepository::new(db.pool.clone());

    let patient = TestPatientBuilder::new().build();
    patients.create(&patient).await.unwrap();

    assert!(xrays.latest_for_patient(patient.id).await.unwrap().is_none());

    let older = XrayFixtures::periapical(patient.id);
    xrays.create(&older).await.unwrap();
    let mut newer = XrayFixtures::periapical(patient.id);
    newer.uploaded_at = older.uploaded_at + chrono::Duration::seconds(5);
    xrays.create(&newer).await.unwrap();

    let latest = xrays.latest_for_patient(patient.id).await.unwrap().unwrap();
    assert_eq!(latest.id, newer.id);
}

#[tokio::test]
#[ignore]
async fn recommendation_rejects_tooth_of_another_patient() {
    let db = get_shared_test_database().await;
    let patients = PatientRepository::new(db.pool.clone());
    let teeth = ToothRepository::new(db.pool.clone());
    let recommendations = RecommendationRepository::new(db.pool.clone());

    let jane = TestPatientBuilder::new().build();
    let john = TestPatientBuilder::new().build();
    patients.create(&jane).await.unwrap();
    patients.create(&john).await.unwrap();

    let janes_tooth = teeth
        .upsert(&TestToothRecordBuilder::for_patient(jane.id).build())
        .await
        .unwrap();

    let mut rec =
        CrownRecommendation::for_tooth(jane.id, &janes_tooth, "restoration", None).unwrap();
    // Point the row at the wrong patient; the composite foreign key must
    // reject the insert
    rec.patient_id = john.id;

    let result = recommendations.create(&rec).await;
    assert!(result.is_err());
}

#[tokio::test]
#[ignore]
async fn submitted_treatment_survives_save_and_counts() {
    let db = get_shared_test_database().await;
    let patients = PatientRepository::new(db.pool.clone());
    let treatments = TreatmentRepository::new(db.pool.clone());

    let patient = TestPatientBuilder::new().build();
    patients.create(&patient).await.unwrap();

    let input = TestTreatmentBuilder::for_patient(patient.id)
        .with_code(CdtCode::SrpFourOrMoreTeeth)
        .in_quadrant(Quadrant::LowerLeft)
        .with_fee(dec!(310.00))
        .build();
    let mut treatment = TreatmentRecord::new(input);
    treatments.create(&treatment).await.unwrap();

    treatment.status = ClaimStatus::Submitted;
    let reference = treatment.ensure_claim_reference();
    treatment.submitted_at = Some(chrono::Utc::now());
    treatments.save(&treatment).await.unwrap();

    let loaded = treatments.get_by_id(treatment.id).await.unwrap();
    assert_eq!(loaded.status, ClaimStatus::Submitted);
    assert_eq!(loaded.claim_reference, Some(reference));
    assert_eq!(loaded.quadrant, Some(Quadrant::LowerLeft));
    assert_eq!(loaded.fee, Some(dec!(310.00)));

    let counts = treatments.counts_by_status().await.unwrap();
    let submitted = counts
        .iter()
        .find(|c| c.status == ClaimStatus::Submitted)
        .map(|c| c.count)
        .unwrap_or(0);
    assert!(submitted >= 1);

    let recent = treatments.recent_submissions(10).await.unwrap();
    assert!(recent.iter().any(|t| t.id == treatment.id));
}
