//! Comprehensive tests for domain_claims

use std::sync::Arc;

use core_kernel::{CdtCode, PatientId, Quadrant, ToothNumber};
use domain_patient::{Patient, ToothRecord};

use domain_claims::adjudication::{
    AdjudicationDecision, Adjudicator, NullAdjudicator, SimulatedAdjudicator,
};
use domain_claims::notes;
use domain_claims::recommendation::CrownRecommendation;
use domain_claims::reference::ClaimReference;
use domain_claims::status::ClaimStatus;
use domain_claims::treatment::{NewTreatment, TreatmentRecord};
use domain_claims::workflow::{ClaimsWorkflow, DocumentKind, RecordedEffect, SubmissionEffect};

use proptest::prelude::*;

fn jane() -> Patient {
    Patient::new(
        "Jane Doe",
        chrono::NaiveDate::from_ymd_opt(1985, 4, 12).unwrap(),
        "Acme Dental Insurance",
        "ADI-100200",
    )
}

fn tooth(patient: &Patient, number: u8, diagnosis: &str) -> ToothRecord {
    ToothRecord::new(
        patient.id,
        ToothNumber::new(number).unwrap(),
        diagnosis,
        None,
    )
}

// ============================================================================
// Clinical note tests
// ============================================================================

mod note_tests {
    use super::*;

    #[test]
    fn test_crown_note_verbatim_inputs() {
        let note = notes::crown_note(ToothNumber::new(14).unwrap(), "deep caries");
        assert!(note.contains("Tooth #14 presents with deep caries"));
        assert!(note.contains("full-coverage crown"));
    }

    proptest! {
        #[test]
        fn prop_crown_note_contains_tooth_and_diagnosis(
            n in 1u8..=32,
            diagnosis in "[a-zA-Z0-9 ,.-]{1,60}",
        ) {
            let tooth = ToothNumber::new(n).unwrap();
            let note = notes::crown_note(tooth, &diagnosis);
            let expected_tooth = format!("Tooth #{}", n);
            prop_assert!(note.contains(&expected_tooth));
            prop_assert!(note.contains(diagnosis.as_str()));
        }
    }
}

// ============================================================================
// Status machine tests
// ============================================================================

mod status_tests {
    use super::*;

    #[test]
    fn test_full_happy_path() {
        let mut status = ClaimStatus::Pending;
        status.transition_to(ClaimStatus::Submitted).unwrap();
        status.transition_to(ClaimStatus::Approved).unwrap();
        status.transition_to(ClaimStatus::Paid).unwrap();
        assert_eq!(status, ClaimStatus::Paid);
    }

    #[test]
    fn test_denied_is_terminal() {
        let mut status = ClaimStatus::Submitted;
        status.transition_to(ClaimStatus::Denied).unwrap();
        assert!(status.transition_to(ClaimStatus::Approved).is_err());
        assert!(status.transition_to(ClaimStatus::Paid).is_err());
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in [
            ClaimStatus::Pending,
            ClaimStatus::Submitted,
            ClaimStatus::Approved,
            ClaimStatus::Denied,
            ClaimStatus::Paid,
        ] {
            let parsed: ClaimStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }
}

// ============================================================================
// Claim reference tests
// ============================================================================

mod reference_tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_minted_references_are_well_formed(_seed in 0u8..10) {
            let reference = ClaimReference::mint();
            prop_assert_eq!(reference.as_str().len(), 8);
            prop_assert!(reference
                .as_str()
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }
}

// ============================================================================
// Workflow tests
// ============================================================================

mod workflow_tests {
    use super::*;

    fn workflow() -> ClaimsWorkflow {
        ClaimsWorkflow::new(Arc::new(NullAdjudicator))
    }

    #[test]
    fn test_crown_treatment_creates_matching_recommendation() {
        let patient = jane();
        let tooth = tooth(&patient, 14, "deep caries");

        let (treatment, effects) = workflow()
            .record_treatment(
                NewTreatment {
                    patient_id: patient.id,
                    tooth_record_id: Some(tooth.id),
                    tooth_number: Some(tooth.tooth_number),
                    cdt_code: CdtCode::PorcelainCrown,
                    quadrant: None,
                    fee: None,
                },
                Some(&tooth),
                None,
            )
            .unwrap();

        let recommendations: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                RecordedEffect::CreateCrownRecommendation(rec) => Some(rec),
                _ => None,
            })
            .collect();

        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].patient_id, patient.id);
        assert_eq!(recommendations[0].tooth_record_id, tooth.id);
        assert_eq!(treatment.status, ClaimStatus::Pending);
    }

    #[test]
    fn test_non_special_code_has_no_effects() {
        let patient = jane();
        let (_, effects) = workflow()
            .record_treatment(
                NewTreatment {
                    patient_id: patient.id,
                    tooth_record_id: None,
                    tooth_number: None,
                    cdt_code: "D0120".parse().unwrap(),
                    quadrant: None,
                    fee: None,
                },
                None,
                None,
            )
            .unwrap();
        assert!(effects.is_empty());
    }

    #[test]
    fn test_tooth_of_other_patient_rejected_at_recording() {
        let patient = jane();
        let stranger_tooth = ToothRecord::new(
            PatientId::new(),
            ToothNumber::new(3).unwrap(),
            "deep caries",
            None,
        );
        let result = workflow().record_treatment(
            NewTreatment {
                patient_id: patient.id,
                tooth_record_id: Some(stranger_tooth.id),
                tooth_number: Some(stranger_tooth.tooth_number),
                cdt_code: CdtCode::PorcelainCrown,
                quadrant: None,
                fee: None,
            },
            Some(&stranger_tooth),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_srp_submission_renders_preauth() {
        let patient = jane();
        let (mut treatment, _) = workflow()
            .record_treatment(
                NewTreatment {
                    patient_id: patient.id,
                    tooth_record_id: None,
                    tooth_number: None,
                    cdt_code: CdtCode::SrpOneToThreeTeeth,
                    quadrant: Some(Quadrant::UpperRight),
                    fee: None,
                },
                None,
                None,
            )
            .unwrap();

        let outcome = workflow().submit_treatment(&mut treatment).unwrap();
        assert_eq!(
            outcome.effects,
            vec![SubmissionEffect::RenderAndDispatch(DocumentKind::SrpPreAuth)]
        );
        assert!(treatment.submitted_at.is_some());
    }

    #[test]
    fn test_recommendation_submit_keeps_reference_across_status_updates() {
        let patient = jane();
        let tooth = tooth(&patient, 14, "deep caries");
        let mut rec =
            CrownRecommendation::for_tooth(patient.id, &tooth, "restoration", None).unwrap();

        let outcome = workflow().submit_recommendation(&mut rec).unwrap();
        assert_eq!(rec.claim_reference, Some(outcome.reference.clone()));

        rec.update_status(ClaimStatus::Approved).unwrap();
        assert_eq!(rec.claim_reference, Some(outcome.reference));
    }

    // The end-to-end example from the product notes: Jane Doe, tooth 14,
    // deep caries, simulated adjudication.
    #[test]
    fn test_jane_doe_crown_example() {
        let patient = jane();
        let tooth = tooth(&patient, 14, "deep caries");
        let workflow = ClaimsWorkflow::new(Arc::new(SimulatedAdjudicator));

        let (_, effects) = workflow
            .record_treatment(
                NewTreatment {
                    patient_id: patient.id,
                    tooth_record_id: Some(tooth.id),
                    tooth_number: Some(tooth.tooth_number),
                    cdt_code: CdtCode::PorcelainCrown,
                    quadrant: None,
                    fee: None,
                },
                Some(&tooth),
                None,
            )
            .unwrap();

        let mut rec = match effects.into_iter().next().unwrap() {
            RecordedEffect::CreateCrownRecommendation(rec) => *rec,
            other => panic!("unexpected effect: {other:?}"),
        };
        assert!(rec
            .clinical_note
            .contains("Tooth #14 presents with deep caries"));

        let outcome = workflow.submit_recommendation(&mut rec).unwrap();
        assert_eq!(outcome.reference.as_str().len(), 8);
        assert!(outcome
            .reference
            .as_str()
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert!(matches!(
            outcome.status,
            ClaimStatus::Approved | ClaimStatus::Denied | ClaimStatus::Submitted
        ));
    }
}

// ============================================================================
// Adjudication tests
// ============================================================================

mod adjudication_tests {
    use super::*;

    struct FixedAdjudicator(AdjudicationDecision);

    impl Adjudicator for FixedAdjudicator {
        fn decide(&self) -> AdjudicationDecision {
            self.0
        }
    }

    #[test]
    fn test_approved_decision_resolves_treatment() {
        let workflow = ClaimsWorkflow::new(Arc::new(FixedAdjudicator(
            AdjudicationDecision::Approved,
        )));
        let mut treatment = TreatmentRecord::new(NewTreatment {
            patient_id: PatientId::new(),
            tooth_record_id: None,
            tooth_number: None,
            cdt_code: CdtCode::OcclusalGuard,
            quadrant: None,
            fee: None,
        });

        let outcome = workflow.submit_treatment(&mut treatment).unwrap();
        assert_eq!(outcome.status, ClaimStatus::Approved);
        assert_eq!(treatment.status, ClaimStatus::Approved);
    }

    #[test]
    fn test_deferred_decision_leaves_submitted() {
        let workflow = ClaimsWorkflow::new(Arc::new(FixedAdjudicator(
            AdjudicationDecision::Deferred,
        )));
        let mut treatment = TreatmentRecord::new(NewTreatment {
            patient_id: PatientId::new(),
            tooth_record_id: None,
            tooth_number: None,
            cdt_code: CdtCode::SrpFourOrMoreTeeth,
            quadrant: Some(Quadrant::LowerRight),
            fee: None,
        });

        let outcome = workflow.submit_treatment(&mut treatment).unwrap();
        assert_eq!(outcome.status, ClaimStatus::Submitted);
    }
}
