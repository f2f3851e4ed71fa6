//! Rendering tests for the claim document generator

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use core_kernel::{CdtCode, Quadrant, ToothNumber};
use domain_claims::DocumentKind;
use infra_documents::{ClaimDocument, ClaimDocumentRenderer};

fn crown_document(xray_path: Option<PathBuf>) -> ClaimDocument {
    ClaimDocument {
        kind: DocumentKind::CrownClaim,
        patient_name: "Jane Doe".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1985, 4, 12).unwrap(),
        insurance_provider: "Acme Dental Insurance".to_string(),
        policy_number: "ADI-100200".to_string(),
        cdt_code: CdtCode::PorcelainCrown,
        tooth_number: Some(ToothNumber::new(14).unwrap()),
        quadrant: None,
        diagnosis: Some("deep caries".to_string()),
        clinical_note: domain_claims::notes::crown_note(
            ToothNumber::new(14).unwrap(),
            "deep caries",
        ),
        claim_reference: Some("1A2B3C4D".to_string()),
        xray_path,
    }
}

#[test]
fn renders_crown_claim_without_image() {
    let bytes = ClaimDocumentRenderer::new()
        .render(&crown_document(None))
        .unwrap();
    assert!(!bytes.is_empty());
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn unreadable_image_still_renders_a_document() {
    let document = crown_document(Some(PathBuf::from("/nonexistent/xray.png")));
    let bytes = ClaimDocumentRenderer::new().render(&document).unwrap();
    assert!(!bytes.is_empty());
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn corrupt_image_file_degrades_to_placeholder() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"this is not an image").unwrap();

    let document = crown_document(Some(file.path().to_path_buf()));
    let bytes = ClaimDocumentRenderer::new().render(&document).unwrap();
    assert!(!bytes.is_empty());
}

#[test]
fn renders_srp_preauth_with_quadrant() {
    let document = ClaimDocument {
        kind: DocumentKind::SrpPreAuth,
        patient_name: "John Roe".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1970, 1, 30).unwrap(),
        insurance_provider: "Delta Dental".to_string(),
        policy_number: "DD-445".to_string(),
        cdt_code: CdtCode::SrpFourOrMoreTeeth,
        tooth_number: None,
        quadrant: Some(Quadrant::LowerLeft),
        diagnosis: Some("generalized 5-6mm pocketing".to_string()),
        clinical_note: domain_claims::notes::srp_note(
            Some(Quadrant::LowerLeft),
            "generalized 5-6mm pocketing",
        ),
        claim_reference: None,
        xray_path: None,
    };
    let bytes = ClaimDocumentRenderer::new().render(&document).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn renders_occlusal_guard_preauth() {
    let document = ClaimDocument {
        kind: DocumentKind::OcclusalGuardPreAuth,
        patient_name: "John Roe".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1970, 1, 30).unwrap(),
        insurance_provider: "Delta Dental".to_string(),
        policy_number: "DD-445".to_string(),
        cdt_code: CdtCode::OcclusalGuard,
        tooth_number: None,
        quadrant: None,
        diagnosis: Some("moderate attrition consistent with bruxism".to_string()),
        clinical_note: domain_claims::notes::occlusal_guard_note(
            "moderate attrition consistent with bruxism",
        ),
        claim_reference: None,
        xray_path: None,
    };
    let bytes = ClaimDocumentRenderer::new().render(&document).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
