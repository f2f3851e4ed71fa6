//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use domain_claims::{ClaimReference, ClaimStatus, CrownRecommendation, TreatmentRecord};

/// Asserts that a claim reference is well formed: eight characters, all
/// uppercase hex digits
///
/// # Panics
///
/// Panics if the reference has the wrong length or contains characters
/// outside `[0-9A-F]`
pub fn assert_reference_well_formed(reference: &ClaimReference) {
    let token = reference.as_str();
    assert_eq!(
        token.len(),
        8,
        "Claim reference has wrong length: {:?}",
        token
    );
    assert!(
        token.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)),
        "Claim reference contains non-hex characters: {:?}",
        token
    );
}

/// Asserts that a treatment record has never been submitted
pub fn assert_treatment_unsubmitted(treatment: &TreatmentRecord) {
    assert_eq!(
        treatment.status,
        ClaimStatus::Pending,
        "Expected pending treatment, got {}",
        treatment.status
    );
    assert!(
        treatment.claim_reference.is_none(),
        "Unsubmitted treatment carries a claim reference: {:?}",
        treatment.claim_reference
    );
    assert!(
        treatment.submitted_at.is_none(),
        "Unsubmitted treatment carries a submission timestamp"
    );
}

/// Asserts that a treatment record has been submitted: it carries a
/// well-formed reference, a submission timestamp, and a post-Pending status
pub fn assert_treatment_submitted(treatment: &TreatmentRecord) {
    assert!(
        treatment.status.is_submitted(),
        "Expected submitted treatment, got {}",
        treatment.status
    );
    match &treatment.claim_reference {
        Some(reference) => assert_reference_well_formed(reference),
        None => panic!("Submitted treatment has no claim reference"),
    }
    assert!(
        treatment.submitted_at.is_some(),
        "Submitted treatment has no submission timestamp"
    );
}

/// Asserts that a crown recommendation has been submitted
pub fn assert_recommendation_submitted(recommendation: &CrownRecommendation) {
    assert!(
        recommendation.status.is_submitted(),
        "Expected submitted recommendation, got {}",
        recommendation.status
    );
    match &recommendation.claim_reference {
        Some(reference) => assert_reference_well_formed(reference),
        None => panic!("Submitted recommendation has no claim reference"),
    }
    assert!(
        recommendation.submitted_at.is_some(),
        "Submitted recommendation has no submission timestamp"
    );
}
