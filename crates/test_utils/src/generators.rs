//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::{CdtCode, PatientId, Quadrant, ToothNumber};
use domain_claims::ClaimStatus;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating valid tooth numbers (1 to 32)
pub fn tooth_number_strategy() -> impl Strategy<Value = ToothNumber> {
    (1u8..=32u8).prop_map(|n| ToothNumber::new(n).expect("Generated invalid tooth number"))
}

/// Strategy for generating quadrants
pub fn quadrant_strategy() -> impl Strategy<Value = Quadrant> {
    prop_oneof![
        Just(Quadrant::UpperRight),
        Just(Quadrant::UpperLeft),
        Just(Quadrant::LowerLeft),
        Just(Quadrant::LowerRight),
    ]
}

/// Strategy for generating the procedure codes the workflows branch on
pub fn claimable_code_strategy() -> impl Strategy<Value = CdtCode> {
    prop_oneof![
        Just(CdtCode::PorcelainCrown),
        Just(CdtCode::SrpFourOrMoreTeeth),
        Just(CdtCode::SrpOneToThreeTeeth),
        Just(CdtCode::OcclusalGuard),
    ]
}

/// Strategy for generating arbitrary well-formed CDT codes, including
/// pass-through codes the workflows have no special handling for
pub fn cdt_code_strategy() -> impl Strategy<Value = CdtCode> {
    prop_oneof![
        claimable_code_strategy(),
        (0u16..10000u16).prop_map(|n| CdtCode::Other(format!("D{n:04}"))),
    ]
}

/// Strategy for generating claim statuses
pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::Submitted),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Denied),
        Just(ClaimStatus::Paid),
    ]
}

/// Strategy for generating patient IDs
pub fn patient_id_strategy() -> impl Strategy<Value = PatientId> {
    any::<[u8; 16]>().prop_map(|bytes| PatientId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating plausible procedure fees (0.01 to 5000.00)
pub fn fee_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for generating free-text diagnoses
pub fn diagnosis_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("deep caries".to_string()),
        Just("fractured cusp".to_string()),
        Just("failed amalgam restoration".to_string()),
        Just("periapical abscess".to_string()),
        Just("generalized moderate periodontitis".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_tooth_numbers_are_in_range(tooth in tooth_number_strategy()) {
            prop_assert!((1..=32).contains(&tooth.get()));
        }

        #[test]
        fn generated_codes_are_well_formed(code in cdt_code_strategy()) {
            let s = code.as_str();
            prop_assert!(s.starts_with('D'));
            prop_assert_eq!(s.len(), 5);
        }

        #[test]
        fn tooth_quadrant_matches_generated_quadrant_ranges(tooth in tooth_number_strategy()) {
            let quadrant = tooth.quadrant();
            let n = tooth.get();
            let expected = match n {
                1..=8 => Quadrant::UpperRight,
                9..=16 => Quadrant::UpperLeft,
                17..=24 => Quadrant::LowerLeft,
                _ => Quadrant::LowerRight,
            };
            prop_assert_eq!(quadrant, expected);
        }
    }
}
