//! Tests for dental value types

use core_kernel::{CdtCode, Quadrant, ToothNumber};
use proptest::prelude::*;

#[test]
fn tooth_number_serde_round_trip() {
    let tooth = ToothNumber::new(14).unwrap();
    let json = serde_json::to_string(&tooth).unwrap();
    assert_eq!(json, "14");
    let back: ToothNumber = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tooth);
}

#[test]
fn tooth_number_rejects_out_of_range_json() {
    assert!(serde_json::from_str::<ToothNumber>("0").is_err());
    assert!(serde_json::from_str::<ToothNumber>("33").is_err());
}

#[test]
fn quadrant_parses_abbreviations() {
    assert_eq!("UR".parse::<Quadrant>().unwrap(), Quadrant::UpperRight);
    assert_eq!("ll".parse::<Quadrant>().unwrap(), Quadrant::LowerLeft);
    assert_eq!(Quadrant::UpperLeft.abbreviation(), "UL");
}

#[test]
fn cdt_code_serde_uses_code_string() {
    let json = serde_json::to_string(&CdtCode::OcclusalGuard).unwrap();
    assert_eq!(json, "\"D9944\"");
    let back: CdtCode = serde_json::from_str("\"D4341\"").unwrap();
    assert_eq!(back, CdtCode::SrpFourOrMoreTeeth);
}

#[test]
fn srp_codes_are_flagged() {
    assert!(CdtCode::SrpFourOrMoreTeeth.is_srp());
    assert!(CdtCode::SrpOneToThreeTeeth.is_srp());
    assert!(!CdtCode::PorcelainCrown.is_srp());
}

proptest! {
    #[test]
    fn valid_tooth_numbers_always_construct(n in 1u8..=32) {
        let tooth = ToothNumber::new(n).unwrap();
        prop_assert_eq!(tooth.get(), n);
    }

    #[test]
    fn invalid_tooth_numbers_always_reject(n in prop_oneof![Just(0u8), 33u8..=255]) {
        prop_assert!(ToothNumber::new(n).is_err());
    }
}
