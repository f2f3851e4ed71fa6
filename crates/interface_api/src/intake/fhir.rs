//! FHIR-like ServiceRequest parser
//!
//! Accepts the subset of a ServiceRequest resource external schedulers
//! actually send:
//!
//! ```json
//! {
//!   "resourceType": "ServiceRequest",
//!   "subject": { "reference": "Patient/<uuid>" },
//!   "code": { "coding": [ { "code": "D2740" } ] },
//!   "bodySite": [ { "text": "14" } ]
//! }
//! ```
//!
//! `bodySite[].text` carries either a tooth number or a quadrant
//! abbreviation (UR/UL/LL/LR); both may appear as separate entries.

use serde_json::Value;

use super::{parse_code, parse_patient_id, parse_quadrant, parse_tooth, IntakeError, IntakeOrder};

const FORMAT: &str = "fhir";

pub fn parse(value: &Value) -> Result<IntakeOrder, IntakeError> {
    let reference = value
        .pointer("/subject/reference")
        .and_then(Value::as_str)
        .ok_or_else(|| IntakeError::malformed(FORMAT, "missing subject.reference"))?;
    let patient_ref = reference
        .strip_prefix("Patient/")
        .ok_or_else(|| {
            IntakeError::malformed(FORMAT, "subject.reference must be 'Patient/<id>'")
        })?;
    let patient_id = parse_patient_id(patient_ref)?;

    let code_str = value
        .pointer("/code/coding/0/code")
        .and_then(Value::as_str)
        .ok_or_else(|| IntakeError::malformed(FORMAT, "missing code.coding[0].code"))?;
    let code = parse_code(code_str)?;

    let mut tooth_number = None;
    let mut quadrant = None;
    if let Some(sites) = value.get("bodySite").and_then(Value::as_array) {
        for site in sites {
            let Some(text) = site.get("text").and_then(Value::as_str) else {
                continue;
            };
            // Quadrant abbreviations first; anything else must be a tooth
            if let Ok(q) = parse_quadrant(text) {
                quadrant = Some(q);
            } else {
                tooth_number = Some(parse_tooth(text)?);
            }
        }
    }

    Ok(IntakeOrder {
        patient_id,
        tooth_number,
        code,
        quadrant,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{CdtCode, Quadrant, ToothNumber};
    use uuid::Uuid;

    fn request(patient: Uuid, code: &str, sites: &str) -> Value {
        serde_json::from_str(&format!(
            r#"{{
                "resourceType": "ServiceRequest",
                "subject": {{"reference": "Patient/{patient}"}},
                "code": {{"coding": [{{"system": "http://ada.org/cdt", "code": "{code}"}}]}},
                "bodySite": {sites}
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn parses_crown_request_with_tooth() {
        let patient = Uuid::new_v4();
        let order = parse(&request(patient, "D2740", r#"[{"text": "3"}]"#)).unwrap();
        assert_eq!(order.patient_id, patient.into());
        assert_eq!(order.code, CdtCode::PorcelainCrown);
        assert_eq!(order.tooth_number, Some(ToothNumber::new(3).unwrap()));
        assert_eq!(order.quadrant, None);
    }

    #[test]
    fn parses_srp_request_with_quadrant_site() {
        let patient = Uuid::new_v4();
        let order = parse(&request(patient, "D4342", r#"[{"text": "UR"}]"#)).unwrap();
        assert_eq!(order.quadrant, Some(Quadrant::UpperRight));
        assert_eq!(order.tooth_number, None);
    }

    #[test]
    fn missing_subject_is_malformed() {
        let value: Value = serde_json::from_str(
            r#"{"resourceType": "ServiceRequest", "code": {"coding": [{"code": "D2740"}]}}"#,
        )
        .unwrap();
        assert!(matches!(parse(&value), Err(IntakeError::Malformed { .. })));
    }

    #[test]
    fn out_of_range_tooth_is_invalid_field() {
        let patient = Uuid::new_v4();
        let result = parse(&request(patient, "D2740", r#"[{"text": "48"}]"#));
        assert!(matches!(result, Err(IntakeError::InvalidField { .. })));
    }
}
