//! Flat JSON parser
//!
//! The plain shape for integrators that speak neither FHIR nor HL7:
//!
//! ```json
//! { "patient_id": "<uuid>", "code": "D2740", "tooth_number": 14, "quadrant": "UL" }
//! ```

use serde_json::Value;

use super::{parse_code, parse_patient_id, parse_quadrant, parse_tooth, IntakeError, IntakeOrder};

const FORMAT: &str = "flat";

pub fn parse(value: &Value) -> Result<IntakeOrder, IntakeError> {
    let patient_raw = value
        .get("patient_id")
        .and_then(Value::as_str)
        .ok_or_else(|| IntakeError::malformed(FORMAT, "missing patient_id"))?;
    let patient_id = parse_patient_id(patient_raw)?;

    let code_raw = value
        .get("code")
        .and_then(Value::as_str)
        .ok_or_else(|| IntakeError::malformed(FORMAT, "missing code"))?;
    let code = parse_code(code_raw)?;

    // tooth_number is accepted as either a JSON number or a string
    let tooth_number = match value.get("tooth_number") {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => {
            let raw = n
                .as_u64()
                .ok_or_else(|| IntakeError::invalid("tooth number", "not a whole number"))?;
            Some(parse_tooth(&raw.to_string())?)
        }
        Some(Value::String(s)) => Some(parse_tooth(s)?),
        Some(other) => {
            return Err(IntakeError::invalid(
                "tooth number",
                format!("unexpected type: {other}"),
            ))
        }
    };

    let quadrant = match value.get("quadrant").and_then(Value::as_str) {
        Some(raw) if !raw.is_empty() => Some(parse_quadrant(raw)?),
        _ => None,
    };

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

    #[test]
    fn parses_numeric_and_string_tooth() {
        let patient = Uuid::new_v4();
        for tooth in [r#"14"#, r#""14""#] {
            let value: Value = serde_json::from_str(&format!(
                r#"{{"patient_id": "{patient}", "code": "D2740", "tooth_number": {tooth}}}"#
            ))
            .unwrap();
            let order = parse(&value).unwrap();
            assert_eq!(order.tooth_number, Some(ToothNumber::new(14).unwrap()));
            assert_eq!(order.code, CdtCode::PorcelainCrown);
        }
    }

    #[test]
    fn quadrant_only_srp() {
        let patient = Uuid::new_v4();
        let value: Value = serde_json::from_str(&format!(
            r#"{{"patient_id": "{patient}", "code": "D4342", "quadrant": "UR"}}"#
        ))
        .unwrap();
        let order = parse(&value).unwrap();
        assert_eq!(order.quadrant, Some(Quadrant::UpperRight));
        assert_eq!(order.tooth_number, None);
    }

    #[test]
    fn missing_code_is_malformed() {
        let patient = Uuid::new_v4();
        let value: Value =
            serde_json::from_str(&format!(r#"{{"patient_id": "{patient}"}}"#)).unwrap();
        assert!(matches!(parse(&value), Err(IntakeError::Malformed { .. })));
    }

    #[test]
    fn malformed_code_is_invalid_field() {
        let patient = Uuid::new_v4();
        let value: Value = serde_json::from_str(&format!(
            r#"{{"patient_id": "{patient}", "code": "27-40"}}"#
        ))
        .unwrap();
        assert!(matches!(parse(&value), Err(IntakeError::InvalidField { .. })));
    }
}
