//! HL7-style pipe-delimited parser
//!
//! Accepts the minimal two-segment message the practice's legacy scheduler
//! emits: an `MSH` header followed by one `DTX` (dental treatment) segment.
//!
//! ```text
//! MSH|^~\&|SCHEDULER|CLINIC|||20240101||DFT^P03
//! DTX|<patient uuid>|<cdt code>|<tooth number>|<quadrant>
//! ```
//!
//! Tooth number and quadrant are optional and may be left empty.

use super::{parse_code, parse_patient_id, parse_quadrant, parse_tooth, IntakeError, IntakeOrder};

const FORMAT: &str = "hl7";

pub fn parse(body: &str) -> Result<IntakeOrder, IntakeError> {
    let mut lines = body.lines().map(str::trim).filter(|l| !l.is_empty());

    match lines.next() {
        Some(header) if header.starts_with("MSH|") => {}
        _ => return Err(IntakeError::malformed(FORMAT, "missing MSH header segment")),
    }

    let treatment = lines
        .find(|line| line.starts_with("DTX|"))
        .ok_or_else(|| IntakeError::malformed(FORMAT, "missing DTX segment"))?;

    let fields: Vec<&str> = treatment.split('|').collect();
    if fields.len() < 3 {
        return Err(IntakeError::malformed(
            FORMAT,
            "DTX segment needs at least patient and code fields",
        ));
    }

    let patient_id = parse_patient_id(fields[1])?;
    let code = parse_code(fields[2])?;

    let tooth_number = match fields.get(3).copied().filter(|f| !f.is_empty()) {
        Some(raw) => Some(parse_tooth(raw)?),
        None => None,
    };
    let quadrant = match fields.get(4).copied().filter(|f| !f.is_empty()) {
        Some(raw) => Some(parse_quadrant(raw)?),
        None => None,
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

    const MSH: &str = r"MSH|^~\&|SCHEDULER|CLINIC|||20240101||DFT^P03";

    #[test]
    fn parses_full_segment() {
        let patient = Uuid::new_v4();
        let body = format!("{MSH}\nDTX|{patient}|D4341|19|LL");
        let order = parse(&body).unwrap();
        assert_eq!(order.patient_id, patient.into());
        assert_eq!(order.code, CdtCode::SrpFourOrMoreTeeth);
        assert_eq!(order.tooth_number, Some(ToothNumber::new(19).unwrap()));
        assert_eq!(order.quadrant, Some(Quadrant::LowerLeft));
    }

    #[test]
    fn empty_optional_fields_are_none() {
        let patient = Uuid::new_v4();
        let body = format!("{MSH}\nDTX|{patient}|D9944||");
        let order = parse(&body).unwrap();
        assert_eq!(order.tooth_number, None);
        assert_eq!(order.quadrant, None);
    }

    #[test]
    fn missing_dtx_segment_is_malformed() {
        let result = parse(MSH);
        assert!(matches!(result, Err(IntakeError::Malformed { .. })));
    }

    #[test]
    fn bad_patient_uuid_is_invalid_field() {
        let body = format!("{MSH}\nDTX|not-a-uuid|D2740|14|");
        assert!(matches!(
            parse(&body),
            Err(IntakeError::InvalidField { .. })
        ));
    }
}
