//! Clinical note templates
//!
//! Pure string interpolation: the inputs are never rejected and always
//! appear verbatim in the output.

use core_kernel::{Quadrant, ToothNumber};

/// Note accompanying a crown claim
pub fn crown_note(tooth: ToothNumber, diagnosis: &str) -> String {
    format!(
        "Tooth #{tooth} presents with {diagnosis}. \
         A full-coverage crown is recommended to preserve the structure and function of the tooth. \
         This procedure is medically necessary based on the patient's dental condition."
    )
}

/// Note accompanying a scaling/root-planing pre-authorization
pub fn srp_note(quadrant: Option<Quadrant>, diagnosis: &str) -> String {
    let scope = match quadrant {
        Some(q) => format!("the {q} quadrant"),
        None => "the affected quadrants".to_string(),
    };
    format!(
        "Periodontal charting and radiographs show {diagnosis}. \
         Scaling and root planing is indicated for {scope} to arrest further attachment loss."
    )
}

/// Note accompanying an occlusal-guard pre-authorization
pub fn occlusal_guard_note(diagnosis: &str) -> String {
    format!(
        "Examination reveals {diagnosis}. \
         A hard full-arch occlusal guard is recommended to protect the dentition from \
         further parafunctional wear."
    )
}

/// Delivery note sent alongside an approved occlusal-guard submission
pub fn occlusal_guard_delivery_note() -> String {
    "Occlusal guard to be fabricated from full-arch impressions; patient to be scheduled \
     for delivery and fit adjustment."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crown_note_contains_both_inputs_verbatim() {
        let tooth = ToothNumber::new(14).unwrap();
        let note = crown_note(tooth, "deep caries");
        assert!(note.contains("Tooth #14 presents with deep caries"));
    }

    #[test]
    fn srp_note_names_the_quadrant() {
        let note = srp_note(Some(Quadrant::LowerLeft), "generalized 5-6mm pocketing");
        assert!(note.contains("lower left quadrant"));
        assert!(note.contains("generalized 5-6mm pocketing"));
    }

    #[test]
    fn occlusal_guard_note_contains_diagnosis() {
        let note = occlusal_guard_note("moderate attrition consistent with bruxism");
        assert!(note.contains("moderate attrition consistent with bruxism"));
    }
}
