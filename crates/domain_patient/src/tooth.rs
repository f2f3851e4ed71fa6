//! Per-tooth observation records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{PatientId, ToothNumber, ToothRecordId, XrayId};

/// One observation of a single tooth for a patient
///
/// A patient has at most one record per tooth; later observations overwrite
/// the diagnosis and x-ray reference in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToothRecord {
    /// Unique identifier
    pub id: ToothRecordId,
    /// Owning patient
    pub patient_id: PatientId,
    /// Tooth position (Universal Numbering System)
    pub tooth_number: ToothNumber,
    /// Free-text diagnosis
    pub diagnosis: String,
    /// Supporting x-ray, when one has been taken
    pub xray_id: Option<XrayId>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl ToothRecord {
    /// Creates a new tooth record
    pub fn new(
        patient_id: PatientId,
        tooth_number: ToothNumber,
        diagnosis: impl Into<String>,
        xray_id: Option<XrayId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ToothRecordId::new_v7(),
            patient_id,
            tooth_number,
            diagnosis: diagnosis.into(),
            xray_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the diagnosis with a newer observation
    pub fn observe(&mut self, diagnosis: impl Into<String>, xray_id: Option<XrayId>) {
        self.diagnosis = diagnosis.into();
        if xray_id.is_some() {
            self.xray_id = xray_id;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observe_overwrites_diagnosis_but_keeps_xray() {
        let patient_id = PatientId::new();
        let tooth = ToothNumber::new(14).unwrap();
        let xray = XrayId::new();
        let mut record = ToothRecord::new(patient_id, tooth, "deep caries", Some(xray));

        record.observe("fractured cusp", None);

        assert_eq!(record.diagnosis, "fractured cusp");
        assert_eq!(record.xray_id, Some(xray));
    }
}
