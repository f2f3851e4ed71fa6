//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant fields
//! while using defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{CdtCode, PatientId, Quadrant, ToothNumber, ToothRecordId, XrayId};
use domain_claims::NewTreatment;
use domain_patient::{Patient, ToothRecord};
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;

use crate::fixtures::{PatientFixtures, StringFixtures, ToothFixtures};

/// Builder for constructing test patients
pub struct TestPatientBuilder {
    name: String,
    date_of_birth: NaiveDate,
    insurance_provider: String,
    policy_number: String,
}

impl Default for TestPatientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPatientBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            name: Name().fake(),
            date_of_birth: PatientFixtures::date_of_birth(),
            insurance_provider: StringFixtures::insurance_provider().to_string(),
            policy_number: StringFixtures::policy_number().to_string(),
        }
    }

    /// Sets the patient name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the date of birth
    pub fn with_date_of_birth(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = date_of_birth;
        self
    }

    /// Sets the insurance carrier
    pub fn with_insurance_provider(mut self, provider: impl Into<String>) -> Self {
        self.insurance_provider = provider.into();
        self
    }

    /// Sets the policy number
    pub fn with_policy_number(mut self, number: impl Into<String>) -> Self {
        self.policy_number = number.into();
        self
    }

    /// Builds the patient
    pub fn build(self) -> Patient {
        Patient::new(
            self.name,
            self.date_of_birth,
            self.insurance_provider,
            self.policy_number,
        )
    }
}

/// Builder for constructing test tooth records
pub struct TestToothRecordBuilder {
    patient_id: PatientId,
    tooth_number: ToothNumber,
    diagnosis: String,
    xray_id: Option<XrayId>,
}

impl TestToothRecordBuilder {
    /// Creates a new builder for the given patient
    pub fn for_patient(patient_id: PatientId) -> Self {
        Self {
            patient_id,
            tooth_number: ToothFixtures::molar(),
            diagnosis: StringFixtures::diagnosis().to_string(),
            xray_id: None,
        }
    }

    /// Sets the tooth number
    pub fn with_tooth_number(mut self, tooth_number: ToothNumber) -> Self {
        self.tooth_number = tooth_number;
        self
    }

    /// Sets the diagnosis
    pub fn with_diagnosis(mut self, diagnosis: impl Into<String>) -> Self {
        self.diagnosis = diagnosis.into();
        self
    }

    /// Attaches an x-ray
    pub fn with_xray(mut self, xray_id: XrayId) -> Self {
        self.xray_id = Some(xray_id);
        self
    }

    /// Builds the tooth record
    pub fn build(self) -> ToothRecord {
        ToothRecord::new(
            self.patient_id,
            self.tooth_number,
            self.diagnosis,
            self.xray_id,
        )
    }
}

/// Builder for constructing treatment inputs
pub struct TestTreatmentBuilder {
    patient_id: PatientId,
    tooth_record_id: Option<ToothRecordId>,
    tooth_number: Option<ToothNumber>,
    cdt_code: CdtCode,
    quadrant: Option<Quadrant>,
    fee: Option<Decimal>,
}

impl TestTreatmentBuilder {
    /// Creates a new builder for the given patient, defaulting to an
    /// occlusal guard (a code with no tooth or quadrant requirement)
    pub fn for_patient(patient_id: PatientId) -> Self {
        Self {
            patient_id,
            tooth_record_id: None,
            tooth_number: None,
            cdt_code: CdtCode::OcclusalGuard,
            quadrant: None,
            fee: None,
        }
    }

    /// Scopes the treatment to a tooth record
    pub fn on_tooth(mut self, tooth: &ToothRecord) -> Self {
        self.tooth_record_id = Some(tooth.id);
        self.tooth_number = Some(tooth.tooth_number);
        self
    }

    /// Sets the procedure code
    pub fn with_code(mut self, code: CdtCode) -> Self {
        self.cdt_code = code;
        self
    }

    /// Scopes the treatment to a quadrant
    pub fn in_quadrant(mut self, quadrant: Quadrant) -> Self {
        self.quadrant = Some(quadrant);
        self
    }

    /// Sets the fee
    pub fn with_fee(mut self, fee: Decimal) -> Self {
        self.fee = Some(fee);
        self
    }

    /// Builds the treatment input
    pub fn build(self) -> NewTreatment {
        NewTreatment {
            patient_id: self.patient_id,
            tooth_record_id: self.tooth_record_id,
            tooth_number: self.tooth_number,
            cdt_code: self.cdt_code,
            quadrant: self.quadrant,
            fee: self.fee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn patient_builder_applies_overrides() {
        let patient = TestPatientBuilder::new()
            .with_name("Ana Ruiz")
            .with_insurance_provider("Cigna")
            .build();
        assert_eq!(patient.name, "Ana Ruiz");
        assert_eq!(patient.insurance_provider, "Cigna");
        assert_eq!(patient.policy_number, StringFixtures::policy_number());
    }

    #[test]
    fn treatment_builder_scopes_to_tooth() {
        let patient_id = PatientId::new();
        let tooth = TestToothRecordBuilder::for_patient(patient_id).build();
        let input = TestTreatmentBuilder::for_patient(patient_id)
            .with_code(CdtCode::PorcelainCrown)
            .on_tooth(&tooth)
            .with_fee(dec!(1250.00))
            .build();
        assert_eq!(input.tooth_record_id, Some(tooth.id));
        assert_eq!(input.tooth_number, Some(tooth.tooth_number));
        assert_eq!(input.fee, Some(dec!(1250.00)));
    }
}
