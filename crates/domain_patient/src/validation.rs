//! Patient validation rules
//!
//! # Validation Rules
//!
//! - Name must be non-empty
//! - Date of birth must be in the past and within a reasonable age range
//! - Insurance provider and policy number must be present for claim
//!   paperwork to be generated (missing ones are warnings at intake,
//!   the claim workflows re-check before submission)

use chrono::Utc;

use crate::patient::Patient;

/// Result of patient validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the record is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Adds a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for patient records
pub struct PatientValidator;

impl PatientValidator {
    /// Validates a patient record
    pub fn validate(patient: &Patient) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if patient.name.trim().is_empty() {
            result.add_error("Patient name must not be empty");
        }

        let today = Utc::now().date_naive();
        if patient.date_of_birth >= today {
            result.add_error("Date of birth must be in the past");
        } else {
            let age_days = (today - patient.date_of_birth).num_days();
            if age_days > 150 * 366 {
                result.add_error("Date of birth implies an unreasonable age");
            }
        }

        if patient.insurance_provider.trim().is_empty() {
            result.add_warning("No insurance provider on file; claims cannot be submitted");
        }
        if patient.policy_number.trim().is_empty() {
            result.add_warning("No policy number on file; claims cannot be submitted");
        }

        result
    }

    /// Validates that a patient carries the attributes claim paperwork needs
    pub fn validate_for_claims(patient: &Patient) -> ValidationResult {
        let mut result = Self::validate(patient);
        for warning in std::mem::take(&mut result.warnings) {
            result.add_error(warning);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_patient() -> Patient {
        Patient::new(
            "Jane Doe",
            NaiveDate::from_ymd_opt(1985, 4, 12).unwrap(),
            "Acme Dental Insurance",
            "ADI-100200",
        )
    }

    #[test]
    fn valid_patient_passes() {
        let result = PatientValidator::validate(&valid_patient());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn empty_name_fails() {
        let mut patient = valid_patient();
        patient.name = "  ".to_string();
        let result = PatientValidator::validate(&patient);
        assert!(!result.is_valid);
    }

    #[test]
    fn future_dob_fails() {
        let mut patient = valid_patient();
        patient.date_of_birth = Utc::now().date_naive() + chrono::Days::new(30);
        assert!(!PatientValidator::validate(&patient).is_valid);
    }

    #[test]
    fn missing_insurance_is_warning_then_error_for_claims() {
        let mut patient = valid_patient();
        patient.insurance_provider = String::new();

        let intake = PatientValidator::validate(&patient);
        assert!(intake.is_valid);
        assert_eq!(intake.warnings.len(), 1);

        let claims = PatientValidator::validate_for_claims(&patient);
        assert!(!claims.is_valid);
    }
}
