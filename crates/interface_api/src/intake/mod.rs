//! Programmatic treatment intake
//!
//! External systems submit treatments in one of three wire shapes: a
//! FHIR-like ServiceRequest resource, an HL7-style pipe-delimited message,
//! or a flat JSON object. One explicit selection step ([`parse`]) picks the
//! parser; each parser is an independent function that normalizes its shape
//! into the same [`IntakeOrder`].

use std::str::FromStr;

use thiserror::Error;

use core_kernel::{CdtCode, PatientId, Quadrant, ToothNumber};

pub mod fhir;
pub mod flat;
pub mod hl7;

/// The normalized triple every intake shape resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeOrder {
    pub patient_id: PatientId,
    pub tooth_number: Option<ToothNumber>,
    pub code: CdtCode,
    pub quadrant: Option<Quadrant>,
}

/// Errors raised while parsing an intake payload
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The payload matches none of the supported shapes
    #[error("Unrecognized intake format")]
    UnrecognizedFormat,

    /// The payload matches a shape but is malformed within it
    #[error("Malformed {format} payload: {reason}")]
    Malformed { format: &'static str, reason: String },

    /// A field is present but carries an invalid value
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl IntakeError {
    pub(crate) fn malformed(format: &'static str, reason: impl Into<String>) -> Self {
        IntakeError::Malformed {
            format,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        IntakeError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Parses an intake payload, selecting the parser by shape
///
/// Selection rules, applied in order:
/// 1. body starting with `MSH|` → HL7-style pipe-delimited
/// 2. JSON object with `"resourceType": "ServiceRequest"` → FHIR-like
/// 3. any other JSON object → flat JSON
pub fn parse(body: &str) -> Result<IntakeOrder, IntakeError> {
    let trimmed = body.trim_start();

    if trimmed.starts_with("MSH|") {
        return hl7::parse(body);
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|_| IntakeError::UnrecognizedFormat)?;

    match value.get("resourceType").and_then(|v| v.as_str()) {
        Some("ServiceRequest") => fhir::parse(&value),
        Some(other) => Err(IntakeError::malformed(
            "fhir",
            format!("unsupported resourceType: {other}"),
        )),
        None if value.is_object() => flat::parse(&value),
        None => Err(IntakeError::UnrecognizedFormat),
    }
}

pub(crate) fn parse_patient_id(raw: &str) -> Result<PatientId, IntakeError> {
    PatientId::from_str(raw)
        .map_err(|e| IntakeError::invalid("patient reference", e.to_string()))
}

pub(crate) fn parse_code(raw: &str) -> Result<CdtCode, IntakeError> {
    CdtCode::from_str(raw).map_err(|e| IntakeError::invalid("procedure code", e.to_string()))
}

pub(crate) fn parse_tooth(raw: &str) -> Result<ToothNumber, IntakeError> {
    let value: u8 = raw
        .trim()
        .parse()
        .map_err(|_| IntakeError::invalid("tooth number", format!("not a number: {raw}")))?;
    ToothNumber::new(value).map_err(|e| IntakeError::invalid("tooth number", e.to_string()))
}

pub(crate) fn parse_quadrant(raw: &str) -> Result<Quadrant, IntakeError> {
    Quadrant::from_str(raw).map_err(|e| IntakeError::invalid("quadrant", e.to_string()))
}
