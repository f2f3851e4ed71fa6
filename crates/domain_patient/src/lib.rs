//! Patient Domain
//!
//! This crate models the clinical record-keeping side of the practice:
//! patients, per-tooth observations, and uploaded x-ray images.
//!
//! # Ownership
//!
//! The patient is the root of ownership. Tooth records and x-rays reference
//! their patient and are removed with it (the schema cascades the delete).

pub mod error;
pub mod patient;
pub mod tooth;
pub mod validation;
pub mod xray;

pub use error::PatientError;
pub use patient::Patient;
pub use tooth::ToothRecord;
pub use validation::{PatientValidator, ValidationResult};
pub use xray::PatientXray;
