//! Core Kernel - Foundational types and utilities for the dental practice system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers for clinical entities
//! - Dental value types (tooth numbers, quadrants, CDT procedure codes)
//! - Common error types

pub mod dental;
pub mod error;
pub mod identifiers;

pub use dental::{CdtCode, Quadrant, ToothNumber};
pub use error::CoreError;
pub use identifiers::{PatientId, RecommendationId, ToothRecordId, TreatmentId, XrayId};
