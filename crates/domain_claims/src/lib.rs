//! Claims Domain
//!
//! This crate implements the claim/pre-authorization lifecycle for dental
//! procedures: crown recommendations, generic treatment records, the
//! submission workflow, and (simulated) insurer adjudication.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Pending -> Submitted -> Approved -> Paid
//!                      -> Denied
//! ```
//!
//! Side effects of a submission (document rendering, notification dispatch)
//! are returned as data from the workflow and executed by the application
//! layer, so causality stays visible and the domain stays testable.

pub mod adjudication;
pub mod error;
pub mod notes;
pub mod recommendation;
pub mod reference;
pub mod status;
pub mod treatment;
pub mod workflow;

pub use adjudication::{AdjudicationDecision, Adjudicator, NullAdjudicator, SimulatedAdjudicator};
pub use error::ClaimError;
pub use recommendation::CrownRecommendation;
pub use reference::ClaimReference;
pub use status::ClaimStatus;
pub use treatment::{NewTreatment, TreatmentRecord};
pub use workflow::{
    ClaimsWorkflow, DocumentKind, RecordedEffect, SubmissionEffect, SubmissionOutcome,
};
