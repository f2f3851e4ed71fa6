//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the practice-management system, implemented
//! with SQLx repositories over the domain aggregates.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: each aggregate gets one
//! repository that encapsulates its SQL and maps between database rows and
//! domain types. Queries run at runtime (no compile-time verification), so
//! the crate builds without a live database.
//!
//! # Referential integrity
//!
//! The schema carries the invariants the domain also enforces:
//! - `tooth_records` is unique per `(patient_id, tooth_number)`
//! - `crown_recommendations` and `treatment_records` reference
//!   `(tooth_record_id, patient_id)` as a composite foreign key, so a claim
//!   can never point at another patient's tooth
//! - deleting a patient cascades to teeth, x-rays, and claims

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
pub use repositories::{
    PatientRepository, RecommendationRepository, StatusCount, ToothRepository,
    TreatmentRepository, XrayRepository,
};
