//! Patient aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::PatientId;

/// A patient of the practice, with the insurance attributes claim
/// paperwork needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    /// Unique identifier
    pub id: PatientId,
    /// Full name
    pub name: String,
    /// Date of birth
    pub date_of_birth: NaiveDate,
    /// Insurance carrier name
    pub insurance_provider: String,
    /// Policy number with the carrier
    pub policy_number: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    /// Creates a new patient record
    pub fn new(
        name: impl Into<String>,
        date_of_birth: NaiveDate,
        insurance_provider: impl Into<String>,
        policy_number: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PatientId::new_v7(),
            name: name.into(),
            date_of_birth,
            insurance_provider: insurance_provider.into(),
            policy_number: policy_number.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Updates the insurance attributes
    pub fn update_insurance(
        &mut self,
        provider: impl Into<String>,
        policy_number: impl Into<String>,
    ) {
        self.insurance_provider = provider.into();
        self.policy_number = policy_number.into();
        self.updated_at = Utc::now();
    }
}
