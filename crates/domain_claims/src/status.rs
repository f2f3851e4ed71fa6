//! Claim status state machine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClaimError;

/// Status of a claim or pre-authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Recorded but not yet sent to the insurer
    Pending,
    /// Sent to the insurer, awaiting a decision
    Submitted,
    /// Approved by the insurer
    Approved,
    /// Denied by the insurer
    Denied,
    /// Approved and paid out
    Paid,
}

impl ClaimStatus {
    /// Checks if transition is valid
    pub fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self, target),
            (Pending, Submitted) | (Submitted, Approved) | (Submitted, Denied) | (Approved, Paid)
        )
    }

    /// Validates and performs a transition
    pub fn transition_to(&mut self, target: ClaimStatus) -> Result<(), ClaimError> {
        if !self.can_transition_to(target) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.to_string(),
                to: target.to_string(),
            });
        }
        *self = target;
        Ok(())
    }

    /// True once the record has left the Pending state
    pub fn is_submitted(&self) -> bool {
        !matches!(self, ClaimStatus::Pending)
    }
}

impl Default for ClaimStatus {
    fn default() -> Self {
        ClaimStatus::Pending
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Submitted => "Submitted",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Denied => "Denied",
            ClaimStatus::Paid => "Paid",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ClaimStatus::Pending),
            "submitted" => Ok(ClaimStatus::Submitted),
            "approved" => Ok(ClaimStatus::Approved),
            "denied" => Ok(ClaimStatus::Denied),
            "paid" => Ok(ClaimStatus::Paid),
            other => Err(core_kernel::CoreError::validation(format!(
                "unknown claim status: {other}"
            ))
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_submits_once() {
        let mut status = ClaimStatus::Pending;
        assert!(status.transition_to(ClaimStatus::Submitted).is_ok());
        assert!(status.transition_to(ClaimStatus::Submitted).is_err());
    }

    #[test]
    fn submitted_resolves_either_way() {
        assert!(ClaimStatus::Submitted.can_transition_to(ClaimStatus::Approved));
        assert!(ClaimStatus::Submitted.can_transition_to(ClaimStatus::Denied));
        assert!(!ClaimStatus::Submitted.can_transition_to(ClaimStatus::Paid));
    }

    #[test]
    fn only_approved_gets_paid() {
        assert!(ClaimStatus::Approved.can_transition_to(ClaimStatus::Paid));
        assert!(!ClaimStatus::Denied.can_transition_to(ClaimStatus::Paid));
        assert!(!ClaimStatus::Pending.can_transition_to(ClaimStatus::Paid));
    }
}
