//! Insurer adjudication
//!
//! There is no real insurer integration. The production default
//! ([`NullAdjudicator`]) leaves submitted claims awaiting a decision; the
//! [`SimulatedAdjudicator`] draws a weighted random outcome and exists for
//! demos and load testing only. Which one runs is a deployment decision
//! (`API_SIMULATE_ADJUDICATION`), never silent behavior.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Outcome of adjudicating a submitted claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjudicationDecision {
    /// Approved by the insurer
    Approved,
    /// Denied by the insurer
    Denied,
    /// No decision yet; the claim stays Submitted
    Deferred,
}

/// Port for insurer adjudication of a submitted claim
pub trait Adjudicator: Send + Sync {
    fn decide(&self) -> AdjudicationDecision;
}

/// Adjudicator that never decides; claims remain Submitted until an
/// out-of-band status update arrives
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAdjudicator;

impl Adjudicator for NullAdjudicator {
    fn decide(&self) -> AdjudicationDecision {
        AdjudicationDecision::Deferred
    }
}

/// SIMULATION ONLY: draws Approved/Denied/Deferred with 70/20/10 weights
///
/// Stands in for a real insurer integration during development and demos.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedAdjudicator;

impl SimulatedAdjudicator {
    const APPROVE_WEIGHT: u32 = 70;
    const DENY_WEIGHT: u32 = 20;
}

impl Adjudicator for SimulatedAdjudicator {
    fn decide(&self) -> AdjudicationDecision {
        let roll = rand::thread_rng().gen_range(0..100u32);
        if roll < Self::APPROVE_WEIGHT {
            AdjudicationDecision::Approved
        } else if roll < Self::APPROVE_WEIGHT + Self::DENY_WEIGHT {
            AdjudicationDecision::Denied
        } else {
            AdjudicationDecision::Deferred
        }
    }
}
