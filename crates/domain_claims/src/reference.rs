//! Claim reference tokens
//!
//! An opaque token assigned once per submitted claim for external tracking:
//! the first eight hex characters of a freshly generated UUID, uppercased.
//! Once assigned, a reference is never regenerated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ClaimError;

/// Length of a claim reference in characters
pub const REFERENCE_LEN: usize = 8;

/// An assigned claim reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimReference(String);

impl ClaimReference {
    /// Mints a fresh reference
    pub fn mint() -> Self {
        let raw = Uuid::new_v4().simple().to_string();
        Self(raw[..REFERENCE_LEN].to_ascii_uppercase())
    }

    /// Returns the token string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClaimReference {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let well_formed = token.len() == REFERENCE_LEN
            && token.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        if well_formed {
            Ok(Self(token.to_string()))
        } else {
            Err(ClaimError::InvalidClaimReference(s.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_references_are_eight_uppercase_chars() {
        let reference = ClaimReference::mint();
        assert_eq!(reference.as_str().len(), REFERENCE_LEN);
        assert!(reference
            .as_str()
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn minted_references_are_unique_enough() {
        let a = ClaimReference::mint();
        let b = ClaimReference::mint();
        assert_ne!(a, b);
    }

    #[test]
    fn parse_rejects_lowercase_and_wrong_length() {
        assert!("abcd1234".parse::<ClaimReference>().is_err());
        assert!("ABC".parse::<ClaimReference>().is_err());
        assert!("ABCD1234".parse::<ClaimReference>().is_ok());
    }
}
