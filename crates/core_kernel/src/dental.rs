//! Dental value types
//!
//! Tooth numbering follows the Universal Numbering System (1-32, permanent
//! dentition). Procedure codes follow the ADA CDT code format (`D` followed
//! by four digits); the codes the workflows branch on are first-class enum
//! variants, everything else passes through as [`CdtCode::Other`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A validated tooth number in the Universal Numbering System (1..=32)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ToothNumber(u8);

impl ToothNumber {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 32;

    /// Creates a tooth number, rejecting values outside 1..=32
    pub fn new(value: u8) -> Result<Self, CoreError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::validation(format!(
                "tooth number must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }

    /// Returns the numeric value
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Returns the quadrant this tooth sits in
    pub fn quadrant(&self) -> Quadrant {
        match self.0 {
            1..=8 => Quadrant::UpperRight,
            9..=16 => Quadrant::UpperLeft,
            17..=24 => Quadrant::LowerLeft,
            _ => Quadrant::LowerRight,
        }
    }
}

impl TryFrom<u8> for ToothNumber {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ToothNumber> for u8 {
    fn from(tooth: ToothNumber) -> u8 {
        tooth.0
    }
}

impl fmt::Display for ToothNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mouth quadrant, used to scope periodontal procedures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Quadrant {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

impl Quadrant {
    /// Short clinical abbreviation (UR/UL/LL/LR)
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Quadrant::UpperRight => "UR",
            Quadrant::UpperLeft => "UL",
            Quadrant::LowerLeft => "LL",
            Quadrant::LowerRight => "LR",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quadrant::UpperRight => "upper right",
            Quadrant::UpperLeft => "upper left",
            Quadrant::LowerLeft => "lower left",
            Quadrant::LowerRight => "lower right",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Quadrant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UR" | "UPPER_RIGHT" => Ok(Quadrant::UpperRight),
            "UL" | "UPPER_LEFT" => Ok(Quadrant::UpperLeft),
            "LL" | "LOWER_LEFT" => Ok(Quadrant::LowerLeft),
            "LR" | "LOWER_RIGHT" => Ok(Quadrant::LowerRight),
            other => Err(CoreError::validation(format!("unknown quadrant: {other}"))),
        }
    }
}

/// ADA CDT procedure code
///
/// The codes the claim workflows branch on are named variants; any other
/// syntactically valid code (`D` + four digits) is carried as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CdtCode {
    /// D2740 - Crown, porcelain/ceramic
    PorcelainCrown,
    /// D4341 - Scaling and root planing, four or more teeth per quadrant
    SrpFourOrMoreTeeth,
    /// D4342 - Scaling and root planing, one to three teeth per quadrant
    SrpOneToThreeTeeth,
    /// D9944 - Occlusal guard, hard appliance, full arch
    OcclusalGuard,
    /// Any other CDT code, carried verbatim
    Other(String),
}

impl CdtCode {
    /// Returns the code string (e.g. "D2740")
    pub fn as_str(&self) -> &str {
        match self {
            CdtCode::PorcelainCrown => "D2740",
            CdtCode::SrpFourOrMoreTeeth => "D4341",
            CdtCode::SrpOneToThreeTeeth => "D4342",
            CdtCode::OcclusalGuard => "D9944",
            CdtCode::Other(code) => code,
        }
    }

    /// Human-readable procedure description
    pub fn description(&self) -> &str {
        match self {
            CdtCode::PorcelainCrown => "Crown - porcelain/ceramic",
            CdtCode::SrpFourOrMoreTeeth => {
                "Periodontal scaling and root planing - four or more teeth per quadrant"
            }
            CdtCode::SrpOneToThreeTeeth => {
                "Periodontal scaling and root planing - one to three teeth per quadrant"
            }
            CdtCode::OcclusalGuard => "Occlusal guard - hard appliance, full arch",
            CdtCode::Other(_) => "Dental procedure",
        }
    }

    /// True for either scaling/root planing code
    pub fn is_srp(&self) -> bool {
        matches!(
            self,
            CdtCode::SrpFourOrMoreTeeth | CdtCode::SrpOneToThreeTeeth
        )
    }
}

impl fmt::Display for CdtCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CdtCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        match code.as_str() {
            "D2740" => Ok(CdtCode::PorcelainCrown),
            "D4341" => Ok(CdtCode::SrpFourOrMoreTeeth),
            "D4342" => Ok(CdtCode::SrpOneToThreeTeeth),
            "D9944" => Ok(CdtCode::OcclusalGuard),
            other => {
                let mut chars = other.chars();
                let well_formed = chars.next() == Some('D')
                    && other.len() == 5
                    && chars.all(|c| c.is_ascii_digit());
                if well_formed {
                    Ok(CdtCode::Other(code))
                } else {
                    Err(CoreError::validation(format!("malformed CDT code: {s}")))
                }
            }
        }
    }
}

impl Serialize for CdtCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CdtCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooth_number_bounds() {
        assert!(ToothNumber::new(0).is_err());
        assert!(ToothNumber::new(1).is_ok());
        assert!(ToothNumber::new(32).is_ok());
        assert!(ToothNumber::new(33).is_err());
    }

    #[test]
    fn test_tooth_quadrant() {
        assert_eq!(ToothNumber::new(3).unwrap().quadrant(), Quadrant::UpperRight);
        assert_eq!(ToothNumber::new(14).unwrap().quadrant(), Quadrant::UpperLeft);
        assert_eq!(ToothNumber::new(19).unwrap().quadrant(), Quadrant::LowerLeft);
        assert_eq!(ToothNumber::new(30).unwrap().quadrant(), Quadrant::LowerRight);
    }

    #[test]
    fn test_cdt_code_round_trip() {
        let code: CdtCode = "D2740".parse().unwrap();
        assert_eq!(code, CdtCode::PorcelainCrown);
        assert_eq!(code.as_str(), "D2740");
    }

    #[test]
    fn test_cdt_code_passthrough() {
        let code: CdtCode = "d0120".parse().unwrap();
        assert_eq!(code, CdtCode::Other("D0120".to_string()));
    }

    #[test]
    fn test_cdt_code_malformed() {
        assert!("2740".parse::<CdtCode>().is_err());
        assert!("D27".parse::<CdtCode>().is_err());
        assert!("DXXXX".parse::<CdtCode>().is_err());
    }
}
