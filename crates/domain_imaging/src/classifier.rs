//! Abscess classifier port

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Label produced by the abscess classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbscessLabel {
    /// Possible abscess detected
    Abscess,
    /// No abscess detected
    NoAbscess,
    /// Sentinel: classification unavailable, not a clinical finding
    Error,
}

impl fmt::Display for AbscessLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AbscessLabel::Abscess => "Abscess",
            AbscessLabel::NoAbscess => "No Abscess",
            AbscessLabel::Error => "Error",
        };
        write!(f, "{}", name)
    }
}

/// A single classification result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: AbscessLabel,
    /// Model confidence, always within [0, 1]
    pub confidence: f32,
}

impl Prediction {
    /// Creates a prediction, clamping confidence into [0, 1]
    pub fn new(label: AbscessLabel, confidence: f32) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { label, confidence }
    }

    /// The sentinel returned when classification fails
    pub fn unavailable() -> Self {
        Self {
            label: AbscessLabel::Error,
            confidence: 0.0,
        }
    }

    /// True when this is the failure sentinel
    pub fn is_unavailable(&self) -> bool {
        self.label == AbscessLabel::Error
    }

    /// Suggested diagnosis text, `None` for the sentinel
    pub fn suggested_diagnosis(&self) -> Option<&'static str> {
        match self.label {
            AbscessLabel::Abscess => Some("possible periapical abscess (model-flagged)"),
            AbscessLabel::NoAbscess => Some("no radiographic evidence of abscess"),
            AbscessLabel::Error => None,
        }
    }
}

/// Port for x-ray abscess classification
///
/// Implementations are shared read-only across requests (`Arc<dyn
/// AbscessClassifier>`), so they must be `Send + Sync`. `predict` is
/// infallible by contract: failures become [`Prediction::unavailable`].
pub trait AbscessClassifier: Send + Sync {
    fn predict(&self, image_path: &Path) -> Prediction;
}

/// Deterministic classifier for tests and modelless deployments
#[derive(Debug, Clone)]
pub struct StubClassifier {
    prediction: Prediction,
}

impl StubClassifier {
    /// Always returns the given prediction
    pub fn returning(prediction: Prediction) -> Self {
        Self { prediction }
    }

    /// Always returns the failure sentinel
    pub fn failing() -> Self {
        Self {
            prediction: Prediction::unavailable(),
        }
    }
}

impl Default for StubClassifier {
    fn default() -> Self {
        Self::returning(Prediction::new(AbscessLabel::NoAbscess, 0.5))
    }
}

impl AbscessClassifier for StubClassifier {
    fn predict(&self, _image_path: &Path) -> Prediction {
        self.prediction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(Prediction::new(AbscessLabel::Abscess, 1.7).confidence, 1.0);
        assert_eq!(Prediction::new(AbscessLabel::Abscess, -0.3).confidence, 0.0);
        assert_eq!(Prediction::new(AbscessLabel::Abscess, f32::NAN).confidence, 0.0);
    }

    #[test]
    fn sentinel_shape() {
        let sentinel = Prediction::unavailable();
        assert_eq!(sentinel.label, AbscessLabel::Error);
        assert_eq!(sentinel.confidence, 0.0);
        assert!(sentinel.is_unavailable());
        assert!(sentinel.suggested_diagnosis().is_none());
    }

    #[test]
    fn stub_returns_configured_prediction() {
        let stub = StubClassifier::returning(Prediction::new(AbscessLabel::Abscess, 0.91));
        let prediction = stub.predict(Path::new("ignored.png"));
        assert_eq!(prediction.label, AbscessLabel::Abscess);
        assert!((prediction.confidence - 0.91).abs() < f32::EPSILON);
    }
}
