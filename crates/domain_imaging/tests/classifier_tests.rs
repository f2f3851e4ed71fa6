//! Contract tests for the classifier port

use std::path::Path;

use domain_imaging::{AbscessClassifier, AbscessLabel, Prediction, StubClassifier};
use proptest::prelude::*;

#[test]
fn failing_stub_returns_exact_sentinel() {
    let classifier = StubClassifier::failing();
    let prediction = classifier.predict(Path::new("does-not-matter.png"));
    assert_eq!(prediction.label, AbscessLabel::Error);
    assert_eq!(prediction.confidence, 0.0);
}

#[test]
fn error_label_displays_as_sentinel_string() {
    assert_eq!(AbscessLabel::Error.to_string(), "Error");
}

#[test]
fn prediction_serializes_for_api_use() {
    let prediction = Prediction::new(AbscessLabel::Abscess, 0.83);
    let json = serde_json::to_value(&prediction).unwrap();
    assert_eq!(json["label"], "Abscess");
}

proptest! {
    // Confidence stays within [0, 1] no matter what the model reports
    #[test]
    fn confidence_always_in_unit_interval(raw in proptest::num::f32::ANY) {
        let prediction = Prediction::new(AbscessLabel::NoAbscess, raw);
        prop_assert!((0.0..=1.0).contains(&prediction.confidence));
    }
}
