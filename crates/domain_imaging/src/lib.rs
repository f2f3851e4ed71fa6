//! Imaging Domain
//!
//! Wraps a pre-trained abscess classifier behind the [`AbscessClassifier`]
//! trait so the claim workflows can suggest a diagnosis from the latest
//! x-ray without depending on the inference stack.
//!
//! # Failure policy
//!
//! Classification is advisory. Every implementation folds internal failures
//! into the sentinel prediction (label `Error`, confidence 0.0) instead of
//! returning an error; callers must treat the sentinel as "diagnosis
//! unavailable", never as "healthy".
//!
//! The ONNX-backed implementation lives behind the `onnx-model` feature;
//! deployments without a model use [`StubClassifier`].

pub mod classifier;
pub mod error;

#[cfg(feature = "onnx-model")]
pub mod onnx;

pub use classifier::{AbscessClassifier, AbscessLabel, Prediction, StubClassifier};
pub use error::ImagingError;

#[cfg(feature = "onnx-model")]
pub use onnx::OnnxAbscessClassifier;
