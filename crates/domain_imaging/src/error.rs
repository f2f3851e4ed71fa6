//! Imaging domain errors

use thiserror::Error;

/// Errors that can occur while classifying an x-ray
///
/// These never cross the [`crate::AbscessClassifier`] boundary; they are
/// logged and folded into the sentinel prediction.
#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("Model could not be loaded: {0}")]
    ModelLoad(String),

    #[error("Image could not be read: {0}")]
    ImageRead(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Model produced an unexpected output shape: {0}")]
    OutputShape(String),
}
