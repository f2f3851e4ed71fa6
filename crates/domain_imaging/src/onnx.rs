//! ONNX-backed abscess classifier
//!
//! Loads the exported model once at construction and runs a standard
//! image-classification pipeline: decode, resize to 224x224, normalize with
//! ImageNet statistics, run, softmax over the two output logits.

use std::path::Path;
use std::sync::Mutex;

use ndarray::Array4;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use tracing::warn;

use crate::classifier::{AbscessClassifier, AbscessLabel, Prediction};
use crate::error::ImagingError;

const INPUT_SIDE: u32 = 224;
const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Abscess classifier backed by an ONNX model file
pub struct OnnxAbscessClassifier {
    // ort sessions take &mut self to run; the adapter itself stays Sync
    session: Mutex<Session>,
}

impl OnnxAbscessClassifier {
    /// Loads the model from disk
    ///
    /// # Errors
    ///
    /// Returns [`ImagingError::ModelLoad`] when the file is missing or not a
    /// valid ONNX graph. Load failures are the one place errors surface:
    /// a deployment that cannot load its model should not start.
    pub fn load(model_path: &Path) -> Result<Self, ImagingError> {
        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.commit_from_file(model_path))
            .map_err(|e| ImagingError::ModelLoad(e.to_string()))?;

        Ok(Self {
            session: Mutex::new(session),
        })
    }

    fn preprocess(image_path: &Path) -> Result<Array4<f32>, ImagingError> {
        let decoded = image::open(image_path)
            .map_err(|e| ImagingError::ImageRead(e.to_string()))?
            .resize_exact(INPUT_SIDE, INPUT_SIDE, image::imageops::FilterType::Triangle)
            .to_rgb8();

        let mut tensor = Array4::<f32>::zeros((1, 3, INPUT_SIDE as usize, INPUT_SIDE as usize));
        for (x, y, pixel) in decoded.enumerate_pixels() {
            for channel in 0..3 {
                let value = pixel.0[channel] as f32 / 255.0;
                tensor[[0, channel, y as usize, x as usize]] =
                    (value - MEAN[channel]) / STD[channel];
            }
        }
        Ok(tensor)
    }

    fn infer(&self, image_path: &Path) -> Result<Prediction, ImagingError> {
        let tensor = Self::preprocess(image_path)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ImagingError::Inference("session lock poisoned".to_string()))?;

        let inputs = ort::inputs!["input" => tensor.view()]
            .map_err(|e| ImagingError::Inference(e.to_string()))?;
        let outputs = session
            .run(inputs)
            .map_err(|e| ImagingError::Inference(e.to_string()))?;

        let (_, logits) = outputs[0]
            .try_extract_raw_tensor::<f32>()
            .map_err(|e| ImagingError::Inference(e.to_string()))?;

        if logits.len() < 2 {
            return Err(ImagingError::OutputShape(format!(
                "expected 2 logits, got {}",
                logits.len()
            )));
        }

        // Softmax over [no_abscess, abscess]
        let max = logits[0].max(logits[1]);
        let exp_no = (logits[0] - max).exp();
        let exp_yes = (logits[1] - max).exp();
        let p_yes = exp_yes / (exp_no + exp_yes);

        if p_yes >= 0.5 {
            Ok(Prediction::new(AbscessLabel::Abscess, p_yes))
        } else {
            Ok(Prediction::new(AbscessLabel::NoAbscess, 1.0 - p_yes))
        }
    }
}

impl AbscessClassifier for OnnxAbscessClassifier {
    fn predict(&self, image_path: &Path) -> Prediction {
        match self.infer(image_path) {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!(path = %image_path.display(), error = %e, "abscess classification failed");
                Prediction::unavailable()
            }
        }
    }
}
