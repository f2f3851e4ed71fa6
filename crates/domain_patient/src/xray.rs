//! Uploaded x-ray images

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{PatientId, XrayId};

/// An x-ray image owned by a patient
///
/// Workflows that want "the x-ray" consult the most recent upload by
/// `uploaded_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientXray {
    /// Unique identifier
    pub id: XrayId,
    /// Owning patient
    pub patient_id: PatientId,
    /// Path of the stored file on disk
    pub file_path: String,
    /// Original file name as uploaded
    pub original_name: String,
    /// MIME type of the upload
    pub content_type: String,
    /// Upload timestamp
    pub uploaded_at: DateTime<Utc>,
}

impl PatientXray {
    /// Records a new upload
    pub fn new(
        patient_id: PatientId,
        file_path: impl Into<String>,
        original_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            id: XrayId::new_v7(),
            patient_id,
            file_path: file_path.into(),
            original_name: original_name.into(),
            content_type: content_type.into(),
            uploaded_at: Utc::now(),
        }
    }
}
