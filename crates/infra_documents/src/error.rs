//! Document rendering errors

use thiserror::Error;

/// Errors that can occur while producing a PDF document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("PDF rendering failed: {0}")]
    Render(String),
}

impl From<printpdf::Error> for DocumentError {
    fn from(err: printpdf::Error) -> Self {
        DocumentError::Render(err.to_string())
    }
}
