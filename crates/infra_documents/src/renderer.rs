//! Fixed-layout claim document renderer
//!
//! Layout follows the paper ADA claim form: a centered header, a patient
//! identity block, a procedure/tooth block, the clinical note, and the
//! x-ray (or a placeholder) in the lower right. One page, US letter.

use std::path::PathBuf;

use chrono::NaiveDate;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point,
};
use tracing::warn;

use core_kernel::{CdtCode, Quadrant, ToothNumber};
use domain_claims::DocumentKind;

use crate::error::DocumentError;

// US letter in millimetres
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 18.0;

const NOTE_WRAP_COLUMNS: usize = 88;

/// Everything a claim document needs, independent of which aggregate it
/// came from
#[derive(Debug, Clone)]
pub struct ClaimDocument {
    pub kind: DocumentKind,
    pub patient_name: String,
    pub date_of_birth: NaiveDate,
    pub insurance_provider: String,
    pub policy_number: String,
    pub cdt_code: CdtCode,
    pub tooth_number: Option<ToothNumber>,
    pub quadrant: Option<Quadrant>,
    pub diagnosis: Option<String>,
    pub clinical_note: String,
    pub claim_reference: Option<String>,
    /// Path of the x-ray image to embed, when one exists
    pub xray_path: Option<PathBuf>,
}

/// Renders [`ClaimDocument`]s to in-memory PDF bytes
#[derive(Debug, Clone, Default)]
pub struct ClaimDocumentRenderer;

impl ClaimDocumentRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders the document to a single-page PDF
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Render`] only for structural PDF failures;
    /// image problems degrade to an in-document placeholder.
    pub fn render(&self, document: &ClaimDocument) -> Result<Vec<u8>, DocumentError> {
        let (doc, page, layer) =
            PdfDocument::new(document.kind.title(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "form");
        let layer = doc.get_page(page).get_layer(layer);

        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

        let mut cursor = PAGE_HEIGHT - 25.0;

        // Header block
        centered_text(&layer, "American Dental Association", 16.0, &bold, cursor);
        cursor -= 8.0;
        centered_text(&layer, document.kind.title(), 12.0, &font, cursor);
        cursor -= 4.0;
        rule(&layer, cursor);
        cursor -= 10.0;

        // Patient identity block
        layer.use_text(
            format!("Patient: {}", document.patient_name),
            11.0,
            Mm(MARGIN),
            Mm(cursor),
            &font,
        );
        layer.use_text(
            format!("DOB: {}", document.date_of_birth),
            11.0,
            Mm(PAGE_WIDTH / 2.0),
            Mm(cursor),
            &font,
        );
        cursor -= 7.0;
        layer.use_text(
            format!("Insurance Provider: {}", document.insurance_provider),
            11.0,
            Mm(MARGIN),
            Mm(cursor),
            &font,
        );
        layer.use_text(
            format!("Policy #: {}", document.policy_number),
            11.0,
            Mm(PAGE_WIDTH / 2.0),
            Mm(cursor),
            &font,
        );
        cursor -= 10.0;

        // Procedure block
        if let Some(tooth) = document.tooth_number {
            layer.use_text(
                format!("Tooth #: {tooth}"),
                11.0,
                Mm(MARGIN),
                Mm(cursor),
                &font,
            );
        } else if let Some(quadrant) = document.quadrant {
            layer.use_text(
                format!("Quadrant: {} ({})", quadrant, quadrant.abbreviation()),
                11.0,
                Mm(MARGIN),
                Mm(cursor),
                &font,
            );
        }
        layer.use_text(
            format!("CDT Code: {}", document.cdt_code),
            11.0,
            Mm(PAGE_WIDTH / 2.0),
            Mm(cursor),
            &font,
        );
        cursor -= 7.0;
        layer.use_text(
            document.cdt_code.description(),
            10.0,
            Mm(MARGIN),
            Mm(cursor),
            &font,
        );
        cursor -= 7.0;
        if let Some(diagnosis) = &document.diagnosis {
            layer.use_text(
                format!("Diagnosis: {diagnosis}"),
                11.0,
                Mm(MARGIN),
                Mm(cursor),
                &font,
            );
            cursor -= 7.0;
        }
        if let Some(reference) = &document.claim_reference {
            layer.use_text(
                format!("Claim Reference: {reference}"),
                11.0,
                Mm(MARGIN),
                Mm(cursor),
                &font,
            );
            cursor -= 7.0;
        }
        cursor -= 3.0;

        // Clinical note block
        layer.use_text("Clinical Note:", 11.0, Mm(MARGIN), Mm(cursor), &bold);
        cursor -= 6.0;
        for line in wrap(&document.clinical_note, NOTE_WRAP_COLUMNS) {
            layer.use_text(line, 10.0, Mm(MARGIN), Mm(cursor), &font);
            cursor -= 5.0;
        }
        cursor -= 5.0;

        // X-ray block, best-effort
        if let Some(path) = &document.xray_path {
            match embed_xray(&layer, path) {
                Ok(()) => {}
                Err(reason) => {
                    warn!(path = %path.display(), %reason, "x-ray could not be embedded");
                    layer.use_text(
                        format!("[X-ray could not be loaded: {reason}]"),
                        10.0,
                        Mm(MARGIN),
                        Mm(cursor),
                        &font,
                    );
                }
            }
        } else {
            layer.use_text(
                "[No x-ray on file for this claim]",
                10.0,
                Mm(MARGIN),
                Mm(cursor),
                &font,
            );
        }

        let bytes = doc.save_to_bytes()?;
        Ok(bytes)
    }
}

fn centered_text(
    layer: &PdfLayerReference,
    text: &str,
    size: f32,
    font: &IndirectFontRef,
    y: f32,
) {
    // Helvetica averages roughly 0.5em per character; close enough for a
    // visually centered header
    let approx_width_mm = text.len() as f32 * size * 0.5 * 0.3528;
    let x = ((PAGE_WIDTH - approx_width_mm) / 2.0).max(MARGIN);
    layer.use_text(text, size, Mm(x), Mm(y), font);
}

fn rule(layer: &PdfLayerReference, y: f32) {
    let line = Line {
        points: vec![
            (Point::new(Mm(MARGIN), Mm(y)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(y)), false),
        ],
        is_closed: false,
    };
    layer.add_line(line);
}

fn embed_xray(layer: &PdfLayerReference, path: &std::path::Path) -> Result<(), String> {
    let decoded = printpdf::image_crate::open(path).map_err(|e| e.to_string())?;
    let image = Image::from_dynamic_image(&decoded);
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(PAGE_WIDTH - MARGIN - 55.0)),
            translate_y: Some(Mm(40.0)),
            scale_x: Some(0.35),
            scale_y: Some(0.35),
            ..Default::default()
        },
    );
    Ok(())
}

/// Greedy word wrap at a column budget; long unbroken tokens get their own line
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.len() + 1 + word.len() <= columns {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        if !current.is_empty() || paragraph.is_empty() {
            lines.push(current);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_column_budget() {
        let text = "one two three four five six seven eight nine ten";
        for line in wrap(text, 12) {
            assert!(line.len() <= 12, "line too long: {line:?}");
        }
    }

    #[test]
    fn wrap_keeps_words_intact() {
        let lines = wrap("alpha beta gamma", 10);
        assert_eq!(lines, vec!["alpha beta".to_string(), "gamma".to_string()]);
    }

    #[test]
    fn wrap_preserves_explicit_line_breaks() {
        let lines = wrap("first\nsecond", 80);
        assert_eq!(lines.len(), 2);
    }
}
