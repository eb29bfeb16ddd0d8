//! OCR boundary normalization.
//!
//! The OCR engine itself is an external collaborator; this module turns its
//! raw word records (Tesseract TSV-style: left/top/width/height geometry,
//! confidence in [0, 100], numeric hierarchy level) into clean [`OcrToken`]s.
//! Records with empty text or negative confidence are discarded here so the
//! pipeline never sees them.

use crate::geometry::BoundingBox;
use crate::model::{HierarchyLevel, OcrToken, Page};
use serde::Deserialize;

/// A raw OCR word record as emitted by a Tesseract-style engine.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOcrRecord {
    /// Recognized text (may be empty for structural records)
    #[serde(default)]
    pub text: String,
    /// Left edge in pixels
    pub left: i32,
    /// Top edge in pixels
    pub top: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
    /// Confidence in [0, 100]; negative for non-word records
    pub conf: f32,
    /// Hierarchy level (1=page .. 5=word)
    pub level: u8,
    /// Block number
    pub block_num: u32,
    /// Line number
    pub line_num: u32,
    /// Word number
    pub word_num: u32,
}

/// Normalize raw OCR records into tokens.
///
/// Drops records with negative confidence, empty (post-trim) text, or an
/// unknown hierarchy level; scales confidence to [0, 1].
pub fn normalize_records(records: &[RawOcrRecord]) -> Vec<OcrToken> {
    let mut tokens = Vec::new();
    for rec in records {
        let text = rec.text.trim();
        if rec.conf < 0.0 || text.is_empty() {
            continue;
        }
        let Some(level) = HierarchyLevel::from_tesseract(rec.level) else {
            continue;
        };
        tokens.push(OcrToken {
            text: text.to_string(),
            bbox: BoundingBox::new(
                rec.left,
                rec.top,
                rec.left + rec.width,
                rec.top + rec.height,
            ),
            confidence: rec.conf / 100.0,
            level,
            block_index: rec.block_num,
            line_index: rec.line_num,
            word_index: rec.word_num,
        });
    }
    tokens
}

/// Build a [`Page`] from raw OCR records plus the encoded page image.
pub fn page_from_records(
    page_index: usize,
    image_bytes: Vec<u8>,
    width: u32,
    height: u32,
    dpi: u32,
    records: &[RawOcrRecord],
) -> Page {
    Page {
        page_index,
        image_bytes,
        width,
        height,
        dpi,
        tokens: normalize_records(records),
    }
}
