//! Data model for form field extraction.
//!
//! Pages and OCR tokens are owned by the calling document for the lifetime
//! of one extraction request; nothing here is persisted by the pipeline
//! itself (the optional [`crate::store::DocumentStore`] lives outside it).

use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};

/// The closed set of field types a label can classify to.
///
/// Serialized as lowercase strings (`"text"`, `"nric"`, ...) matching the
/// wire format the external extractor is constrained to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Free text (name, address, occupation, ...)
    Text,
    /// Numeric value (age, postal code, ...)
    Number,
    /// Calendar date
    Date,
    /// Email address
    Email,
    /// Phone number
    Phone,
    /// Checkbox / tick box
    Checkbox,
    /// NRIC/FIN national identity number
    Nric,
}

impl FieldType {
    /// Parse a wire value, returning `None` for anything outside the closed set.
    pub fn from_wire(value: &str) -> Option<FieldType> {
        match value {
            "text" => Some(FieldType::Text),
            "number" => Some(FieldType::Number),
            "date" => Some(FieldType::Date),
            "email" => Some(FieldType::Email),
            "phone" => Some(FieldType::Phone),
            "checkbox" => Some(FieldType::Checkbox),
            "nric" => Some(FieldType::Nric),
            _ => None,
        }
    }

    /// Wire value for this type.
    pub fn as_wire(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Checkbox => "checkbox",
            FieldType::Nric => "nric",
        }
    }
}

/// Tesseract-style layout hierarchy level of an OCR token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HierarchyLevel {
    /// Whole page
    Page,
    /// Text block
    Block,
    /// Paragraph
    Paragraph,
    /// Text line
    TextLine,
    /// Single word
    Word,
}

impl HierarchyLevel {
    /// Map a Tesseract numeric level (1-5) to a hierarchy level.
    pub fn from_tesseract(level: u8) -> Option<HierarchyLevel> {
        match level {
            1 => Some(HierarchyLevel::Page),
            2 => Some(HierarchyLevel::Block),
            3 => Some(HierarchyLevel::Paragraph),
            4 => Some(HierarchyLevel::TextLine),
            5 => Some(HierarchyLevel::Word),
            _ => None,
        }
    }
}

/// One OCR token with its page geometry and recognition confidence.
///
/// Produced by the OCR collaborator (see [`crate::ocr`]); immutable once
/// produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrToken {
    /// Recognized text, never empty
    pub text: String,
    /// Token bounding box in page pixels
    pub bbox: BoundingBox,
    /// Recognition confidence in [0, 1]
    pub confidence: f32,
    /// Layout hierarchy level
    pub level: HierarchyLevel,
    /// Block index within the page
    pub block_index: u32,
    /// Line index within the block
    pub line_index: u32,
    /// Word index within the line
    pub word_index: u32,
}

/// A detected, fillable form field.
///
/// `field_id` is provisional until the orderer runs; afterwards ids are
/// dense `"f000"`-style sequence numbers in final reading order and unique
/// within the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    /// Stable identifier, reassigned by the orderer
    pub field_id: String,
    /// Zero-based page the field sits on
    pub page_index: usize,
    /// Cleaned label caption
    pub label_text: String,
    /// Expected value kind
    pub field_type: FieldType,
    /// Where an answer should be written
    pub target_bbox: BoundingBox,
    /// Where the label text sits
    pub label_bbox: BoundingBox,
    /// Whether an answer is mandatory
    pub required: bool,
    /// Detection confidence in [0, 1], rounded to 2 decimal places
    pub confidence: f32,
    /// Filled-in answer; empty until a caller supplies one
    #[serde(default)]
    pub answer: String,
}

impl FormField {
    /// Normalized deduplication key: trimmed, case-folded label text.
    pub fn label_key(&self) -> String {
        self.label_text.trim().to_lowercase()
    }

    /// True when the field is required and has no non-whitespace answer.
    pub fn needs_answer(&self) -> bool {
        self.required && self.answer.trim().is_empty()
    }
}

/// One rasterized page: pixels plus the OCR tokens recognized on it.
#[derive(Debug, Clone)]
pub struct Page {
    /// Zero-based page index within the document
    pub page_index: usize,
    /// Encoded page image (PNG or JPEG)
    pub image_bytes: Vec<u8>,
    /// Page width in pixels
    pub width: u32,
    /// Page height in pixels
    pub height: u32,
    /// Raster resolution
    pub dpi: u32,
    /// OCR tokens for this page
    pub tokens: Vec<OcrToken>,
}

/// A whole uploaded document: pages plus the final ordered field list.
#[derive(Debug, Clone)]
pub struct FormDocument {
    /// Random unique identifier
    pub document_id: String,
    /// Original upload filename
    pub original_filename: String,
    /// Rasterized pages
    pub pages: Vec<Page>,
    /// Ordered fields, filled in by [`crate::pipeline::extract_fields`]
    pub fields: Vec<FormField>,
}

impl FormDocument {
    /// Create a document with a fresh random id and no fields yet.
    pub fn new(original_filename: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            document_id: uuid::Uuid::new_v4().to_string(),
            original_filename: original_filename.into(),
            pages,
            fields: Vec::new(),
        }
    }
}

/// Round a confidence value to 2 decimal places.
pub(crate) fn round_confidence(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
