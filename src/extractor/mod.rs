//! External field extractor collaborator.
//!
//! A second, independently-sourced candidate list for a page, produced from
//! the same line-level text and geometry by an external large-language-model
//! service. The collaborator is optional at runtime: implementations report
//! [`Extraction::Unavailable`] when they are unreachable or misconfigured,
//! which callers must treat as "no additional candidates", never as an
//! error. `Unavailable` is deliberately distinct from `Fields(vec![])` so
//! callers can tell "collaborator down" from "nothing found".

pub mod openai;

use crate::detect::{
    classify_label, clean_label, detect_input_regions, find_nearest_input_region, infer_answer_region,
    is_required, group_into_lines, MAX_ASSOCIATION_DISTANCE,
};
use crate::geometry::BoundingBox;
use crate::model::{round_confidence, FieldType, FormField, Page};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub use openai::{ExtractorConfig, OpenAiExtractor};

/// Default confidence for candidates that do not carry one.
pub const DEFAULT_CANDIDATE_CONFIDENCE: f32 = 0.7;

/// Maximum OCR lines forwarded to the collaborator per page.
pub const MAX_SUMMARY_LINES: usize = 200;

/// Result of asking the external extractor for a page's candidates.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// The collaborator was unreachable, misconfigured, or returned
    /// malformed data; fusion proceeds on heuristic fields alone.
    Unavailable,
    /// Candidate fields, possibly empty.
    Fields(Vec<FormField>),
}

impl Extraction {
    /// Candidates to fuse: an unavailable collaborator contributes none.
    pub fn into_fields(self) -> Vec<FormField> {
        match self {
            Extraction::Unavailable => Vec::new(),
            Extraction::Fields(fields) => fields,
        }
    }
}

/// A source of externally extracted field candidates.
pub trait FieldExtractor {
    /// Propose candidate fields for one page.
    fn extract(&self, page: &Page) -> Extraction;
}

/// Extractor for running without any external collaborator configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullExtractor;

impl FieldExtractor for NullExtractor {
    fn extract(&self, _page: &Page) -> Extraction {
        Extraction::Unavailable
    }
}

/// One OCR line summarized for the collaborator payload.
#[derive(Debug, Clone, Serialize)]
pub struct LineSummary {
    /// Joined line text
    pub text: String,
    /// Merged line bounding box
    pub bbox: BoundingBox,
    /// Mean token confidence, rounded to 3 decimal places
    pub confidence: f32,
}

/// Summarize a page's OCR lines for the collaborator, in reading order,
/// capped at `max_lines` to bound the payload.
pub fn build_line_summaries(page: &Page, max_lines: usize) -> Vec<LineSummary> {
    let mut items = Vec::new();
    for line in group_into_lines(&page.tokens) {
        let text = line.text().trim().to_string();
        if text.is_empty() {
            continue;
        }
        let Some(bbox) = line.bbox() else { continue };
        items.push(LineSummary {
            text,
            bbox,
            confidence: (line.mean_confidence() * 1000.0).round() / 1000.0,
        });
        if items.len() == max_lines {
            break;
        }
    }
    items
}

/// A raw candidate as returned by the collaborator, before filtering.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCandidate {
    /// Proposed label caption
    #[serde(default)]
    pub label_text: String,
    /// Proposed field type value; unknown values coerce to text
    #[serde(default)]
    pub field_type: String,
    /// Label bounding box `[x1, y1, x2, y2]`
    #[serde(default)]
    pub label_bbox: Vec<f64>,
    /// Whether the collaborator believes the field is mandatory
    #[serde(default)]
    pub required: bool,
    /// Candidate confidence; defaults to 0.7 when absent
    #[serde(default)]
    pub confidence: Option<f32>,
}

lazy_static! {
    static ref SENTENCE_OPENER_RE: Regex = Regex::new(r"^(The|This|These|Those)\b").unwrap();
}

/// Heuristic filter for paragraph-like text that reads as instructions
/// rather than a field label.
pub fn looks_like_instruction(text: &str) -> bool {
    let t = text.trim();
    let word_count = t.split_whitespace().count();

    // Long sentences without typical label punctuation
    if word_count >= 9 && !t.contains(':') && !t.contains('_') {
        return true;
    }
    // Paragraph-ish: ends with a period and has several words
    if t.ends_with('.') && word_count >= 6 {
        return true;
    }
    // Comma-heavy sentence-like labels are usually not fields
    if t.contains(',') && word_count >= 6 && !t.contains('_') {
        return true;
    }
    // Starts like a sentence (capitalized demonstrative) and is long
    if SENTENCE_OPENER_RE.is_match(t) && word_count >= 6 {
        return true;
    }

    false
}

/// Turn raw collaborator candidates into field records, applying the
/// contract filters:
///
/// - empty and stop-listed labels are dropped;
/// - instruction-like text is dropped;
/// - unknown field type values coerce to [`FieldType::Text`];
/// - candidates with a missing or degenerate zero box are dropped;
/// - a candidate whose target had to be synthesized and whose label fails
///   the heuristic classifier is dropped;
/// - the required flag is OR'd with the heuristic required detection;
/// - confidence defaults to 0.7 and is rounded to 2 decimal places.
///
/// Identifiers are `"llm000"`-style and count raw candidates, dropped ones
/// included, so a given raw list always yields the same ids.
pub fn filter_candidates(
    page: &Page,
    raw: Vec<RawCandidate>,
    stop_labels: &HashSet<String>,
) -> Vec<FormField> {
    let input_regions = detect_input_regions(&page.image_bytes);
    let mut fields = Vec::new();

    for (idx, item) in raw.into_iter().enumerate() {
        let label_text = clean_label(item.label_text.trim());
        if label_text.is_empty() {
            continue;
        }
        if stop_labels.contains(&label_text.trim().to_lowercase()) {
            continue;
        }
        if looks_like_instruction(&label_text) {
            continue;
        }

        let field_type = FieldType::from_wire(&item.field_type).unwrap_or(FieldType::Text);

        let label_bbox = candidate_bbox(&item.label_bbox);
        if label_bbox.is_degenerate() {
            continue;
        }

        let (target_bbox, inferred) =
            match find_nearest_input_region(&label_bbox, &input_regions, MAX_ASSOCIATION_DISTANCE) {
                Some(region) => (region.bbox, false),
                None => (infer_answer_region(&label_bbox, page.width), true),
            };

        // A synthesized target plus an unclassifiable label is the signature
        // of a hallucinated field.
        if inferred && classify_label(&label_text).is_none() {
            continue;
        }

        let required = item.required || is_required(&label_text);
        let confidence = round_confidence(item.confidence.unwrap_or(DEFAULT_CANDIDATE_CONFIDENCE));

        fields.push(FormField {
            field_id: format!("llm{idx:03}"),
            page_index: page.page_index,
            label_text,
            field_type,
            target_bbox,
            label_bbox,
            required,
            confidence,
            answer: String::new(),
        });
    }

    fields
}

/// Integer bbox from a raw 4-element array; anything else is the degenerate
/// zero box, which the caller drops.
fn candidate_bbox(values: &[f64]) -> BoundingBox {
    if values.len() != 4 {
        return BoundingBox::new(0, 0, 0, 0);
    }
    BoundingBox::from_f32(
        values[0] as f32,
        values[1] as f32,
        values[2] as f32,
        values[3] as f32,
    )
}
