//! Heuristic form field detection.
//!
//! Transforms one page's OCR tokens and pixels into local field records:
//! group words into lines, classify each line's text against the label
//! pattern table, and pair accepted labels with the nearest visually
//! detected answer region (or a synthesized one).
//!
//! Field identifiers assigned here are provisional; the orderer reassigns
//! them once all pages are fused.

pub mod associate;
pub mod classify;
pub mod lines;
pub mod regions;

use crate::model::{round_confidence, FormField, Page};
use log::debug;

pub use associate::{find_nearest_input_region, infer_answer_region, MAX_ASSOCIATION_DISTANCE};
pub use classify::{classify_label, clean_label, is_required};
pub use lines::{group_into_lines, Line};
pub use regions::{detect_input_regions, CandidateRegion, RegionKind};

/// Detect form fields on a page from OCR data and visual analysis.
///
/// Deterministic given identical input; no state survives the call.
pub fn detect_fields(page: &Page) -> Vec<FormField> {
    let lines = group_into_lines(&page.tokens);
    let input_regions = detect_input_regions(&page.image_bytes);

    let mut fields = Vec::new();
    for line in &lines {
        let line_text = line.text();
        let Some(field_type) = classify_label(&line_text) else {
            continue;
        };
        let Some(label_bbox) = line.bbox() else {
            continue;
        };

        let target_bbox = match find_nearest_input_region(
            &label_bbox,
            &input_regions,
            MAX_ASSOCIATION_DISTANCE,
        ) {
            Some(region) => region.bbox,
            None => infer_answer_region(&label_bbox, page.width),
        };

        fields.push(FormField {
            field_id: format!("f{:03}", fields.len()),
            page_index: page.page_index,
            label_text: clean_label(&line_text),
            field_type,
            target_bbox,
            label_bbox,
            required: is_required(&line_text),
            confidence: round_confidence(line.mean_confidence()),
            answer: String::new(),
        });
    }

    debug!(
        "page {}: {} lines, {} heuristic fields",
        page.page_index,
        lines.len(),
        fields.len()
    );
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;
    use crate::model::{FieldType, HierarchyLevel, OcrToken};

    fn word(text: &str, bbox: BoundingBox, block: u32, line: u32, conf: f32) -> OcrToken {
        OcrToken {
            text: text.to_string(),
            bbox,
            confidence: conf,
            level: HierarchyLevel::Word,
            block_index: block,
            line_index: line,
            word_index: 0,
        }
    }

    fn page(tokens: Vec<OcrToken>) -> Page {
        Page {
            page_index: 0,
            image_bytes: Vec::new(), // undecodable: synthesized regions only
            width: 1000,
            height: 1400,
            dpi: 300,
            tokens,
        }
    }

    #[test]
    fn test_unclassified_lines_skipped() {
        let p = page(vec![word(
            "Instructions",
            BoundingBox::new(10, 10, 200, 30),
            1,
            1,
            0.9,
        )]);
        assert!(detect_fields(&p).is_empty());
    }

    #[test]
    fn test_builds_field_with_synthesized_target() {
        let p = page(vec![
            word("Full", BoundingBox::new(50, 100, 90, 120), 1, 1, 0.90),
            word("Name:", BoundingBox::new(95, 100, 150, 120), 1, 1, 0.80),
        ]);
        let fields = detect_fields(&p);
        assert_eq!(fields.len(), 1);
        let f = &fields[0];
        assert_eq!(f.field_id, "f000");
        assert_eq!(f.label_text, "Full Name");
        assert_eq!(f.field_type, FieldType::Text);
        assert_eq!(f.label_bbox, BoundingBox::new(50, 100, 150, 120));
        // No visual candidates: synthesized to the right of the label.
        assert_eq!(f.target_bbox, BoundingBox::new(160, 100, 550, 120));
        assert!(!f.required);
        assert_eq!(f.confidence, 0.85);
    }

    #[test]
    fn test_required_from_asterisk_and_cleaned_label() {
        let p = page(vec![
            word("Email", BoundingBox::new(50, 200, 110, 220), 1, 1, 0.9),
            word("Address", BoundingBox::new(115, 200, 190, 220), 1, 1, 0.9),
            word("*", BoundingBox::new(195, 200, 205, 220), 1, 1, 0.9),
        ]);
        let fields = detect_fields(&p);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].label_text, "Email Address");
        assert_eq!(fields[0].field_type, FieldType::Email);
        assert!(fields[0].required);
    }

    #[test]
    fn test_provisional_ids_follow_line_order() {
        let p = page(vec![
            word("Name:", BoundingBox::new(50, 100, 120, 120), 1, 1, 0.9),
            word("Age:", BoundingBox::new(50, 200, 100, 220), 1, 2, 0.9),
        ]);
        let fields = detect_fields(&p);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field_id, "f000");
        assert_eq!(fields[1].field_id, "f001");
        assert_eq!(fields[1].field_type, FieldType::Number);
    }

    #[test]
    fn test_deterministic() {
        let tokens = vec![
            word("Name:", BoundingBox::new(50, 100, 120, 120), 1, 1, 0.9),
            word("Date:", BoundingBox::new(50, 300, 120, 320), 2, 1, 0.7),
        ];
        let p = page(tokens);
        assert_eq!(detect_fields(&p), detect_fields(&p));
    }
}
