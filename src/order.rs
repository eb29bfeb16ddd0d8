//! Reading-order sequencing of fused fields.

use crate::model::FormField;

/// Row quantization in pixels: labels whose top edges fall in the same
/// 20 px bucket count as one visual row despite OCR baseline jitter.
const ROW_QUANTUM: i32 = 20;

/// Sort fields into natural form-filling order and reassign identifiers.
///
/// Sort key: `(page_index, label.y1 div 20, label.x1)` — page-major,
/// row-major, then left-to-right. The sort is stable, so fields sharing a
/// full key keep their incoming relative order. Afterwards, ids are
/// reassigned densely as `"f000"`, `"f001"`, ... in output order; any prior
/// identifier is discarded. This is the single source of truth for a
/// field's position in the filling sequence.
pub fn order_fields(mut fields: Vec<FormField>) -> Vec<FormField> {
    fields.sort_by_key(sort_key);
    for (index, field) in fields.iter_mut().enumerate() {
        field.field_id = format!("f{index:03}");
    }
    fields
}

/// Reading-order sort key for a field.
pub fn sort_key(field: &FormField) -> (usize, i32, i32) {
    (
        field.page_index,
        field.label_bbox.y1.div_euclid(ROW_QUANTUM),
        field.label_bbox.x1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;
    use crate::model::FieldType;

    fn field(id: &str, page: usize, x1: i32, y1: i32) -> FormField {
        FormField {
            field_id: id.to_string(),
            page_index: page,
            label_text: format!("label {id}"),
            field_type: FieldType::Text,
            target_bbox: BoundingBox::new(x1 + 100, y1, x1 + 300, y1 + 20),
            label_bbox: BoundingBox::new(x1, y1, x1 + 80, y1 + 20),
            required: false,
            confidence: 0.9,
            answer: String::new(),
        }
    }

    #[test]
    fn test_page_major_then_rows_then_columns() {
        let fields = vec![
            field("a", 1, 10, 10),
            field("b", 0, 500, 300),
            field("c", 0, 10, 300),
            field("d", 0, 10, 100),
        ];
        let ordered = order_fields(fields);
        let labels: Vec<_> = ordered.iter().map(|f| f.label_text.as_str()).collect();
        assert_eq!(labels, vec!["label d", "label c", "label b", "label a"]);
    }

    #[test]
    fn test_row_jitter_absorbed_by_quantization() {
        // y1 = 102 and y1 = 118 share bucket 5; left-to-right decides.
        let fields = vec![field("right", 0, 400, 102), field("left", 0, 10, 118)];
        let ordered = order_fields(fields);
        assert_eq!(ordered[0].label_text, "label left");
        assert_eq!(ordered[1].label_text, "label right");
    }

    #[test]
    fn test_ids_reassigned_densely() {
        let fields = vec![
            field("llm007", 0, 10, 200),
            field("f123", 0, 10, 100),
            field("whatever", 0, 10, 300),
        ];
        let ordered = order_fields(fields);
        let ids: Vec<_> = ordered.iter().map(|f| f.field_id.as_str()).collect();
        assert_eq!(ids, vec!["f000", "f001", "f002"]);
    }

    #[test]
    fn test_sort_key_non_decreasing_over_output() {
        let fields = vec![
            field("a", 1, 50, 40),
            field("b", 0, 80, 500),
            field("c", 0, 20, 505),
            field("d", 0, 300, 22),
        ];
        let ordered = order_fields(fields);
        for pair in ordered.windows(2) {
            assert!(sort_key(&pair[0]) <= sort_key(&pair[1]));
        }
    }

    #[test]
    fn test_negative_y_uses_floor_division() {
        // A label whose box pokes above the page top (underline band math
        // can produce negative y) still buckets below y=0 rows.
        let fields = vec![field("below", 0, 10, 5), field("above", 0, 10, -5)];
        let ordered = order_fields(fields);
        assert_eq!(ordered[0].label_text, "label above");
    }
}
