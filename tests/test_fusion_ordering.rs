//! Fusion and ordering invariants, exercised with generated field lists.

use formscan::fuse::merge_fields;
use formscan::geometry::BoundingBox;
use formscan::model::{FieldType, FormField};
use formscan::order::{order_fields, sort_key};
use proptest::prelude::*;

fn field(id: &str, label: &str, page: usize, x1: i32, y1: i32, confidence: f32) -> FormField {
    FormField {
        field_id: id.to_string(),
        page_index: page,
        label_text: label.to_string(),
        field_type: FieldType::Text,
        target_bbox: BoundingBox::new(x1 + 100, y1, x1 + 400, y1 + 20),
        label_bbox: BoundingBox::new(x1, y1, x1 + 80, y1 + 20),
        required: false,
        confidence,
        answer: String::new(),
    }
}

fn arb_field() -> impl Strategy<Value = FormField> {
    (
        0usize..3,
        0i32..1000,
        0i32..1400,
        "[a-z]{1,8}",
        0.0f32..=1.0,
    )
        .prop_map(|(page, x1, y1, label, confidence)| {
            field("gen", &label, page, x1, y1, (confidence * 100.0).round() / 100.0)
        })
}

proptest! {
    #[test]
    fn ordering_key_is_non_decreasing(fields in prop::collection::vec(arb_field(), 0..40)) {
        let ordered = order_fields(fields);
        for pair in ordered.windows(2) {
            prop_assert!(sort_key(&pair[0]) <= sort_key(&pair[1]));
        }
    }

    #[test]
    fn ordering_assigns_dense_ids(fields in prop::collection::vec(arb_field(), 0..40)) {
        let ordered = order_fields(fields);
        for (i, f) in ordered.iter().enumerate() {
            let expected = format!("f{i:03}");
            prop_assert_eq!(f.field_id.as_str(), expected.as_str());
        }
    }

    #[test]
    fn ordering_is_a_permutation(fields in prop::collection::vec(arb_field(), 0..40)) {
        let mut before: Vec<String> = fields.iter().map(|f| f.label_text.clone()).collect();
        let ordered = order_fields(fields);
        let mut after: Vec<String> = ordered.iter().map(|f| f.label_text.clone()).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn fusion_never_duplicates_label_keys_from_external(
        heuristic in prop::collection::vec(arb_field(), 0..10),
        external in prop::collection::vec(arb_field(), 0..10),
    ) {
        // Heuristic lists can legitimately carry duplicate labels; the
        // guarantee is that external candidates never add a second entry
        // for a key, so fusing external twice is as good as once.
        let once = merge_fields(heuristic.clone(), external.clone());
        let twice = merge_fields(once.clone(), external);
        prop_assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn fusion_with_empty_external_is_identity(
        heuristic in prop::collection::vec(arb_field(), 0..20),
    ) {
        let merged = merge_fields(heuristic.clone(), Vec::new());
        prop_assert_eq!(merged, heuristic);
    }
}

#[test]
fn refusing_same_external_field_is_stable() {
    let heuristic = vec![field("f000", "Name", 0, 10, 10, 0.6)];
    let external = vec![field("llm000", "name", 0, 12, 11, 0.9)];

    let once = merge_fields(heuristic, external.clone());
    let twice = merge_fields(once.clone(), external);
    assert_eq!(once, twice);
    assert_eq!(once.len(), 1);
    assert_eq!(once[0].field_id, "llm000");
}

#[test]
fn fusion_then_ordering_discards_provisional_ids() {
    let heuristic = vec![
        field("f000", "Name", 0, 10, 200, 0.9),
        field("f001", "Age", 0, 10, 100, 0.8),
    ];
    let external = vec![field("llm000", "Occupation", 0, 10, 300, 0.7)];

    let ordered = order_fields(merge_fields(heuristic, external));
    let ids: Vec<_> = ordered.iter().map(|f| f.field_id.as_str()).collect();
    assert_eq!(ids, vec!["f000", "f001", "f002"]);
    let labels: Vec<_> = ordered.iter().map(|f| f.label_text.as_str()).collect();
    assert_eq!(labels, vec!["Age", "Name", "Occupation"]);
}
