//! Spatial association of label boxes with candidate answer regions.

use crate::detect::regions::CandidateRegion;
use crate::geometry::BoundingBox;

/// Maximum label-to-region distance considered, in pixels.
pub const MAX_ASSOCIATION_DISTANCE: i32 = 200;

/// Vertical center tolerance for the same-row geometry.
const SAME_ROW_TOLERANCE: f32 = 30.0;
/// Left-edge alignment tolerance for the below geometry.
const BELOW_ALIGNMENT_TOLERANCE: i32 = 100;

/// Find the candidate region nearest to a label, or `None` if no candidate
/// qualifies within [`MAX_ASSOCIATION_DISTANCE`].
///
/// Two acceptance geometries are evaluated per candidate, same-row first:
///
/// - *same-row*: the candidate's vertical center is within 30 px of the
///   label's and the candidate lies strictly to the right; distance is the
///   horizontal gap `region.x1 - label.x2`.
/// - *below*: the candidate's top edge is below the label's bottom edge and
///   the left edges differ by under 100 px; distance is the vertical gap
///   `region.y1 - label.y2`.
///
/// The winner is the smallest distance strictly under the cap across both
/// geometries combined — no preference between geometries — and ties keep
/// the first candidate encountered in iteration order.
pub fn find_nearest_input_region<'a>(
    label_bbox: &BoundingBox,
    regions: &'a [CandidateRegion],
    max_distance: i32,
) -> Option<&'a CandidateRegion> {
    let label_center_y = label_bbox.center_y();

    let mut best: Option<&CandidateRegion> = None;
    let mut best_dist = max_distance;

    for region in regions {
        let r = region.bbox;
        if (r.center_y() - label_center_y).abs() < SAME_ROW_TOLERANCE && r.x1 > label_bbox.x2 {
            let dist = r.x1 - label_bbox.x2;
            if dist < best_dist {
                best_dist = dist;
                best = Some(region);
            }
        } else if r.y1 > label_bbox.y2 && (r.x1 - label_bbox.x1).abs() < BELOW_ALIGNMENT_TOLERANCE {
            let dist = r.y1 - label_bbox.y2;
            if dist < best_dist {
                best_dist = dist;
                best = Some(region);
            }
        }
    }

    best
}

/// Synthesize a fallback answer region to the right of a label: starting
/// 10 px past the label, extending to `min(label.x2 + 400, 0.8 * page_width)`
/// at the label's vertical extent.
pub fn infer_answer_region(label_bbox: &BoundingBox, page_width: u32) -> BoundingBox {
    let target_x2 = (label_bbox.x2 + 400).min((page_width as f32 * 0.8) as i32);
    BoundingBox::new(label_bbox.x2 + 10, label_bbox.y1, target_x2, label_bbox.y2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::regions::RegionKind;

    fn region(x1: i32, y1: i32, x2: i32, y2: i32) -> CandidateRegion {
        CandidateRegion {
            bbox: BoundingBox::new(x1, y1, x2, y2),
            kind: RegionKind::Underline,
        }
    }

    #[test]
    fn test_same_row_candidate_selected() {
        let label = BoundingBox::new(50, 100, 120, 120);
        let regions = vec![region(130, 95, 400, 121)];
        let hit = find_nearest_input_region(&label, &regions, MAX_ASSOCIATION_DISTANCE);
        assert_eq!(hit.unwrap().bbox, BoundingBox::new(130, 95, 400, 121));
    }

    #[test]
    fn test_distance_cap_rejects_far_candidate() {
        let label = BoundingBox::new(50, 100, 120, 120);
        // Same row but 250 px to the right: over the 200 px cap.
        let regions = vec![region(370, 95, 600, 121)];
        assert!(find_nearest_input_region(&label, &regions, MAX_ASSOCIATION_DISTANCE).is_none());
    }

    #[test]
    fn test_cap_is_strict() {
        let label = BoundingBox::new(0, 100, 100, 120);
        let at_cap = vec![region(300, 95, 500, 121)]; // gap exactly 200
        assert!(find_nearest_input_region(&label, &at_cap, 200).is_none());
        let under_cap = vec![region(299, 95, 500, 121)];
        assert!(find_nearest_input_region(&label, &under_cap, 200).is_some());
    }

    #[test]
    fn test_below_candidate_selected_when_aligned() {
        let label = BoundingBox::new(50, 100, 120, 120);
        let regions = vec![region(60, 140, 300, 165)];
        let hit = find_nearest_input_region(&label, &regions, MAX_ASSOCIATION_DISTANCE).unwrap();
        assert_eq!(hit.bbox.y1, 140);
    }

    #[test]
    fn test_below_rejected_when_misaligned() {
        let label = BoundingBox::new(50, 100, 120, 120);
        // Top edge below the label but left edges 150 px apart.
        let regions = vec![region(200, 140, 500, 165)];
        assert!(find_nearest_input_region(&label, &regions, MAX_ASSOCIATION_DISTANCE).is_none());
    }

    #[test]
    fn test_minimum_distance_across_geometries() {
        let label = BoundingBox::new(50, 100, 120, 120);
        let regions = vec![
            region(170, 95, 400, 121), // same-row, gap 50
            region(55, 130, 300, 155), // below, gap 10 -- nearer
        ];
        let hit = find_nearest_input_region(&label, &regions, MAX_ASSOCIATION_DISTANCE).unwrap();
        assert_eq!(hit.bbox.y1, 130);
    }

    #[test]
    fn test_tie_keeps_first_encountered() {
        let label = BoundingBox::new(50, 100, 120, 120);
        let regions = vec![
            region(140, 95, 400, 121), // same-row, gap 20
            region(55, 140, 300, 165), // below, gap 20
        ];
        let hit = find_nearest_input_region(&label, &regions, MAX_ASSOCIATION_DISTANCE).unwrap();
        assert_eq!(hit.bbox, regions[0].bbox);
    }

    #[test]
    fn test_infer_answer_region() {
        let label = BoundingBox::new(50, 100, 120, 120);
        let inferred = infer_answer_region(&label, 1000);
        assert_eq!(inferred, BoundingBox::new(130, 100, 520, 120));
    }

    #[test]
    fn test_infer_answer_region_clamped_to_page() {
        let label = BoundingBox::new(500, 100, 700, 120);
        let inferred = infer_answer_region(&label, 1000);
        // 0.8 * 1000 = 800 < 700 + 400
        assert_eq!(inferred.x2, 800);
    }
}
