//! Fusion of heuristic and externally-sourced field candidates.

use crate::model::FormField;
use std::collections::HashMap;

/// Merge external candidates into the heuristic baseline, deduplicating by
/// normalized label text (trimmed, case-folded).
///
/// - An empty external list returns the heuristic list unchanged.
/// - A new label key is appended.
/// - A colliding key keeps whichever candidate has the strictly higher
///   confidence; when the incoming candidate wins, the survivor moves to
///   the end of the working list. That move has no observable effect on
///   final output (the orderer re-sorts by geometry) but keeps repeated
///   fusion passes exactly reproducible.
pub fn merge_fields(heuristic: Vec<FormField>, external: Vec<FormField>) -> Vec<FormField> {
    if external.is_empty() {
        return heuristic;
    }

    let mut merged = heuristic;
    // Key -> position in `merged`; later duplicates overwrite, matching the
    // baseline list's own last-wins key semantics.
    let mut seen: HashMap<String, usize> = HashMap::new();
    for (idx, field) in merged.iter().enumerate() {
        seen.insert(field.label_key(), idx);
    }

    for field in external {
        let key = field.label_key();
        if key.is_empty() {
            continue;
        }
        match seen.get(&key).copied() {
            None => {
                merged.push(field);
                seen.insert(key, merged.len() - 1);
            }
            Some(pos) => {
                if field.confidence > merged[pos].confidence {
                    merged.remove(pos);
                    for index in seen.values_mut() {
                        if *index > pos {
                            *index -= 1;
                        }
                    }
                    merged.push(field);
                    seen.insert(key, merged.len() - 1);
                }
            }
        }
    }

    merged
}
