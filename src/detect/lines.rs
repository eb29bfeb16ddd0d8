//! Line grouping: word tokens into ordered text lines.

use crate::geometry::BoundingBox;
use crate::model::{HierarchyLevel, OcrToken};
use std::collections::BTreeMap;

/// An ordered run of word tokens sharing a `(block_index, line_index)` key.
#[derive(Debug, Clone)]
pub struct Line {
    /// Word tokens, ordered by ascending left edge
    pub tokens: Vec<OcrToken>,
}

impl Line {
    /// Concatenated line text, words joined by single spaces.
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Union of all token boxes. `None` only for an empty line, which the
    /// grouper never produces.
    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::merge_all(self.tokens.iter().map(|t| &t.bbox))
    }

    /// Mean token confidence.
    pub fn mean_confidence(&self) -> f32 {
        if self.tokens.is_empty() {
            return 0.0;
        }
        self.tokens.iter().map(|t| t.confidence).sum::<f32>() / self.tokens.len() as f32
    }
}

/// Group word-level tokens into lines.
///
/// Tokens are bucketed by `(block_index, line_index)`; within a bucket they
/// are ordered by ascending `x1`, and buckets come out in ascending key
/// order. That key order is the only line ordering guarantee at this stage;
/// true visual row order is established later by the orderer.
///
/// Pure and deterministic: the bucket map is a `BTreeMap` and the in-line
/// sort is stable.
pub fn group_into_lines(tokens: &[OcrToken]) -> Vec<Line> {
    let mut buckets: BTreeMap<(u32, u32), Vec<OcrToken>> = BTreeMap::new();
    for token in tokens {
        if token.level == HierarchyLevel::Word {
            buckets
                .entry((token.block_index, token.line_index))
                .or_default()
                .push(token.clone());
        }
    }

    buckets
        .into_values()
        .map(|mut words| {
            words.sort_by_key(|w| w.bbox.x1);
            Line { tokens: words }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, x1: i32, block: u32, line: u32, conf: f32) -> OcrToken {
        OcrToken {
            text: text.to_string(),
            bbox: BoundingBox::new(x1, 100, x1 + 40, 120),
            confidence: conf,
            level: HierarchyLevel::Word,
            block_index: block,
            line_index: line,
            word_index: 0,
        }
    }

    #[test]
    fn test_groups_by_block_and_line() {
        let tokens = vec![
            word("b", 50, 1, 2, 0.9),
            word("a", 10, 1, 1, 0.9),
            word("c", 10, 2, 1, 0.9),
        ];
        let lines = group_into_lines(&tokens);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text(), "a");
        assert_eq!(lines[1].text(), "b");
        assert_eq!(lines[2].text(), "c");
    }

    #[test]
    fn test_words_sorted_left_to_right() {
        let tokens = vec![
            word("Name", 120, 1, 1, 0.9),
            word("Full", 10, 1, 1, 0.9),
        ];
        let lines = group_into_lines(&tokens);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "Full Name");
    }

    #[test]
    fn test_non_word_tokens_ignored() {
        let mut line_token = word("whole line", 0, 1, 1, 0.9);
        line_token.level = HierarchyLevel::TextLine;
        let tokens = vec![line_token, word("Name", 0, 1, 1, 0.9)];
        let lines = group_into_lines(&tokens);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].tokens.len(), 1);
    }

    #[test]
    fn test_line_bbox_and_confidence() {
        let tokens = vec![word("a", 10, 1, 1, 0.8), word("b", 60, 1, 1, 0.9)];
        let lines = group_into_lines(&tokens);
        assert_eq!(lines[0].bbox().unwrap(), BoundingBox::new(10, 100, 100, 120));
        assert!((lines[0].mean_confidence() - 0.85).abs() < 1e-6);
    }
}
