//! Label classification by fixed-priority pattern matching.
//!
//! The pattern table is an ordered list evaluated top-to-bottom with
//! first-match-wins semantics. A line matching both TEXT and PHONE patterns
//! classifies as TEXT because TEXT comes first; that tie-break is a
//! contract, which is why this is a `Vec` of pairs and not a map.

use crate::model::FieldType;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Priority-ordered label patterns: TEXT, EMAIL, PHONE, DATE, NRIC, NUMBER.
    static ref LABEL_PATTERNS: Vec<(FieldType, Vec<Regex>)> = vec![
        (
            FieldType::Text,
            compile(&[
                r"(?i)\bname\b",
                r"(?i)\baddress\b",
                r"(?i)\boccupation\b",
                r"(?i)\bnationality\b",
                r"(?i)\bcompany\b",
                r"(?i)\borganis?ation\b",
                r"(?i)\bgender\b",
                r"(?i)\bsex\b",
                r"(?i)\brace\b",
                r"(?i)\breligion\b",
                r"(?i)\bsignature\b",
                r"(?i)\bremarks?\b",
                r"(?i)\bpurpose\b",
            ]),
        ),
        (FieldType::Email, compile(&[r"(?i)\be[-\s]?mail\b"])),
        (
            FieldType::Phone,
            compile(&[
                r"(?i)\bphone\b",
                r"(?i)\btel(?:ephone)?\b",
                r"(?i)\bmobile\b",
                r"(?i)\bcontact\s*(?:no|number)\b",
                r"(?i)\bfax\b",
            ]),
        ),
        (
            FieldType::Date,
            compile(&[
                r"(?i)\bdate\b",
                r"(?i)\bdob\b",
                r"(?i)\bdate\s*of\s*birth\b",
                r"(?i)\bexpiry\b",
                r"(?i)\bissue\s*date\b",
            ]),
        ),
        (
            FieldType::Nric,
            compile(&[r"(?i)\bnric\b", r"(?i)\bfin\b", r"(?i)\bic\s*no\b"]),
        ),
        (
            FieldType::Number,
            compile(&[
                r"(?i)\bage\b",
                r"(?i)\bpostal\s*code\b",
                r"(?i)\bzip\b",
                r"(?i)\bunit\s*no\b",
                r"(?i)\bblock\b",
            ]),
        ),
    ];

    static ref REQUIRED_RE: Regex = Regex::new(r"(?i)\*|\brequired\b|\bmandatory\b").unwrap();
    static ref TRAILING_PUNCT_RE: Regex = Regex::new(r"[:\*]+$").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("label pattern must compile"))
        .collect()
}

/// Classify a line's text, or `None` if it does not look like a form label.
///
/// Evaluates each type's patterns in priority order and returns the first
/// type with a matching pattern.
pub fn classify_label(text: &str) -> Option<FieldType> {
    for (field_type, patterns) in LABEL_PATTERNS.iter() {
        if patterns.iter().any(|p| p.is_match(text)) {
            return Some(*field_type);
        }
    }
    None
}

/// True if the label marks the field mandatory: an asterisk or the word
/// "required"/"mandatory", independent of classification.
pub fn is_required(label_text: &str) -> bool {
    REQUIRED_RE.is_match(label_text)
}

/// Clean a label caption: strip trailing colon/asterisk runs, collapse
/// internal whitespace runs, trim.
pub fn clean_label(text: &str) -> String {
    let trimmed = text.trim();
    let stripped = TRAILING_PUNCT_RE.replace(trimmed, "");
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
}
