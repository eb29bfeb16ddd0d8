//! Per-type answer validation.
//!
//! Total: validation never fails, it only reports. An empty or
//! whitespace-only answer is always valid — requiredness is checked
//! separately by the caller (see [`crate::model::FormField::needs_answer`]).

use crate::model::FieldType;
use lazy_static::lazy_static;
use regex::Regex;

/// Outcome of validating one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Whether the answer is acceptable for the field type
    pub valid: bool,
    /// Human-readable reason when invalid
    pub message: Option<String>,
}

impl ValidationOutcome {
    fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    fn invalid(message: &str) -> Self {
        Self {
            valid: false,
            message: Some(message.to_string()),
        }
    }
}

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref PHONE_STRIP_RE: Regex = Regex::new(r"[\s\-\+\(\)]").unwrap();
    static ref DATE_DMY_RE: Regex = Regex::new(r"^\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}$").unwrap();
    static ref DATE_YMD_RE: Regex = Regex::new(r"^\d{4}[/\-]\d{1,2}[/\-]\d{1,2}$").unwrap();
    static ref NRIC_RE: Regex = Regex::new(r"^[STFGM]\d{7}[A-Z]$").unwrap();
}

/// Validate an answer against a field type.
pub fn validate_answer(field_type: FieldType, answer: &str) -> ValidationOutcome {
    let answer = answer.trim();
    if answer.is_empty() {
        return ValidationOutcome::ok();
    }

    match field_type {
        FieldType::Email => {
            if !EMAIL_RE.is_match(answer) {
                return ValidationOutcome::invalid(
                    "Please enter a valid email address (must contain @).",
                );
            }
        }
        FieldType::Phone => {
            let digits = PHONE_STRIP_RE.replace_all(answer, "");
            let all_digits = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());
            if !all_digits || digits.len() < 7 || digits.len() > 15 {
                return ValidationOutcome::invalid(
                    "Please enter a valid phone number (7\u{2013}15 digits).",
                );
            }
        }
        FieldType::Date => {
            if !DATE_DMY_RE.is_match(answer) && !DATE_YMD_RE.is_match(answer) {
                return ValidationOutcome::invalid(
                    "Please enter a valid date (DD/MM/YYYY or YYYY-MM-DD).",
                );
            }
        }
        FieldType::Nric => {
            if !NRIC_RE.is_match(&answer.to_uppercase()) {
                return ValidationOutcome::invalid(
                    "Please enter a valid NRIC/FIN (e.g., S1234567A).",
                );
            }
        }
        FieldType::Number => {
            let cleaned: String = answer
                .chars()
                .filter(|c| *c != '.' && *c != '-' && *c != ',')
                .collect();
            if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
                return ValidationOutcome::invalid("Please enter a number.");
            }
        }
        FieldType::Text | FieldType::Checkbox => {}
    }

    ValidationOutcome::ok()
}
