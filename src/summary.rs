//! Plain-text answer summary.

use crate::model::FormDocument;

/// Render a document's fields and answers as a plain-text summary, in final
/// reading order. Unanswered fields show "(not answered)".
pub fn text_summary(document: &FormDocument) -> String {
    let mut lines = vec!["FORM SUMMARY".to_string(), "=".repeat(40), String::new()];
    for field in &document.fields {
        let answer = if field.answer.is_empty() {
            "(not answered)"
        } else {
            field.answer.as_str()
        };
        lines.push(format!("{}: {}", field.label_text, answer));
    }
    lines.push(String::new());
    lines.push("=".repeat(40));
    lines.join("\n")
}
