//! End-to-end extraction pipeline.
//!
//! Pages are processed strictly sequentially: heuristic detection and the
//! external extractor run per page and are fused there, then the
//! concatenated result is sorted into final reading order with dense
//! identifiers. The pipeline holds no state between calls.

use crate::detect::detect_fields;
use crate::extractor::{Extraction, FieldExtractor};
use crate::fuse::merge_fields;
use crate::model::{FormDocument, FormField, Page};
use crate::order::order_fields;
use log::debug;

/// Extract the ordered field list for a set of pages.
///
/// An unavailable extractor contributes no candidates; an empty OCR page
/// yields no fields. Neither is an error.
pub fn extract_fields(pages: &[Page], extractor: &dyn FieldExtractor) -> Vec<FormField> {
    let mut all_fields = Vec::new();

    for page in pages {
        let heuristic = detect_fields(page);
        let external = match extractor.extract(page) {
            Extraction::Fields(fields) => fields,
            Extraction::Unavailable => {
                debug!("page {}: extractor unavailable", page.page_index);
                Vec::new()
            }
        };
        all_fields.extend(merge_fields(heuristic, external));
    }

    order_fields(all_fields)
}

/// Run extraction for a whole document, populating its field list.
pub fn extract_document(mut document: FormDocument, extractor: &dyn FieldExtractor) -> FormDocument {
    document.fields = extract_fields(&document.pages, extractor);
    document
}
