//! # formscan
//!
//! Form field detection from scanned or photographed documents.
//!
//! Given a page's OCR tokens and raw pixels, formscan recovers a
//! structured, ordered list of fillable fields: where each field's label
//! sits, where its answer should be written, what kind of value it expects,
//! whether it is mandatory, and how confident the detection is. Three weak,
//! independently-wrong signals are reconciled into one deterministic list:
//!
//! 1. regex-based label classification over grouped OCR lines;
//! 2. image-geometry detection of answer regions (underlines and boxes);
//! 3. an optional external LLM extractor proposing a second candidate list.
//!
//! The pipeline stages, each consuming the previous stage's output:
//! line grouping → label classification → visual region detection →
//! spatial association → heuristic field building → external extraction →
//! fusion → reading-order sequencing.
//!
//! ## Quick start
//!
//! ```
//! use formscan::extractor::NullExtractor;
//! use formscan::geometry::BoundingBox;
//! use formscan::model::{HierarchyLevel, OcrToken, Page};
//! use formscan::pipeline::extract_fields;
//!
//! let page = Page {
//!     page_index: 0,
//!     image_bytes: Vec::new(),
//!     width: 1000,
//!     height: 1400,
//!     dpi: 300,
//!     tokens: vec![OcrToken {
//!         text: "Name:".to_string(),
//!         bbox: BoundingBox::new(50, 100, 120, 120),
//!         confidence: 0.95,
//!         level: HierarchyLevel::Word,
//!         block_index: 1,
//!         line_index: 1,
//!         word_index: 1,
//!     }],
//! };
//!
//! let fields = extract_fields(&[page], &NullExtractor);
//! assert_eq!(fields.len(), 1);
//! assert_eq!(fields[0].field_id, "f000");
//! assert_eq!(fields[0].label_text, "Name");
//! ```
//!
//! The OCR engine, rasterization, and export rendering are external
//! collaborators; this crate consumes tokens and pixels and produces
//! fields.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Data model
pub mod geometry;
pub mod model;
pub mod ocr;

// Detection pipeline
pub mod detect;
pub mod extractor;
pub mod fuse;
pub mod order;
pub mod pipeline;

// Collaborator-facing services
pub mod store;
pub mod summary;
pub mod validate;

pub use error::{Error, Result};
pub use geometry::BoundingBox;
pub use model::{FieldType, FormDocument, FormField, OcrToken, Page};
pub use pipeline::{extract_document, extract_fields};
