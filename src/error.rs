//! Error types for the form extraction library.
//!
//! Core pipeline stages are total functions over well-formed inputs; these
//! errors only arise at collaborator boundaries (HTTP transport, JSON
//! payloads, image decoding, file I/O).

/// Result type alias for formscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the edges of the extraction pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Page image could not be decoded
    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    /// HTTP transport failure talking to the external extractor
    #[error("Extractor transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed JSON from a collaborator
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// External extractor returned a structurally invalid response
    #[error("Extractor response invalid: {0}")]
    ExtractorResponse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
