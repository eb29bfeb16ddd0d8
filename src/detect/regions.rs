//! Visual answer-region detection from page pixels.
//!
//! Runs independently of OCR. Two passes over the decoded grayscale page,
//! concatenated into one candidate list:
//!
//! 1. **Underlines** — Canny edge map, then a gap-tolerant horizontal run
//!    scan (min length 100 px, max gap 10 px). OpenCV's probabilistic Hough
//!    transform has no imageproc counterpart; for axis-aligned underlines
//!    the run scan finds the same segments, with the vote threshold subsumed
//!    by the minimum run length. The candidate is a 25 px band immediately
//!    above the segment.
//! 2. **Boxes** — inverted binary threshold at 200, external contours,
//!    bounding rectangles filtered by aspect ratio > 2.0, width > 80 and
//!    15 < height < 80 (drops full-width rules and tiny noise).
//!
//! An undecodable image yields an empty list, never an error; the pipeline
//! falls through to synthesized regions.

use crate::geometry::BoundingBox;
use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::edges::canny;
use log::debug;

/// Canny thresholds for the underline pass.
const CANNY_LOW: f32 = 50.0;
const CANNY_HIGH: f32 = 150.0;
/// Minimum horizontal segment length accepted as an underline.
const MIN_UNDERLINE_LENGTH: i32 = 100;
/// Maximum run of missing edge pixels bridged within one segment.
const MAX_UNDERLINE_GAP: i32 = 10;
/// Segments within this many rows of an accepted one are the same stroke.
const UNDERLINE_MERGE_ROWS: i32 = 5;
/// Height of the writing band placed above a detected underline.
const UNDERLINE_BAND_HEIGHT: i32 = 25;
/// Inverted binary threshold cutoff for the box pass.
const BOX_THRESHOLD: u8 = 200;

/// How a candidate region was detected. Carried for diagnostics; not used
/// semantically downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// Writing band above a detected underline segment
    Underline,
    /// Boxed rectangle
    Box,
}

/// A page area hypothesized to be where an answer should be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRegion {
    /// Region bounds in page pixels
    pub bbox: BoundingBox,
    /// Detection method
    pub kind: RegionKind,
}

/// Detect candidate answer regions on a page image.
///
/// Underline candidates precede box candidates in the returned list; the
/// spatial associator's first-encountered tie-break depends on that order.
pub fn detect_input_regions(image_bytes: &[u8]) -> Vec<CandidateRegion> {
    let gray = match image::load_from_memory(image_bytes) {
        Ok(img) => img.to_luma8(),
        Err(err) => {
            debug!("page image undecodable, no visual regions: {err}");
            return Vec::new();
        }
    };

    let mut regions = detect_underlines(&gray);
    regions.extend(detect_boxes(&gray));
    debug!("detected {} candidate regions", regions.len());
    regions
}

/// Horizontal underline segments via Canny edges and a per-row run scan.
fn detect_underlines(gray: &GrayImage) -> Vec<CandidateRegion> {
    let edges = canny(gray, CANNY_LOW, CANNY_HIGH);
    let (width, height) = edges.dimensions();

    // Accepted segments as (x1, y, x2), used to suppress the duplicate edge
    // rows a single stroke produces.
    let mut segments: Vec<(i32, i32, i32)> = Vec::new();

    for y in 0..height as i32 {
        let mut start: Option<i32> = None;
        let mut last_edge = 0i32;
        for x in 0..width as i32 {
            let is_edge = edges.get_pixel(x as u32, y as u32).0[0] > 0;
            if is_edge {
                match start {
                    None => {
                        start = Some(x);
                        last_edge = x;
                    }
                    Some(s) => {
                        if x - last_edge - 1 > MAX_UNDERLINE_GAP {
                            close_segment(&mut segments, s, last_edge, y);
                            start = Some(x);
                        }
                        last_edge = x;
                    }
                }
            }
        }
        if let Some(s) = start {
            close_segment(&mut segments, s, last_edge, y);
        }
    }

    segments
        .into_iter()
        .map(|(x1, y, x2)| CandidateRegion {
            bbox: BoundingBox::new(x1, y - UNDERLINE_BAND_HEIGHT, x2, y),
            kind: RegionKind::Underline,
        })
        .collect()
}

/// Record a finished run if it is long enough and not a duplicate of a
/// segment found on a nearby row.
fn close_segment(segments: &mut Vec<(i32, i32, i32)>, x1: i32, x2: i32, y: i32) {
    if x2 - x1 < MIN_UNDERLINE_LENGTH {
        return;
    }
    let duplicate = segments
        .iter()
        .any(|&(sx1, sy, sx2)| y - sy < UNDERLINE_MERGE_ROWS && x1 <= sx2 && x2 >= sx1);
    if !duplicate {
        segments.push((x1, y, x2));
    }
}

/// Rectangular answer boxes via inverted threshold and external contours.
fn detect_boxes(gray: &GrayImage) -> Vec<CandidateRegion> {
    let (width, height) = gray.dimensions();
    let mut binary = GrayImage::new(width, height);
    for (x, y, pixel) in gray.enumerate_pixels() {
        let value = if pixel.0[0] <= BOX_THRESHOLD { 255 } else { 0 };
        binary.put_pixel(x, y, image::Luma([value]));
    }

    let mut regions = Vec::new();
    for contour in find_contours::<i32>(&binary) {
        // Outermost borders only, mirroring external contour retrieval.
        if contour.parent.is_some() || contour.points.is_empty() {
            continue;
        }
        let min_x = contour.points.iter().map(|p| p.x).min().unwrap_or(0);
        let max_x = contour.points.iter().map(|p| p.x).max().unwrap_or(0);
        let min_y = contour.points.iter().map(|p| p.y).min().unwrap_or(0);
        let max_y = contour.points.iter().map(|p| p.y).max().unwrap_or(0);

        let w = max_x - min_x + 1;
        let h = max_y - min_y + 1;
        let aspect = w as f32 / h.max(1) as f32;
        if aspect > 2.0 && w > 80 && h > 15 && h < 80 {
            regions.push(CandidateRegion {
                bbox: BoundingBox::new(min_x, min_y, min_x + w, min_y + h),
                kind: RegionKind::Box,
            });
        }
    }
    regions
}
