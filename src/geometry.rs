//! Geometric primitives for field detection.
//!
//! All coordinates are integer pixels in page space (origin top-left,
//! y increasing downward). Floating-point coordinates coming out of image
//! processing are rounded to integers at this boundary so that bounding-box
//! arithmetic stays exact and comparisons deterministic.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in page pixel space.
///
/// Invariant: `x1 <= x2` and `y1 <= y2` for boxes produced by this crate.
/// Serializes as the 4-element array `[x1, y1, x2, y2]`.
///
/// # Examples
///
/// ```
/// use formscan::geometry::BoundingBox;
///
/// let b = BoundingBox::new(10, 20, 110, 45);
/// assert_eq!(b.width(), 100);
/// assert_eq!(b.height(), 25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct BoundingBox {
    /// Left edge x-coordinate
    pub x1: i32,
    /// Top edge y-coordinate
    pub y1: i32,
    /// Right edge x-coordinate
    pub x2: i32,
    /// Bottom edge y-coordinate
    pub y2: i32,
}

impl From<[i32; 4]> for BoundingBox {
    fn from(v: [i32; 4]) -> Self {
        Self {
            x1: v[0],
            y1: v[1],
            x2: v[2],
            y2: v[3],
        }
    }
}

impl From<BoundingBox> for [i32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a bounding box from floating-point corners, rounding half away
    /// from zero. This is the single place float pixel coordinates enter the
    /// integer model.
    pub fn from_f32(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1: x1.round() as i32,
            y1: y1.round() as i32,
            x2: x2.round() as i32,
            y2: y2.round() as i32,
        }
    }

    /// Box width in pixels.
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    /// Box height in pixels.
    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Vertical center as a float (used for same-row association).
    pub fn center_y(&self) -> f32 {
        (self.y1 + self.y2) as f32 / 2.0
    }

    /// Smallest box covering both `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use formscan::geometry::BoundingBox;
    ///
    /// let a = BoundingBox::new(0, 0, 10, 10);
    /// let b = BoundingBox::new(5, 5, 20, 8);
    /// assert_eq!(a.union(&b), BoundingBox::new(0, 0, 20, 10));
    /// ```
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Merge a non-empty sequence of boxes into one encompassing box.
    /// Returns `None` for an empty input.
    pub fn merge_all<'a, I>(boxes: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = &'a BoundingBox>,
    {
        boxes
            .into_iter()
            .fold(None, |acc: Option<BoundingBox>, b| match acc {
                Some(a) => Some(a.union(b)),
                None => Some(*b),
            })
    }

    /// True for the all-zero box used by collaborators to signal "no box".
    pub fn is_degenerate(&self) -> bool {
        self.x1 == 0 && self.y1 == 0 && self.x2 == 0 && self.y2 == 0
    }
}
