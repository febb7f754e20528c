//! Geometric primitives in normalized page space.
//!
//! Overlay fields and placeholder coordinates use page-fraction coordinates:
//! `(0.0, 0.0)` is the top-left corner of a page and `(1.0, 1.0)` the
//! bottom-right, independent of the rendered page size in points or pixels.

use serde::{Deserialize, Serialize};

/// A 2D point in normalized page space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (page-width fraction)
    pub x: f32,
    /// Y coordinate (page-height fraction)
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in normalized page space.
///
/// # Examples
///
/// ```
/// use overlay_fields::geometry::Rect;
///
/// let rect = Rect::new(0.1, 0.2, 0.3, 0.05);
/// assert_eq!(rect.right(), 0.4);
/// assert!(rect.is_normalized());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of the top-left corner
    pub x: f32,
    /// Y coordinate of the top-left corner
    pub y: f32,
    /// Width as a page-width fraction
    pub width: f32,
    /// Height as a page-height fraction
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the rectangle.
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check whether the origin lies inside the unit page square.
    ///
    /// # Examples
    ///
    /// ```
    /// use overlay_fields::geometry::Rect;
    ///
    /// assert!(Rect::new(0.0, 1.0, 0.2, 0.1).is_normalized());
    /// assert!(!Rect::new(-0.1, 0.5, 0.2, 0.1).is_normalized());
    /// assert!(!Rect::new(0.5, 1.2, 0.2, 0.1).is_normalized());
    /// ```
    pub fn is_normalized(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    /// Check if this rectangle contains a point.
    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Compute the area of the rectangle (in page-fraction units squared).
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}
