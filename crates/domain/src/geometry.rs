//! Geometry: normalized positions, pixel coordinates, and the conversion
//! between them.
//!
//! Positions are stored as fractions of the canvas so the arrangement
//! survives canvas resizes. Pixel values are integers, matching how the
//! view places device cards.

use serde::{Deserialize, Serialize};

/// Location of a device's top-left corner as a fraction of the canvas.
/// Both coordinates are always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Default for Position {
    fn default() -> Self {
        Self { x: 0.1, y: 0.1 }
    }
}

impl Position {
    /// Out-of-range or NaN coordinates are clamped into `[0, 1]`.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    #[must_use]
    pub fn x(self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn y(self) -> f64 {
        self.y
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Size of the drawing area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

/// Longest side pixel coordinates can address.
pub const MAX_SIDE: u32 = i32::MAX.unsigned_abs();

fn drawable(side: u32) -> bool {
    (1..=MAX_SIDE).contains(&side)
}

impl CanvasSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both sides non-zero and within [`MAX_SIDE`].
    #[must_use]
    pub fn is_drawable(self) -> bool {
        drawable(self.width) && drawable(self.height)
    }
}

/// Size of a device card, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    /// Both sides non-zero and within [`MAX_SIDE`].
    #[must_use]
    pub fn is_drawable(self) -> bool {
        drawable(self.width) && drawable(self.height)
    }
}

/// A point on the canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

impl Pixel {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle on the canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Pixel,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[must_use]
    pub fn center(&self) -> Pixel {
        Pixel::new(
            self.origin.x.saturating_add(half(self.width)),
            self.origin.y.saturating_add(half(self.height)),
        )
    }
}

fn half(length: u32) -> i32 {
    i32::try_from(length / 2).unwrap_or(i32::MAX)
}

#[allow(clippy::cast_possible_truncation)]
fn scale(fraction: f64, length: u32) -> i32 {
    (fraction * f64::from(length)).round() as i32
}

/// Pixel location of `position` on a canvas of the given size.
#[must_use]
pub fn to_pixels(position: Position, canvas: CanvasSize) -> Pixel {
    Pixel::new(
        scale(position.x, canvas.width),
        scale(position.y, canvas.height),
    )
}

/// Normalized position of a pixel location, clamped into the canvas and
/// rounded to two decimals. A zero-sized dimension maps to `0`.
#[must_use]
pub fn from_pixels(pixel: Pixel, canvas: CanvasSize) -> Position {
    Position::new(
        fraction(pixel.x, canvas.width),
        fraction(pixel.y, canvas.height),
    )
}

fn fraction(value: i32, length: u32) -> f64 {
    if length == 0 {
        return 0.0;
    }
    let ratio = clamp_unit(f64::from(value) / f64::from(length));
    (ratio * 100.0).round() / 100.0
}
