//! Strongly-typed primitives for the routing engine.
//!
//! Geometry math runs on `glam::DVec2`; the newtypes here carry the values
//! that cross the public API (lengths, angles, normalized hook positions,
//! frames) so that units never get mixed up silently.

use std::fmt;
use std::ops::Neg;

use glam::{DVec2, dvec2};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Length in document units
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    /// Create a Length with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Length, NumericError> {
        check_finite(val).map(Length)
    }

    /// Create a non-negative Length with validation
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Length, NumericError> {
        let val = check_finite(val)?;
        if val < 0.0 {
            Err(NumericError::Negative)
        } else {
            Ok(Length(val))
        }
    }

    /// Create a strictly positive Length with validation
    #[inline]
    pub fn try_positive(val: f64) -> Result<Length, NumericError> {
        let len = Self::try_non_negative(val)?;
        if len.0 == 0.0 {
            Err(NumericError::Zero)
        } else {
            Ok(len)
        }
    }
}

/// Angle in degrees, clockwise on screen (Y-down)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Angle(pub f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    /// Create an Angle with validation (rejects NaN/infinite)
    pub fn try_new(degrees: f64) -> Result<Angle, NumericError> {
        check_finite(degrees).map(Angle)
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Same angle folded into `[0, 360)`
    pub fn normalized(self) -> Angle {
        Angle(self.0.rem_euclid(360.0))
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

/// Attachment position in the normalized hook space.
///
/// Both coordinates run from `0` (left/top edge of the frame) to the
/// configured normalized extent (1000 by default), independent of the
/// frame's actual size.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct HookPoint {
    pub x: f64,
    pub y: f64,
}

impl HookPoint {
    pub fn new(x: f64, y: f64) -> Self {
        HookPoint { x, y }
    }
}

/// Axis-aligned rectangle, used for frames and shape bounds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: dvec2(f64::MAX, f64::MAX),
            max: dvec2(f64::MIN, f64::MIN),
        }
    }

    /// Rectangle spanned by two corner points, in any order
    pub fn from_points(a: DVec2, b: DVec2) -> Self {
        BBox {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Tight bounds of a point set; empty when the iterator is.
    pub fn enclosing<I: IntoIterator<Item = DVec2>>(points: I) -> Self {
        let mut bbox = Self::new();
        for p in points {
            bbox.expand_point(p);
        }
        bbox
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Grow every side by `amount`
    pub fn inflate(&self, amount: f64) -> BBox {
        BBox {
            min: self.min - DVec2::splat(amount),
            max: self.max + DVec2::splat(amount),
        }
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Shift the whole rectangle
    pub fn translate(&self, delta: DVec2) -> BBox {
        BBox {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

/// Rotate `p` about `origin` by `angle` (clockwise on a Y-down canvas).
pub fn rotate_point(origin: DVec2, p: DVec2, angle: Angle) -> DVec2 {
    if angle.0 == 0.0 {
        return p;
    }
    let (sin, cos) = angle.radians().sin_cos();
    let d = p - origin;
    origin + dvec2(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

/// `v` limited to `[lo, hi]`. An inverted range collapses to `lo` and NaN
/// bounds are ignored.
pub fn clamp_range(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}

/// Stroke color, 8-bit RGB
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Color(pub u8, pub u8, pub u8);

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Dash pattern applied to a stroke
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StrokePattern {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

/// Stroke styling owned by a line. Geometry never reads it except for
/// `thickness`, which widens hit tests and the add-corner tolerance.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleRecord {
    pub color: Color,
    pub thickness: f64,
    pub pattern: StrokePattern,
    pub opacity: f64,
}

impl Default for StyleRecord {
    fn default() -> Self {
        StyleRecord {
            color: Color::default(),
            thickness: 1.0,
            pattern: StrokePattern::Solid,
            opacity: 1.0,
        }
    }
}

/// Identifier of a diagram object (line or shape) owned by the document
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
