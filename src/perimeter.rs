//! Mapping between normalized hook space (`0..=extent`, 1000 by default)
//! and absolute document coordinates inside a frame.
//!
//! The frame may be rotated about its center. Coordinates exactly at `0` or
//! `extent` map to the frame edges without interpolation, so corner hooks
//! land on the exact corner.

use glam::{DVec2, dvec2};

use crate::hit::hit_test;
use crate::types::{Angle, BBox, HookPoint, clamp_range, rotate_point};

/// A frame plus the rotation it is drawn with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerimeterMapper {
    pub frame: BBox,
    pub rotation: Angle,
    /// Upper bound of the normalized space
    pub extent: f64,
}

impl PerimeterMapper {
    pub fn new(frame: BBox, rotation: Angle, extent: f64) -> Self {
        PerimeterMapper {
            frame,
            rotation,
            extent,
        }
    }

    fn axis_to_absolute(&self, v: f64, min: f64, max: f64) -> f64 {
        if v == 0.0 {
            min
        } else if v == self.extent {
            max
        } else {
            min + (max - min) * (v / self.extent)
        }
    }

    fn axis_to_normalized(&self, v: f64, min: f64, max: f64) -> f64 {
        let size = max - min;
        if size <= 0.0 || v == min {
            0.0
        } else if v == max {
            self.extent
        } else {
            clamp_range((v - min) / size * self.extent, 0.0, self.extent)
        }
    }

    /// Absolute point for a normalized hook.
    pub fn to_absolute(&self, hook: HookPoint) -> DVec2 {
        let f = &self.frame;
        let p = dvec2(
            self.axis_to_absolute(hook.x, f.min.x, f.max.x),
            self.axis_to_absolute(hook.y, f.min.y, f.max.y),
        );
        rotate_point(f.center(), p, -self.rotation)
    }

    /// Normalized hook for an absolute point.
    ///
    /// When `route` is given and the point lies within `tolerance` of it, the
    /// point is first snapped onto the route so the hook sits on the stroke.
    pub fn to_normalized(&self, point: DVec2, route: &[DVec2], tolerance: f64) -> HookPoint {
        let f = &self.frame;
        let local = rotate_point(f.center(), point, self.rotation);
        let p = hit_test(route, local, tolerance).map_or(local, |hit| hit.snapped);
        HookPoint::new(
            self.axis_to_normalized(p.x, f.min.x, f.max.x),
            self.axis_to_normalized(p.y, f.min.y, f.max.y),
        )
    }
}
