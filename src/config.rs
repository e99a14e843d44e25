//! Document-level routing configuration

use glam::{DVec2, dvec2};

use crate::defaults;
use crate::errors::ConfigError;
use crate::types::{Angle, Length, clamp_range};

/// Tunables consumed by every routing operation.
///
/// These are document settings, not business rules: the editor hands a
/// config to each edit through an [`EditContext`](crate::EditContext).
#[derive(Debug, Clone, PartialEq)]
pub struct RouteConfig {
    /// Shortest segment a synthesized route may contain
    pub min_segment_length: Length,
    /// Perpendicular separations below this collapse to a straight connector
    pub min_segment_merge: Length,
    /// Stub length used when no hook or drag handle dictates one
    pub default_stub: Length,
    /// Document extent; points are clamped into `[0, max_dimension]`
    pub max_dimension: Length,
    /// Near-axis snapping tolerance for dragged endpoints and rotations
    pub rotation_snap: Angle,
    /// Constant added to hit-test thresholds
    pub hit_padding: Length,
    /// Fraction of the shorter neighbouring segment a rounded corner may use
    pub corner_ratio: f64,
    /// Upper bound of the normalized hook space
    pub normalized_extent: f64,
    /// Forbid automatic correction of requested endpoints
    pub no_auto: bool,
}

impl Default for RouteConfig {
    fn default() -> Self {
        RouteConfig {
            min_segment_length: defaults::MIN_SEGMENT_LENGTH,
            min_segment_merge: defaults::MIN_SEGMENT_MERGE,
            default_stub: defaults::DEFAULT_STUB,
            max_dimension: defaults::MAX_DIMENSION,
            rotation_snap: defaults::ROTATION_SNAP,
            hit_padding: defaults::HIT_PADDING,
            corner_ratio: defaults::CORNER_RATIO,
            normalized_extent: defaults::NORMALIZED_EXTENT,
            no_auto: false,
        }
    }
}

impl RouteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_segment_length(mut self, len: f64) -> Self {
        self.min_segment_length = Length(len);
        self
    }

    pub fn with_min_segment_merge(mut self, len: f64) -> Self {
        self.min_segment_merge = Length(len);
        self
    }

    pub fn with_default_stub(mut self, len: f64) -> Self {
        self.default_stub = Length(len);
        self
    }

    pub fn with_max_dimension(mut self, len: f64) -> Self {
        self.max_dimension = Length(len);
        self
    }

    pub fn with_rotation_snap(mut self, degrees: f64) -> Self {
        self.rotation_snap = Angle(degrees);
        self
    }

    pub fn with_hit_padding(mut self, padding: f64) -> Self {
        self.hit_padding = Length(padding);
        self
    }

    pub fn with_corner_ratio(mut self, ratio: f64) -> Self {
        self.corner_ratio = ratio;
        self
    }

    pub fn with_normalized_extent(mut self, extent: f64) -> Self {
        self.normalized_extent = extent;
        self
    }

    pub fn with_no_auto(mut self, no_auto: bool) -> Self {
        self.no_auto = no_auto;
        self
    }

    /// Check every value once, up front, so geometry code can trust them.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let positive = |field: &'static str, v: f64| {
            Length::try_positive(v).map_err(|source| ConfigError::InvalidNumber { field, source })
        };
        let non_negative = |field: &'static str, v: f64| {
            Length::try_non_negative(v)
                .map_err(|source| ConfigError::InvalidNumber { field, source })
        };

        non_negative("min_segment_length", self.min_segment_length.0)?;
        non_negative("min_segment_merge", self.min_segment_merge.0)?;
        positive("default_stub", self.default_stub.0)?;
        positive("max_dimension", self.max_dimension.0)?;
        non_negative("rotation_snap", self.rotation_snap.0)?;
        non_negative("hit_padding", self.hit_padding.0)?;
        non_negative("corner_ratio", self.corner_ratio)?;
        positive("normalized_extent", self.normalized_extent)?;

        if self.min_segment_length > self.default_stub {
            return Err(ConfigError::StubShorterThanMinimum {
                min: self.min_segment_length.0,
                stub: self.default_stub.0,
            });
        }
        if self.max_dimension < self.default_stub {
            return Err(ConfigError::DocumentTooSmall {
                max: self.max_dimension.0,
                stub: self.default_stub.0,
            });
        }
        Ok(self)
    }

    /// Clamp a stub or run length into `[min_segment_length, max_dimension]`.
    ///
    /// A document smaller than the minimum segment yields the minimum.
    pub fn clamp_length(&self, len: f64) -> f64 {
        clamp_range(len, self.min_segment_length.0, self.max_dimension.0)
    }

    /// Clamp a point into the document bounds.
    pub fn clamp_point(&self, p: DVec2) -> DVec2 {
        let max = self.max_dimension.0;
        dvec2(clamp_range(p.x, 0.0, max), clamp_range(p.y, 0.0, max))
    }

    /// Snap `end` onto the horizontal or vertical through `anchor` when the
    /// segment between them is within `rotation_snap` of that axis.
    ///
    /// Returns `None` when no snap applies (or snapping is disabled).
    pub fn snap_to_axis(&self, anchor: DVec2, end: DVec2) -> Option<DVec2> {
        let tol = self.rotation_snap.0;
        if tol <= 0.0 || self.no_auto || anchor == end {
            return None;
        }
        let d = end - anchor;
        let deg = d.y.atan2(d.x).to_degrees().rem_euclid(180.0);
        if deg <= tol || deg >= 180.0 - tol {
            Some(dvec2(end.x, anchor.y)).filter(|p| *p != end)
        } else if (deg - 90.0).abs() <= tol {
            Some(dvec2(anchor.x, end.y)).filter(|p| *p != end)
        } else {
            None
        }
    }

    /// Round a rotation to the nearest quarter turn when within tolerance.
    pub fn snap_rotation(&self, angle: Angle) -> Angle {
        let tol = self.rotation_snap.0;
        let a = angle.normalized().0;
        let nearest = (a / 90.0).round() * 90.0;
        if tol > 0.0 && (a - nearest).abs() <= tol {
            Angle(nearest.rem_euclid(360.0))
        } else {
            angle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumericError;

    #[test]
    fn default_config_validates() {
        assert!(RouteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_numbers() {
        let err = RouteConfig::new().with_default_stub(f64::NAN).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                field: "default_stub",
                source: NumericError::NaN
            }
        );

        let err = RouteConfig::new().with_min_segment_merge(-1.0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { field: "min_segment_merge", .. }));
    }

    #[test]
    fn validate_rejects_stub_below_minimum() {
        let err = RouteConfig::new()
            .with_min_segment_length(30.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::StubShorterThanMinimum { .. }));
    }

    #[test]
    fn clamp_length_with_tiny_document() {
        let cfg = RouteConfig::new().with_max_dimension(2.0);
        assert_eq!(cfg.clamp_length(25.0), 4.0);
        assert_eq!(cfg.clamp_length(1.0), 4.0);
        assert_eq!(cfg.clamp_point(dvec2(5.0, -1.0)), dvec2(2.0, 0.0));
    }

    #[test]
    fn clamp_point_into_document() {
        let cfg = RouteConfig::new().with_max_dimension(500.0);
        assert_eq!(cfg.clamp_point(dvec2(-5.0, 900.0)), dvec2(0.0, 500.0));
    }

    #[test]
    fn snap_to_axis_near_horizontal() {
        let cfg = RouteConfig::default();
        // ~1.1 degrees off horizontal
        let snapped = cfg.snap_to_axis(dvec2(0.0, 0.0), dvec2(100.0, 2.0));
        assert_eq!(snapped, Some(dvec2(100.0, 0.0)));
        // well away from both axes
        assert_eq!(cfg.snap_to_axis(dvec2(0.0, 0.0), dvec2(100.0, 40.0)), None);
    }

    #[test]
    fn snap_to_axis_near_vertical_and_disabled_by_no_auto() {
        let cfg = RouteConfig::default();
        let snapped = cfg.snap_to_axis(dvec2(10.0, 10.0), dvec2(12.0, 200.0));
        assert_eq!(snapped, Some(dvec2(10.0, 200.0)));
        let strict = RouteConfig::default().with_no_auto(true);
        assert_eq!(strict.snap_to_axis(dvec2(10.0, 10.0), dvec2(12.0, 200.0)), None);
    }

    #[test]
    fn snap_rotation_to_quarter_turns() {
        let cfg = RouteConfig::default();
        assert_eq!(cfg.snap_rotation(Angle(88.5)), Angle(90.0));
        assert_eq!(cfg.snap_rotation(Angle(358.0)), Angle(0.0));
        assert_eq!(cfg.snap_rotation(Angle(45.0)), Angle(45.0));
    }
}
