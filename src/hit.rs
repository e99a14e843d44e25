//! Hit testing of point lists.
//!
//! Segments are tested in route order and the first match wins, so a point
//! near a shared corner reports the earlier segment.

use glam::DVec2;

use crate::config::RouteConfig;
use crate::types::BBox;

/// A successful hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Index of the segment `points[i] -> points[i + 1]`
    pub segment_index: usize,
    /// Closest point on that segment, for snapping drag feedback
    pub snapped: DVec2,
}

/// Threshold for a stroke of width `base` plus a caller-specific `extra`.
pub fn hit_threshold(cfg: &RouteConfig, base: f64, extra: f64) -> f64 {
    base + cfg.hit_padding.0 + extra
}

/// Closest point to `p` on the segment `a -> b`.
pub fn closest_point_on_segment(a: DVec2, b: DVec2, p: DVec2) -> DVec2 {
    let d = b - a;
    let len2 = d.length_squared();
    if len2 == 0.0 {
        return a;
    }
    let t = ((p - a).dot(d) / len2).clamp(0.0, 1.0);
    a + d * t
}

fn segment_hit(a: DVec2, b: DVec2, p: DVec2, threshold: f64) -> bool {
    if !BBox::from_points(a, b).inflate(threshold).contains(p) {
        return false;
    }
    let d = b - a;
    if d.x == 0.0 {
        return (p.x - a.x).abs() <= threshold;
    }
    if d.y == 0.0 {
        return (p.y - a.y).abs() <= threshold;
    }

    // Compare the axis distance to the line against a threshold stretched by
    // hypotenuse / axis extent, which is the perpendicular test in disguise.
    let hyp = d.length();
    if d.x.abs() >= d.y.abs() {
        let y_on_line = a.y + (p.x - a.x) * d.y / d.x;
        (p.y - y_on_line).abs() <= threshold * hyp / d.x.abs()
    } else {
        let x_on_line = a.x + (p.y - a.y) * d.x / d.y;
        (p.x - x_on_line).abs() <= threshold * hyp / d.y.abs()
    }
}

/// First segment of `points` within `threshold` of `p`.
pub fn hit_test(points: &[DVec2], p: DVec2, threshold: f64) -> Option<SegmentHit> {
    points.windows(2).enumerate().find_map(|(i, w)| {
        segment_hit(w[0], w[1], p, threshold).then(|| SegmentHit {
            segment_index: i,
            snapped: closest_point_on_segment(w[0], w[1], p),
        })
    })
}
