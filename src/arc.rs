//! Arc solver: circle through two endpoints with a given bow (sagitta).
//!
//! The solver is a pure function of its inputs. A zero-length chord is
//! reported as `valid == false`; callers must check before using the
//! center or radius.

use std::f64::consts::{PI, TAU};

use glam::{DVec2, dvec2};

use crate::defaults;
use crate::path_data::PathData;

/// Result of [`solve_arc`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSolution {
    pub center: DVec2,
    /// `f64::INFINITY` for a zero bow (the arc is the chord itself)
    pub radius: f64,
    /// Apex of the arc, used as the curvature drag handle
    pub action_point: DVec2,
    pub valid: bool,
    /// The center lies beyond the apex side of the chord, so the arc spans
    /// more than half the circle
    pub center_inside: bool,
}

impl ArcSolution {
    fn invalid(at: DVec2) -> Self {
        ArcSolution {
            center: at,
            radius: 0.0,
            action_point: at,
            valid: false,
            center_inside: false,
        }
    }

    /// True when the arc degenerates to its chord.
    pub fn is_flat(&self) -> bool {
        self.radius.is_infinite()
    }
}

/// Unit normal of the chord `start -> end`, or `None` for a zero chord.
fn chord_normal(start: DVec2, end: DVec2) -> Option<DVec2> {
    let d = end - start;
    let len = d.length();
    if len < f64::EPSILON {
        return None;
    }
    Some(dvec2(-d.y, d.x) / len)
}

/// Solve the arc from `start` to `end` whose apex sits `bow` away from the
/// chord midpoint.
///
/// A positive bow with `reversed == false` bulges to the left of the
/// direction of travel on screen (above a left-to-right chord). A negative
/// bow is the same as flipping `reversed`.
pub fn solve_arc(start: DVec2, end: DVec2, bow: f64, reversed: bool) -> ArcSolution {
    let Some(n) = chord_normal(start, end) else {
        return ArcSolution::invalid(start);
    };
    let mid = (start + end) * 0.5;
    if bow == 0.0 {
        return ArcSolution {
            center: mid,
            radius: f64::INFINITY,
            action_point: mid,
            valid: true,
            center_inside: false,
        };
    }

    let half = start.distance(end) / 2.0;
    let a = bow.abs();
    let reversed = reversed ^ (bow < 0.0);
    let radius = (half * half + a * a) / (2.0 * a);
    let side = if reversed { -1.0 } else { 1.0 };

    ArcSolution {
        center: mid + n * (side * (radius - a)),
        radius,
        action_point: mid - n * (side * a),
        valid: true,
        center_inside: radius < a,
    }
}

/// Bow and orientation that make the arc pass through `apex`.
///
/// Inverse of [`solve_arc`] for a point on the chord's perpendicular
/// bisector; other points use their distance from the chord line.
pub fn bow_through(start: DVec2, end: DVec2, apex: DVec2) -> (f64, bool) {
    let Some(n) = chord_normal(start, end) else {
        return (0.0, false);
    };
    let mid = (start + end) * 0.5;
    let signed = (mid - apex).dot(n);
    (signed.abs(), signed < 0.0)
}

/// Wrap an angle into `(-PI, PI]`.
fn wrap_angle(a: f64) -> f64 {
    let a = a.rem_euclid(TAU);
    if a > PI { a - TAU } else { a }
}

fn angle_of(v: DVec2) -> f64 {
    v.y.atan2(v.x)
}

/// Signed sweep from `start` to `end` through the apex, in radians.
fn sweep(start: DVec2, arc: &ArcSolution) -> f64 {
    let a0 = angle_of(start - arc.center);
    let apex = angle_of(arc.action_point - arc.center);
    2.0 * wrap_angle(apex - a0)
}

/// Sample the arc into `ARC_SAMPLES + 1` points, endpoints exact.
///
/// Flat or invalid arcs yield the chord.
pub fn sample_arc(start: DVec2, end: DVec2, arc: &ArcSolution) -> Vec<DVec2> {
    if !arc.valid || arc.is_flat() {
        return vec![start, end];
    }
    let n = defaults::ARC_SAMPLES;
    let a0 = angle_of(start - arc.center);
    let total = sweep(start, arc);
    let mut points = Vec::with_capacity(n + 1);
    points.push(start);
    for i in 1..n {
        let t = a0 + total * (i as f64 / n as f64);
        points.push(arc.center + dvec2(t.cos(), t.sin()) * arc.radius);
    }
    points.push(end);
    points
}

/// Path data for the arc: a single `A` command, or a line when flat.
pub fn arc_path(start: DVec2, end: DVec2, arc: &ArcSolution) -> PathData {
    let data = PathData::new().m(start.x, start.y);
    if !arc.valid || arc.is_flat() {
        return data.l(end.x, end.y);
    }
    let r = arc.radius;
    data.a(r, r, 0.0, arc.center_inside, sweep(start, arc) > 0.0, end.x, end.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==================== solve tests ====================

    #[test]
    fn coincident_endpoints_are_invalid() {
        let p = dvec2(10.0, 10.0);
        let arc = solve_arc(p, p, 20.0, false);
        assert!(!arc.valid);
    }

    #[test]
    fn half_circle_has_center_on_chord() {
        let arc = solve_arc(dvec2(0.0, 0.0), dvec2(100.0, 0.0), 50.0, false);
        assert!(arc.valid);
        assert_relative_eq!(arc.radius, 50.0);
        assert_relative_eq!(arc.center.x, 50.0);
        assert_relative_eq!(arc.center.y, 0.0);
        assert_relative_eq!(arc.action_point.y, -50.0);
        assert!(!arc.center_inside);
    }

    #[test]
    fn endpoints_and_apex_lie_on_the_circle() {
        let (s, e) = (dvec2(10.0, 40.0), dvec2(130.0, 90.0));
        for (bow, reversed) in [(15.0, false), (15.0, true), (200.0, false), (-30.0, false)] {
            let arc = solve_arc(s, e, bow, reversed);
            assert_relative_eq!(arc.center.distance(s), arc.radius, epsilon = 1e-9);
            assert_relative_eq!(arc.center.distance(e), arc.radius, epsilon = 1e-9);
            assert_relative_eq!(arc.center.distance(arc.action_point), arc.radius, epsilon = 1e-9);
        }
    }

    #[test]
    fn deep_bow_puts_center_inside() {
        let arc = solve_arc(dvec2(0.0, 0.0), dvec2(100.0, 0.0), 80.0, false);
        assert!(arc.center_inside);
        assert!(arc.center.y < 0.0);
    }

    #[test]
    fn reversed_mirrors_across_chord() {
        let a = solve_arc(dvec2(0.0, 0.0), dvec2(100.0, 0.0), 20.0, false);
        let b = solve_arc(dvec2(0.0, 0.0), dvec2(100.0, 0.0), 20.0, true);
        assert_relative_eq!(a.action_point.y, -b.action_point.y);
        assert_relative_eq!(a.center.y, -b.center.y);
        let c = solve_arc(dvec2(0.0, 0.0), dvec2(100.0, 0.0), -20.0, false);
        assert_eq!(b, c);
    }

    #[test]
    fn vanishing_bow_flattens_to_chord() {
        let (s, e) = (dvec2(0.0, 0.0), dvec2(100.0, 0.0));
        let mut last_radius = 0.0;
        for bow in [1.0, 1e-2, 1e-4, 1e-6] {
            let arc = solve_arc(s, e, bow, false);
            assert!(arc.radius > last_radius);
            last_radius = arc.radius;
            assert!(arc.action_point.distance(dvec2(50.0, 0.0)) <= bow + 1e-12);
        }
        let flat = solve_arc(s, e, 0.0, false);
        assert!(flat.valid && flat.is_flat());
        assert_eq!(flat.action_point, dvec2(50.0, 0.0));
    }

    #[test]
    fn solve_is_reproducible() {
        let a = solve_arc(dvec2(3.0, 7.0), dvec2(91.0, -12.0), 33.3, true);
        let b = solve_arc(dvec2(3.0, 7.0), dvec2(91.0, -12.0), 33.3, true);
        assert_eq!(a, b);
    }

    // ==================== bow tests ====================

    #[test]
    fn bow_through_inverts_solve() {
        let (s, e) = (dvec2(20.0, 20.0), dvec2(220.0, 120.0));
        for (bow, reversed) in [(30.0, false), (45.0, true)] {
            let arc = solve_arc(s, e, bow, reversed);
            let (b, r) = bow_through(s, e, arc.action_point);
            assert_relative_eq!(b, bow, epsilon = 1e-9);
            assert_eq!(r, reversed);
        }
    }

    // ==================== sampling tests ====================

    #[test]
    fn samples_pass_through_apex() {
        let (s, e) = (dvec2(0.0, 0.0), dvec2(100.0, 0.0));
        let arc = solve_arc(s, e, 50.0, false);
        let pts = sample_arc(s, e, &arc);
        assert_eq!(pts.len(), defaults::ARC_SAMPLES + 1);
        assert_eq!(pts[0], s);
        assert_eq!(pts[pts.len() - 1], e);
        let apex = pts[defaults::ARC_SAMPLES / 2];
        assert_relative_eq!(apex.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(apex.y, -50.0, epsilon = 1e-9);
    }

    #[test]
    fn arc_path_is_single_command() {
        let (s, e) = (dvec2(0.0, 0.0), dvec2(100.0, 0.0));
        let arc = solve_arc(s, e, 50.0, false);
        insta::assert_snapshot!(arc_path(s, e, &arc).to_string(), @"M0,0A50 50 0 0 1 100,0");
        let flat = solve_arc(s, e, 0.0, false);
        insta::assert_snapshot!(arc_path(s, e, &flat).to_string(), @"M0,0L100,0");
    }
}
