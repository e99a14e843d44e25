//! Rounded corners for orthogonal routes.
//!
//! Each interior corner is replaced by a quadratic Bezier whose control
//! point is the corner itself. The radius is capped by a fraction of the
//! shorter neighbouring segment so adjacent curves never overlap.

use glam::DVec2;

use crate::path_data::PathData;

/// Radius used at a corner between segments of `before` and `after` length.
pub fn corner_radius(curve: f64, ratio: f64, before: f64, after: f64) -> f64 {
    curve.min(ratio * before.min(after)).max(0.0)
}

/// One rounded corner: where the curve leaves the incoming segment, the
/// corner (control point), and where it joins the outgoing segment.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Corner {
    enter: DVec2,
    control: DVec2,
    exit: DVec2,
}

impl Corner {
    fn point(&self, t: f64) -> DVec2 {
        let u = 1.0 - t;
        self.enter * (u * u) + self.control * (2.0 * u * t) + self.exit * (t * t)
    }
}

fn corners(points: &[DVec2], curve: f64, ratio: f64) -> Vec<Option<Corner>> {
    let mut out = Vec::with_capacity(points.len().saturating_sub(2));
    for w in points.windows(3) {
        let (a, p, b) = (w[0], w[1], w[2]);
        let r = corner_radius(curve, ratio, a.distance(p), p.distance(b));
        if r <= 0.0 {
            out.push(None);
            continue;
        }
        let din = (p - a).normalize_or_zero();
        let dout = (b - p).normalize_or_zero();
        out.push(Some(Corner {
            enter: p - din * r,
            control: p,
            exit: p + dout * r,
        }));
    }
    out
}

/// Points of the route with every interior corner replaced by a sampled
/// curve. Identity when `curve` is zero or there is no interior corner.
pub fn round_corners(points: &[DVec2], curve: f64, ratio: f64) -> Vec<DVec2> {
    if curve <= 0.0 || points.len() < 3 {
        return points.to_vec();
    }
    let mut out = vec![points[0]];
    for (i, corner) in corners(points, curve, ratio).into_iter().enumerate() {
        match corner {
            Some(c) => {
                out.push(c.enter);
                out.push(c.point(1.0 / 3.0));
                out.push(c.point(2.0 / 3.0));
                out.push(c.exit);
            }
            None => out.push(points[i + 1]),
        }
    }
    out.push(points[points.len() - 1]);
    out
}

/// Path data for the route, with `Q` commands at rounded corners.
pub fn rounded_path(points: &[DVec2], curve: f64, ratio: f64) -> PathData {
    let Some(&first) = points.first() else {
        return PathData::new();
    };
    if curve <= 0.0 || points.len() < 3 {
        return PathData::polyline(points);
    }
    let mut data = PathData::new().m(first.x, first.y);
    for (i, corner) in corners(points, curve, ratio).into_iter().enumerate() {
        data = match corner {
            Some(c) => data
                .l(c.enter.x, c.enter.y)
                .q(c.control.x, c.control.y, c.exit.x, c.exit.y),
            None => data.l(points[i + 1].x, points[i + 1].y),
        };
    }
    let last = points[points.len() - 1];
    data.l(last.x, last.y)
}
