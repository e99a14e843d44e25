//! Segment builder: synthesizes the point list of an orthogonal route.
//!
//! The pipeline for one rebuild is fixed:
//!
//! 1. resolve the endpoint faces (a missing face is inferred for this build
//!    only and is not stored),
//! 2. gather hook clearance for both ends,
//! 3. look the face pair up in the route table and run that family in its
//!    canonical frame,
//! 4. map back to document space, clamp interior points into the document
//!    and drop redundant points (unless the clamp moved one).

use glam::{DVec2, dvec2};

use crate::config::RouteConfig;
use crate::defaults;
use crate::log::{debug, trace};
use crate::types::clamp_range;

use super::face::{Face, determine_face};
use super::hooks::{EndClearance, ResolvedShape, end_clearance};
use super::table::{RouteFamily, RouteShape, route_shape};
use super::{RouteAction, simplify};

/// Everything the builder needs for one rebuild
#[derive(Debug, Clone, Copy)]
pub struct RouteInput<'a> {
    pub start: DVec2,
    pub end: DVec2,
    pub first: Option<Face>,
    pub last: Option<Face>,
    pub action: RouteAction,
    /// Drag target for handle actions, ignored otherwise
    pub target: DVec2,
    pub start_shape: Option<&'a ResolvedShape>,
    pub end_shape: Option<&'a ResolvedShape>,
    /// Current route in absolute coordinates (empty when there is none)
    pub previous: &'a [DVec2],
}

impl<'a> RouteInput<'a> {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        RouteInput {
            start,
            end,
            first: None,
            last: None,
            action: RouteAction::End,
            target: end,
            start_shape: None,
            end_shape: None,
            previous: &[],
        }
    }

    pub fn faces(mut self, first: Option<Face>, last: Option<Face>) -> Self {
        self.first = first;
        self.last = last;
        self
    }

    pub fn action(mut self, action: RouteAction, target: DVec2) -> Self {
        self.action = action;
        self.target = target;
        self
    }

    pub fn shapes(
        mut self,
        start: Option<&'a ResolvedShape>,
        end: Option<&'a ResolvedShape>,
    ) -> Self {
        self.start_shape = start;
        self.end_shape = end;
        self
    }

    pub fn previous(mut self, points: &'a [DVec2]) -> Self {
        self.previous = points;
        self
    }
}

/// Result of a rebuild
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRoute {
    /// Absolute points, Start first and End last
    pub points: Vec<DVec2>,
    /// Family used, `None` for the face-less fallback
    pub family: Option<RouteFamily>,
}

/// Build the route for `input`.
pub fn build_route(cfg: &RouteConfig, input: &RouteInput<'_>) -> BuiltRoute {
    let (first, last) = match (input.first, input.last) {
        (None, None) => {
            let points = faceless_route(cfg, input);
            debug!(points = points.len(), "route rebuilt without faces");
            return BuiltRoute {
                points,
                family: None,
            };
        }
        (Some(first), Some(last)) => (first, last),
        (Some(first), None) => {
            let last = determine_face(first, input.start, input.end);
            trace!(?first, inferred = ?last, "inferred end face");
            (first, last)
        }
        (None, Some(last)) => {
            let first = determine_face(last, input.end, input.start);
            trace!(inferred = ?first, ?last, "inferred start face");
            (first, last)
        }
    };

    let stub = cfg.default_stub.0;
    let start_clear = end_clearance(input.start_shape, input.start, first, stub);
    let end_clear = end_clearance(input.end_shape, input.end, last, stub);
    let entry = route_shape(first, last);
    let canon = Canonical::new(cfg, input, entry, start_clear, end_clear);

    let local = match entry.family {
        RouteFamily::SameSide => canon.same_side(),
        RouteFamily::Opposite => canon.opposite(),
        RouteFamily::Cross => canon.cross(),
    };

    let mut points: Vec<DVec2> = local.iter().map(|p| canon.to_world(*p)).collect();
    let n = points.len();
    let mut clamped = false;
    if n > 2 {
        for p in &mut points[1..n - 1] {
            let inside = cfg.clamp_point(*p);
            clamped |= inside != *p;
            *p = inside;
        }
    }
    // A stub squashed against the document edge keeps its vertex, so the
    // family's topology survives until the line moves back inside.
    if !clamped {
        simplify(&mut points);
    }

    debug!(
        family = ?entry.family,
        ?first,
        ?last,
        action = ?input.action,
        points = points.len(),
        "route rebuilt"
    );
    BuiltRoute {
        points,
        family: Some(entry.family),
    }
}

/// Route used when neither end has a face: bend once along the dominant axis.
fn faceless_route(cfg: &RouteConfig, input: &RouteInput<'_>) -> Vec<DVec2> {
    let (s, e) = (input.start, input.end);
    let d = e - s;
    if d.x.abs() < defaults::AXIS_EPSILON && d.y.abs() < defaults::AXIS_EPSILON {
        return vec![s, e];
    }

    let min = cfg.min_segment_length.0;
    let horizontal = d.x.abs() - d.y.abs() > 0.01;
    let (run, cross) = if horizontal {
        (d.x.abs(), d.y.abs())
    } else {
        (d.y.abs(), d.x.abs())
    };
    if cross < cfg.min_segment_merge.0 || run / 2.0 < min {
        return vec![s, e];
    }

    let dragged = input.action == RouteAction::Segment1;
    if horizontal {
        let mut mid = s.x + d.x / 2.0;
        if dragged {
            mid = clamp_range(input.target.x, s.x.min(e.x) + min, s.x.max(e.x) - min);
        }
        vec![s, dvec2(mid, s.y), dvec2(mid, e.y), e]
    } else {
        let mut mid = s.y + d.y / 2.0;
        if dragged {
            mid = clamp_range(input.target.y, s.y.min(e.y) + min, s.y.max(e.y) - min);
        }
        vec![s, dvec2(s.x, mid), dvec2(e.x, mid), e]
    }
}

/// Move `v` away from `from` when it lies closer than `min`.
fn keep_apart(v: f64, from: f64, min: f64) -> f64 {
    if (v - from).abs() >= min {
        v
    } else if v >= from {
        from + min
    } else {
        from - min
    }
}

/// `v` moved `len` out through a face with sign `factor`.
fn out(v: f64, factor: f64, len: f64) -> f64 {
    v - factor * len
}

/// Whichever of `a` and `b` lies further toward `-factor`.
fn outermost(factor: f64, a: f64, b: f64) -> f64 {
    if factor > 0.0 { a.min(b) } else { a.max(b) }
}

/// One rebuild expressed in the canonical frame: X is the primary axis,
/// Y the start stub axis, and the start stub leaves toward `-f`.
struct Canonical<'c> {
    cfg: &'c RouteConfig,
    action: RouteAction,
    swap: bool,
    f: f64,
    g: f64,
    s: DVec2,
    e: DVec2,
    target: DVec2,
    start_clear: EndClearance,
    end_clear: EndClearance,
    prev_count: usize,
    lf: f64,
    ll: f64,
}

impl<'c> Canonical<'c> {
    fn new(
        cfg: &'c RouteConfig,
        input: &RouteInput<'_>,
        entry: RouteShape,
        start_clear: EndClearance,
        end_clear: EndClearance,
    ) -> Self {
        let swap = entry.swap_axes;
        let local = |p: DVec2| if swap { dvec2(p.y, p.x) } else { p };

        let prev = input.previous;
        let (mut lf, mut ll) = (start_clear.stub, end_clear.stub);
        if input.action == RouteAction::Preserve && prev.len() >= 4 {
            lf = prev[0].distance(prev[1]);
            ll = prev[prev.len() - 2].distance(prev[prev.len() - 1]);
        }

        Canonical {
            cfg,
            action: input.action,
            swap,
            f: entry.first_factor,
            g: entry.last_factor,
            s: local(input.start),
            e: local(input.end),
            target: local(input.target),
            start_clear,
            end_clear,
            prev_count: prev.len(),
            lf: cfg.clamp_length(lf),
            ll: cfg.clamp_length(ll),
        }
    }

    fn to_world(&self, p: DVec2) -> DVec2 {
        if self.swap { dvec2(p.y, p.x) } else { p }
    }

    fn min(&self) -> f64 {
        self.cfg.min_segment_length.0
    }

    fn merge(&self) -> f64 {
        self.cfg.min_segment_merge.0
    }

    fn stub(&self) -> f64 {
        self.cfg.default_stub.0
    }

    /// Whether to use the larger of a family's two topologies. Handle drags
    /// and Preserve stick to the current point count when it belongs to this
    /// family; callers still force the larger one when the smaller no longer fits.
    fn topology(&self, counts: [usize; 2], natural: bool) -> bool {
        if self.action.keeps_topology() && counts.contains(&self.prev_count) {
            self.prev_count == counts[1]
        } else {
            natural
        }
    }

    /// Keep a dragged primary coordinate clear of both endpoint axes.
    fn clear_of_ends(&self, x: f64) -> f64 {
        let x = keep_apart(x, self.s.x, self.min());
        keep_apart(x, self.e.x, self.min())
    }

    // ------------------------------------------------------------------
    // Same side (Top -> Top): U route, detour when a hooked shape is in the way
    // ------------------------------------------------------------------

    fn same_side(&self) -> Vec<DVec2> {
        let (s, e, f) = (self.s, self.e, self.f);
        let lateral = (e.x - s.x).abs();
        let start_further = f * (e.y - s.y) > 0.0;
        let near = if start_further {
            self.start_clear
        } else {
            self.end_clear
        };
        let needs_detour = near.hooked && lateral < near.half_extent + self.min();

        if lateral < self.merge() && !needs_detour {
            return vec![s, e];
        }

        let detour = self.topology([4, 6], needs_detour);
        if detour {
            if let Some(points) = self.same_side_detour(start_further, near) {
                return points;
            }
        }
        if lateral < self.merge() {
            return vec![s, e];
        }
        self.same_side_u()
    }

    fn same_side_u(&self) -> Vec<DVec2> {
        let (s, e, f) = (self.s, self.e, self.f);
        let mut u = outermost(f, out(s.y, f, self.lf), out(e.y, f, self.ll));
        if self.action == RouteAction::Segment1 {
            let limit = outermost(f, out(s.y, f, self.min()), out(e.y, f, self.min()));
            u = outermost(f, self.target.y, limit);
        }
        vec![s, dvec2(s.x, u), dvec2(e.x, u), e]
    }

    fn same_side_detour(&self, start_further: bool, near: EndClearance) -> Option<Vec<DVec2>> {
        let (s, e, f) = (self.s, self.e, self.f);
        let side = if e.x >= s.x { 1.0 } else { -1.0 };
        let clearance = near.lateral(self.stub());
        let mut u1 = out(s.y, f, self.lf);
        let mut u2 = out(e.y, f, self.ll);
        let mut x = if start_further {
            s.x + side * clearance
        } else {
            e.x - side * clearance
        };

        match self.action.segment() {
            Some(1) => u1 = outermost(f, self.target.y, out(s.y, f, self.min())),
            Some(2) => x = self.clear_of_ends(self.target.x),
            Some(3) => u2 = outermost(f, self.target.y, out(e.y, f, self.min())),
            _ => {}
        }

        if (u1 - u2).abs() < self.min() {
            return None;
        }
        Some(vec![s, dvec2(s.x, u1), dvec2(x, u1), dvec2(x, u2), dvec2(e.x, u2), e])
    }

    // ------------------------------------------------------------------
    // Opposite sides (Top -> Bottom): straight, Z, or wrap around
    // ------------------------------------------------------------------

    fn opposite(&self) -> Vec<DVec2> {
        let (s, e, f) = (self.s, self.e, self.f);
        let gap = f * (s.y - e.y);
        let flows = gap > 2.0 * self.min();
        let lateral = (e.x - s.x).abs();

        let wrap = self.topology([4, 6], !flows) || !flows;
        if !wrap {
            if lateral < self.merge() {
                return vec![s, e];
            }
            let wanted = match self.action.segment() {
                Some(1) => f * (s.y - self.target.y),
                _ => self.lf,
            };
            let len = clamp_range(wanted, self.min(), gap - self.min());
            let m = out(s.y, f, len);
            return vec![s, dvec2(s.x, m), dvec2(e.x, m), e];
        }

        let mut u1 = out(s.y, f, self.lf);
        // the end stub leaves toward +f
        let mut u2 = out(e.y, -f, self.ll);
        let side = if e.x >= s.x { 1.0 } else { -1.0 };
        let cs = self.start_clear.lateral(self.stub());
        let ce = self.end_clear.lateral(self.stub());
        let mut x = if lateral / 2.0 >= cs.max(ce) {
            (s.x + e.x) / 2.0
        } else {
            s.x + side * cs.max(lateral + ce)
        };

        match self.action.segment() {
            Some(1) => u1 = outermost(f, self.target.y, out(s.y, f, self.min())),
            Some(2) => x = self.clear_of_ends(self.target.x),
            Some(3) => u2 = outermost(-f, self.target.y, out(e.y, -f, self.min())),
            _ => {}
        }
        vec![s, dvec2(s.x, u1), dvec2(x, u1), dvec2(x, u2), dvec2(e.x, u2), e]
    }

    // ------------------------------------------------------------------
    // Cross axis (Top -> Left): L when the corner is reachable, else Z
    // ------------------------------------------------------------------

    fn cross(&self) -> Vec<DVec2> {
        let (s, e, f, g) = (self.s, self.e, self.f, self.g);
        let min = self.min();
        let corner_ok = f * (s.y - e.y) >= 2.0 * min && g * (e.x - s.x) >= 2.0 * min;

        if self.topology([3, 5], !corner_ok) || !corner_ok {
            return self.cross_z();
        }
        vec![s, dvec2(s.x, e.y), e]
    }

    fn cross_z(&self) -> Vec<DVec2> {
        let (s, e, f, g) = (self.s, self.e, self.f, self.g);
        let min = self.min();
        let mut u = out(s.y, f, self.lf);
        // the end stub leaves toward -g along the primary axis
        let mut p = out(e.x, g, self.ll);

        match self.action.segment() {
            Some(1) => u = outermost(f, self.target.y, out(s.y, f, min)),
            Some(2) => p = outermost(g, self.target.x, out(e.x, g, min)),
            _ => {}
        }
        if (p - s.x).abs() < min {
            p = out(s.x, g, min);
        }
        if (e.y - u).abs() < min {
            u = out(e.y, f, min);
        }
        vec![s, dvec2(s.x, u), dvec2(p, u), dvec2(p, e.y), e]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BBox;

    fn cfg() -> RouteConfig {
        RouteConfig::default()
    }

    fn build(start: DVec2, end: DVec2, first: Option<Face>, last: Option<Face>) -> Vec<DVec2> {
        build_route(&cfg(), &RouteInput::new(start, end).faces(first, last)).points
    }

    fn segment_lengths(points: &[DVec2]) -> Vec<f64> {
        points.windows(2).map(|w| w[0].distance(w[1])).collect()
    }

    fn assert_orthogonal(points: &[DVec2]) {
        for w in points.windows(2) {
            assert!(
                w[0].x == w[1].x || w[0].y == w[1].y,
                "segment {:?} -> {:?} is not axis aligned in {points:?}",
                w[0],
                w[1]
            );
        }
    }

    // ==================== faceless tests ====================

    #[test]
    fn faceless_bends_on_dominant_axis() {
        let pts = build(dvec2(100.0, 100.0), dvec2(300.0, 150.0), None, None);
        assert_eq!(
            pts,
            vec![
                dvec2(100.0, 100.0),
                dvec2(200.0, 100.0),
                dvec2(200.0, 150.0),
                dvec2(300.0, 150.0)
            ]
        );
    }

    #[test]
    fn faceless_vertical_when_dy_dominates() {
        let pts = build(dvec2(100.0, 100.0), dvec2(160.0, 400.0), None, None);
        assert_eq!(pts[1], dvec2(100.0, 250.0));
        assert_eq!(pts[2], dvec2(160.0, 250.0));
    }

    #[test]
    fn faceless_small_offset_is_straight() {
        let pts = build(dvec2(100.0, 100.0), dvec2(300.0, 103.0), None, None);
        assert_eq!(pts.len(), 2);
    }

    #[test]
    fn faceless_handle_drag_moves_bend() {
        let input = RouteInput::new(dvec2(100.0, 100.0), dvec2(300.0, 150.0))
            .action(RouteAction::Segment1, dvec2(120.0, 0.0));
        let pts = build_route(&cfg(), &input).points;
        assert_eq!(pts[1], dvec2(120.0, 100.0));
        // cannot be dragged past the endpoint margin
        let input = input.action(RouteAction::Segment1, dvec2(90.0, 0.0));
        let pts = build_route(&cfg(), &input).points;
        assert_eq!(pts[1].x, 104.0);
    }

    // ==================== same side tests ====================

    #[test]
    fn top_to_top_makes_u_route() {
        let pts = build(dvec2(100.0, 200.0), dvec2(300.0, 260.0), Some(Face::Top), Some(Face::Top));
        assert_eq!(
            pts,
            vec![
                dvec2(100.0, 200.0),
                dvec2(100.0, 175.0),
                dvec2(300.0, 175.0),
                dvec2(300.0, 260.0)
            ]
        );
    }

    #[test]
    fn right_to_right_is_the_rotated_u() {
        let pts = build(
            dvec2(200.0, 100.0),
            dvec2(260.0, 300.0),
            Some(Face::Right),
            Some(Face::Right),
        );
        assert_eq!(
            pts,
            vec![
                dvec2(200.0, 100.0),
                dvec2(285.0, 100.0),
                dvec2(285.0, 300.0),
                dvec2(260.0, 300.0)
            ]
        );
    }

    #[test]
    fn top_to_top_detours_around_hooked_shape() {
        let shape = ResolvedShape::new(BBox::from_points(dvec2(100.0, 100.0), dvec2(200.0, 160.0)));
        let input = RouteInput::new(dvec2(150.0, 100.0), dvec2(160.0, 300.0))
            .faces(Some(Face::Top), Some(Face::Top))
            .shapes(Some(&shape), None);
        let pts = build_route(&cfg(), &input).points;
        assert_eq!(
            pts,
            vec![
                dvec2(150.0, 100.0),
                dvec2(150.0, 75.0),
                dvec2(225.0, 75.0),
                dvec2(225.0, 275.0),
                dvec2(160.0, 275.0),
                dvec2(160.0, 300.0)
            ]
        );
        assert_orthogonal(&pts);
    }

    #[test]
    fn same_side_aligned_ends_collapse() {
        let pts = build(dvec2(100.0, 100.0), dvec2(102.0, 300.0), Some(Face::Top), Some(Face::Top));
        assert_eq!(pts.len(), 2);
    }

    // ==================== opposite tests ====================

    #[test]
    fn top_to_bottom_flowing_with_offset_is_z() {
        let pts = build(
            dvec2(100.0, 400.0),
            dvec2(200.0, 100.0),
            Some(Face::Top),
            Some(Face::Bottom),
        );
        assert_eq!(
            pts,
            vec![
                dvec2(100.0, 400.0),
                dvec2(100.0, 375.0),
                dvec2(200.0, 375.0),
                dvec2(200.0, 100.0)
            ]
        );
    }

    #[test]
    fn top_to_bottom_flowing_aligned_is_straight() {
        let pts = build(
            dvec2(100.0, 400.0),
            dvec2(100.0, 100.0),
            Some(Face::Top),
            Some(Face::Bottom),
        );
        assert_eq!(pts, vec![dvec2(100.0, 400.0), dvec2(100.0, 100.0)]);
    }

    #[test]
    fn top_to_bottom_against_flow_wraps() {
        let pts = build(
            dvec2(100.0, 100.0),
            dvec2(100.0, 400.0),
            Some(Face::Top),
            Some(Face::Bottom),
        );
        assert_eq!(
            pts,
            vec![
                dvec2(100.0, 100.0),
                dvec2(100.0, 75.0),
                dvec2(125.0, 75.0),
                dvec2(125.0, 425.0),
                dvec2(100.0, 425.0),
                dvec2(100.0, 400.0)
            ]
        );
        let lengths = segment_lengths(&pts);
        assert_eq!(lengths, vec![25.0, 25.0, 350.0, 25.0, 25.0]);
    }

    #[test]
    fn wrap_with_wide_offset_runs_through_the_middle() {
        let pts = build(
            dvec2(100.0, 100.0),
            dvec2(400.0, 300.0),
            Some(Face::Top),
            Some(Face::Bottom),
        );
        assert_eq!(pts[2], dvec2(250.0, 75.0));
        assert_eq!(pts[3], dvec2(250.0, 325.0));
    }

    #[test]
    fn z_handle_drag_is_clamped_between_ends() {
        let input = RouteInput::new(dvec2(100.0, 400.0), dvec2(200.0, 100.0))
            .faces(Some(Face::Top), Some(Face::Bottom))
            .action(RouteAction::Segment1, dvec2(150.0, 250.0));
        let pts = build_route(&cfg(), &input).points;
        assert_eq!(pts[1], dvec2(100.0, 250.0));

        let input = input.action(RouteAction::Segment1, dvec2(150.0, 50.0));
        let pts = build_route(&cfg(), &input).points;
        assert_eq!(pts[1], dvec2(100.0, 104.0));
    }

    // ==================== cross tests ====================

    #[test]
    fn top_to_left_reachable_corner_is_l() {
        let pts = build(
            dvec2(100.0, 300.0),
            dvec2(300.0, 100.0),
            Some(Face::Top),
            Some(Face::Left),
        );
        assert_eq!(pts, vec![dvec2(100.0, 300.0), dvec2(100.0, 100.0), dvec2(300.0, 100.0)]);
    }

    #[test]
    fn top_to_left_behind_start_is_z() {
        let pts = build(
            dvec2(100.0, 100.0),
            dvec2(300.0, 150.0),
            Some(Face::Top),
            Some(Face::Left),
        );
        assert_eq!(
            pts,
            vec![
                dvec2(100.0, 100.0),
                dvec2(100.0, 75.0),
                dvec2(275.0, 75.0),
                dvec2(275.0, 150.0),
                dvec2(300.0, 150.0)
            ]
        );
    }

    #[test]
    fn left_to_top_uses_swapped_axes() {
        let pts = build(
            dvec2(300.0, 100.0),
            dvec2(100.0, 300.0),
            Some(Face::Left),
            Some(Face::Top),
        );
        assert_eq!(pts, vec![dvec2(300.0, 100.0), dvec2(100.0, 100.0), dvec2(100.0, 300.0)]);
    }

    #[test]
    fn cross_z_keeps_short_runs_at_minimum() {
        // end stub would land 2 units from the start axis
        let pts = build(
            dvec2(100.0, 100.0),
            dvec2(127.0, 150.0),
            Some(Face::Top),
            Some(Face::Left),
        );
        assert_eq!(pts[2], dvec2(96.0, 75.0));
        for len in segment_lengths(&pts) {
            assert!(len >= 4.0);
        }
    }

    // ==================== inference and topology tests ====================

    #[test]
    fn missing_end_face_is_inferred() {
        // Top start, end straight above: inferred Bottom, straight connector
        let built = build_route(
            &cfg(),
            &RouteInput::new(dvec2(100.0, 400.0), dvec2(100.0, 100.0)).faces(Some(Face::Top), None),
        );
        assert_eq!(built.family, Some(RouteFamily::Opposite));
        assert_eq!(built.points.len(), 2);
    }

    #[test]
    fn missing_start_face_is_inferred_from_end() {
        // Left end face, start far to the left: the route arrives from the left
        let built = build_route(
            &cfg(),
            &RouteInput::new(dvec2(100.0, 100.0), dvec2(400.0, 130.0))
                .faces(None, Some(Face::Left)),
        );
        assert_eq!(built.family, Some(RouteFamily::Opposite));
        assert_orthogonal(&built.points);
    }

    #[test]
    fn preserve_keeps_wrap_while_valid() {
        let start = dvec2(100.0, 400.0);
        let end = dvec2(250.0, 100.0);
        // current route is a wrap although the ends now flow into each other
        let previous = [
            start,
            dvec2(100.0, 375.0),
            dvec2(175.0, 375.0),
            dvec2(175.0, 75.0),
            dvec2(250.0, 75.0),
            end,
        ];
        let input = RouteInput::new(start, end)
            .faces(Some(Face::Top), Some(Face::Bottom))
            .action(RouteAction::Preserve, end)
            .previous(&previous);
        let pts = build_route(&cfg(), &input).points;
        assert_eq!(pts.len(), 6);

        // a plain end move recomputes the natural Z
        let pts = build_route(&cfg(), &input.action(RouteAction::End, end)).points;
        assert_eq!(pts.len(), 4);
    }

    #[test]
    fn preserve_revalidates_stale_l() {
        let start = dvec2(100.0, 100.0);
        let end = dvec2(300.0, 150.0);
        // stale L from before the end moved below the start
        let previous = [start, dvec2(100.0, 50.0), dvec2(300.0, 50.0)];
        let input = RouteInput::new(start, end)
            .faces(Some(Face::Top), Some(Face::Left))
            .action(RouteAction::Preserve, end)
            .previous(&previous);
        let pts = build_route(&cfg(), &input).points;
        assert_eq!(pts.len(), 5);
    }

    #[test]
    fn interior_points_stay_inside_document() {
        let pts = build(dvec2(100.0, 10.0), dvec2(300.0, 60.0), Some(Face::Top), Some(Face::Top));
        assert!(pts.iter().all(|p| p.y >= 0.0));
        assert_eq!(pts[1], dvec2(100.0, 0.0));
    }

    #[test]
    fn unvalidated_config_never_panics() {
        let tiny = cfg().with_max_dimension(2.0);
        let (start, end) = (dvec2(100.0, 200.0), dvec2(300.0, 260.0));
        let input = RouteInput::new(start, end).faces(Some(Face::Top), Some(Face::Top));
        let built = build_route(&tiny, &input);
        assert_eq!(built.points.first(), Some(&start));
        assert_eq!(built.points.last(), Some(&end));

        let nan = cfg().with_min_segment_length(f64::NAN);
        let input = RouteInput::new(dvec2(100.0, 100.0), dvec2(300.0, 150.0))
            .action(RouteAction::Segment1, dvec2(120.0, 0.0));
        assert_eq!(build_route(&nan, &input).points.len(), 4);
        let input = input.faces(Some(Face::Top), Some(Face::Bottom));
        assert_eq!(build_route(&nan, &input).points.last(), Some(&dvec2(300.0, 150.0)));
    }

    #[test]
    fn every_face_pair_respects_minimum_segment_length() {
        let mut states: Vec<Option<Face>> = vec![None];
        states.extend(Face::ALL.iter().copied().map(Some));
        let offsets = [-300.0, -120.0, 0.0, 60.0, 250.0];
        let start = dvec2(1000.0, 1000.0);
        for &first in &states {
            for &last in &states {
                for &dx in &offsets {
                    for &dy in &offsets {
                        let end = start + dvec2(dx, dy);
                        let pts = build(start, end, first, last);
                        assert_eq!(pts.first(), Some(&start));
                        assert_eq!(pts.last(), Some(&end));
                        if pts.len() == 2 {
                            continue;
                        }
                        assert_orthogonal(&pts);
                        for len in segment_lengths(&pts) {
                            assert!(
                                len >= 4.0,
                                "{first:?}->{last:?} end {end:?}: short segment in {pts:?}"
                            );
                        }
                    }
                }
            }
        }
    }
}
