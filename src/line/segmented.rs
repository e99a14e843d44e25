//! Orthogonal connector whose route is rebuilt on every edit.

use glam::DVec2;

use crate::config::RouteConfig;
use crate::context::EditContext;
use crate::log::trace;
use crate::path_data::PathData;
use crate::route::curves::{round_corners, rounded_path};
use crate::route::{Face, FlipAxis, HookSlot, RouteAction, RouteInput, SegmentRoute, build_route};
use crate::types::BBox;

use super::{LineBase, LineGeometry, mirror_relative};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentedLine {
    pub route: SegmentRoute,
}

impl SegmentedLine {
    pub fn new(first: Option<Face>, last: Option<Face>) -> Self {
        let mut route = SegmentRoute::new();
        route.first_direction = first;
        route.last_direction = last;
        SegmentedLine { route }
    }

    pub fn face(&self, slot: HookSlot) -> Option<Face> {
        match slot {
            HookSlot::Start => self.route.first_direction,
            HookSlot::End => self.route.last_direction,
        }
    }

    pub(crate) fn set_face(&mut self, slot: HookSlot, face: Option<Face>) {
        match slot {
            HookSlot::Start => self.route.first_direction = face,
            HookSlot::End => self.route.last_direction = face,
        }
    }

    /// Interior segments that can be dragged: `1..=len - 3`, at most three.
    pub fn is_draggable(&self, segment: usize) -> bool {
        segment >= 1 && segment + 3 <= self.route.point_count() && segment <= 3
    }

    /// Rebuild the route for the endpoints in `base`.
    ///
    /// Points are stored against the current frame origin; the caller
    /// refreshes the frame afterwards.
    pub(crate) fn reroute(
        &mut self,
        ctx: &EditContext<'_>,
        base: &LineBase,
        action: RouteAction,
        target: DVec2,
    ) {
        let start_shape = ctx.resolve(base.start_hook.as_ref());
        let end_shape = ctx.resolve(base.end_hook.as_ref());
        let previous = self.route.absolute_points(base.frame.min);
        let input = RouteInput::new(base.start, base.end)
            .faces(self.route.first_direction, self.route.last_direction)
            .action(action, target)
            .shapes(start_shape.as_ref(), end_shape.as_ref())
            .previous(&previous);
        let built = build_route(ctx.config, &input);
        trace!(line = %base.id, ?action, points = built.points.len(), "rerouted");
        self.route.set_points(&built.points, base.frame.min);
    }
}

impl LineGeometry for SegmentedLine {
    fn polyline(&self, base: &LineBase) -> Vec<DVec2> {
        if self.route.is_empty() {
            return vec![base.start, base.end];
        }
        self.route.absolute_points(base.frame.min)
    }

    fn render_points(&self, base: &LineBase, cfg: &RouteConfig) -> Vec<DVec2> {
        round_corners(&self.polyline(base), self.route.curve, cfg.corner_ratio)
    }

    fn path_data(&self, base: &LineBase, cfg: &RouteConfig) -> PathData {
        rounded_path(&self.polyline(base), self.route.curve, cfg.corner_ratio)
    }

    fn flip(&mut self, frame: &BBox, axis: FlipAxis) {
        let mut points: Vec<DVec2> = self.route.vertices.iter().map(|v| v.point).collect();
        mirror_relative(&mut points, frame.size(), axis);
        self.route.set_points(&points, DVec2::ZERO);
        self.route.first_direction = self.route.first_direction.map(|f| f.mirrored(axis));
        self.route.last_direction = self.route.last_direction.map(|f| f.mirrored(axis));
    }

    fn reverse(&mut self) {
        let points: Vec<DVec2> = self.route.vertices.iter().rev().map(|v| v.point).collect();
        self.route.set_points(&points, DVec2::ZERO);
        std::mem::swap(&mut self.route.first_direction, &mut self.route.last_direction);
    }

    fn rebase(&mut self, delta: DVec2) {
        self.route.rebase(delta);
    }

    fn scale(&mut self, factor: DVec2) {
        let points: Vec<DVec2> = self.route.vertices.iter().map(|v| v.point * factor).collect();
        self.route.set_points(&points, DVec2::ZERO);
    }

    fn stored_ends(&self) -> Option<(DVec2, DVec2)> {
        Some((self.route.vertices.first()?.point, self.route.vertices.last()?.point))
    }
}
