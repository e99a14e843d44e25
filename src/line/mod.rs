//! Line objects: shared base data plus one closed variant per line kind.
//!
//! Kind-owned point data (routes, polyline vertices, freehand samples) is
//! stored relative to the frame origin, so translating a line only moves
//! its endpoints and frame.

pub mod arc;
pub mod edit;
pub mod freehand;
pub mod polyline;
pub mod segmented;
pub mod straight;

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use crate::config::RouteConfig;
use crate::context::EditContext;
use crate::hit::{SegmentHit, hit_test, hit_threshold};
use crate::log::debug;
use crate::path_data::PathData;
use crate::perimeter::PerimeterMapper;
use crate::route::{Face, FlipAxis, Hook, HookSlot, RouteAction, SegmentRoute};
use crate::text::{TextAlign, TextAnchor, TextOnLine, calc_text_position, text_on_line_params};
use crate::types::{Angle, BBox, HookPoint, ObjectId, StyleRecord};

pub use arc::ArcLine;
pub use edit::{AddCorner, DragSession, LineEdit};
pub use freehand::FreehandLine;
pub use polyline::PolyLine;
pub use segmented::SegmentedLine;
pub use straight::StraightLine;

/// Data every line kind shares
#[derive(Debug, Clone, PartialEq)]
pub struct LineBase {
    pub id: ObjectId,
    pub start: DVec2,
    pub end: DVec2,
    /// Tight bounds of the uncurved stroke
    pub frame: BBox,
    pub style: StyleRecord,
    pub rotation: Angle,
    pub start_hook: Option<Hook>,
    pub end_hook: Option<Hook>,
    /// Stored label position, if the label was placed explicitly
    pub text: Option<TextAnchor>,
    pub text_align: TextAlign,
}

impl LineBase {
    pub fn new(id: ObjectId, start: DVec2, end: DVec2) -> Self {
        LineBase {
            id,
            start,
            end,
            frame: BBox::from_points(start, end),
            style: StyleRecord::default(),
            rotation: Angle::ZERO,
            start_hook: None,
            end_hook: None,
            text: None,
            text_align: TextAlign::default(),
        }
    }

    pub fn endpoint(&self, slot: HookSlot) -> DVec2 {
        match slot {
            HookSlot::Start => self.start,
            HookSlot::End => self.end,
        }
    }

    pub(crate) fn set_endpoint(&mut self, slot: HookSlot, p: DVec2) {
        match slot {
            HookSlot::Start => self.start = p,
            HookSlot::End => self.end = p,
        }
    }

    pub fn hook(&self, slot: HookSlot) -> Option<&Hook> {
        match slot {
            HookSlot::Start => self.start_hook.as_ref(),
            HookSlot::End => self.end_hook.as_ref(),
        }
    }

    pub(crate) fn hook_mut(&mut self, slot: HookSlot) -> &mut Option<Hook> {
        match slot {
            HookSlot::Start => &mut self.start_hook,
            HookSlot::End => &mut self.end_hook,
        }
    }
}

/// Geometry every line kind provides
#[enum_dispatch]
pub trait LineGeometry {
    /// Absolute points of the stroke before corner rounding
    fn polyline(&self, base: &LineBase) -> Vec<DVec2>;

    /// Points handed to the renderer
    fn render_points(&self, base: &LineBase, _cfg: &RouteConfig) -> Vec<DVec2> {
        self.polyline(base)
    }

    fn path_data(&self, base: &LineBase, cfg: &RouteConfig) -> PathData {
        PathData::polyline(&self.render_points(base, cfg))
    }

    /// Mirror kind-owned data inside `frame`. The caller mirrors endpoints.
    fn flip(&mut self, _frame: &BBox, _axis: FlipAxis) {}

    /// Reverse kind-owned data. The caller swaps endpoints and hooks.
    fn reverse(&mut self) {}

    /// The frame origin moved by `delta`; shift frame-relative data back.
    fn rebase(&mut self, _delta: DVec2) {}

    /// Scale frame-relative data about the frame origin.
    fn scale(&mut self, _factor: DVec2) {}

    /// First and last stored point, frame-relative, for kinds that own points
    fn stored_ends(&self) -> Option<(DVec2, DVec2)> {
        None
    }
}

/// Closed set of line kinds
#[enum_dispatch(LineGeometry)]
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Straight(StraightLine),
    Arc(ArcLine),
    Segmented(SegmentedLine),
    Polyline(PolyLine),
    Freehand(FreehandLine),
}

/// Mirror frame-relative points inside a frame of `size`.
pub(crate) fn mirror_relative(points: &mut [DVec2], size: DVec2, axis: FlipAxis) {
    for p in points {
        match axis {
            FlipAxis::Horizontal => p.x = size.x - p.x,
            FlipAxis::Vertical => p.y = size.y - p.y,
        }
    }
}

/// Mirror an absolute point inside `frame`.
pub(crate) fn mirror_absolute(p: DVec2, frame: &BBox, axis: FlipAxis) -> DVec2 {
    match axis {
        FlipAxis::Horizontal => dvec2(frame.min.x + frame.max.x - p.x, p.y),
        FlipAxis::Vertical => dvec2(p.x, frame.min.y + frame.max.y - p.y),
    }
}

/// A line object on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub base: LineBase,
    pub kind: LineKind,
}

impl Line {
    fn with_kind(base: LineBase, kind: LineKind) -> Self {
        let mut line = Line { base, kind };
        line.update_frame();
        line
    }

    pub fn straight(id: ObjectId, start: DVec2, end: DVec2) -> Self {
        Self::with_kind(LineBase::new(id, start, end), StraightLine.into())
    }

    pub fn arc(id: ObjectId, start: DVec2, end: DVec2, bow: f64, reversed: bool) -> Self {
        if start == end {
            debug!(line = %id, "arc with coincident endpoints drawn as a point");
        }
        Self::with_kind(LineBase::new(id, start, end), ArcLine::new(bow, reversed).into())
    }

    /// Orthogonal connector between two free endpoints.
    pub fn segmented(
        ctx: &EditContext<'_>,
        id: ObjectId,
        start: DVec2,
        end: DVec2,
        first: Option<Face>,
        last: Option<Face>,
    ) -> Self {
        let base = LineBase::new(id, start, end);
        let mut seg = SegmentedLine::new(first, last);
        seg.reroute(ctx, &base, RouteAction::End, end);
        Self::with_kind(base, seg.into())
    }

    /// Open or closed polyline; `None` with fewer than two points.
    pub fn polyline(id: ObjectId, points: &[DVec2], closed: bool) -> Option<Self> {
        let (&start, &end) = (points.first()?, points.last()?);
        if points.len() < 2 {
            return None;
        }
        let base = LineBase::new(id, start, end);
        let poly = PolyLine::new(points, base.frame.min, closed);
        Some(Self::with_kind(base, poly.into()))
    }

    /// Freehand stroke; `None` with fewer than two samples.
    pub fn freehand(id: ObjectId, samples: &[DVec2]) -> Option<Self> {
        let (&start, &end) = (samples.first()?, samples.last()?);
        if samples.len() < 2 {
            return None;
        }
        let base = LineBase::new(id, start, end);
        let stroke = FreehandLine::new(samples, base.frame.min);
        Some(Self::with_kind(base, stroke.into()))
    }

    pub fn with_style(mut self, style: StyleRecord) -> Self {
        self.base.style = style;
        self
    }

    /// Corner rounding for segmented lines; other kinds ignore it.
    pub fn with_curve(mut self, curve: f64) -> Self {
        if let LineKind::Segmented(seg) = &mut self.kind {
            seg.route.curve = curve.max(0.0);
        }
        self
    }

    pub fn id(&self) -> ObjectId {
        self.base.id
    }

    pub fn start(&self) -> DVec2 {
        self.base.start
    }

    pub fn end(&self) -> DVec2 {
        self.base.end
    }

    pub fn frame(&self) -> BBox {
        self.base.frame
    }

    /// The route of a segmented line
    pub fn segment_route(&self) -> Option<&SegmentRoute> {
        match &self.kind {
            LineKind::Segmented(seg) => Some(&seg.route),
            _ => None,
        }
    }

    /// Uncurved absolute points
    pub fn points(&self) -> Vec<DVec2> {
        self.kind.polyline(&self.base)
    }

    pub fn render_points(&self, cfg: &RouteConfig) -> Vec<DVec2> {
        self.kind.render_points(&self.base, cfg)
    }

    pub fn path_data(&self, cfg: &RouteConfig) -> PathData {
        self.kind.path_data(&self.base, cfg)
    }

    /// Recompute the frame from the stroke and rebase kind-owned points.
    pub(crate) fn update_frame(&mut self) {
        let frame = BBox::enclosing(self.kind.polyline(&self.base));
        if frame.is_empty() {
            return;
        }
        let delta = frame.min - self.base.frame.min;
        self.kind.rebase(delta);
        self.base.frame = frame;
    }

    /// Re-derive the endpoints from kind-owned points.
    pub(crate) fn sync_endpoints(&mut self) {
        if let Some((first, last)) = self.kind.stored_ends() {
            self.base.start = self.base.frame.min + first;
            self.base.end = self.base.frame.min + last;
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Segment under `point`, padded by the stroke width and `extra`.
    pub fn hit_test(&self, cfg: &RouteConfig, point: DVec2, extra: f64) -> Option<SegmentHit> {
        let threshold = hit_threshold(cfg, self.base.style.thickness, extra);
        hit_test(&self.points(), point, threshold)
    }

    pub fn mapper(&self, cfg: &RouteConfig) -> PerimeterMapper {
        PerimeterMapper::new(self.base.frame, self.base.rotation, cfg.normalized_extent)
    }

    pub fn to_absolute(&self, cfg: &RouteConfig, hook: HookPoint) -> DVec2 {
        self.mapper(cfg).to_absolute(hook)
    }

    /// Normalized position of `point`, snapped onto the stroke when close.
    pub fn to_normalized(&self, cfg: &RouteConfig, point: DVec2) -> HookPoint {
        let tolerance = hit_threshold(cfg, self.base.style.thickness, 0.0);
        self.mapper(cfg).to_normalized(point, &self.points(), tolerance)
    }

    /// Point at `fraction` of the total stroke length.
    pub fn point_at(&self, fraction: f64) -> DVec2 {
        let points = self.points();
        let total: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
        if total <= 0.0 {
            return self.base.start;
        }
        let target = fraction.clamp(0.0, 1.0) * total;
        let mut walked = 0.0;
        for w in points.windows(2) {
            let len = w[0].distance(w[1]);
            if len > 0.0 && walked + len >= target {
                return w[0].lerp(w[1], (target - walked) / len);
            }
            walked += len;
        }
        self.base.end
    }

    /// Place the label at `point` and remember where it sits.
    pub fn set_text_position(&mut self, point: DVec2) {
        self.base.text = calc_text_position(&self.points(), point);
    }

    pub fn text_on_line_params(&self) -> Option<TextOnLine> {
        text_on_line_params(&self.points(), self.base.text, self.base.text_align)
    }

    /// Drawing angle of the label's segment, in `[0, 180)` so text is
    /// never upside down.
    pub fn apparent_angle(&self) -> Angle {
        let Some(params) = self.text_on_line_params() else {
            return Angle::ZERO;
        };
        let d = params.end - params.start;
        if d == DVec2::ZERO {
            return Angle::ZERO;
        }
        Angle(d.y.atan2(d.x).to_degrees().rem_euclid(180.0))
    }

    /// Face of this line a connector coming from `reference` attaches to
    /// at `point`, or `None` when `point` is not on the line.
    pub fn face_at(&self, cfg: &RouteConfig, point: DVec2, reference: DVec2) -> Option<Face> {
        let hit = self.hit_test(cfg, point, 0.0)?;
        let points = self.points();
        let d = points[hit.segment_index + 1] - points[hit.segment_index];
        let face = if d.x.abs() >= d.y.abs() {
            if reference.y < hit.snapped.y {
                Face::Top
            } else {
                Face::Bottom
            }
        } else if reference.x < hit.snapped.x {
            Face::Left
        } else {
            Face::Right
        };
        Some(face)
    }

    /// Absolute endpoint for `slot` and the bounds of the segment touching it.
    pub fn hook_point(&self, slot: HookSlot) -> (DVec2, BBox) {
        let points = self.points();
        let n = points.len();
        let segment = match (slot, n) {
            (_, 0 | 1) => BBox::from_points(self.base.start, self.base.end),
            (HookSlot::Start, _) => BBox::from_points(points[0], points[1]),
            (HookSlot::End, _) => BBox::from_points(points[n - 2], points[n - 1]),
        };
        (self.base.endpoint(slot), segment)
    }

    /// Normalized positions of the two endpoints, the targets a connector
    /// can attach to.
    pub fn target_points(&self, cfg: &RouteConfig) -> [HookPoint; 2] {
        let mapper = self.mapper(cfg);
        [
            mapper.to_normalized(self.base.start, &[], 0.0),
            mapper.to_normalized(self.base.end, &[], 0.0),
        ]
    }

    /// Absolute points for normalized targets. Targets equal to an
    /// endpoint's own target resolve to that endpoint exactly.
    pub fn perimeter_points(&self, cfg: &RouteConfig, targets: &[HookPoint]) -> Vec<DVec2> {
        let [start_target, end_target] = self.target_points(cfg);
        let mapper = self.mapper(cfg);
        targets
            .iter()
            .map(|t| {
                if *t == start_target {
                    self.base.start
                } else if *t == end_target {
                    self.base.end
                } else {
                    mapper.to_absolute(*t)
                }
            })
            .collect()
    }
}
