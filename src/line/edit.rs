//! Line edits.
//!
//! Every mutating operation returns a [`LineEdit`] holding the line before
//! and after the change, which the caller records for undo and uses to find
//! hooked neighbours that need to follow.

use glam::{DVec2, dvec2};

use crate::arc::bow_through;
use crate::config::RouteConfig;
use crate::context::EditContext;
use crate::errors::RouteError;
use crate::hit::closest_point_on_segment;
use crate::log::{debug, warn};
use crate::perimeter::PerimeterMapper;
use crate::route::{FlipAxis, Hook, HookSlot, RouteAction};
use crate::types::{Angle, Length, ObjectId};

use super::{Line, LineGeometry, LineKind, mirror_absolute};

/// Before and after snapshots of one edit
#[derive(Debug, Clone, PartialEq)]
pub struct LineEdit {
    pub before: Line,
    pub after: Line,
}

impl LineEdit {
    pub fn new(before: Line, after: Line) -> Self {
        LineEdit { before, after }
    }

    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }

    /// Endpoints whose position changed
    pub fn moved_endpoints(&self) -> Vec<HookSlot> {
        [HookSlot::Start, HookSlot::End]
            .into_iter()
            .filter(|&slot| self.before.base.endpoint(slot) != self.after.base.endpoint(slot))
            .collect()
    }

    pub fn hooks_changed(&self) -> bool {
        self.before.base.start_hook != self.after.base.start_hook
            || self.before.base.end_hook != self.after.base.end_hook
    }
}

/// Result of [`Line::add_corner`]
#[derive(Debug, Clone, PartialEq)]
pub enum AddCorner {
    /// A straight line was cut in two; `second` is the new line, hooked to
    /// the end of the edited one.
    Split { edit: LineEdit, second: Line },
    /// A vertex was inserted into a polyline.
    Inserted(LineEdit),
}

/// Snapshot taken when an interactive drag begins.
///
/// Intermediate drag steps edit the line directly; the session folds them
/// into a single edit on release or restores the snapshot on cancel.
#[derive(Debug, Clone)]
pub struct DragSession {
    snapshot: Line,
}

impl DragSession {
    pub fn begin(line: &Line) -> Self {
        DragSession {
            snapshot: line.clone(),
        }
    }

    pub fn original(&self) -> &Line {
        &self.snapshot
    }

    pub fn cancel(self, line: &mut Line) {
        *line = self.snapshot;
    }

    pub fn finish(self, line: &Line) -> LineEdit {
        LineEdit::new(self.snapshot, line.clone())
    }
}

/// Clamp a requested point into the document. With `no_auto` set, any
/// correction is an error instead.
fn checked_point(cfg: &RouteConfig, requested: DVec2) -> Result<DVec2, RouteError> {
    let solved = cfg.clamp_point(requested);
    if solved != requested && cfg.no_auto {
        warn!(?requested, ?solved, "point outside the document with no_auto set");
        return Err(RouteError::BoundsViolation { requested, solved });
    }
    Ok(solved)
}

fn route_action(slot: HookSlot) -> RouteAction {
    match slot {
        HookSlot::Start => RouteAction::Start,
        HookSlot::End => RouteAction::End,
    }
}

impl Line {
    /// Put one endpoint at `point` and let the kind follow.
    fn place_endpoint(&mut self, ctx: &EditContext<'_>, slot: HookSlot, point: DVec2, snap: bool) {
        let cfg = ctx.config;
        match &mut self.kind {
            LineKind::Straight(_) => {
                let anchor = self.base.endpoint(slot.other());
                let p = if snap {
                    cfg.snap_to_axis(anchor, point).unwrap_or(point)
                } else {
                    point
                };
                self.base.set_endpoint(slot, p);
            }
            LineKind::Arc(_) => self.base.set_endpoint(slot, point),
            LineKind::Segmented(seg) => {
                self.base.set_endpoint(slot, point);
                seg.reroute(ctx, &self.base, route_action(slot), point);
            }
            LineKind::Polyline(poly) => {
                let origin = self.base.frame.min;
                let last = poly.len().saturating_sub(1);
                let (index, neighbor) = match slot {
                    HookSlot::Start => (0, 1.min(last)),
                    HookSlot::End => (last, last.saturating_sub(1)),
                };
                let p = match poly.vertex(neighbor, origin) {
                    Some(anchor) if snap && neighbor != index => {
                        cfg.snap_to_axis(anchor, point).unwrap_or(point)
                    }
                    _ => point,
                };
                poly.set_vertex(index, p, origin);
                self.base.set_endpoint(slot, p);
            }
            LineKind::Freehand(stroke) => {
                let origin = self.base.frame.min;
                let index = match slot {
                    HookSlot::Start => 0,
                    HookSlot::End => stroke.samples.len().saturating_sub(1),
                };
                if let Some(sample) = stroke.samples.get_mut(index) {
                    *sample = point - origin;
                }
                self.base.set_endpoint(slot, point);
            }
        }
        self.update_frame();
    }

    /// Move an endpoint to `point`.
    ///
    /// The point is clamped into the document and, for straight lines and
    /// polylines, snapped onto an axis when nearly aligned. Segmented lines
    /// keep both stored faces; an unset face is inferred for this rebuild only.
    pub fn move_endpoint(
        &mut self,
        ctx: &EditContext<'_>,
        slot: HookSlot,
        point: DVec2,
    ) -> Result<LineEdit, RouteError> {
        let point = checked_point(ctx.config, point)?;
        let before = self.clone();
        self.place_endpoint(ctx, slot, point, true);
        debug!(line = %self.base.id, ?slot, x = point.x, y = point.y, "endpoint moved");
        Ok(LineEdit::new(before, self.clone()))
    }

    /// Drag an interior handle.
    ///
    /// Segmented lines take segment indices `1..=3` (when the route has
    /// that segment), arcs take any index and move their apex, polylines
    /// take a vertex index. Anything else is ignored and yields a no-op edit.
    pub fn drag_handle(
        &mut self,
        ctx: &EditContext<'_>,
        handle: usize,
        point: DVec2,
    ) -> Result<LineEdit, RouteError> {
        let point = checked_point(ctx.config, point)?;
        let before = self.clone();

        let endpoint = match &self.kind {
            LineKind::Polyline(_) if handle == 0 => Some(HookSlot::Start),
            LineKind::Polyline(poly) if handle + 1 == poly.len() => Some(HookSlot::End),
            _ => None,
        };
        if let Some(slot) = endpoint {
            self.place_endpoint(ctx, slot, point, true);
            return Ok(LineEdit::new(before, self.clone()));
        }

        match &mut self.kind {
            LineKind::Segmented(seg) => {
                match RouteAction::for_segment(handle).filter(|_| seg.is_draggable(handle)) {
                    Some(action) => seg.reroute(ctx, &self.base, action, point),
                    None => {
                        debug!(line = %self.base.id, handle, "segment handle ignored");
                    }
                }
            }
            LineKind::Arc(arc) => {
                (arc.bow, arc.reversed) = bow_through(self.base.start, self.base.end, point);
            }
            LineKind::Polyline(poly) => {
                let origin = self.base.frame.min;
                let p = poly
                    .vertex(handle.saturating_sub(1), origin)
                    .and_then(|anchor| ctx.config.snap_to_axis(anchor, point))
                    .unwrap_or(point);
                if !poly.set_vertex(handle, p, origin) {
                    debug!(line = %self.base.id, handle, "vertex handle ignored");
                }
            }
            LineKind::Straight(_) | LineKind::Freehand(_) => {
                debug!(line = %self.base.id, handle, "line has no interior handles");
            }
        }
        self.update_frame();
        Ok(LineEdit::new(before, self.clone()))
    }

    /// Attach an endpoint to another object.
    ///
    /// The endpoint moves onto the hook's connection point when the target
    /// resolves. Segmented lines take the hook's face, else the target's
    /// default face, else the face nearest the connection point.
    pub fn connect(
        &mut self,
        ctx: &EditContext<'_>,
        slot: HookSlot,
        hook: Hook,
    ) -> Result<LineEdit, RouteError> {
        let shape = ctx.shapes.resolve(hook.object_id);
        let point = match shape {
            Some(shape) => {
                PerimeterMapper::new(shape.frame, Angle::ZERO, ctx.config.normalized_extent)
                    .to_absolute(hook.connection_point)
            }
            None => self.base.endpoint(slot),
        };
        let point = checked_point(ctx.config, point)?;
        let before = self.clone();

        *self.base.hook_mut(slot) = Some(hook);
        if let LineKind::Segmented(seg) = &mut self.kind {
            let face = hook
                .hook_face
                .or_else(|| shape.and_then(|s| s.default_face))
                .or_else(|| shape.map(|s| s.nearest_face(point)))
                .or(seg.face(slot));
            seg.set_face(slot, face);
        }
        self.place_endpoint(ctx, slot, point, false);
        debug!(line = %self.base.id, ?slot, target = %hook.object_id, "connected");
        Ok(LineEdit::new(before, self.clone()))
    }

    /// Detach an endpoint. The endpoint stays where it is.
    pub fn disconnect(&mut self, ctx: &EditContext<'_>, slot: HookSlot) -> LineEdit {
        let before = self.clone();
        if self.base.hook_mut(slot).take().is_none() {
            return LineEdit::new(before, self.clone());
        }
        if let LineKind::Segmented(seg) = &mut self.kind {
            seg.set_face(slot, None);
        }
        let point = self.base.endpoint(slot);
        self.place_endpoint(ctx, slot, point, false);
        LineEdit::new(before, self.clone())
    }

    /// Follow a hooked target that moved: the endpoint goes to `point`
    /// keeping its hook and face.
    pub fn link_grow(
        &mut self,
        ctx: &EditContext<'_>,
        slot: HookSlot,
        point: DVec2,
    ) -> Result<LineEdit, RouteError> {
        let point = checked_point(ctx.config, point)?;
        let before = self.clone();
        self.place_endpoint(ctx, slot, point, false);
        Ok(LineEdit::new(before, self.clone()))
    }

    /// Translate the whole line. Frame-relative data is untouched.
    pub fn offset(&mut self, dx: f64, dy: f64) -> LineEdit {
        let before = self.clone();
        let delta = dvec2(dx, dy);
        self.base.start += delta;
        self.base.end += delta;
        self.base.frame = self.base.frame.translate(delta);
        LineEdit::new(before, self.clone())
    }

    /// Scale about the frame origin. Segmented lines re-solve keeping
    /// their current topology where it still fits.
    pub fn scale(
        &mut self,
        ctx: &EditContext<'_>,
        sx: f64,
        sy: f64,
    ) -> Result<LineEdit, RouteError> {
        let positive = |v: f64| {
            Length::try_positive(v).map_err(|source| RouteError::InvalidScale { source })
        };
        let factor = dvec2(positive(sx)?.0, positive(sy)?.0);
        let before = self.clone();
        let origin = self.base.frame.min;
        let scaled = |p: DVec2| origin + (p - origin) * factor;

        let apex = match &self.kind {
            LineKind::Arc(arc) => Some(scaled(arc.solve(&self.base).action_point)),
            _ => None,
        };
        self.base.start = scaled(self.base.start);
        self.base.end = scaled(self.base.end);
        self.kind.scale(factor);

        match &mut self.kind {
            LineKind::Arc(arc) => {
                if let Some(apex) = apex {
                    (arc.bow, arc.reversed) = bow_through(self.base.start, self.base.end, apex);
                }
            }
            LineKind::Segmented(seg) => {
                seg.reroute(ctx, &self.base, RouteAction::Preserve, self.base.end);
            }
            _ => {}
        }
        self.update_frame();
        Ok(LineEdit::new(before, self.clone()))
    }

    /// Mirror the line inside its frame. Flipping twice restores it.
    pub fn flip(&mut self, axis: FlipAxis) -> LineEdit {
        let before = self.clone();
        let frame = self.base.frame;
        self.base.start = mirror_absolute(self.base.start, &frame, axis);
        self.base.end = mirror_absolute(self.base.end, &frame, axis);
        self.kind.flip(&frame, axis);
        self.sync_endpoints();
        LineEdit::new(before, self.clone())
    }

    /// Swap the direction of travel, carrying hooks and the label along.
    pub fn reverse(&mut self) -> LineEdit {
        let before = self.clone();
        std::mem::swap(&mut self.base.start, &mut self.base.end);
        std::mem::swap(&mut self.base.start_hook, &mut self.base.end_hook);
        self.kind.reverse();
        if let Some(text) = &mut self.base.text {
            text.fraction = 1.0 - text.fraction;
            text.offset = -text.offset;
        }
        self.sync_endpoints();
        LineEdit::new(before, self.clone())
    }

    /// Add a corner at `point`.
    ///
    /// A straight line within `max(thickness, 1)` of `point` is split into
    /// two lines meeting there; the new line gets `new_id`. A polyline under
    /// the point gains a vertex. Other kinds, and misses, return `None`.
    pub fn add_corner(
        &mut self,
        cfg: &RouteConfig,
        point: DVec2,
        new_id: ObjectId,
    ) -> Option<AddCorner> {
        match self.kind {
            LineKind::Straight(_) => self.split_at(cfg, point, new_id),
            LineKind::Polyline(_) => self.insert_corner(cfg, point),
            _ => None,
        }
    }

    fn split_at(&mut self, cfg: &RouteConfig, point: DVec2, new_id: ObjectId) -> Option<AddCorner> {
        let (a, b) = (self.base.start, self.base.end);
        let p = closest_point_on_segment(a, b, point);
        let tolerance = self.base.style.thickness.max(1.0);
        if p.distance(point) > tolerance || p == a || p == b {
            return None;
        }

        let before = self.clone();
        let end_hook = self.base.end_hook.take();
        self.base.end = p;
        self.update_frame();

        let mut second = Line::straight(new_id, p, b).with_style(self.base.style.clone());
        second.base.end_hook = end_hook;
        let [_, joint] = self.target_points(cfg);
        second.base.start_hook = Some(Hook::new(self.base.id, joint));
        debug!(line = %self.base.id, new = %new_id, x = p.x, y = p.y, "line split");
        Some(AddCorner::Split {
            edit: LineEdit::new(before, self.clone()),
            second,
        })
    }

    fn insert_corner(&mut self, cfg: &RouteConfig, point: DVec2) -> Option<AddCorner> {
        let hit = self.hit_test(cfg, point, 0.0)?;
        let before = self.clone();
        let origin = self.base.frame.min;
        if let LineKind::Polyline(poly) = &mut self.kind {
            poly.insert_vertex(hit.segment_index + 1, hit.snapped, origin);
        }
        self.update_frame();
        self.sync_endpoints();
        Some(AddCorner::Inserted(LineEdit::new(before, self.clone())))
    }
}
