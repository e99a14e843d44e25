//! Hooks and the clearance they impose on orthogonal routes.
//!
//! Attached shapes are read through a [`ShapeResolver`] supplied by the
//! caller. Bounds are snapshots taken at the moment of the query.

use glam::DVec2;

use crate::types::{BBox, HookPoint, ObjectId};

use super::face::Face;

/// Which end of a line a hook (or an edit) refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookSlot {
    Start,
    End,
}

impl HookSlot {
    pub fn other(self) -> HookSlot {
        match self {
            HookSlot::Start => HookSlot::End,
            HookSlot::End => HookSlot::Start,
        }
    }
}

/// Reference from a line endpoint to another object's attachment point.
///
/// The line owns the hook; the target object is only referenced by id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hook {
    pub object_id: ObjectId,
    /// Face of the target the endpoint attaches to, if the caller knows it
    pub hook_face: Option<Face>,
    /// Attachment point in the target's normalized space
    pub connection_point: HookPoint,
}

impl Hook {
    pub fn new(object_id: ObjectId, connection_point: HookPoint) -> Self {
        Hook {
            object_id,
            hook_face: None,
            connection_point,
        }
    }

    pub fn with_face(mut self, face: Face) -> Self {
        self.hook_face = Some(face);
        self
    }
}

/// What the routing core needs to know about an attached shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedShape {
    pub frame: BBox,
    /// Face connectors attach to when the hook does not name one
    pub default_face: Option<Face>,
}

impl ResolvedShape {
    pub fn new(frame: BBox) -> Self {
        ResolvedShape {
            frame,
            default_face: None,
        }
    }

    /// Face of the frame closest to `point`.
    ///
    /// Ties resolve in `Face::ALL` order.
    pub fn nearest_face(&self, point: DVec2) -> Face {
        let f = &self.frame;
        let distances = [
            (Face::Top, (point.y - f.min.y).abs()),
            (Face::Bottom, (f.max.y - point.y).abs()),
            (Face::Left, (point.x - f.min.x).abs()),
            (Face::Right, (f.max.x - point.x).abs()),
        ];
        let mut best = distances[0];
        for candidate in &distances[1..] {
            if candidate.1 < best.1 {
                best = *candidate;
            }
        }
        best.0
    }

    /// Distance the shape extends beyond `point` in the stub direction of
    /// `face`. Zero when the point already sits on or outside that side.
    pub fn depth_beyond(&self, point: DVec2, face: Face) -> f64 {
        let f = &self.frame;
        let depth = match face {
            Face::Top => point.y - f.min.y,
            Face::Bottom => f.max.y - point.y,
            Face::Left => point.x - f.min.x,
            Face::Right => f.max.x - point.x,
        };
        depth.max(0.0)
    }

    /// Half the shape's size across the stub axis of `face`.
    pub fn lateral_half_extent(&self, face: Face) -> f64 {
        if face.is_horizontal() {
            self.frame.height() / 2.0
        } else {
            self.frame.width() / 2.0
        }
    }
}

/// Read-only view of the document's shapes.
///
/// Passed into the operations that need neighbour geometry instead of being
/// looked up globally.
pub trait ShapeResolver {
    fn resolve(&self, id: ObjectId) -> Option<ResolvedShape>;
}

/// Resolver for documents without shapes (or tests that do not need any).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShapes;

impl ShapeResolver for NoShapes {
    fn resolve(&self, _id: ObjectId) -> Option<ResolvedShape> {
        None
    }
}

impl<F> ShapeResolver for F
where
    F: Fn(ObjectId) -> Option<ResolvedShape>,
{
    fn resolve(&self, id: ObjectId) -> Option<ResolvedShape> {
        self(id)
    }
}

/// Per-end clearance requirements gathered before a route is built.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EndClearance {
    /// Minimum length of the stub leaving this end
    pub stub: f64,
    /// Half the attached shape's size across the stub axis (0 when free)
    pub half_extent: f64,
    /// Whether a shape is attached at all
    pub hooked: bool,
}

impl EndClearance {
    /// Clearance for an end with nothing attached.
    pub fn free(default_stub: f64) -> Self {
        EndClearance {
            stub: default_stub,
            half_extent: 0.0,
            hooked: false,
        }
    }

    /// Lateral distance a detour has to keep from this end's axis.
    pub fn lateral(&self, default_stub: f64) -> f64 {
        self.half_extent + default_stub
    }
}

/// Clearance for one end.
///
/// Without a hook the stub is the default stub. With a hook, the stub grows
/// (never shrinks) to the shape's depth beyond the endpoint plus the default
/// stub, so the first bend lands outside the shape.
pub fn end_clearance(
    shape: Option<&ResolvedShape>,
    point: DVec2,
    face: Face,
    default_stub: f64,
) -> EndClearance {
    match shape {
        None => EndClearance::free(default_stub),
        Some(shape) => EndClearance {
            stub: default_stub.max(shape.depth_beyond(point, face) + default_stub),
            half_extent: shape.lateral_half_extent(face),
            hooked: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    fn box_shape() -> ResolvedShape {
        ResolvedShape::new(BBox::from_points(dvec2(100.0, 100.0), dvec2(200.0, 160.0)))
    }

    #[test]
    fn nearest_face_picks_closest_side() {
        let shape = box_shape();
        assert_eq!(shape.nearest_face(dvec2(150.0, 101.0)), Face::Top);
        assert_eq!(shape.nearest_face(dvec2(150.0, 158.0)), Face::Bottom);
        assert_eq!(shape.nearest_face(dvec2(103.0, 130.0)), Face::Left);
        assert_eq!(shape.nearest_face(dvec2(199.0, 130.0)), Face::Right);
    }

    #[test]
    fn clearance_without_hook_is_default_stub() {
        let c = end_clearance(None, dvec2(0.0, 0.0), Face::Top, 25.0);
        assert_eq!(
            c,
            EndClearance {
                stub: 25.0,
                half_extent: 0.0,
                hooked: false
            }
        );
        assert_eq!(c.lateral(25.0), 25.0);
    }

    #[test]
    fn clearance_on_perimeter_keeps_default_stub() {
        let shape = box_shape();
        let c = end_clearance(Some(&shape), dvec2(150.0, 100.0), Face::Top, 25.0);
        assert_eq!(c.stub, 25.0);
        assert_eq!(c.lateral(25.0), 75.0);
        assert!(c.hooked);
    }

    #[test]
    fn clearance_from_center_adds_half_extent() {
        let shape = box_shape();
        let c = end_clearance(Some(&shape), shape.frame.center(), Face::Top, 25.0);
        assert_eq!(c.stub, 30.0 + 25.0);
        let c = end_clearance(Some(&shape), shape.frame.center(), Face::Right, 25.0);
        assert_eq!(c.stub, 50.0 + 25.0);
        assert_eq!(c.half_extent, 30.0);
    }

    #[test]
    fn closures_are_resolvers() {
        let shape = box_shape();
        let resolver = move |id: ObjectId| (id == ObjectId(7)).then_some(shape);
        assert_eq!(resolver.resolve(ObjectId(7)), Some(shape));
        assert_eq!(resolver.resolve(ObjectId(8)), None);
        assert_eq!(NoShapes.resolve(ObjectId(7)), None);
    }
}
