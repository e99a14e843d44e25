//! Orthogonal routing: faces, the family table, the segment builder,
//! hook clearance and corner rounding.

pub mod builder;
pub mod curves;
pub mod face;
pub mod hooks;
pub mod table;

use glam::DVec2;

use crate::types::BBox;

pub use builder::{BuiltRoute, RouteInput, build_route};
pub use face::{Face, FlipAxis, determine_face};
pub use hooks::{EndClearance, Hook, HookSlot, NoShapes, ResolvedShape, ShapeResolver};
pub use table::{RouteFamily, RouteShape, route_shape};

/// What triggered a route rebuild
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAction {
    /// Start endpoint moved
    Start,
    /// End endpoint moved
    End,
    /// Interior segment 1 dragged
    Segment1,
    /// Interior segment 2 dragged
    Segment2,
    /// Interior segment 3 dragged
    Segment3,
    /// Re-solve keeping the current topology where still valid
    Preserve,
}

impl RouteAction {
    /// Index of the dragged segment, for handle actions.
    pub fn segment(self) -> Option<usize> {
        match self {
            RouteAction::Segment1 => Some(1),
            RouteAction::Segment2 => Some(2),
            RouteAction::Segment3 => Some(3),
            _ => None,
        }
    }

    /// Handle drags and Preserve keep the current point count when it still fits.
    pub fn keeps_topology(self) -> bool {
        matches!(
            self,
            RouteAction::Segment1
                | RouteAction::Segment2
                | RouteAction::Segment3
                | RouteAction::Preserve
        )
    }

    /// Handle action for a 1-based segment index.
    pub fn for_segment(index: usize) -> Option<RouteAction> {
        match index {
            1 => Some(RouteAction::Segment1),
            2 => Some(RouteAction::Segment2),
            3 => Some(RouteAction::Segment3),
            _ => None,
        }
    }
}

/// One point of a route with the length of the segment arriving at it.
///
/// The first vertex has an `incoming_length` of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteVertex {
    /// Position relative to the owning line's frame origin
    pub point: DVec2,
    pub incoming_length: f64,
}

/// Ordered points of an orthogonal line plus its endpoint faces.
///
/// Points are stored relative to the frame origin so that translating the
/// line never touches them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentRoute {
    pub vertices: Vec<RouteVertex>,
    pub first_direction: Option<Face>,
    pub last_direction: Option<Face>,
    /// Corner rounding radius; 0 keeps sharp corners
    pub curve: f64,
}

impl SegmentRoute {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the vertices from absolute points, rebased on `origin`.
    pub fn set_points(&mut self, points: &[DVec2], origin: DVec2) {
        self.vertices.clear();
        let mut prev: Option<DVec2> = None;
        for &p in points {
            let incoming_length = prev.map_or(0.0, |q| p.distance(q));
            self.vertices.push(RouteVertex {
                point: p - origin,
                incoming_length,
            });
            prev = Some(p);
        }
    }

    /// Absolute positions given the current frame origin.
    pub fn absolute_points(&self, origin: DVec2) -> Vec<DVec2> {
        self.vertices.iter().map(|v| v.point + origin).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.vertices.len()
    }

    /// Segment lengths in route order
    pub fn lengths(&self) -> impl Iterator<Item = f64> + '_ {
        self.vertices.iter().skip(1).map(|v| v.incoming_length)
    }

    pub fn total_length(&self) -> f64 {
        self.lengths().sum()
    }

    /// Length of the first segment, if any
    pub fn first_stub(&self) -> Option<f64> {
        self.vertices.get(1).map(|v| v.incoming_length)
    }

    /// Length of the last segment, if any
    pub fn last_stub(&self) -> Option<f64> {
        if self.vertices.len() < 2 {
            return None;
        }
        self.vertices.last().map(|v| v.incoming_length)
    }

    /// Bounds of the stored points, relative to the frame origin.
    pub fn local_bounds(&self) -> BBox {
        BBox::enclosing(self.vertices.iter().map(|v| v.point))
    }

    /// Shift every stored point (used when the frame origin moves).
    pub fn rebase(&mut self, delta: DVec2) {
        for v in &mut self.vertices {
            v.point -= delta;
        }
    }
}

/// Drop repeated points and interior points that sit between two collinear
/// neighbours. U-turns (a point that doubles back) are kept.
pub fn simplify(points: &mut Vec<DVec2>) {
    points.dedup_by(|a, b| a.distance_squared(*b) < 1e-12);
    let mut i = 1;
    while i + 1 < points.len() {
        let (a, p, b) = (points[i - 1], points[i], points[i + 1]);
        let cross = (p - a).perp_dot(b - p);
        let forward = (p - a).dot(b - p) > 0.0;
        if cross.abs() < 1e-9 && forward {
            points.remove(i);
        } else {
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn vertices_track_incoming_lengths() {
        let mut route = SegmentRoute::new();
        let origin = dvec2(10.0, 10.0);
        route.set_points(
            &[dvec2(10.0, 40.0), dvec2(10.0, 10.0), dvec2(50.0, 10.0)],
            origin,
        );
        assert_eq!(route.point_count(), 3);
        assert_eq!(route.vertices[0].incoming_length, 0.0);
        assert_eq!(route.lengths().collect::<Vec<_>>(), vec![30.0, 40.0]);
        assert_eq!(route.vertices[1].point, dvec2(0.0, 0.0));
        assert_eq!(route.first_stub(), Some(30.0));
        assert_eq!(route.last_stub(), Some(40.0));
        assert_eq!(route.absolute_points(origin)[2], dvec2(50.0, 10.0));
    }

    #[test]
    fn empty_route_has_no_stubs() {
        let route = SegmentRoute::new();
        assert!(route.is_empty());
        assert_eq!(route.first_stub(), None);
        assert_eq!(route.last_stub(), None);
        assert_eq!(route.total_length(), 0.0);
    }

    #[test]
    fn simplify_merges_straight_runs_but_keeps_u_turns() {
        let mut pts = vec![
            dvec2(0.0, 0.0),
            dvec2(0.0, 0.0),
            dvec2(0.0, 10.0),
            dvec2(0.0, 20.0),
            dvec2(10.0, 20.0),
        ];
        simplify(&mut pts);
        assert_eq!(pts, vec![dvec2(0.0, 0.0), dvec2(0.0, 20.0), dvec2(10.0, 20.0)]);

        let mut u_turn = vec![dvec2(0.0, 0.0), dvec2(0.0, -10.0), dvec2(0.0, 5.0)];
        simplify(&mut u_turn);
        assert_eq!(u_turn.len(), 3);
    }

    #[test]
    fn handle_actions_map_to_segments() {
        assert_eq!(RouteAction::Segment2.segment(), Some(2));
        assert_eq!(RouteAction::for_segment(3), Some(RouteAction::Segment3));
        assert_eq!(RouteAction::for_segment(4), None);
        assert!(RouteAction::Preserve.keeps_topology());
        assert!(!RouteAction::End.keeps_topology());
    }
}
