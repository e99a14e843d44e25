//! Dispatch table from an endpoint face pair to a route family.
//!
//! Every family is written once for a canonical orientation: the start face
//! is "Top" in a local frame whose primary axis is X and whose secondary
//! (stub) axis is Y. The table entry carries the sign factors and the axis
//! swap that map each concrete face pair onto that canonical case.

use super::face::Face;

/// Shape family of an orthogonal route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteFamily {
    /// Both stubs leave on the same side: U route (4 points, 6 with a detour)
    SameSide,
    /// Stubs leave on opposite sides of the same axis: straight, Z or wrap
    Opposite,
    /// Stubs leave on perpendicular axes: L (3 points) or Z (5 points)
    Cross,
}

/// One table entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteShape {
    pub family: RouteFamily,
    /// Start stub leaves toward `-first_factor` along the local secondary axis
    pub first_factor: f64,
    /// End stub leaves toward `-last_factor` along its own axis
    pub last_factor: f64,
    /// Swap X and Y to reach the canonical frame
    pub swap_axes: bool,
}

const fn shape(
    family: RouteFamily,
    first_factor: f64,
    last_factor: f64,
    swap_axes: bool,
) -> RouteShape {
    RouteShape {
        family,
        first_factor,
        last_factor,
        swap_axes,
    }
}

use RouteFamily::{Cross, Opposite, SameSide};

/// Indexed `[first.index()][last.index()]`, faces in `Face::ALL` order
/// (Top, Bottom, Left, Right).
const ROUTE_TABLE: [[RouteShape; 4]; 4] = [
    // first = Top
    [
        shape(SameSide, 1.0, 1.0, false),
        shape(Opposite, 1.0, -1.0, false),
        shape(Cross, 1.0, 1.0, false),
        shape(Cross, 1.0, -1.0, false),
    ],
    // first = Bottom
    [
        shape(Opposite, -1.0, 1.0, false),
        shape(SameSide, -1.0, -1.0, false),
        shape(Cross, -1.0, 1.0, false),
        shape(Cross, -1.0, -1.0, false),
    ],
    // first = Left
    [
        shape(Cross, 1.0, 1.0, true),
        shape(Cross, 1.0, -1.0, true),
        shape(SameSide, 1.0, 1.0, true),
        shape(Opposite, 1.0, -1.0, true),
    ],
    // first = Right
    [
        shape(Cross, -1.0, 1.0, true),
        shape(Cross, -1.0, -1.0, true),
        shape(Opposite, -1.0, 1.0, true),
        shape(SameSide, -1.0, -1.0, true),
    ],
];

/// Table lookup for a fully specified face pair.
pub fn route_shape(first: Face, last: Face) -> RouteShape {
    ROUTE_TABLE[first.index()][last.index()]
}
