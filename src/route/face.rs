//! Endpoint faces and the rule table that infers a missing one.

use glam::{DVec2, dvec2};

/// Side of a line endpoint (or of the shape it touches) used for routing.
///
/// The stub of an orthogonal route leaves an endpoint *through* its face:
/// a `Top` endpoint leaves toward smaller Y, a `Left` endpoint toward
/// smaller X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Top,
    Bottom,
    Left,
    Right,
}

/// Mirror axis for flips.
///
/// `Horizontal` mirrors left to right (X changes), `Vertical` mirrors top to
/// bottom (Y changes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

impl Face {
    pub const ALL: [Face; 4] = [Face::Top, Face::Bottom, Face::Left, Face::Right];

    /// Position in [`Face::ALL`], used to index the route table.
    pub fn index(self) -> usize {
        match self {
            Face::Top => 0,
            Face::Bottom => 1,
            Face::Left => 2,
            Face::Right => 3,
        }
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::Top => Face::Bottom,
            Face::Bottom => Face::Top,
            Face::Left => Face::Right,
            Face::Right => Face::Left,
        }
    }

    /// True for faces whose stub runs along the X axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Face::Left | Face::Right)
    }

    /// Unit vector of the stub leaving through this face.
    pub fn outward(self) -> DVec2 {
        match self {
            Face::Top => dvec2(0.0, -1.0),
            Face::Bottom => dvec2(0.0, 1.0),
            Face::Left => dvec2(-1.0, 0.0),
            Face::Right => dvec2(1.0, 0.0),
        }
    }

    /// Face after mirroring about `axis`.
    pub fn mirrored(self, axis: FlipAxis) -> Face {
        match (axis, self) {
            (FlipAxis::Vertical, Face::Top | Face::Bottom) => self.opposite(),
            (FlipAxis::Horizontal, Face::Left | Face::Right) => self.opposite(),
            _ => self,
        }
    }
}

/// Infer the face at `other` given the known face at `base`.
///
/// `current` is the face the route leaves `base` through. When `other` lies
/// behind that face the route can run straight into it (opposite face) if
/// the along-axis distance dominates, or bend into the nearer side face
/// otherwise. When `other` lies on the far side the route has to U-turn, so
/// the inferred face equals `current`.
pub fn determine_face(current: Face, base: DVec2, other: DVec2) -> Face {
    let dx = (other.x - base.x).abs();
    let dy = (other.y - base.y).abs();
    match current {
        Face::Top => {
            if other.y < base.y {
                if dy >= dx {
                    Face::Bottom
                } else if other.x < base.x {
                    Face::Right
                } else {
                    Face::Left
                }
            } else {
                Face::Top
            }
        }
        Face::Bottom => {
            if other.y > base.y {
                if dy >= dx {
                    Face::Top
                } else if other.x < base.x {
                    Face::Right
                } else {
                    Face::Left
                }
            } else {
                Face::Bottom
            }
        }
        Face::Left => {
            if other.x < base.x {
                if dx >= dy {
                    Face::Right
                } else if other.y < base.y {
                    Face::Bottom
                } else {
                    Face::Top
                }
            } else {
                Face::Left
            }
        }
        Face::Right => {
            if other.x > base.x {
                if dx >= dy {
                    Face::Left
                } else if other.y < base.y {
                    Face::Bottom
                } else {
                    Face::Top
                }
            } else {
                Face::Right
            }
        }
    }
}
