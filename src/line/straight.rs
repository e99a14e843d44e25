//! Straight connector: the chord between its endpoints.

use glam::DVec2;

use super::{LineBase, LineGeometry};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StraightLine;

impl LineGeometry for StraightLine {
    fn polyline(&self, base: &LineBase) -> Vec<DVec2> {
        vec![base.start, base.end]
    }
}
