//! Circular arc between the endpoints, shaped by a bow.

use glam::DVec2;

use crate::arc::{ArcSolution, arc_path, sample_arc, solve_arc};
use crate::config::RouteConfig;
use crate::path_data::PathData;
use crate::route::FlipAxis;
use crate::types::BBox;

use super::{LineBase, LineGeometry};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcLine {
    /// Distance from the chord midpoint to the apex
    pub bow: f64,
    /// Bulge to the right of travel instead of the left
    pub reversed: bool,
}

impl ArcLine {
    pub fn new(bow: f64, reversed: bool) -> Self {
        ArcLine { bow, reversed }
    }

    pub fn solve(&self, base: &LineBase) -> ArcSolution {
        solve_arc(base.start, base.end, self.bow, self.reversed)
    }
}

impl LineGeometry for ArcLine {
    fn polyline(&self, base: &LineBase) -> Vec<DVec2> {
        sample_arc(base.start, base.end, &self.solve(base))
    }

    fn path_data(&self, base: &LineBase, _cfg: &RouteConfig) -> PathData {
        arc_path(base.start, base.end, &self.solve(base))
    }

    // Mirroring and reversing both swap which side of travel the apex is on.
    fn flip(&mut self, _frame: &BBox, _axis: FlipAxis) {
        self.reversed = !self.reversed;
    }

    fn reverse(&mut self) {
        self.reversed = !self.reversed;
    }
}
