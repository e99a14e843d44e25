//! Freehand stroke: a sampled pointer trail.

use glam::DVec2;

use crate::route::FlipAxis;
use crate::types::BBox;

use super::{LineBase, LineGeometry, mirror_relative};

#[derive(Debug, Clone, PartialEq)]
pub struct FreehandLine {
    /// Samples relative to the frame origin
    pub samples: Vec<DVec2>,
}

impl FreehandLine {
    pub fn new(samples: &[DVec2], origin: DVec2) -> Self {
        FreehandLine {
            samples: samples.iter().map(|p| *p - origin).collect(),
        }
    }
}

impl LineGeometry for FreehandLine {
    fn polyline(&self, base: &LineBase) -> Vec<DVec2> {
        self.samples.iter().map(|s| *s + base.frame.min).collect()
    }

    fn flip(&mut self, frame: &BBox, axis: FlipAxis) {
        mirror_relative(&mut self.samples, frame.size(), axis);
    }

    fn reverse(&mut self) {
        self.samples.reverse();
    }

    fn rebase(&mut self, delta: DVec2) {
        for s in &mut self.samples {
            *s -= delta;
        }
    }

    fn scale(&mut self, factor: DVec2) {
        for s in &mut self.samples {
            *s *= factor;
        }
    }

    fn stored_ends(&self) -> Option<(DVec2, DVec2)> {
        Some((*self.samples.first()?, *self.samples.last()?))
    }
}
