//! Free-form polyline with editable vertices.

use glam::DVec2;

use crate::config::RouteConfig;
use crate::path_data::PathData;
use crate::route::FlipAxis;
use crate::types::BBox;

use super::{LineBase, LineGeometry, mirror_relative};

#[derive(Debug, Clone, PartialEq)]
pub struct PolyLine {
    /// Vertices relative to the frame origin
    pub vertices: Vec<DVec2>,
    pub closed: bool,
}

impl PolyLine {
    pub fn new(points: &[DVec2], origin: DVec2, closed: bool) -> Self {
        PolyLine {
            vertices: points.iter().map(|p| *p - origin).collect(),
            closed,
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex(&self, index: usize, origin: DVec2) -> Option<DVec2> {
        self.vertices.get(index).map(|v| *v + origin)
    }

    /// Move one vertex to an absolute position. False when out of range.
    pub fn set_vertex(&mut self, index: usize, point: DVec2, origin: DVec2) -> bool {
        match self.vertices.get_mut(index) {
            Some(v) => {
                *v = point - origin;
                true
            }
            None => false,
        }
    }

    /// Insert an absolute point before `index`.
    pub fn insert_vertex(&mut self, index: usize, point: DVec2, origin: DVec2) {
        let index = index.min(self.vertices.len());
        self.vertices.insert(index, point - origin);
    }
}

impl LineGeometry for PolyLine {
    fn polyline(&self, base: &LineBase) -> Vec<DVec2> {
        let origin = base.frame.min;
        let mut points: Vec<DVec2> = self.vertices.iter().map(|v| *v + origin).collect();
        if self.closed && points.len() > 2 {
            points.push(points[0]);
        }
        points
    }

    fn path_data(&self, base: &LineBase, _cfg: &RouteConfig) -> PathData {
        let origin = base.frame.min;
        let points: Vec<DVec2> = self.vertices.iter().map(|v| *v + origin).collect();
        let data = PathData::polyline(&points);
        if self.closed && points.len() > 2 {
            data.z()
        } else {
            data
        }
    }

    fn flip(&mut self, frame: &BBox, axis: FlipAxis) {
        mirror_relative(&mut self.vertices, frame.size(), axis);
    }

    fn reverse(&mut self) {
        self.vertices.reverse();
    }

    fn rebase(&mut self, delta: DVec2) {
        for v in &mut self.vertices {
            *v -= delta;
        }
    }

    fn scale(&mut self, factor: DVec2) {
        for v in &mut self.vertices {
            *v *= factor;
        }
    }

    fn stored_ends(&self) -> Option<(DVec2, DVec2)> {
        Some((*self.vertices.first()?, *self.vertices.last()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn vertices_are_frame_relative() {
        let poly = PolyLine::new(&[dvec2(10.0, 10.0), dvec2(30.0, 50.0)], dvec2(10.0, 10.0), false);
        assert_eq!(poly.vertices, vec![dvec2(0.0, 0.0), dvec2(20.0, 40.0)]);
        assert_eq!(poly.vertex(1, dvec2(10.0, 10.0)), Some(dvec2(30.0, 50.0)));
        assert_eq!(poly.vertex(2, dvec2(10.0, 10.0)), None);
    }

    #[test]
    fn insert_and_set_vertex() {
        let origin = dvec2(5.0, 5.0);
        let mut poly = PolyLine::new(&[dvec2(5.0, 5.0), dvec2(105.0, 5.0)], origin, false);
        poly.insert_vertex(1, dvec2(55.0, 25.0), origin);
        assert_eq!(poly.len(), 3);
        assert_eq!(poly.vertices[1], dvec2(50.0, 20.0));
        assert!(poly.set_vertex(2, dvec2(105.0, 45.0), origin));
        assert!(!poly.set_vertex(9, dvec2(0.0, 0.0), origin));
        assert_eq!(poly.stored_ends(), Some((dvec2(0.0, 0.0), dvec2(100.0, 40.0))));
    }
}
