//! Shared helpers for integration tests.
//!
//! Run with `RUST_LOG=hvac_route=trace cargo test --features tracing -- --nocapture`
//! to see routing decisions.

#![allow(dead_code)]

use glam::{DVec2, dvec2};
use hvac_route::{BBox, ObjectId, ResolvedShape};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Shapes keyed by id, resolvable by lines.
#[derive(Debug, Clone, Default)]
pub struct Board {
    shapes: Vec<(ObjectId, BBox)>,
}

impl Board {
    pub fn with(mut self, id: u32, min: DVec2, max: DVec2) -> Self {
        self.shapes.push((ObjectId(id), BBox::from_points(min, max)));
        self
    }

    pub fn move_shape(&mut self, id: u32, delta: DVec2) {
        for (shape_id, frame) in &mut self.shapes {
            if *shape_id == ObjectId(id) {
                *frame = frame.translate(delta);
            }
        }
    }
}

impl hvac_route::ShapeResolver for Board {
    fn resolve(&self, id: ObjectId) -> Option<ResolvedShape> {
        self.shapes
            .iter()
            .find(|(shape_id, _)| *shape_id == id)
            .map(|(_, frame)| ResolvedShape::new(*frame))
    }
}

/// Every segment is horizontal or vertical.
pub fn is_orthogonal(points: &[DVec2]) -> bool {
    points.windows(2).all(|w| w[0].x == w[1].x || w[0].y == w[1].y)
}

pub fn offsets() -> Vec<DVec2> {
    vec![
        dvec2(-300.0, -200.0),
        dvec2(300.0, -200.0),
        dvec2(-300.0, 200.0),
        dvec2(300.0, 200.0),
        dvec2(0.0, 300.0),
        dvec2(300.0, 0.0),
        dvec2(10.0, 400.0),
    ]
}
