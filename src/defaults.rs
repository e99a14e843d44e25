//! Default routing constants (document units unless noted)

use crate::types::{Angle, Length};

/// Shortest segment a synthesized route may contain
pub const MIN_SEGMENT_LENGTH: Length = Length(4.0);
/// Perpendicular offsets below this collapse into a straight connector
pub const MIN_SEGMENT_MERGE: Length = Length(4.0);
/// Length of the stub leaving a face when nothing else constrains it
pub const DEFAULT_STUB: Length = Length(25.0);
/// Document extent on both axes; route points are clamped into `[0, MAX_DIMENSION]`
pub const MAX_DIMENSION: Length = Length(30000.0);
/// Tolerance for snapping near-axis angles, in degrees
pub const ROTATION_SNAP: Angle = Angle(3.0);
/// Constant padding added to every hit-test threshold
pub const HIT_PADDING: Length = Length(12.0);
/// Fraction of the shorter adjacent segment a rounded corner may consume
pub const CORNER_RATIO: f64 = 0.4;
/// Upper bound of the normalized hook coordinate space
pub const NORMALIZED_EXTENT: f64 = 1000.0;
/// Point count used when sampling an arc for rendering and bounds
pub const ARC_SAMPLES: usize = 24;
/// Coordinate deltas below this count as zero when picking a bend axis
pub const AXIS_EPSILON: f64 = 1.0;
