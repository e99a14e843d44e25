//! Text-on-line positioning.
//!
//! A label is stored as a fraction of the route's total length plus a
//! perpendicular offset, so it stays on the same logical spot when the
//! route is rebuilt.

use glam::DVec2;

use crate::hit::closest_point_on_segment;

/// Stored label position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextAnchor {
    /// Position along the total route length, `0.0..=1.0`
    pub fraction: f64,
    /// Signed distance from the route; positive is left of travel on screen
    pub offset: f64,
}

/// Where a label without a stored anchor goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// First segment
    Left,
    /// Middle segment
    #[default]
    Center,
    /// Last segment
    Right,
}

/// Segment a label sits on and the interpolation fraction within it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOnLine {
    pub segment_index: usize,
    pub start: DVec2,
    pub end: DVec2,
    pub t: f64,
}

impl TextOnLine {
    pub fn position(&self) -> DVec2 {
        self.start.lerp(self.end, self.t)
    }
}

fn segment_lengths(points: &[DVec2]) -> Vec<f64> {
    points.windows(2).map(|w| w[0].distance(w[1])).collect()
}

/// Anchor for a label placed at `target` (e.g. a double-click location).
///
/// `None` for a route without length.
pub fn calc_text_position(points: &[DVec2], target: DVec2) -> Option<TextAnchor> {
    let lengths = segment_lengths(points);
    let total: f64 = lengths.iter().sum();
    if total <= 0.0 {
        return None;
    }

    let mut best: Option<(f64, TextAnchor)> = None;
    let mut walked = 0.0;
    for (i, w) in points.windows(2).enumerate() {
        let (a, b) = (w[0], w[1]);
        let closest = closest_point_on_segment(a, b, target);
        let distance = closest.distance(target);
        if best.is_none_or(|(d, _)| distance < d) {
            let len = lengths[i];
            let side = if len > 0.0 {
                (b - a).perp_dot(target - a) / len
            } else {
                0.0
            };
            let anchor = TextAnchor {
                fraction: (walked + a.distance(closest)) / total,
                // Y-down canvas: left of travel is a negative cross product
                offset: -side,
            };
            best = Some((distance, anchor));
        }
        walked += lengths[i];
    }
    best.map(|(_, anchor)| anchor)
}

/// Segment used when there is no stored fraction.
///
/// Two points use the only segment, three the longer of the two, five the
/// longer of the two middle ones; longer routes use the middle index.
pub fn middle_segment(points: &[DVec2]) -> usize {
    let lengths = segment_lengths(points);
    match points.len() {
        0..=2 => 0,
        3 => usize::from(lengths[1] > lengths[0]),
        5 => {
            if lengths[2] > lengths[1] {
                2
            } else {
                1
            }
        }
        n => ((n as f64 - 1.1) / 2.0).round() as usize,
    }
}

/// Re-derive the bracketing route points for a label.
pub fn text_on_line_params(
    points: &[DVec2],
    anchor: Option<TextAnchor>,
    align: TextAlign,
) -> Option<TextOnLine> {
    if points.len() < 2 {
        return None;
    }
    let lengths = segment_lengths(points);
    let last = lengths.len() - 1;

    let Some(anchor) = anchor else {
        let index = match align {
            TextAlign::Left => 0,
            TextAlign::Right => last,
            TextAlign::Center => middle_segment(points),
        };
        return Some(TextOnLine {
            segment_index: index,
            start: points[index],
            end: points[index + 1],
            t: 0.5,
        });
    };

    let total: f64 = lengths.iter().sum();
    let target = anchor.fraction.clamp(0.0, 1.0) * total;
    let mut walked = 0.0;
    for (i, &len) in lengths.iter().enumerate() {
        if walked + len >= target || i == last {
            let t = if len > 0.0 {
                ((target - walked) / len).clamp(0.0, 1.0)
            } else {
                0.0
            };
            return Some(TextOnLine {
                segment_index: i,
                start: points[i],
                end: points[i + 1],
                t,
            });
        }
        walked += len;
    }
    None
}
