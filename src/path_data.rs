//! SVG path data built through a fluent API.
//!
//! Lines hand their geometry to the host as a `d` attribute string; the
//! host owns the `<path>` element and its styling.

use std::fmt;

use glam::DVec2;

/// One path command, absolute coordinates only
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(DVec2),
    LineTo(DVec2),
    /// Quadratic Bezier: control point, end point
    QuadTo(DVec2, DVec2),
    /// Elliptical arc: radii, x-axis rotation in degrees, large-arc flag,
    /// sweep flag, end point
    Arc {
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: DVec2,
    },
    Close,
}

/// Path data under construction
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn m(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(DVec2::new(x, y)));
        self
    }

    pub fn l(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(DVec2::new(x, y)));
        self
    }

    pub fn q(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::QuadTo(DVec2::new(cx, cy), DVec2::new(x, y)));
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn a(
        mut self,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> Self {
        self.commands.push(PathCommand::Arc {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            to: DVec2::new(x, y),
        });
        self
    }

    pub fn z(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Move to the first point and draw straight lines through the rest.
    pub fn polyline(points: &[DVec2]) -> Self {
        let mut data = PathData::new();
        for (i, p) in points.iter().enumerate() {
            data = if i == 0 {
                data.m(p.x, p.y)
            } else {
                data.l(p.x, p.y)
            };
        }
        data
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => write!(f, "M{},{}", fmt_num(p.x), fmt_num(p.y))?,
                PathCommand::LineTo(p) => write!(f, "L{},{}", fmt_num(p.x), fmt_num(p.y))?,
                PathCommand::QuadTo(c, p) => write!(
                    f,
                    "Q{},{} {},{}",
                    fmt_num(c.x),
                    fmt_num(c.y),
                    fmt_num(p.x),
                    fmt_num(p.y)
                )?,
                PathCommand::Arc {
                    rx,
                    ry,
                    rotation,
                    large_arc,
                    sweep,
                    to,
                } => write!(
                    f,
                    "A{} {} {} {} {} {},{}",
                    fmt_num(rx),
                    fmt_num(ry),
                    fmt_num(rotation),
                    u8::from(large_arc),
                    u8::from(sweep),
                    fmt_num(to.x),
                    fmt_num(to.y)
                )?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

/// Format a number with 6 significant figures, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        &s
    };
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
