//! Connector routing and line geometry for HVAC schematic diagrams.
//!
//! Lines connect equipment shapes on a Y-down canvas. A line is straight,
//! an arc, an orthogonal (segmented) connector, a polyline or a freehand
//! stroke. Segmented connectors are rebuilt from their endpoint faces on
//! every edit, keeping stubs clear of the shapes they attach to.
//!
//! ```
//! use glam::dvec2;
//! use hvac_route::{EditContext, Face, HookSlot, Line, ObjectId, RouteConfig};
//!
//! let config = RouteConfig::default();
//! let ctx = EditContext::without_shapes(&config);
//! let mut line = Line::segmented(
//!     &ctx,
//!     ObjectId(1),
//!     dvec2(100.0, 200.0),
//!     dvec2(300.0, 260.0),
//!     Some(Face::Top),
//!     Some(Face::Top),
//! );
//! assert_eq!(line.points().len(), 4);
//!
//! line.move_endpoint(&ctx, HookSlot::End, dvec2(320.0, 260.0)).unwrap();
//! assert_eq!(line.path_data(&config).to_string(), "M100,200L100,175L320,175L320,260");
//! ```

pub mod arc;
pub mod config;
pub mod context;
pub mod defaults;
pub mod errors;
pub mod hit;
pub mod line;
pub mod log;
pub mod path_data;
pub mod perimeter;
pub mod route;
pub mod text;
pub mod types;

pub use arc::{ArcSolution, solve_arc};
pub use config::RouteConfig;
pub use context::EditContext;
pub use errors::{ConfigError, RouteError};
pub use hit::SegmentHit;
pub use line::{AddCorner, DragSession, Line, LineBase, LineEdit, LineGeometry, LineKind};
pub use path_data::PathData;
pub use perimeter::PerimeterMapper;
pub use route::{
    Face, FlipAxis, Hook, HookSlot, NoShapes, ResolvedShape, RouteAction, SegmentRoute,
    ShapeResolver,
};
pub use text::{TextAlign, TextAnchor};
pub use types::{Angle, BBox, HookPoint, Length, NumericError, ObjectId, StyleRecord};
