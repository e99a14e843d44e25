//! Context handed to every line edit.

use crate::config::RouteConfig;
use crate::route::{Hook, NoShapes, ResolvedShape, ShapeResolver};

/// Document settings plus read access to the shapes lines attach to
#[derive(Clone, Copy)]
pub struct EditContext<'a> {
    pub config: &'a RouteConfig,
    pub shapes: &'a dyn ShapeResolver,
}

impl<'a> EditContext<'a> {
    pub fn new(config: &'a RouteConfig, shapes: &'a dyn ShapeResolver) -> Self {
        EditContext { config, shapes }
    }

    /// Context for documents where nothing can be hooked
    pub fn without_shapes(config: &'a RouteConfig) -> Self {
        EditContext {
            config,
            shapes: &NoShapes,
        }
    }

    /// Snapshot of the shape a hook points at, if it still exists.
    pub fn resolve(&self, hook: Option<&Hook>) -> Option<ResolvedShape> {
        hook.and_then(|h| self.shapes.resolve(h.object_id))
    }
}

impl std::fmt::Debug for EditContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditContext")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
