//! Error types with diagnostics using miette
//!
//! Degenerate geometry is never an error here: it is reported through
//! sentinel results (`valid == false`, `None`). Only configuration problems
//! and explicit NoAuto bounds violations surface as `Err`.

use glam::DVec2;
use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised while validating a [`RouteConfig`](crate::RouteConfig)
#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for `{field}`: {source}")]
    #[diagnostic(code(hvac_route::config::invalid_number))]
    InvalidNumber {
        field: &'static str,
        #[source]
        source: NumericError,
    },

    #[error("`min_segment_length` ({min}) exceeds `default_stub` ({stub})")]
    #[diagnostic(
        code(hvac_route::config::stub_too_short),
        help("stubs are clamped to the minimum segment length; raise `default_stub`")
    )]
    StubShorterThanMinimum { min: f64, stub: f64 },

    #[error("`max_dimension` ({max}) is smaller than `default_stub` ({stub})")]
    #[diagnostic(code(hvac_route::config::document_too_small))]
    DocumentTooSmall { max: f64, stub: f64 },
}

// ============================================================================
// Routing Errors
// ============================================================================

/// Errors surfaced by line edits
#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum RouteError {
    #[error(
        "endpoint ({}, {}) would be moved to ({}, {})",
        .requested.x, .requested.y, .solved.x, .solved.y
    )]
    #[diagnostic(
        code(hvac_route::route::bounds_violation),
        help(
            "automatic correction is disabled for this document (`no_auto`); \
             request a point inside the document bounds"
        )
    )]
    BoundsViolation { requested: DVec2, solved: DVec2 },

    #[error("invalid scale factor: {source}")]
    #[diagnostic(code(hvac_route::route::invalid_scale))]
    InvalidScale {
        #[source]
        source: NumericError,
    },
}
