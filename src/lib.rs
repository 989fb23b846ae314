//! # areadrag
//!
//! Area-preserving polygon dragging for web maps.
//!
//! A polygon drawn on a Web Mercator map changes its true ground area when
//! its vertices are simply shifted in latitude/longitude. This crate keeps the
//! area fixed: each drag step projects the translated ring into the local UTM
//! zone, measures it, and rescales it about its centroid so the planar area
//! matches the area measured when the polygon was created.
//!
//! The engine ([`transform::AreaPreservingTransform`]) is pure and
//! synchronous. [`plugins::draw::DrawPlugin`] wraps it in the draw/drag
//! gesture handling a map front end needs.

pub mod core;
pub mod geometry;
pub mod input;
pub mod plugins;
pub mod prelude;
pub mod projection;
pub mod transform;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{AccuracyProfile, DisplayConfig, ProjectionConfig, TransformConfig},
    geo::{LatLng, LatLngBounds, LatLngDelta, Point},
};

pub use geometry::Ring;

pub use projection::{select_zone, Projector, UtmProjector, UtmZone};

pub use transform::{AreaPreservingTransform, DragStep, Polygon, PolygonId};

pub use input::events::InputEvent;

pub use plugins::{base::PluginTrait, draw::DrawPlugin, measure::AreaLabel};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum AreaError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Degenerate geometry: measured area {area} m² cannot be rescaled")]
    DegenerateGeometry { area: f64 },

    #[error("Projection failure: {0}")]
    ProjectionFailure(String),

    #[error("Plugin error: {0}")]
    Plugin(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = AreaError;
