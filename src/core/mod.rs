pub mod config;
pub mod constants;
pub mod geo;

pub use config::{AccuracyProfile, DisplayConfig, ProjectionConfig, TransformConfig};
pub use geo::{LatLng, LatLngBounds, LatLngDelta, Point};
