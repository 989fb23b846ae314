//! Prelude module for common areadrag types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use areadrag::prelude::*;`

pub use crate::core::{
    config::{AccuracyProfile, DisplayConfig, ProjectionConfig, TransformConfig},
    geo::{LatLng, LatLngBounds, LatLngDelta, Point},
};

pub use crate::geometry::{area, centroid, geodesic_area, signed_area, Ring};

pub use crate::projection::{select_zone, Ellipsoid, Hemisphere, Projector, UtmProjector, UtmZone};

pub use crate::transform::{AreaPreservingTransform, DragState, DragStep, Polygon, PolygonId};

pub use crate::plugins::{
    base::PluginTrait,
    draw::{DrawPlugin, DrawState},
    measure::{AreaLabel, UnitSystem},
};

pub use crate::input::events::{EventHandled, InputEvent, KeyCode, MouseButton};

pub use crate::{Error as AreaError, Result};

pub use fxhash::FxHashMap as HashMap;
