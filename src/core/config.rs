//! Configuration for the projection engine and the interactive draw session
//!
//! Projection accuracy is chosen through presets (`AccuracyProfile`) that
//! resolve into plain option structs, so callers can pick a preset or spell
//! out every knob. Every struct deserializes from partial JSON.

use serde::{Deserialize, Serialize};

use crate::plugins::measure::UnitSystem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AccuracyProfile {
    Standard,
    High,
    Custom(ProjectionConfig),
}

impl AccuracyProfile {
    pub fn resolve(&self) -> ProjectionConfig {
        match self {
            Self::Standard => ProjectionConfig {
                max_inverse_iterations: 8,
                inverse_tolerance: 1e-12,
            },
            Self::High => ProjectionConfig {
                max_inverse_iterations: 16,
                inverse_tolerance: 1e-15,
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for AccuracyProfile {
    fn default() -> Self {
        Self::Standard
    }
}

/// Knobs for the inverse transverse Mercator solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Newton iterations allowed when recovering latitude from conformal latitude
    pub max_inverse_iterations: usize,
    /// Convergence threshold on tan(latitude)
    pub inverse_tolerance: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        AccuracyProfile::default().resolve()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub projection: ProjectionConfig,
    /// A drag step measuring at or below this area (m²) cannot be rescaled
    pub min_area_m2: f64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionConfig::default(),
            min_area_m2: 0.0,
        }
    }
}

impl TransformConfig {
    /// Parse a (possibly partial) JSON document; missing fields keep defaults
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub unit_system: UnitSystem,
    /// Decimal places on area labels
    pub precision: usize,
    pub max_polygons: Option<usize>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            precision: 2,
            max_polygons: None,
        }
    }
}
