use serde::{Deserialize, Serialize};

use crate::core::constants::{
    SQ_METERS_PER_SQ_KM, SQ_METERS_PER_SQ_MILE, SQ_METERS_PER_SQ_NAUTICAL_MILE,
};

/// Unit system for measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    /// Square kilometers
    Metric,
    /// Square miles
    Imperial,
    /// Square nautical miles
    Nautical,
}

impl UnitSystem {
    /// Converts square meters into this system's area unit
    pub fn convert_area(&self, area_m2: f64) -> (f64, &'static str) {
        match self {
            UnitSystem::Metric => (area_m2 / SQ_METERS_PER_SQ_KM, "km²"),
            UnitSystem::Imperial => (area_m2 / SQ_METERS_PER_SQ_MILE, "mi²"),
            UnitSystem::Nautical => (area_m2 / SQ_METERS_PER_SQ_NAUTICAL_MILE, "nmi²"),
        }
    }
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self::Metric
    }
}

/// Popup text for a polygon's preserved area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaLabel {
    /// Area in the display unit
    pub value: f64,
    /// Unit of measurement
    pub unit: String,
    /// Display text
    pub display_text: String,
}

impl AreaLabel {
    pub fn new(area_m2: f64, unit_system: UnitSystem, precision: usize) -> Self {
        let (value, unit) = unit_system.convert_area(area_m2);
        let display_text = format!("Area: {value:.precision$} {unit}");
        Self {
            value,
            unit: unit.to_string(),
            display_text,
        }
    }

    /// Square kilometers with two decimals
    pub fn metric(area_m2: f64) -> Self {
        Self::new(area_m2, UnitSystem::Metric, 2)
    }
}
