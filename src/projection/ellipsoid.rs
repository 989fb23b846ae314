use serde::{Deserialize, Serialize};

use crate::core::constants::{WGS84_A, WGS84_F};

/// Reference ellipsoid described by its semi-major axis and flattening
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    /// Semi-major axis (meters)
    pub a: f64,
    /// Flattening
    pub f: f64,
}

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        a: WGS84_A,
        f: WGS84_F,
    };

    /// Semi-minor axis (meters)
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// First eccentricity squared
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// First eccentricity
    pub fn e(&self) -> f64 {
        self.e2().sqrt()
    }

    /// Third flattening, the expansion parameter of the Krüger series
    pub fn n(&self) -> f64 {
        self.f / (2.0 - self.f)
    }

    /// Radius of the sphere with the same meridian length
    pub fn rectifying_radius(&self) -> f64 {
        let n = self.n();
        let n2 = n * n;
        self.a / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0 + n2 * n2 * n2 / 256.0)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}
