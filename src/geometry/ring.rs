use serde::{Deserialize, Serialize};
use std::ops::Deref;

use crate::core::constants::MIN_RING_VERTICES;
use crate::core::geo::{LatLng, LatLngBounds, LatLngDelta};
use crate::{Error, Result};

/// Closed polygon boundary in geographic coordinates.
///
/// Closure is implicit: the first vertex is not repeated at the end. A ring
/// always holds at least three finite vertices with latitudes in [-90, 90].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LatLng>", into = "Vec<LatLng>")]
pub struct Ring(Vec<LatLng>);

impl Ring {
    pub fn new(points: Vec<LatLng>) -> Result<Self> {
        if points.len() < MIN_RING_VERTICES {
            return Err(Error::InvalidInput(format!(
                "a ring needs at least {MIN_RING_VERTICES} vertices, got {}",
                points.len()
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "non-finite vertex ({}, {})",
                bad.lat, bad.lng
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_valid()) {
            return Err(Error::InvalidInput(format!(
                "latitude {} outside [-90, 90]",
                bad.lat
            )));
        }
        Ok(Self(points))
    }

    pub fn points(&self) -> &[LatLng] {
        &self.0
    }

    /// Moves every vertex by the same angular offset.
    ///
    /// Longitudes are not wrapped, so a ring pushed over the antimeridian
    /// keeps contiguous coordinates.
    pub fn translate(&self, delta: LatLngDelta) -> Result<Self> {
        if !delta.is_finite() {
            return Err(Error::InvalidInput(format!(
                "non-finite drag delta ({}, {})",
                delta.d_lat, delta.d_lng
            )));
        }
        Self::new(self.0.iter().map(|p| p.translate(delta)).collect())
    }

    pub fn bounds(&self) -> LatLngBounds {
        let mut bounds = LatLngBounds::new(self.0[0], self.0[0]);
        for point in &self.0[1..] {
            bounds.extend(point);
        }
        bounds
    }

    /// Even-odd point-in-polygon test in plain lat/lng space.
    ///
    /// The query longitude is first moved by whole turns next to the ring's
    /// mean longitude, so a ring stored past ±180 is still hit by the
    /// wrapped pointer position.
    pub fn contains(&self, point: &LatLng) -> bool {
        let mean_lng = self.0.iter().map(|p| p.lng).sum::<f64>() / self.0.len() as f64;
        let point = &point.unwrap_near(mean_lng);

        if !self.bounds().contains(point) {
            return false;
        }

        let mut inside = false;
        let mut j = self.0.len() - 1;

        for i in 0..self.0.len() {
            let pi = &self.0[i];
            let pj = &self.0[j];

            if ((pi.lat > point.lat) != (pj.lat > point.lat))
                && (point.lng
                    < (pj.lng - pi.lng) * (point.lat - pi.lat) / (pj.lat - pi.lat) + pi.lng)
            {
                inside = !inside;
            }
            j = i;
        }

        inside
    }
}

impl Deref for Ring {
    type Target = [LatLng];

    fn deref(&self) -> &[LatLng] {
        &self.0
    }
}

impl TryFrom<Vec<LatLng>> for Ring {
    type Error = Error;

    fn try_from(points: Vec<LatLng>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<Ring> for Vec<LatLng> {
    fn from(ring: Ring) -> Self {
        ring.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Ring {
        Ring::new(vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 1.0),
            LatLng::new(1.0, 1.0),
            LatLng::new(1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_ring_needs_three_vertices() {
        let err = Ring::new(vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(Ring::new(Vec::new()).is_err());
    }

    #[test]
    fn test_ring_rejects_non_finite() {
        let err = Ring::new(vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(f64::NAN, 1.0),
            LatLng::new(1.0, 1.0),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_ring_rejects_latitude_past_pole() {
        let err = Ring::new(vec![
            LatLng::new(95.0, 0.0),
            LatLng::new(95.0, 1.0),
            LatLng::new(96.0, 1.0),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        // The poles themselves are valid coordinates.
        assert!(Ring::new(vec![
            LatLng::new(90.0, 0.0),
            LatLng::new(89.0, 1.0),
            LatLng::new(89.0, 0.0),
        ])
        .is_ok());
    }

    #[test]
    fn test_translate_past_pole_is_invalid() {
        let err = square().translate(LatLngDelta::new(95.0, 0.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_translate() {
        let moved = square().translate(LatLngDelta::new(2.0, -3.0)).unwrap();
        assert_eq!(moved[0], LatLng::new(2.0, -3.0));
        assert_eq!(moved[2], LatLng::new(3.0, -2.0));
        assert_eq!(moved.len(), 4);
    }

    #[test]
    fn test_translate_keeps_longitudes_contiguous() {
        let moved = square().translate(LatLngDelta::new(0.0, 179.5)).unwrap();
        assert_eq!(moved[1].lng, 180.5);
    }

    #[test]
    fn test_translate_rejects_nan_delta() {
        assert!(square().translate(LatLngDelta::new(f64::NAN, 0.0)).is_err());
    }

    #[test]
    fn test_contains() {
        let ring = square();
        assert!(ring.contains(&LatLng::new(0.5, 0.5)));
        assert!(!ring.contains(&LatLng::new(1.5, 0.5)));
        assert!(!ring.contains(&LatLng::new(0.5, -0.1)));
    }

    #[test]
    fn test_contains_across_antimeridian() {
        let ring = square().translate(LatLngDelta::new(0.0, 179.8)).unwrap();
        assert!(ring.contains(&LatLng::new(0.5, 180.3)));
        assert!(ring.contains(&LatLng::new(0.5, -179.7)));
        assert!(!ring.contains(&LatLng::new(0.5, -178.0)));
    }

    #[test]
    fn test_serde_validates() {
        let json = serde_json::to_string(&square()).unwrap();
        let back: Ring = serde_json::from_str(&json).unwrap();
        assert_eq!(back, square());

        let short = r#"[{"lat":0.0,"lng":0.0},{"lat":1.0,"lng":1.0}]"#;
        assert!(serde_json::from_str::<Ring>(short).is_err());
    }
}
