//! Geographic <-> local planar conversion.
//!
//! A point is projected into the UTM zone picked by [`select_zone`]; the
//! resulting [`Point`] is only meaningful together with that zone.

pub mod ellipsoid;
pub mod utm;
pub mod zone;

pub use ellipsoid::Ellipsoid;
pub use utm::UtmProjector;
pub use zone::{select_zone, Hemisphere, UtmZone};

use crate::core::geo::{LatLng, Point};
use crate::Result;

/// Converts between geographic coordinates and the planar system of a zone
pub trait Projector {
    fn to_planar(&self, point: &LatLng, zone: UtmZone) -> Result<Point>;

    fn to_geographic(&self, point: &Point, zone: UtmZone) -> Result<LatLng>;

    /// Projects every point, failing on the first one that cannot be projected
    fn to_planar_all(&self, points: &[LatLng], zone: UtmZone) -> Result<Vec<Point>> {
        points.iter().map(|p| self.to_planar(p, zone)).collect()
    }

    fn to_geographic_all(&self, points: &[Point], zone: UtmZone) -> Result<Vec<LatLng>> {
        points.iter().map(|p| self.to_geographic(p, zone)).collect()
    }
}
