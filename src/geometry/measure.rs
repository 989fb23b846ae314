//! Centroid and area of vertex rings.

use geo::{Area, GeodesicArea};
use geo_types::{Coord, LineString, Polygon};

use crate::core::constants::MIN_RING_VERTICES;
use crate::core::geo::{LatLng, Point};
use crate::projection::{Projector, UtmZone};
use crate::{Error, Result};

/// Arithmetic mean of the vertex latitudes and longitudes.
///
/// This is not the area-weighted centroid: for unevenly spaced vertices it
/// drifts toward the dense side. It is only used to pick a zone and to
/// anchor the drag rescale, where that bias is harmless.
pub fn centroid(points: &[LatLng]) -> Result<LatLng> {
    if points.is_empty() {
        return Err(Error::InvalidInput(
            "centroid of an empty vertex list".to_string(),
        ));
    }

    let count = points.len() as f64;
    let (sum_lat, sum_lng) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
    Ok(LatLng::new(sum_lat / count, sum_lng / count))
}

fn require_ring<T>(points: &[T]) -> Result<()> {
    if points.len() < MIN_RING_VERTICES {
        return Err(Error::InvalidInput(format!(
            "area needs at least {MIN_RING_VERTICES} vertices, got {}",
            points.len()
        )));
    }
    Ok(())
}

fn planar_polygon(points: &[Point]) -> Polygon<f64> {
    // Polygon::new closes the exterior by repeating the first coordinate.
    let exterior: LineString<f64> = points.iter().copied().map(Coord::from).collect();
    Polygon::new(exterior, vec![])
}

/// Shoelace area of planar vertices; positive when counter-clockwise
pub fn planar_signed_area(points: &[Point]) -> Result<f64> {
    require_ring(points)?;
    Ok(planar_polygon(points).signed_area())
}

/// Unsigned shoelace area of planar vertices
pub fn planar_area(points: &[Point]) -> Result<f64> {
    Ok(planar_signed_area(points)?.abs())
}

/// Signed area (m²) of the ring projected into `zone`
pub fn signed_area<P: Projector + ?Sized>(
    points: &[LatLng],
    zone: UtmZone,
    projector: &P,
) -> Result<f64> {
    require_ring(points)?;
    planar_signed_area(&projector.to_planar_all(points, zone)?)
}

/// Area (m²) of the ring projected into `zone`, always >= 0
pub fn area<P: Projector + ?Sized>(points: &[LatLng], zone: UtmZone, projector: &P) -> Result<f64> {
    Ok(signed_area(points, zone, projector)?.abs())
}

/// Area (m²) of the ring on the WGS84 ellipsoid, independent of any zone.
///
/// Either winding is accepted; rings enclosing more than half the globe are
/// not supported.
pub fn geodesic_area(points: &[LatLng]) -> Result<f64> {
    require_ring(points)?;
    let exterior: LineString<f64> = points
        .iter()
        .map(|p| Coord { x: p.lng, y: p.lat })
        .collect();
    Ok(Polygon::new(exterior, vec![]).geodesic_area_signed().abs())
}
