use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude, in degrees (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite, with latitude in [-90, 90]. Longitude may run past ±180 so a
    /// ring dragged over the antimeridian keeps contiguous coordinates.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && (-90.0..=90.0).contains(&self.lat)
    }

    /// Both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Wraps longitude to [-180, 180] range
    pub fn wrap_lng(lng: f64) -> f64 {
        let wrapped = lng % 360.0;
        if wrapped > 180.0 {
            wrapped - 360.0
        } else if wrapped < -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }

    /// Shifts the longitude by whole turns so it lies within 180 degrees of
    /// `reference`. Latitude is untouched.
    pub fn unwrap_near(&self, reference: f64) -> Self {
        let turns = ((reference - self.lng) / 360.0).round();
        Self::new(self.lat, self.lng + turns * 360.0)
    }

    /// Plain component-wise translation in degrees
    pub fn translate(&self, delta: LatLngDelta) -> Self {
        Self::new(self.lat + delta.d_lat, self.lng + delta.d_lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<[f64; 2]> for LatLng {
    /// `[lat, lng]`, the order Leaflet uses for positions
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self::new(lat, lng)
    }
}

/// A translation in geographic space, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLngDelta {
    pub d_lat: f64,
    pub d_lng: f64,
}

impl LatLngDelta {
    pub fn new(d_lat: f64, d_lng: f64) -> Self {
        Self { d_lat, d_lng }
    }

    /// Delta that moves `from` onto `to`
    pub fn between(from: &LatLng, to: &LatLng) -> Self {
        Self::new(to.lat - from.lat, to.lng - from.lng)
    }

    pub fn is_finite(&self) -> bool {
        self.d_lat.is_finite() && self.d_lng.is_finite()
    }
}

impl From<[f64; 2]> for LatLngDelta {
    fn from([d_lat, d_lng]: [f64; 2]) -> Self {
        Self::new(d_lat, d_lng)
    }
}

/// Represents a point in projected (easting/northing, meters) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Moves this point away from (or towards) `anchor` by `factor`
    pub fn scale_about(&self, anchor: &Point, factor: f64) -> Point {
        anchor.add(&self.subtract(anchor).multiply(factor))
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<Point> for geo_types::Coord<f64> {
    fn from(point: Point) -> Self {
        geo_types::Coord {
            x: point.x,
            y: point.y,
        }
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }
}
