//! Engine-wide constants: the WGS84 datum, the UTM zone grid, and display units.
//! Keeping them in a single place makes it easier to audit the magic numbers.

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Scale factor on the central meridian of every UTM zone.
pub const UTM_SCALE_FACTOR: f64 = 0.9996;

/// Easting assigned to the central meridian.
pub const UTM_FALSE_EASTING: f64 = 500_000.0;

/// Northing offset applied in the southern hemisphere.
pub const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Width of a UTM longitude band in degrees.
pub const UTM_ZONE_WIDTH: f64 = 6.0;

/// Number of longitude bands around the globe.
pub const UTM_ZONE_COUNT: u8 = 60;

/// A ring needs at least this many vertices to enclose an area.
pub const MIN_RING_VERTICES: usize = 3;

/// Square meters per square kilometer.
pub const SQ_METERS_PER_SQ_KM: f64 = 1_000_000.0;

/// Square meters per square nautical mile (1852 m)².
pub const SQ_METERS_PER_SQ_NAUTICAL_MILE: f64 = 3_429_904.0;

/// Square meters per international square mile.
pub const SQ_METERS_PER_SQ_MILE: f64 = 2_589_988.110_336;
