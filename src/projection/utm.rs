//! Universal Transverse Mercator on an ellipsoid.
//!
//! Uses Krüger's series in the third flattening `n`, carried to sixth order
//! (Karney 2011, "Transverse Mercator with an accuracy of a few
//! nanometers"). Within a zone the forward/inverse pair is accurate far below
//! a millimeter, so round trips reproduce the input to well under 1e-9°.

use crate::core::config::ProjectionConfig;
use crate::core::constants::{UTM_FALSE_EASTING, UTM_FALSE_NORTHING_SOUTH, UTM_SCALE_FACTOR};
use crate::core::geo::{LatLng, Point};
use crate::projection::{Ellipsoid, Hemisphere, Projector, UtmZone};
use crate::{Error, Result};

/// Stateless UTM projector; series coefficients are computed once up front
#[derive(Debug, Clone, PartialEq)]
pub struct UtmProjector {
    ellipsoid: Ellipsoid,
    config: ProjectionConfig,
    /// k0 * A
    scaled_radius: f64,
    alpha: [f64; 6],
    beta: [f64; 6],
}

impl UtmProjector {
    pub fn new(ellipsoid: Ellipsoid, config: ProjectionConfig) -> Self {
        let n = ellipsoid.n();
        let (n2, n3) = (n * n, n * n * n);
        let (n4, n5, n6) = (n3 * n, n3 * n2, n3 * n3);

        let alpha = [
            n / 2.0 - 2.0 / 3.0 * n2 + 5.0 / 16.0 * n3 + 41.0 / 180.0 * n4 - 127.0 / 288.0 * n5
                + 7891.0 / 37800.0 * n6,
            13.0 / 48.0 * n2 - 3.0 / 5.0 * n3 + 557.0 / 1440.0 * n4 + 281.0 / 630.0 * n5
                - 1_983_433.0 / 1_935_360.0 * n6,
            61.0 / 240.0 * n3 - 103.0 / 140.0 * n4 + 15061.0 / 26880.0 * n5
                + 167_603.0 / 181_440.0 * n6,
            49561.0 / 161_280.0 * n4 - 179.0 / 168.0 * n5 + 6_601_661.0 / 7_257_600.0 * n6,
            34729.0 / 80640.0 * n5 - 3_418_889.0 / 1_995_840.0 * n6,
            212_378_941.0 / 319_334_400.0 * n6,
        ];

        let beta = [
            n / 2.0 - 2.0 / 3.0 * n2 + 37.0 / 96.0 * n3 - 1.0 / 360.0 * n4 - 81.0 / 512.0 * n5
                + 96199.0 / 604_800.0 * n6,
            1.0 / 48.0 * n2 + 1.0 / 15.0 * n3 - 437.0 / 1440.0 * n4 + 46.0 / 105.0 * n5
                - 1_118_711.0 / 3_870_720.0 * n6,
            17.0 / 480.0 * n3 - 37.0 / 840.0 * n4 - 209.0 / 4480.0 * n5 + 5569.0 / 90720.0 * n6,
            4397.0 / 161_280.0 * n4 - 11.0 / 504.0 * n5 - 830_251.0 / 7_257_600.0 * n6,
            4583.0 / 161_280.0 * n5 - 108_847.0 / 3_991_680.0 * n6,
            20_648_693.0 / 638_668_800.0 * n6,
        ];

        Self {
            ellipsoid,
            config,
            scaled_radius: UTM_SCALE_FACTOR * ellipsoid.rectifying_radius(),
            alpha,
            beta,
        }
    }

    pub fn wgs84() -> Self {
        Self::new(Ellipsoid::WGS84, ProjectionConfig::default())
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    fn false_northing(zone: UtmZone) -> f64 {
        match zone.hemisphere() {
            Hemisphere::North => 0.0,
            Hemisphere::South => UTM_FALSE_NORTHING_SOUTH,
        }
    }

    /// Recovers tan(latitude) from tan(conformal latitude) by Newton iteration
    fn solve_tau(&self, tau_prime: f64) -> Result<f64> {
        let e = self.ellipsoid.e();
        let one_minus_e2 = 1.0 - self.ellipsoid.e2();

        let mut tau = tau_prime;
        for _ in 0..self.config.max_inverse_iterations {
            let sigma = (e * (e * tau / (1.0 + tau * tau).sqrt()).atanh()).sinh();
            let tau_i = tau * (1.0 + sigma * sigma).sqrt() - sigma * (1.0 + tau * tau).sqrt();
            let delta = (tau_prime - tau_i) / (1.0 + tau_i * tau_i).sqrt()
                * (1.0 + one_minus_e2 * tau * tau)
                / (one_minus_e2 * (1.0 + tau * tau).sqrt());
            tau += delta;
            if !tau.is_finite() {
                break;
            }
            if delta.abs() <= self.config.inverse_tolerance * tau.abs().max(1.0) {
                return Ok(tau);
            }
        }

        Err(Error::ProjectionFailure(format!(
            "inverse latitude did not converge for tau' = {tau_prime}"
        )))
    }
}

impl Default for UtmProjector {
    fn default() -> Self {
        Self::wgs84()
    }
}

fn check_finite(point: Point, source: &LatLng, zone: UtmZone) -> Result<Point> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(Error::ProjectionFailure(format!(
            "({}, {}) has no finite image in zone {zone}",
            source.lat, source.lng
        )))
    }
}

impl Projector for UtmProjector {
    fn to_planar(&self, point: &LatLng, zone: UtmZone) -> Result<Point> {
        if !point.is_finite() {
            return Err(Error::InvalidInput(format!(
                "non-finite coordinate ({}, {})",
                point.lat, point.lng
            )));
        }
        if point.lat.abs() >= 90.0 {
            return Err(Error::ProjectionFailure(format!(
                "latitude {} is at or beyond a pole",
                point.lat
            )));
        }

        let delta_lng = LatLng::wrap_lng(point.lng - zone.central_meridian());
        if delta_lng.abs() >= 90.0 {
            return Err(Error::ProjectionFailure(format!(
                "longitude {} is a quarter turn or more from zone {zone}",
                point.lng
            )));
        }

        let e = self.ellipsoid.e();
        let phi = point.lat.to_radians();
        let lambda = delta_lng.to_radians();
        let (sin_lambda, cos_lambda) = lambda.sin_cos();

        let tau = phi.tan();
        let sigma = (e * (e * phi.sin()).atanh()).sinh();
        // tan of the conformal latitude
        let tau_prime = tau * (1.0 + sigma * sigma).sqrt() - sigma * (1.0 + tau * tau).sqrt();

        let xi_prime = tau_prime.atan2(cos_lambda);
        let eta_prime = (sin_lambda / tau_prime.hypot(cos_lambda)).asinh();

        let mut xi = xi_prime;
        let mut eta = eta_prime;
        for (j, alpha) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += alpha * (k * xi_prime).sin() * (k * eta_prime).cosh();
            eta += alpha * (k * xi_prime).cos() * (k * eta_prime).sinh();
        }

        let planar = Point::new(
            UTM_FALSE_EASTING + self.scaled_radius * eta,
            Self::false_northing(zone) + self.scaled_radius * xi,
        );
        check_finite(planar, point, zone)
    }

    fn to_geographic(&self, point: &Point, zone: UtmZone) -> Result<LatLng> {
        if !point.is_finite() {
            return Err(Error::InvalidInput(format!(
                "non-finite planar coordinate ({}, {})",
                point.x, point.y
            )));
        }

        let eta = (point.x - UTM_FALSE_EASTING) / self.scaled_radius;
        let xi = (point.y - Self::false_northing(zone)) / self.scaled_radius;

        let mut xi_prime = xi;
        let mut eta_prime = eta;
        for (j, beta) in self.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi_prime -= beta * (k * xi).sin() * (k * eta).cosh();
            eta_prime -= beta * (k * xi).cos() * (k * eta).sinh();
        }

        let sinh_eta = eta_prime.sinh();
        let sin_xi = xi_prime.sin();
        let cos_xi = xi_prime.cos();

        let tau_prime = sin_xi / (sinh_eta * sinh_eta + cos_xi * cos_xi).sqrt();
        if !tau_prime.is_finite() {
            return Err(Error::ProjectionFailure(format!(
                "({}, {}) maps onto a pole in zone {zone}",
                point.x, point.y
            )));
        }
        let tau = self.solve_tau(tau_prime)?;

        let lat = tau.atan().to_degrees();
        let lng = zone.central_meridian() + sinh_eta.atan2(cos_xi).to_degrees();
        let geographic = LatLng::new(lat, lng);
        if !geographic.is_finite() {
            return Err(Error::ProjectionFailure(format!(
                "({}, {}) has no finite preimage in zone {zone}",
                point.x, point.y
            )));
        }
        Ok(geographic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::select_zone;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn test_central_meridian_on_equator() {
        let projector = UtmProjector::wgs84();
        let zone = UtmZone::from_code(31).unwrap();
        let p = projector.to_planar(&LatLng::new(0.0, 3.0), zone).unwrap();
        assert_close(p.x, 500_000.0, 1e-6);
        assert_close(p.y, 0.0, 1e-6);
    }

    #[test]
    fn test_southern_false_northing() {
        let projector = UtmProjector::wgs84();
        let zone = UtmZone::from_code(-31).unwrap();
        let p = projector.to_planar(&LatLng::new(0.0, 3.0), zone).unwrap();
        assert_close(p.y, 10_000_000.0, 1e-6);
    }

    #[test]
    fn test_meridian_arc_length() {
        // Northing on the central meridian equals k0 times the meridian arc.
        let projector = UtmProjector::wgs84();
        let zone = UtmZone::from_code(31).unwrap();
        let p = projector.to_planar(&LatLng::new(45.0, 3.0), zone).unwrap();
        assert_close(p.y, 0.9996 * 4_984_944.378, 1e-2);
    }

    #[test]
    fn test_known_coordinate() {
        // Eiffel Tower, zone 31N
        let projector = UtmProjector::wgs84();
        let tower = LatLng::new(48.858_37, 2.294_481);
        let zone = select_zone(&tower);
        assert_eq!(zone.code(), 31);
        let p = projector.to_planar(&tower, zone).unwrap();
        assert_close(p.x, 448_250.58, 0.01);
        assert_close(p.y, 5_411_951.59, 0.01);
    }

    #[test]
    fn test_round_trip() {
        let projector = UtmProjector::wgs84();
        for point in [
            LatLng::new(51.505, -0.09),
            LatLng::new(-33.87, 151.21),
            LatLng::new(0.0, 0.0),
            LatLng::new(83.9, 12.0),
            LatLng::new(-79.5, -100.0),
        ] {
            let zone = select_zone(&point);
            let planar = projector.to_planar(&point, zone).unwrap();
            let back = projector.to_geographic(&planar, zone).unwrap();
            assert_close(back.lat, point.lat, 1e-9);
            assert_close(back.lng, point.lng, 1e-9);
        }
    }

    #[test]
    fn test_pole_is_a_projection_failure() {
        let projector = UtmProjector::wgs84();
        let zone = UtmZone::from_code(31).unwrap();
        assert!(matches!(
            projector.to_planar(&LatLng::new(90.0, 3.0), zone),
            Err(Error::ProjectionFailure(_))
        ));
        assert!(matches!(
            projector.to_planar(&LatLng::new(-95.0, 3.0), zone),
            Err(Error::ProjectionFailure(_))
        ));
    }

    #[test]
    fn test_quarter_turn_from_meridian_fails() {
        let projector = UtmProjector::wgs84();
        let zone = UtmZone::from_code(31).unwrap();
        assert!(matches!(
            projector.to_planar(&LatLng::new(0.0, 93.0), zone),
            Err(Error::ProjectionFailure(_))
        ));
    }

    #[test]
    fn test_non_finite_input_is_invalid() {
        let projector = UtmProjector::wgs84();
        let zone = UtmZone::from_code(31).unwrap();
        assert!(matches!(
            projector.to_planar(&LatLng::new(f64::NAN, 3.0), zone),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            projector.to_geographic(&Point::new(f64::INFINITY, 0.0), zone),
            Err(Error::InvalidInput(_))
        ));
    }
}
