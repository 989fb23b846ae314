use areadrag::prelude::*;

/// End-to-end checks of the drag transform against independently
/// re-measured areas
#[cfg(test)]
mod area_invariance_tests {
    use super::*;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn equator_square() -> Vec<LatLng> {
        vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 0.01),
            LatLng::new(0.01, 0.01),
            LatLng::new(0.01, 0.0),
        ]
    }

    /// Re-measure a ring under the zone of its own centroid
    fn remeasure(projector: &UtmProjector, ring: &Ring) -> f64 {
        let zone = select_zone(&centroid(ring).unwrap());
        area(ring, zone, projector).unwrap()
    }

    fn relative_error(a: f64, b: f64) -> f64 {
        (a - b).abs() / b
    }

    /// The equator square from the design notes, dragged to mid-latitude
    #[test]
    fn test_equator_square_scenario() {
        init_logging();
        let transform = AreaPreservingTransform::default();
        let polygon = transform.create_from_vertices(equator_square()).unwrap();
        assert!(relative_error(polygon.original_area(), 1_232_000.0) < 0.02);

        let ring = transform
            .apply_drag(&polygon, LatLngDelta::new(5.0, 5.0))
            .unwrap();
        let after = remeasure(transform.projector(), &ring);
        assert!(relative_error(after, polygon.original_area()) < 1e-3);

        // Naive translation alone would not have kept the area.
        let naive = polygon.ring().translate(LatLngDelta::new(5.0, 5.0)).unwrap();
        let naive_area = remeasure(transform.projector(), &naive);
        assert!(relative_error(naive_area, polygon.original_area()) > 1e-3);
    }

    /// A long drag northeast across several zones and far up in latitude
    #[test]
    fn test_long_drag_across_zones() {
        init_logging();
        let transform = AreaPreservingTransform::default();
        let mut polygon = transform.create_from_vertices(equator_square()).unwrap();
        let original_area = polygon.original_area();

        let mut zones = Vec::new();
        for _ in 0..200 {
            let step = transform
                .commit_drag(&mut polygon, LatLngDelta::new(0.3, 0.17))
                .unwrap();
            if zones.last() != Some(&step.zone) {
                zones.push(step.zone);
            }
        }

        assert!(zones.len() >= 5, "only visited {zones:?}");
        assert_eq!(polygon.original_area(), original_area);
        let after = remeasure(transform.projector(), polygon.ring());
        assert!(relative_error(after, original_area) < 1e-3);
    }

    /// Crossing the equator flips the hemisphere without losing area
    #[test]
    fn test_drag_into_southern_hemisphere() {
        init_logging();
        let transform = AreaPreservingTransform::default();
        let vertices = vec![
            LatLng::new(2.0, 30.0),
            LatLng::new(2.05, 30.1),
            LatLng::new(1.95, 30.2),
            LatLng::new(1.9, 30.05),
        ];
        let mut polygon = transform.create_from_vertices(vertices).unwrap();
        let original_area = polygon.original_area();

        let mut hemispheres = Vec::new();
        for _ in 0..20 {
            let step = transform
                .commit_drag(&mut polygon, LatLngDelta::new(-0.9, 1.3))
                .unwrap();
            hemispheres.push(step.zone.hemisphere());
        }

        assert_eq!(hemispheres.first(), Some(&Hemisphere::North));
        assert_eq!(hemispheres.last(), Some(&Hemisphere::South));
        let after = remeasure(transform.projector(), polygon.ring());
        assert!(relative_error(after, original_area) < 1e-3);
    }

    /// Back-and-forth jitter does not accumulate error
    #[test]
    fn test_jitter_does_not_drift() {
        let transform = AreaPreservingTransform::default();
        let mut polygon = transform
            .create_from_vertices(vec![
                LatLng::new(48.80, 2.25),
                LatLng::new(48.90, 2.25),
                LatLng::new(48.90, 2.42),
                LatLng::new(48.85, 2.47),
                LatLng::new(48.80, 2.42),
            ])
            .unwrap();
        let original_area = polygon.original_area();

        for i in 0..1000 {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            transform
                .commit_drag(&mut polygon, LatLngDelta::new(sign * 0.37, sign * 0.61))
                .unwrap();
        }

        let after = remeasure(transform.projector(), polygon.ring());
        assert!(relative_error(after, original_area) < 1e-6);
    }

    /// With no net rescale the ring's shape is untouched
    #[test]
    fn test_shape_preserved_without_rescale() {
        let transform = AreaPreservingTransform::default();
        let polygon = transform
            .create_from_vertices(vec![
                LatLng::new(10.0, 10.0),
                LatLng::new(10.0, 10.3),
                LatLng::new(10.2, 10.4),
                LatLng::new(10.25, 10.1),
            ])
            .unwrap();

        let step = transform
            .drag_step(&polygon, LatLngDelta::default())
            .unwrap();
        assert!((step.scale_factor - 1.0).abs() < 1e-12);
        for (before, after) in polygon.ring().iter().zip(step.ring.iter()) {
            assert!((before.lat - after.lat).abs() < 1e-9);
            assert!((before.lng - after.lng).abs() < 1e-9);
        }
    }

    /// Rescaling is isotropic: planar distance ratios survive a drag
    #[test]
    fn test_distance_ratios_preserved() {
        let transform = AreaPreservingTransform::default();
        let polygon = transform
            .create_from_vertices(vec![
                LatLng::new(20.0, 40.0),
                LatLng::new(20.0, 40.2),
                LatLng::new(20.3, 40.25),
                LatLng::new(20.1, 39.9),
            ])
            .unwrap();
        let delta = LatLngDelta::new(1.5, 0.4);
        let step = transform.drag_step(&polygon, delta).unwrap();

        let translated = polygon.ring().translate(delta).unwrap();
        let projector = transform.projector();
        let before = projector.to_planar_all(&translated, step.zone).unwrap();
        let after = projector.to_planar_all(&step.ring, step.zone).unwrap();

        let base_before = before[0].distance_to(&before[2]);
        let base_after = after[0].distance_to(&after[2]);
        for (i, j) in [(0, 1), (1, 2), (2, 3), (3, 0), (1, 3)] {
            let ratio_before = before[i].distance_to(&before[j]) / base_before;
            let ratio_after = after[i].distance_to(&after[j]) / base_after;
            assert!((ratio_before - ratio_after).abs() < 1e-9);
        }
    }

    /// A ring with no area cannot be rescaled and is left alone
    #[test]
    fn test_degenerate_guard() {
        let transform = AreaPreservingTransform::default();
        let point = LatLng::new(-12.0, 130.0);
        let mut polygon = transform
            .create_from_vertices(vec![point, point, point, point])
            .unwrap();
        let before = polygon.ring().clone();

        let err = transform
            .commit_drag(&mut polygon, LatLngDelta::new(1.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, AreaError::DegenerateGeometry { .. }));
        assert_eq!(polygon.ring(), &before);
    }

    /// Vertices on one line enclose nothing; dragging must not collapse them
    #[test]
    fn test_collinear_ring_is_not_collapsed() {
        let transform = AreaPreservingTransform::default();
        let mut polygon = transform
            .create_from_vertices(vec![
                LatLng::new(0.0, 0.0),
                LatLng::new(0.0, 0.01),
                LatLng::new(0.0, 0.02),
            ])
            .unwrap();
        let before = polygon.ring().clone();

        for _ in 0..3 {
            let err = transform
                .commit_drag(&mut polygon, LatLngDelta::new(5.0, 5.0))
                .unwrap_err();
            assert!(matches!(err, AreaError::DegenerateGeometry { .. }));
        }
        assert_eq!(polygon.ring(), &before);
    }

    /// Latitudes beyond the poles are rejected before any projection
    #[test]
    fn test_latitude_out_of_range_is_invalid_input() {
        let transform = AreaPreservingTransform::default();
        let err = transform
            .create_from_vertices(vec![
                LatLng::new(95.0, 0.0),
                LatLng::new(95.0, 1.0),
                LatLng::new(96.0, 1.0),
            ])
            .unwrap_err();
        assert!(matches!(err, AreaError::InvalidInput(_)));
    }

    /// Two vertices are not a polygon
    #[test]
    fn test_creation_precondition() {
        let transform = AreaPreservingTransform::default();
        let err = transform
            .create_from_vertices(vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 0.01)])
            .unwrap_err();
        assert!(matches!(err, AreaError::InvalidInput(_)));
    }

    /// Zone area stays close to the ellipsoidal area for small shapes
    #[test]
    fn test_matches_geodesic_area_near_meridian() {
        let transform = AreaPreservingTransform::default();
        let polygon = transform
            .create_from_vertices(vec![
                LatLng::new(-33.90, 147.0),
                LatLng::new(-33.90, 147.05),
                LatLng::new(-33.85, 147.05),
                LatLng::new(-33.85, 147.0),
            ])
            .unwrap();
        let geodesic = geodesic_area(polygon.ring()).unwrap();
        assert!(relative_error(polygon.original_area(), geodesic) < 1e-3);
    }
}
