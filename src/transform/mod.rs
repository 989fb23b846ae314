//! Area-preserving translation of polygons.
//!
//! A polygon's area is measured once, when it is created, in the UTM zone
//! of its vertex centroid. Every drag step then:
//!
//! 1. translates the current ring by the pointer delta in lat/lng space
//! 2. re-selects the zone from the translated centroid
//! 3. measures the translated ring in that zone
//! 4. rescales it about the projected centroid by `sqrt(original / current)`
//! 5. un-projects the result
//!
//! Each step starts from the stored original area, never from the previous
//! step's measurement, so error does not compound over a long drag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::config::TransformConfig;
use crate::core::geo::{LatLng, LatLngDelta};
use crate::geometry::{centroid, planar_area, Ring};
use crate::projection::{select_zone, Projector, UtmProjector, UtmZone};
use crate::{Error, Result};

static NEXT_POLYGON_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque polygon identity, unique within the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PolygonId(u64);

impl PolygonId {
    pub fn next() -> Self {
        Self(NEXT_POLYGON_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "polygon_{}", self.0)
    }
}

/// A drawn polygon: its current ring plus the area it must keep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    id: PolygonId,
    ring: Ring,
    original_area: f64,
}

impl Polygon {
    pub fn id(&self) -> PolygonId {
        self.id
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// Area in m² measured at creation; never changes afterwards
    pub fn original_area(&self) -> f64 {
        self.original_area
    }
}

/// Where a polygon is in its drag gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    /// `last` is the pointer position that produced the current ring
    Dragging { polygon: PolygonId, last: LatLng },
}

impl Default for DragState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Outcome of one drag step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragStep {
    /// The translated and rescaled ring
    pub ring: Ring,
    /// Zone the step was computed in
    pub zone: UtmZone,
    /// Area of the translated ring before rescaling (m²)
    pub measured_area: f64,
    /// Linear factor applied about the centroid
    pub scale_factor: f64,
}

/// The projection engine: stateless apart from its projector and config
#[derive(Debug, Clone)]
pub struct AreaPreservingTransform<P: Projector = UtmProjector> {
    projector: P,
    config: TransformConfig,
}

impl AreaPreservingTransform<UtmProjector> {
    pub fn new(config: TransformConfig) -> Self {
        let projector = UtmProjector::new(Default::default(), config.projection.clone());
        Self { projector, config }
    }
}

impl Default for AreaPreservingTransform<UtmProjector> {
    fn default() -> Self {
        Self::new(TransformConfig::default())
    }
}

impl<P: Projector> AreaPreservingTransform<P> {
    pub fn with_projector(projector: P, config: TransformConfig) -> Self {
        Self { projector, config }
    }

    pub fn projector(&self) -> &P {
        &self.projector
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Zone of the ring's vertex centroid and the ring's area in that zone
    pub fn measure(&self, points: &[LatLng]) -> Result<(UtmZone, f64)> {
        let zone = select_zone(&centroid(points)?);
        let planar = self.projector.to_planar_all(points, zone)?;
        Ok((zone, planar_area(&planar)?))
    }

    /// Builds a polygon from a finished draw gesture and fixes its area.
    ///
    /// Rings with zero area are accepted; they fail on their first drag step.
    pub fn create_from_vertices(&self, vertices: Vec<LatLng>) -> Result<Polygon> {
        let ring = Ring::new(vertices)?;
        let (zone, original_area) = self.measure(&ring)?;
        let id = PolygonId::next();

        if original_area <= self.config.min_area_m2 {
            log::warn!("{id} created with degenerate area {original_area} m² in zone {zone}");
        } else {
            log::debug!("{id} created in zone {zone}: {original_area:.1} m²");
        }

        Ok(Polygon {
            id,
            ring,
            original_area,
        })
    }

    /// Runs one drag step without touching `polygon`
    pub fn drag_step(&self, polygon: &Polygon, delta: LatLngDelta) -> Result<DragStep> {
        // Nothing to rescale towards; a zero target would collapse the ring.
        if polygon.original_area.is_nan() || polygon.original_area <= self.config.min_area_m2 {
            log::warn!(
                "{} has degenerate original area {} m²",
                polygon.id,
                polygon.original_area
            );
            return Err(Error::DegenerateGeometry {
                area: polygon.original_area,
            });
        }

        let translated = polygon.ring.translate(delta)?;

        let anchor = centroid(&translated)?;
        let zone = select_zone(&anchor);
        let planar = self.projector.to_planar_all(&translated, zone)?;
        let measured_area = planar_area(&planar)?;

        if !measured_area.is_finite() || measured_area <= self.config.min_area_m2 {
            log::warn!("{} cannot keep its area: measured {measured_area} m²", polygon.id);
            return Err(Error::DegenerateGeometry {
                area: measured_area,
            });
        }

        let scale_factor = (polygon.original_area / measured_area).sqrt();
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(Error::DegenerateGeometry {
                area: measured_area,
            });
        }

        let anchor_planar = self.projector.to_planar(&anchor, zone)?;
        let scaled: Vec<_> = planar
            .iter()
            .map(|p| p.scale_about(&anchor_planar, scale_factor))
            .collect();

        let points = self
            .projector
            .to_geographic_all(&scaled, zone)?
            .into_iter()
            .zip(translated.iter())
            .map(|(p, before)| p.unwrap_near(before.lng))
            .collect();

        log::trace!(
            "{} step in zone {zone}: measured {measured_area:.1} m², scale {scale_factor:.9}",
            polygon.id
        );

        Ok(DragStep {
            ring: Ring::new(points)?,
            zone,
            measured_area,
            scale_factor,
        })
    }

    /// Translated, area-corrected ring for one drag step
    pub fn apply_drag(&self, polygon: &Polygon, delta: LatLngDelta) -> Result<Ring> {
        Ok(self.drag_step(polygon, delta)?.ring)
    }

    /// Runs a drag step and stores the new ring. On error the polygon keeps
    /// its previous ring.
    pub fn commit_drag(&self, polygon: &mut Polygon, delta: LatLngDelta) -> Result<DragStep> {
        let previous_zone = select_zone(&centroid(&polygon.ring)?);
        let step = self.drag_step(polygon, delta)?;
        if step.zone != previous_zone {
            log::debug!("{} moved from zone {previous_zone} into {}", polygon.id, step.zone);
        }
        polygon.ring = step.ring.clone();
        Ok(step)
    }
}
