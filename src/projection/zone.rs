use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::constants::{UTM_ZONE_COUNT, UTM_ZONE_WIDTH};
use crate::core::geo::LatLng;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
}

/// A 6° UTM longitude band (1..=60) plus hemisphere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtmZone {
    number: u8,
    hemisphere: Hemisphere,
}

impl UtmZone {
    pub fn new(number: u8, hemisphere: Hemisphere) -> Result<Self> {
        if !(1..=UTM_ZONE_COUNT).contains(&number) {
            return Err(Error::InvalidInput(format!(
                "UTM zone number {number} outside 1..={UTM_ZONE_COUNT}"
            )));
        }
        Ok(Self { number, hemisphere })
    }

    /// Signed zone code: positive in the north, negative in the south
    pub fn from_code(code: i32) -> Result<Self> {
        let hemisphere = if code >= 0 {
            Hemisphere::North
        } else {
            Hemisphere::South
        };
        let number = u8::try_from(code.unsigned_abs())
            .map_err(|_| Error::InvalidInput(format!("UTM zone code {code} out of range")))?;
        Self::new(number, hemisphere)
    }

    pub fn code(&self) -> i32 {
        let number = i32::from(self.number);
        match self.hemisphere {
            Hemisphere::North => number,
            Hemisphere::South => -number,
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// Longitude of the zone's central meridian, in degrees
    pub fn central_meridian(&self) -> f64 {
        f64::from(self.number) * UTM_ZONE_WIDTH - 180.0 - UTM_ZONE_WIDTH / 2.0
    }
}

impl fmt::Display for UtmZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.hemisphere {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        };
        write!(f, "{}{}", self.number, suffix)
    }
}

/// Picks the UTM zone whose central meridian is nearest to `point`.
///
/// Longitudes outside [-180, 180] are wrapped first; 180° itself falls in
/// band 60. Latitude 0 counts as northern.
pub fn select_zone(point: &LatLng) -> UtmZone {
    let lng = LatLng::wrap_lng(point.lng);
    let band = ((lng + 180.0) / UTM_ZONE_WIDTH).floor() as i64 + 1;
    let number = band.clamp(1, i64::from(UTM_ZONE_COUNT)) as u8;
    let hemisphere = if point.lat >= 0.0 {
        Hemisphere::North
    } else {
        Hemisphere::South
    };
    UtmZone { number, hemisphere }
}
