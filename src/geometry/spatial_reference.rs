use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::fmt;

/// An EPSG coded spatial reference known to the bundled crs database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct SpatialReference(u16);

impl SpatialReference {
    pub fn new(epsg: u16) -> Result<SpatialReference> {
        if crs_definitions::from_code(epsg).is_none() {
            return Err(Error::UnknownSpatialReference(epsg));
        }
        Ok(SpatialReference(epsg))
    }

    pub fn epsg(&self) -> u16 {
        self.0
    }

    pub fn map_unit(&self) -> MapUnit {
        match crs_definitions::from_code(self.0) {
            Some(def) => MapUnit::from_proj4(def.proj4),
            None => MapUnit::Linear(LinearUnit::Meters),
        }
    }

    /// converts a linear distance to the units of the map
    pub fn to_map_units(&self, distance: f64, unit: LinearUnit) -> Result<f64> {
        match self.map_unit() {
            MapUnit::Linear(map_unit) => {
                Ok(distance * unit.meters_per_unit() / map_unit.meters_per_unit())
            }
            MapUnit::Degrees => Err(Error::UnsupportedBufferUnit),
        }
    }

    /// errors unless both references are the same
    pub fn ensure_matches(&self, other: &SpatialReference) -> Result<()> {
        if self != other {
            return Err(Error::SpatialReferenceMismatch {
                expected: self.0,
                found: other.0,
            });
        }
        Ok(())
    }
}

impl TryFrom<u16> for SpatialReference {
    type Error = Error;

    fn try_from(epsg: u16) -> Result<Self> {
        SpatialReference::new(epsg)
    }
}

impl From<SpatialReference> for u16 {
    fn from(sr: SpatialReference) -> Self {
        sr.0
    }
}

impl fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapUnit {
    Linear(LinearUnit),
    Degrees,
}

impl MapUnit {
    fn from_proj4(proj4: &str) -> MapUnit {
        for token in proj4.split_whitespace() {
            if token == "+proj=longlat" || token == "+proj=latlong" {
                return MapUnit::Degrees;
            }
            if let Some(unit) = token.strip_prefix("+units=") {
                return match unit {
                    "m" => MapUnit::Linear(LinearUnit::Meters),
                    "km" => MapUnit::Linear(LinearUnit::Kilometers),
                    "ft" => MapUnit::Linear(LinearUnit::Feet),
                    "us-ft" => MapUnit::Linear(LinearUnit::UsFeet),
                    "yd" => MapUnit::Linear(LinearUnit::Yards),
                    "mi" => MapUnit::Linear(LinearUnit::Miles),
                    other => {
                        log::debug!("Unrecognized proj4 unit {other:?}, assuming meters");
                        MapUnit::Linear(LinearUnit::Meters)
                    }
                };
            }
        }
        // proj4 defaults to meters for projected references
        MapUnit::Linear(LinearUnit::Meters)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum LinearUnit {
    #[default]
    Meters,
    Kilometers,
    Feet,
    UsFeet,
    Yards,
    Miles,
}

impl LinearUnit {
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            LinearUnit::Meters => 1.,
            LinearUnit::Kilometers => 1000.,
            LinearUnit::Feet => 0.3048,
            LinearUnit::UsFeet => 1200. / 3937.,
            LinearUnit::Yards => 0.9144,
            LinearUnit::Miles => 1609.344,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LinearUnit::Meters => "meters",
            LinearUnit::Kilometers => "kilometers",
            LinearUnit::Feet => "feet",
            LinearUnit::UsFeet => "us-feet",
            LinearUnit::Yards => "yards",
            LinearUnit::Miles => "miles",
        }
    }
}

impl fmt::Display for LinearUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
