//! Bounding-box filtering and longitude normalization

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::defaults::DEFAULT_BBOX;
use crate::types::GeoPosition;

// ============================================================================
// Bounding Box
// ============================================================================

/// Inclusive lon/lat rectangle in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        let (min_lon, min_lat, max_lon, max_lat) = DEFAULT_BBOX;
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }
}

impl BoundingBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    pub fn contains(&self, pos: GeoPosition) -> bool {
        (self.min_lon..=self.max_lon).contains(&pos.lon) && (self.min_lat..=self.max_lat).contains(&pos.lat)
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

/// Parses `MIN_LON,MIN_LAT,MAX_LON,MAX_LAT`
impl FromStr for BoundingBox {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<f64> = s
            .split(',')
            .map(|p| {
                p.trim()
                    .parse::<f64>()
                    .map_err(|e| format!("invalid bbox value '{}': {}", p.trim(), e))
            })
            .collect::<Result<_, _>>()?;

        match values.as_slice() {
            &[min_lon, min_lat, max_lon, max_lat] => {
                Ok(Self::new(min_lon, min_lat, max_lon, max_lat))
            }
            _ => Err(format!(
                "bbox needs 4 comma-separated values (MIN_LON,MIN_LAT,MAX_LON,MAX_LAT), got {}",
                values.len()
            )),
        }
    }
}

// ============================================================================
// Longitude Normalization
// ============================================================================

/// How longitudes are expressed in the written Buoy.ini
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongitudeMode {
    /// -180..+180, west negative
    #[default]
    NegWest,
    /// 0..360
    Wrap360,
    /// Treat values above 180 as 0..360 west, then -180..+180
    ForceWestNeg,
}

impl FromStr for LongitudeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "neg_west" => Ok(LongitudeMode::NegWest),
            "wrap360" | "wrap_360" => Ok(LongitudeMode::Wrap360),
            "force_west_neg" => Ok(LongitudeMode::ForceWestNeg),
            other => Err(format!(
                "unknown longitude mode '{other}' (expected neg_west, wrap360 or force_west_neg)"
            )),
        }
    }
}

/// Output-side position adjustments for worlds that wrap differently
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LongitudeConfig {
    #[serde(default)]
    pub mode: LongitudeMode,

    /// Constant added after normalization
    #[serde(default)]
    pub offset_deg: f64,

    /// Swap lat/lon before anything else
    #[serde(default)]
    pub swap_lat_lon: bool,
}

impl LongitudeConfig {
    /// Apply swap, then mode, then offset.
    pub fn normalize(&self, pos: GeoPosition) -> GeoPosition {
        let (mut lon, lat) = if self.swap_lat_lon {
            (pos.lat, pos.lon)
        } else {
            (pos.lon, pos.lat)
        };

        lon = match self.mode {
            LongitudeMode::Wrap360 => lon.rem_euclid(360.0),
            LongitudeMode::ForceWestNeg => {
                if lon > 180.0 {
                    lon -= 360.0;
                }
                to_neg_west(lon)
            }
            LongitudeMode::NegWest => to_neg_west(lon),
        };

        GeoPosition::new(lon + self.offset_deg, lat)
    }
}

fn to_neg_west(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_inclusive() {
        let bbox = BoundingBox::new(-74.36, 40.35, -73.88, 40.73);
        assert!(bbox.contains(GeoPosition::new(-74.0, 40.5)));
        assert!(bbox.contains(GeoPosition::new(-74.36, 40.35)));
        assert!(!bbox.contains(GeoPosition::new(-74.5, 40.5)));
        assert!(!bbox.contains(GeoPosition::new(-74.0, 41.0)));
    }

    #[test]
    fn test_bbox_from_str() {
        let bbox: BoundingBox = "-71.7, 17.3, -68.3, 19.9".parse().unwrap();
        assert_eq!(bbox, BoundingBox::new(-71.7, 17.3, -68.3, 19.9));
        assert!("1,2,3".parse::<BoundingBox>().is_err());
        assert!("a,b,c,d".parse::<BoundingBox>().is_err());
    }

    #[test]
    fn test_neg_west_wraps_east_values() {
        let cfg = LongitudeConfig::default();
        let out = cfg.normalize(GeoPosition::new(286.0, 40.0));
        assert!((out.lon - -74.0).abs() < 1e-9, "lon: {}", out.lon);
        let out = cfg.normalize(GeoPosition::new(-74.0, 40.0));
        assert!((out.lon - -74.0).abs() < 1e-9);
    }

    #[test]
    fn test_wrap360() {
        let cfg = LongitudeConfig {
            mode: LongitudeMode::Wrap360,
            ..Default::default()
        };
        let out = cfg.normalize(GeoPosition::new(-74.0, 40.0));
        assert!((out.lon - 286.0).abs() < 1e-9);
    }

    #[test]
    fn test_swap_and_offset() {
        let cfg = LongitudeConfig {
            mode: LongitudeMode::NegWest,
            offset_deg: 360.0,
            swap_lat_lon: true,
        };
        let out = cfg.normalize(GeoPosition::new(40.0, -74.0));
        assert!((out.lon - 286.0).abs() < 1e-9);
        assert!((out.lat - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("wrap360".parse::<LongitudeMode>(), Ok(LongitudeMode::Wrap360));
        assert_eq!("force-west-neg".parse::<LongitudeMode>(), Ok(LongitudeMode::ForceWestNeg));
        assert!("east_positive".parse::<LongitudeMode>().is_err());
    }
}
