//! Coordinate string parsing
//!
//! Light List sources spell positions several ways:
//!
//! - hyphenated DMS: `44-32-15.837N`, `067-05-13.808W`
//! - symbol DMS: `18°26'48"N` (`º` is accepted for `°`)
//! - space DMS: `18 26 48 N`
//! - degrees + decimal minutes: `40°35.25'N`
//! - decimal with hemisphere: `18.4467 N`
//! - signed decimal: `-74.25`

use std::sync::OnceLock;

use regex::Regex;

use crate::types::GeoPosition;

/// Which coordinate a string is expected to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 360.0,
        }
    }
}

/// Compass hemisphere suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Hemisphere::North | Hemisphere::South => Axis::Latitude,
            Hemisphere::East | Hemisphere::West => Axis::Longitude,
        }
    }

    fn sign(self) -> f64 {
        match self {
            Hemisphere::South | Hemisphere::West => -1.0,
            Hemisphere::North | Hemisphere::East => 1.0,
        }
    }
}

/// A DMS token located inside a longer line of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DmsToken {
    /// Byte offset where the token starts
    pub start: usize,
    /// Byte offset one past the token's hemisphere letter
    pub end: usize,
    /// Signed decimal degrees
    pub value: f64,
    pub hemisphere: Hemisphere,
}

fn dms_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?i)(\d{1,3})(?:\s*[-°º:]\s*|\s+)(\d{1,2})(?:\s*[-'’′:]\s*|\s+)(\d{1,2}(?:\.\d+)?)\s*(?:''|["”″])?\s*([NSEW])\b"#,
        )
        .expect("DMS pattern is valid")
    })
}

fn dm_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d{1,3})\s*[-°º\s]\s*(\d{1,2}\.\d+)\s*['’′]?\s*([NSEW])\b")
            .expect("DM pattern is valid")
    })
}

fn decimal_hemisphere_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*([-+]?\d+(?:\.\d+)?)\s*[°º]?\s*([NSEW])\s*$")
            .expect("decimal pattern is valid")
    })
}

fn to_decimal(deg: f64, min: f64, sec: f64, hemi: Hemisphere) -> Option<f64> {
    if min >= 60.0 || sec >= 60.0 {
        return None;
    }
    let value = hemi.sign() * (deg + min / 60.0 + sec / 3600.0);
    (value.abs() <= hemi.axis().limit()).then_some(value)
}

fn hemisphere_of(caps: &regex::Captures<'_>, idx: usize) -> Option<Hemisphere> {
    caps.get(idx)
        .and_then(|m| m.as_str().chars().next())
        .and_then(Hemisphere::from_char)
}

fn number_of(caps: &regex::Captures<'_>, idx: usize) -> Option<f64> {
    caps.get(idx).and_then(|m| m.as_str().parse().ok())
}

/// Find the first DMS token in a line of free text.
///
/// Tokens with out-of-range minutes or seconds are skipped.
pub fn find_dms(line: &str) -> Option<DmsToken> {
    dms_regex().captures_iter(line).find_map(|caps| {
        let whole = caps.get(0)?;
        let hemisphere = hemisphere_of(&caps, 4)?;
        let value = to_decimal(
            number_of(&caps, 1)?,
            number_of(&caps, 2)?,
            number_of(&caps, 3)?,
            hemisphere,
        )?;
        Some(DmsToken {
            start: whole.start(),
            end: whole.end(),
            value,
            hemisphere,
        })
    })
}

/// Parse one coordinate string for the given axis.
///
/// A hemisphere letter for the other axis (e.g. `N` when a longitude is
/// expected) is rejected.
pub fn parse_coordinate(text: &str, axis: Axis) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(token) = find_dms(text) {
        return (token.hemisphere.axis() == axis).then_some(token.value);
    }

    if let Some(caps) = dm_regex().captures(text) {
        let hemisphere = hemisphere_of(&caps, 3)?;
        if hemisphere.axis() != axis {
            return None;
        }
        return to_decimal(number_of(&caps, 1)?, number_of(&caps, 2)?, 0.0, hemisphere);
    }

    if let Some(caps) = decimal_hemisphere_regex().captures(text) {
        let hemisphere = hemisphere_of(&caps, 2)?;
        if hemisphere.axis() != axis {
            return None;
        }
        let value = number_of(&caps, 1)?.abs() * hemisphere.sign();
        return (value.abs() <= axis.limit()).then_some(value);
    }

    let value: f64 = text.parse().ok()?;
    (value.is_finite() && value.abs() <= axis.limit()).then_some(value)
}

/// Parse a combined position column such as `39-37-06.000N, 072-38-40.000W`.
pub fn parse_position(text: &str) -> Option<GeoPosition> {
    let mut lat = None;
    let mut lon = None;
    let mut rest = text;

    while let Some(token) = find_dms(rest) {
        match token.hemisphere.axis() {
            Axis::Latitude if lat.is_none() => lat = Some(token.value),
            Axis::Longitude if lon.is_none() => lon = Some(token.value),
            _ => {}
        }
        rest = &rest[token.end..];
    }

    if lat.is_none() || lon.is_none() {
        // Decimal pair: "40.5 N, 74.1 W" or "40.5, -74.1"
        let parts: Vec<&str> = text
            .split([',', ';', '/'])
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() == 2 {
            lat = lat.or_else(|| parse_coordinate(parts[0], Axis::Latitude));
            lon = lon.or_else(|| parse_coordinate(parts[1], Axis::Longitude));
        }
    }

    Some(GeoPosition::new(lon?, lat?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_hyphenated_dms() {
        let lat = parse_coordinate("44-32-15.837N", Axis::Latitude).unwrap();
        assert!(close(lat, 44.0 + 32.0 / 60.0 + 15.837 / 3600.0), "lat: {}", lat);

        let lon = parse_coordinate("067-05-13.808W", Axis::Longitude).unwrap();
        assert!(close(lon, -(67.0 + 5.0 / 60.0 + 13.808 / 3600.0)), "lon: {}", lon);
    }

    #[test]
    fn test_symbol_dms() {
        let lat = parse_coordinate("18°26'48\"N", Axis::Latitude).unwrap();
        assert!(close(lat, 18.0 + 26.0 / 60.0 + 48.0 / 3600.0));

        let lon = parse_coordinate("69º52'19\"W", Axis::Longitude).unwrap();
        assert!(close(lon, -(69.0 + 52.0 / 60.0 + 19.0 / 3600.0)));
    }

    #[test]
    fn test_space_dms_and_decimal_minutes() {
        let lat = parse_coordinate("18 26 48 S", Axis::Latitude).unwrap();
        assert!(close(lat, -(18.0 + 26.0 / 60.0 + 48.0 / 3600.0)));

        let lat = parse_coordinate("40°35.25'N", Axis::Latitude).unwrap();
        assert!(close(lat, 40.0 + 35.25 / 60.0));
    }

    #[test]
    fn test_decimal_forms() {
        assert!(close(parse_coordinate("18.4467 N", Axis::Latitude).unwrap(), 18.4467));
        assert!(close(parse_coordinate("69.5 W", Axis::Longitude).unwrap(), -69.5));
        assert!(close(parse_coordinate("-74.25", Axis::Longitude).unwrap(), -74.25));
    }

    #[test]
    fn test_axis_mismatch_rejected() {
        assert_eq!(parse_coordinate("44-32-15.837N", Axis::Longitude), None);
        assert_eq!(parse_coordinate("69.5 W", Axis::Latitude), None);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(parse_coordinate("95.0", Axis::Latitude), None);
        assert_eq!(parse_coordinate("44-75-00N", Axis::Latitude), None);
        assert_eq!(parse_coordinate("", Axis::Latitude), None);
        assert_eq!(parse_coordinate("Fl W 4s", Axis::Latitude), None);
    }

    #[test]
    fn test_find_dms_offsets() {
        let line = "Ambrose Channel Lighted Buoy 2 40-27-30.000N Fl R 4s";
        let token = find_dms(line).unwrap();
        assert_eq!(token.hemisphere, Hemisphere::North);
        assert_eq!(&line[..token.start], "Ambrose Channel Lighted Buoy 2 ");
        assert_eq!(line[token.end..].trim(), "Fl R 4s");
    }

    #[test]
    fn test_parse_position_column() {
        let pos = parse_position("39-37-06.000N, 072-38-40.000W").unwrap();
        assert!(close(pos.lat, 39.0 + 37.0 / 60.0 + 6.0 / 3600.0));
        assert!(close(pos.lon, -(72.0 + 38.0 / 60.0 + 40.0 / 3600.0)));

        // Longitude first still resolves by hemisphere
        let pos = parse_position("072-38-40.000W 39-37-06.000N").unwrap();
        assert!(pos.lon < 0.0 && pos.lat > 0.0);

        let pos = parse_position("40.5, -74.1").unwrap();
        assert!(close(pos.lat, 40.5) && close(pos.lon, -74.1));

        assert!(parse_position("no position").is_none());
    }
}
