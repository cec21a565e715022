//! Navigational-aid records as read from a Light List

use serde::Serialize;

use super::{BuoyClass, LightDescriptor};

/// Decimal-degree position. West longitudes and south latitudes are negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPosition {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPosition {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// One navigational aid extracted from a source file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavAid {
    /// Light List number, when the source carries one
    pub llnr: Option<String>,
    pub name: String,
    pub position: GeoPosition,
    /// Characteristic text, e.g. `Fl G 4s`
    pub characteristic: String,
    /// Structure and remarks text joined with a space
    pub structure: String,
    /// Raw height column, if the source has one
    pub height_field: Option<String>,
    /// Raw range column, if the source has one
    pub range_field: Option<String>,
    /// 1-based line in the source file
    pub source_line: usize,
}

impl NavAid {
    /// Minimal record from a position and characteristic
    pub fn new(name: impl Into<String>, position: GeoPosition, characteristic: impl Into<String>) -> Self {
        Self {
            llnr: None,
            name: name.into(),
            position,
            characteristic: characteristic.into(),
            structure: String::new(),
            height_field: None,
            range_field: None,
            source_line: 0,
        }
    }

    pub fn with_structure(mut self, structure: impl Into<String>) -> Self {
        self.structure = structure.into();
        self
    }

    pub fn with_fields(mut self, height: Option<String>, range: Option<String>) -> Self {
        self.height_field = height;
        self.range_field = range;
        self
    }
}

/// Aid plus its interpretation, ready to serialize
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertedAid {
    pub aid: NavAid,
    pub light: LightDescriptor,
    pub buoy: BuoyClass,
}
