//! Geographic helpers: coordinate parsing, area filtering, longitude conventions

mod area;
mod dms;

pub use area::{BoundingBox, LongitudeConfig, LongitudeMode};
pub use dms::{find_dms, parse_coordinate, parse_position, Axis, DmsToken, Hemisphere};
