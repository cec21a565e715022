//! Domain types shared across the converter

mod aid;
mod buoy;
mod light;

pub use aid::{ConvertedAid, GeoPosition, NavAid};
pub use buoy::BuoyClass;
pub use light::{CharacteristicClass, FlashPattern, LightColor, LightDescriptor, Palette, Rgb, Tick};
