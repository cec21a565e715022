//! lightlist-bc: Light List to Bridge Command converter
//!
//! Reads NOAA/USCG Light List extracts and writes the `Buoy.ini` and
//! `Light.ini` files the Bridge Command ship simulator loads for a world.
//!
//! ## Architecture
//!
//! - **Light List reader**: four source layouts into `NavAid` records
//! - **Geo**: DMS parsing, bounding box, longitude conventions
//! - **Interpreter**: characteristic text into light descriptor and buoy class
//! - **Writer**: Bridge Command INI rendering
//! - **Pipeline**: read, filter, interpret and write as one run

pub mod config;
pub mod geo;
pub mod interpreter;
pub mod lightlist;
pub mod pipeline;
pub mod types;
pub mod writer;

// Re-export converter configuration
pub use config::{ConfigError, ConverterConfig, InterpreterConfig};

// Re-export commonly used types
pub use types::{
    BuoyClass, CharacteristicClass, ConvertedAid, FlashPattern, GeoPosition, LightColor,
    LightDescriptor, NavAid, Palette, Rgb, Tick,
};

// Re-export the core components
pub use interpreter::{Interpretation, Interpreter, InterpreterError};
pub use lightlist::{InputFormat, LightList, ReadError};
pub use pipeline::{ConversionReport, ConvertError, Converter};
pub use writer::WriteError;
