//! Conversion Pipeline
//!
//! ```text
//! STAGE 1: Read     every input file, layout detected per file
//! STAGE 2: Filter   keep aids inside the configured bounding box
//! STAGE 3: Interpret characteristic text, in parallel, order preserved
//! STAGE 4: Write    Buoy.ini + Light.ini (skipped on a dry run)
//! ```
//!
//! An empty bounding-box result is not an error: both files are still
//! written with `Number=0` so a world never keeps stale aids.

mod converter;
mod report;

pub use converter::{ConvertError, Converter};
pub use report::ConversionReport;
