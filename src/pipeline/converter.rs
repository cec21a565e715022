//! Converter: one run from Light List files to Bridge Command INI files

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{info, warn};

use super::ConversionReport;
use crate::config::{ConfigError, ConverterConfig};
use crate::interpreter::{Interpreter, InterpreterError};
use crate::lightlist;
use crate::types::{ConvertedAid, NavAid};
use crate::writer::{self, WriteError};

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Interpreter(#[from] InterpreterError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("no input files given")]
    NoInputs,

    #[error("no navigational aids parsed from {inputs} input file(s)")]
    NoEntries { inputs: usize },
}

/// Converter bound to one validated configuration
#[derive(Debug)]
pub struct Converter {
    config: ConverterConfig,
    interpreter: Interpreter,
    dry_run: bool,
}

impl Converter {
    /// Validate the config and build the interpreter.
    pub fn new(config: ConverterConfig) -> Result<Self, ConvertError> {
        config.validate()?;
        let interpreter = Interpreter::new(config.interpreter)?;
        Ok(Self {
            config,
            interpreter,
            dry_run: false,
        })
    }

    /// Parse, filter and interpret, but write nothing.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Read all inputs, keep aids inside the bounding box, interpret them
    /// and write `Buoy.ini` / `Light.ini`.
    pub fn convert(&self, inputs: &[PathBuf]) -> Result<ConversionReport, ConvertError> {
        if inputs.is_empty() {
            return Err(ConvertError::NoInputs);
        }

        let loaded = lightlist::load_many(inputs, self.config.input.format);
        if loaded.aids.is_empty() {
            return Err(ConvertError::NoEntries {
                inputs: inputs.len(),
            });
        }

        let by_format = loaded
            .format_counts()
            .into_iter()
            .map(|(format, n)| (format.to_string(), n))
            .collect();
        let total_parsed = loaded.aids.len();

        let converted = self.convert_aids(loaded.aids);
        info!(
            parsed = total_parsed,
            inside = converted.len(),
            bbox = %self.config.bbox,
            "Filtered to bounding box"
        );
        if converted.is_empty() {
            warn!(bbox = %self.config.bbox, "No aids inside the bounding box; writing empty files");
        }

        let outputs = if self.dry_run {
            info!("Dry run, skipping output files");
            None
        } else {
            Some(writer::write_outputs(&converted, &self.config)?)
        };

        Ok(ConversionReport {
            inputs: loaded.infos,
            total_parsed,
            inside_bbox: converted.len(),
            bbox: self.config.bbox,
            by_class: ConversionReport::count_classes(&converted),
            by_format,
            outputs,
            dry_run: self.dry_run,
        })
    }

    /// Bounding-box filter then parallel interpretation, preserving order.
    pub fn convert_aids(&self, aids: Vec<NavAid>) -> Vec<ConvertedAid> {
        let bbox = self.config.bbox;
        aids.into_par_iter()
            .filter(|aid| bbox.contains(aid.position))
            .map(|aid| {
                let interpretation = self.interpreter.interpret_aid(&aid);
                ConvertedAid {
                    aid,
                    light: interpretation.descriptor,
                    buoy: interpretation.class,
                }
            })
            .collect()
    }
}
