//! Converter Configuration - every tunable as a TOML value
//!
//! Each struct implements `Default` with the canonical marine defaults from
//! `config::defaults`, so an empty or missing file gives a working converter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults::{
    CONFIG_ENV_VAR, DEFAULT_COORDINATE_DECIMALS, DEFAULT_HEIGHT_M, DEFAULT_PERIOD_S,
    DEFAULT_RANGE_NM, LOCAL_CONFIG_FILE, MAX_COORDINATE_DECIMALS, MIN_MEANINGFUL_PERIOD_S,
};
use crate::geo::{BoundingBox, LongitudeConfig};
use crate::lightlist::InputFormat;
use crate::types::{BuoyClass, Palette};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one conversion run.
///
/// Load with `ConverterConfig::load()` which searches:
/// 1. an explicit path (the `--config` flag)
/// 2. `$LIGHTLIST_CONFIG` env var
/// 3. `./lightlist.toml`
/// 4. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Characteristic interpreter defaults and palette
    #[serde(default)]
    pub interpreter: InterpreterConfig,

    /// Area of interest; aids outside are dropped
    #[serde(default)]
    pub bbox: BoundingBox,

    /// Longitude convention of the target world
    #[serde(default)]
    pub longitude: LongitudeConfig,

    /// Source file handling
    #[serde(default)]
    pub input: InputConfig,

    /// Output file names and formatting
    #[serde(default)]
    pub output: OutputConfig,

    /// Per-class Bridge Command model overrides, keyed by class slug
    #[serde(default)]
    pub buoy_types: BTreeMap<String, String>,
}

impl ConverterConfig {
    /// Load configuration using the standard search order.
    ///
    /// An explicit path must load cleanly. The env-var and local-file
    /// candidates fall back to the next step with a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        // 1. Explicit path
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            info!(path = %path.display(), "Loaded converter config");
            return Ok(config);
        }

        // 2. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded converter config from {}", CONFIG_ENV_VAR);
                        return Ok(config);
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
            }
        }

        // 3. Check ./lightlist.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded converter config from ./{}", LOCAL_CONFIG_FILE);
                    return Ok(config);
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        // 4. Defaults
        info!("No {} found, using built-in defaults", LOCAL_CONFIG_FILE);
        Ok(Self::default())
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings; they never fail the load.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;

        let (_, warnings) = super::validation::validate_physical_ranges(&config);
        for w in &warnings {
            warn!("{}", w);
        }
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Converter config saved");
        Ok(())
    }

    /// Bridge Command model name for a buoy class, honoring `[buoy_types]`.
    pub fn buoy_type_name(&self, class: BuoyClass) -> &str {
        self.buoy_types
            .get(class.slug())
            .map_or_else(|| class.default_type_name(), String::as_str)
    }

    /// Validate values that would make the run meaningless.
    ///
    /// Rules:
    /// - All reals must be finite
    /// - Bounding box must have min < max, longitudes within ±360 and
    ///   latitudes within ±90
    /// - Interpreter defaults must be usable (see `InterpreterConfig::validate`)
    /// - `coordinate_decimals` at most 12
    /// - `[buoy_types]` keys must be known class slugs
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = self.interpreter.validate();

        let b = &self.bbox;
        if [b.min_lon, b.min_lat, b.max_lon, b.max_lat]
            .iter()
            .any(|v| !v.is_finite())
        {
            errors.push(format!("bbox: values must be finite (got {b})"));
        } else {
            if b.min_lon >= b.max_lon {
                errors.push(format!(
                    "bbox: min_lon ({}) must be < max_lon ({})",
                    b.min_lon, b.max_lon
                ));
            }
            if b.min_lat >= b.max_lat {
                errors.push(format!(
                    "bbox: min_lat ({}) must be < max_lat ({})",
                    b.min_lat, b.max_lat
                ));
            }
            if b.min_lon < -360.0 || b.max_lon > 360.0 {
                errors.push(format!(
                    "bbox: longitudes must be within -360..360 (got {}..{})",
                    b.min_lon, b.max_lon
                ));
            }
            if b.min_lat < -90.0 || b.max_lat > 90.0 {
                errors.push(format!(
                    "bbox: latitudes must be within -90..90 (got {}..{})",
                    b.min_lat, b.max_lat
                ));
            }
        }

        if !self.longitude.offset_deg.is_finite() {
            errors.push(format!(
                "longitude.offset_deg: must be finite (got {})",
                self.longitude.offset_deg
            ));
        }

        if self.output.coordinate_decimals > MAX_COORDINATE_DECIMALS {
            errors.push(format!(
                "output.coordinate_decimals: {} exceeds maximum of {}",
                self.output.coordinate_decimals, MAX_COORDINATE_DECIMALS
            ));
        }
        if self.output.buoy_file.trim().is_empty() || self.output.light_file.trim().is_empty() {
            errors.push("output: buoy_file and light_file must be non-empty".to_string());
        }

        for key in self.buoy_types.keys() {
            if BuoyClass::from_slug(key).is_none() {
                errors.push(format!("buoy_types: unknown buoy class '{key}'"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Interpreter Config
// ============================================================================

/// Defaults the characteristic interpreter falls back to, plus the palette
/// the writer maps colors through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Period when the text names none, or names one of 0.5 s or less
    #[serde(default = "default_period_s")]
    pub default_period_s: f64,

    /// Range when neither text nor range column gives one (NM)
    #[serde(default = "default_range_nm")]
    pub default_range_nm: f64,

    /// Height when neither text nor height column gives one (m)
    #[serde(default = "default_height_m")]
    pub default_height_m: f64,

    #[serde(default)]
    pub palette: Palette,
}

fn default_period_s() -> f64 { DEFAULT_PERIOD_S }
fn default_range_nm() -> f64 { DEFAULT_RANGE_NM }
fn default_height_m() -> f64 { DEFAULT_HEIGHT_M }

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            default_period_s: default_period_s(),
            default_range_nm: default_range_nm(),
            default_height_m: default_height_m(),
            palette: Palette::default(),
        }
    }
}

impl InterpreterConfig {
    /// Problems that would let the interpreter emit a non-positive value.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.default_period_s.is_finite() || self.default_period_s <= MIN_MEANINGFUL_PERIOD_S {
            errors.push(format!(
                "interpreter.default_period_s: must be finite and > {MIN_MEANINGFUL_PERIOD_S} (got {})",
                self.default_period_s
            ));
        }
        if !self.default_range_nm.is_finite() || self.default_range_nm <= 0.0 {
            errors.push(format!(
                "interpreter.default_range_nm: must be finite and > 0 (got {})",
                self.default_range_nm
            ));
        }
        if !self.default_height_m.is_finite() || self.default_height_m <= 0.0 {
            errors.push(format!(
                "interpreter.default_height_m: must be finite and > 0 (got {})",
                self.default_height_m
            ));
        }

        errors
    }
}

// ============================================================================
// Input Config
// ============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Source layout; `auto` sniffs each file
    #[serde(default)]
    pub format: InputFormat,
}

// ============================================================================
// Output Config
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving both INI files
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_buoy_file")]
    pub buoy_file: String,

    #[serde(default = "default_light_file")]
    pub light_file: String,

    /// Decimal places for `Long(i)` / `Lat(i)`
    #[serde(default = "default_coordinate_decimals")]
    pub coordinate_decimals: usize,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
fn default_buoy_file() -> String {
    "Buoy.ini".to_string()
}
fn default_light_file() -> String {
    "Light.ini".to_string()
}
fn default_coordinate_decimals() -> usize {
    DEFAULT_COORDINATE_DECIMALS
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            buoy_file: default_buoy_file(),
            light_file: default_light_file(),
            coordinate_decimals: default_coordinate_decimals(),
        }
    }
}

impl OutputConfig {
    pub fn buoy_path(&self) -> PathBuf {
        self.dir.join(&self.buoy_file)
    }

    pub fn light_path(&self) -> PathBuf {
        self.dir.join(&self.light_file)
    }
}

// ============================================================================
// Tests
// ============================================================================
